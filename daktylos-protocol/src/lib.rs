//! Channel ingestion protocol
//!
//! This crate defines the line-based ASCII protocol between the
//! wireless bridge and the calculator-clock controller, plus the
//! manual input events from the front button.
//!
//! # Protocol Overview
//!
//! Each message is one newline-terminated ASCII line:
//!
//! ```text
//! <channel>,<value>,<unit>\n      channel publish, channel in [1,10]
//! T,<hour>,<minute>,<second>\n    wall-clock sync
//! ```
//!
//! The bridge is free to interleave the two; malformed lines are
//! reported per line and never desynchronize the stream.

#![no_std]
#![deny(unsafe_code)]

pub mod events;
pub mod line;
pub mod message;

pub use events::InputEvent;
pub use line::{LineBuffer, MAX_LINE_LEN};
pub use message::{ChannelMessage, Message, MessageError, TimeSync, MAX_CHANNEL, UNIT_LEN};
