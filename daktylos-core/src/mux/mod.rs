//! Channel multiplexer
//!
//! Several independently-arriving data feeds compete for one physical
//! display. The bank ingests timestamped values, expires stale ones,
//! and decides which channel the display shows right now.

pub mod bank;
pub mod channel;

pub use bank::{ChannelBank, MuxError, CHANNEL_COUNT};
pub use channel::{Channel, Unit};
