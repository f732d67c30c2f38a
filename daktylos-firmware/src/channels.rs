//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy
//! tasks. Uses embassy-sync primitives for safe async communication,
//! plus one atomic for the indicator pattern: the light task polls it
//! freely and a stale read for one animation cycle is harmless.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use portable_atomic::AtomicU8;

use daktylos_protocol::{InputEvent, Message};

/// Channel capacity for bridge messages
const MESSAGE_CHANNEL_SIZE: usize = 8;

/// Channel capacity for button events
const INPUT_CHANNEL_SIZE: usize = 4;

/// Parsed messages from the wireless bridge (channel values, time syncs)
pub static MESSAGE_CHANNEL: Channel<CriticalSectionRawMutex, Message, MESSAGE_CHANNEL_SIZE> =
    Channel::new();

/// Button events from the front button
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Current feedback pattern as a raw byte (see `FeedbackPattern`)
pub static FEEDBACK_PATTERN: AtomicU8 = AtomicU8::new(0);
