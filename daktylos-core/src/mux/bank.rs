//! Channel bank: ownership, expiry, and rotation

use daktylos_protocol::ChannelMessage;

use super::channel::{Channel, Unit};
use crate::config::MuxConfig;

/// Number of channels, including the clock at index 0
pub const CHANNEL_COUNT: usize = 11;

/// Errors from feeding the bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MuxError {
    /// Channel id outside [1, CHANNEL_COUNT)
    ChannelOutOfRange(u8),
}

/// The channel bank and its selection state
///
/// All mutation happens on the main tick; there is no interior
/// concurrency here. Timestamps are caller-supplied milliseconds so
/// the whole bank is testable without a clock.
pub struct ChannelBank {
    channels: [Channel; CHANNEL_COUNT],
    current: usize,
    config: MuxConfig,
    /// True while we are walking back toward the clock after the
    /// current channel went quiet
    rounding: bool,
    rounding_started_at_ms: u64,
    last_received_at_ms: u64,
}

impl ChannelBank {
    pub fn new(config: MuxConfig) -> Self {
        let channels: [Channel; CHANNEL_COUNT] =
            core::array::from_fn(|i| if i == 0 { Channel::clock() } else { Channel::vacant() });
        Self {
            channels,
            current: 0,
            config,
            rounding: false,
            rounding_started_at_ms: 0,
            last_received_at_ms: 0,
        }
    }

    /// Index of the channel currently on display
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn channel(&self, index: usize) -> &Channel {
        &self.channels[index]
    }

    /// Milliseconds timestamp of the last accepted message
    pub fn last_received_at_ms(&self) -> u64 {
        self.last_received_at_ms
    }

    /// Ingest one transport message
    ///
    /// A fresh non-timer value grabs the display immediately. Timer
    /// refreshes only update the data: the timer is expected to
    /// already be on display, and stealing the screen for every
    /// countdown tick would fight the rotation.
    pub fn receive(&mut self, msg: &ChannelMessage, now_ms: u64) -> Result<(), MuxError> {
        let index = msg.channel as usize;
        if index == 0 || index >= CHANNEL_COUNT {
            return Err(MuxError::ChannelOutOfRange(msg.channel));
        }
        let unit = Unit::from_tag(msg.unit.as_str());
        let switch = !unit.is_timer();
        let ch = &mut self.channels[index];
        ch.value = msg.value;
        ch.unit = unit;
        ch.received_at_ms = now_ms;
        ch.available = true;
        self.last_received_at_ms = now_ms;
        if switch {
            self.current = index;
            self.rounding = false;
        }
        Ok(())
    }

    /// Periodic maintenance: expiry sweep, then the rounding walk
    pub fn tick(&mut self, now_ms: u64) {
        let mut rotate_needed = false;
        for (index, ch) in self.channels.iter_mut().enumerate().skip(1) {
            if ch.available
                && now_ms.saturating_sub(ch.received_at_ms) >= self.config.invalid_interval_ms
            {
                ch.available = false;
                if index == self.current {
                    rotate_needed = true;
                }
            }
        }
        if rotate_needed {
            self.rotate();
        }

        if self.current == 0 {
            self.rounding = false;
            return;
        }

        let ch = &self.channels[self.current];
        let quiet =
            now_ms.saturating_sub(ch.received_at_ms) >= self.config.rounding_interval_ms;
        let active_timer = ch.unit.is_timer() && ch.value > 0.0;
        if !quiet || active_timer {
            self.rounding = false;
            return;
        }
        if !self.rounding {
            self.rounding = true;
            self.rounding_started_at_ms = now_ms;
            self.rotate();
        } else if now_ms.saturating_sub(self.rounding_started_at_ms)
            >= self.config.rounding_interval_ms
        {
            self.rounding_started_at_ms = now_ms;
            self.rotate();
        }
    }

    /// One manual rotation step, bypassing all timers
    pub fn advance(&mut self) {
        self.rotate();
    }

    /// Force the clock back on display
    pub fn reset(&mut self) {
        self.current = 0;
        self.rounding = false;
    }

    /// Select the next available channel after the current one.
    ///
    /// Channel 0 is always available, so the scan always terminates
    /// within one lap.
    fn rotate(&mut self) {
        for step in 1..=CHANNEL_COUNT {
            let index = (self.current + step) % CHANNEL_COUNT;
            if index == 0 || self.channels[index].available {
                self.current = index;
                return;
            }
        }
    }
}
