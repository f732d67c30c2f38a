//! A single labeled data feed

use heapless::String;

/// Maximum length of a sensor unit tag, in bytes
pub const UNIT_TAG_LEN: usize = 12;

/// What kind of quantity a channel carries
///
/// `clock` and `timer` get special treatment from the multiplexer and
/// the feedback derivation; everything else is a free-form sensor tag
/// ("°C", "hPa", "%", ...).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Unit {
    Clock,
    Timer,
    Sensor(String<UNIT_TAG_LEN>),
}

impl Unit {
    /// Parse a wire unit tag
    ///
    /// Tags longer than [`UNIT_TAG_LEN`] bytes are truncated at a
    /// character boundary.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "clock" => Unit::Clock,
            "timer" => Unit::Timer,
            _ => {
                let mut s = String::new();
                for c in tag.chars() {
                    if s.push(c).is_err() {
                        break;
                    }
                }
                Unit::Sensor(s)
            }
        }
    }

    pub fn is_timer(&self) -> bool {
        matches!(self, Unit::Timer)
    }
}

/// One data channel
///
/// Index 0 is the local clock: always available, fed internally,
/// never expires. Indices 1.. are filled by the wireless transport.
#[derive(Debug, Clone)]
pub struct Channel {
    pub(crate) value: f32,
    pub(crate) unit: Unit,
    pub(crate) received_at_ms: u64,
    pub(crate) available: bool,
}

impl Channel {
    pub(crate) fn clock() -> Self {
        Self {
            value: 0.0,
            unit: Unit::Clock,
            received_at_ms: 0,
            available: true,
        }
    }

    pub(crate) fn vacant() -> Self {
        Self {
            value: 0.0,
            unit: Unit::Sensor(String::new()),
            received_at_ms: 0,
            available: false,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn received_at_ms(&self) -> u64 {
        self.received_at_ms
    }

    pub fn is_available(&self) -> bool {
        self.available
    }
}
