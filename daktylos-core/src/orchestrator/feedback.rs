//! Feedback pattern derivation
//!
//! Each tick reduces the displayed transition to one tag. The
//! indicator task renders the tag as an animation; the tag crosses
//! the task boundary as a single byte so it can live in an atomic.

use super::WallTime;
use crate::mux::Unit;

/// What the indicator should be showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FeedbackPattern {
    /// Nothing special about the current value
    #[default]
    Steady = 0,
    /// The clock just rolled onto a full hour
    HourChime = 1,
    /// Timer running, plenty of time left
    TimerCalm = 2,
    /// Timer below 100
    TimerNotice = 3,
    /// Timer below 30
    TimerWarn = 4,
    /// Timer below 10
    TimerUrgent = 5,
    /// Timer below 5
    TimerCritical = 6,
    /// Timer hit zero
    TimerExpired = 7,
    /// All displayed digits are the same
    Repdigit = 8,
}

impl FeedbackPattern {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a byte read from the shared atomic. Unknown values fall
    /// back to `Steady` rather than panic, since a torn writer update
    /// is harmless for one indicator cycle.
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::HourChime,
            2 => Self::TimerCalm,
            3 => Self::TimerNotice,
            4 => Self::TimerWarn,
            5 => Self::TimerUrgent,
            6 => Self::TimerCritical,
            7 => Self::TimerExpired,
            8 => Self::Repdigit,
            _ => Self::Steady,
        }
    }

    /// Reduce the current display state to a tag
    pub(super) fn derive(
        unit: &Unit,
        value: f32,
        shown_centi: i32,
        time: Option<WallTime>,
    ) -> Self {
        match unit {
            Unit::Clock => match time {
                Some(t) if t.minute == 0 && t.second < 2 => Self::HourChime,
                _ if is_repdigit(shown_centi) => Self::Repdigit,
                _ => Self::Steady,
            },
            Unit::Timer => {
                if value >= 100.0 {
                    Self::TimerCalm
                } else if value >= 30.0 {
                    Self::TimerNotice
                } else if value >= 10.0 {
                    Self::TimerWarn
                } else if value >= 5.0 {
                    Self::TimerUrgent
                } else if value > 0.0 {
                    Self::TimerCritical
                } else {
                    Self::TimerExpired
                }
            }
            Unit::Sensor(_) => {
                if is_repdigit(shown_centi) {
                    Self::Repdigit
                } else {
                    Self::Steady
                }
            }
        }
    }
}

/// True when every decimal digit of the magnitude is the same. Values
/// under three digits do not count; a lone repeated digit is not an
/// event.
fn is_repdigit(centi: i32) -> bool {
    let mut n = centi.unsigned_abs();
    if n < 100 {
        return false;
    }
    let digit = n % 10;
    while n > 0 {
        if n % 10 != digit {
            return false;
        }
        n /= 10;
    }
    true
}
