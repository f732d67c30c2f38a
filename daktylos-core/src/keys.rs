//! Calculator key model
//!
//! The machine can reach seven keys on the calculator face. Each servo
//! pusher covers two keys (one per swing direction), so a key maps to a
//! pusher index plus a side.

/// Number of servo pushers on the rig
pub const PUSHER_COUNT: usize = 4;

/// Keys the pushers can physically reach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// `=` repeats the primed operation
    Equals,
    /// `+` primes addition
    Plus,
    /// `-` primes subtraction
    Minus,
    /// `.` decimal point
    Dot,
    /// `0`
    Zero,
    /// `1`
    One,
    /// `CA` clear-all
    ClearAll,
}

impl Key {
    /// Single-character label, as printed on the calculator
    pub fn label(self) -> char {
        match self {
            Key::Equals => '=',
            Key::Plus => '+',
            Key::Minus => '-',
            Key::Dot => '.',
            Key::Zero => '0',
            Key::One => '1',
            Key::ClearAll => 'C',
        }
    }
}

/// Which of a pusher's two keys to press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    /// Swing toward the A key (negative angle offset)
    A,
    /// Swing toward the B key (positive angle offset)
    B,
}

/// A key's physical location: pusher index plus swing side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeySlot {
    /// Index into the pusher bank
    pub pusher: usize,
    /// Swing direction for this key
    pub side: Side,
}

/// Key-to-pusher assignment table
///
/// The default layout matches the rig the firmware was built for:
/// pusher 0 covers `=`/`+`, pusher 1 covers `.`/`0`, pusher 2 covers
/// `1`/`CA`, pusher 3 covers only `-` on its B side.
#[derive(Debug, Clone, Copy)]
pub struct Keymap;

impl Keymap {
    /// Look up the physical slot for a key
    pub fn slot(key: Key) -> KeySlot {
        match key {
            Key::Equals => KeySlot { pusher: 0, side: Side::A },
            Key::Plus => KeySlot { pusher: 0, side: Side::B },
            Key::Dot => KeySlot { pusher: 1, side: Side::A },
            Key::Zero => KeySlot { pusher: 1, side: Side::B },
            Key::One => KeySlot { pusher: 2, side: Side::A },
            Key::ClearAll => KeySlot { pusher: 2, side: Side::B },
            Key::Minus => KeySlot { pusher: 3, side: Side::B },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_a_slot_in_range() {
        let keys = [
            Key::Equals,
            Key::Plus,
            Key::Minus,
            Key::Dot,
            Key::Zero,
            Key::One,
            Key::ClearAll,
        ];
        for key in keys {
            let slot = Keymap::slot(key);
            assert!(slot.pusher < PUSHER_COUNT);
        }
    }

    #[test]
    fn test_no_two_keys_share_a_slot() {
        let keys = [
            Key::Equals,
            Key::Plus,
            Key::Minus,
            Key::Dot,
            Key::Zero,
            Key::One,
            Key::ClearAll,
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(Keymap::slot(*a), Keymap::slot(*b));
            }
        }
    }
}
