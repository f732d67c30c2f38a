//! Primed operations and place values
//!
//! The calculator repeats its last operation on every `=` press. The
//! sequencer exploits this: prime `+0.1` once, then each `=` adds ten
//! minutes. A place value is therefore both a decimal position and a
//! concrete key sequence.

use crate::keys::Key;

/// Decimal place values the operator keys can express
///
/// Values are in display units; `centi()` gives the fixed-point step.
/// There is no `±1000` priming sequence on the calculator, so deltas
/// beyond the `Hundred` place cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Place {
    /// +-0.01 per press (one minute on the clock)
    Centi,
    /// +-0.1 per press (ten minutes)
    Deci,
    /// +-1 per press (one hour)
    One,
    /// +-10 per press (ten hours)
    Ten,
    /// +-100 per press
    Hundred,
}

impl Place {
    /// All places, lowest first (planning order)
    pub const ALL: [Place; 5] = [
        Place::Centi,
        Place::Deci,
        Place::One,
        Place::Ten,
        Place::Hundred,
    ];

    /// Step size in centi-units (hundredths of a display unit)
    pub fn centi(self) -> i32 {
        match self {
            Place::Centi => 1,
            Place::Deci => 10,
            Place::One => 100,
            Place::Ten => 1_000,
            Place::Hundred => 10_000,
        }
    }

    /// Digit keys pressed after the sign key to prime this place
    pub fn digit_keys(self) -> &'static [Key] {
        match self {
            Place::Centi => &[Key::Dot, Key::Zero, Key::One],
            Place::Deci => &[Key::Dot, Key::One],
            Place::One => &[Key::One],
            Place::Ten => &[Key::One, Key::Zero],
            Place::Hundred => &[Key::One, Key::Zero, Key::Zero],
        }
    }
}

/// Operation currently primed on the calculator
///
/// The physical calculator's primed operation always equals this value
/// right after a plan has been emitted; the sequencer is the only
/// writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Op {
    /// Power-on state: nothing known about the display
    #[default]
    Unset,
    /// Display was just cleared to zero, no operation primed
    Cleared,
    /// Addition of one place step is primed
    Add(Place),
    /// Subtraction of one place step is primed
    Sub(Place),
}

impl Op {
    /// Keys that prime this operation, sign key first
    ///
    /// Empty for `Unset`/`Cleared`, which are not primeable.
    pub fn sign_key(self) -> Option<Key> {
        match self {
            Op::Add(_) => Some(Key::Plus),
            Op::Sub(_) => Some(Key::Minus),
            Op::Unset | Op::Cleared => None,
        }
    }

    /// The place this operation steps, if any
    pub fn place(self) -> Option<Place> {
        match self {
            Op::Add(p) | Op::Sub(p) => Some(p),
            Op::Unset | Op::Cleared => None,
        }
    }

    /// Signed centi-unit change of one `=` press under this operation
    pub fn step_centi(self) -> i32 {
        match self {
            Op::Add(p) => p.centi(),
            Op::Sub(p) => -p.centi(),
            Op::Unset | Op::Cleared => 0,
        }
    }
}
