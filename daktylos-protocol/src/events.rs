//! Manual input events from the front button

/// Press duration at or above which a press counts as long
pub const LONG_PRESS_MS: u64 = 1_000;

/// Input event values derived from the front button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Short press: rotate to the next channel
    Advance,
    /// Long press (>=1 s): force the clock and re-clear the display
    Reset,
}

impl InputEvent {
    /// Classify a completed press by how long it was held
    pub fn from_press_ms(held_ms: u64) -> Self {
        if held_ms >= LONG_PRESS_MS {
            InputEvent::Reset
        } else {
            InputEvent::Advance
        }
    }
}
