//! Servo output trait
//!
//! A pusher is a hobby servo with a finger attached. The driver layer
//! decides WHERE a finger should point; this trait is how the decision
//! reaches a PWM peripheral.

/// Errors that can occur when commanding a servo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoError {
    /// Requested angle is outside the servo's travel
    AngleOutOfRange,
}

/// Trait for positional servo outputs
///
/// Implementations translate an angle in degrees to a pulse width.
/// Standard hobby servos travel 0-180 degrees.
pub trait ServoOutput {
    /// Command the servo to the given angle in degrees
    fn set_angle(&mut self, degrees: u8) -> Result<(), ServoError>;
}
