//! RP2040 PWM servo binding
//!
//! Standard hobby-servo drive: 50 Hz frame, 500-2500 us pulse mapped
//! linearly over 0-180 degrees. The PWM counter is clocked at 1 MHz
//! so compare values are pulse widths in microseconds.

use embassy_rp::pwm::{Config as PwmConfig, Pwm};

use daktylos_core::traits::{ServoError, ServoOutput};

/// Pulse width at 0 degrees, in counter ticks (us)
const MIN_PULSE_US: u16 = 500;

/// Pulse width at 180 degrees, in counter ticks (us)
const MAX_PULSE_US: u16 = 2500;

/// Counter wrap for a 20 ms (50 Hz) frame
const FRAME_TOP: u16 = 20_000;

/// PWM divider bringing the 125 MHz system clock to 1 MHz
const CLOCK_DIVIDER: u8 = 125;

/// PWM slice configuration for servo output
pub fn servo_pwm_config() -> PwmConfig {
    let mut cfg = PwmConfig::default();
    cfg.divider = CLOCK_DIVIDER.into();
    cfg.top = FRAME_TOP;
    cfg
}

/// One servo on one PWM slice channel
///
/// Both slice channels carry the same compare value, so it does not
/// matter whether the servo sits on output A or B.
pub struct PwmServo<'d> {
    pwm: Pwm<'d>,
    config: PwmConfig,
}

impl<'d> PwmServo<'d> {
    pub fn new(pwm: Pwm<'d>) -> Self {
        Self {
            pwm,
            config: servo_pwm_config(),
        }
    }
}

impl ServoOutput for PwmServo<'_> {
    fn set_angle(&mut self, degrees: u8) -> Result<(), ServoError> {
        if degrees > 180 {
            return Err(ServoError::AngleOutOfRange);
        }
        let span = (MAX_PULSE_US - MIN_PULSE_US) as u32;
        let pulse = MIN_PULSE_US + (span * degrees as u32 / 180) as u16;
        self.config.compare_a = pulse;
        self.config.compare_b = pulse;
        self.pwm.set_config(&self.config);
        Ok(())
    }
}
