//! Servo pusher driver
//!
//! Each pusher is a hobby servo with a finger resting between two
//! calculator keys. Tilting one way presses the A key, the other way
//! the B key. A press is two phases: drive to the side angle and hold
//! for the press duration, then return to rest and hold for the
//! release duration so the key and the horn both settle.
//!
//! The driver computes angles and tracks state; the caller owns the
//! delays between phases, so the state machine stays host-testable.
//!
//! # Usage
//!
//! ```ignore
//! let mut pusher = Pusher::new(servo, config);
//! pusher.begin()?;
//!
//! pusher.start_press(Side::A)?;
//! Timer::after_millis(pusher.press_ms()).await;
//! pusher.release()?;
//! Timer::after_millis(pusher.release_ms()).await;
//! ```

use daktylos_core::config::PusherConfig;
use daktylos_core::keys::Side;
use daktylos_core::traits::{ServoError, ServoOutput};

/// Rest position before trim is applied
const CENTER_DEG: i16 = 90;

/// Press-cycle state of one pusher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PusherState {
    /// At rest between the keys
    #[default]
    Idle,
    /// Holding the A-side key down
    HoldingA,
    /// Holding the B-side key down
    HoldingB,
}

/// Step of the calibration walk-through
///
/// `move_next` cycles Init -> OffA -> A -> OffB -> B -> OffA -> ...
/// so the horn can be fitted and the offsets eyeballed without
/// running real key sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DemoStep {
    #[default]
    Init,
    OffA,
    A,
    OffB,
    B,
}

impl DemoStep {
    fn next(self) -> Self {
        match self {
            DemoStep::Init | DemoStep::B => DemoStep::OffA,
            DemoStep::OffA => DemoStep::A,
            DemoStep::A => DemoStep::OffB,
            DemoStep::OffB => DemoStep::B,
        }
    }
}

/// One servo pusher
pub struct Pusher<S: ServoOutput> {
    servo: S,
    config: PusherConfig,
    state: PusherState,
    demo: DemoStep,
}

impl<S: ServoOutput> Pusher<S> {
    pub fn new(servo: S, config: PusherConfig) -> Self {
        Self {
            servo,
            config,
            state: PusherState::Idle,
            demo: DemoStep::Init,
        }
    }

    /// Drive to rest. Called once at startup; failure here is fatal
    /// for the whole device, a key we cannot press must not go
    /// unnoticed until the first sequence runs.
    pub fn begin(&mut self) -> Result<(), ServoError> {
        self.state = PusherState::Idle;
        self.servo.set_angle(self.rest_angle())
    }

    pub fn state(&self) -> PusherState {
        self.state
    }

    /// Hold time for the press phase, in milliseconds
    pub fn press_ms(&self) -> u64 {
        self.config.press_ms as u64
    }

    /// Hold time for the release phase, in milliseconds
    pub fn release_ms(&self) -> u64 {
        self.config.release_ms as u64
    }

    /// Phase one of a press: tilt onto the side key
    pub fn start_press(&mut self, side: Side) -> Result<(), ServoError> {
        self.state = match side {
            Side::A => PusherState::HoldingA,
            Side::B => PusherState::HoldingB,
        };
        self.servo.set_angle(self.side_angle(side))
    }

    /// Phase two of a press: return to rest
    pub fn release(&mut self) -> Result<(), ServoError> {
        self.state = PusherState::Idle;
        self.servo.set_angle(self.rest_angle())
    }

    /// Advance the calibration walk-through one step
    pub fn move_next(&mut self) -> Result<(), ServoError> {
        self.demo = self.demo.next();
        let angle = match self.demo {
            DemoStep::Init | DemoStep::OffA | DemoStep::OffB => self.rest_angle(),
            DemoStep::A => self.side_angle(Side::A),
            DemoStep::B => self.side_angle(Side::B),
        };
        self.servo.set_angle(angle)
    }

    pub fn demo_step(&self) -> DemoStep {
        self.demo
    }

    fn rest_angle(&self) -> u8 {
        clamp_deg(CENTER_DEG + self.config.trim_deg)
    }

    fn side_angle(&self, side: Side) -> u8 {
        let raw = match side {
            Side::A => CENTER_DEG - self.config.a_offset_deg,
            Side::B => CENTER_DEG + self.config.b_offset_deg,
        };
        clamp_deg(raw + self.config.trim_deg)
    }
}

fn clamp_deg(raw: i16) -> u8 {
    raw.clamp(0, 180) as u8
}
