//! Digit sequencer
//!
//! Turns "show this value" into the ordered key presses that transform
//! the calculator's current display into the target, tracking which
//! arithmetic operation is primed so repeat presses of `=` stay cheap.

pub mod op;
pub mod planner;

pub use op::{Op, Place};
pub use planner::{KeyPlan, Sequencer, Target, MAX_PLAN_KEYS};
