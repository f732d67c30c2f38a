//! Board-agnostic core logic for the calculator-clock firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Key and keymap model for the calculator face
//! - Digit sequencer (value-to-keypress planner)
//! - Channel multiplexer with expiry and rotation
//! - Display orchestrator and feedback patterns
//! - Configuration type definitions
//! - Hardware abstraction traits (servo output)

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod keys;
pub mod mux;
pub mod orchestrator;
pub mod sequencer;
pub mod traits;
