//! Hardware driver implementations
//!
//! This crate provides the concrete actuator driver for the
//! calculator-clock: the servo pusher whose horn rests between two
//! calculator keys and tilts onto one or the other. Like the core,
//! everything here is a pure state machine over the [`ServoOutput`]
//! trait, so it is fully host-testable.
//!
//! [`ServoOutput`]: daktylos_core::traits::ServoOutput

#![no_std]
#![deny(unsafe_code)]

pub mod pusher;

pub use pusher::{DemoStep, Pusher, PusherState};
