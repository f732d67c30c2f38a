//! Configuration types
//!
//! Board-agnostic configuration structures. All values are fixed at
//! process start; there is no persistent settings storage.

pub mod types;

pub use types::*;
