//! Core runtime for swipedeck.
//!
//! A single-threaded cooperative scheduler: frame callbacks drive animation
//! stepping, and a UI task queue delivers completion events and state
//! observers on the same thread, in order.

mod frame_clock;
mod platform;
mod runtime;
mod state;

pub use frame_clock::{FrameCallbackRegistration, FrameClock, NextFrame};
pub use platform::RuntimeScheduler;
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};
pub use state::{MutableState, Subscription};

pub type FrameCallbackId = u64;

/// Nanoseconds per millisecond, used when converting frame times.
pub const NANOS_PER_MILLI: u64 = 1_000_000;

pub mod prelude {
    pub use crate::frame_clock::{FrameCallbackRegistration, FrameClock};
    pub use crate::runtime::{DefaultScheduler, Runtime, RuntimeHandle};
    pub use crate::state::{MutableState, Subscription};
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod runtime_tests;
