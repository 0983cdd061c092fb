//! Testing utilities for swipedeck.
//!
//! [`DeckTestRule`] owns a runtime and a deck and lets tests step frames and
//! script pointer input against a virtual clock, without a window or renderer.

mod testing;

pub use testing::*;

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
