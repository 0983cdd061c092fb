//! Platform abstraction for the swipedeck runtime.
//!
//! The host (a window loop, a test harness) decides when frames actually
//! happen; the runtime only asks for one.

/// Schedules work for the runtime.
///
/// Implementations must be safe to use from multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}
