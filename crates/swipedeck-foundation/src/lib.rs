//! Pointer input, velocity tracking, pan gestures and snap-point selection.

pub mod gesture_constants;
pub mod nodes;
pub mod snap;
pub mod velocity_tracker;

pub use gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY};
pub use nodes::input::gestures::{PanEvent, PanGestureRecognizer};
pub use nodes::input::types::{PointerEvent, PointerEventKind, PointerId};
pub use snap::{snap_point, SNAP_TOSS};
pub use velocity_tracker::{VelocityTracker, VelocityTracker1D};

pub mod prelude {
    pub use crate::nodes::input::gestures::{PanEvent, PanGestureRecognizer};
    pub use crate::nodes::input::types::{PointerEvent, PointerEventKind, PointerId};
    pub use crate::snap::snap_point;
    pub use crate::velocity_tracker::{VelocityTracker, VelocityTracker1D};
}

#[cfg(test)]
#[path = "tests/pan_gesture_tests.rs"]
mod pan_gesture_tests;
