pub mod gestures;
pub mod types;

pub use gestures::{PanEvent, PanGestureRecognizer};
pub use types::{PointerEvent, PointerEventKind, PointerId};
