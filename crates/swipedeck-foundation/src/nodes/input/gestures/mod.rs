pub mod pan;

pub use pan::{PanEvent, PanEvents, PanGestureRecognizer};
