//! Pure math/data for swipedeck
//!
//! Geometry primitives and the per-card transform description handed to the
//! host renderer.

mod geometry;
mod layer;

pub use geometry::*;
pub use layer::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size, Velocity};
    pub use crate::layer::CardLayer;
}
