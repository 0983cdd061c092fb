//! Animation primitives for swipedeck: tweens, springs and easing curves.

pub mod animation;

pub use animation::*;

pub mod prelude {
    pub use crate::animation::{
        Animatable, AnimationEnd, AnimationScalar, AnimationSpec, AnimationType, Easing, Lerp,
        SpringSpec,
    };
}
