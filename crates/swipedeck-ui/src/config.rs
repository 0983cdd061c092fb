//! Deck configuration.

use swipedeck_animation::{AnimationSpec, Easing, SpringSpec};
use swipedeck_foundation::{DRAG_THRESHOLD, MAX_FLING_VELOCITY};
use swipedeck_ui_graphics::{Point, Size};

use crate::error::DeckError;

/// Who clears the shuffle signal once a shuffle cycle is under way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ShuffleResetPolicy {
    /// The flag drops when the last card still owing a report completes its
    /// reset animation (finished or interrupted).
    #[default]
    LastParticipant,
    /// Every completed reset animation writes `false`; the earliest one wins.
    EveryCompletion,
}

/// Timing, geometry and physics for a deck.
///
/// Built with `DeckConfig::default()` and the `with_*` methods.
#[derive(Clone, Debug, PartialEq)]
pub struct DeckConfig {
    /// Screen (viewport) size in logical pixels.
    pub screen_size: Size,
    /// Card width is the screen width minus this inset.
    pub card_width_inset: f32,
    /// Card height divided by card width.
    pub card_aspect_ratio: f32,
    pub entrance_base_delay_millis: u64,
    /// Per-index stagger shared by the entrance and the shuffle reaction.
    pub stagger_increment_millis: u64,
    pub tween_duration_millis: u64,
    pub easing: Easing,
    /// Backward tilt of a resting card, degrees around X.
    pub resting_tilt_degrees: f32,
    pub lift_scale: f32,
    pub perspective: f32,
    pub spring: SpringSpec,
    pub touch_slop: f32,
    pub max_fling_velocity: f32,
    pub shuffle_reset_policy: ShuffleResetPolicy,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            screen_size: Size::new(390.0, 844.0),
            card_width_inset: 128.0,
            card_aspect_ratio: 1.54,
            entrance_base_delay_millis: 1000,
            stagger_increment_millis: 250,
            tween_duration_millis: 250,
            easing: Easing::EaseInOut,
            resting_tilt_degrees: 30.0,
            lift_scale: 1.1,
            perspective: 1500.0,
            spring: SpringSpec::new(0.5, 100.0).with_thresholds(2.0, 0.01),
            touch_slop: DRAG_THRESHOLD,
            max_fling_velocity: MAX_FLING_VELOCITY,
            shuffle_reset_policy: ShuffleResetPolicy::default(),
        }
    }
}

impl DeckConfig {
    pub fn with_screen_size(mut self, width: f32, height: f32) -> Self {
        self.screen_size = Size::new(width, height);
        self
    }

    pub fn with_card_width_inset(mut self, inset: f32) -> Self {
        self.card_width_inset = inset;
        self
    }

    pub fn with_card_aspect_ratio(mut self, ratio: f32) -> Self {
        self.card_aspect_ratio = ratio;
        self
    }

    pub fn with_entrance_base_delay(mut self, millis: u64) -> Self {
        self.entrance_base_delay_millis = millis;
        self
    }

    pub fn with_stagger_increment(mut self, millis: u64) -> Self {
        self.stagger_increment_millis = millis;
        self
    }

    pub fn with_tween(mut self, duration_millis: u64, easing: Easing) -> Self {
        self.tween_duration_millis = duration_millis;
        self.easing = easing;
        self
    }

    pub fn with_resting_tilt(mut self, degrees: f32) -> Self {
        self.resting_tilt_degrees = degrees;
        self
    }

    pub fn with_lift_scale(mut self, scale: f32) -> Self {
        self.lift_scale = scale;
        self
    }

    pub fn with_spring(mut self, spring: SpringSpec) -> Self {
        self.spring = spring;
        self
    }

    pub fn with_touch_slop(mut self, slop: f32) -> Self {
        self.touch_slop = slop;
        self
    }

    pub fn with_max_fling_velocity(mut self, velocity: f32) -> Self {
        self.max_fling_velocity = velocity;
        self
    }

    pub fn with_shuffle_reset_policy(mut self, policy: ShuffleResetPolicy) -> Self {
        self.shuffle_reset_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), DeckError> {
        if !self.screen_size.is_positive() {
            return Err(DeckError::invalid_config(
                "screen_size",
                "must be finite and positive",
            ));
        }
        if !self.card_size().is_positive() {
            return Err(DeckError::invalid_config(
                "card_width_inset",
                "leaves no room for a card",
            ));
        }
        if !(self.lift_scale.is_finite() && self.lift_scale > 0.0) {
            return Err(DeckError::invalid_config("lift_scale", "must be positive"));
        }
        if !(self.spring.stiffness.is_finite() && self.spring.stiffness > 0.0) {
            return Err(DeckError::invalid_config(
                "spring.stiffness",
                "must be positive",
            ));
        }
        if !(self.spring.damping_ratio.is_finite() && self.spring.damping_ratio > 0.0) {
            return Err(DeckError::invalid_config(
                "spring.damping_ratio",
                "must be positive",
            ));
        }
        if !self.resting_tilt_degrees.is_finite() {
            return Err(DeckError::invalid_config(
                "resting_tilt_degrees",
                "must be finite",
            ));
        }
        if !(self.touch_slop.is_finite() && self.touch_slop >= 0.0) {
            return Err(DeckError::invalid_config(
                "touch_slop",
                "must be finite and non-negative",
            ));
        }
        if !(self.perspective.is_finite() && self.perspective > 0.0) {
            return Err(DeckError::invalid_config("perspective", "must be positive"));
        }
        if !(self.max_fling_velocity.is_finite() && self.max_fling_velocity > 0.0) {
            return Err(DeckError::invalid_config(
                "max_fling_velocity",
                "must be positive",
            ));
        }
        Ok(())
    }

    pub fn card_size(&self) -> Size {
        let width = self.screen_size.width - self.card_width_inset;
        Size::new(width, width * self.card_aspect_ratio)
    }

    pub fn screen_center(&self) -> Point {
        Point::new(self.screen_size.width / 2.0, self.screen_size.height / 2.0)
    }

    /// Horizontal offset that puts a card fully off-screen.
    pub fn off_screen_offset(&self) -> f32 {
        self.screen_size.width + self.card_size().width
    }

    /// Left, center and right snap targets for a released card.
    pub fn snap_points(&self) -> [f32; 3] {
        let side = self.off_screen_offset();
        [-side, 0.0, side]
    }

    /// Vertical offset cards are dealt from (just above the screen).
    pub fn deal_offset(&self) -> f32 {
        -self.screen_size.height
    }

    pub fn entrance_delay_millis(&self, index: usize) -> u64 {
        self.entrance_base_delay_millis
            .saturating_add(self.shuffle_delay_millis(index))
    }

    pub fn shuffle_delay_millis(&self, index: usize) -> u64 {
        (index as u64).saturating_mul(self.stagger_increment_millis)
    }

    pub fn tween(&self) -> AnimationSpec {
        AnimationSpec::tween(self.tween_duration_millis, self.easing)
    }
}
