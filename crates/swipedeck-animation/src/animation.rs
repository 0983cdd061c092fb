//! Animation system for swipedeck
//!
//! Provides time-based animations with easing curves and spring physics,
//! stepped by the runtime's frame clock.
//!
//! Assigning a new target to an [`Animatable`] cancels whatever animation is
//! in flight on that value and starts the new one from the current
//! interpolated value. Every animation invocation reports exactly one
//! [`AnimationEnd`], queued as a UI task on the runtime.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use swipedeck_core::{FrameCallbackRegistration, MutableState, RuntimeHandle, NANOS_PER_MILLI};

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

/// Scalar values an [`Animatable`] can drive.
pub trait AnimationScalar: Lerp + Copy + PartialEq + fmt::Debug + 'static {
    /// Convert the value to `f32` for physics calculations.
    fn to_f32(self) -> f32;

    /// Rebuild the value from the physics domain.
    fn from_f32(value: f32) -> Self;
}

impl AnimationScalar for f32 {
    fn to_f32(self) -> f32 {
        self
    }

    fn from_f32(value: f32) -> Self {
        value
    }
}

/// Easing curves for tweens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    LinearEasing,
    /// Ease in using cubic curve.
    EaseIn,
    /// Ease out using cubic curve.
    EaseOut,
    /// Ease in and out using cubic curve.
    EaseInOut,
    /// Fast out, slow in (material design standard).
    FastOutSlowInEasing,
    /// Linear out, slow in (material design).
    LinearOutSlowInEasing,
    /// Fast out, linear in (material design).
    FastOutLinearEasing,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::LinearEasing => fraction,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowInEasing => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowInEasing => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
            Easing::FastOutLinearEasing => cubic_bezier(0.4, 0.0, 1.0, 1.0, fraction),
        }
    }
}

/// Cubic bezier curve approximation for easing.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    // Newton-Raphson for the parametric `t` matching the x fraction, clamped
    // to [0, 1].
    let mut t = fraction;
    let mut newton_success = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            newton_success = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !newton_success {
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t = fraction;
        for _ in 0..16 {
            let x = sample_curve(ax, bx, cx, t);
            let delta = x - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                t1 = t;
            } else {
                t0 = t;
            }
            t = 0.5 * (t0 + t1);
        }
    }

    sample_curve(ay, by, cy, t)
}

/// Tween specification: duration, easing and start delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
    /// Delay before starting animation in milliseconds.
    pub delay_millis: u64,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    /// Add a delay before the animation starts.
    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

/// Spring animation configuration (unit mass).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Damping ratio. 1.0 = critically damped, < 1.0 = under-damped (bouncy), > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Stiffness constant. Higher values = faster animation.
    pub stiffness: f32,
    /// Speed (units/s) under which the spring may come to rest.
    pub velocity_threshold: f32,
    /// Distance to target under which the spring may come to rest.
    pub position_threshold: f32,
    /// Delay before starting animation in milliseconds.
    pub delay_millis: u64,
}

impl SpringSpec {
    pub fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
            ..Self::default_spring()
        }
    }

    /// Create a spring with default material design values.
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
            delay_millis: 0,
        }
    }

    /// Create a bouncy spring.
    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    /// Create a stiff spring (fast, no bounce).
    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::default_spring()
        }
    }

    pub fn with_thresholds(mut self, velocity_threshold: f32, position_threshold: f32) -> Self {
        self.velocity_threshold = velocity_threshold;
        self.position_threshold = position_threshold;
        self
    }

    /// Add a delay before the spring starts moving.
    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

/// Animation type specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    /// Time-based tween animation.
    Tween(AnimationSpec),
    /// Physics-based spring animation.
    Spring(SpringSpec),
}

impl AnimationType {
    pub fn delay_millis(&self) -> u64 {
        match self {
            AnimationType::Tween(spec) => spec.delay_millis,
            AnimationType::Spring(spec) => spec.delay_millis,
        }
    }

    pub fn with_delay(self, delay_millis: u64) -> Self {
        match self {
            AnimationType::Tween(spec) => AnimationType::Tween(spec.with_delay(delay_millis)),
            AnimationType::Spring(spec) => AnimationType::Spring(spec.with_delay(delay_millis)),
        }
    }
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

impl From<AnimationSpec> for AnimationType {
    fn from(spec: AnimationSpec) -> Self {
        AnimationType::Tween(spec)
    }
}

impl From<SpringSpec> for AnimationType {
    fn from(spec: SpringSpec) -> Self {
        AnimationType::Spring(spec)
    }
}

/// How an animation invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEnd {
    /// The value reached its target.
    Finished,
    /// A newer animation or a snap superseded this one.
    Interrupted,
}

impl AnimationEnd {
    pub fn is_finished(&self) -> bool {
        matches!(self, AnimationEnd::Finished)
    }
}

type EndCallback = Box<dyn FnOnce(AnimationEnd) + 'static>;

/// Integration step for spring physics, in seconds.
const SPRING_TIMESTEP: f32 = 0.004;

/// Generic animatable value holder.
pub struct Animatable<T: AnimationScalar> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: AnimationScalar> {
    label: &'static str,
    state: MutableState<T>,
    runtime: RuntimeHandle,
    current: T,
    /// Units per second.
    velocity: f32,
    start: T,
    target: T,
    animation_type: AnimationType,
    running: bool,
    /// Bumped on every new invocation; stale frame callbacks compare against it.
    generation: u64,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_end: Option<EndCallback>,
}

impl<T: AnimationScalar> AnimatableInner<T> {
    /// Supersede the running animation. Returns its completion callback, which
    /// the caller reports as interrupted once the borrow is released.
    fn interrupt(&mut self) -> Option<EndCallback> {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.generation += 1;
        self.running = false;
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        self.on_end.take()
    }

    fn set_current(&mut self, value: T) {
        self.current = value;
        self.state.set(value);
    }
}

impl<T: AnimationScalar> Animatable<T> {
    /// Create a new animatable with the given initial value.
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        Self::with_label(initial, runtime, "animatable")
    }

    /// Create a new animatable whose log lines carry `label`.
    pub fn with_label(initial: T, runtime: RuntimeHandle, label: &'static str) -> Self {
        let inner = AnimatableInner {
            label,
            state: MutableState::with_runtime(initial, runtime.clone()),
            runtime,
            current: initial,
            velocity: 0.0,
            start: initial,
            target: initial,
            animation_type: AnimationType::default(),
            running: false,
            generation: 0,
            start_time_nanos: None,
            last_frame_nanos: None,
            registration: None,
            on_end: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Animate to the target value using the specified animation.
    ///
    /// Springs keep the value's current velocity as their initial velocity.
    pub fn animate_to(&self, target: T, animation: impl Into<AnimationType>) {
        self.launch(target, animation.into(), None, None);
    }

    /// Like [`Animatable::animate_to`], reporting the outcome to `on_end`.
    pub fn animate_to_then(
        &self,
        target: T,
        animation: impl Into<AnimationType>,
        on_end: impl FnOnce(AnimationEnd) + 'static,
    ) {
        self.launch(target, animation.into(), None, Some(Box::new(on_end)));
    }

    /// Animate with an explicit initial velocity (units per second).
    pub fn animate_to_with_velocity(
        &self,
        target: T,
        animation: impl Into<AnimationType>,
        velocity: f32,
    ) {
        self.launch(target, animation.into(), Some(velocity), None);
    }

    pub fn animate_to_with_velocity_then(
        &self,
        target: T,
        animation: impl Into<AnimationType>,
        velocity: f32,
        on_end: impl FnOnce(AnimationEnd) + 'static,
    ) {
        self.launch(target, animation.into(), Some(velocity), Some(Box::new(on_end)));
    }

    /// Snap immediately to the target value without animating.
    pub fn snap_to(&self, target: T) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.interrupt();
            inner.start = target;
            inner.target = target;
            inner.velocity = 0.0;
            inner.set_current(target);
            interrupted
        };
        self.report(interrupted, AnimationEnd::Interrupted);
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current
    }

    pub fn velocity(&self) -> f32 {
        self.inner.borrow().velocity
    }

    /// Return the current animation target.
    pub fn target(&self) -> T {
        self.inner.borrow().target
    }

    /// True while an animation (including its start delay) is pending.
    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    /// Observable view of the value.
    pub fn state(&self) -> MutableState<T> {
        self.inner.borrow().state.clone()
    }

    fn launch(
        &self,
        target: T,
        animation: AnimationType,
        velocity: Option<f32>,
        on_end: Option<EndCallback>,
    ) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.interrupt();
            inner.start = inner.current;
            inner.target = target;
            inner.animation_type = animation;
            if let Some(velocity) = velocity {
                inner.velocity = velocity;
            }
            inner.running = true;
            inner.on_end = on_end;
            log::trace!(
                "{}: {:?} -> {:?} via {:?} (v0 = {})",
                inner.label,
                inner.current,
                target,
                animation,
                inner.velocity
            );
            interrupted
        };
        self.report(interrupted, AnimationEnd::Interrupted);
        Self::schedule_frame(&self.inner);
    }

    fn report(&self, callback: Option<EndCallback>, end: AnimationEnd) {
        if let Some(callback) = callback {
            let runtime = self.inner.borrow().runtime.clone();
            runtime.enqueue_ui_task(Box::new(move || callback(end)));
        }
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let (runtime, generation) = {
            let inner = this.borrow();
            if inner.registration.is_some() || !inner.running {
                return;
            }
            (inner.runtime.clone(), inner.generation)
        };
        let weak: Weak<RefCell<AnimatableInner<T>>> = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, generation, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, generation: u64, frame_time_nanos: u64) {
        let mut schedule_next = false;
        let mut finished = None;
        {
            let mut inner = this.borrow_mut();
            if inner.generation != generation || !inner.running {
                return;
            }
            inner.registration = None;

            let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
            let delay_nanos = inner
                .animation_type
                .delay_millis()
                .saturating_mul(NANOS_PER_MILLI);

            if elapsed_nanos < delay_nanos {
                schedule_next = true;
            } else {
                let previous_frame = inner.last_frame_nanos.replace(frame_time_nanos);
                let settled = match inner.animation_type {
                    AnimationType::Tween(spec) => {
                        Self::step_tween(&mut inner, spec, elapsed_nanos - delay_nanos, previous_frame)
                    }
                    AnimationType::Spring(spec) => {
                        Self::step_spring(&mut inner, spec, frame_time_nanos, previous_frame)
                    }
                };
                if settled {
                    let target = inner.target;
                    inner.start = target;
                    inner.velocity = 0.0;
                    inner.running = false;
                    inner.start_time_nanos = None;
                    inner.last_frame_nanos = None;
                    inner.set_current(target);
                    log::trace!("{}: settled at {:?}", inner.label, target);
                    finished = Some(inner.on_end.take());
                } else {
                    schedule_next = true;
                }
            }
        }

        if let Some(callback) = finished {
            let animatable = Animatable {
                inner: Rc::clone(this),
            };
            animatable.report(callback, AnimationEnd::Finished);
        }
        if schedule_next {
            Self::schedule_frame(this);
        }
    }

    /// Returns true once the tween has reached its target.
    fn step_tween(
        inner: &mut AnimatableInner<T>,
        spec: AnimationSpec,
        animation_elapsed_nanos: u64,
        previous_frame: Option<u64>,
    ) -> bool {
        let duration_nanos = spec.duration_millis.saturating_mul(NANOS_PER_MILLI).max(1);
        let linear_progress =
            (animation_elapsed_nanos as f32 / duration_nanos as f32).clamp(0.0, 1.0);
        if linear_progress >= 1.0 {
            return true;
        }
        let progress = spec.easing.transform(linear_progress);
        let new_value = inner.start.lerp(&inner.target, progress);
        if let (Some(previous), Some(now)) = (previous_frame, inner.last_frame_nanos) {
            let dt = now.saturating_sub(previous) as f32 / 1_000_000_000.0;
            if dt > 0.0 {
                inner.velocity = (new_value.to_f32() - inner.current.to_f32()) / dt;
            }
        }
        inner.set_current(new_value);
        false
    }

    /// Damped harmonic oscillator, semi-implicit Euler in value space.
    /// Returns true once the spring has come to rest.
    fn step_spring(
        inner: &mut AnimatableInner<T>,
        spec: SpringSpec,
        frame_time_nanos: u64,
        previous_frame: Option<u64>,
    ) -> bool {
        let target = inner.target.to_f32();
        let mut position = inner.current.to_f32();
        let mut velocity = inner.velocity;

        if let Some(previous) = previous_frame {
            let dt = frame_time_nanos.saturating_sub(previous) as f32 / 1_000_000_000.0;
            let stiffness = spec.stiffness;
            let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();
            let mut simulated = 0.0f32;
            while simulated < dt {
                let step = SPRING_TIMESTEP.min(dt - simulated);
                let force = -stiffness * (position - target) - damping * velocity;
                velocity += force * step;
                position += velocity * step;
                simulated += step;
            }
        }

        let at_rest = velocity.abs() < spec.velocity_threshold;
        let near_target = (position - target).abs() < spec.position_threshold;
        if at_rest && near_target {
            return true;
        }

        inner.velocity = velocity;
        inner.set_current(T::from_f32(position));
        false
    }
}

impl<T: AnimationScalar> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: AnimationScalar> fmt::Debug for Animatable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Animatable")
            .field("label", &inner.label)
            .field("current", &inner.current)
            .field("target", &inner.target)
            .field("velocity", &inner.velocity)
            .field("running", &inner.running)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
