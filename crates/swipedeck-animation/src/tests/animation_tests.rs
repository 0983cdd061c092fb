use super::*;

use std::cell::RefCell;
use std::rc::Rc;
use swipedeck_core::Runtime;

const FRAME_NANOS: u64 = 16_666_667;

/// Drives frames until the runtime is idle, returning the last frame time.
fn run_until_idle(handle: &RuntimeHandle, mut frame_time: u64, max_frames: usize) -> u64 {
    for _ in 0..max_frames {
        handle.drain_ui();
        if handle.is_idle() {
            break;
        }
        frame_time += FRAME_NANOS;
        handle.drain_frame_callbacks(frame_time);
        handle.drain_ui();
    }
    frame_time
}

fn recorder() -> (Rc<RefCell<Vec<AnimationEnd>>>, impl FnOnce(AnimationEnd) + 'static) {
    let ends = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&ends);
    (ends, move |end| sink.borrow_mut().push(end))
}

#[test]
fn tween_interpolates_and_finishes_at_target() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let value = Animatable::new(0.0f32, handle.clone());
    let (ends, on_end) = recorder();

    value.animate_to_then(100.0, AnimationSpec::linear(200), on_end);
    assert!(value.is_running());

    let mut samples = Vec::new();
    let mut frame_time = 0;
    for _ in 0..30 {
        frame_time += FRAME_NANOS;
        handle.drain_frame_callbacks(frame_time);
        handle.drain_ui();
        samples.push(value.value());
        if !value.is_running() {
            break;
        }
    }

    assert!(samples.iter().any(|v| *v > 0.0 && *v < 100.0));
    assert!(samples.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(value.value(), 100.0);
    assert_eq!(ends.borrow().as_slice(), &[AnimationEnd::Finished]);
}

#[test]
fn delay_holds_value_until_elapsed() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let value = Animatable::new(-800.0f32, handle.clone());

    value.animate_to(0.0, AnimationSpec::linear(250).with_delay(1000));

    // First frame pins the start time.
    handle.drain_frame_callbacks(0);
    handle.drain_frame_callbacks(500 * 1_000_000);
    handle.drain_frame_callbacks(999 * 1_000_000);
    assert_eq!(value.value(), -800.0);

    handle.drain_frame_callbacks(1_125 * 1_000_000);
    let midway = value.value();
    assert!(midway > -800.0 && midway < 0.0, "midway = {midway}");

    handle.drain_frame_callbacks(1_250 * 1_000_000);
    assert_eq!(value.value(), 0.0);
    assert!(!value.is_running());
}

#[test]
fn huge_delay_and_duration_saturate_instead_of_overflowing() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let value = Animatable::new(5.0f32, handle.clone());

    value.animate_to(10.0, AnimationSpec::linear(u64::MAX).with_delay(u64::MAX / 2));
    handle.drain_frame_callbacks(0);
    handle.drain_frame_callbacks(60_000 * 1_000_000);
    assert_eq!(value.value(), 5.0);
    assert!(value.is_running());

    value.animate_to(10.0, SpringSpec::default_spring().with_delay(u64::MAX));
    handle.drain_frame_callbacks(120_000 * 1_000_000);
    assert_eq!(value.value(), 5.0);
    assert!(value.is_running());
}

#[test]
fn new_target_interrupts_in_flight_animation_from_current_value() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let value = Animatable::new(0.0f32, handle.clone());
    let (first_ends, first_end) = recorder();
    let (second_ends, second_end) = recorder();

    value.animate_to_then(100.0, AnimationSpec::linear(100), first_end);
    handle.drain_frame_callbacks(0);
    handle.drain_frame_callbacks(50 * 1_000_000);
    let interrupted_at = value.value();
    assert!(interrupted_at > 0.0 && interrupted_at < 100.0);

    value.animate_to_then(-50.0, AnimationSpec::linear(100), second_end);
    assert_eq!(value.value(), interrupted_at);
    handle.drain_ui();
    assert_eq!(first_ends.borrow().as_slice(), &[AnimationEnd::Interrupted]);

    run_until_idle(&handle, 50 * 1_000_000, 60);
    assert_eq!(value.value(), -50.0);
    assert_eq!(first_ends.borrow().len(), 1);
    assert_eq!(second_ends.borrow().as_slice(), &[AnimationEnd::Finished]);
}

#[test]
fn snap_to_interrupts_and_sets_value() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let value = Animatable::new(0.0f32, handle.clone());
    let (ends, on_end) = recorder();

    value.animate_to_then(10.0, SpringSpec::default(), on_end);
    value.snap_to(42.0);
    handle.drain_ui();

    assert_eq!(value.value(), 42.0);
    assert_eq!(value.target(), 42.0);
    assert!(!value.is_running());
    assert_eq!(ends.borrow().as_slice(), &[AnimationEnd::Interrupted]);
    assert!(!handle.has_frame_callbacks());
}

#[test]
fn spring_settles_exactly_on_target() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let value = Animatable::new(0.0f32, handle.clone());
    let (ends, on_end) = recorder();

    value.animate_to_then(
        300.0,
        SpringSpec::new(0.5, 100.0).with_thresholds(2.0, 0.01),
        on_end,
    );
    let mut overshoot = false;
    let mut frame_time = 0;
    for _ in 0..600 {
        frame_time += FRAME_NANOS;
        handle.drain_frame_callbacks(frame_time);
        handle.drain_ui();
        if value.value() > 300.0 {
            overshoot = true;
        }
        if !value.is_running() {
            break;
        }
    }

    assert!(overshoot, "under-damped spring should overshoot");
    assert_eq!(value.value(), 300.0);
    assert_eq!(value.velocity(), 0.0);
    assert_eq!(ends.borrow().as_slice(), &[AnimationEnd::Finished]);
}

#[test]
fn spring_uses_seeded_velocity() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let value = Animatable::new(0.0f32, handle.clone());

    // Target equals the current value; only the seed moves it.
    value.animate_to_with_velocity(0.0, SpringSpec::new(1.0, 100.0), 2000.0);
    handle.drain_frame_callbacks(0);
    handle.drain_frame_callbacks(FRAME_NANOS);

    assert!(value.value() > 0.0, "seeded spring should move forward first");
    assert!(value.is_running());

    run_until_idle(&handle, FRAME_NANOS, 600);
    assert_eq!(value.value(), 0.0);
}

#[test]
fn spring_already_at_rest_finishes_on_first_frame() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let value = Animatable::new(5.0f32, handle.clone());
    let (ends, on_end) = recorder();

    value.animate_to_then(5.0, SpringSpec::default(), on_end);
    handle.drain_frame_callbacks(0);
    handle.drain_ui();

    assert!(!value.is_running());
    assert_eq!(ends.borrow().as_slice(), &[AnimationEnd::Finished]);
}

#[test]
fn delayed_spring_waits_before_moving() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let value = Animatable::new(400.0f32, handle.clone());

    value.animate_to(0.0, SpringSpec::default().with_delay(250));
    handle.drain_frame_callbacks(0);
    handle.drain_frame_callbacks(200 * 1_000_000);
    assert_eq!(value.value(), 400.0);
    assert!(value.is_running());

    run_until_idle(&handle, 200 * 1_000_000, 200);
    assert_eq!(value.value(), 0.0);
}

#[test]
fn state_observers_see_frames() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let value = Animatable::new(0.0f32, handle.clone());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _subscription = value.state().subscribe(move |_, current| sink.borrow_mut().push(*current));

    value.animate_to(1.0, AnimationSpec::linear(50));
    run_until_idle(&handle, 0, 20);

    assert_eq!(seen.borrow().last().copied(), Some(1.0));
    assert!(seen.borrow().len() >= 2);
}

#[test]
fn easing_linear_is_identity() {
    assert_eq!(Easing::LinearEasing.transform(0.0), 0.0);
    assert_eq!(Easing::LinearEasing.transform(0.5), 0.5);
    assert_eq!(Easing::LinearEasing.transform(1.0), 1.0);
}

#[test]
fn easing_bounds_are_correct() {
    let easings = [
        Easing::LinearEasing,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FastOutSlowInEasing,
        Easing::LinearOutSlowInEasing,
        Easing::FastOutLinearEasing,
    ];

    for easing in easings {
        assert!(easing.transform(0.0).abs() < 0.01, "start of {:?}", easing);
        assert!((easing.transform(1.0) - 1.0).abs() < 0.01, "end of {:?}", easing);
    }
}

#[test]
fn ease_in_out_is_symmetric() {
    let a = Easing::EaseInOut.transform(0.25);
    let b = Easing::EaseInOut.transform(0.75);
    assert!((a + b - 1.0).abs() < 0.01);
    assert!((Easing::EaseInOut.transform(0.5) - 0.5).abs() < 0.01);
}

#[test]
fn animation_spec_default_has_reasonable_values() {
    let spec = AnimationSpec::default();
    assert_eq!(spec.duration_millis, 300);
    assert_eq!(spec.easing, Easing::FastOutSlowInEasing);
    assert_eq!(spec.delay_millis, 0);
}

#[test]
fn spring_presets() {
    assert_eq!(SpringSpec::default().damping_ratio, 1.0);
    assert!(SpringSpec::bouncy().damping_ratio < 1.0);
    assert!(SpringSpec::stiff().stiffness > SpringSpec::default().stiffness);
    assert_eq!(
        AnimationType::from(SpringSpec::default())
            .with_delay(500)
            .delay_millis(),
        500
    );
}
