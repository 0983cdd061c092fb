use std::cell::RefCell;
use std::rc::Rc;

use swipedeck_animation::AnimationEnd;
use swipedeck_core::Runtime;

use crate::{ShuffleResetPolicy, ShuffleSignal};

fn record(signal: &ShuffleSignal) -> (Rc<RefCell<Vec<(bool, bool)>>>, swipedeck_core::Subscription) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let subscription = signal.subscribe(move |previous, current| {
        sink.borrow_mut().push((previous, current));
    });
    (log, subscription)
}

#[test]
fn raise_opens_a_cycle_once() {
    let runtime = Runtime::default();
    let signal = ShuffleSignal::new(runtime.handle(), 3, ShuffleResetPolicy::LastParticipant);

    assert!(signal.raise());
    assert!(!signal.raise());
    assert!(signal.is_raised());
    assert_eq!(signal.cycles_started(), 1);
    assert_eq!(signal.pending_participants(), vec![0, 1, 2]);
}

#[test]
fn last_participant_policy_waits_for_every_card() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let signal = ShuffleSignal::new(handle.clone(), 3, ShuffleResetPolicy::LastParticipant);
    let (log, _subscription) = record(&signal);

    signal.raise();
    handle.drain_ui();

    // Card 0 has the shortest delay and finishes first.
    signal.report_reset(0, AnimationEnd::Finished);
    signal.report_reset(2, AnimationEnd::Interrupted);
    assert!(signal.is_raised());
    assert_eq!(signal.pending_participants(), vec![1]);

    signal.report_reset(1, AnimationEnd::Finished);
    handle.drain_ui();
    assert!(!signal.is_raised());
    assert_eq!(log.borrow().as_slice(), &[(false, true), (true, false)]);
}

#[test]
fn every_completion_policy_resets_on_first_report() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let signal = ShuffleSignal::new(handle.clone(), 3, ShuffleResetPolicy::EveryCompletion);
    let (log, _subscription) = record(&signal);

    signal.raise();
    handle.drain_ui();
    signal.report_reset(0, AnimationEnd::Finished);
    assert!(!signal.is_raised());

    // Later reports write false again, which observers do not see as a change.
    signal.report_reset(1, AnimationEnd::Finished);
    signal.report_reset(2, AnimationEnd::Finished);
    handle.drain_ui();
    assert_eq!(log.borrow().as_slice(), &[(false, true), (true, false)]);
}

#[test]
fn duplicate_and_stray_reports_are_harmless() {
    let runtime = Runtime::default();
    let signal = ShuffleSignal::new(runtime.handle(), 2, ShuffleResetPolicy::LastParticipant);

    signal.report_reset(0, AnimationEnd::Finished);
    assert!(!signal.is_raised());

    signal.raise();
    signal.report_reset(0, AnimationEnd::Finished);
    signal.report_reset(0, AnimationEnd::Finished);
    assert!(signal.is_raised());
    signal.report_reset(1, AnimationEnd::Finished);
    assert!(!signal.is_raised());
    assert!(signal.pending_participants().is_empty());

    assert!(signal.raise());
    assert_eq!(signal.cycles_started(), 2);
}
