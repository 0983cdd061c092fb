use swipedeck_testing::{sample_items, DeckTestRule, FRAME_MILLIS};
use swipedeck_ui::{CardPhase, DeckConfig, ShuffleResetPolicy};
use swipedeck_ui_graphics::Point;

fn settled_rule(count: usize, policy: ShuffleResetPolicy) -> DeckTestRule {
    let config = DeckConfig::default().with_shuffle_reset_policy(policy);
    let mut rule = DeckTestRule::new(sample_items(count), config).expect("deck");
    assert!(rule.run_until_settled(10_000));
    rule
}

fn center(rule: &DeckTestRule) -> Point {
    rule.deck().config().screen_center()
}

fn x(rule: &DeckTestRule, index: usize) -> f32 {
    rule.card(index).expect("card").layer().translation_x
}

/// Throw every card above the bottom one off to the right, then wait.
fn clear_top_cards(rule: &mut DeckTestRule) {
    for _ in 1..rule.deck().len() {
        let from = center(rule);
        rule.drag(from, from + Point::new(400.0, 0.0), 267, 16);
        assert!(rule.run_until_settled(5_000));
    }
}

/// Step frames until the shuffle flag goes up; returns the elapsed millis.
fn wait_for_raise(rule: &mut DeckTestRule, limit_millis: u64) -> u64 {
    let start = rule.now_millis();
    while !rule.deck().shuffle_signal().is_raised() {
        assert!(
            rule.now_millis() - start < limit_millis,
            "shuffle was never raised"
        );
        rule.advance_by_millis(FRAME_MILLIS);
    }
    rule.now_millis() - start
}

#[test]
fn bottom_card_flick_raises_after_tilt_reset_and_everything_comes_back() {
    let mut rule = settled_rule(3, ShuffleResetPolicy::LastParticipant);
    let side = rule.deck().config().off_screen_offset();
    clear_top_cards(&mut rule);
    assert_eq!(x(&rule, 1), side);
    assert_eq!(x(&rule, 2), side);
    assert_eq!(rule.deck().shuffle_signal().cycles_started(), 0);

    // +400 px in ~267 ms is roughly 1500 px/s.
    let from = center(&rule);
    rule.drag(from, from + Point::new(400.0, 0.0), 267, 16);
    assert_eq!(rule.card(0).expect("card").last_destination(), Some(side));
    assert!(!rule.deck().shuffle_signal().is_raised());

    let waited = wait_for_raise(&mut rule, 1_000);
    assert!(waited >= 250, "raised before the tilt tween ended: {waited} ms");
    assert!(waited <= 300, "raised late: {waited} ms");

    assert!(rule.run_until_settled(10_000));
    assert!(!rule.deck().shuffle_signal().is_raised());
    assert_eq!(rule.deck().shuffle_signal().cycles_started(), 1);
    let items = sample_items(3);
    for index in 0..3 {
        let card = rule.card(index).expect("card");
        let layer = card.layer();
        assert_eq!(layer.translation_x, 0.0, "card {index}");
        assert_eq!(layer.translation_y, 0.0, "card {index}");
        assert_eq!(layer.rotation_z, items[index].rotation_degrees());
        assert_eq!(card.phase(), CardPhase::Resting);
    }
}

#[test]
fn reset_springs_start_in_index_order() {
    let mut rule = settled_rule(3, ShuffleResetPolicy::LastParticipant);
    let side = rule.deck().config().off_screen_offset();
    clear_top_cards(&mut rule);

    let from = center(&rule);
    rule.drag(from, from + Point::new(400.0, 0.0), 267, 16);
    wait_for_raise(&mut rule, 1_000);

    let delays: Vec<u64> = rule
        .deck()
        .cards()
        .iter()
        .map(|card| card.shuffle_delay_millis())
        .collect();
    assert_eq!(delays, vec![0, 250, 500]);

    rule.advance_by_millis(200);
    assert!(x(&rule, 0) < side);
    assert_eq!(x(&rule, 1), side);
    assert_eq!(x(&rule, 2), side);

    rule.advance_by_millis(200);
    assert!(x(&rule, 1) < side);
    assert_eq!(x(&rule, 2), side);

    rule.advance_by_millis(200);
    assert!(x(&rule, 2) < side);
}

#[test]
fn last_participant_keeps_flag_up_until_slowest_card_reports() {
    let mut rule = settled_rule(3, ShuffleResetPolicy::LastParticipant);
    clear_top_cards(&mut rule);
    let from = center(&rule);
    rule.drag(from, from + Point::new(400.0, 0.0), 267, 16);
    wait_for_raise(&mut rule, 1_000);

    // Card 2's reset has not even started yet.
    rule.advance_by_millis(300);
    assert!(rule.deck().shuffle_signal().is_raised());
    assert_eq!(rule.deck().shuffle_signal().pending_participants(), vec![2]);

    assert!(rule.run_until_settled(10_000));
    assert!(!rule.deck().shuffle_signal().is_raised());
}

#[test]
fn every_completion_lowers_flag_on_first_report() {
    let mut rule = settled_rule(3, ShuffleResetPolicy::EveryCompletion);
    let side = rule.deck().config().off_screen_offset();
    clear_top_cards(&mut rule);
    let from = center(&rule);
    rule.drag(from, from + Point::new(400.0, 0.0), 267, 16);
    wait_for_raise(&mut rule, 1_000);

    // Card 0 is already at its rotation, so its reset completes at once.
    rule.advance_by_millis(50);
    assert!(!rule.deck().shuffle_signal().is_raised());
    assert_eq!(x(&rule, 2), side);

    // The reaction was already triggered; the other cards still come back.
    assert!(rule.run_until_settled(10_000));
    assert_eq!(x(&rule, 2), 0.0);
    assert_eq!(rule.deck().shuffle_signal().cycles_started(), 1);
}

#[test]
fn second_flick_opens_a_new_cycle() {
    let mut rule = settled_rule(1, ShuffleResetPolicy::LastParticipant);
    for expected in 1..=2 {
        let from = center(&rule);
        rule.drag(from, from + Point::new(-400.0, 0.0), 267, 16);
        wait_for_raise(&mut rule, 1_000);
        assert!(rule.run_until_settled(10_000));
        assert_eq!(rule.deck().shuffle_signal().cycles_started(), expected);
        assert_eq!(x(&rule, 0), 0.0);
    }
}

#[test]
fn slow_drag_of_bottom_card_back_to_center_never_shuffles() {
    let mut rule = settled_rule(1, ShuffleResetPolicy::LastParticipant);
    let from = center(&rule);

    rule.press(from);
    for step in 1..=10 {
        rule.advance_by_millis(FRAME_MILLIS);
        rule.move_to(from + Point::new(step as f32, 0.0));
    }
    // Hold still so the release carries no velocity.
    rule.advance_by_millis(100);
    rule.release();

    assert_eq!(rule.card(0).expect("card").last_destination(), Some(0.0));
    assert!(rule.run_until_settled(5_000));
    assert_eq!(rule.deck().shuffle_signal().cycles_started(), 0);
    assert!(!rule.deck().shuffle_signal().is_raised());
    assert_eq!(x(&rule, 0), 0.0);
}

#[test]
fn grabbing_the_bottom_card_before_its_tilt_resets_cancels_the_shuffle() {
    let mut rule = settled_rule(1, ShuffleResetPolicy::LastParticipant);
    let side = rule.deck().config().off_screen_offset();
    let from = center(&rule);
    rule.drag(from, from + Point::new(400.0, 0.0), 267, 16);
    assert_eq!(rule.card(0).expect("card").last_destination(), Some(side));

    // The tilt tween needs 250 ms; tap the card well before that.
    rule.advance_by_millis(100);
    let grab = rule.card_center(0).expect("center");
    rule.press(grab);
    rule.release();
    assert_eq!(rule.card(0).expect("card").last_destination(), Some(0.0));

    assert!(rule.run_until_settled(5_000));
    assert_eq!(rule.deck().shuffle_signal().cycles_started(), 0);
    assert!(!rule.deck().shuffle_signal().is_raised());
    assert_eq!(x(&rule, 0), 0.0);
    assert_eq!(rule.card(0).expect("card").phase(), CardPhase::Resting);
}
