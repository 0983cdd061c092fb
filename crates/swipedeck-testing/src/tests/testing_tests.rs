use super::*;
use swipedeck_ui::{CardPhase, DeckConfig};
use swipedeck_ui_graphics::Point;

#[test]
fn advance_by_millis_moves_the_clock_in_frames() {
    let mut rule = DeckTestRule::with_cards(1).expect("deck");
    rule.advance_by_millis(40);
    assert_eq!(rule.now_millis(), 40);
    rule.advance_frame(10 * 1_000_000);
    assert_eq!(rule.now_millis(), 40, "time never runs backwards");
}

#[test]
fn run_until_settled_finishes_the_entrance() {
    let mut rule = DeckTestRule::with_cards(3).expect("deck");
    assert!(rule.run_until_settled(5_000));
    for index in 0..3 {
        let card = rule.card(index).expect("card");
        assert_eq!(card.phase(), CardPhase::Resting);
        assert_eq!(card.layer().translation_y, 0.0);
    }
}

#[test]
fn press_and_release_in_place_fails_the_gesture() {
    let mut rule = DeckTestRule::with_cards(1).expect("deck");
    rule.run_until_settled(5_000);

    let center = rule.card_center(0).expect("center");
    rule.press(center);
    rule.release();
    assert_eq!(rule.card(0).expect("card").last_destination(), Some(0.0));
}

#[test]
fn drag_moves_the_card_with_the_finger() {
    let mut rule = DeckTestRule::with_cards(1).expect("deck");
    rule.run_until_settled(5_000);

    let center = rule.card_center(0).expect("center");
    rule.press(center);
    rule.advance_by_millis(16);
    rule.move_to(center + Point::new(0.0, 50.0));
    assert_eq!(rule.card(0).expect("card").layer().translation_y, 50.0);
    assert_eq!(rule.card(0).expect("card").phase(), CardPhase::Dragging);

    rule.cancel();
    rule.run_until_settled(5_000);
    let layer = rule.card(0).expect("card").layer();
    assert_eq!(layer.translation_x, 0.0);
    assert_eq!(layer.translation_y, 0.0);
}

#[test]
fn invalid_config_is_rejected() {
    let config = DeckConfig::default().with_card_width_inset(1_000.0);
    assert!(DeckTestRule::new(sample_items(2), config).is_err());
    assert!(DeckTestRule::new(Vec::new(), DeckConfig::default()).is_err());
}

#[test]
fn sample_items_alternate_rotation() {
    let items = sample_items(4);
    let rotations: Vec<f32> = items.iter().map(|item| item.rotation_degrees()).collect();
    assert_eq!(rotations, vec![-2.0, 4.0, -6.0, 8.0]);
}

#[test]
fn run_deck_test_hands_out_a_fresh_rule() {
    let len = run_deck_test(4, |rule| {
        assert_eq!(rule.now_millis(), 0);
        rule.deck().len()
    })
    .expect("deck");
    assert_eq!(len, 4);
}
