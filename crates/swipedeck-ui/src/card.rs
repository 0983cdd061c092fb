//! One draggable card.
//!
//! A card owns five animated values (offsets, X tilt, Z rotation, scale) and
//! drives them from three sources only: its entrance, its own pan gestures,
//! and the deck's shuffle signal.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use swipedeck_animation::{Animatable, AnimationEnd, AnimationType};
use swipedeck_core::{RuntimeHandle, Subscription};
use swipedeck_foundation::{snap_point, PanEvent, PanGestureRecognizer, PointerEvent};
use swipedeck_ui_graphics::{CardLayer, Point, Rect, Size, Velocity};

use crate::config::DeckConfig;
use crate::item::CardItem;
use crate::shuffle::ShuffleSignal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardPhase {
    /// Entrance animation pending or running.
    Dealing,
    Resting,
    /// A pan gesture owns the card.
    Dragging,
    /// Released; springing toward a snap point.
    Settling,
    /// Springing back to center for a shuffle.
    Shuffling,
}

/// Offsets captured when a gesture starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureContext {
    pub start_x: f32,
    pub start_y: f32,
}

struct Transforms {
    translate_x: Animatable<f32>,
    translate_y: Animatable<f32>,
    rotate_x: Animatable<f32>,
    rotate_z: Animatable<f32>,
    scale: Animatable<f32>,
}

struct CardState {
    phase: CardPhase,
    context: Option<GestureContext>,
    recognizer: PanGestureRecognizer,
    last_destination: Option<f32>,
}

struct CardShared {
    index: usize,
    item: CardItem,
    config: Rc<DeckConfig>,
    signal: ShuffleSignal,
    transforms: Transforms,
    state: RefCell<CardState>,
    subscription: RefCell<Option<Subscription>>,
}

/// Handle to a mounted card. Clones share the same card.
#[derive(Clone)]
pub struct Card {
    shared: Rc<CardShared>,
}

impl Card {
    /// Mount a card: place it above the screen, schedule its entrance and
    /// start watching the shuffle signal.
    pub fn mount(
        index: usize,
        item: CardItem,
        config: Rc<DeckConfig>,
        signal: ShuffleSignal,
        runtime: RuntimeHandle,
    ) -> Self {
        let transforms = Transforms {
            translate_x: Animatable::with_label(0.0, runtime.clone(), "translate_x"),
            translate_y: Animatable::with_label(config.deal_offset(), runtime.clone(), "translate_y"),
            rotate_x: Animatable::with_label(config.resting_tilt_degrees, runtime.clone(), "rotate_x"),
            rotate_z: Animatable::with_label(0.0, runtime.clone(), "rotate_z"),
            scale: Animatable::with_label(1.0, runtime, "scale"),
        };
        let recognizer = PanGestureRecognizer::new()
            .with_touch_slop(config.touch_slop)
            .with_max_velocity(config.max_fling_velocity);
        let shared = Rc::new(CardShared {
            index,
            item,
            config,
            signal,
            transforms,
            state: RefCell::new(CardState {
                phase: CardPhase::Dealing,
                context: None,
                recognizer,
                last_destination: None,
            }),
            subscription: RefCell::new(None),
        });

        let card = Card { shared };
        card.watch_shuffle();
        card.deal();
        card
    }

    pub fn index(&self) -> usize {
        self.shared.index
    }

    pub fn item(&self) -> &CardItem {
        &self.shared.item
    }

    pub fn phase(&self) -> CardPhase {
        self.shared.state.borrow().phase
    }

    /// Snap target chosen by the most recent release, if any.
    pub fn last_destination(&self) -> Option<f32> {
        self.shared.state.borrow().last_destination
    }

    pub fn gesture_context(&self) -> Option<GestureContext> {
        self.shared.state.borrow().context
    }

    pub fn entrance_delay_millis(&self) -> u64 {
        self.shared.config.entrance_delay_millis(self.shared.index)
    }

    pub fn shuffle_delay_millis(&self) -> u64 {
        self.shared.config.shuffle_delay_millis(self.shared.index)
    }

    /// True while any of the card's values is animating.
    pub fn is_animating(&self) -> bool {
        let t = &self.shared.transforms;
        [&t.translate_x, &t.translate_y, &t.rotate_x, &t.rotate_z, &t.scale]
            .iter()
            .any(|value| value.is_running())
    }

    pub fn layer(&self) -> CardLayer {
        let t = &self.shared.transforms;
        CardLayer {
            translation_x: t.translate_x.value(),
            translation_y: t.translate_y.value(),
            rotation_x: t.rotate_x.value(),
            rotation_z: t.rotate_z.value(),
            scale: t.scale.value(),
            perspective: self.shared.config.perspective,
        }
    }

    /// Screen-space hit box: the card's untransformed footprint moved by its
    /// offsets and scaled. Rotation is not accounted for.
    pub fn bounds(&self) -> Rect {
        let layer = self.layer();
        let base = self.shared.config.card_size();
        let center = self.shared.config.screen_center()
            + Point::new(layer.translation_x, layer.translation_y);
        Rect::from_center_size(
            center,
            Size::new(base.width * layer.scale, base.height * layer.scale),
        )
    }

    /// Feed a raw pointer event through the card's pan recogniser.
    pub fn on_pointer_event(&self, event: &PointerEvent) {
        let events = self
            .shared
            .state
            .borrow_mut()
            .recognizer
            .on_pointer_event(event);
        for pan in events {
            match pan {
                PanEvent::Start => self.on_gesture_start(),
                PanEvent::Active { translation } => self.on_gesture_active(translation),
                PanEvent::End { velocity, .. } => self.on_gesture_end(velocity),
                PanEvent::Fail => self.on_gesture_fail(),
            }
        }
    }

    /// Capture the current offsets and lift the card.
    pub fn on_gesture_start(&self) {
        let t = &self.shared.transforms;
        let context = GestureContext {
            start_x: t.translate_x.value(),
            start_y: t.translate_y.value(),
        };
        {
            let mut state = self.shared.state.borrow_mut();
            state.context = Some(context);
            state.phase = CardPhase::Dragging;
        }
        log::debug!("card {}: gesture start at {:?}", self.shared.index, context);

        let tween = self.shared.config.tween();
        t.scale.animate_to(self.shared.config.lift_scale, tween);
        t.rotate_x.animate_to(0.0, tween);
        t.rotate_z.animate_to(0.0, tween);
    }

    /// Follow the pointer exactly: offsets = captured start + translation.
    pub fn on_gesture_active(&self, translation: Point) {
        let context = self.shared.state.borrow().context;
        let Some(context) = context else {
            log::trace!("card {}: active sample without a start", self.shared.index);
            return;
        };
        let t = &self.shared.transforms;
        t.translate_x.snap_to(context.start_x + translation.x);
        t.translate_y.snap_to(context.start_y + translation.y);
    }

    /// Resolve the release to a snap point and spring there.
    pub fn on_gesture_end(&self, velocity: Velocity) {
        let x = self.shared.transforms.translate_x.value();
        let destination =
            snap_point(x, velocity.x, &self.shared.config.snap_points()).unwrap_or(0.0);
        log::debug!(
            "card {}: released at x = {x:.1} with vx = {:.1}, snapping to {destination}",
            self.shared.index,
            velocity.x
        );
        self.settle(destination, velocity, true);
    }

    /// The recogniser rejected the touch sequence: return to center.
    pub fn on_gesture_fail(&self) {
        log::debug!("card {}: gesture failed, returning to center", self.shared.index);
        self.settle(0.0, Velocity::ZERO, false);
    }

    fn settle(&self, destination: f32, velocity: Velocity, may_shuffle: bool) {
        {
            let mut state = self.shared.state.borrow_mut();
            state.context = None;
            state.phase = CardPhase::Settling;
            state.last_destination = Some(destination);
        }

        let config = &self.shared.config;
        let spring = AnimationType::Spring(config.spring);
        let tween = config.tween();
        let t = &self.shared.transforms;

        let weak = self.downgrade();
        t.translate_x
            .animate_to_with_velocity_then(destination, spring, velocity.x, move |end| {
                if let Some(card) = Card::upgrade(&weak) {
                    card.finish_phase(CardPhase::Settling, end);
                }
            });
        t.translate_y
            .animate_to_with_velocity(0.0, spring, velocity.y);

        t.scale.animate_to(1.0, tween);
        t.rotate_z
            .animate_to(self.shared.item.rotation_degrees(), tween);

        let index = self.shared.index;
        let signal = self.shared.signal.clone();
        t.rotate_x
            .animate_to_then(config.resting_tilt_degrees, tween, move |end| {
                if may_shuffle && end.is_finished() && index == 0 && destination != 0.0 {
                    log::debug!("card 0 cleared to {destination}; raising shuffle");
                    signal.raise();
                }
            });
    }

    fn deal(&self) {
        let config = &self.shared.config;
        let delay = self.entrance_delay_millis();
        let entrance = AnimationType::Tween(config.tween().with_delay(delay));
        let t = &self.shared.transforms;
        log::debug!("card {}: dealing after {delay} ms", self.shared.index);

        t.translate_y.animate_to(0.0, entrance);
        let weak = self.downgrade();
        t.rotate_z
            .animate_to_then(self.shared.item.rotation_degrees(), entrance, move |end| {
                if let Some(card) = Card::upgrade(&weak) {
                    card.finish_phase(CardPhase::Dealing, end);
                }
            });
    }

    fn watch_shuffle(&self) {
        let weak = self.downgrade();
        let subscription = self.shared.signal.subscribe(move |previous, current| {
            if !previous && current {
                if let Some(card) = Card::upgrade(&weak) {
                    card.on_shuffle();
                }
            }
        });
        *self.shared.subscription.borrow_mut() = Some(subscription);
    }

    /// Spring back to center and to the resting rotation, staggered by index.
    fn on_shuffle(&self) {
        let delay = self.shuffle_delay_millis();
        let spring = AnimationType::Spring(self.shared.config.spring.with_delay(delay));
        {
            // A held card stays under the finger until it is released.
            let mut state = self.shared.state.borrow_mut();
            if state.context.is_none() {
                state.phase = CardPhase::Shuffling;
            }
        }
        log::debug!("card {}: shuffling back after {delay} ms", self.shared.index);

        let t = &self.shared.transforms;
        let weak = self.downgrade();
        t.translate_x.animate_to_then(0.0, spring, move |end| {
            if let Some(card) = Card::upgrade(&weak) {
                card.finish_phase(CardPhase::Shuffling, end);
            }
        });

        let index = self.shared.index;
        let signal = self.shared.signal.clone();
        t.rotate_z
            .animate_to_then(self.shared.item.rotation_degrees(), spring, move |end| {
                signal.report_reset(index, end);
            });
    }

    /// Leave `expected` for `Resting`, unless something else took over.
    fn finish_phase(&self, expected: CardPhase, end: AnimationEnd) {
        let mut state = self.shared.state.borrow_mut();
        if state.phase == expected && end.is_finished() {
            state.phase = CardPhase::Resting;
        }
    }

    fn downgrade(&self) -> Weak<CardShared> {
        Rc::downgrade(&self.shared)
    }

    fn upgrade(weak: &Weak<CardShared>) -> Option<Card> {
        weak.upgrade().map(|shared| Card { shared })
    }
}

impl std::fmt::Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Card")
            .field("index", &self.shared.index)
            .field("phase", &self.phase())
            .field("layer", &self.layer())
            .finish()
    }
}
