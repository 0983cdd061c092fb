use swipedeck_core::{Runtime, RuntimeHandle, NANOS_PER_MILLI};
use swipedeck_foundation::{PointerEvent, PointerId};
use swipedeck_ui::{Card, CardItem, Deck, DeckConfig, DeckError, DeckScene};
use swipedeck_ui_graphics::Point;

/// Frame interval used by [`DeckTestRule::advance_by_millis`].
pub const FRAME_MILLIS: u64 = 16;

/// Upper bound on UI-task drains per pump before the rule gives up.
const MAX_PUMP_ITERATIONS: usize = 100;

/// Headless harness for exercising a deck in tests.
///
/// The rule keeps a virtual clock. Frames are stamped from it and so are the
/// pointer events it synthesises, which keeps gesture velocity and animation
/// timing on the same time base.
pub struct DeckTestRule {
    runtime: Runtime,
    deck: Deck,
    frame_time_nanos: u64,
    next_pointer: PointerId,
    /// The virtual finger: pointer id and last position while pressed.
    pointer: Option<(PointerId, Point)>,
}

impl DeckTestRule {
    /// Mount a deck of `items` with `config` on a fresh runtime.
    pub fn new(items: Vec<CardItem>, config: DeckConfig) -> Result<Self, DeckError> {
        let runtime = Runtime::default();
        let deck = Deck::new(runtime.handle(), items, config)?;
        Ok(Self {
            runtime,
            deck,
            frame_time_nanos: 0,
            next_pointer: 1,
            pointer: None,
        })
    }

    /// A deck of `count` cards with default config and alternating rotations.
    pub fn with_cards(count: usize) -> Result<Self, DeckError> {
        Self::new(sample_items(count), DeckConfig::default())
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn card(&self, index: usize) -> Result<&Card, DeckError> {
        self.deck.card(index)
    }

    pub fn render(&self) -> DeckScene {
        self.deck.render()
    }

    pub fn now_millis(&self) -> u64 {
        self.frame_time_nanos / NANOS_PER_MILLI
    }

    /// Drain frame callbacks at `frame_time_nanos` and deliver the resulting
    /// UI work. Time never runs backwards.
    pub fn advance_frame(&mut self, frame_time_nanos: u64) {
        self.frame_time_nanos = self.frame_time_nanos.max(frame_time_nanos);
        self.runtime
            .handle()
            .drain_frame_callbacks(self.frame_time_nanos);
        self.pump_until_idle();
    }

    /// Step the clock forward by `millis` in [`FRAME_MILLIS`] frames.
    pub fn advance_by_millis(&mut self, millis: u64) {
        let end = self.frame_time_nanos + millis * NANOS_PER_MILLI;
        while self.frame_time_nanos < end {
            let next = (self.frame_time_nanos + FRAME_MILLIS * NANOS_PER_MILLI).min(end);
            self.advance_frame(next);
        }
    }

    /// Run queued UI tasks (completions, observers) until none remain.
    pub fn pump_until_idle(&mut self) {
        let handle = self.runtime.handle();
        for _ in 0..MAX_PUMP_ITERATIONS {
            if !handle.has_pending_ui() {
                return;
            }
            handle.drain_ui();
        }
        panic!("pump_until_idle looped too many times");
    }

    /// Step frames until no card is animating, up to `max_millis`. Returns
    /// whether the deck settled.
    pub fn run_until_settled(&mut self, max_millis: u64) -> bool {
        let deadline = self.frame_time_nanos + max_millis * NANOS_PER_MILLI;
        self.pump_until_idle();
        while self.deck.is_animating() || self.runtime.handle().has_frame_callbacks() {
            if self.frame_time_nanos >= deadline {
                log::warn!("deck still animating after {max_millis} ms");
                return false;
            }
            self.advance_by_millis(FRAME_MILLIS);
        }
        true
    }

    /// Screen-space center of a card's current bounds.
    pub fn card_center(&self, index: usize) -> Result<Point, DeckError> {
        Ok(self.deck.card(index)?.bounds().center())
    }

    /// Put the virtual finger down at `position`. A finger that is still down
    /// is cancelled first.
    pub fn press(&mut self, position: Point) -> PointerId {
        if self.pointer.is_some() {
            self.cancel();
        }
        let id = self.next_pointer;
        self.next_pointer += 1;
        self.pointer = Some((id, position));
        self.dispatch(PointerEvent::down(id, position, self.uptime_millis()));
        id
    }

    /// Move the pressed finger. Ignored when no finger is down.
    pub fn move_to(&mut self, position: Point) {
        let Some((id, _)) = self.pointer else {
            log::trace!("move_to without a pressed pointer");
            return;
        };
        self.pointer = Some((id, position));
        self.dispatch(PointerEvent::moved(id, position, self.uptime_millis()));
    }

    /// Lift the finger where it last moved.
    pub fn release(&mut self) {
        if let Some((id, position)) = self.pointer.take() {
            self.dispatch(PointerEvent::up(id, position, self.uptime_millis()));
        }
    }

    /// Have the platform take the pointer away.
    pub fn cancel(&mut self) {
        if let Some((id, position)) = self.pointer.take() {
            self.dispatch(PointerEvent::cancel(id, position, self.uptime_millis()));
        }
    }

    /// Press at `from`, move to `to` at constant speed over `duration_millis`
    /// in `steps` moves (advancing frames in between), then release.
    pub fn drag(&mut self, from: Point, to: Point, duration_millis: u64, steps: u32) {
        let steps = steps.max(1);
        self.press(from);
        let mut elapsed = 0;
        for step in 1..=steps {
            let target_elapsed = duration_millis * u64::from(step) / u64::from(steps);
            self.advance_by_millis(target_elapsed - elapsed);
            elapsed = target_elapsed;
            let fraction = step as f32 / steps as f32;
            self.move_to(Point::new(
                from.x + (to.x - from.x) * fraction,
                from.y + (to.y - from.y) * fraction,
            ));
        }
        self.release();
    }

    fn uptime_millis(&self) -> i64 {
        self.now_millis() as i64
    }

    fn dispatch(&mut self, event: PointerEvent) {
        self.deck.on_pointer_event(&event);
        self.pump_until_idle();
    }
}

/// `count` placeholder items with rotations alternating around zero.
pub fn sample_items(count: usize) -> Vec<CardItem> {
    (0..count)
        .map(|index| {
            let sign = if index % 2 == 0 { -1.0 } else { 1.0 };
            CardItem::new(
                format!("card-{index}").as_str(),
                sign * (2.0 + index as f32 * 2.0),
            )
        })
        .collect()
}

/// Convenience helper for tests that only need temporary access to a rule.
pub fn run_deck_test<R>(
    count: usize,
    f: impl FnOnce(&mut DeckTestRule) -> R,
) -> Result<R, DeckError> {
    let mut rule = DeckTestRule::with_cards(count)?;
    Ok(f(&mut rule))
}
