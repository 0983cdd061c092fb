//! Headless deck demo.
//!
//! [`DemoShell`] plays the host: it owns the runtime, stamps frames from a
//! virtual clock and feeds synthetic touches into the deck, the way a
//! windowing backend would.

use anyhow::{ensure, Context};
use swipedeck_core::{Runtime, NANOS_PER_MILLI};
use swipedeck_foundation::{PointerEvent, PointerId};
use swipedeck_ui::{CardItem, Deck, DeckConfig, DeckScene};
use swipedeck_ui_graphics::Point;

const FRAME_MILLIS: u64 = 16;

/// The demo's card faces: image resource plus resting rotation.
pub fn sample_assets() -> Vec<CardItem> {
    [
        ("cards/ace_of_spades.png", -5.0),
        ("cards/queen_of_hearts.png", 3.0),
        ("cards/jack_of_clubs.png", 0.0),
        ("cards/king_of_diamonds.png", -2.0),
        ("cards/ten_of_hearts.png", 6.0),
    ]
    .into_iter()
    .map(|(image, rotation)| CardItem::new(image, rotation))
    .collect()
}

pub struct DemoShell {
    runtime: Runtime,
    deck: Deck,
    now_millis: u64,
    next_pointer: PointerId,
}

impl DemoShell {
    pub fn new(items: Vec<CardItem>, config: DeckConfig) -> anyhow::Result<Self> {
        let runtime = Runtime::default();
        let deck = Deck::new(runtime.handle(), items, config).context("failed to mount deck")?;
        Ok(Self {
            runtime,
            deck,
            now_millis: 0,
            next_pointer: 1,
        })
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn now_millis(&self) -> u64 {
        self.now_millis
    }

    pub fn scene(&self) -> DeckScene {
        self.deck.render()
    }

    /// Run one frame: step animations, then deliver completions and
    /// observers.
    pub fn step(&mut self) {
        self.now_millis += FRAME_MILLIS;
        let handle = self.runtime.handle();
        handle.drain_frame_callbacks(self.now_millis * NANOS_PER_MILLI);
        handle.drain_ui();
    }

    pub fn run_for(&mut self, millis: u64) {
        let end = self.now_millis + millis;
        while self.now_millis < end {
            self.step();
        }
    }

    /// Step until the deck stops moving. Fails after `max_millis`.
    pub fn run_until_idle(&mut self, max_millis: u64) -> anyhow::Result<()> {
        let deadline = self.now_millis + max_millis;
        while self.deck.is_animating() {
            ensure!(
                self.now_millis < deadline,
                "deck still animating after {max_millis} ms"
            );
            self.step();
        }
        Ok(())
    }

    /// Swipe from the center of the screen by `dx` over `duration_millis`.
    pub fn swipe(&mut self, dx: f32, duration_millis: u64) {
        let from = self.deck.config().screen_center();
        let pointer = self.next_pointer;
        self.next_pointer += 1;
        let steps = (duration_millis / FRAME_MILLIS).max(1);

        self.dispatch(PointerEvent::down(pointer, from, self.now_millis as i64));
        for step in 1..=steps {
            self.step();
            let x = from.x + dx * step as f32 / steps as f32;
            self.dispatch(PointerEvent::moved(
                pointer,
                Point::new(x, from.y),
                self.now_millis as i64,
            ));
        }
        self.dispatch(PointerEvent::up(
            pointer,
            Point::new(from.x + dx, from.y),
            self.now_millis as i64,
        ));
    }

    fn dispatch(&mut self, event: PointerEvent) {
        self.deck.on_pointer_event(&event);
        self.runtime.handle().drain_ui();
    }
}

/// Deal the sample deck, throw every card off to the right (bottom card last)
/// and let the shuffle bring them back.
pub fn run_demo(config: DeckConfig) -> anyhow::Result<DeckScene> {
    let mut shell = DemoShell::new(sample_assets(), config)?;
    log::info!("dealing {} cards", shell.deck().len());
    shell.run_until_idle(10_000)?;
    log::info!("dealt at {} ms\n{}", shell.now_millis(), shell.scene());

    for _ in 0..shell.deck().len() {
        shell.swipe(400.0, 260);
        shell.run_for(300);
        log::info!("after swipe at {} ms\n{}", shell.now_millis(), shell.scene());
    }

    let signal = shell.deck().shuffle_signal().clone();
    ensure!(signal.cycles_started() == 1, "the bottom card did not trigger a shuffle");
    shell.run_until_idle(15_000)?;
    ensure!(!signal.is_raised(), "shuffle flag still raised after the deck settled");

    let scene = shell.scene();
    log::info!("shuffled back at {} ms\n{}", shell.now_millis(), scene);
    Ok(scene)
}

#[cfg(test)]
#[path = "tests/demo_tests.rs"]
mod tests;
