//! The deck container: mounts cards, routes pointers, renders the stack.

use std::rc::Rc;

use smallvec::SmallVec;
use swipedeck_core::RuntimeHandle;
use swipedeck_foundation::{PointerEvent, PointerEventKind, PointerId};
use swipedeck_ui_graphics::Point;

use crate::card::Card;
use crate::config::DeckConfig;
use crate::error::DeckError;
use crate::item::CardItem;
use crate::scene::{CardView, DeckScene};
use crate::shuffle::ShuffleSignal;

/// A stack of cards sharing one shuffle signal.
///
/// Cards are painted in item order, so the last item is on top and receives
/// touches first where cards overlap.
pub struct Deck {
    config: Rc<DeckConfig>,
    signal: ShuffleSignal,
    cards: Vec<Card>,
    /// Pointer-to-card captures, held from Down until Up/Cancel.
    captures: SmallVec<[(PointerId, usize); 2]>,
}

impl Deck {
    pub fn new(
        runtime: RuntimeHandle,
        items: Vec<CardItem>,
        config: DeckConfig,
    ) -> Result<Self, DeckError> {
        config.validate()?;
        if items.is_empty() {
            return Err(DeckError::EmptyDeck);
        }
        if let Some(index) = items
            .iter()
            .position(|item| !item.rotation_degrees().is_finite())
        {
            return Err(DeckError::InvalidItem {
                index,
                reason: "rotation must be finite",
            });
        }

        let config = Rc::new(config);
        let signal = ShuffleSignal::new(
            runtime.clone(),
            items.len(),
            config.shuffle_reset_policy,
        );
        let cards = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                Card::mount(
                    index,
                    item,
                    Rc::clone(&config),
                    signal.clone(),
                    runtime.clone(),
                )
            })
            .collect::<Vec<_>>();
        log::info!(
            "deck mounted with {} cards (card size {:?})",
            cards.len(),
            config.card_size()
        );

        Ok(Self {
            config,
            signal,
            cards,
            captures: SmallVec::new(),
        })
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    pub fn shuffle_signal(&self) -> &ShuffleSignal {
        &self.signal
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, index: usize) -> Result<&Card, DeckError> {
        self.cards.get(index).ok_or(DeckError::CardOutOfRange {
            index,
            len: self.cards.len(),
        })
    }

    /// Topmost card whose bounds contain `point`.
    pub fn card_at(&self, point: Point) -> Option<&Card> {
        self.cards
            .iter()
            .rev()
            .find(|card| card.bounds().contains(point.x, point.y))
    }

    /// True while any card is animating.
    pub fn is_animating(&self) -> bool {
        self.cards.iter().any(Card::is_animating)
    }

    /// Route a pointer event. A Down captures the topmost card under it; the
    /// rest of that pointer's stream goes to the same card.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) {
        let target = match event.kind {
            PointerEventKind::Down => {
                if let Some(stale) = self.release_capture(event.id) {
                    let cancel = PointerEvent::cancel(event.id, event.position, event.uptime_millis);
                    if let Some(card) = self.cards.get(stale) {
                        card.on_pointer_event(&cancel);
                    }
                }
                let Some(index) = self.card_at(event.position).map(Card::index) else {
                    log::trace!("pointer {} down on empty space", event.id);
                    return;
                };
                self.captures.push((event.id, index));
                log::debug!("pointer {} captured by card {index}", event.id);
                Some(index)
            }
            PointerEventKind::Move => self.captured(event.id),
            PointerEventKind::Up | PointerEventKind::Cancel => self.release_capture(event.id),
        };

        if let Some(card) = target.and_then(|index| self.cards.get(index)) {
            card.on_pointer_event(event);
        }
    }

    pub fn render(&self) -> DeckScene {
        DeckScene {
            screen: self.config.screen_size,
            cards: self
                .cards
                .iter()
                .map(|card| CardView {
                    index: card.index(),
                    image: card.item().image().clone(),
                    layer: card.layer(),
                    bounds: card.bounds(),
                    z_index: card.index(),
                })
                .collect(),
        }
    }

    fn captured(&self, pointer: PointerId) -> Option<usize> {
        self.captures
            .iter()
            .find(|(id, _)| *id == pointer)
            .map(|(_, index)| *index)
    }

    fn release_capture(&mut self, pointer: PointerId) -> Option<usize> {
        let position = self.captures.iter().position(|(id, _)| *id == pointer)?;
        Some(self.captures.remove(position).1)
    }
}

impl std::fmt::Debug for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deck")
            .field("cards", &self.cards)
            .field("signal", &self.signal)
            .finish()
    }
}
