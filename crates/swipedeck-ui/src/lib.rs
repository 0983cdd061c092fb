//! Swipeable card deck.
//!
//! A [`Deck`] deals one [`Card`] per [`CardItem`], stacked so later items
//! render on top. Each card turns pan gestures into spring-snapped
//! repositioning; clearing the bottom card off-screen raises the deck's
//! [`ShuffleSignal`], which springs every card back to the center with a
//! stagger.

mod card;
mod config;
mod deck;
mod error;
mod item;
mod scene;
mod shuffle;

pub use card::{Card, CardPhase, GestureContext};
pub use config::{DeckConfig, ShuffleResetPolicy};
pub use deck::Deck;
pub use error::DeckError;
pub use item::{CardItem, ImageResource};
pub use scene::{CardView, DeckScene};
pub use shuffle::ShuffleSignal;

pub mod prelude {
    pub use crate::{
        Card, CardItem, CardPhase, Deck, DeckConfig, DeckError, DeckScene, ImageResource,
        ShuffleResetPolicy, ShuffleSignal,
    };
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;

#[cfg(test)]
#[path = "tests/card_tests.rs"]
mod card_tests;

#[cfg(test)]
#[path = "tests/shuffle_tests.rs"]
mod shuffle_tests;
