//! Render snapshot of a deck.

use std::fmt;

use swipedeck_ui_graphics::{CardLayer, Rect, Size};

use crate::item::ImageResource;

/// One card as the host should draw it.
#[derive(Clone, Debug, PartialEq)]
pub struct CardView {
    pub index: usize,
    pub image: ImageResource,
    pub layer: CardLayer,
    pub bounds: Rect,
    /// Paint order; higher draws on top.
    pub z_index: usize,
}

/// All cards in paint order, bottom first.
#[derive(Clone, Debug, PartialEq)]
pub struct DeckScene {
    pub screen: Size,
    pub cards: Vec<CardView>,
}

impl DeckScene {
    pub fn topmost(&self) -> Option<&CardView> {
        self.cards.iter().max_by_key(|card| card.z_index)
    }

    pub fn card(&self, index: usize) -> Option<&CardView> {
        self.cards.iter().find(|card| card.index == index)
    }
}

impl fmt::Display for DeckScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "deck {}x{} ({} cards)",
            self.screen.width,
            self.screen.height,
            self.cards.len()
        )?;
        for card in &self.cards {
            let layer = &card.layer;
            writeln!(
                f,
                "  [{}] {} at ({:.1}, {:.1}) rot_x={:.1} rot_z={:.1} scale={:.2}",
                card.index,
                card.image,
                layer.translation_x,
                layer.translation_y,
                layer.rotation_x,
                layer.rotation_z,
                layer.scale
            )?;
        }
        Ok(())
    }
}
