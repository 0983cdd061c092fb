use std::fmt;

/// Errors raised while building or querying a deck.
///
/// The interaction path (gestures, animations, shuffling) never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum DeckError {
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
    InvalidItem {
        index: usize,
        reason: &'static str,
    },
    EmptyDeck,
    CardOutOfRange {
        index: usize,
        len: usize,
    },
}

impl DeckError {
    pub(crate) fn invalid_config(field: &'static str, reason: &'static str) -> Self {
        DeckError::InvalidConfig { field, reason }
    }
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::InvalidConfig { field, reason } => {
                write!(f, "invalid deck config: {field} {reason}")
            }
            DeckError::InvalidItem { index, reason } => {
                write!(f, "invalid card item {index}: {reason}")
            }
            DeckError::EmptyDeck => write!(f, "a deck needs at least one card"),
            DeckError::CardOutOfRange { index, len } => {
                write!(f, "card {index} out of range for a deck of {len}")
            }
        }
    }
}

impl std::error::Error for DeckError {}
