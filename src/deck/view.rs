//! Transient exit-animation state, keyed by card id.
//!
//! Kept apart from `Deck` so animation tags never end up in a snapshot.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Direction a resolved card leaves the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitDirection {
    /// Drink.
    Left,
    /// Completed.
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExitTag {
    pub card: CardId,
    pub direction: ExitDirection,
}

#[derive(Clone, Debug, Default)]
pub struct ExitView {
    exiting: FxHashMap<CardId, ExitDirection>,
}

impl ExitView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, tag: ExitTag) {
        self.exiting.insert(tag.card, tag.direction);
    }

    #[must_use]
    pub fn get(&self, card: CardId) -> Option<ExitDirection> {
        self.exiting.get(&card).copied()
    }

    /// Drop every tag; called when the next card is revealed.
    pub fn clear(&mut self) {
        self.exiting.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exiting.is_empty()
    }
}
