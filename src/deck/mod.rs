//! Deck model: shuffled card order and the read cursor.
//!
//! ## Invariants
//!
//! - `cursor` only moves forward within a session; no card is drawn twice
//! - once started, `cursor < len()`
//! - the deck is finished when the cursor sits on the last card and that
//!   card has been resolved
//!
//! The sequence is an `im::Vector` so statistics snapshots and saves can
//! clone the deck in O(1).

mod view;

pub use view::{ExitDirection, ExitTag, ExitView};

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardCatalog, CategorySelection};
use crate::core::error::{EngineError, Result};
use crate::core::rng::GameRng;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    sequence: Vector<Card>,
    /// `None` until the first draw.
    cursor: Option<usize>,
    /// Whether the card under the cursor has been resolved.
    resolved: bool,
}

impl Deck {
    /// Deal a fresh deck from the catalog.
    ///
    /// Keeps the cards whose category is in `filter` (all cards when
    /// `None`) and shuffles them uniformly.
    #[must_use]
    pub fn shuffle(catalog: &CardCatalog, filter: Option<&CategorySelection>, rng: &mut GameRng) -> Self {
        let mut cards: Vec<Card> = catalog
            .cards()
            .iter()
            .filter(|c| filter.map_or(true, |f| f.contains(c.category)))
            .cloned()
            .collect();
        rng.shuffle(&mut cards);

        tracing::debug!(cards = cards.len(), seed = rng.seed(), "deck shuffled");
        Self::from_sequence(cards)
    }

    /// Build a deck with a fixed order.
    #[must_use]
    pub fn from_sequence(cards: Vec<Card>) -> Self {
        Self {
            sequence: cards.into_iter().collect(),
            cursor: None,
            resolved: false,
        }
    }

    /// Card under the cursor, if the deck has started.
    #[must_use]
    pub fn current(&self) -> Option<&Card> {
        self.cursor.and_then(|i| self.sequence.get(i))
    }

    /// Upcoming card, for pre-rendering.
    #[must_use]
    pub fn peek_next(&self) -> Option<&Card> {
        let next = self.cursor.map_or(0, |i| i + 1);
        self.sequence.get(next)
    }

    /// Move the cursor to the next card.
    ///
    /// Fails with `OutOfCards` when already on the last card, leaving the
    /// deck untouched. When `exit` is given and a card was showing, returns
    /// the exit tag for the outgoing card.
    pub fn advance(&mut self, exit: Option<ExitDirection>) -> Result<Option<ExitTag>> {
        let next = self.cursor.map_or(0, |i| i + 1);
        if next >= self.sequence.len() {
            return Err(EngineError::OutOfCards);
        }

        let tag = match (exit, self.current()) {
            (Some(direction), Some(card)) => Some(ExitTag { card: card.id, direction }),
            _ => None,
        };

        self.cursor = Some(next);
        self.resolved = false;
        Ok(tag)
    }

    /// Record that the card under the cursor has been decided.
    pub fn mark_resolved(&mut self) {
        if self.cursor.is_some() {
            self.resolved = true;
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// True once the last card has been resolved. An empty deck is
    /// finished from the start.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        match self.cursor {
            None => self.sequence.is_empty(),
            Some(i) => i + 1 == self.sequence.len() && self.resolved,
        }
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.cursor.is_some()
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    #[must_use]
    pub fn sequence(&self) -> &Vector<Card> {
        &self.sequence
    }

    /// Cards not yet shown.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        match self.cursor {
            None => self.sequence.len(),
            Some(i) => self.sequence.len() - i - 1,
        }
    }

    /// Check structural invariants, e.g. after decoding a snapshot.
    pub fn validate(&self) -> Result<()> {
        match self.cursor {
            Some(i) if i >= self.sequence.len() => Err(EngineError::corrupt(format!(
                "cursor {} out of range for {} cards",
                i,
                self.sequence.len()
            ))),
            None if self.resolved => Err(EngineError::corrupt("resolved flag set before first draw")),
            _ => Ok(()),
        }
    }
}
