//! Session state: the unit of persistence.
//!
//! ## SessionState
//!
//! Everything needed to resume a game after a restart:
//! - players in turn order, with drink totals (via `TurnTracker`)
//! - the deck, including its order and cursor
//! - whether the shown card is provisionally accepted
//! - when it was last saved
//!
//! Gesture state and exit animations are not part of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};
use super::player::Player;
use crate::cards::Card;
use crate::deck::Deck;
use crate::turns::TurnTracker;

/// Where a session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No card drawn yet.
    NotStarted,
    /// A card is showing and waiting for a decision.
    CardShown,
    /// The card was accepted and waits for "done".
    AwaitingResolution,
    /// The last card has been resolved.
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub turns: TurnTracker,
    pub deck: Deck,
    pub pending_acceptance: bool,
    /// Last save time; informational only.
    pub timestamp: DateTime<Utc>,
}

impl SessionState {
    /// Create a state for a fresh game.
    ///
    /// Fails with `EmptyRoster` when there are no players.
    pub fn new(players: Vec<Player>, deck: Deck) -> Result<Self> {
        if players.is_empty() {
            return Err(EngineError::EmptyRoster);
        }
        Ok(Self {
            turns: TurnTracker::new(players),
            deck,
            pending_acceptance: false,
            timestamp: Utc::now(),
        })
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.deck.is_finished() {
            SessionPhase::Finished
        } else if !self.deck.is_started() {
            SessionPhase::NotStarted
        } else if self.pending_acceptance {
            SessionPhase::AwaitingResolution
        } else {
            SessionPhase::CardShown
        }
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.turns.players()
    }

    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.turns.current_index()
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.turns.current_player()
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        self.deck.current()
    }

    /// Stamp the state with the current time.
    pub fn touch(&mut self) {
        self.timestamp = Utc::now();
    }

    /// Check every invariant a live session maintains.
    pub fn validate(&self) -> Result<()> {
        if self.turns.is_empty() {
            return Err(EngineError::EmptyRoster);
        }
        if !self.turns.is_consistent() {
            return Err(EngineError::corrupt(format!(
                "current player {} out of range",
                self.turns.current_index()
            )));
        }
        if self.pending_acceptance && !self.deck.is_started() {
            return Err(EngineError::corrupt("pending acceptance before first draw"));
        }
        self.deck.validate()
    }
}
