//! Turn rotation and scoring.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Category};
use crate::core::player::Player;

/// How a card was resolved, for statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The player did the task.
    Completed,
    /// The player drank instead.
    Drank,
}

/// Players in turn order plus the active-player pointer.
///
/// ## Example
///
/// ```
/// use schluck_engine::core::Player;
/// use schluck_engine::turns::TurnTracker;
///
/// let mut turns = TurnTracker::new(vec![Player::new("A", "😎"), Player::new("B", "🤠")]);
/// turns.record_drinks(0, 3);
/// turns.advance_turn();
///
/// assert_eq!(turns.current_index(), 1);
/// assert_eq!(turns.players()[0].total_drinks, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnTracker {
    players: Vec<Player>,
    current: usize,
}

impl TurnTracker {
    #[must_use]
    pub fn new(players: Vec<Player>) -> Self {
        Self { players, current: 0 }
    }

    /// Pass the turn to the next player, wrapping around.
    ///
    /// No-op on an empty roster; sessions never construct one.
    pub fn advance_turn(&mut self) {
        if self.players.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.players.len();
    }

    /// Add drinks to a player's total. Out-of-range indices are ignored.
    pub fn record_drinks(&mut self, player_index: usize, amount: u32) {
        if let Some(player) = self.players.get_mut(player_index) {
            player.total_drinks = player.total_drinks.saturating_add(amount);
        }
    }

    /// Update statistics counters for a resolved card.
    pub fn record_outcome(&mut self, player_index: usize, card: &Card, outcome: Outcome) {
        let Some(player) = self.players.get_mut(player_index) else {
            return;
        };
        match outcome {
            Outcome::Completed => {
                player.stats.accepted += 1;
                if card.category == Category::Wildcard {
                    player.stats.wildcards += 1;
                }
            }
            Outcome::Drank => player.stats.drinks += 1,
        }
    }

    /// Zero every player's totals. Turn order and roster are untouched.
    pub fn reset_scores(&mut self) {
        for player in &mut self.players {
            player.total_drinks = 0;
            player.stats = Default::default();
        }
    }

    /// Back to the first player.
    pub fn reset_turn(&mut self) {
        self.current = 0;
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Sum of every player's drinks.
    #[must_use]
    pub fn total_drinks(&self) -> u64 {
        self.players.iter().map(|p| u64::from(p.total_drinks)).sum()
    }

    /// `current` must index a player whenever there are players.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.players.is_empty() || self.current < self.players.len()
    }
}
