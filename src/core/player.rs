//! Players and roster setup.
//!
//! ## Player
//!
//! A participant with a stable id, display name and avatar symbol.
//! Identity is fixed at creation; only the drink total and statistics
//! change during a session, and only through the turn tracker.
//!
//! ## Roster
//!
//! The setup-screen model: bounded list of players in turn order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::EngineConfig;
use super::error::{EngineError, Result};
use super::rng::GameRng;

/// Avatar palette offered during setup.
pub const AVATARS: [&str; 18] = [
    "😎", "🤠", "🥳", "😈", "🤡", "👻",
    "🐶", "🐱", "🦊", "🐼", "🐨", "🦁",
    "🍺", "🍻", "🍷", "🥂", "🍾", "🍹",
];

/// Stable player identifier, generated once at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

/// Per-player counters shown on the statistics screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Cards completed instead of drinking.
    pub accepted: u32,
    /// Times the player chose to drink.
    pub drinks: u32,
    /// Wildcards completed.
    pub wildcards: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub avatar: String,
    /// Sum of drinks taken this session.
    pub total_drinks: u32,
    pub stats: PlayerStats,
}

impl Player {
    /// Create a player with a fresh id and zeroed counters.
    ///
    /// No validation happens here; `Roster::add_player` enforces the
    /// setup rules.
    pub fn new(name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id: PlayerId::generate(),
            name: name.into(),
            avatar: avatar.into(),
            total_drinks: 0,
            stats: PlayerStats::default(),
        }
    }
}

/// Bounded, ordered player list built on the setup screen.
#[derive(Clone, Debug)]
pub struct Roster {
    players: Vec<Player>,
    max_players: usize,
    max_name_len: usize,
    recommended_min: usize,
}

impl Roster {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            players: Vec::new(),
            max_players: config.max_players,
            max_name_len: config.max_name_len,
            recommended_min: config.recommended_min_players,
        }
    }

    /// Add a player at the end of the turn order.
    ///
    /// The name is trimmed; it must be non-empty and within the length
    /// bound. Fails with `RosterFull` once `max_players` is reached.
    pub fn add_player(&mut self, name: &str, avatar: &str) -> Result<&Player> {
        if self.players.len() >= self.max_players {
            return Err(EngineError::RosterFull { max: self.max_players });
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::invalid_name("name is empty"));
        }
        if name.chars().count() > self.max_name_len {
            return Err(EngineError::invalid_name(format!(
                "name longer than {} characters",
                self.max_name_len
            )));
        }

        self.players.push(Player::new(name, avatar));
        tracing::debug!(player = name, count = self.players.len(), "player added");
        Ok(&self.players[self.players.len() - 1])
    }

    /// Remove a player by id, returning it.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<Player> {
        let pos = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(EngineError::UnknownPlayer)?;
        Ok(self.players.remove(pos))
    }

    /// Soft warning: fewer players than recommended.
    #[must_use]
    pub fn needs_more_players(&self) -> bool {
        self.players.len() < self.recommended_min
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players
    }

    /// Suggest an avatar for the next player.
    #[must_use]
    pub fn suggest_avatar(&self, rng: &mut GameRng) -> &'static str {
        rng.choose(&AVATARS).copied().unwrap_or(AVATARS[0])
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Hand the players over to a session.
    #[must_use]
    pub fn into_players(self) -> Vec<Player> {
        self.players
    }
}
