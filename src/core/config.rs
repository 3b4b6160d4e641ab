//! Engine configuration types.
//!
//! The shell configures the engine at startup by providing:
//! - `EngineConfig`: gesture thresholds, transition delays, roster bounds
//! - `Settings`: user-facing toggles for sound, music and haptics
//!
//! Both are plain serde types so they can be shipped as JSON next to the
//! card catalog.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::Result;

/// Gesture, timing and roster configuration.
///
/// Distances are in the shell's pointer units (CSS pixels on the web).
/// Delays are stored in milliseconds to keep the JSON form readable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Drag distance after which a provisional direction is reported.
    pub visual_threshold: f32,

    /// Drag distance a gesture must exceed on release to commit.
    pub commit_threshold: f32,

    /// Delay between resolving a card and revealing the next one.
    pub card_swap_delay_ms: u64,

    /// Delay before the tutorial moves on after a correct swipe.
    pub tutorial_advance_delay_ms: u64,

    /// Interval between automatic snapshot saves while a session is active.
    pub autosave_interval_ms: u64,

    /// Maximum roster size.
    pub max_players: usize,

    /// Roster size below which setup shows a warning.
    pub recommended_min_players: usize,

    /// Maximum player name length in characters.
    pub max_name_len: usize,

    /// Pause for a tap after every turn change.
    pub player_handoff: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            visual_threshold: 30.0,
            commit_threshold: 100.0,
            card_swap_delay_ms: 200,
            tutorial_advance_delay_ms: 1000,
            autosave_interval_ms: 10_000,
            max_players: 10,
            recommended_min_players: 3,
            max_name_len: 20,
            player_handoff: false,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON. Missing fields take default values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_thresholds(mut self, visual: f32, commit: f32) -> Self {
        self.visual_threshold = visual;
        self.commit_threshold = commit;
        self
    }

    #[must_use]
    pub fn with_card_swap_delay(mut self, delay: Duration) -> Self {
        self.card_swap_delay_ms = delay.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_autosave_interval(mut self, interval: Duration) -> Self {
        self.autosave_interval_ms = interval.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_player_handoff(mut self, enabled: bool) -> Self {
        self.player_handoff = enabled;
        self
    }

    #[must_use]
    pub fn card_swap_delay(&self) -> Duration {
        Duration::from_millis(self.card_swap_delay_ms)
    }

    #[must_use]
    pub fn tutorial_advance_delay(&self) -> Duration {
        Duration::from_millis(self.tutorial_advance_delay_ms)
    }

    #[must_use]
    pub fn autosave_interval(&self) -> Duration {
        Duration::from_millis(self.autosave_interval_ms)
    }
}

/// User toggles from the settings screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sound_enabled: bool,
    pub music_enabled: bool,
    pub haptics_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            haptics_enabled: true,
        }
    }
}

impl Settings {
    /// All feedback off. Useful for silent test sessions.
    #[must_use]
    pub fn muted() -> Self {
        Self {
            sound_enabled: false,
            music_enabled: false,
            haptics_enabled: false,
        }
    }
}
