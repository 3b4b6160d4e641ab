//! Core engine types: errors, configuration, RNG, players, session state.
//!
//! Everything here is independent of input handling and storage; the
//! session coordinator ties it together.

pub mod error;
pub mod config;
pub mod rng;
pub mod player;
pub mod state;

pub use error::{EngineError, Result};
pub use config::{EngineConfig, Settings};
pub use rng::GameRng;
pub use player::{Player, PlayerId, PlayerStats, Roster, AVATARS};
pub use state::{SessionPhase, SessionState};
