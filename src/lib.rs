//! # schluck-engine
//!
//! Core of a swipe-driven party drinking card game for 1 to 10 players.
//!
//! ## Design Principles
//!
//! 1. **One resolution path**: swipes and button taps become the same
//!    `Action`, so a card is scored exactly once whichever input wins.
//!
//! 2. **Single-threaded, logical time**: nothing sleeps or spawns. Card
//!    swaps, tutorial auto-advance and autosave are scheduled entries that
//!    the shell drives with `tick`.
//!
//! 3. **Presentation stays outside**: exit animations live in `ExitView`,
//!    sound and haptics go through the `Feedback` traits, and the shell
//!    renders whatever `SessionEvent`s it receives.
//!
//! ## Modules
//!
//! - `core`: errors, configuration, RNG, players, session state
//! - `cards`: card definitions, catalog, category selection
//! - `deck`: shuffled deck with a single cursor, exit tags
//! - `gesture`: swipe recognition over touch and pointer input
//! - `turns`: turn order and drink accounting
//! - `session`: the game state machine and tutorial
//! - `persistence`: key/value stores and session snapshots
//! - `feedback`: sound and haptic seams

pub mod core;
pub mod cards;
pub mod deck;
pub mod gesture;
pub mod turns;
pub mod session;
pub mod persistence;
pub mod feedback;

// Re-export commonly used types
pub use crate::core::{
    EngineError, Result,
    EngineConfig, Settings,
    GameRng,
    Player, PlayerId, PlayerStats, Roster, AVATARS,
    SessionPhase, SessionState,
};

pub use crate::cards::{Card, CardCatalog, CardId, Category, CategorySelection, CategoryStyle};

pub use crate::deck::{Deck, ExitDirection, ExitTag, ExitView};

pub use crate::gesture::{
    GestureHandler, GestureRecognizer, GestureState, SwipeDirection,
    InputEvent, InputPhase, InputSource, Point,
};

pub use crate::turns::{Outcome, TurnTracker};

pub use crate::session::{
    Action, Session, SessionBuilder, SessionEvent, SessionObserver,
    Tutorial, TutorialStep, SwipeVerdict,
};

pub use crate::persistence::{FileStore, KeyValueStore, MemoryStore, SessionStore};

pub use crate::feedback::{Feedback, HapticStrength, Haptics, SoundEffect, SoundPlayer};
