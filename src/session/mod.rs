//! Session Coordinator.
//!
//! - `coordinator`: the game state machine (`Session`, `SessionBuilder`)
//! - `events`: notifications delivered after each transition
//! - `scheduler`: logical-time timers for card swaps and autosave
//! - `tutorial`: the interactive swipe tutorial

pub mod coordinator;
pub mod events;
pub mod scheduler;
pub mod tutorial;

pub use coordinator::{Action, Session, SessionBuilder};
pub use events::{SessionEvent, SessionObserver};
pub use scheduler::Scheduler;
pub use tutorial::{SwipeVerdict, Tutorial, TutorialStep};
