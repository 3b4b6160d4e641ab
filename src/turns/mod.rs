//! Turn order and drink accounting.
//!
//! `TurnTracker` owns the player list for a session. It is the only place
//! that mutates `total_drinks` and per-player statistics.

mod tracker;

pub use tracker::{Outcome, TurnTracker};
