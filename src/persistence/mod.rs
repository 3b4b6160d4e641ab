//! On-device persistence.
//!
//! - `store`: the `KeyValueStore` seam plus memory and file backends
//! - `snapshot`: encode, validate and restore `SessionState`
//!
//! Besides the session snapshot, the only persisted value is the
//! "tutorial already shown" flag.

pub mod snapshot;
pub mod store;

pub use snapshot::{SessionStore, SESSION_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use crate::core::error::Result;

/// Storage key for the tutorial flag.
pub const TUTORIAL_KEY: &str = "tutorial_shown";

/// Whether the interactive tutorial was completed or skipped before.
///
/// Storage errors read as "not shown".
#[must_use]
pub fn tutorial_shown(store: &dyn KeyValueStore) -> bool {
    matches!(store.get(TUTORIAL_KEY), Ok(Some(v)) if v == b"1")
}

pub fn mark_tutorial_shown(store: &dyn KeyValueStore) -> Result<()> {
    store.set(TUTORIAL_KEY, b"1")
}
