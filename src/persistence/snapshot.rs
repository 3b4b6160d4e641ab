//! Session snapshots.
//!
//! A snapshot is the bincode encoding of `SessionState` behind a short
//! magic prefix. There is no versioning: a blob that fails to decode or
//! violates a session invariant is corrupt and gets discarded.

use std::rc::Rc;

use super::store::KeyValueStore;
use crate::core::error::{EngineError, Result};
use crate::core::state::SessionState;

const MAGIC: &[u8; 4] = b"SCHK";

/// Default storage key for the running session.
pub const SESSION_KEY: &str = "session";

/// Save/restore of a single named session snapshot.
#[derive(Clone)]
pub struct SessionStore {
    store: Rc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("key", &self.key).finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store, key: SESSION_KEY.to_string() }
    }

    /// Write `state`, replacing any previous snapshot.
    pub fn save(&self, state: &SessionState) -> Result<()> {
        let bytes = encode(state)?;
        self.store.set(&self.key, &bytes)?;
        tracing::debug!(key = %self.key, bytes = bytes.len(), "snapshot saved");
        Ok(())
    }

    /// Last snapshot, or `None` when absent or unreadable.
    ///
    /// Corrupt snapshots are logged and removed. A failed read leaves the
    /// stored blob alone.
    #[must_use]
    pub fn load(&self) -> Option<SessionState> {
        match self.try_load() {
            Ok(state) => state,
            Err(e) if e.is_corrupt_snapshot() => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable snapshot");
                if let Err(e) = self.clear() {
                    tracing::warn!(key = %self.key, error = %e, "failed to remove snapshot");
                }
                None
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "snapshot unavailable");
                None
            }
        }
    }

    /// Like `load`, but reports why a snapshot was rejected.
    pub fn try_load(&self) -> Result<Option<SessionState>> {
        match self.store.get(&self.key)? {
            Some(bytes) => decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)
    }
}

pub(crate) fn encode(state: &SessionState) -> Result<Vec<u8>> {
    let mut bytes = MAGIC.to_vec();
    bincode::serialize_into(&mut bytes, state)?;
    Ok(bytes)
}

pub(crate) fn decode(bytes: &[u8]) -> Result<SessionState> {
    let body = bytes
        .strip_prefix(MAGIC.as_slice())
        .ok_or_else(|| EngineError::corrupt("missing snapshot header"))?;
    let state: SessionState =
        bincode::deserialize(body).map_err(|e| EngineError::corrupt(e.to_string()))?;
    state.validate()?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Category};
    use crate::core::player::Player;
    use crate::deck::Deck;
    use crate::persistence::MemoryStore;

    fn state() -> SessionState {
        let mut state = SessionState::new(
            vec![Player::new("A", "😎"), Player::new("B", "🦁")],
            Deck::from_sequence(vec![
                Card::new(1, Category::Duel, "d", 2),
                Card::new(2, Category::Group, "g", 1),
            ]),
        )
        .unwrap();
        state.deck.advance(None).unwrap();
        state.pending_acceptance = true;
        state
    }

    #[test]
    fn test_encode_decode() {
        let state = state();
        let bytes = encode(&state).unwrap();
        assert!(bytes.starts_with(MAGIC));
        assert_eq!(decode(&bytes).unwrap(), state);
    }

    #[test]
    fn test_truncated_snapshot_is_corrupt() {
        let bytes = encode(&state()).unwrap();
        let truncated = &bytes[..bytes.len() / 2];
        assert!(matches!(decode(truncated), Err(EngineError::CorruptSnapshot(_))));
    }

    #[test]
    fn test_foreign_blob_is_corrupt() {
        assert!(matches!(decode(b"{\"json\": true}"), Err(EngineError::CorruptSnapshot(_))));
        assert!(matches!(decode(b""), Err(EngineError::CorruptSnapshot(_))));
    }

    #[test]
    fn test_load_discards_corrupt() {
        let backend = MemoryStore::new();
        backend.set(SESSION_KEY, b"SCHK garbage").unwrap();

        let store = SessionStore::new(Rc::new(backend.clone()));
        assert!(store.try_load().is_err());
        assert!(store.load().is_none());
        assert!(!backend.contains(SESSION_KEY));
    }

    /// Fails the first read, then behaves like the wrapped store.
    struct Flaky {
        inner: MemoryStore,
        failed: std::cell::Cell<bool>,
    }

    impl KeyValueStore for Flaky {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
            if !self.failed.replace(true) {
                return Err(std::io::Error::new(std::io::ErrorKind::Interrupted, "busy").into());
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &[u8]) -> Result<()> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_load_keeps_snapshot_on_read_error() {
        let backend = MemoryStore::new();
        let store = SessionStore::new(Rc::new(Flaky {
            inner: backend.clone(),
            failed: std::cell::Cell::new(false),
        }));
        store.save(&state()).unwrap();

        assert!(store.load().is_none());
        assert!(backend.contains(SESSION_KEY));
        assert_eq!(store.load(), Some(state()));
    }

    #[test]
    fn test_invalid_state_rejected() {
        let mut state = state();
        state.deck = Deck::from_sequence(vec![]);
        // pending acceptance without a drawn card
        let bytes = encode(&state).unwrap();
        assert!(matches!(decode(&bytes), Err(EngineError::CorruptSnapshot(_))));
    }
}
