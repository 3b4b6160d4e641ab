//! Logical-time scheduler for timed transitions.
//!
//! The engine never sleeps or spawns. Owners call `advance` from the shell's
//! animation frame or timer callback; due entries come back in order and
//! the owner applies them synchronously.

use std::time::Duration;

use smallvec::SmallVec;

#[derive(Clone, Debug)]
struct Entry<K> {
    due: Duration,
    seq: u64,
    key: K,
}

/// Pending callbacks identified by `K`. At most one entry per key.
#[derive(Clone, Debug)]
pub struct Scheduler<K> {
    now: Duration,
    entries: Vec<Entry<K>>,
    next_seq: u64,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<K: Copy + PartialEq> Scheduler<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` to fire after `delay`, replacing any pending entry
    /// with the same key.
    pub fn schedule(&mut self, delay: Duration, key: K) {
        self.cancel(key);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { due: self.now + delay, seq, key });
    }

    /// Returns whether an entry was removed.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn is_pending(&self, key: K) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Move the clock forward and take every entry that became due,
    /// earliest first (ties in scheduling order).
    pub fn advance(&mut self, elapsed: Duration) -> SmallVec<[K; 2]> {
        self.now += elapsed;
        let now = self.now;

        let mut due: Vec<Entry<K>> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].due <= now {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|e| (e.due, e.seq));
        due.into_iter().map(|e| e.key).collect()
    }
}
