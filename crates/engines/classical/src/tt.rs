//! Transposition table shared by every search of one engine.

use std::collections::HashMap;

use chess_core::Move;
use parking_lot::RwLock;

use crate::eval::Score;

/// Default maximum number of entries.
pub const DEFAULT_CAPACITY: usize = 1 << 20;

/// Entries inspected when a full table needs a victim.
const REPLACEMENT_SAMPLE: usize = 8;

/// How a stored score relates to the true value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// Failed high: the true value is at least `score`.
    LowerBound,
    /// Failed low: the true value is at most `score`.
    UpperBound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    pub depth: u8,
    pub score: Score,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

/// Fingerprint-keyed cache of search results.
///
/// Readers never block each other; a writer holds the lock only for one
/// insert, so entries are never observed half written.
#[derive(Debug)]
pub struct TranspositionTable {
    slots: RwLock<Slots>,
    capacity: usize,
}

#[derive(Debug, Default)]
struct Slots {
    entries: HashMap<u64, TtEntry>,
    /// Every stored key, in no particular order. Replacement samples a run of
    /// this list starting at a position derived from the incoming key.
    keys: Vec<u64>,
}

impl Slots {
    /// Index into `keys` of the shallowest entry in the run picked by `key`.
    fn victim(&self, key: u64) -> Option<(usize, u8)> {
        let len = self.keys.len();
        if len == 0 {
            return None;
        }
        let start = (key % len as u64) as usize;
        (0..REPLACEMENT_SAMPLE.min(len))
            .map(|i| (start + i) % len)
            .filter_map(|idx| self.entries.get(&self.keys[idx]).map(|e| (idx, e.depth)))
            .min_by_key(|&(_, depth)| depth)
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: RwLock::new(Slots::default()),
            capacity: capacity.max(1),
        }
    }

    pub fn probe(&self, key: u64) -> Option<TtEntry> {
        self.slots.read().entries.get(&key).copied()
    }

    /// Overwrites any entry under `key`.
    ///
    /// When the table is full a new key evicts the shallowest of a few
    /// existing entries chosen by the key, unless it is shallower than all
    /// of them.
    pub fn store(&self, key: u64, entry: TtEntry) {
        let mut slots = self.slots.write();
        if let Some(existing) = slots.entries.get_mut(&key) {
            *existing = entry;
            return;
        }
        if slots.entries.len() < self.capacity {
            slots.entries.insert(key, entry);
            slots.keys.push(key);
            return;
        }

        if let Some((idx, victim_depth)) = slots.victim(key) {
            if entry.depth >= victim_depth {
                let victim_key = slots.keys.swap_remove(idx);
                slots.entries.remove(&victim_key);
                slots.entries.insert(key, entry);
                slots.keys.push(key);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slots.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        let mut slots = self.slots.write();
        slots.entries.clear();
        slots.keys.clear();
    }
}

#[cfg(test)]
#[path = "tt_tests.rs"]
mod tt_tests;
