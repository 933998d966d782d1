//! Cycle detection over the history of board states within one evaluation.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Fingerprint function over a cell buffer.
///
/// Injectable so tests can force collisions and prove that distinct states
/// are still told apart by the full-buffer comparison.
pub type FingerprintFn = fn(&[bool]) -> u64;

/// Hash the whole buffer. Equal buffers always produce equal fingerprints;
/// unequal buffers may collide, which the chained storage below resolves.
pub fn default_fingerprint(cells: &[bool]) -> u64 {
    let mut hasher = DefaultHasher::new();
    cells.hash(&mut hasher);
    hasher.finish()
}

/// Fingerprint-indexed history of previously visited board states.
///
/// Each fingerprint key owns a small chain of `(snapshot, iteration)` pairs.
/// A lookup only counts as a repeat when the stored snapshot compares equal
/// byte for byte; a colliding fingerprint with a different buffer extends
/// the chain instead. Snapshots are deep copies, since the board buffer is
/// mutated every step.
pub struct CycleDetector {
    seen: HashMap<u64, Vec<(Vec<bool>, u32)>>,
    fingerprint: FingerprintFn,
}

impl CycleDetector {
    /// Create an empty history using the default fingerprint.
    pub fn new() -> Self {
        Self::with_fingerprint(default_fingerprint)
    }

    /// Create an empty history with an injected fingerprint function.
    pub fn with_fingerprint(fingerprint: FingerprintFn) -> Self {
        Self {
            seen: HashMap::new(),
            fingerprint,
        }
    }

    /// Look up `cells` in the history; record it if absent.
    ///
    /// Returns the iteration at which an equal state was first recorded, or
    /// `None` if this state is new.
    pub fn check_and_record(&mut self, cells: &[bool], iteration: u32) -> Option<u32> {
        let key = (self.fingerprint)(cells);
        let chain = self.seen.entry(key).or_default();
        for (snapshot, first_seen) in chain.iter() {
            if snapshot == cells {
                return Some(*first_seen);
            }
        }
        chain.push((cells.to_vec(), iteration));
        None
    }

    /// Number of distinct states recorded.
    pub fn len(&self) -> usize {
        self.seen.values().map(Vec::len).sum()
    }

    /// Whether any state has been recorded.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new()
    }
}
