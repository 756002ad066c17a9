//! Transposition Table for caching search results
//!
//! The transposition table stores search results indexed by the
//! box-ownership key, so that a subtree already searched to a sufficient
//! depth is not expanded again.
//!
//! # Example
//!
//! ```
//! use dots::board::EdgeId;
//! use dots::search::{EntryType, TranspositionTable, TtProbe};
//!
//! let mut tt = TranspositionTable::new(1); // 1 MB
//!
//! let hash = 0x1234_5678_9ABC_DEF0;
//! tt.store(hash, 3, 1000, EntryType::Exact, Some(EdgeId(12)));
//!
//! match tt.probe(hash, 3, -5000, 5000) {
//!     TtProbe::Cutoff { score, best_move } => {
//!         assert_eq!(score, 1000);
//!         assert_eq!(best_move, Some(EdgeId(12)));
//!     }
//!     other => panic!("unexpected probe result {:?}", other),
//! }
//! ```

use crate::board::EdgeId;

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the value fell strictly inside the search window
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

impl EntryType {
    /// Classify a node's final score against the window it was searched with.
    #[inline]
    pub fn classify(score: i32, alpha: i32, beta: i32) -> Self {
        if score <= alpha {
            EntryType::UpperBound
        } else if score >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        }
    }
}

/// Transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Full key of the position
    pub hash: u64,
    /// Remaining depth the entry was searched to
    pub depth: u8,
    pub score: i32,
    pub entry_type: EntryType,
    /// Best move found for this position
    pub best_move: Option<EdgeId>,
}

/// Outcome of a table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtProbe {
    /// No entry, or one searched too shallow to use
    Miss,
    /// The node can return immediately: exact entry, or a bound that
    /// closed the window
    Cutoff { score: i32, best_move: Option<EdgeId> },
    /// A bound tightened the window; search on with it
    Window { alpha: i32, beta: i32 },
}

/// Transposition table for caching search results.
///
/// Uses a simple direct-mapped approach where each hash maps to exactly
/// one slot. Collisions are handled by replacement policies based on
/// search depth.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    size: usize,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let size = (size_mb * 1024 * 1024) / entry_size;

        // Ensure at least some entries
        let size = size.max(1024);

        Self {
            entries: vec![None; size],
            size,
        }
    }

    #[inline]
    fn slot(&self, hash: u64) -> usize {
        (hash % self.size as u64) as usize
    }

    /// Raw entry for `hash`, if the slot currently holds that position.
    #[must_use]
    pub fn get(&self, hash: u64) -> Option<TTEntry> {
        self.entries[self.slot(hash)].filter(|e| e.hash == hash)
    }

    /// Look up a node about to be searched to `depth` with window
    /// `(alpha, beta)`.
    ///
    /// Entries searched shallower than `depth` are ignored. An exact
    /// entry cuts off; a lower bound raises alpha, an upper bound lowers
    /// beta, and if that empties the window the cached result cuts off.
    #[must_use]
    pub fn probe(&self, hash: u64, depth: u8, mut alpha: i32, mut beta: i32) -> TtProbe {
        let Some(entry) = self.get(hash) else {
            return TtProbe::Miss;
        };
        if entry.depth < depth {
            return TtProbe::Miss;
        }

        match entry.entry_type {
            EntryType::Exact => {
                return TtProbe::Cutoff {
                    score: entry.score,
                    best_move: entry.best_move,
                }
            }
            EntryType::LowerBound => alpha = alpha.max(entry.score),
            EntryType::UpperBound => beta = beta.min(entry.score),
        }

        if alpha >= beta {
            TtProbe::Cutoff {
                score: entry.score,
                best_move: entry.best_move,
            }
        } else {
            TtProbe::Window { alpha, beta }
        }
    }

    /// Store a position in the table.
    ///
    /// Uses a depth-preferred replacement policy: an entry is replaced if
    /// the slot is empty, contains the same position, or the new search
    /// is at least as deep as the existing entry.
    pub fn store(
        &mut self,
        hash: u64,
        depth: u8,
        score: i32,
        entry_type: EntryType,
        best_move: Option<EdgeId>,
    ) {
        let idx = self.slot(hash);

        let should_replace = match &self.entries[idx] {
            None => true,
            Some(e) => e.hash == hash || e.depth <= depth,
        };

        if should_replace {
            self.entries[idx] = Some(TTEntry {
                hash,
                depth,
                score,
                entry_type,
                best_move,
            });
        }
    }

    /// Clear all entries. Call when starting a new game.
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        TTStats {
            size: self.size,
            used,
            usage_percent: (used as f64 / self.size as f64 * 100.0) as u8,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Percentage of table in use (0-100)
    pub usage_percent: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: u64 = 0x1234_5678_9ABC_DEF0;

    #[test]
    fn test_tt_store_probe_exact() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 5, 100, EntryType::Exact, Some(EdgeId(9)));

        assert_eq!(
            tt.probe(HASH, 5, -1000, 1000),
            TtProbe::Cutoff {
                score: 100,
                best_move: Some(EdgeId(9))
            }
        );
        // A deeper entry also serves a shallower request
        assert!(matches!(tt.probe(HASH, 2, -1000, 1000), TtProbe::Cutoff { score: 100, .. }));
    }

    #[test]
    fn test_tt_depth_requirement() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 3, 100, EntryType::Exact, Some(EdgeId(5)));

        assert_eq!(tt.probe(HASH, 5, -1000, 1000), TtProbe::Miss);
        // The shallow entry is kept, just not trusted
        assert_eq!(tt.get(HASH).map(|e| e.depth), Some(3));
    }

    #[test]
    fn test_tt_lower_bound_tightens_alpha() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 5, 200, EntryType::LowerBound, None);

        assert_eq!(
            tt.probe(HASH, 5, -1000, 1000),
            TtProbe::Window {
                alpha: 200,
                beta: 1000
            }
        );
        // Bound at or above beta closes the window
        assert!(matches!(tt.probe(HASH, 5, -1000, 150), TtProbe::Cutoff { score: 200, .. }));
        // A weaker bound leaves alpha alone
        assert_eq!(
            tt.probe(HASH, 5, 300, 1000),
            TtProbe::Window {
                alpha: 300,
                beta: 1000
            }
        );
    }

    #[test]
    fn test_tt_upper_bound_tightens_beta() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 5, 50, EntryType::UpperBound, None);

        assert_eq!(
            tt.probe(HASH, 5, -1000, 1000),
            TtProbe::Window {
                alpha: -1000,
                beta: 50
            }
        );
        assert!(matches!(tt.probe(HASH, 5, 100, 1000), TtProbe::Cutoff { score: 50, .. }));
    }

    #[test]
    fn test_tt_hash_mismatch() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 5, 100, EntryType::Exact, Some(EdgeId(9)));

        let other = HASH + tt.size as u64; // same slot, different key
        assert_eq!(tt.probe(other, 5, -1000, 1000), TtProbe::Miss);
        assert!(tt.get(other).is_none());
    }

    #[test]
    fn test_tt_replacement_deeper() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 3, 100, EntryType::Exact, Some(EdgeId(5)));
        tt.store(HASH, 5, 200, EntryType::Exact, Some(EdgeId(9)));

        assert!(matches!(tt.probe(HASH, 5, -1000, 1000), TtProbe::Cutoff { score: 200, .. }));
    }

    #[test]
    fn test_tt_same_hash_always_replaces() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 5, 100, EntryType::Exact, Some(EdgeId(5)));
        tt.store(HASH, 3, 200, EntryType::Exact, Some(EdgeId(9)));

        assert_eq!(tt.get(HASH).map(|e| e.depth), Some(3));
        assert_eq!(tt.probe(HASH, 5, -1000, 1000), TtProbe::Miss);
    }

    #[test]
    fn test_tt_collision_keeps_deeper() {
        let mut tt = TranspositionTable::new(1);
        let other = HASH + tt.size as u64;
        tt.store(HASH, 5, 100, EntryType::Exact, None);
        tt.store(other, 3, 200, EntryType::Exact, None);

        assert!(tt.get(HASH).is_some());
        assert!(tt.get(other).is_none());
    }

    #[test]
    fn test_tt_clear() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 5, 100, EntryType::Exact, None);
        tt.clear();

        assert_eq!(tt.probe(HASH, 5, -1000, 1000), TtProbe::Miss);
        assert_eq!(tt.stats().used, 0);
    }

    #[test]
    fn test_tt_stats() {
        let mut tt = TranspositionTable::new(1);
        assert_eq!(tt.stats().used, 0);

        tt.store(0x111, 5, 100, EntryType::Exact, None);
        tt.store(0x222, 5, 100, EntryType::Exact, None);

        let stats = tt.stats();
        assert_eq!(stats.used, 2);
        assert!(stats.size >= 1024);
    }

    #[test]
    fn test_entry_type_classify() {
        assert_eq!(EntryType::classify(-5, -5, 10), EntryType::UpperBound);
        assert_eq!(EntryType::classify(10, -5, 10), EntryType::LowerBound);
        assert_eq!(EntryType::classify(3, -5, 10), EntryType::Exact);
    }

    #[test]
    fn test_tt_minimum_size() {
        let tt = TranspositionTable::new(0);
        assert!(tt.size >= 1024);
    }
}
