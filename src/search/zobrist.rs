//! Zobrist hashing of box ownership
//!
//! The position key covers box owners only. Edge ownership is left out,
//! so two positions with different claimed edges but the same owned
//! boxes share a key. This coarse key lets the transposition table
//! reuse results across many edge configurations at the cost of
//! occasionally reusing a result from a different position.
//!
//! # Example
//!
//! ```
//! use dots::board::{Board, Player};
//! use dots::rules::claim_edge;
//! use dots::search::ZobristTable;
//!
//! let zt = ZobristTable::new();
//! let mut board = Board::new();
//! let empty = zt.hash(&board);
//!
//! // Claiming an edge without closing a box leaves the key unchanged
//! let id = board.box_at(0, 0).unwrap().edges()[0];
//! let record = claim_edge(&mut board, id, Player::A);
//! assert_eq!(zt.update_claim(empty, &record, Player::A), empty);
//! assert_eq!(zt.hash(&board), empty);
//! ```

use crate::board::{Board, BoxId, Player, TOTAL_BOXES};
use crate::rules::ClaimRecord;

/// Zobrist hash table for box-ownership keys.
///
/// One random value per (box, owner) pair. Unowned boxes contribute
/// nothing, so the empty board hashes to 0.
pub struct ZobristTable {
    owners: [[u64; 2]; TOTAL_BOXES],
}

impl ZobristTable {
    /// Create a new Zobrist table with deterministic random values.
    ///
    /// Uses a fixed-seed linear congruential generator so keys are
    /// reproducible across runs.
    #[must_use]
    pub fn new() -> Self {
        // Constants from Knuth's MMIX LCG
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        let mut next_rand = || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            // High bits of an LCG are the well-mixed ones
            seed ^ (seed >> 29)
        };

        let mut owners = [[0u64; 2]; TOTAL_BOXES];
        for slot in owners.iter_mut() {
            slot[0] = next_rand();
            slot[1] = next_rand();
        }

        Self { owners }
    }

    /// Key of a box owned by `player`
    #[inline]
    pub fn box_key(&self, id: BoxId, player: Player) -> u64 {
        self.owners[id.index()][player.index()]
    }

    /// Compute the full key for a board position.
    #[must_use]
    pub fn hash(&self, board: &Board) -> u64 {
        board
            .boxes()
            .iter()
            .filter_map(|b| b.owner().map(|p| self.box_key(b.id(), p)))
            .fold(0, |h, k| h ^ k)
    }

    /// Incrementally update the key after `record`'s claim by `player`.
    ///
    /// Only boxes closed by the claim change the key. Applying the same
    /// update again undoes it.
    #[inline]
    #[must_use]
    pub fn update_claim(&self, hash: u64, record: &ClaimRecord, player: Player) -> u64 {
        record
            .completed
            .iter()
            .flatten()
            .fold(hash, |h, &id| h ^ self.box_key(id, player))
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}
