//! Search module for the Dots and Boxes engine
//!
//! Contains:
//! - Zobrist hashing of box ownership
//! - Transposition table for caching search results
//! - Alpha-Beta search with iterative deepening

pub mod alphabeta;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{
    choose_move, minimax, CutoffRule, SearchResult, SearchStats, Searcher, DEFAULT_TT_MB, INF,
};
pub use tt::{EntryType, TTEntry, TTStats, TranspositionTable, TtProbe};
pub use zobrist::ZobristTable;
