//! Main engine facade
//!
//! Wraps a [`Searcher`] with its configuration: enumerates the open
//! edges, guards the terminal position and times the search.
//!
//! # Example
//!
//! ```
//! use dots::{Board, Engine, EngineConfig, Player};
//!
//! let config = EngineConfig {
//!     max_depth: 2,
//!     tt_size_mb: 1,
//!     ..EngineConfig::default()
//! };
//! let mut engine = Engine::with_config(config);
//! let board = Board::new();
//!
//! let result = engine.choose_move(&board, Player::A);
//! println!("Best move: {:?}", result.best_move.map(|e| e.vertices()));
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::{Duration, Instant};

use log::info;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Edge, Player};
use crate::eval::{evaluate_with, EvalWeights};
use crate::search::{CutoffRule, SearchResult, Searcher, TTStats};

/// Search depth used when nothing else is configured
pub const TREE_DEPTH: u8 = 5;
pub const DEFAULT_TIME_BUDGET_MS: u64 = 2000;
pub const DEFAULT_TT_SIZE_MB: usize = 16;

/// Engine settings, loadable from JSON. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub max_depth: u8,
    /// Budget checked between iterative deepening depths
    pub time_budget_ms: u64,
    pub tt_size_mb: usize,
    pub cutoff: CutoffRule,
    /// Off by default: the table key only covers box owners, so most
    /// positions before the first closed box share one entry.
    pub use_tt: bool,
    pub abort_in_iteration: bool,
    pub weights: EvalWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: TREE_DEPTH,
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            tt_size_mb: DEFAULT_TT_SIZE_MB,
            cutoff: CutoffRule::default(),
            use_tt: false,
            abort_in_iteration: false,
            weights: EvalWeights::default(),
        }
    }
}

impl EngineConfig {
    #[inline]
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found; `None` when no edge is open
    pub best_move: Option<Edge>,
    /// Score of the searched position, from Player A's perspective
    pub score: i32,
    /// Deepest completed iteration
    pub depth: u8,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn from_search(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            depth: result.depth,
            time_ms,
            nodes: result.nodes,
        }
    }

    #[inline]
    fn no_move(score: i32, time_ms: u64) -> Self {
        Self {
            best_move: None,
            score,
            depth: 0,
            time_ms,
            nodes: 0,
        }
    }
}

/// Configured search engine. Keeps its transposition table between
/// moves of the same game.
pub struct Engine {
    searcher: Searcher,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let searcher = Searcher::new(config.tt_size_mb)
            .with_cutoff(config.cutoff)
            .with_tt(config.use_tt)
            .with_weights(config.weights)
            .with_abort_in_iteration(config.abort_in_iteration);
        Self { searcher, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Choose `player`'s next edge on `board`.
    ///
    /// A complete board has no move to search; the result then carries
    /// the static evaluation and no move.
    #[must_use]
    pub fn choose_move(&mut self, board: &Board, player: Player) -> MoveResult {
        let start = Instant::now();
        let open = board.open_edges();

        if open.is_empty() {
            info!("no open edges left, nothing to search");
            let score = evaluate_with(board, &self.config.weights);
            return MoveResult::no_move(score, start.elapsed().as_millis() as u64);
        }

        let result = self.searcher.choose_move(
            board,
            &open,
            self.config.max_depth,
            player,
            self.config.time_budget(),
        );
        let time_ms = start.elapsed().as_millis() as u64;

        info!(
            "{} to move: {} open, depth {} score {} nodes {} in {}ms (tt cutoffs {:.1}%)",
            player,
            open.len(),
            result.depth,
            result.score,
            result.nodes,
            time_ms,
            result.stats.tt_cutoff_rate()
        );

        MoveResult::from_search(result, time_ms)
    }

    /// Forget everything cached from the previous game.
    pub fn new_game(&mut self) {
        self.searcher.clear_tt();
    }

    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.searcher.tt_stats()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Side;
    use crate::rules::claim_edge;

    fn quick_config() -> EngineConfig {
        EngineConfig {
            max_depth: 2,
            tt_size_mb: 1,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.time_budget(), Duration::from_secs(2));
        assert_eq!(config.cutoff, CutoffRule::LeafValue);
        assert!(!config.use_tt);
        assert!(!config.abort_in_iteration);
    }

    #[test]
    fn test_engine_config_partial_json() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"max_depth": 3, "cutoff": "window"}"#).unwrap();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.cutoff, CutoffRule::Window);
        assert_eq!(config.tt_size_mb, DEFAULT_TT_SIZE_MB);
    }

    #[test]
    fn test_engine_takes_free_box() {
        let mut board = Board::new();
        let gbox = board.box_at(7, 2).unwrap().clone();
        for side in [Side::North, Side::East, Side::South] {
            claim_edge(&mut board, gbox.edge(side), Player::B);
        }

        let mut engine = Engine::with_config(quick_config());
        let result = engine.choose_move(&board, Player::A);
        assert_eq!(result.best_move.map(|e| e.id), Some(gbox.edge(Side::West)));
        assert!(result.nodes > 0);
        assert_eq!(result.depth, 2);
    }

    #[test]
    fn test_engine_full_board_has_no_move() {
        let mut board = Board::new();
        for edge in board.open_edges() {
            claim_edge(&mut board, edge.id, Player::A);
        }
        assert!(board.is_complete());

        let mut engine = Engine::with_config(quick_config());
        let result = engine.choose_move(&board, Player::B);
        assert!(result.best_move.is_none());
        assert_eq!(result.score, 81 * 1000);
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn test_engine_new_game_clears_tt() {
        let mut engine = Engine::with_config(EngineConfig {
            use_tt: true,
            ..quick_config()
        });
        let _ = engine.choose_move(&Board::new(), Player::A);
        assert!(engine.tt_stats().used > 0);

        engine.new_game();
        assert_eq!(engine.tt_stats().used, 0);
    }
}
