//! Alpha-Beta search with iterative deepening and transposition table
//!
//! This module implements the core search algorithm for the Dots and
//! Boxes engine. Player A maximizes and Player B minimizes the
//! evaluation; plies strictly alternate.
//!
//! # Features
//!
//! - Minimax with alpha-beta pruning, under one of two [`CutoffRule`]s
//! - Apply/undo on a single working board instead of per-node copies
//! - Transposition table keyed by box ownership
//! - Iterative deepening under a wall-clock budget
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use dots::board::{Board, Player};
//! use dots::search::Searcher;
//!
//! let mut searcher = Searcher::new(1);
//! let board = Board::new();
//! let open = board.open_edges();
//!
//! let result = searcher.choose_move(&board, &open, 2, Player::A, Duration::from_secs(5));
//! assert!(result.best_move.is_some());
//! ```

use std::time::{Duration, Instant};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Edge, EdgeId, Player};
use crate::eval::{evaluate_with, EvalWeights};
use crate::rules::{claim_edge, undo_claim};

use super::{EntryType, TTStats, TranspositionTable, TtProbe, ZobristTable};

/// Infinity score for alpha-beta bounds. Real scores stay within
/// `81 * BOX_WEIGHT + 81`.
pub const INF: i32 = 1_000_000;

/// Default transposition table size for one-off searches
pub const DEFAULT_TT_MB: usize = 16;

/// How often (in nodes) the in-iteration deadline is checked
const TIME_CHECK_MASK: u64 = 1023;

/// When a node stops expanding its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoffRule {
    /// Fail hard on the one-ply evaluation: if the position right after a
    /// candidate move already reaches beta (alpha for the minimizer), the
    /// node returns that evaluation and move without recursing. The
    /// one-ply evaluation also narrows the window before the recursion.
    #[default]
    LeafValue,
    /// Textbook alpha-beta on recursive values. With the table disabled
    /// it returns the same root value as [`minimax`].
    Window,
}

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Nodes that stopped expanding early
    pub cutoffs: u64,
    /// Total TT probes
    pub tt_probes: u64,
    /// TT probes that answered the node outright
    pub tt_cutoffs: u64,
    /// TT probes that only narrowed the window
    pub tt_window_hits: u64,
}

impl SearchStats {
    /// Share of probes that answered the node (0-100)
    pub fn tt_cutoff_rate(&self) -> f64 {
        if self.tt_probes == 0 {
            0.0
        } else {
            self.tt_cutoffs as f64 / self.tt_probes as f64 * 100.0
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Score of the last completed depth, from Player A's perspective
    pub score: i32,
    /// Move chosen at the last completed depth
    pub best_move: Option<Edge>,
    /// Depth completed in iterative deepening (0 = static evaluation)
    pub depth: u8,
    /// Total nodes searched
    pub nodes: u64,
    pub stats: SearchStats,
}

/// Alpha-Beta search engine with iterative deepening and transposition table.
///
/// The searcher keeps its transposition table across calls; for a new
/// game call [`Searcher::clear_tt`].
pub struct Searcher {
    zobrist: ZobristTable,
    tt: TranspositionTable,
    weights: EvalWeights,
    cutoff: CutoffRule,
    use_tt: bool,
    abort_in_iteration: bool,
    nodes: u64,
    stats: SearchStats,
    deadline: Option<Instant>,
    stopped: bool,
}

impl Searcher {
    /// Create a new searcher with the specified transposition table size.
    ///
    /// Defaults: [`CutoffRule::LeafValue`], table enabled, deadline
    /// checked only between depths.
    #[must_use]
    pub fn new(tt_size_mb: usize) -> Self {
        Self {
            zobrist: ZobristTable::new(),
            tt: TranspositionTable::new(tt_size_mb),
            weights: EvalWeights::default(),
            cutoff: CutoffRule::default(),
            use_tt: true,
            abort_in_iteration: false,
            nodes: 0,
            stats: SearchStats::default(),
            deadline: None,
            stopped: false,
        }
    }

    #[must_use]
    pub fn with_cutoff(mut self, cutoff: CutoffRule) -> Self {
        self.cutoff = cutoff;
        self
    }

    #[must_use]
    pub fn with_tt(mut self, enabled: bool) -> Self {
        self.use_tt = enabled;
        self
    }

    #[must_use]
    pub fn with_weights(mut self, weights: EvalWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Also check the deadline inside an iteration and drop the
    /// unfinished depth when it passes.
    #[must_use]
    pub fn with_abort_in_iteration(mut self, enabled: bool) -> Self {
        self.abort_in_iteration = enabled;
        self
    }

    /// Iterative deepening search for `player`'s move.
    ///
    /// Searches depths `1..=max_depth` over the candidate set `open`,
    /// keeping the move of the last depth that completed with a move.
    /// The budget is checked after each depth, so one deep iteration can
    /// overrun it unless in-iteration aborts are enabled.
    ///
    /// With `max_depth == 0`, or no candidates, the result is the static
    /// evaluation and no move.
    pub fn choose_move(
        &mut self,
        board: &Board,
        open: &[Edge],
        max_depth: u8,
        player: Player,
        budget: Duration,
    ) -> SearchResult {
        let start = Instant::now();
        self.reset(start, budget);

        let mut result = SearchResult {
            score: evaluate_with(board, &self.weights),
            best_move: None,
            depth: 0,
            nodes: 0,
            stats: SearchStats::default(),
        };
        if max_depth == 0 || open.is_empty() {
            return result;
        }

        let candidates: Vec<EdgeId> = open.iter().map(|e| e.id).collect();
        let mut work = board.clone();
        let hash = self.zobrist.hash(&work);

        for depth in 1..=max_depth {
            let (score, best) =
                self.alpha_beta(&mut work, &candidates, depth, player, -INF, INF, hash, true);

            if self.stopped {
                debug!("depth {} aborted after {:?}, keeping depth {}", depth, start.elapsed(), result.depth);
                break;
            }

            if let Some(id) = best {
                result.score = score;
                result.best_move = Some(*work.edge(id));
                result.depth = depth;
            }

            debug!(
                "depth {} done: score={} move={:?} nodes={} elapsed={:?}",
                depth,
                score,
                best.map(|id| work.edge(id).vertices()),
                self.nodes,
                start.elapsed()
            );

            if start.elapsed() >= budget {
                break;
            }
        }

        result.nodes = self.nodes;
        result.stats = self.stats.clone();
        result
    }

    /// One alpha-beta pass at a fixed depth with a full window.
    pub fn search_depth(
        &mut self,
        board: &Board,
        open: &[Edge],
        depth: u8,
        player: Player,
    ) -> (i32, Option<Edge>) {
        self.reset(Instant::now(), Duration::MAX);
        let candidates: Vec<EdgeId> = open.iter().map(|e| e.id).collect();
        let mut work = board.clone();
        let hash = self.zobrist.hash(&work);

        let (score, best) =
            self.alpha_beta(&mut work, &candidates, depth, player, -INF, INF, hash, true);
        (score, best.map(|id| *work.edge(id)))
    }

    /// Nodes visited by the last search
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Get statistics about the transposition table.
    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    /// Clear the transposition table.
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    fn reset(&mut self, start: Instant, budget: Duration) {
        self.nodes = 0;
        self.stats = SearchStats::default();
        self.stopped = false;
        self.deadline = if self.abort_in_iteration {
            start.checked_add(budget)
        } else {
            None
        };
    }

    /// Set the stop flag once the deadline has passed.
    #[inline]
    fn check_time(&mut self) -> bool {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.stopped = true;
            }
        }
        self.stopped
    }

    /// Minimax node with alpha-beta pruning.
    ///
    /// `board` is the shared working board: every candidate is claimed,
    /// searched and undone before the next one, so siblings never see
    /// each other's moves. Candidates already claimed on `board` are
    /// skipped; a node with none left is scored as a leaf.
    ///
    /// The root never answers from the table, since a cached move may
    /// belong to another position with the same key.
    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &mut self,
        board: &mut Board,
        candidates: &[EdgeId],
        depth: u8,
        player: Player,
        mut alpha: i32,
        mut beta: i32,
        hash: u64,
        is_root: bool,
    ) -> (i32, Option<EdgeId>) {
        self.nodes += 1;
        if self.nodes & TIME_CHECK_MASK == 0 && self.check_time() {
            return (0, None);
        }
        if self.stopped {
            return (0, None);
        }

        if depth == 0 || !candidates.iter().any(|&id| board.is_open(id)) {
            return (evaluate_with(board, &self.weights), None);
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        if self.use_tt && !is_root {
            self.stats.tt_probes += 1;
            match self.tt.probe(hash, depth, alpha, beta) {
                TtProbe::Cutoff { score, best_move } => {
                    self.stats.tt_cutoffs += 1;
                    return (score, best_move);
                }
                TtProbe::Window { alpha: a, beta: b } => {
                    self.stats.tt_window_hits += 1;
                    alpha = a;
                    beta = b;
                }
                TtProbe::Miss => {}
            }
        }

        let maximizing = player == Player::A;
        let mut best_score = if maximizing { -INF } else { INF };
        let mut best_move = None;

        for &id in candidates {
            if !board.is_open(id) {
                continue;
            }

            let record = claim_edge(board, id, player);
            let child_hash = self.zobrist.update_claim(hash, &record, player);

            if self.cutoff == CutoffRule::LeafValue {
                let evaluation = evaluate_with(board, &self.weights);
                let fails = if maximizing {
                    evaluation >= beta
                } else {
                    evaluation <= alpha
                };
                if fails {
                    undo_claim(board, &record);
                    self.stats.cutoffs += 1;
                    return (evaluation, Some(id));
                }
                if maximizing {
                    alpha = alpha.max(evaluation);
                } else {
                    beta = beta.min(evaluation);
                }
            }

            let (score, _) = self.alpha_beta(
                board,
                candidates,
                depth - 1,
                player.opponent(),
                alpha,
                beta,
                child_hash,
                false,
            );
            undo_claim(board, &record);

            if self.stopped {
                return (0, None);
            }

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(id);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(id);
                }
                beta = beta.min(score);
            }

            if self.cutoff == CutoffRule::Window && alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        if self.use_tt {
            let entry_type = EntryType::classify(best_score, alpha_orig, beta_orig);
            self.tt.store(hash, depth, best_score, entry_type, best_move);
        }

        (best_score, best_move)
    }
}

/// Iterative deepening search with a fresh default searcher.
///
/// Convenience for one-off calls; keep a [`Searcher`] around to reuse
/// its transposition table between moves.
pub fn choose_move(
    board: &Board,
    open: &[Edge],
    max_depth: u8,
    player: Player,
    budget: Duration,
) -> SearchResult {
    Searcher::new(DEFAULT_TT_MB).choose_move(board, open, max_depth, player, budget)
}

/// Plain minimax without pruning or caching.
///
/// Exponential; only meant as a reference for small positions.
pub fn minimax(
    board: &mut Board,
    candidates: &[EdgeId],
    depth: u8,
    player: Player,
    weights: &EvalWeights,
) -> (i32, Option<EdgeId>) {
    if depth == 0 || !candidates.iter().any(|&id| board.is_open(id)) {
        return (evaluate_with(board, weights), None);
    }

    let maximizing = player == Player::A;
    let mut best = (if maximizing { -INF } else { INF }, None);

    for &id in candidates {
        if !board.is_open(id) {
            continue;
        }
        let record = claim_edge(board, id, player);
        let (score, _) = minimax(board, candidates, depth - 1, player.opponent(), weights);
        undo_claim(board, &record);

        let better = if maximizing { score > best.0 } else { score < best.0 };
        if better {
            best = (score, Some(id));
        }
    }

    best
}
