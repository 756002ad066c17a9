//! Heuristic evaluation function for Dots and Boxes board positions
//!
//! The score only depends on the current board: no history, no side to
//! move. Positive values favour Player A (the maximizing side).

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player};

/// Value of one box of difference
pub const BOX_WEIGHT: i32 = 1000;

/// Cost of one box with exactly three claimed edges, whoever owns them.
/// Such a box is a free point for the next mover.
pub const THREE_EDGE_PENALTY: i32 = 1;

/// Evaluation weights. `box_weight` should stay about 1000x the penalty
/// so that box count always outranks the safety term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalWeights {
    pub box_weight: i32,
    pub three_edge_penalty: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            box_weight: BOX_WEIGHT,
            three_edge_penalty: THREE_EDGE_PENALTY,
        }
    }
}

/// Evaluate the board with the default weights.
///
/// `BOX_WEIGHT * (boxes(A) - boxes(B)) - THREE_EDGE_PENALTY * boxes_with_three_edges`
///
/// # Example
///
/// ```
/// use dots::board::Board;
/// use dots::eval::evaluate;
///
/// assert_eq!(evaluate(&Board::new()), 0);
/// ```
#[must_use]
pub fn evaluate(board: &Board) -> i32 {
    evaluate_with(board, &EvalWeights::default())
}

/// Evaluate the board with explicit weights.
#[must_use]
pub fn evaluate_with(board: &Board, weights: &EvalWeights) -> i32 {
    let mut boxes_a = 0i32;
    let mut boxes_b = 0i32;
    let mut three_edges = 0i32;

    for gbox in board.boxes() {
        match gbox.owner() {
            Some(Player::A) => boxes_a += 1,
            Some(Player::B) => boxes_b += 1,
            None => {}
        }
        if gbox.claimed() == 3 {
            three_edges += 1;
        }
    }

    weights.box_weight * (boxes_a - boxes_b) - weights.three_edge_penalty * three_edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Side, Vertex};
    use crate::rules::{apply_move, claim_edge};

    fn close_box(board: &mut Board, x: u8, y: u8, last: Player) {
        let edges = board.box_at(x, y).unwrap().edges();
        for (i, id) in edges.into_iter().enumerate() {
            if board.is_open(id) {
                let player = if i == 3 { last } else { last.opponent() };
                claim_edge(board, id, player);
            }
        }
    }

    #[test]
    fn test_evaluate_empty_board() {
        assert_eq!(evaluate(&Board::new()), 0);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let mut board = Board::new();
        let edges = board.open_edges();
        for e in edges.iter().step_by(7) {
            claim_edge(&mut board, e.id, Player::A);
        }
        let snapshot = board.clone();

        let first = evaluate(&board);
        let second = evaluate(&board);
        assert_eq!(first, second);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_evaluate_box_difference() {
        let mut board = Board::new();
        close_box(&mut board, 0, 0, Player::A);
        assert_eq!(evaluate(&board), BOX_WEIGHT);

        close_box(&mut board, 8, 8, Player::B);
        close_box(&mut board, 4, 4, Player::B);
        assert_eq!(evaluate(&board), -BOX_WEIGHT);
    }

    #[test]
    fn test_evaluate_three_edge_penalty_ignores_owner() {
        let mut board = Board::new();
        // Three sides of box (0,0), split between both players
        apply_move(&mut board, Player::A, Vertex::new(0, 0), Vertex::new(1, 0)).unwrap();
        apply_move(&mut board, Player::B, Vertex::new(0, 0), Vertex::new(0, 1)).unwrap();
        apply_move(&mut board, Player::B, Vertex::new(1, 0), Vertex::new(1, 1)).unwrap();
        assert_eq!(evaluate(&board), -THREE_EDGE_PENALTY);

        // Giving box (1,0) three sides as well doubles the penalty
        let gbox = board.box_at(1, 0).unwrap().clone();
        claim_edge(&mut board, gbox.edge(Side::North), Player::A);
        claim_edge(&mut board, gbox.edge(Side::East), Player::A);
        assert_eq!(evaluate(&board), -2 * THREE_EDGE_PENALTY);
    }

    #[test]
    fn test_box_weight_dominates_penalty() {
        let mut board = Board::new();
        close_box(&mut board, 0, 0, Player::A);
        // Leave a row of three-edge boxes behind
        for x in 2..9u8 {
            let gbox = board.box_at(x, 8).unwrap().clone();
            for side in [Side::West, Side::South, Side::East] {
                if board.is_open(gbox.edge(side)) {
                    claim_edge(&mut board, gbox.edge(side), Player::B);
                }
            }
        }
        assert!(evaluate(&board) > 0);
    }

    #[test]
    fn test_evaluate_with_custom_weights() {
        let mut board = Board::new();
        close_box(&mut board, 3, 3, Player::B);
        let weights = EvalWeights {
            box_weight: 10,
            three_edge_penalty: 0,
        };
        assert_eq!(evaluate_with(&board, &weights), -10);
    }
}
