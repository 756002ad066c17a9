//! Claiming edges and propagating the claim to boxes

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, BoxId, EdgeId, Player, Vertex};

/// What to do when a move names an edge that is already owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimPolicy {
    /// Fail with [`EdgeError::Claimed`] before touching the board.
    #[default]
    Reject,
    /// Hand the edge to the new player. Box counters and box owners are
    /// left as they are, so repeating the move changes nothing.
    Overwrite,
}

/// Flat outcome taxonomy for a move supplied by the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeErrorKind {
    Valid,
    Pass,
    OutOfBounds,
    Invalid,
    Claimed,
}

/// Rejected move. The board is never mutated when one of these is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeError {
    #[error("edge {v1} {v2} is out of bounds")]
    OutOfBounds { v1: Vertex, v2: Vertex },

    #[error("no box has an edge {v1} {v2}")]
    Invalid { v1: Vertex, v2: Vertex },

    #[error("edge {v1} {v2} is already claimed by {owner}")]
    Claimed { v1: Vertex, v2: Vertex, owner: Player },
}

impl EdgeError {
    pub fn kind(&self) -> EdgeErrorKind {
        match self {
            EdgeError::OutOfBounds { .. } => EdgeErrorKind::OutOfBounds,
            EdgeError::Invalid { .. } => EdgeErrorKind::Invalid,
            EdgeError::Claimed { .. } => EdgeErrorKind::Claimed,
        }
    }
}

/// Accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    /// The `(0,0)-(0,0)` sentinel; nothing was changed.
    Pass,
    /// The edge now belongs to the mover; `completed` boxes (0..=2) were closed.
    Applied { edge: EdgeId, completed: u8 },
}

impl MoveStatus {
    pub fn kind(&self) -> EdgeErrorKind {
        match self {
            MoveStatus::Pass => EdgeErrorKind::Pass,
            MoveStatus::Applied { .. } => EdgeErrorKind::Valid,
        }
    }
}

/// State overwritten by one claim, enough to restore it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimRecord {
    pub edge: EdgeId,
    prev_owner: Option<Player>,
    /// (box, claimed counter, owner) before the claim; `None` when the
    /// box was already saturated and left untouched
    boxes: [Option<(BoxId, u8, Option<Player>)>; 2],
    /// Boxes whose counter reached 4 on this claim
    pub completed: [Option<BoxId>; 2],
}

impl ClaimRecord {
    /// Number of boxes closed by the claim
    #[inline]
    pub fn completed_count(&self) -> u8 {
        self.completed.iter().flatten().count() as u8
    }
}

/// Apply a move from the environment.
///
/// Steps, in order: pass sentinel, bounds check, geometry lookup,
/// re-claim policy, then the claim itself. Every failure happens before
/// the first write.
///
/// # Example
///
/// ```
/// use dots::board::{Board, Player, Vertex};
/// use dots::rules::{apply_move, MoveStatus};
///
/// let mut board = Board::new();
/// let status = apply_move(&mut board, Player::A, Vertex::new(0, 0), Vertex::new(1, 0)).unwrap();
/// assert!(matches!(status, MoveStatus::Applied { completed: 0, .. }));
/// assert_eq!(board.box_at(0, 0).unwrap().claimed(), 1);
/// ```
pub fn apply_move(
    board: &mut Board,
    player: Player,
    v1: Vertex,
    v2: Vertex,
) -> Result<MoveStatus, EdgeError> {
    if v1.is_origin() && v2.is_origin() {
        return Ok(MoveStatus::Pass);
    }

    if !v1.in_bounds() || !v2.in_bounds() {
        return Err(EdgeError::OutOfBounds { v1, v2 });
    }

    let id = board
        .edge_between(v1, v2)
        .ok_or(EdgeError::Invalid { v1, v2 })?;

    if let Some(owner) = board.edge(id).owner {
        return match board.policy() {
            ClaimPolicy::Reject => Err(EdgeError::Claimed { v1, v2, owner }),
            ClaimPolicy::Overwrite => {
                board.edges[id.index()].owner = Some(player);
                Ok(MoveStatus::Applied {
                    edge: id,
                    completed: 0,
                })
            }
        };
    }

    let record = claim_edge(board, id, player);
    Ok(MoveStatus::Applied {
        edge: id,
        completed: record.completed_count(),
    })
}

/// Give `id` to `player` and propagate to its one or two boxes.
///
/// Each box counter goes up by one, saturating at 4; the box whose
/// counter reaches 4 is owned by `player`. No validation: callers pass
/// open edges only.
pub fn claim_edge(board: &mut Board, id: EdgeId, player: Player) -> ClaimRecord {
    let edge = board.edges[id.index()];
    let mut record = ClaimRecord {
        edge: id,
        prev_owner: edge.owner,
        boxes: [None; 2],
        completed: [None; 2],
    };

    board.edges[id.index()].owner = Some(player);

    for (slot, bid) in edge.boxes().enumerate() {
        let gbox = &mut board.boxes[bid.index()];
        if gbox.claimed >= 4 {
            continue;
        }
        record.boxes[slot] = Some((bid, gbox.claimed, gbox.owner));
        gbox.claimed += 1;
        if gbox.claimed == 4 {
            gbox.owner = Some(player);
            record.completed[slot] = Some(bid);
        }
    }

    record
}

/// Restore the board to its state before `record`'s claim.
pub fn undo_claim(board: &mut Board, record: &ClaimRecord) {
    board.edges[record.edge.index()].owner = record.prev_owner;
    for (bid, claimed, owner) in record.boxes.iter().flatten() {
        let gbox = &mut board.boxes[bid.index()];
        gbox.claimed = *claimed;
        gbox.owner = *owner;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: i32, y: i32) -> Vertex {
        Vertex::new(x, y)
    }

    #[test]
    fn test_pass_sentinel() {
        let mut board = Board::new();
        let before = board.clone();

        let status = apply_move(&mut board, Player::B, v(0, 0), v(0, 0)).unwrap();
        assert_eq!(status, MoveStatus::Pass);
        assert_eq!(status.kind(), EdgeErrorKind::Pass);
        assert_eq!(board, before);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new();
        let before = board.clone();

        for (a, b) in [(v(9, 9), v(10, 9)), (v(-1, 0), v(0, 0)), (v(3, 10), v(3, 11))] {
            let err = apply_move(&mut board, Player::A, a, b).unwrap_err();
            assert_eq!(err.kind(), EdgeErrorKind::OutOfBounds);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_invalid_geometry() {
        let mut board = Board::new();
        let before = board.clone();

        // Diagonal, non-adjacent, and reversed orientation
        for (a, b) in [(v(0, 0), v(1, 1)), (v(0, 0), v(2, 0)), (v(1, 0), v(0, 0)), (v(4, 4), v(4, 4))] {
            let err = apply_move(&mut board, Player::A, a, b).unwrap_err();
            assert_eq!(err.kind(), EdgeErrorKind::Invalid, "{} {}", a, b);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_reclaim_rejected() {
        let mut board = Board::new();
        apply_move(&mut board, Player::A, v(2, 2), v(3, 2)).unwrap();
        let before = board.clone();

        let err = apply_move(&mut board, Player::B, v(2, 2), v(3, 2)).unwrap_err();
        assert_eq!(
            err,
            EdgeError::Claimed {
                v1: v(2, 2),
                v2: v(3, 2),
                owner: Player::A
            }
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_reclaim_overwrite_is_idempotent() {
        let mut board = Board::with_policy(ClaimPolicy::Overwrite);
        apply_move(&mut board, Player::A, v(2, 2), v(3, 2)).unwrap();

        let status = apply_move(&mut board, Player::B, v(2, 2), v(3, 2)).unwrap();
        assert!(matches!(status, MoveStatus::Applied { completed: 0, .. }));
        let id = board.edge_between(v(2, 2), v(3, 2)).unwrap();
        assert_eq!(board.edge(id).owner, Some(Player::B));
        // Counters were bumped once only
        assert_eq!(board.box_at(2, 2).unwrap().claimed(), 1);
        assert_eq!(board.box_at(2, 1).unwrap().claimed(), 1);

        apply_move(&mut board, Player::B, v(2, 2), v(3, 2)).unwrap();
        assert_eq!(board.box_at(2, 2).unwrap().claimed(), 1);
    }

    #[test]
    fn test_boundary_edge_updates_one_box() {
        let mut board = Board::new();
        apply_move(&mut board, Player::A, v(0, 0), v(1, 0)).unwrap();

        let total: u32 = board.boxes().iter().map(|b| u32::from(b.claimed())).sum();
        assert_eq!(total, 1);
        assert_eq!(board.box_at(0, 0).unwrap().claimed(), 1);
    }

    #[test]
    fn test_interior_edge_updates_two_boxes() {
        let mut board = Board::new();
        // East side of box (3,4) is the west side of box (4,4)
        apply_move(&mut board, Player::B, v(4, 4), v(4, 5)).unwrap();

        let total: u32 = board.boxes().iter().map(|b| u32::from(b.claimed())).sum();
        assert_eq!(total, 2);
        assert_eq!(board.box_at(3, 4).unwrap().claimed(), 1);
        assert_eq!(board.box_at(4, 4).unwrap().claimed(), 1);
    }

    #[test]
    fn test_fourth_edge_decides_owner() {
        let mut board = Board::new();
        apply_move(&mut board, Player::A, v(0, 0), v(1, 0)).unwrap();
        apply_move(&mut board, Player::A, v(0, 0), v(0, 1)).unwrap();
        apply_move(&mut board, Player::A, v(1, 0), v(1, 1)).unwrap();
        assert_eq!(board.box_at(0, 0).unwrap().owner(), None);

        let status = apply_move(&mut board, Player::B, v(0, 1), v(1, 1)).unwrap();
        assert!(matches!(status, MoveStatus::Applied { completed: 1, .. }));

        let gbox = board.box_at(0, 0).unwrap();
        assert_eq!(gbox.claimed(), 4);
        assert_eq!(gbox.owner(), Some(Player::B));
        // The shared south edge also counted for the box below
        assert_eq!(board.box_at(0, 1).unwrap().claimed(), 1);
        assert_eq!(board.box_at(0, 1).unwrap().owner(), None);
    }

    #[test]
    fn test_interior_edge_can_close_two_boxes() {
        let mut board = Board::new();
        // Boxes (0,0) and (1,0) share the edge (1,0)-(1,1)
        for (a, b) in [
            (v(0, 0), v(1, 0)),
            (v(0, 0), v(0, 1)),
            (v(0, 1), v(1, 1)),
            (v(1, 0), v(2, 0)),
            (v(2, 0), v(2, 1)),
            (v(1, 1), v(2, 1)),
        ] {
            apply_move(&mut board, Player::A, a, b).unwrap();
        }

        let status = apply_move(&mut board, Player::B, v(1, 0), v(1, 1)).unwrap();
        assert!(matches!(status, MoveStatus::Applied { completed: 2, .. }));
        assert_eq!(board.boxes_owned(Player::B), 2);
    }

    #[test]
    fn test_owner_iff_four_claimed() {
        let mut board = Board::new();
        let edges = board.open_edges();
        for (i, edge) in edges.iter().enumerate().step_by(3) {
            let player = if i % 2 == 0 { Player::A } else { Player::B };
            apply_move(&mut board, player, edge.v1, edge.v2).unwrap();
        }

        for gbox in board.boxes() {
            assert_eq!(gbox.owner().is_some(), gbox.claimed() == 4);
        }
    }

    #[test]
    fn test_undo_restores_exactly() {
        let mut board = Board::new();
        for (a, b) in [(v(0, 0), v(1, 0)), (v(0, 0), v(0, 1)), (v(1, 0), v(1, 1))] {
            apply_move(&mut board, Player::A, a, b).unwrap();
        }
        let before = board.clone();

        let id = board.edge_between(v(0, 1), v(1, 1)).unwrap();
        let record = claim_edge(&mut board, id, Player::B);
        assert_eq!(record.completed_count(), 1);
        assert_ne!(board, before);

        undo_claim(&mut board, &record);
        assert_eq!(board, before);
    }

    #[test]
    fn test_nested_undo() {
        let mut board = Board::new();
        let before = board.clone();
        let open = board.open_edges();

        let records: Vec<ClaimRecord> = open
            .iter()
            .take(40)
            .enumerate()
            .map(|(i, e)| {
                let player = if i % 2 == 0 { Player::A } else { Player::B };
                claim_edge(&mut board, e.id, player)
            })
            .collect();

        for record in records.iter().rev() {
            undo_claim(&mut board, record);
        }
        assert_eq!(board, before);
    }
}
