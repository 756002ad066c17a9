//! Game rules for Dots and Boxes
//!
//! This module implements move application:
//! - Validation of externally supplied moves (pass, bounds, geometry, re-claim)
//! - Edge claiming with box-counter propagation
//! - Exact undo of a claim for search

pub mod claim;

// Re-exports for convenient access
pub use claim::{
    apply_move, claim_edge, undo_claim, ClaimPolicy, ClaimRecord, EdgeError, EdgeErrorKind,
    MoveStatus,
};
