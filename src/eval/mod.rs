//! Evaluation module for Dots and Boxes positions
//!
//! Scores a board from Player A's perspective:
//! - Box difference, weighted to dominate everything else
//! - A small penalty for every box one edge away from completion

pub mod heuristic;

pub use heuristic::{evaluate, evaluate_with, EvalWeights, BOX_WEIGHT, THREE_EDGE_PENALTY};
