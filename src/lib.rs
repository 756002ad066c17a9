//! Dots and Boxes decision engine
//!
//! Chooses which edge to claim next on a 9x9-box grid (10x10 dots) to
//! maximize Player A's box count:
//! - Boxes share edges with their neighbours (180 edges, 81 boxes)
//! - Claiming the fourth edge of a box gives the box to the claimer
//! - Moves from the environment are validated; search moves are not
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Vertex/edge/box graph with shared edge identity
//! - [`rules`]: Move application state machine and apply/undo
//! - [`eval`]: Static evaluation
//! - [`search`]: Alpha-beta, transposition table, iterative deepening
//! - [`engine`]: Configured search facade
//! - [`protocol`] and [`session`]: Playing against the file-based referee
//!
//! # Quick Start
//!
//! ```
//! use dots::{Board, Engine, EngineConfig, Player};
//! use dots::rules::apply_move;
//! use dots::board::Vertex;
//!
//! let mut board = Board::new();
//! let mut engine = Engine::with_config(EngineConfig {
//!     max_depth: 2,
//!     tt_size_mb: 1,
//!     ..EngineConfig::default()
//! });
//!
//! // Opponent (B) draws the top edge of box (0,0)
//! apply_move(&mut board, Player::B, Vertex::new(0, 0), Vertex::new(1, 0)).unwrap();
//!
//! // Engine answers as A
//! if let Some(edge) = engine.choose_move(&board, Player::A).best_move {
//!     apply_move(&mut board, Player::A, edge.v1, edge.v2).unwrap();
//!     println!("A plays {} {}", edge.v1, edge.v2);
//! }
//! assert_eq!(board.claimed_edges(), 2);
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod protocol;
pub mod rules;
pub mod search;
pub mod session;

// Re-export commonly used types for convenience
pub use board::{Board, Edge, Player, Vertex};
pub use config::{Config, SessionConfig};
pub use engine::{Engine, EngineConfig, MoveResult};
pub use error::{Error, Result};
pub use rules::{apply_move, EdgeError, EdgeErrorKind, MoveStatus};
pub use session::{Outcome, Session};
