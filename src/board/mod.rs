//! Board representation for Dots and Boxes

pub mod board;
pub mod graph;


// Re-exports
pub use board::Board;
pub use graph::{Edge, GridBox, Side};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Boxes per side (9x9)
pub const GRID_SIZE: usize = 9;
pub const TOTAL_BOXES: usize = GRID_SIZE * GRID_SIZE; // 81
/// 90 horizontal + 90 vertical
pub const TOTAL_EDGES: usize = GRID_SIZE * (GRID_SIZE + 1) * 2; // 180
/// Largest vertex coordinate on either axis
pub const MAX_COORD: i32 = GRID_SIZE as i32;

/// The two sides of a game. Unowned edges and boxes are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Maximizing side
    A,
    /// Minimizing side
    B,
}

impl Player {
    /// Get the other player
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => f.write_str("A"),
            Player::B => f.write_str("B"),
        }
    }
}

/// Grid corner. Coordinates are signed so that malformed input stays
/// representable until the bounds check rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
}

impl Vertex {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Both coordinates within `[0, 9]`
    #[inline]
    pub fn in_bounds(self) -> bool {
        (0..=MAX_COORD).contains(&self.x) && (0..=MAX_COORD).contains(&self.y)
    }

    /// The `(0,0)` corner, which doubles as half of the pass sentinel
    #[inline]
    pub fn is_origin(self) -> bool {
        self.x == 0 && self.y == 0
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Dense edge index in `0..TOTAL_EDGES`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u8);

impl EdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Dense box index in `0..TOTAL_BOXES`, row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxId(pub u8);

impl BoxId {
    /// Callers keep `x` and `y` below `GRID_SIZE`.
    #[inline]
    pub(crate) fn new(x: u8, y: u8) -> Self {
        debug_assert!((x as usize) < GRID_SIZE && (y as usize) < GRID_SIZE);
        Self(y * GRID_SIZE as u8 + x)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn x(self) -> u8 {
        self.0 % GRID_SIZE as u8
    }

    #[inline]
    pub fn y(self) -> u8 {
        self.0 / GRID_SIZE as u8
    }
}
