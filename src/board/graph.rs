//! Edges and boxes: the nodes of the board graph

use super::{BoxId, EdgeId, Player, Vertex};

/// One of the four sides of a box, in the order edges are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    North,
    East,
    South,
    West,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::East, Side::South, Side::West];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A claimable segment between two vertices.
///
/// Interior edges are shared by two boxes (`box2` is set); boundary
/// edges belong to `box1` only. Two edges are the same edge when their
/// endpoints match, which the board builder guarantees maps to a
/// single `EdgeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub v1: Vertex,
    pub v2: Vertex,
    pub owner: Option<Player>,
    pub box1: BoxId,
    pub box2: Option<BoxId>,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, v1: Vertex, v2: Vertex, box1: BoxId) -> Self {
        Self {
            id,
            v1,
            v2,
            owner: None,
            box1,
            box2: None,
        }
    }

    /// Endpoint identity used for dedup and lookup
    #[inline]
    pub fn vertices(&self) -> (Vertex, Vertex) {
        (self.v1, self.v2)
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.owner.is_none()
    }

    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.box2.is_none()
    }

    /// The one or two boxes bordering this edge
    pub fn boxes(&self) -> impl Iterator<Item = BoxId> {
        std::iter::once(self.box1).chain(self.box2)
    }
}

/// Corner vertices of a box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corners {
    pub top_left: Vertex,
    pub top_right: Vertex,
    pub bottom_left: Vertex,
    pub bottom_right: Vertex,
}

/// A unit cell bounded by four edges.
///
/// `owner` is set by whichever player supplies the fourth claimed edge,
/// never by a vote over the edges' owners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBox {
    pub x: u8,
    pub y: u8,
    pub(crate) edges: [EdgeId; 4],
    pub(crate) claimed: u8,
    pub(crate) owner: Option<Player>,
}

impl GridBox {
    pub(crate) fn new(x: u8, y: u8, edges: [EdgeId; 4]) -> Self {
        Self {
            x,
            y,
            edges,
            claimed: 0,
            owner: None,
        }
    }

    #[inline]
    pub fn id(&self) -> BoxId {
        BoxId::new(self.x, self.y)
    }

    #[inline]
    pub fn edge(&self, side: Side) -> EdgeId {
        self.edges[side.index()]
    }

    #[inline]
    pub fn edges(&self) -> [EdgeId; 4] {
        self.edges
    }

    /// Claimed-edge counter, `0..=4`
    #[inline]
    pub fn claimed(&self) -> u8 {
        self.claimed
    }

    #[inline]
    pub fn owner(&self) -> Option<Player> {
        self.owner
    }

    pub fn corners(&self) -> Corners {
        let (x, y) = (i32::from(self.x), i32::from(self.y));
        Corners {
            top_left: Vertex::new(x, y),
            top_right: Vertex::new(x + 1, y),
            bottom_left: Vertex::new(x, y + 1),
            bottom_right: Vertex::new(x + 1, y + 1),
        }
    }

    /// Canonical endpoints of the edge on `side`
    pub fn side_vertices(&self, side: Side) -> (Vertex, Vertex) {
        let c = self.corners();
        match side {
            Side::North => (c.top_left, c.top_right),
            Side::East => (c.top_right, c.bottom_right),
            Side::South => (c.bottom_left, c.bottom_right),
            Side::West => (c.top_left, c.bottom_left),
        }
    }

    /// Whether both vertices are corners of this box, in either order.
    pub fn has_vertices(&self, v1: Vertex, v2: Vertex) -> bool {
        let c = self.corners();
        let is_corner =
            |v: Vertex| v == c.top_left || v == c.top_right || v == c.bottom_left || v == c.bottom_right;
        is_corner(v1) && is_corner(v2)
    }

    /// Edge whose canonical endpoints are exactly `(v1, v2)`.
    ///
    /// Order-sensitive: reversed endpoints and diagonals resolve to `None`.
    pub fn edge_with_vertices(&self, v1: Vertex, v2: Vertex) -> Option<EdgeId> {
        Side::ALL
            .into_iter()
            .find(|&side| self.side_vertices(side) == (v1, v2))
            .map(|side| self.edge(side))
    }
}
