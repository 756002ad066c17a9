//! Board structure: 81 boxes wired to 180 shared edges

use std::collections::HashMap;
use std::fmt;

use super::graph::{Edge, GridBox, Side};
use super::{BoxId, EdgeId, Player, Vertex, GRID_SIZE, TOTAL_BOXES, TOTAL_EDGES};
use crate::rules::ClaimPolicy;

/// Game board.
///
/// Boxes and edges are allocated once in [`Board::new`] and afterwards
/// only their ownership and counters change. Cloning produces an
/// independent snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) boxes: Vec<GridBox>,
    pub(crate) edges: Vec<Edge>,
    policy: ClaimPolicy,
}

impl Board {
    pub fn new() -> Self {
        Self::with_policy(ClaimPolicy::default())
    }

    /// Build the grid with an explicit policy for re-claimed edges.
    ///
    /// Boxes are addressed by `(row, col)`; each side's canonical vertex
    /// pair is looked up in a dedup table so that neighbouring boxes end
    /// up holding the same `EdgeId`.
    pub fn with_policy(policy: ClaimPolicy) -> Self {
        let mut boxes = Vec::with_capacity(TOTAL_BOXES);
        let mut edges: Vec<Edge> = Vec::with_capacity(TOTAL_EDGES);
        let mut by_vertices: HashMap<(Vertex, Vertex), EdgeId> = HashMap::with_capacity(TOTAL_EDGES);

        for y in 0..GRID_SIZE as u8 {
            for x in 0..GRID_SIZE as u8 {
                let bid = BoxId::new(x, y);
                let mut ids = [EdgeId(0); 4];
                let probe = GridBox::new(x, y, ids);

                for side in Side::ALL {
                    let (v1, v2) = probe.side_vertices(side);
                    let id = match by_vertices.get(&(v1, v2)) {
                        Some(&id) => {
                            edges[id.index()].box2 = Some(bid);
                            id
                        }
                        None => {
                            let id = EdgeId(edges.len() as u8);
                            edges.push(Edge::new(id, v1, v2, bid));
                            by_vertices.insert((v1, v2), id);
                            id
                        }
                    };
                    ids[side.index()] = id;
                }

                boxes.push(GridBox::new(x, y, ids));
            }
        }

        debug_assert_eq!(edges.len(), TOTAL_EDGES);
        Self {
            boxes,
            edges,
            policy,
        }
    }

    #[inline]
    pub fn policy(&self) -> ClaimPolicy {
        self.policy
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn get_box(&self, id: BoxId) -> &GridBox {
        &self.boxes[id.index()]
    }

    /// Box whose top-left corner is `(x, y)`; `None` outside the 9x9 grid.
    #[inline]
    pub fn box_at(&self, x: u8, y: u8) -> Option<&GridBox> {
        if (x as usize) < GRID_SIZE && (y as usize) < GRID_SIZE {
            Some(self.cell(x, y))
        } else {
            None
        }
    }

    /// Unchecked grid lookup for callers iterating `0..GRID_SIZE`
    #[inline]
    pub(crate) fn cell(&self, x: u8, y: u8) -> &GridBox {
        self.get_box(BoxId::new(x, y))
    }

    #[inline]
    pub fn boxes(&self) -> &[GridBox] {
        &self.boxes
    }

    /// Edge of `gbox` on the given side
    #[inline]
    pub fn edge_of(&self, gbox: &GridBox, side: Side) -> &Edge {
        self.edge(gbox.edge(side))
    }

    /// Resolve the edge joining `v1` and `v2`.
    ///
    /// Scans boxes for one whose corners include both vertices and asks
    /// it for the matching side. Either bordering box yields the same
    /// edge, so the first match decides. Returns `None` for pairs that
    /// are not a side of any box, including reversed endpoints.
    pub fn edge_between(&self, v1: Vertex, v2: Vertex) -> Option<EdgeId> {
        self.boxes
            .iter()
            .find(|b| b.has_vertices(v1, v2))
            .and_then(|b| b.edge_with_vertices(v1, v2))
    }

    #[inline]
    pub fn is_open(&self, id: EdgeId) -> bool {
        self.edges[id.index()].is_open()
    }

    /// Distinct unclaimed edges, in box-major N/E/S/W order.
    ///
    /// Interior edges are reachable from two boxes; the `seen` table is
    /// keyed by `EdgeId`, which is one-to-one with the vertex pair.
    pub fn open_edges(&self) -> Vec<Edge> {
        let mut seen = [false; TOTAL_EDGES];
        let mut open = Vec::with_capacity(TOTAL_EDGES);

        for gbox in &self.boxes {
            for id in gbox.edges {
                if seen[id.index()] {
                    continue;
                }
                seen[id.index()] = true;
                let edge = self.edges[id.index()];
                if edge.is_open() {
                    open.push(edge);
                }
            }
        }

        open
    }

    /// Number of boxes owned by `player`
    pub fn boxes_owned(&self, player: Player) -> usize {
        self.boxes.iter().filter(|b| b.owner == Some(player)).count()
    }

    /// Number of claimed edges
    pub fn claimed_edges(&self) -> usize {
        self.edges.iter().filter(|e| !e.is_open()).count()
    }

    /// Every edge claimed
    pub fn is_complete(&self) -> bool {
        self.edges.iter().all(|e| !e.is_open())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |owner: Option<Player>, drawn: &'static str| if owner.is_some() { drawn } else { "   " };

        for y in 0..=GRID_SIZE {
            // Dot row: north edges, or the south edges of the last row
            for x in 0..GRID_SIZE {
                let owner = if y < GRID_SIZE {
                    self.edge_of(self.cell(x as u8, y as u8), Side::North).owner
                } else {
                    self.edge_of(self.cell(x as u8, (y - 1) as u8), Side::South).owner
                };
                write!(f, ".{}", mark(owner, "---"))?;
            }
            writeln!(f, ".")?;

            if y == GRID_SIZE {
                break;
            }

            for x in 0..GRID_SIZE {
                let gbox = self.cell(x as u8, y as u8);
                let west = if self.edge_of(gbox, Side::West).is_open() { ' ' } else { '|' };
                let label = gbox.owner.map_or(' ', |p| if p == Player::A { 'A' } else { 'B' });
                write!(f, "{} {} ", west, label)?;
            }
            let east = self.edge_of(self.cell(GRID_SIZE as u8 - 1, y as u8), Side::East);
            writeln!(f, "{}", if east.is_open() { ' ' } else { '|' })?;
        }
        Ok(())
    }
}
