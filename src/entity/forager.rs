//! Forager path memory
//!
//! A forager remembers how it got where it is so it can walk the same
//! path home, and which cells it has already entered this excursion so
//! it doesn't circle.

use ahash::AHashSet;

use crate::core::types::Coord;

/// Round-trip state of a forager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForagerMode {
    /// Empty-handed, searching for food
    Foraging,
    /// Carrying one unit back to the queen
    Returning,
}

/// Cells entered during one outbound excursion, plus the steps between them
#[derive(Debug, Clone, Default)]
pub struct VisitedGraph {
    nodes: AHashSet<Coord>,
    edges: Vec<(Coord, Coord)>,
}

impl VisitedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cell as visited, linked from `from`
    ///
    /// Returns false if the cell was already visited. The edge is only
    /// recorded once the graph holds more than one node.
    pub fn register(&mut self, node: Coord, from: Option<Coord>) -> bool {
        if !self.nodes.insert(node) {
            return false;
        }
        if self.nodes.len() > 1 {
            if let Some(from) = from {
                self.edges.push((from, node));
            }
        }
        true
    }

    pub fn contains(&self, node: Coord) -> bool {
        self.nodes.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edges(&self) -> &[(Coord, Coord)] {
        &self.edges
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}

/// Per-forager state beyond the agent base
#[derive(Debug, Clone, Default)]
pub struct ForagerMemory {
    /// 0 or 1
    pub carrying: u32,
    /// Cell occupied before the last move
    pub last: Option<Coord>,
    /// Breadcrumbs back to the queen, most recent on top
    pub trail: Vec<Coord>,
    pub visited: VisitedGraph,
}

impl ForagerMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ForagerMode {
        if self.carrying == 0 {
            ForagerMode::Foraging
        } else {
            ForagerMode::Returning
        }
    }

    /// Drop the breadcrumb loop that ends at `position`
    ///
    /// If `position` already appears on the trail, everything from its
    /// most recent occurrence upward is discarded: the walk around the
    /// loop is not needed to get home.
    pub fn cut_loop(&mut self, position: Coord) -> bool {
        match self.trail.iter().rposition(|c| *c == position) {
            Some(idx) => {
                self.trail.truncate(idx);
                true
            }
            None => false,
        }
    }

    /// Forget the excursion; called on arrival at the queen and on death
    pub fn clear_path(&mut self) {
        self.trail.clear();
        self.visited.clear();
        self.last = None;
    }
}
