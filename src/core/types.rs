//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for agents
///
/// Assigned monotonically by the colony and never reused within its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Simulation turn counter
pub type Turn = u64;

/// Grid coordinate, addressed as (x, y) with the origin in the top-left corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Apply a signed offset, returning None when either axis would go negative
    pub fn offset(&self, dx: i32, dy: i32) -> Option<Self> {
        let x = self.x as i64 + dx as i64;
        let y = self.y as i64 + dy as i64;
        if x < 0 || y < 0 {
            return None;
        }
        Some(Self::new(x as usize, y as usize))
    }

    /// Chebyshev distance (king moves on the grid)
    pub fn chebyshev(&self, other: &Self) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Agent classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentKind {
    Queen,
    Forager,
    Scout,
    Soldier,
    /// Hostile raider
    Enemy,
}

impl AgentKind {
    /// Everything except raiders belongs to the colony
    pub fn is_friendly(&self) -> bool {
        !matches!(self, Self::Enemy)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Queen => "queen",
            Self::Forager => "forager",
            Self::Scout => "scout",
            Self::Soldier => "soldier",
            Self::Enemy => "enemy",
        }
    }
}
