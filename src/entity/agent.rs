//! Agent base state

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, AgentKind, Coord, Turn};
use crate::entity::forager::ForagerMemory;

/// Kind-specific payload, fixed at construction
#[derive(Debug, Clone)]
pub enum Role {
    Queen,
    Forager(ForagerMemory),
    Scout,
    Soldier,
    Enemy,
}

impl Role {
    pub fn for_kind(kind: AgentKind) -> Self {
        match kind {
            AgentKind::Queen => Self::Queen,
            AgentKind::Forager => Self::Forager(ForagerMemory::new()),
            AgentKind::Scout => Self::Scout,
            AgentKind::Soldier => Self::Soldier,
            AgentKind::Enemy => Self::Enemy,
        }
    }

    pub fn kind(&self) -> AgentKind {
        match self {
            Self::Queen => AgentKind::Queen,
            Self::Forager(_) => AgentKind::Forager,
            Self::Scout => AgentKind::Scout,
            Self::Soldier => AgentKind::Soldier,
            Self::Enemy => AgentKind::Enemy,
        }
    }
}

/// Why an agent died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    OldAge,
    Starvation,
    Killed { by: AgentId },
}

/// One simulated ant or raider
///
/// The agent's cell is derived from `position`; the colony keeps the
/// cell's occupant lists in sync on every move.
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub age: Turn,
    pub max_age: Turn,
    pub position: Coord,
    pub alive: bool,
    pub role: Role,
}

impl Agent {
    pub fn new(id: AgentId, kind: AgentKind, max_age: Turn, position: Coord) -> Self {
        Self {
            id,
            age: 0,
            max_age,
            position,
            alive: true,
            role: Role::for_kind(kind),
        }
    }

    pub fn kind(&self) -> AgentKind {
        self.role.kind()
    }

    /// Age by one turn; returns true when the agent has reached its maximum age
    pub fn grow_older(&mut self) -> bool {
        self.age += 1;
        self.age >= self.max_age
    }

    pub fn forager(&self) -> Option<&ForagerMemory> {
        match &self.role {
            Role::Forager(memory) => Some(memory),
            _ => None,
        }
    }

    pub fn forager_mut(&mut self) -> Option<&mut ForagerMemory> {
        match &mut self.role {
            Role::Forager(memory) => Some(memory),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_matches_kind() {
        for kind in [
            AgentKind::Queen,
            AgentKind::Forager,
            AgentKind::Scout,
            AgentKind::Soldier,
            AgentKind::Enemy,
        ] {
            let agent = Agent::new(AgentId(1), kind, 10, Coord::new(0, 0));
            assert_eq!(agent.kind(), kind);
            assert_eq!(agent.forager().is_some(), kind == AgentKind::Forager);
        }
    }

    #[test]
    fn test_grow_older_reports_max_age() {
        let mut agent = Agent::new(AgentId(1), AgentKind::Scout, 3, Coord::new(0, 0));
        assert!(!agent.grow_older());
        assert!(!agent.grow_older());
        assert!(agent.grow_older());
        assert_eq!(agent.age, 3);
    }
}
