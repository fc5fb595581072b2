//! Events recorded during a turn

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, AgentKind, Coord, Turn};
use crate::entity::agent::DeathCause;

/// Something notable that happened during a turn
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColonyEvent {
    Hatched { id: AgentId, kind: AgentKind, at: Coord },
    Died { id: AgentId, kind: AgentKind, cause: DeathCause },
    FoodPickedUp { id: AgentId, at: Coord },
    FoodDelivered { id: AgentId, at: Coord },
    CellRevealed { by: AgentId, at: Coord },
    EnemySpawned { id: AgentId, at: Coord },
    PheromoneDecayed { turn: Turn },
    QueenDied { turn: Turn },
}

/// Live population by kind
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub queen_alive: bool,
    pub foragers: usize,
    pub scouts: usize,
    pub soldiers: usize,
    pub enemies: usize,
}

impl PopulationCounts {
    pub fn friendly_total(&self) -> usize {
        self.foragers + self.scouts + self.soldiers + usize::from(self.queen_alive)
    }
}

/// Result of one processed turn
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnReport {
    /// Zero-based index of the turn that was processed
    pub turn: Turn,
    pub label: String,
    pub events: Vec<ColonyEvent>,
    /// Agents removed by end-of-turn reaping
    pub reaped: usize,
    /// Population after reaping and raider arrival
    pub population: PopulationCounts,
}

impl TurnReport {
    pub fn deaths(&self) -> impl Iterator<Item = &ColonyEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, ColonyEvent::Died { .. }))
    }

    pub fn food_delivered(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ColonyEvent::FoodDelivered { .. }))
            .count()
    }

    pub fn queen_died(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, ColonyEvent::QueenDied { .. }))
    }
}
