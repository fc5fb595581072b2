//! Colony - owns the grid, every agent, and the turn counter

use std::collections::VecDeque;

use ahash::AHashMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::colony::events::{ColonyEvent, PopulationCounts};
use crate::core::config::ColonyConfig;
use crate::core::error::{ColonyError, Result};
use crate::core::status::{StatusMessage, StatusSink, TracingStatus};
use crate::core::types::{AgentId, AgentKind, Coord, Turn};
use crate::entity::agent::{Agent, DeathCause};
use crate::world::cell::Cell;
use crate::world::map::ColonyGrid;

pub const QUEEN_DEATH_MESSAGE: &str = "Queen is dead, simulation over!";

/// The simulation state for one colony run
///
/// Agents live in an id-keyed arena. Rosters keep per-kind processing
/// order, and cells hold ids only. Killing an agent flips its liveness
/// flag and queues it; removal happens in one pass at the end of the turn.
pub struct Colony {
    config: ColonyConfig,
    pub grid: ColonyGrid,
    agents: AHashMap<AgentId, Agent>,
    queen: Option<AgentId>,
    foragers: Vec<AgentId>,
    scouts: Vec<AgentId>,
    soldiers: Vec<AgentId>,
    enemies: Vec<AgentId>,
    next_id: u32,
    pub(crate) turn: Turn,
    pending_dead: VecDeque<AgentId>,
    queen_dead: bool,
    /// Random number generator (deterministic when seeded)
    pub rng: ChaCha8Rng,
    status: Box<dyn StatusSink>,
    events: Vec<ColonyEvent>,
}

impl Colony {
    /// Empty colony: a fresh grid and no agents
    pub fn new(config: ColonyConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::debug!(seed, "creating colony");

        Ok(Self {
            grid: ColonyGrid::new(config.grid.width, config.grid.height),
            config,
            agents: AHashMap::new(),
            queen: None,
            foragers: Vec::new(),
            scouts: Vec::new(),
            soldiers: Vec::new(),
            enemies: Vec::new(),
            next_id: 0,
            turn: 0,
            pending_dead: VecDeque::new(),
            queen_dead: false,
            rng: ChaCha8Rng::seed_from_u64(seed),
            status: Box::new(TracingStatus),
            events: Vec::new(),
        })
    }

    /// Colony seeded with the default population
    pub fn with_default_population(config: ColonyConfig) -> Result<Self> {
        let mut colony = Self::new(config)?;
        colony.reset()?;
        Ok(colony)
    }

    /// Route status messages to a host
    pub fn set_status_sink(&mut self, sink: Box<dyn StatusSink>) {
        self.status = sink;
    }

    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }

    /// Index of the next turn to be processed
    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn is_queen_dead(&self) -> bool {
        self.queen_dead
    }

    pub fn queen_id(&self) -> Option<AgentId> {
        self.queen
    }

    pub fn queen(&self) -> Option<&Agent> {
        self.queen.and_then(|id| self.agents.get(&id))
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub(crate) fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn is_alive(&self, id: AgentId) -> bool {
        self.agents.get(&id).is_some_and(|a| a.alive)
    }

    pub fn foragers(&self) -> &[AgentId] {
        &self.foragers
    }

    pub fn scouts(&self) -> &[AgentId] {
        &self.scouts
    }

    pub fn soldiers(&self) -> &[AgentId] {
        &self.soldiers
    }

    pub fn enemies(&self) -> &[AgentId] {
        &self.enemies
    }

    /// Agents flagged dead but not yet reaped
    pub fn pending_dead(&self) -> usize {
        self.pending_dead.len()
    }

    pub fn population(&self) -> PopulationCounts {
        let live = |ids: &[AgentId]| ids.iter().filter(|id| self.is_alive(**id)).count();
        PopulationCounts {
            queen_alive: self.queen.is_some_and(|id| self.is_alive(id)),
            foragers: live(&self.foragers),
            scouts: live(&self.scouts),
            soldiers: live(&self.soldiers),
            enemies: live(&self.enemies),
        }
    }

    /// Return and post-increment the id counter
    pub fn next_id(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create an agent of `kind` at `at` with the configured lifespan
    pub fn spawn(&mut self, kind: AgentKind, at: Coord) -> Result<AgentId> {
        let max_age = match kind {
            AgentKind::Queen => self.config.queen_max_age(),
            AgentKind::Enemy => self.config.enemy_max_age(),
            _ => self.config.worker_max_age(),
        };
        let id = self.next_id();
        self.add_agent(Agent::new(id, kind, max_age, at))
    }

    /// Insert an agent into its roster and its cell
    pub fn add_agent(&mut self, agent: Agent) -> Result<AgentId> {
        let id = agent.id;
        let kind = agent.kind();
        register(self.grid.cell_mut(agent.position)?, id, kind);

        match kind {
            AgentKind::Queen => {
                self.queen = Some(id);
                self.queen_dead = false;
            }
            AgentKind::Forager => self.foragers.push(id),
            AgentKind::Scout => self.scouts.push(id),
            AgentKind::Soldier => self.soldiers.push(id),
            AgentKind::Enemy => self.enemies.push(id),
        }
        self.agents.insert(id, agent);
        Ok(id)
    }

    /// Relocate an agent, keeping both cells' occupant lists in sync
    pub fn move_agent(&mut self, id: AgentId, to: Coord) -> Result<()> {
        // Validate the destination before touching anything
        self.grid.cell(to)?;

        let agent = self
            .agents
            .get_mut(&id)
            .ok_or(ColonyError::AgentNotFound(id))?;
        let kind = agent.kind();

        deregister(self.grid.cell_mut(agent.position)?, id, kind);
        agent.position = to;
        register(self.grid.cell_mut(to)?, id, kind);

        tracing::trace!(%id, %to, "moved {}", kind.name());
        Ok(())
    }

    /// Advance an agent's age; kills it on reaching its maximum age
    ///
    /// Returns true if the agent is dead afterwards.
    pub fn age_agent(&mut self, id: AgentId) -> Result<bool> {
        let agent = self
            .agents
            .get_mut(&id)
            .ok_or(ColonyError::AgentNotFound(id))?;
        if agent.grow_older() {
            self.kill(id, DeathCause::OldAge)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Flag an agent dead and queue it for end-of-turn removal
    ///
    /// Killing an already-dead agent has no effect. A dying forager drops
    /// what it carries and forgets its path. A dying queen is not queued:
    /// she leaves her cell at once and the simulation ends.
    ///
    /// Returns true if this call did the killing.
    pub fn kill(&mut self, id: AgentId, cause: DeathCause) -> Result<bool> {
        let agent = self
            .agents
            .get_mut(&id)
            .ok_or(ColonyError::AgentNotFound(id))?;
        if !agent.alive {
            return Ok(false);
        }
        agent.alive = false;
        let kind = agent.kind();
        let position = agent.position;

        if let Some(memory) = agent.forager_mut() {
            let carried = std::mem::take(&mut memory.carrying);
            memory.clear_path();
            if carried > 0 {
                self.grid.cell_mut(position)?.add_food(carried);
            }
        }

        tracing::debug!(%id, ?cause, "{} died at {}", kind.name(), position);
        self.events.push(ColonyEvent::Died { id, kind, cause });

        if kind == AgentKind::Queen {
            self.grid.cell_mut(position)?.remove_friendly(id);
            self.queen_dead = true;
            self.events.push(ColonyEvent::QueenDied { turn: self.turn });
            tracing::info!(turn = self.turn, "{}", QUEEN_DEATH_MESSAGE);
            self.publish(StatusMessage::SimulationOver(QUEEN_DEATH_MESSAGE.to_string()));
        } else {
            self.pending_dead.push_back(id);
        }
        Ok(true)
    }

    /// Remove every queued dead agent from its roster, its cell and the arena
    pub fn reap(&mut self) -> Result<usize> {
        let mut reaped = 0;
        while let Some(id) = self.pending_dead.pop_front() {
            let Some(agent) = self.agents.remove(&id) else {
                continue;
            };
            let kind = agent.kind();
            deregister(self.grid.cell_mut(agent.position)?, id, kind);

            let roster = match kind {
                AgentKind::Forager => &mut self.foragers,
                AgentKind::Scout => &mut self.scouts,
                AgentKind::Soldier => &mut self.soldiers,
                AgentKind::Enemy => &mut self.enemies,
                AgentKind::Queen => continue,
            };
            roster.retain(|r| *r != id);
            reaped += 1;
        }
        Ok(reaped)
    }

    /// Live enemies standing on a cell, in arrival order
    pub fn live_enemies_at(&self, at: Coord) -> Result<Vec<AgentId>> {
        Ok(self
            .grid
            .cell(at)?
            .enemies()
            .iter()
            .copied()
            .filter(|id| self.is_alive(*id))
            .collect())
    }

    /// Live friendly agents standing on a cell, in arrival order
    pub fn live_friendlies_at(&self, at: Coord) -> Result<Vec<AgentId>> {
        Ok(self
            .grid
            .cell(at)?
            .friendlies()
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| self.is_alive(*id))
            .collect())
    }

    /// Uniform draw in [0, 100) compared against a percentage
    pub(crate) fn roll_percent(&mut self, percent: u32) -> bool {
        self.rng.gen_range(0..100) < percent
    }

    pub(crate) fn record(&mut self, event: ColonyEvent) {
        self.events.push(event);
    }

    pub(crate) fn take_events(&mut self) -> Vec<ColonyEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn publish(&mut self, message: StatusMessage) {
        self.status.publish(message);
    }

    /// Drop every agent and all cell contents without ceremony
    pub(crate) fn clear_population(&mut self) {
        self.agents.clear();
        self.queen = None;
        self.foragers.clear();
        self.scouts.clear();
        self.soldiers.clear();
        self.enemies.clear();
        self.pending_dead.clear();
        self.events.clear();
        self.queen_dead = false;
        self.grid.clear_contents();
    }

    /// Every cell's counters match its occupants, and every live agent
    /// is listed in the cell it stands on
    pub fn occupancy_consistent(&self) -> bool {
        if !self.grid.iter().all(Cell::occupancy_consistent) {
            return false;
        }
        self.agents.values().filter(|a| a.alive).all(|agent| {
            self.grid.cell(agent.position).is_ok_and(|cell| {
                if agent.kind().is_friendly() {
                    cell.has_friendly(agent.id)
                } else {
                    cell.has_enemy(agent.id)
                }
            })
        })
    }
}

fn register(cell: &mut Cell, id: AgentId, kind: AgentKind) {
    if kind.is_friendly() {
        cell.add_friendly(id, kind);
    } else {
        cell.add_enemy(id);
    }
}

fn deregister(cell: &mut Cell, id: AgentId, kind: AgentKind) {
    if kind.is_friendly() {
        cell.remove_friendly(id);
    } else {
        cell.remove_enemy(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colony() -> Colony {
        Colony::new(ColonyConfig::seeded(42)).unwrap()
    }

    #[test]
    fn test_next_id_is_monotonic() {
        let mut colony = colony();
        assert_eq!(colony.next_id(), AgentId(0));
        assert_eq!(colony.next_id(), AgentId(1));
        let spawned = colony.spawn(AgentKind::Scout, Coord::new(1, 1)).unwrap();
        assert_eq!(spawned, AgentId(2));
    }

    #[test]
    fn test_add_agent_registers_in_cell_and_roster() {
        let mut colony = colony();
        let at = Coord::new(4, 4);
        let forager = colony.spawn(AgentKind::Forager, at).unwrap();
        let enemy = colony.spawn(AgentKind::Enemy, at).unwrap();

        let cell = colony.grid.cell(at).unwrap();
        assert!(cell.has_friendly(forager));
        assert!(cell.has_enemy(enemy));
        assert_eq!(cell.forager_count(), 1);
        assert_eq!(colony.foragers(), &[forager]);
        assert_eq!(colony.enemies(), &[enemy]);
        assert!(colony.occupancy_consistent());
    }

    #[test]
    fn test_spawn_out_of_bounds_fails() {
        let mut colony = colony();
        let result = colony.spawn(AgentKind::Scout, Coord::new(27, 0));
        assert!(matches!(result, Err(ColonyError::OutOfBounds { .. })));
        assert!(colony.scouts().is_empty());
    }

    #[test]
    fn test_move_keeps_cells_in_sync() {
        let mut colony = colony();
        let from = Coord::new(5, 5);
        let to = Coord::new(6, 5);
        let scout = colony.spawn(AgentKind::Scout, from).unwrap();

        colony.move_agent(scout, to).unwrap();
        assert!(!colony.grid.cell(from).unwrap().has_friendly(scout));
        assert!(colony.grid.cell(to).unwrap().has_friendly(scout));
        assert_eq!(colony.agent(scout).unwrap().position, to);
        assert!(colony.occupancy_consistent());

        let bad = colony.move_agent(scout, Coord::new(100, 0));
        assert!(bad.is_err());
        assert_eq!(colony.agent(scout).unwrap().position, to);
    }

    #[test]
    fn test_kill_is_deferred_and_idempotent() {
        let mut colony = colony();
        let at = Coord::new(2, 2);
        let soldier = colony.spawn(AgentKind::Soldier, at).unwrap();

        assert!(colony.kill(soldier, DeathCause::OldAge).unwrap());
        assert!(!colony.kill(soldier, DeathCause::OldAge).unwrap());
        assert_eq!(colony.pending_dead(), 1);

        // Still occupying its cell until reaped
        assert!(!colony.is_alive(soldier));
        assert!(colony.grid.cell(at).unwrap().has_friendly(soldier));

        assert_eq!(colony.reap().unwrap(), 1);
        assert!(colony.agent(soldier).is_none());
        assert!(colony.soldiers().is_empty());
        assert_eq!(colony.grid.cell(at).unwrap().soldier_count(), 0);
        assert_eq!(colony.reap().unwrap(), 0);
    }

    #[test]
    fn test_dying_forager_drops_food() {
        let mut colony = colony();
        let at = Coord::new(3, 7);
        let forager = colony.spawn(AgentKind::Forager, at).unwrap();
        {
            let memory = colony.agent_mut(forager).unwrap().forager_mut().unwrap();
            memory.carrying = 1;
            memory.trail.push(Coord::new(3, 6));
        }

        colony.kill(forager, DeathCause::Killed { by: AgentId(99) }).unwrap();
        assert_eq!(colony.grid.cell(at).unwrap().food(), 1);
        let memory = colony.agent(forager).unwrap().forager().unwrap();
        assert_eq!(memory.carrying, 0);
        assert!(memory.trail.is_empty());
    }

    #[test]
    fn test_queen_death_is_immediate() {
        let mut colony = colony();
        let center = colony.grid.center();
        let queen = colony.spawn(AgentKind::Queen, center).unwrap();
        assert!(colony.grid.cell(center).unwrap().is_queen_present());

        colony.kill(queen, DeathCause::Starvation).unwrap();
        assert!(colony.is_queen_dead());
        assert_eq!(colony.pending_dead(), 0);
        assert!(!colony.grid.cell(center).unwrap().is_queen_present());
        assert!(!colony.population().queen_alive);
    }

    #[test]
    fn test_age_agent_kills_at_max_age() {
        let mut colony = colony();
        let scout = colony.next_id();
        colony
            .add_agent(Agent::new(scout, AgentKind::Scout, 2, Coord::new(1, 1)))
            .unwrap();

        assert!(!colony.age_agent(scout).unwrap());
        assert!(colony.age_agent(scout).unwrap());
        assert!(!colony.is_alive(scout));
    }

    #[test]
    fn test_unknown_agent() {
        let mut colony = colony();
        assert!(matches!(
            colony.kill(AgentId(500), DeathCause::OldAge),
            Err(ColonyError::AgentNotFound(AgentId(500)))
        ));
    }
}
