//! A single grid location: resources, occupancy and visibility
//!
//! Every mutating operation records what changed in the cell's
//! [`ChangeSet`], which a view layer drains to stay in sync.

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, AgentKind, Coord};

/// Bitmask of cell properties changed since the last drain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ChangeSet(u8);

impl ChangeSet {
    pub const FOOD: Self = Self(1 << 0);
    pub const PHEROMONE: Self = Self(1 << 1);
    pub const QUEEN: Self = Self(1 << 2);
    pub const OCCUPANCY: Self = Self(1 << 3);
    pub const ENEMIES: Self = Self(1 << 4);
    pub const VISIBILITY: Self = Self(1 << 5);

    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for ChangeSet {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// One addressable grid location
///
/// Occupant lists hold ids only; the colony owns the agents.
#[derive(Debug, Clone)]
pub struct Cell {
    pub coord: Coord,
    food: u32,
    pheromone: u32,
    queen_present: bool,
    forager_count: u32,
    scout_count: u32,
    soldier_count: u32,
    friendlies: Vec<(AgentId, AgentKind)>,
    enemies: Vec<AgentId>,
    revealed: bool,
    changes: ChangeSet,
}

impl Cell {
    pub fn new(coord: Coord) -> Self {
        Self {
            coord,
            food: 0,
            pheromone: 0,
            queen_present: false,
            forager_count: 0,
            scout_count: 0,
            soldier_count: 0,
            friendlies: Vec::new(),
            enemies: Vec::new(),
            revealed: false,
            changes: ChangeSet::empty(),
        }
    }

    // === RESOURCES ===

    pub fn food(&self) -> u32 {
        self.food
    }

    /// Add food, saturating at `u32::MAX`
    pub fn add_food(&mut self, amount: u32) {
        self.food = self.food.saturating_add(amount);
        self.changes.insert(ChangeSet::FOOD);
    }

    /// Remove food, clamping at zero
    ///
    /// Returns false (and changes nothing) only when the cell was
    /// already empty.
    pub fn take_food(&mut self, amount: u32) -> bool {
        if self.food == 0 {
            return false;
        }
        self.food = self.food.saturating_sub(amount);
        self.changes.insert(ChangeSet::FOOD);
        true
    }

    pub fn clear_food(&mut self) {
        if self.food != 0 {
            self.food = 0;
            self.changes.insert(ChangeSet::FOOD);
        }
    }

    pub fn pheromone(&self) -> u32 {
        self.pheromone
    }

    /// Add pheromone without exceeding `cap`
    ///
    /// A cell already at or above the cap is left alone.
    pub fn deposit_pheromone(&mut self, amount: u32, cap: u32) {
        if self.pheromone >= cap {
            return;
        }
        self.pheromone = self.pheromone.saturating_add(amount).min(cap);
        self.changes.insert(ChangeSet::PHEROMONE);
    }

    /// Remove pheromone, clamping at zero
    pub fn reduce_pheromone(&mut self, amount: u32) {
        self.pheromone = self.pheromone.saturating_sub(amount);
        self.changes.insert(ChangeSet::PHEROMONE);
    }

    /// Day-boundary decay: halve, but a nonzero level never drops below 1
    pub fn decay_pheromone(&mut self) {
        if self.pheromone == 0 {
            return;
        }
        let halved = (self.pheromone / 2).max(1);
        if halved != self.pheromone {
            self.pheromone = halved;
            self.changes.insert(ChangeSet::PHEROMONE);
        }
    }

    pub fn clear_pheromone(&mut self) {
        if self.pheromone != 0 {
            self.pheromone = 0;
            self.changes.insert(ChangeSet::PHEROMONE);
        }
    }

    // === OCCUPANCY ===

    pub fn is_queen_present(&self) -> bool {
        self.queen_present
    }

    pub fn forager_count(&self) -> u32 {
        self.forager_count
    }

    pub fn scout_count(&self) -> u32 {
        self.scout_count
    }

    pub fn soldier_count(&self) -> u32 {
        self.soldier_count
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn friendly_count(&self) -> usize {
        self.friendlies.len()
    }

    /// Friendly occupants in arrival order
    pub fn friendlies(&self) -> &[(AgentId, AgentKind)] {
        &self.friendlies
    }

    /// Enemy occupants in arrival order
    pub fn enemies(&self) -> &[AgentId] {
        &self.enemies
    }

    pub fn has_friendly(&self, id: AgentId) -> bool {
        self.friendlies.iter().any(|(f, _)| *f == id)
    }

    pub fn has_enemy(&self, id: AgentId) -> bool {
        self.enemies.contains(&id)
    }

    /// Register a friendly agent. Duplicate ids are ignored.
    pub fn add_friendly(&mut self, id: AgentId, kind: AgentKind) {
        debug_assert!(kind.is_friendly());
        if self.has_friendly(id) {
            return;
        }
        self.friendlies.push((id, kind));
        self.adjust_count(kind, true);
    }

    /// Deregister a friendly agent; returns whether it was present
    pub fn remove_friendly(&mut self, id: AgentId) -> bool {
        match self.friendlies.iter().position(|(f, _)| *f == id) {
            Some(idx) => {
                let (_, kind) = self.friendlies.remove(idx);
                self.adjust_count(kind, false);
                true
            }
            None => false,
        }
    }

    /// Register an enemy agent. Duplicate ids are ignored.
    pub fn add_enemy(&mut self, id: AgentId) {
        if self.has_enemy(id) {
            return;
        }
        self.enemies.push(id);
        self.changes.insert(ChangeSet::ENEMIES);
    }

    /// Deregister an enemy agent; returns whether it was present
    pub fn remove_enemy(&mut self, id: AgentId) -> bool {
        match self.enemies.iter().position(|e| *e == id) {
            Some(idx) => {
                self.enemies.remove(idx);
                self.changes.insert(ChangeSet::ENEMIES);
                true
            }
            None => false,
        }
    }

    fn adjust_count(&mut self, kind: AgentKind, arriving: bool) {
        let counter = match kind {
            AgentKind::Queen => {
                self.queen_present = arriving;
                self.changes.insert(ChangeSet::QUEEN);
                return;
            }
            AgentKind::Forager => &mut self.forager_count,
            AgentKind::Scout => &mut self.scout_count,
            AgentKind::Soldier => &mut self.soldier_count,
            AgentKind::Enemy => return,
        };
        if arriving {
            *counter += 1;
        } else {
            *counter = counter.saturating_sub(1);
        }
        self.changes.insert(ChangeSet::OCCUPANCY);
    }

    /// Per-type counters agree with the friendly occupant list
    pub fn occupancy_consistent(&self) -> bool {
        let count = |kind: AgentKind| {
            self.friendlies.iter().filter(|(_, k)| *k == kind).count() as u32
        };
        let queens = count(AgentKind::Queen);
        count(AgentKind::Forager) == self.forager_count
            && count(AgentKind::Scout) == self.scout_count
            && count(AgentKind::Soldier) == self.soldier_count
            && (queens > 0) == self.queen_present
    }

    // === VISIBILITY ===

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Returns true if the cell was hidden before the call
    pub fn reveal(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        self.changes.insert(ChangeSet::VISIBILITY);
        true
    }

    pub fn hide(&mut self) {
        if self.revealed {
            self.revealed = false;
            self.changes.insert(ChangeSet::VISIBILITY);
        }
    }

    // === LIFECYCLE ===

    /// Zero resources and drop every occupant; visibility is untouched
    pub fn reset(&mut self) {
        self.clear_food();
        self.clear_pheromone();
        if !self.friendlies.is_empty() || self.queen_present {
            self.friendlies.clear();
            self.forager_count = 0;
            self.scout_count = 0;
            self.soldier_count = 0;
            self.queen_present = false;
            self.changes.insert(ChangeSet::OCCUPANCY | ChangeSet::QUEEN);
        }
        if !self.enemies.is_empty() {
            self.enemies.clear();
            self.changes.insert(ChangeSet::ENEMIES);
        }
    }

    /// Pending change notifications
    pub fn changes(&self) -> ChangeSet {
        self.changes
    }

    /// Take and clear the pending change notifications
    pub fn take_changes(&mut self) -> ChangeSet {
        std::mem::take(&mut self.changes)
    }

    pub fn view(&self) -> CellView {
        CellView {
            x: self.coord.x,
            y: self.coord.y,
            food: self.food,
            pheromone: self.pheromone,
            queen: self.queen_present,
            foragers: self.forager_count,
            scouts: self.scout_count,
            soldiers: self.soldier_count,
            enemies: self.enemies.len() as u32,
            revealed: self.revealed,
        }
    }
}

/// Serializable snapshot of a cell for rendering layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub x: usize,
    pub y: usize,
    pub food: u32,
    pub pheromone: u32,
    pub queen: bool,
    pub foragers: u32,
    pub scouts: u32,
    pub soldiers: u32,
    pub enemies: u32,
    pub revealed: bool,
}
