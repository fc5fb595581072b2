//! Population seeding: default reset, isolated scenarios, raiders
//!
//! Every seeder tears down the current population and battlefield first.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::colony::events::ColonyEvent;
use crate::colony::state::Colony;
use crate::core::error::Result;
use crate::core::status::StatusMessage;
use crate::core::types::{AgentId, AgentKind, Coord};

/// Starting setups a host can load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scenario {
    /// Full default population
    Normal,
    /// Queen and scattered food only
    QueenOnly,
    /// Queen and scouts
    ScoutOnly,
    /// Queen, foragers, food, and four isolated revealed cells
    ForagerOnly,
    /// Queen, soldiers, and a pack of raiders next to them
    SoldierOnly,
}

impl Scenario {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::QueenOnly => "queen",
            Self::ScoutOnly => "scout",
            Self::ForagerOnly => "forager",
            Self::SoldierOnly => "soldier",
        }
    }
}

impl std::str::FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" | "default" => Ok(Self::Normal),
            "queen" => Ok(Self::QueenOnly),
            "scout" => Ok(Self::ScoutOnly),
            "forager" => Ok(Self::ForagerOnly),
            "soldier" => Ok(Self::SoldierOnly),
            other => Err(format!("unknown scenario '{}'", other)),
        }
    }
}

impl Colony {
    /// Kill every agent, zero every cell, and signal that the run stopped
    pub fn destroy(&mut self) {
        self.clear_population();
        self.publish(StatusMessage::Cleared);
        tracing::info!("colony destroyed");
    }

    /// Rebuild the default population and terrain
    pub fn reset(&mut self) -> Result<()> {
        self.seed_scenario(Scenario::Normal)
    }

    /// Replace the current population with one of the starting setups
    pub fn seed_scenario(&mut self, scenario: Scenario) -> Result<()> {
        self.destroy();
        self.turn = 0;
        self.grid.reset_visibility();

        let queen = self.seed_queen()?;
        let home = self.agent_position(queen);
        let counts = self.config().scenarios.clone();

        match scenario {
            Scenario::Normal => {
                let population = self.config().population.clone();
                self.spawn_many(AgentKind::Soldier, population.soldiers, home)?;
                self.spawn_many(AgentKind::Forager, population.foragers, home)?;
                self.spawn_many(AgentKind::Scout, population.scouts, home)?;
                self.scatter_food()?;
            }
            Scenario::QueenOnly => {
                self.scatter_food()?;
            }
            Scenario::ScoutOnly => {
                self.spawn_many(AgentKind::Scout, counts.scouts, home)?;
            }
            Scenario::ForagerOnly => {
                self.scatter_food()?;
                self.spawn_many(AgentKind::Forager, counts.foragers, home)?;
                // Isolated pockets two cells out on each diagonal
                for (dx, dy) in [(-2, -2), (2, -2), (-2, 2), (2, 2)] {
                    if let Some(corner) = self.grid.offset(home, dx, dy) {
                        self.grid.reveal(corner)?;
                    }
                }
            }
            Scenario::SoldierOnly => {
                self.spawn_many(AgentKind::Soldier, counts.soldiers, home)?;
                let camp = self.grid.offset(home, -1, 1).unwrap_or(home);
                self.spawn_many(AgentKind::Enemy, counts.enemies, camp)?;
            }
        }

        tracing::info!(
            scenario = scenario.name(),
            agents = self.agents().count(),
            food = self.grid.total_food(),
            "colony seeded"
        );
        Ok(())
    }

    /// Place the queen at the center with her starting food
    pub fn seed_queen(&mut self) -> Result<AgentId> {
        let center = self.grid.center();
        let food = self.config().population.queen_food;
        let queen = self.spawn(AgentKind::Queen, center)?;
        self.grid.cell_mut(center)?.add_food(food);
        Ok(queen)
    }

    fn spawn_many(&mut self, kind: AgentKind, count: usize, at: Coord) -> Result<()> {
        for _ in 0..count {
            self.spawn(kind, at)?;
        }
        Ok(())
    }

    fn agent_position(&self, id: AgentId) -> Coord {
        self.agent(id)
            .map(|a| a.position)
            .unwrap_or_else(|| self.grid.center())
    }

    /// Drop random food piles across the map, never on the queen's cell
    pub fn scatter_food(&mut self) -> Result<()> {
        let food = self.config().food.clone();
        let queen_at = self.queen().map(|q| q.position);

        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let at = Coord::new(x, y);
                if !self.roll_percent(food.scatter_percent) || Some(at) == queen_at {
                    continue;
                }
                let amount = self.rng.gen_range(food.min_amount..=food.max_amount);
                self.grid.cell_mut(at)?.add_food(amount);
            }
        }
        Ok(())
    }

    /// Uniformly chosen edge cell
    ///
    /// Pick x first; an interior x forces y onto the top or bottom row,
    /// while x on the left or right edge leaves y free.
    pub fn perimeter_coord(&mut self) -> Coord {
        let (width, height) = (self.grid.width(), self.grid.height());
        let x = self.rng.gen_range(0..width);
        let y = if x > 0 && x + 1 < width {
            if self.rng.gen_bool(0.5) {
                height - 1
            } else {
                0
            }
        } else {
            self.rng.gen_range(0..height)
        };
        Coord::new(x, y)
    }

    /// Spawn one raider somewhere on the perimeter
    pub fn spawn_perimeter_enemy(&mut self) -> Result<AgentId> {
        let at = self.perimeter_coord();
        let id = self.spawn(AgentKind::Enemy, at)?;
        tracing::info!(%id, %at, "raider arrived");
        self.record(ColonyEvent::EnemySpawned { id, at });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ColonyConfig;

    fn colony() -> Colony {
        Colony::new(ColonyConfig::seeded(7)).unwrap()
    }

    #[test]
    fn test_reset_seeds_default_population() {
        let mut colony = colony();
        colony.reset().unwrap();

        let population = colony.population();
        assert!(population.queen_alive);
        assert_eq!(population.soldiers, 10);
        assert_eq!(population.foragers, 50);
        assert_eq!(population.scouts, 4);
        assert_eq!(population.enemies, 0);

        let center = colony.grid.center();
        let home = colony.grid.cell(center).unwrap();
        assert_eq!(home.food(), 1000);
        assert!(home.is_queen_present());
        assert_eq!(home.friendly_count(), 65);
        assert_eq!(colony.grid.revealed_count(), 9);
        assert!(colony.occupancy_consistent());
    }

    #[test]
    fn test_scattered_food_within_range() {
        let mut colony = colony();
        colony.reset().unwrap();
        let center = colony.grid.center();

        let piles: Vec<u32> = colony
            .grid
            .iter()
            .filter(|c| c.coord != center && c.food() > 0)
            .map(|c| c.food())
            .collect();
        assert!(!piles.is_empty());
        assert!(piles.iter().all(|f| (500..=1000).contains(f)));
    }

    #[test]
    fn test_reset_replaces_previous_population() {
        let mut colony = colony();
        colony.reset().unwrap();
        colony.grid.reveal(Coord::new(0, 0)).unwrap();
        colony.reset().unwrap();

        assert_eq!(colony.foragers().len(), 50);
        assert_eq!(colony.turn(), 0);
        assert!(!colony.grid.is_revealed(Coord::new(0, 0)));
        assert!(colony.occupancy_consistent());
    }

    #[test]
    fn test_destroy_clears_everything() {
        let mut colony = colony();
        colony.reset().unwrap();
        colony.destroy();

        assert_eq!(colony.agents().count(), 0);
        assert!(colony.queen_id().is_none());
        assert_eq!(colony.grid.total_food(), 0);
        assert!(colony.grid.iter().all(|c| c.friendly_count() == 0));
    }

    #[test]
    fn test_forager_scenario_reveals_corners() {
        let mut colony = colony();
        colony.seed_scenario(Scenario::ForagerOnly).unwrap();

        assert_eq!(colony.foragers().len(), 100);
        assert!(colony.soldiers().is_empty());
        for at in [(11, 11), (15, 11), (11, 15), (15, 15)] {
            assert!(colony.grid.is_revealed(Coord::new(at.0, at.1)));
        }
        assert_eq!(colony.grid.revealed_count(), 13);
    }

    #[test]
    fn test_soldier_scenario() {
        let mut colony = colony();
        colony.seed_scenario(Scenario::SoldierOnly).unwrap();

        assert_eq!(colony.soldiers().len(), 20);
        assert_eq!(colony.enemies().len(), 20);
        assert_eq!(colony.grid.cell(Coord::new(12, 14)).unwrap().enemy_count(), 20);
        assert_eq!(colony.grid.total_food(), 1000);
    }

    #[test]
    fn test_scout_and_queen_scenarios() {
        let mut colony = colony();
        colony.seed_scenario(Scenario::ScoutOnly).unwrap();
        assert_eq!(colony.scouts().len(), 10);
        assert_eq!(colony.grid.total_food(), 1000);

        colony.seed_scenario(Scenario::QueenOnly).unwrap();
        assert!(colony.scouts().is_empty());
        assert!(colony.queen().is_some());
        assert!(colony.grid.total_food() > 1000);
    }

    #[test]
    fn test_perimeter_coord_is_on_edge() {
        let mut colony = colony();
        for _ in 0..500 {
            let at = colony.perimeter_coord();
            assert!(colony.grid.is_edge(at), "{} is not on the perimeter", at);
        }
    }

    #[test]
    fn test_scenario_parsing() {
        assert_eq!("Forager".parse::<Scenario>(), Ok(Scenario::ForagerOnly));
        assert_eq!("default".parse::<Scenario>(), Ok(Scenario::Normal));
        assert!("ant".parse::<Scenario>().is_err());
    }
}
