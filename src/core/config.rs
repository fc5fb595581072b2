//! Colony configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Every section can be overridden
//! from a TOML file; missing keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ColonyError, Result};
use crate::core::types::Turn;

/// Configuration for a colony simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyConfig {
    pub grid: GridConfig,
    pub timing: TimingConfig,
    pub lifespan: LifespanConfig,
    pub population: PopulationConfig,
    pub food: FoodConfig,
    pub pheromone: PheromoneConfig,
    pub combat: CombatConfig,
    pub hatch: HatchConfig,
    pub enemies: EnemyConfig,
    pub scenarios: ScenarioConfig,

    /// Seed for the colony's random stream
    ///
    /// None draws a fresh seed, so two runs differ. Set it for
    /// reproducible runs: the whole turn order is deterministic given
    /// the random stream.
    pub seed: Option<u64>,
}

/// Grid dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

/// Calendar constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Turns in one day
    ///
    /// This drives two periodic events: pheromone halves on every day
    /// boundary, and the queen hatches one agent per day.
    pub turns_per_day: Turn,

    /// Days in one year; lifespans are expressed in years
    pub days_per_year: Turn,
}

/// Maximum ages, in years (converted to turns with [`TimingConfig`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifespanConfig {
    pub queen_years: u32,
    pub worker_years: u32,
    pub enemy_years: u32,
}

/// Default population seeded by a reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Food placed on the queen's cell. She eats one unit per turn,
    /// so this is her starting runway in turns.
    pub queen_food: u32,
    pub soldiers: usize,
    pub foragers: usize,
    pub scouts: usize,
}

/// Food scattered across the map on reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodConfig {
    /// Chance (0-100) that any given cell receives a food pile
    pub scatter_percent: u32,
    /// Smallest pile, inclusive
    pub min_amount: u32,
    /// Largest pile, inclusive
    pub max_amount: u32,
}

/// Pheromone trail tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PheromoneConfig {
    /// Amount a returning forager drops per turn
    pub deposit: u32,

    /// No deposit pushes a cell above this level
    ///
    /// With daily halving, a heavily used trail saturates here and
    /// then settles around half the cap between day boundaries.
    pub cap: u32,
}

/// Combat tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Chance (0-100) that an attack kills its target
    ///
    /// Applies to soldiers and raiders alike. 100 forces every
    /// attack to land.
    pub hit_percent: u32,
}

/// Queen hatch table, drawn uniformly from [0, 100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HatchConfig {
    /// Draws below this hatch a soldier
    pub soldier_below: u32,
    /// Draws below this (and not a soldier) hatch a scout; the rest are foragers
    pub scout_below: u32,
}

/// Raider arrival
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Chance (0-100) per turn that one raider appears on the perimeter
    pub spawn_percent: u32,
}

/// Population sizes used by the isolated scenarios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub scouts: usize,
    pub foragers: usize,
    pub soldiers: usize,
    pub enemies: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { width: 27, height: 27 }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            turns_per_day: 10,
            days_per_year: 365,
        }
    }
}

impl Default for LifespanConfig {
    fn default() -> Self {
        Self {
            queen_years: 20,
            worker_years: 1,
            enemy_years: 1,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            queen_food: 1000,
            soldiers: 10,
            foragers: 50,
            scouts: 4,
        }
    }
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            scatter_percent: 25,
            min_amount: 500,
            max_amount: 1000,
        }
    }
}

impl Default for PheromoneConfig {
    fn default() -> Self {
        Self { deposit: 10, cap: 1000 }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self { hit_percent: 50 }
    }
}

impl Default for HatchConfig {
    fn default() -> Self {
        // 25% soldier, 25% scout, 50% forager
        Self {
            soldier_below: 25,
            scout_below: 50,
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self { spawn_percent: 3 }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            scouts: 10,
            foragers: 100,
            soldiers: 20,
            enemies: 20,
        }
    }
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            timing: TimingConfig::default(),
            lifespan: LifespanConfig::default(),
            population: PopulationConfig::default(),
            food: FoodConfig::default(),
            pheromone: PheromoneConfig::default(),
            combat: CombatConfig::default(),
            hatch: HatchConfig::default(),
            enemies: EnemyConfig::default(),
            scenarios: ScenarioConfig::default(),
            seed: None,
        }
    }
}

impl ColonyConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn turns_per_year(&self) -> Turn {
        self.timing.turns_per_day * self.timing.days_per_year
    }

    pub fn queen_max_age(&self) -> Turn {
        self.turns_per_year() * self.lifespan.queen_years as Turn
    }

    pub fn worker_max_age(&self) -> Turn {
        self.turns_per_year() * self.lifespan.worker_years as Turn
    }

    pub fn enemy_max_age(&self) -> Turn {
        self.turns_per_year() * self.lifespan.enemy_years as Turn
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        // The queen's 3x3 start region has to fit
        if self.grid.width < 3 || self.grid.height < 3 {
            return Err(ColonyError::InvalidConfig(format!(
                "grid must be at least 3x3, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }

        if self.timing.turns_per_day == 0 || self.timing.days_per_year == 0 {
            return Err(ColonyError::InvalidConfig(
                "turns_per_day and days_per_year must be positive".into(),
            ));
        }

        let percentages = [
            ("food.scatter_percent", self.food.scatter_percent),
            ("combat.hit_percent", self.combat.hit_percent),
            ("enemies.spawn_percent", self.enemies.spawn_percent),
            ("hatch.scout_below", self.hatch.scout_below),
        ];
        for (name, value) in percentages {
            if value > 100 {
                return Err(ColonyError::InvalidConfig(format!(
                    "{} ({}) must be <= 100",
                    name, value
                )));
            }
        }

        if self.hatch.soldier_below > self.hatch.scout_below {
            return Err(ColonyError::InvalidConfig(format!(
                "hatch.soldier_below ({}) should be <= hatch.scout_below ({})",
                self.hatch.soldier_below, self.hatch.scout_below
            )));
        }

        if self.food.min_amount > self.food.max_amount {
            return Err(ColonyError::InvalidConfig(format!(
                "food.min_amount ({}) should be <= food.max_amount ({})",
                self.food.min_amount, self.food.max_amount
            )));
        }

        if self.pheromone.cap == 0 {
            return Err(ColonyError::InvalidConfig("pheromone.cap must be positive".into()));
        }

        Ok(())
    }
}
