//! Formicary - grid-based ant colony simulation

pub mod colony;
pub mod core;
pub mod entity;
pub mod simulation;
pub mod spatial;
pub mod world;

pub use crate::colony::{Colony, ColonyEvent, ColonySummary, Scenario, TurnReport};
pub use crate::core::{ColonyConfig, ColonyError, Result};
pub use crate::simulation::SimulationController;
