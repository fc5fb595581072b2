//! Simulation controller: the host-facing control surface
//!
//! A host drives the colony with a periodic `tick` while the controller
//! is running, or with explicit `step`s while paused. Stopping is
//! terminal until a scenario is loaded again; the queen's death stops
//! the controller automatically.

use crate::colony::events::TurnReport;
use crate::colony::seeding::Scenario;
use crate::colony::state::Colony;
use crate::colony::summary::ColonySummary;
use crate::core::config::ColonyConfig;
use crate::core::error::Result;

pub struct SimulationController {
    colony: Colony,
    running: bool,
    stopped: bool,
}

impl SimulationController {
    /// Controller over an empty colony; load a scenario before starting
    pub fn new(config: ColonyConfig) -> Result<Self> {
        Ok(Self::from_colony(Colony::new(config)?))
    }

    pub fn from_colony(colony: Colony) -> Self {
        Self {
            colony,
            running: false,
            stopped: true,
        }
    }

    pub fn colony(&self) -> &Colony {
        &self.colony
    }

    pub fn colony_mut(&mut self) -> &mut Colony {
        &mut self.colony
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Seed a starting setup and wait, paused, for `start` or `step`
    pub fn load_scenario(&mut self, scenario: Scenario) -> Result<()> {
        self.colony.seed_scenario(scenario)?;
        self.running = false;
        self.stopped = false;
        tracing::info!(scenario = scenario.name(), "scenario loaded");
        Ok(())
    }

    /// Reload the default population
    pub fn reset(&mut self) -> Result<()> {
        self.load_scenario(Scenario::Normal)
    }

    /// Let periodic ticks advance the colony
    pub fn start(&mut self) {
        if self.stopped {
            tracing::warn!("start ignored: simulation is stopped");
            return;
        }
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// End the run; ticks and steps do nothing until a reload
    pub fn stop(&mut self) {
        self.running = false;
        self.stopped = true;
    }

    /// Advance exactly one turn and leave the controller paused
    pub fn step(&mut self) -> Result<Option<TurnReport>> {
        self.running = false;
        if self.stopped {
            return Ok(None);
        }
        self.advance().map(Some)
    }

    /// Periodic timer callback
    pub fn tick(&mut self) -> Result<Option<TurnReport>> {
        if self.colony.is_queen_dead() {
            self.stop();
        }
        if !self.running || self.stopped {
            return Ok(None);
        }
        self.advance().map(Some)
    }

    /// Run up to `turns` ticks, stopping early if the simulation ends
    ///
    /// Returns the number of turns processed.
    pub fn run_for(
        &mut self,
        turns: u64,
        mut on_turn: impl FnMut(&TurnReport),
    ) -> Result<u64> {
        self.start();
        let mut processed = 0;
        while processed < turns {
            let Some(report) = self.tick()? else {
                break;
            };
            on_turn(&report);
            processed += 1;
        }
        Ok(processed)
    }

    /// Tear the colony down and stop
    pub fn end(&mut self) {
        self.stop();
        self.colony.destroy();
    }

    pub fn summary(&self) -> ColonySummary {
        ColonySummary::from_colony(&self.colony)
    }

    fn advance(&mut self) -> Result<TurnReport> {
        let report = self.colony.process_turn()?;
        if report.queen_died() || self.colony.is_queen_dead() {
            tracing::info!(turn = report.turn, "simulation over");
            self.stop();
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> SimulationController {
        let mut config = ColonyConfig::seeded(61);
        config.enemies.spawn_percent = 0;
        SimulationController::new(config).unwrap()
    }

    #[test]
    fn test_stopped_until_loaded() {
        let mut sim = controller();
        assert!(sim.is_stopped());
        sim.start();
        assert!(!sim.is_running());
        assert!(sim.tick().unwrap().is_none());
        assert!(sim.step().unwrap().is_none());
    }

    #[test]
    fn test_tick_only_advances_while_running() {
        let mut sim = controller();
        sim.reset().unwrap();

        assert!(sim.tick().unwrap().is_none());
        sim.start();
        assert!(sim.tick().unwrap().is_some());
        sim.pause();
        assert!(sim.tick().unwrap().is_none());
        assert_eq!(sim.colony().turn(), 1);
    }

    #[test]
    fn test_step_pauses() {
        let mut sim = controller();
        sim.reset().unwrap();
        sim.start();

        let report = sim.step().unwrap().unwrap();
        assert_eq!(report.turn, 0);
        assert!(!sim.is_running());
        assert!(!sim.is_stopped());
    }

    #[test]
    fn test_queen_death_stops_run() {
        let mut config = ColonyConfig::seeded(62);
        config.enemies.spawn_percent = 0;
        config.population.queen_food = 2;
        let mut sim = SimulationController::new(config).unwrap();
        sim.load_scenario(Scenario::QueenOnly).unwrap();

        let processed = sim.run_for(100, |_| {}).unwrap();
        assert_eq!(processed, 3);
        assert!(sim.is_stopped());
        assert!(sim.colony().is_queen_dead());
        assert!(sim.tick().unwrap().is_none());
    }

    #[test]
    fn test_end_clears_colony() {
        let mut sim = controller();
        sim.reset().unwrap();
        sim.run_for(5, |_| {}).unwrap();
        sim.end();

        assert!(sim.is_stopped());
        assert_eq!(sim.colony().agents().count(), 0);
        assert_eq!(sim.summary().total_food, 0);
    }
}
