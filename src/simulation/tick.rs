//! Turn system - orchestrates one colony turn
//!
//! Agents act in a fixed order: queen, scouts, foragers, soldiers, raiders.
//! Each phase walks a snapshot of its roster, so agents hatched or killed
//! mid-turn never change who acts in the current phase.

use crate::colony::events::{ColonyEvent, TurnReport};
use crate::colony::state::Colony;
use crate::core::error::Result;
use crate::core::status::{turn_label, StatusMessage};
use crate::simulation::{enemy, forager, queen, scout, soldier};

/// Process one turn of the colony
///
/// Order of operations:
/// 1. Publish the "Day D, turn T" label
/// 2. Halve pheromone everywhere on day boundaries (never on turn 0)
/// 3. Queen eats and possibly hatches
/// 4. Scouts, foragers, soldiers, raiders act in roster order
/// 5. Reap everything killed this turn
/// 6. Maybe spawn one raider on the perimeter
/// 7. Advance the turn counter
pub fn run_turn(colony: &mut Colony) -> Result<TurnReport> {
    let turn = colony.turn();
    let turns_per_day = colony.config().timing.turns_per_day;

    let label = turn_label(turn, turns_per_day);
    colony.publish(StatusMessage::TurnLabel(label.clone()));

    if turn > 0 && turn % turns_per_day == 0 {
        colony.grid.decay_pheromone();
        colony.record(ColonyEvent::PheromoneDecayed { turn });
        tracing::info!(turn, "day boundary: pheromone decayed");
    }

    if let Some(id) = colony.queen_id() {
        queen::act(colony, id)?;
    }
    for id in colony.scouts().to_vec() {
        scout::act(colony, id)?;
    }
    for id in colony.foragers().to_vec() {
        forager::act(colony, id)?;
    }
    for id in colony.soldiers().to_vec() {
        soldier::act(colony, id)?;
    }
    for id in colony.enemies().to_vec() {
        enemy::act(colony, id)?;
    }

    let reaped = colony.reap()?;

    let spawn_percent = colony.config().enemies.spawn_percent;
    if colony.roll_percent(spawn_percent) {
        colony.spawn_perimeter_enemy()?;
    }

    colony.turn += 1;

    let report = TurnReport {
        turn,
        label,
        events: colony.take_events(),
        reaped,
        population: colony.population(),
    };
    tracing::trace!(
        turn,
        events = report.events.len(),
        reaped,
        "turn processed"
    );
    Ok(report)
}

impl Colony {
    /// Advance the colony by one turn
    pub fn process_turn(&mut self) -> Result<TurnReport> {
        run_turn(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ColonyConfig;
    use crate::core::status::StatusMessage;
    use crate::core::types::{AgentKind, Coord};
    use std::sync::{Arc, Mutex};

    fn quiet_config(seed: u64) -> ColonyConfig {
        let mut config = ColonyConfig::seeded(seed);
        config.enemies.spawn_percent = 0;
        config
    }

    #[test]
    fn test_turn_counter_and_label() {
        let mut colony = Colony::with_default_population(quiet_config(1)).unwrap();
        let first = colony.process_turn().unwrap();
        assert_eq!(first.turn, 0);
        assert_eq!(first.label, "Day 1, turn 1");
        assert_eq!(colony.turn(), 1);

        for _ in 0..9 {
            colony.process_turn().unwrap();
        }
        let eleventh = colony.process_turn().unwrap();
        assert_eq!(eleventh.label, "Day 2, turn 1");
    }

    #[test]
    fn test_labels_reach_status_sink() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut colony = Colony::with_default_population(quiet_config(2)).unwrap();
        colony.set_status_sink(Box::new(move |message: StatusMessage| {
            sink.lock().unwrap().push(message);
        }));

        colony.process_turn().unwrap();
        colony.process_turn().unwrap();
        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                StatusMessage::TurnLabel("Day 1, turn 1".into()),
                StatusMessage::TurnLabel("Day 1, turn 2".into()),
            ]
        );
    }

    #[test]
    fn test_decay_only_on_day_boundary() {
        let mut colony = Colony::new(quiet_config(3)).unwrap();
        let spot = Coord::new(3, 3);
        colony.grid.cell_mut(spot).unwrap().deposit_pheromone(40, 1000);

        for _ in 0..10 {
            colony.process_turn().unwrap();
        }
        assert_eq!(colony.grid.cell(spot).unwrap().pheromone(), 40);

        let report = colony.process_turn().unwrap();
        assert_eq!(report.turn, 10);
        assert!(report
            .events
            .contains(&ColonyEvent::PheromoneDecayed { turn: 10 }));
        assert_eq!(colony.grid.cell(spot).unwrap().pheromone(), 20);
    }

    #[test]
    fn test_dead_agents_reaped_same_turn() {
        let mut config = quiet_config(4);
        config.combat.hit_percent = 100;
        let mut colony = Colony::new(config).unwrap();
        let at = Coord::new(20, 20);
        let soldier = colony.spawn(AgentKind::Soldier, at).unwrap();
        let raider = colony.spawn(AgentKind::Enemy, at).unwrap();

        let report = colony.process_turn().unwrap();
        assert_eq!(report.reaped, 1);
        assert_eq!(report.deaths().count(), 1);
        assert!(colony.agent(raider).is_none());
        assert!(colony.is_alive(soldier));
        assert!(colony.enemies().is_empty());
        assert_eq!(colony.pending_dead(), 0);
    }

    #[test]
    fn test_raiders_arrive_on_perimeter() {
        let mut config = ColonyConfig::seeded(5);
        config.enemies.spawn_percent = 100;
        let mut colony = Colony::new(config).unwrap();

        let report = colony.process_turn().unwrap();
        let spawned: Vec<Coord> = report
            .events
            .iter()
            .filter_map(|e| match e {
                ColonyEvent::EnemySpawned { at, .. } => Some(*at),
                _ => None,
            })
            .collect();
        assert_eq!(spawned.len(), 1);
        assert!(colony.grid.is_edge(spawned[0]));
        assert_eq!(report.population.enemies, 1);
    }
}
