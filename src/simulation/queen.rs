//! Queen behaviour: eat every turn, hatch once a day

use rand::Rng;

use crate::colony::events::ColonyEvent;
use crate::colony::state::Colony;
use crate::core::config::HatchConfig;
use crate::core::error::{ColonyError, Result};
use crate::core::types::{AgentId, AgentKind};
use crate::entity::agent::DeathCause;

/// Run the queen's turn
pub fn act(colony: &mut Colony, id: AgentId) -> Result<()> {
    if !colony.is_alive(id) {
        return Ok(());
    }
    if colony.age_agent(id)? {
        return Ok(());
    }

    let home = colony
        .agent(id)
        .map(|a| a.position)
        .ok_or(ColonyError::AgentNotFound(id))?;

    if !colony.grid.cell_mut(home)?.take_food(1) {
        colony.kill(id, DeathCause::Starvation)?;
        return Ok(());
    }

    let turn = colony.turn();
    if turn != 0 && turn % colony.config().timing.turns_per_day == 0 {
        let draw = colony.rng.gen_range(0..100);
        let kind = hatch_kind(draw, &colony.config().hatch);
        let hatched = colony.spawn(kind, home)?;
        tracing::debug!(id = %hatched, "queen hatched a {}", kind.name());
        colony.record(ColonyEvent::Hatched {
            id: hatched,
            kind,
            at: home,
        });
    }
    Ok(())
}

/// Map a uniform draw in [0, 100) to the kind of a new hatchling
pub fn hatch_kind(draw: u32, table: &HatchConfig) -> AgentKind {
    if draw < table.soldier_below {
        AgentKind::Soldier
    } else if draw < table.scout_below {
        AgentKind::Scout
    } else {
        AgentKind::Forager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ColonyConfig;

    fn colony_with_queen(food: u32) -> (Colony, AgentId) {
        let mut config = ColonyConfig::seeded(21);
        config.population.queen_food = food;
        let mut colony = Colony::new(config).unwrap();
        let queen = colony.seed_queen().unwrap();
        (colony, queen)
    }

    #[test]
    fn test_hatch_table() {
        let table = HatchConfig::default();
        assert_eq!(hatch_kind(0, &table), AgentKind::Soldier);
        assert_eq!(hatch_kind(24, &table), AgentKind::Soldier);
        assert_eq!(hatch_kind(25, &table), AgentKind::Scout);
        assert_eq!(hatch_kind(49, &table), AgentKind::Scout);
        assert_eq!(hatch_kind(50, &table), AgentKind::Forager);
        assert_eq!(hatch_kind(99, &table), AgentKind::Forager);
    }

    #[test]
    fn test_queen_eats_one_unit() {
        let (mut colony, queen) = colony_with_queen(10);
        act(&mut colony, queen).unwrap();

        let center = colony.grid.center();
        assert_eq!(colony.grid.cell(center).unwrap().food(), 9);
        assert_eq!(colony.agent(queen).unwrap().age, 1);
        // Turn 0 never hatches
        assert_eq!(colony.population().friendly_total(), 1);
    }

    #[test]
    fn test_queen_starves_on_empty_cell() {
        let (mut colony, queen) = colony_with_queen(0);
        act(&mut colony, queen).unwrap();

        assert!(colony.is_queen_dead());
        assert!(!colony.is_alive(queen));
        assert_eq!(colony.population().friendly_total(), 0);
    }

    #[test]
    fn test_queen_hatches_at_day_boundary() {
        let (mut colony, queen) = colony_with_queen(10);
        colony.turn = 10;
        act(&mut colony, queen).unwrap();

        let hatched: Vec<_> = colony
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, ColonyEvent::Hatched { .. }))
            .collect();
        assert_eq!(hatched.len(), 1);
        assert_eq!(colony.population().friendly_total(), 2);
        assert_eq!(colony.grid.cell(colony.grid.center()).unwrap().friendly_count(), 2);
    }

    #[test]
    fn test_queen_does_not_hatch_mid_day() {
        let (mut colony, queen) = colony_with_queen(10);
        colony.turn = 7;
        act(&mut colony, queen).unwrap();
        assert_eq!(colony.population().friendly_total(), 1);
    }
}
