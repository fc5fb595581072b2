//! Soldier behaviour: fight raiders on the spot, otherwise hunt nearby

use rand::seq::SliceRandom;

use crate::colony::state::Colony;
use crate::core::error::{ColonyError, Result};
use crate::core::types::{AgentId, Coord};
use crate::entity::agent::DeathCause;
use crate::simulation::movement::{random_neighbor, revealed_cell};

pub fn act(colony: &mut Colony, id: AgentId) -> Result<()> {
    if !colony.is_alive(id) {
        return Ok(());
    }
    if colony.age_agent(id)? {
        return Ok(());
    }

    let here = colony
        .agent(id)
        .map(|a| a.position)
        .ok_or(ColonyError::AgentNotFound(id))?;

    let targets = colony.live_enemies_at(here)?;
    if let Some(&target) = targets.choose(&mut colony.rng) {
        let hit = colony.config().combat.hit_percent;
        if colony.roll_percent(hit) {
            colony.kill(target, DeathCause::Killed { by: id })?;
        } else {
            tracing::trace!(%id, %target, "soldier missed");
        }
        return Ok(());
    }

    let hunting: Vec<Coord> = colony
        .grid
        .neighbors(here)
        .filter(|c| colony.grid.is_revealed(*c))
        .filter(|c| colony.live_enemies_at(*c).is_ok_and(|e| !e.is_empty()))
        .collect();
    let to = match hunting.choose(&mut colony.rng) {
        Some(&to) => Some(to),
        None => random_neighbor(colony, here, revealed_cell),
    };
    if let Some(to) = to {
        colony.move_agent(id, to)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ColonyConfig;
    use crate::core::types::AgentKind;

    fn colony(hit_percent: u32) -> Colony {
        let mut config = ColonyConfig::seeded(41);
        config.combat.hit_percent = hit_percent;
        Colony::new(config).unwrap()
    }

    #[test]
    fn test_soldier_kills_raider_on_sure_hit() {
        let mut colony = colony(100);
        let center = colony.grid.center();
        let soldier = colony.spawn(AgentKind::Soldier, center).unwrap();
        let raider = colony.spawn(AgentKind::Enemy, center).unwrap();

        act(&mut colony, soldier).unwrap();
        assert!(!colony.is_alive(raider));
        assert_eq!(colony.agent(soldier).unwrap().position, center);
    }

    #[test]
    fn test_soldier_never_hits_at_zero() {
        let mut colony = colony(0);
        let center = colony.grid.center();
        let soldier = colony.spawn(AgentKind::Soldier, center).unwrap();
        let raider = colony.spawn(AgentKind::Enemy, center).unwrap();

        for _ in 0..20 {
            act(&mut colony, soldier).unwrap();
        }
        assert!(colony.is_alive(raider));
        assert_eq!(colony.agent(soldier).unwrap().position, center);
    }

    #[test]
    fn test_soldier_moves_toward_raiders() {
        let mut colony = colony(100);
        let center = colony.grid.center();
        let soldier = colony.spawn(AgentKind::Soldier, center).unwrap();
        let camp = Coord::new(12, 14);
        colony.spawn(AgentKind::Enemy, camp).unwrap();

        act(&mut colony, soldier).unwrap();
        assert_eq!(colony.agent(soldier).unwrap().position, camp);
    }

    #[test]
    fn test_soldier_ignores_dead_raiders() {
        let mut colony = colony(100);
        let center = colony.grid.center();
        let soldier = colony.spawn(AgentKind::Soldier, center).unwrap();
        let raider = colony.spawn(AgentKind::Enemy, center).unwrap();
        colony.kill(raider, DeathCause::OldAge).unwrap();

        act(&mut colony, soldier).unwrap();
        // Nothing to fight, so it patrols a mapped neighbour
        let at = colony.agent(soldier).unwrap().position;
        assert_eq!(at.chebyshev(&center), 1);
        assert!(colony.grid.is_revealed(at));
    }
}
