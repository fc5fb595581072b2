//! Raider behaviour: attack any friendly on the spot, otherwise wander

use rand::seq::SliceRandom;

use crate::colony::state::Colony;
use crate::core::error::{ColonyError, Result};
use crate::core::types::AgentId;
use crate::entity::agent::DeathCause;
use crate::simulation::movement::{any_cell, random_neighbor};

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

    let victims = colony.live_friendlies_at(here)?;
    if let Some(&victim) = victims.choose(&mut colony.rng) {
        let hit = colony.config().combat.hit_percent;
        if colony.roll_percent(hit) {
            colony.kill(victim, DeathCause::Killed { by: id })?;
        }
        return Ok(());
    }

    if let Some(to) = random_neighbor(colony, here, any_cell) {
        colony.move_agent(id, to)?;
    }
    Ok(())
}
