//! Scout behaviour: random walk that maps the terrain

use crate::colony::events::ColonyEvent;
use crate::colony::state::Colony;
use crate::core::error::{ColonyError, Result};
use crate::core::types::AgentId;
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
    let Some(to) = random_neighbor(colony, here, any_cell) else {
        return Ok(());
    };

    colony.move_agent(id, to)?;
    if colony.grid.reveal(to)? {
        tracing::trace!(%id, "revealed {}", to);
        colony.record(ColonyEvent::CellRevealed { by: id, at: to });
    }
    Ok(())
}
