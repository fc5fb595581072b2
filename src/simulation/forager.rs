//! Forager behaviour: pheromone following, loop avoidance, homing
//!
//! A forager alternates between two modes. Foraging, it climbs the
//! pheromone gradient through mapped cells (or wanders when there is no
//! scent), marking every cell it enters so it doesn't circle, and
//! leaving breadcrumbs. Once it picks up food it is Returning: it walks
//! the breadcrumbs back to the queen, laying pheromone on the way.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::colony::events::ColonyEvent;
use crate::colony::state::Colony;
use crate::core::error::{ColonyError, Result};
use crate::core::types::{AgentId, Coord};
use crate::entity::forager::{ForagerMemory, ForagerMode};
use crate::spatial::grid::NEIGHBOR_OFFSETS;
use crate::world::map::ColonyGrid;

/// Run one forager's turn
pub fn act(colony: &mut Colony, id: AgentId) -> Result<()> {
    if !colony.is_alive(id) {
        return Ok(());
    }
    if colony.age_agent(id)? {
        return Ok(());
    }

    // Work on a checked-out copy of the memory so the grid and the
    // random stream stay borrowable alongside it.
    let mut memory = take_memory(colony, id)?;
    let result = match memory.mode() {
        ForagerMode::Returning => return_home(colony, id, &mut memory),
        ForagerMode::Foraging => forage(colony, id, &mut memory),
    };
    restore_memory(colony, id, memory)?;
    result
}

fn forage(colony: &mut Colony, id: AgentId, memory: &mut ForagerMemory) -> Result<()> {
    let here = position(colony, id)?;
    let Some(choice) = choose_destination(colony, here, memory.last)? else {
        tracing::trace!(%id, "forager boxed in at {}", here);
        return Ok(());
    };
    let target = avoid_loop(memory, &colony.grid, &mut colony.rng, here, choice);

    memory.last = Some(here);
    memory.trail.push(here);
    colony.move_agent(id, target)?;
    memory.cut_loop(target);

    let cell = colony.grid.cell_mut(target)?;
    if memory.carrying == 0 && !cell.is_queen_present() && cell.take_food(1) {
        memory.carrying = 1;
        tracing::debug!(%id, "picked up food at {}", target);
        colony.record(ColonyEvent::FoodPickedUp { id, at: target });
    }
    Ok(())
}

fn return_home(colony: &mut Colony, id: AgentId, memory: &mut ForagerMemory) -> Result<()> {
    let here = position(colony, id)?;
    let pheromone = colony.config().pheromone.clone();
    let cell = colony.grid.cell_mut(here)?;
    if !cell.is_queen_present() {
        cell.deposit_pheromone(pheromone.deposit, pheromone.cap);
    }

    let Some(next) = memory.trail.pop() else {
        return Ok(());
    };
    colony.move_agent(id, next)?;

    let cell = colony.grid.cell_mut(next)?;
    if cell.is_queen_present() {
        memory.clear_path();
        if memory.carrying > 0 {
            cell.add_food(memory.carrying);
            memory.carrying = 0;
            tracing::debug!(%id, "delivered food to the queen");
            colony.record(ColonyEvent::FoodDelivered { id, at: next });
        }
    }
    Ok(())
}

/// Pick the next cell while foraging, before loop avoidance
///
/// Candidates are mapped neighbours other than the current and the
/// previous cell. The strongest scent wins; ties are broken uniformly.
/// Without any scent the forager wanders, except that a dead end sends
/// it back the way it came.
fn choose_destination(
    colony: &mut Colony,
    here: Coord,
    last: Option<Coord>,
) -> Result<Option<Coord>> {
    let grid = &colony.grid;
    let candidate = |at: Coord| at != here && Some(at) != last && grid.is_revealed(at);

    let mut max_level = 0;
    let mut ties = 0;
    let mut best = None;
    for at in grid.neighbors(here).filter(|c| candidate(*c)) {
        let level = grid.cell(at)?.pheromone();
        if level > max_level {
            max_level = level;
            ties = 1;
            best = Some(at);
        } else if level == max_level && max_level > 0 {
            ties += 1;
            best = Some(at);
        }
    }

    let choice = match ties {
        0 => {
            let revealed: Vec<Coord> = grid.neighbors(here).filter(|c| grid.is_revealed(*c)).collect();
            if revealed.len() == 1 && Some(revealed[0]) == last {
                last
            } else {
                let options: Vec<Coord> = revealed.into_iter().filter(|c| candidate(*c)).collect();
                options.choose(&mut colony.rng).copied().or(last)
            }
        }
        1 => best,
        _ => {
            let mut options = Vec::with_capacity(ties);
            for at in grid.neighbors(here).filter(|c| candidate(*c)) {
                if grid.cell(at)?.pheromone() == max_level {
                    options.push(at);
                }
            }
            options.choose(&mut colony.rng).copied()
        }
    };
    Ok(choice)
}

/// Steer away from cells already entered on this excursion
///
/// The chosen cell is registered in the visited graph, linked from the
/// previous cell. If it was visited before, the eight neighbour offsets
/// are tried in random order and the first mapped, unvisited cell wins.
/// With none left, the forager falls back to its previous cell.
fn avoid_loop(
    memory: &mut ForagerMemory,
    grid: &ColonyGrid,
    rng: &mut ChaCha8Rng,
    here: Coord,
    choice: Coord,
) -> Coord {
    let last = memory.last;
    if memory.visited.register(choice, last) {
        return choice;
    }

    let mut offsets = NEIGHBOR_OFFSETS;
    offsets.shuffle(rng);
    for (dx, dy) in offsets {
        let Some(at) = grid.offset(here, dx, dy) else {
            continue;
        };
        if grid.is_revealed(at) && memory.visited.register(at, last) {
            tracing::trace!("loop avoided: {} -> {}", choice, at);
            return at;
        }
    }
    last.unwrap_or(here)
}

fn position(colony: &Colony, id: AgentId) -> Result<Coord> {
    colony
        .agent(id)
        .map(|a| a.position)
        .ok_or(ColonyError::AgentNotFound(id))
}

fn take_memory(colony: &mut Colony, id: AgentId) -> Result<ForagerMemory> {
    colony
        .agent_mut(id)
        .and_then(|a| a.forager_mut())
        .map(std::mem::take)
        .ok_or(ColonyError::AgentNotFound(id))
}

fn restore_memory(colony: &mut Colony, id: AgentId, memory: ForagerMemory) -> Result<()> {
    let slot = colony
        .agent_mut(id)
        .and_then(|a| a.forager_mut())
        .ok_or(ColonyError::AgentNotFound(id))?;
    *slot = memory;
    Ok(())
}
