//! Colony summaries for hosts

use serde::{Deserialize, Serialize};

use crate::colony::events::PopulationCounts;
use crate::colony::state::Colony;
use crate::core::error::Result;
use crate::core::types::Turn;
use crate::world::map::ColonyGrid;

/// Serializable overview of a colony at one moment
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColonySummary {
    pub turn: Turn,
    pub day: Turn,
    pub population: PopulationCounts,
    pub total_food: u64,
    pub queen_food: u32,
    pub revealed_cells: usize,
    pub total_cells: usize,
    pub queen_dead: bool,
}

impl ColonySummary {
    pub fn from_colony(colony: &Colony) -> Self {
        let queen_food = colony
            .queen()
            .and_then(|q| colony.grid.cell(q.position).ok())
            .map(|c| c.food())
            .unwrap_or(0);

        Self {
            turn: colony.turn(),
            day: colony.turn() / colony.config().timing.turns_per_day + 1,
            population: colony.population(),
            total_food: colony.grid.total_food(),
            queen_food,
            revealed_cells: colony.grid.revealed_count(),
            total_cells: colony.grid.width() * colony.grid.height(),
            queen_dead: colony.is_queen_dead(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        format!(
            "Turn {} (day {}): {} foragers, {} scouts, {} soldiers, {} raiders\nqueen {} with {} food, {} food on the map, {}/{} cells revealed",
            self.turn,
            self.day,
            self.population.foragers,
            self.population.scouts,
            self.population.soldiers,
            self.population.enemies,
            if self.queen_dead { "dead" } else { "alive" },
            self.queen_food,
            self.total_food,
            self.revealed_cells,
            self.total_cells,
        )
    }
}

/// ASCII map, one character per cell
///
/// `#` hidden, `Q` queen, `E` raiders, `S` soldiers, `f` foragers,
/// `s` scouts, `*` food, `~` pheromone, `.` empty.
pub fn render_map(grid: &ColonyGrid) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for (i, cell) in grid.iter().enumerate() {
        let glyph = if !cell.is_revealed() {
            '#'
        } else if cell.is_queen_present() {
            'Q'
        } else if cell.enemy_count() > 0 {
            'E'
        } else if cell.soldier_count() > 0 {
            'S'
        } else if cell.forager_count() > 0 {
            'f'
        } else if cell.scout_count() > 0 {
            's'
        } else if cell.food() > 0 {
            '*'
        } else if cell.pheromone() > 0 {
            '~'
        } else {
            '.'
        };
        out.push(glyph);
        if (i + 1) % grid.width() == 0 {
            out.push('\n');
        }
    }
    out
}
