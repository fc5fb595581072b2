//! The colony grid: a fixed field of cells with visibility state

use crate::core::error::Result;
use crate::core::types::Coord;
use crate::spatial::grid::Grid;
use crate::world::cell::{Cell, CellView, ChangeSet};

/// Fixed width x height field of cells
///
/// Cells are created once here and live for the whole simulation;
/// only their contents change.
#[derive(Debug, Clone)]
pub struct ColonyGrid {
    cells: Grid<Cell>,
}

impl ColonyGrid {
    /// All cells start hidden except the 3x3 block around the center
    pub fn new(width: usize, height: usize) -> Self {
        let mut grid = Self {
            cells: Grid::from_fn(width, height, Cell::new),
        };
        grid.reset_visibility();
        grid
    }

    pub fn width(&self) -> usize {
        self.cells.width
    }

    pub fn height(&self) -> usize {
        self.cells.height
    }

    /// The queen's starting cell
    pub fn center(&self) -> Coord {
        self.cells.center()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(coord)
    }

    /// Cell lookup; out-of-range coordinates are an error
    pub fn cell(&self, coord: Coord) -> Result<&Cell> {
        self.cells.try_get(coord)
    }

    pub fn cell_mut(&mut self, coord: Coord) -> Result<&mut Cell> {
        self.cells.try_get_mut(coord)
    }

    pub fn is_revealed(&self, coord: Coord) -> bool {
        self.cells.get(coord).is_some_and(Cell::is_revealed)
    }

    /// Reveal a cell; returns true if it was hidden
    pub fn reveal(&mut self, coord: Coord) -> Result<bool> {
        Ok(self.cell_mut(coord)?.reveal())
    }

    pub fn hide(&mut self, coord: Coord) -> Result<()> {
        self.cell_mut(coord)?.hide();
        Ok(())
    }

    /// Hide everything, then reveal the 3x3 block around the center
    pub fn reset_visibility(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.hide();
        }
        let center = self.center();
        for dy in -1..=1 {
            for dx in -1..=1 {
                if let Some(coord) = self.cells.offset(center, dx, dy) {
                    if let Some(cell) = self.cells.get_mut(coord) {
                        cell.reveal();
                    }
                }
            }
        }
    }

    /// In-bounds neighbours of a cell, excluding the cell itself
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.cells.neighbors(coord)
    }

    /// Shift a coordinate, keeping only in-bounds results
    pub fn offset(&self, coord: Coord, dx: i32, dy: i32) -> Option<Coord> {
        self.cells.offset(coord, dx, dy)
    }

    /// Perimeter test
    pub fn is_edge(&self, coord: Coord) -> bool {
        coord.x == 0
            || coord.y == 0
            || coord.x + 1 == self.width()
            || coord.y + 1 == self.height()
    }

    /// Day-boundary decay applied to every cell
    pub fn decay_pheromone(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.decay_pheromone();
        }
    }

    /// Zero all resources and occupancy; visibility is untouched
    pub fn clear_contents(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.reset();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    pub fn total_food(&self) -> u64 {
        self.cells.iter().map(|c| c.food() as u64).sum()
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_revealed()).count()
    }

    /// Snapshot of every cell, row-major
    pub fn views(&self) -> Vec<CellView> {
        self.cells.iter().map(Cell::view).collect()
    }

    /// Collect and clear pending change notifications
    pub fn drain_changes(&mut self) -> Vec<(Coord, ChangeSet)> {
        self.cells
            .iter_mut()
            .filter_map(|cell| {
                let changes = cell.take_changes();
                (!changes.is_empty()).then_some((cell.coord, changes))
            })
            .collect()
    }
}
