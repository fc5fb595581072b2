//! Local movement helpers shared by the agent behaviours
//!
//! All choices are made among the in-bounds 8-neighbourhood of a cell.
//! Picking uniformly from the list of valid cells gives the same
//! distribution as redrawing offsets until one is valid, and it also
//! ends cleanly when no valid cell exists.

use rand::seq::SliceRandom;

use crate::colony::state::Colony;
use crate::core::types::Coord;
use crate::world::map::ColonyGrid;

/// Uniformly chosen neighbour of `from` that satisfies `accept`
pub fn random_neighbor(
    colony: &mut Colony,
    from: Coord,
    accept: impl Fn(&ColonyGrid, Coord) -> bool,
) -> Option<Coord> {
    let grid = &colony.grid;
    let candidates: Vec<Coord> = grid.neighbors(from).filter(|c| accept(grid, *c)).collect();
    candidates.choose(&mut colony.rng).copied()
}

/// Any in-bounds neighbour
pub fn any_cell(_: &ColonyGrid, _: Coord) -> bool {
    true
}

/// Neighbours the colony has already mapped
pub fn revealed_cell(grid: &ColonyGrid, at: Coord) -> bool {
    grid.is_revealed(at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ColonyConfig;

    #[test]
    fn test_random_neighbor_respects_filter() {
        let mut colony = Colony::new(ColonyConfig::seeded(3)).unwrap();
        let center = colony.grid.center();

        for _ in 0..100 {
            let to = random_neighbor(&mut colony, center, revealed_cell).unwrap();
            assert_eq!(to.chebyshev(&center), 1);
            assert!(colony.grid.is_revealed(to));
        }
    }

    #[test]
    fn test_random_neighbor_none_when_nothing_qualifies() {
        let mut colony = Colony::new(ColonyConfig::seeded(3)).unwrap();
        // The corner is surrounded by hidden cells
        assert_eq!(random_neighbor(&mut colony, Coord::new(0, 0), revealed_cell), None);
        assert!(random_neighbor(&mut colony, Coord::new(0, 0), any_cell).is_some());
    }
}
