//! Grid cells and the colony map

pub mod cell;
pub mod map;

pub use cell::{Cell, CellView, ChangeSet};
pub use map::ColonyGrid;
