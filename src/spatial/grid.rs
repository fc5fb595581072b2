//! Generic grid for spatial data

use crate::core::error::{ColonyError, Result};
use crate::core::types::Coord;

/// The eight king-move offsets, scanned row by row from the top-left
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Fixed-size 2D grid stored row-major
#[derive(Debug, Clone)]
pub struct Grid<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid, creating each element from its coordinate
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(Coord) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(Coord::new(x, y)));
            }
        }
        Self { width, height, data }
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    #[inline]
    pub fn get(&self, coord: Coord) -> Option<&T> {
        if self.contains(coord) {
            Some(&self.data[coord.y * self.width + coord.x])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut T> {
        if self.contains(coord) {
            Some(&mut self.data[coord.y * self.width + coord.x])
        } else {
            None
        }
    }

    /// Like [`Grid::get`], but out-of-range access is an error
    pub fn try_get(&self, coord: Coord) -> Result<&T> {
        let (width, height) = (self.width, self.height);
        self.get(coord).ok_or(ColonyError::OutOfBounds {
            x: coord.x,
            y: coord.y,
            width,
            height,
        })
    }

    pub fn try_get_mut(&mut self, coord: Coord) -> Result<&mut T> {
        let (width, height) = (self.width, self.height);
        self.get_mut(coord).ok_or(ColonyError::OutOfBounds {
            x: coord.x,
            y: coord.y,
            width,
            height,
        })
    }

    /// Shift a coordinate, keeping only in-bounds results
    pub fn offset(&self, coord: Coord, dx: i32, dy: i32) -> Option<Coord> {
        coord.offset(dx, dy).filter(|c| self.contains(*c))
    }

    /// In-bounds 8-neighbourhood of a cell, excluding the cell itself
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(coord, dx, dy))
    }

    pub fn center(&self) -> Coord {
        Coord::new(self.width / 2, self.height / 2)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
