//! # Occupancy Grid
//!
//! Square wall/floor grid the walker carves into. Indexed `(row, col)` with
//! `row = y` and `col = x`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Wall,
    Floor,
}

impl Cell {
    /// Character used when printing a map.
    pub fn glyph(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Floor => '.',
        }
    }
}

/// A `D×D` array of cells, initialized to walls.
///
/// Accessors panic on out-of-range indices: callers check bounds first
/// (see [`OccupancyGrid::offset`]), so a bad index is a logic error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyGrid {
    dimensions: usize,
    cells: Vec<Cell>,
}

impl OccupancyGrid {
    /// Creates a grid of `dimensions × dimensions` walls.
    ///
    /// # Examples
    ///
    /// ```
    /// use hivegen::{Cell, OccupancyGrid};
    ///
    /// let grid = OccupancyGrid::new(3);
    /// assert_eq!(grid.get(2, 2), Cell::Wall);
    /// assert_eq!(grid.floor_count(), 0);
    /// ```
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            cells: vec![Cell::Wall; dimensions * dimensions],
        }
    }

    /// Side length of the grid.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// The cell the walker starts from.
    pub fn center(&self) -> (usize, usize) {
        (self.dimensions / 2, self.dimensions / 2)
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let index = self.index(row, col);
        self.cells[index] = cell;
    }

    pub fn is_floor(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Cell::Floor
    }

    /// Applies a `(Δrow, Δcol)` offset, returning `None` if it leaves the grid.
    pub fn offset(&self, row: usize, col: usize, delta: (isize, isize)) -> Option<(usize, usize)> {
        let row = row.checked_add_signed(delta.0)?;
        let col = col.checked_add_signed(delta.1)?;
        if row < self.dimensions && col < self.dimensions {
            Some((row, col))
        } else {
            None
        }
    }

    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == Cell::Floor).count()
    }

    /// Floor cells as `(row, col)` in row-major order.
    pub fn floor_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.dimensions;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Floor)
            .map(move |(index, _)| (index / size, index % size))
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.dimensions && col < self.dimensions,
            "grid index ({}, {}) out of bounds for {}x{} grid",
            row,
            col,
            self.dimensions,
            self.dimensions
        );
        row * self.dimensions + col
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.dimensions.max(1)) {
            let line: String = row.iter().map(|cell| cell.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
