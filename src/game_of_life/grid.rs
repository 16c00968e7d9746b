//! Grid representation and utilities for Game of Life

use crate::error::LifeError;
use itertools::iproduct;
use std::fmt;

/// A fixed-size Game of Life grid, indexed `(x, y)`.
///
/// Cells are stored column by column so that walking the storage in order
/// visits cells with `x` as the outer loop and `y` as the inner loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Create a grid with exactly the given cells alive
    pub fn from_alive_cells<I>(width: usize, height: usize, alive: I) -> Result<Self, LifeError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::new(width, height);
        for (x, y) in alive {
            grid.set(x, y, true)?;
        }
        Ok(grid)
    }

    /// Build a grid by evaluating `alive` for every cell, outer x, inner y
    pub(crate) fn from_fn<F>(width: usize, height: usize, mut alive: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let cells = iproduct!(0..width, 0..height)
            .map(|(x, y)| alive(x, y))
            .collect();
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    /// Whether `(x, y)` lies inside the grid
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), LifeError> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(LifeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Get cell value at coordinates
    pub fn get(&self, x: usize, y: usize) -> Result<bool, LifeError> {
        self.check_bounds(x, y)?;
        Ok(self.cells[self.index(x, y)])
    }

    /// Set cell value at coordinates.
    ///
    /// The grid keeps no aggregate statistics; callers tracking population
    /// must update it themselves.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> Result<(), LifeError> {
        self.check_bounds(x, y)?;
        let idx = self.index(x, y);
        self.cells[idx] = alive;
        Ok(())
    }

    /// Unchecked read for callers that already validated the coordinate.
    #[inline]
    pub(crate) fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)]
    }

    /// All living cell coordinates, outer x, inner y
    pub fn alive_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.width, 0..self.height)
            .filter(|&(x, y)| self.is_alive(x, y))
            .collect()
    }

    /// Count total living cells
    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Kill every cell, keeping the dimensions
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let symbol = if self.is_alive(x, y) { '1' } else { '0' };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
