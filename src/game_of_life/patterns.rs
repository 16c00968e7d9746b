//! Named seed patterns

use super::Grid;
use crate::error::LifeError;
use std::fmt;
use std::str::FromStr;

/// Well-known starting patterns, placed relative to an anchor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// 2x2 still life
    Block,
    /// Period-2 oscillator
    Blinker,
    Glider,
    /// Period-2 oscillator made of two blocks
    Beacon,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [Pattern::Block, Pattern::Blinker, Pattern::Glider, Pattern::Beacon];

    /// Living cells as `(dx, dy)` offsets from the anchor
    pub fn offsets(self) -> &'static [(usize, usize)] {
        match self {
            Pattern::Block => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            Pattern::Blinker => &[(0, 1), (1, 1), (2, 1)],
            Pattern::Glider => &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
            Pattern::Beacon => &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
        }
    }

    /// Bounding box `(width, height)`
    pub fn size(self) -> (usize, usize) {
        self.offsets()
            .iter()
            .fold((0, 0), |(w, h), &(dx, dy)| (w.max(dx + 1), h.max(dy + 1)))
    }

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Block => "block",
            Pattern::Blinker => "blinker",
            Pattern::Glider => "glider",
            Pattern::Beacon => "beacon",
        }
    }

    /// Absolute coordinates when anchored at `(x, y)`
    pub fn cells_at(self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
        self.offsets().iter().map(move |&(dx, dy)| (x + dx, y + dy))
    }

    /// Grid of the given size with the pattern centered in it
    pub fn centered(self, width: usize, height: usize) -> Result<Grid, LifeError> {
        let (w, h) = self.size();
        let x = width.saturating_sub(w) / 2;
        let y = height.saturating_sub(h) / 2;
        Grid::from_alive_cells(width, height, self.cells_at(x, y))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LifeError::UnknownPattern(s.to_string()))
    }
}
