//! Game of Life rules implementation

use super::Grid;
use crate::error::LifeError;
use itertools::iproduct;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Maximum 8 neighbors in the Moore neighborhood
pub const MAX_NEIGHBORS: u8 = 8;

/// Birth and survival neighbor counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    survive: BTreeSet<u8>,
    birth: BTreeSet<u8>,
}

impl RuleSet {
    /// Build a rule set, rejecting counts above eight
    pub fn new<S, B>(survive: S, birth: B) -> Result<Self, LifeError>
    where
        S: IntoIterator<Item = u8>,
        B: IntoIterator<Item = u8>,
    {
        let survive: BTreeSet<u8> = survive.into_iter().collect();
        let birth: BTreeSet<u8> = birth.into_iter().collect();

        if let Some(&n) = survive.iter().chain(birth.iter()).find(|&&n| n > MAX_NEIGHBORS) {
            return Err(LifeError::InvalidRule(format!(
                "neighbor count {} exceeds {}",
                n, MAX_NEIGHBORS
            )));
        }

        Ok(Self { survive, birth })
    }

    /// Conway's original rule, B3/S23
    pub fn conway() -> Self {
        Self {
            survive: BTreeSet::from([2, 3]),
            birth: BTreeSet::from([3]),
        }
    }

    pub fn survive_counts(&self) -> impl Iterator<Item = u8> + '_ {
        self.survive.iter().copied()
    }

    pub fn birth_counts(&self) -> impl Iterator<Item = u8> + '_ {
        self.birth.iter().copied()
    }

    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(&self, current_state: bool, neighbor_count: u8) -> bool {
        if current_state {
            self.survive.contains(&neighbor_count)
        } else {
            self.birth.contains(&neighbor_count)
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::conway()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for n in &self.birth {
            write!(f, "{}", n)?;
        }
        write!(f, "/S")?;
        for n in &self.survive {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}

/// Parses `B3/S23` notation (case-insensitive, either half may come first)
impl FromStr for RuleSet {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut birth = None;
        let mut survive = None;

        for part in s.trim().split('/') {
            let mut chars = part.chars();
            let slot = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survive,
                _ => return Err(LifeError::InvalidRule(format!("expected B.../S..., got '{}'", s))),
            };
            if slot.is_some() {
                return Err(LifeError::InvalidRule(format!("duplicate section in '{}'", s)));
            }
            let counts = chars
                .map(|c| {
                    c.to_digit(10)
                        .map(|d| d as u8)
                        .ok_or_else(|| LifeError::InvalidRule(format!("invalid digit '{}' in '{}'", c, s)))
                })
                .collect::<Result<Vec<u8>, _>>()?;
            *slot = Some(counts);
        }

        match (birth, survive) {
            (Some(birth), Some(survive)) => Self::new(survive, birth),
            _ => Err(LifeError::InvalidRule(format!("'{}' needs both B and S sections", s))),
        }
    }
}

/// Game of Life rules engine
#[derive(Debug, Clone, Default)]
pub struct LifeEngine {
    rules: RuleSet,
}

impl LifeEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Count living neighbors for a cell. Off-grid positions count as dead;
    /// the grid does not wrap.
    pub fn count_neighbors(grid: &Grid, x: usize, y: usize) -> u8 {
        let mut count = 0;

        for (dx, dy) in iproduct!([-1isize, 0, 1], [-1isize, 0, 1]) {
            if dx == 0 && dy == 0 {
                continue;
            }
            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                continue;
            };
            if grid.contains(nx, ny) && grid.is_alive(nx, ny) {
                count += 1;
            }
        }

        count
    }

    /// Apply the rules to evolve the grid one generation forward.
    ///
    /// Every cell is computed from `current`; the result is a new grid.
    pub fn next_generation(&self, current: &Grid) -> Grid {
        Grid::from_fn(current.width(), current.height(), |x, y| {
            let neighbors = Self::count_neighbors(current, x, y);
            self.rules.should_be_alive(current.is_alive(x, y), neighbors)
        })
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(&self, mut grid: Grid, generations: usize) -> Grid {
        for _ in 0..generations {
            grid = self.next_generation(&grid);
        }
        grid
    }
}
