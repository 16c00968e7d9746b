//! Game of Life core functionality

pub mod codec;
pub mod grid;
pub mod patterns;
pub mod rules;

pub use codec::{export_cells, import_cells, CellCoord};
pub use grid::Grid;
pub use patterns::Pattern;
pub use rules::{LifeEngine, RuleSet};
