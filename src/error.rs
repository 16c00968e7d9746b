//! Error types for the simulation core

use thiserror::Error;

/// Errors reported by the grid, engine, codec and controller.
#[derive(Debug, Error)]
pub enum LifeError {
    /// A coordinate outside `[0, width) x [0, height)`.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Import text is not well-formed JSON.
    #[error("import text is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The cell list could not be serialized.
    #[error("failed to export cells: {0}")]
    Export(#[source] serde_json::Error),

    /// Import text parsed but is not a list of in-bounds `{x, y}` pairs.
    #[error("invalid cell list: {0}")]
    InvalidStructure(String),

    /// Birth/survival counts that are malformed or exceed eight neighbours.
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// A grid whose size differs from the session grid.
    #[error("grid is {found_width}x{found_height}, expected {width}x{height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },

    #[error("unknown pattern: {0}")]
    UnknownPattern(String),
}

impl LifeError {
    /// True for failures of `import_cells`, which leave the session untouched.
    pub fn is_import_error(&self) -> bool {
        matches!(self, LifeError::Parse(_) | LifeError::InvalidStructure(_))
    }
}
