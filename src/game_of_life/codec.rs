//! Text codec for the set of living cells
//!
//! The exported form is a JSON array of `{"x": .., "y": ..}` objects listing
//! every living cell, outer x, inner y.

use super::Grid;
use crate::error::LifeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the exported cell list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: usize,
    pub y: usize,
}

/// Serialize every living cell of `grid`
pub fn export_cells(grid: &Grid) -> Result<String, LifeError> {
    let coords: Vec<CellCoord> = grid
        .alive_cells()
        .into_iter()
        .map(|(x, y)| CellCoord { x, y })
        .collect();

    serde_json::to_string(&coords).map_err(LifeError::Export)
}

/// Parse exported text into a fresh `width` x `height` grid.
///
/// Fails with [`LifeError::Parse`] when the text is not JSON and with
/// [`LifeError::InvalidStructure`] when it is not a list of integer
/// coordinates inside the grid. Nothing is mutated on failure.
pub fn import_cells(text: &str, width: usize, height: usize) -> Result<Grid, LifeError> {
    let value: Value = serde_json::from_str(text)?;

    let entries = value
        .as_array()
        .ok_or_else(|| LifeError::InvalidStructure("expected an array of cells".to_string()))?;

    let mut grid = Grid::new(width, height);
    for (i, entry) in entries.iter().enumerate() {
        // serde would also accept `[x, y]` for a struct; only objects are valid here
        if !entry.is_object() {
            return Err(LifeError::InvalidStructure(format!(
                "entry {}: expected an object with x and y",
                i
            )));
        }
        let coord = CellCoord::deserialize(entry).map_err(|e| {
            LifeError::InvalidStructure(format!("entry {}: {}", i, e))
        })?;

        if !grid.contains(coord.x, coord.y) {
            return Err(LifeError::InvalidStructure(format!(
                "entry {}: ({}, {}) is outside the {}x{} grid",
                i, coord.x, coord.y, width, height
            )));
        }
        grid.set(coord.x, coord.y, true)?;
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format() {
        let grid = Grid::from_alive_cells(4, 4, [(2, 1), (0, 3)]).unwrap();
        assert_eq!(export_cells(&grid).unwrap(), r#"[{"x":0,"y":3},{"x":2,"y":1}]"#);
        assert_eq!(export_cells(&Grid::new(4, 4)).unwrap(), "[]");
    }

    #[test]
    fn test_export_error_is_reported_separately() {
        let source = serde_json::from_str::<CellCoord>("x").unwrap_err();
        let err = LifeError::Export(source);
        assert!(!err.is_import_error());
        assert!(err.to_string().starts_with("failed to export cells"));
    }

    #[test]
    fn test_round_trip() {
        let grid = Grid::from_alive_cells(
            6,
            5,
            [(0, 0), (5, 4), (2, 3), (3, 2), (1, 4), (5, 0)],
        )
        .unwrap();
        let text = export_cells(&grid).unwrap();
        assert_eq!(import_cells(&text, 6, 5).unwrap(), grid);
    }

    #[test]
    fn test_import_two_cells() {
        let grid = import_cells(r#"[{"x":0,"y":0},{"x":1,"y":1}]"#, 10, 10).unwrap();
        assert_eq!(grid.count_alive(), 2);
        assert!(grid.get(0, 0).unwrap());
        assert!(grid.get(1, 1).unwrap());
    }

    #[test]
    fn test_import_accepts_whitespace_and_extra_fields() {
        let text = "[ {\"y\": 2, \"x\": 1, \"note\": \"seed\"} ]\n";
        let grid = import_cells(text, 3, 3).unwrap();
        assert_eq!(grid.alive_cells(), vec![(1, 2)]);
    }

    #[test]
    fn test_import_parse_error() {
        assert!(matches!(import_cells("not json", 10, 10), Err(LifeError::Parse(_))));
        assert!(matches!(import_cells("[{\"x\":1", 10, 10), Err(LifeError::Parse(_))));
    }

    #[test]
    fn test_import_out_of_bounds() {
        let result = import_cells(r#"[{"x":99,"y":0}]"#, 10, 10);
        assert!(matches!(result, Err(LifeError::InvalidStructure(_))));

        // y is bounded by the height
        let result = import_cells(r#"[{"x":0,"y":10}]"#, 20, 10);
        assert!(matches!(result, Err(LifeError::InvalidStructure(_))));
    }

    #[test]
    fn test_import_bad_structure() {
        for text in [
            r#"{"x":1,"y":1}"#,
            r#"[{"x":1}]"#,
            r#"[{"x":"1","y":1}]"#,
            r#"[{"x":1.5,"y":1}]"#,
            r#"[{"x":-1,"y":1}]"#,
            r#"[[1,1]]"#,
            r#"[null]"#,
        ] {
            let result = import_cells(text, 10, 10);
            assert!(
                matches!(result, Err(LifeError::InvalidStructure(_))),
                "expected InvalidStructure for {}",
                text
            );
        }
    }
}
