//! Display and output formatting utilities

use crate::game_of_life::Grid;
use crate::simulation::{Renderer, Stats};
use std::io::Write;

/// Format grids for the terminal
pub struct GridFormatter;

impl GridFormatter {
    /// Glyph pair for a living cell; the outline style frames it
    fn alive_glyph(outline: bool) -> &'static str {
        if outline {
            "[]"
        } else {
            "██"
        }
    }

    /// Format a grid, one text row per grid row
    pub fn format_grid(grid: &Grid, outline: bool) -> String {
        let alive = Self::alive_glyph(outline);
        let mut output = String::with_capacity(grid.height() * (grid.width() * 2 + 1));
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                output.push_str(if grid.get(x, y).unwrap_or(false) { alive } else { "··" });
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid, outline: bool) -> String {
        let alive = Self::alive_glyph(outline);
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for y in 0..grid.height() {
            output.push_str(&format!("{:2} ", y));
            for x in 0..grid.width() {
                output.push_str(if grid.get(x, y).unwrap_or(false) { alive } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Grid followed by the stats line
    pub fn format_frame(grid: &Grid, stats: Stats, outline: bool) -> String {
        let mut output = Self::format_grid(grid, outline);
        output.push_str(&stats.to_string());
        output.push('\n');
        output
    }
}

/// Redraws the whole frame on stdout after every mutation
#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    pub outline: bool,
    /// Clear the screen before each frame
    pub redraw_in_place: bool,
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, grid: &Grid, stats: Stats) {
        let mut stdout = std::io::stdout().lock();
        if self.redraw_in_place {
            let _ = write!(stdout, "\x1b[2J\x1b[H");
        }
        let _ = write!(stdout, "{}", GridFormatter::format_frame(grid, stats, self.outline));
        let _ = stdout.flush();
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_formatting() {
        let grid = Grid::from_alive_cells(3, 2, [(0, 0), (2, 1)]).unwrap();

        assert_eq!(GridFormatter::format_grid(&grid, true), "[]····\n····[]\n");
        assert_eq!(GridFormatter::format_grid(&grid, false), "██····\n····██\n");

        let with_coords = GridFormatter::format_grid_with_coords(&grid, true);
        assert!(with_coords.starts_with("    0 1 2\n"));
        assert!(with_coords.contains(" 1 ····[]"));
    }

    #[test]
    fn test_frame_has_stats_line() {
        let grid = Grid::new(2, 2);
        let frame = GridFormatter::format_frame(&grid, Stats::default(), true);
        assert!(frame.ends_with("Generation: 1 | Population: 0 | Delta: 0\n"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
