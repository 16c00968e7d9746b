//! Presentation helpers: terminal output and pointer input

pub mod display;
pub mod input;

pub use display::{Color, ColorOutput, GridFormatter, TerminalRenderer};
pub use input::{Brush, PointerButton, Viewport};
