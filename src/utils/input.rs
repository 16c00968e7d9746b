//! Pointer input: canvas-to-cell mapping and draw/erase drag state

/// Maps canvas pixels onto grid cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub grid_width: usize,
    pub grid_height: usize,
}

impl Viewport {
    pub fn new(canvas_width: f64, canvas_height: f64, grid_width: usize, grid_height: usize) -> Self {
        Self {
            canvas_width,
            canvas_height,
            grid_width,
            grid_height,
        }
    }

    /// Cell under the pointer, or `None` when the point is off the grid
    pub fn cell_at(&self, px: f64, py: f64) -> Option<(usize, usize)> {
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return None;
        }
        let cx = (px / self.canvas_width * self.grid_width as f64).floor();
        let cy = (py / self.canvas_height * self.grid_height as f64).floor();

        if cx < 0.0 || cy < 0.0 || cx >= self.grid_width as f64 || cy >= self.grid_height as f64 {
            return None;
        }
        Some((cx as usize, cy as usize))
    }

    /// Top-left pixel and size of a cell's rectangle
    pub fn cell_rect(&self, x: usize, y: usize) -> (f64, f64, f64, f64) {
        let w = self.canvas_width / self.grid_width as f64;
        let h = self.canvas_height / self.grid_height as f64;
        (x as f64 * w, y as f64 * h, w, h)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1024.0, 512.0, 64, 32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Draws living cells
    Primary,
    /// Erases cells
    Secondary,
}

/// Which value a drag is painting, if any
#[derive(Debug, Default, Clone, Copy)]
pub struct Brush {
    drawing: bool,
    erasing: bool,
}

impl Brush {
    pub fn press(&mut self, button: PointerButton) {
        match button {
            PointerButton::Primary => self.drawing = true,
            PointerButton::Secondary => self.erasing = true,
        }
    }

    pub fn release(&mut self, button: PointerButton) {
        match button {
            PointerButton::Primary => self.drawing = false,
            PointerButton::Secondary => self.erasing = false,
        }
    }

    /// Cell value painted on pointer move; drawing wins over erasing
    pub fn paint_value(&self) -> Option<bool> {
        if self.drawing {
            Some(true)
        } else if self.erasing {
            Some(false)
        } else {
            None
        }
    }
}
