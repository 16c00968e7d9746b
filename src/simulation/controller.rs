//! Simulation state and the operations the presentation layer calls

use crate::config::Settings;
use crate::error::LifeError;
use crate::game_of_life::{export_cells, import_cells, Grid, LifeEngine};
use std::fmt;

/// Counters shown alongside the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Starts at 1, +1 per advance
    pub generation: u64,
    pub population: usize,
    /// Population change since the last advance, adjusted by manual edits
    pub delta: i64,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            generation: 1,
            population: 0,
            delta: 0,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generation: {} | Population: {} | Delta: {}",
            self.generation, self.population, self.delta
        )
    }
}

/// Receives the grid after every mutation
pub trait Renderer {
    fn render(&mut self, grid: &Grid, stats: Stats);
}

impl<F> Renderer for F
where
    F: FnMut(&Grid, Stats),
{
    fn render(&mut self, grid: &Grid, stats: Stats) {
        self(grid, stats)
    }
}

/// Renderer that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _grid: &Grid, _stats: Stats) {}
}

/// Owns the grid, the counters and the render callback
pub struct Controller {
    engine: LifeEngine,
    grid: Grid,
    stats: Stats,
    batch_steps: usize,
    renderer: Box<dyn Renderer>,
}

impl Controller {
    /// Create a controller with an empty grid sized from `settings`
    pub fn new(settings: &Settings) -> Result<Self, LifeError> {
        Self::with_renderer(settings, NullRenderer)
    }

    pub fn with_renderer<R>(settings: &Settings, renderer: R) -> Result<Self, LifeError>
    where
        R: Renderer + 'static,
    {
        Ok(Self {
            engine: LifeEngine::new(settings.rule_set()?),
            grid: Grid::new(settings.width, settings.height),
            stats: Stats::default(),
            batch_steps: settings.batch_steps,
            renderer: Box::new(renderer),
        })
    }

    pub fn set_renderer<R>(&mut self, renderer: R)
    where
        R: Renderer + 'static,
    {
        self.renderer = Box::new(renderer);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn engine(&self) -> &LifeEngine {
        &self.engine
    }

    pub fn batch_steps(&self) -> usize {
        self.batch_steps
    }

    fn notify(&mut self) {
        self.renderer.render(&self.grid, self.stats);
    }

    /// Set one cell from pointer input.
    ///
    /// Returns whether the cell changed. Stats move by one and the renderer
    /// runs only on a change, so dragging over the same cell is free.
    pub fn on_cell_edit(&mut self, x: usize, y: usize, alive: bool) -> Result<bool, LifeError> {
        if self.grid.get(x, y)? == alive {
            return Ok(false);
        }

        self.grid.set(x, y, alive)?;
        if alive {
            self.stats.population += 1;
            self.stats.delta += 1;
        } else {
            self.stats.population -= 1;
            self.stats.delta -= 1;
        }
        self.notify();
        Ok(true)
    }

    /// Advance one generation: swap in the next grid and refresh the counters
    pub fn advance(&mut self) {
        let next = self.engine.next_generation(&self.grid);
        let population = next.count_alive();

        self.stats.delta = population as i64 - self.stats.population as i64;
        self.stats.population = population;
        self.stats.generation += 1;
        self.grid = next;
        self.notify();
    }

    /// One manual step or one timer tick
    pub fn on_advance_requested(&mut self) {
        self.advance();
    }

    /// Run `steps` advances back to back, each counted like a manual step
    pub fn skip_steps(&mut self, steps: usize) {
        for _ in 0..steps {
            self.advance();
        }
    }

    /// Run the configured batch of steps
    pub fn on_skip_requested(&mut self) {
        self.skip_steps(self.batch_steps);
    }

    /// Reset grid and counters. Stopping auto-play is the session's job.
    pub fn on_clear_requested(&mut self) {
        self.grid.clear();
        self.stats = Stats::default();
        self.notify();
    }

    pub fn on_export_requested(&self) -> Result<String, LifeError> {
        export_cells(&self.grid)
    }

    /// Replace the grid with imported cells.
    ///
    /// On success the generation restarts at 1, population is recounted and
    /// delta is zeroed; returns the new population. On failure the grid and
    /// stats are left as they were.
    pub fn on_import_requested(&mut self, text: &str) -> Result<usize, LifeError> {
        let grid = import_cells(text, self.grid.width(), self.grid.height())?;
        self.load_grid(grid)
    }

    /// Replace the grid wholesale, e.g. with a seed pattern.
    /// Counters restart as on import.
    pub fn load_grid(&mut self, grid: Grid) -> Result<usize, LifeError> {
        if grid.width() != self.grid.width() || grid.height() != self.grid.height() {
            return Err(LifeError::DimensionMismatch {
                width: self.grid.width(),
                height: self.grid.height(),
                found_width: grid.width(),
                found_height: grid.height(),
            });
        }

        self.stats = Stats {
            generation: 1,
            population: grid.count_alive(),
            delta: 0,
        };
        self.grid = grid;
        self.notify();
        Ok(self.stats.population)
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("engine", &self.engine)
            .field("stats", &self.stats)
            .field("batch_steps", &self.batch_steps)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::Pattern;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn small_settings() -> Settings {
        Settings {
            width: 10,
            height: 10,
            batch_steps: 4,
            ..Settings::default()
        }
    }

    fn counting_controller() -> (Controller, Rc<RefCell<Vec<Stats>>>) {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&frames);
        let controller = Controller::with_renderer(&small_settings(), move |_: &Grid, stats: Stats| {
            sink.borrow_mut().push(stats);
        })
        .unwrap();
        (controller, frames)
    }

    #[test]
    fn test_initial_state() {
        let controller = Controller::new(&Settings::default()).unwrap();
        assert_eq!(controller.grid().width(), 64);
        assert_eq!(controller.grid().height(), 32);
        assert_eq!(controller.stats(), Stats::default());
        assert_eq!(controller.stats().generation, 1);
    }

    #[test]
    fn test_repeated_edit_counts_once() {
        let (mut controller, frames) = counting_controller();

        assert!(controller.on_cell_edit(2, 3, true).unwrap());
        assert!(!controller.on_cell_edit(2, 3, true).unwrap());

        assert_eq!(controller.stats().population, 1);
        assert_eq!(controller.stats().delta, 1);
        assert_eq!(frames.borrow().len(), 1);

        assert!(controller.on_cell_edit(2, 3, false).unwrap());
        assert_eq!(controller.stats().population, 0);
        assert_eq!(controller.stats().delta, 0);
    }

    #[test]
    fn test_edit_out_of_bounds() {
        let mut settings = small_settings();
        settings.width = 20;
        let mut controller = Controller::new(&settings).unwrap();

        // y = 15 is inside the width but outside the height
        let result = controller.on_cell_edit(0, 15, true);
        assert!(matches!(result, Err(LifeError::OutOfBounds { .. })));
        assert_eq!(controller.stats().population, 0);
    }

    #[test]
    fn test_advance_updates_stats() {
        let (mut controller, frames) = counting_controller();
        for x in 0..3 {
            controller.on_cell_edit(x, 0, true).unwrap();
        }

        controller.on_advance_requested();

        // a blinker on the top edge loses its two side cells and gains one below
        let stats = controller.stats();
        assert_eq!(stats.generation, 2);
        assert_eq!(stats.population, 2);
        assert_eq!(stats.delta, -1);
        assert_eq!(frames.borrow().last().copied(), Some(stats));
    }

    #[test]
    fn test_delta_includes_manual_edits() {
        let (mut controller, _) = counting_controller();
        controller.on_cell_edit(5, 5, true).unwrap();
        controller.advance();
        assert_eq!(controller.stats().population, 0);
        assert_eq!(controller.stats().delta, -1);
    }

    #[test]
    fn test_skip_counts_every_step() {
        let (mut controller, frames) = counting_controller();
        controller.load_grid(Pattern::Blinker.centered(10, 10).unwrap()).unwrap();
        let before = frames.borrow().len();

        controller.on_skip_requested();

        assert_eq!(controller.stats().generation, 5);
        assert_eq!(controller.stats().population, 3);
        assert_eq!(controller.stats().delta, 0);
        assert_eq!(frames.borrow().len() - before, 4);
    }

    #[test]
    fn test_clear_resets_everything() {
        let (mut controller, _) = counting_controller();
        controller.load_grid(Pattern::Glider.centered(10, 10).unwrap()).unwrap();
        controller.skip_steps(3);

        controller.on_clear_requested();

        assert!(controller.grid().is_empty());
        assert_eq!(controller.stats(), Stats::default());
    }

    #[test]
    fn test_import_sets_population() {
        let (mut controller, _) = counting_controller();
        let population = controller
            .on_import_requested(r#"[{"x":0,"y":0},{"x":1,"y":1}]"#)
            .unwrap();

        assert_eq!(population, 2);
        assert_eq!(controller.stats().population, 2);
        assert!(controller.grid().get(0, 0).unwrap());
        assert!(controller.grid().get(1, 1).unwrap());
    }

    #[test]
    fn test_failed_import_leaves_state() {
        let (mut controller, frames) = counting_controller();
        controller.on_cell_edit(4, 4, true).unwrap();
        controller.advance();
        controller.on_cell_edit(7, 7, true).unwrap();
        let grid = controller.grid().clone();
        let stats = controller.stats();
        let rendered = frames.borrow().len();

        let err = controller.on_import_requested("not json").unwrap_err();
        assert!(matches!(err, LifeError::Parse(_)));
        let err = controller.on_import_requested(r#"[{"x":1,"y":1},{"x":99,"y":0}]"#).unwrap_err();
        assert!(matches!(err, LifeError::InvalidStructure(_)));
        assert!(err.is_import_error());

        assert_eq!(controller.grid(), &grid);
        assert_eq!(controller.stats(), stats);
        assert_eq!(frames.borrow().len(), rendered);
    }

    #[test]
    fn test_export_import_round_trip() {
        let (mut controller, _) = counting_controller();
        controller.load_grid(Pattern::Beacon.centered(10, 10).unwrap()).unwrap();
        controller.advance();
        let grid = controller.grid().clone();

        let text = controller.on_export_requested().unwrap();
        controller.on_clear_requested();
        controller.on_import_requested(&text).unwrap();

        assert_eq!(controller.grid(), &grid);
    }

    #[test]
    fn test_load_grid_rejects_other_size() {
        let mut controller = Controller::new(&small_settings()).unwrap();
        let result = controller.load_grid(Grid::new(5, 5));
        assert!(matches!(result, Err(LifeError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_custom_rules_from_settings() {
        let mut settings = small_settings();
        settings.birth_counts = vec![1];
        settings.survival_counts = vec![];
        let mut controller = Controller::new(&settings).unwrap();
        controller.on_cell_edit(5, 5, true).unwrap();

        controller.advance();

        assert_eq!(controller.stats().population, 8);
        assert!(!controller.grid().get(5, 5).unwrap());
    }

    #[test]
    fn test_stats_display() {
        let stats = Stats {
            generation: 3,
            population: 7,
            delta: -2,
        };
        assert_eq!(stats.to_string(), "Generation: 3 | Population: 7 | Delta: -2");
    }
}
