//! A controller shared between input handlers and the auto-play timer

use super::controller::{Controller, Renderer, Stats};
use super::playback::{Playback, MIN_TICK_DELAY};
use crate::config::Settings;
use crate::error::LifeError;
use crate::utils::input::{Brush, PointerButton, Viewport};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Interactive session: one controller, at most one playback loop.
///
/// Playback calls must happen inside a [`tokio::task::LocalSet`].
#[derive(Debug)]
pub struct Session {
    controller: Rc<RefCell<Controller>>,
    playback: Option<Playback>,
    tick_delay: Duration,
    viewport: Viewport,
    brush: Brush,
}

impl Session {
    pub fn new(settings: &Settings) -> Result<Self, LifeError> {
        Ok(Self::from_controller(Controller::new(settings)?, settings))
    }

    pub fn with_renderer<R>(settings: &Settings, renderer: R) -> Result<Self, LifeError>
    where
        R: Renderer + 'static,
    {
        Ok(Self::from_controller(Controller::with_renderer(settings, renderer)?, settings))
    }

    fn from_controller(controller: Controller, settings: &Settings) -> Self {
        let viewport = Viewport {
            grid_width: settings.width,
            grid_height: settings.height,
            ..Viewport::default()
        };
        Self {
            controller: Rc::new(RefCell::new(controller)),
            playback: None,
            tick_delay: settings.tick_delay().max(MIN_TICK_DELAY),
            viewport,
            brush: Brush::default(),
        }
    }

    /// Shared handle to the controller
    pub fn controller(&self) -> Rc<RefCell<Controller>> {
        Rc::clone(&self.controller)
    }

    pub fn stats(&self) -> Stats {
        self.controller.borrow().stats()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn tick_delay(&self) -> Duration {
        self.tick_delay
    }

    /// Takes effect on the next `play`
    pub fn set_tick_delay(&mut self, delay: Duration) {
        self.tick_delay = delay.max(MIN_TICK_DELAY);
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// Start auto-play. Returns false if it was already running.
    ///
    /// # Panics
    ///
    /// Panics when called outside a [`tokio::task::LocalSet`].
    pub fn play(&mut self) -> bool {
        if self.playback.is_some() {
            return false;
        }
        self.playback = Some(Playback::start(self.controller(), self.tick_delay));
        true
    }

    /// Stop auto-play. Returns false if it was not running.
    pub fn stop(&mut self) -> bool {
        match self.playback.take() {
            Some(playback) => {
                playback.stop();
                true
            }
            None => false,
        }
    }

    pub fn on_cell_edit(&mut self, x: usize, y: usize, alive: bool) -> Result<bool, LifeError> {
        self.controller.borrow_mut().on_cell_edit(x, y, alive)
    }

    pub fn on_advance_requested(&mut self) {
        self.controller.borrow_mut().on_advance_requested();
    }

    pub fn on_skip_requested(&mut self) {
        self.controller.borrow_mut().on_skip_requested();
    }

    /// Stop auto-play, then reset grid and counters
    pub fn on_clear_requested(&mut self) {
        self.stop();
        self.controller.borrow_mut().on_clear_requested();
    }

    pub fn on_export_requested(&self) -> Result<String, LifeError> {
        self.controller.borrow().on_export_requested()
    }

    pub fn on_import_requested(&mut self, text: &str) -> Result<usize, LifeError> {
        self.controller.borrow_mut().on_import_requested(text)
    }

    /// Pointer pressed at canvas position `(px, py)`; paints the cell under it.
    /// Points off the grid are ignored.
    pub fn on_pointer_down(&mut self, button: PointerButton, px: f64, py: f64) -> Result<bool, LifeError> {
        self.brush.press(button);
        self.on_pointer_move(px, py)
    }

    /// Pointer moved; paints only while a button is held
    pub fn on_pointer_move(&mut self, px: f64, py: f64) -> Result<bool, LifeError> {
        match (self.brush.paint_value(), self.viewport.cell_at(px, py)) {
            (Some(alive), Some((x, y))) => self.on_cell_edit(x, y, alive),
            _ => Ok(false),
        }
    }

    pub fn on_pointer_up(&mut self, button: PointerButton) {
        self.brush.release(button);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            width: 8,
            height: 4,
            batch_steps: 3,
            ..Settings::default()
        }
    }

    #[test]
    fn test_pointer_drag_paints_cells() {
        let mut session = Session::new(&settings()).unwrap();
        session.set_viewport(Viewport::new(80.0, 40.0, 8, 4));

        assert!(session.on_pointer_down(PointerButton::Primary, 5.0, 5.0).unwrap());
        assert!(!session.on_pointer_move(9.0, 9.0).unwrap());
        assert!(session.on_pointer_move(15.0, 5.0).unwrap());
        session.on_pointer_up(PointerButton::Primary);
        assert!(!session.on_pointer_move(25.0, 5.0).unwrap());

        assert_eq!(session.stats().population, 2);

        assert!(session.on_pointer_down(PointerButton::Secondary, 15.0, 5.0).unwrap());
        assert_eq!(session.stats().population, 1);
        assert!(!session.on_pointer_move(500.0, 5.0).unwrap());
    }

    #[test]
    fn test_zero_delay_is_raised() {
        let settings = Settings {
            tick_delay_ms: 0,
            ..settings()
        };
        let mut session = Session::new(&settings).unwrap();
        assert_eq!(session.tick_delay(), MIN_TICK_DELAY);

        session.set_tick_delay(Duration::ZERO);
        assert_eq!(session.tick_delay(), MIN_TICK_DELAY);
    }

    #[test]
    fn test_stop_without_play_is_noop() {
        let mut session = Session::new(&settings()).unwrap();
        assert!(!session.is_playing());
        assert!(!session.stop());
    }

    #[test]
    fn test_skip_and_clear() {
        let mut session = Session::new(&settings()).unwrap();
        session.on_import_requested(r#"[{"x":1,"y":1},{"x":2,"y":1},{"x":3,"y":1}]"#).unwrap();
        session.on_skip_requested();
        assert_eq!(session.stats().generation, 4);

        session.on_clear_requested();
        assert_eq!(session.stats(), Stats::default());
        assert_eq!(session.on_export_requested().unwrap(), "[]");
    }
}
