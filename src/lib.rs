//! Interactive Game of Life simulator
//!
//! A fixed-size grid, a birth/survival rules engine, a JSON cell-list codec
//! and a controller that drives them for a presentation layer.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use error::LifeError;
pub use game_of_life::{Grid, LifeEngine, RuleSet};
pub use simulation::{Controller, Session, Stats};

/// Evolve `grid` for `generations` steps under the rules in `settings`
pub fn evolve(settings: &Settings, grid: Grid, generations: usize) -> Result<Grid, LifeError> {
    let engine = LifeEngine::new(settings.rule_set()?);
    Ok(engine.evolve_generations(grid, generations))
}
