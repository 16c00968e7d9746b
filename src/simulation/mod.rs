//! Simulation state, auto-play and the presentation-facing session

pub mod controller;
pub mod playback;
pub mod session;

pub use controller::{Controller, NullRenderer, Renderer, Stats};
pub use playback::Playback;
pub use session::Session;
