// Domain layer - Core business logic
pub mod domain;

// Application layer - Use cases and coordination
pub mod application;

// Infrastructure layer - UI, rendering, input
pub mod ui;
pub mod rendering;
pub mod input;

pub mod error;

// Re-exports for convenience
pub use domain::{Cell, Grid, ImportMode, Pattern, StepStrategy, presets};
pub use application::{IntervalScheduler, LifeConfig, RunState, Simulation, SimulationEvent};
pub use error::{FormatError, LifeError, LifeResult};
