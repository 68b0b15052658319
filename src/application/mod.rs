mod config;
mod events;
mod renderer;
mod scheduler;
mod simulation;

pub use config::LifeConfig;
pub use events::{EventBus, SimulationEvent};
pub use renderer::{CellBounds, CellView, NullRenderer, Renderer};
pub use scheduler::{IntervalScheduler, Scheduler, TickHandle};
pub use simulation::{RunState, Simulation};
