mod cell;
mod grid;
mod patterns;
mod algorithm;
pub mod format;

pub use cell::Cell;
pub use grid::Grid;
pub use patterns::{Pattern, presets};
pub use algorithm::StepStrategy;
pub use format::{BoardState, ImportMode};
