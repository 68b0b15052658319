//! Strategy used for the neighbour-count pass of a step.
//!
//! Both strategies read the same generation and produce identical
//! buffers; the parallel one spreads rows across the rayon pool.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStrategy {
    /// Cell-by-cell on the calling thread
    #[default]
    Serial,
    /// Rows evaluated in parallel with rayon
    Parallel,
}

impl StepStrategy {
    /// Display name for UI
    pub fn name(&self) -> &'static str {
        match self {
            StepStrategy::Serial => "Serial",
            StepStrategy::Parallel => "Parallel",
        }
    }

    /// Cycle to the other strategy
    pub fn next(self) -> Self {
        match self {
            StepStrategy::Serial => StepStrategy::Parallel,
            StepStrategy::Parallel => StepStrategy::Serial,
        }
    }
}
