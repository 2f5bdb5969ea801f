//! Grid maze localization for the Prometheus robot
//!
//! A population of hypotheses (cell + heading) is pruned against successive
//! 3x3 observations until only the robot's true pose remains.
pub mod common;
pub mod error;
pub mod perception;

pub use crate::common::{Hypothesis, Orientation};
pub use crate::error::{LocalizationError, Result};
pub use crate::perception::{
    HypothesisSet, LocalizationEngine, LocalizerConfig, Maze, Observation, ObservationSource,
    ScriptedObservations,
};
