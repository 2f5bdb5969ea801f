//! Perception module for Prometheus grid localization
pub mod filters;
pub mod hypotheses;
pub mod localization;
pub mod maze;
pub mod sensors;

pub use self::hypotheses::HypothesisSet;
pub use self::localization::{LocalizationEngine, LocalizerConfig, UpdateRule};
pub use self::maze::{Cell, Maze};
pub use self::sensors::{Glyph, Observation, ObservationSource, ScriptedObservations};
