//! Error types for the localization core

use thiserror::Error;

/// Errors raised while building localization inputs or running the filter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocalizationError {
    #[error("Hypothesis capacity exceeded: limit is {limit}")]
    CapacityExceeded { limit: usize },

    #[error("Malformed observation: {0}")]
    MalformedObservation(String),

    #[error("Invalid maze: {0}")]
    InvalidMaze(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LocalizationError>;
