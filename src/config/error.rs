//! Room configuration errors.

use crate::room::Modality;
use thiserror::Error;

/// A single problem found while validating a room configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("Room has no tasks")]
    NoTasks,

    #[error("{modality} plan is empty (start {start}, end {end})")]
    EmptyPlan {
        modality: Modality,
        start: usize,
        end: usize,
    },

    #[error("{modality} plan ends at {end} but the room only has {task_count} tasks")]
    PlanOutOfRange {
        modality: Modality,
        end: usize,
        task_count: usize,
    },
}

/// Errors that can occur when loading or checking a room configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed
    #[error("Failed to parse room config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but does not fit the room
    #[error("Invalid room config: {violations:?}")]
    Invalid { violations: Vec<ConfigViolation> },
}
