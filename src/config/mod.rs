//! Room configuration.
//!
//! A room plays an ordered list of tasks. Each interaction modality plays a
//! contiguous slice of that list, described by a [`ModalityPlan`]. Configs are
//! plain serde types and usually arrive as JSON:
//!
//! ```rust
//! use rehab_escape::config::RoomConfig;
//!
//! let config = RoomConfig::from_json(
//!     r#"{
//!         "name": "workshop",
//!         "press": { "start": 0, "end": 3 },
//!         "pinch_slide": { "start": 3, "end": 5 }
//!     }"#,
//! )
//! .unwrap();
//!
//! assert!(config.check(5).is_ok());
//! assert!(config.check(4).is_err());
//! ```

pub mod error;
pub mod rules;

pub use error::{ConfigError, ConfigViolation};

use crate::room::Modality;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;

/// Half-open range `[start, end)` of task indices played by one modality.
///
/// `start` is also the cursor value the room begins with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalityPlan {
    pub start: usize,
    pub end: usize,
}

impl ModalityPlan {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `index` is the last task of the plan.
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.end
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub press: ModalityPlan,
    pub pinch_slide: ModalityPlan,
}

fn default_name() -> String {
    "escape-room".to_string()
}

impl RoomConfig {
    /// Both modalities play every one of `task_count` tasks from the start.
    pub fn single_track(task_count: usize) -> Self {
        let plan = ModalityPlan {
            start: 0,
            end: task_count,
        };
        Self {
            name: default_name(),
            press: plan,
            pinch_slide: plan,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn plan(&self, modality: Modality) -> &ModalityPlan {
        match modality {
            Modality::Press => &self.press,
            Modality::PinchSlide => &self.pinch_slide,
        }
    }

    /// Check the config against a room with `task_count` tasks, reporting
    /// every violation at once.
    pub fn check(&self, task_count: usize) -> Result<(), ConfigError> {
        match rules::validate(self, task_count) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => Err(ConfigError::Invalid {
                violations: errors.iter().cloned().collect(),
            }),
        }
    }
}
