//! Room-level state protocol.
//!
//! One room governs a whole play session:
//!
//! - `Ready`: resting state; the menu lists the modalities still open
//! - `Playing(modality)`: tasks are placed, solved and sequenced
//! - `Pause`: progress is persisted; the room can resume playing
//! - `Solved`: completion is recorded and the room drops back to `Ready`
//!
//! Tasks are solved strictly in list order. The room's cursor points at the
//! next task to bring into play, and moving it always forces that task to be
//! prepared again on the following tick.

mod escape;
mod graph;
mod host;
mod session;

pub use escape::Room;
pub use graph::RoomContext;
pub use host::{HostEvent, RecordingHost, RoomHost};
pub use session::{PlayerSession, SessionContext};

use crate::config::ConfigError;
use crate::core::{FsmError, StateKey};
use crate::task::TaskError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// How the player interacts with the tasks of a session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Press,
    PinchSlide,
}

impl Modality {
    pub const ALL: [Modality; 2] = [Modality::Press, Modality::PinchSlide];
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Press => write!(f, "press"),
            Self::PinchSlide => write!(f, "pinch-slide"),
        }
    }
}

/// State of the room machine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum RoomState {
    Ready,
    Playing(Modality),
    Pause,
    Solved,
}

impl StateKey for RoomState {
    fn name(&self) -> &str {
        match self {
            Self::Ready => "READY",
            Self::Playing(Modality::Press) => "PLAYING_PRESS",
            Self::Playing(Modality::PinchSlide) => "PLAYING_PINCHSLIDE",
            Self::Pause => "PAUSE",
            Self::Solved => "SOLVED",
        }
    }
}

/// Errors raised while building or driving a room.
#[derive(Debug, Error)]
pub enum RoomError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fsm(#[from] FsmError),

    #[error(transparent)]
    Task(#[from] TaskError),

    #[error("Room has no task {index} (it has {count})")]
    UnknownTask { index: usize, count: usize },

    #[error("Room is not paused")]
    NotPaused,

    #[error("Room is not playing")]
    NotPlaying,

    #[error("Task {index} is out of order; the task in play is {cursor}")]
    OutOfOrder { index: usize, cursor: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_state_names_are_distinct() {
        let states = [
            RoomState::Ready,
            RoomState::Playing(Modality::Press),
            RoomState::Playing(Modality::PinchSlide),
            RoomState::Pause,
            RoomState::Solved,
        ];
        let names: Vec<&str> = states.iter().map(|state| state.name()).collect();

        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn no_room_state_is_final() {
        assert!(!RoomState::Solved.is_final());
        assert!(!RoomState::Ready.is_final());
    }

    #[test]
    fn modality_uses_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&Modality::PinchSlide).unwrap(),
            "\"pinch_slide\""
        );
        assert_eq!(Modality::PinchSlide.to_string(), "pinch-slide");
    }
}
