//! Rehab Escape: tick-driven state machines for a rehabilitation escape room
//!
//! The crate is split in two layers. The generic engine in [`core`] knows
//! nothing about games: it registers keyed states, switches between them and
//! runs their hooks. The protocols in [`task`] and [`room`] are built on it.
//!
//! # Core Concepts
//!
//! - **FSM engine**: `FiniteStateMachine<K, Ctx>` with enter/exit/update hooks
//! - **Task protocol**: Placing -> Solving -> Solved per task instance
//! - **Room protocol**: Ready -> Playing -> Pause / Solved, sequencing tasks
//!
//! Everything is single-threaded and driven by the host's frame loop: call
//! `update` once per tick, and call state setters from UI handlers.
//!
//! # Example
//!
//! ```rust
//! use rehab_escape::config::RoomConfig;
//! use rehab_escape::room::{Modality, RecordingHost, Room, RoomState, SessionContext};
//! use rehab_escape::task::kinds::ClockTask;
//! use rehab_escape::task::{GrtTask, Interaction};
//! use std::time::Duration;
//!
//! let step = Duration::from_millis(50);
//! let clock = GrtTask::new("clock", ClockTask::with_interval((2, 0), (3, 0), step)).unwrap();
//! let mut room = Room::new(
//!     RoomConfig::single_track(1),
//!     vec![clock],
//!     SessionContext::new("player-1"),
//!     RecordingHost::new(),
//! )
//! .unwrap();
//!
//! room.set_state(RoomState::Ready).unwrap();
//! room.start(Modality::Press).unwrap();
//! room.begin_solving(0).unwrap();
//! room.interact(0, 0, Interaction::Press).unwrap();
//! room.update(step).unwrap();
//!
//! assert_eq!(room.state(), Some(RoomState::Ready));
//! assert!(room.session().is_solved(Modality::Press));
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod room;
pub mod task;

// Re-export commonly used types
pub use self::core::{FiniteStateMachine, FsmError, State, StateKey, Transition};
pub use room::{Modality, Room, RoomState};
pub use task::{GrtTask, TaskBehaviour, TaskState};
