//! Per-task state protocol.
//!
//! Every task instance runs its own machine over three states:
//!
//! - `Placing`: the task can be moved around; its puzzle is inert
//! - `Solving`: placement is frozen and the puzzle reacts to interactions
//! - `Solved`: terminal for the current play session
//!
//! The owner (normally the room) forces `Placing` during setup, then moves
//! the task to `Solving`. The machine moves itself to `Solved` once the
//! task's [`TaskBehaviour`] reports a correct solution.

mod graph;
mod grt;
pub mod kinds;
mod metrics;
mod rotation;

pub use graph::TaskContext;
pub use grt::{GrtTask, TaskReport};
pub use metrics::{Interaction, TaskMetrics};
pub use rotation::StepRotation;

use crate::core::FsmError;
use std::time::Duration;
use thiserror::Error;

crate::state_key! {
    /// State of a single task.
    pub enum TaskState {
        Placing,
        Solving,
        Solved,
    }
    final: [Solved]
}

/// Errors raised by task setup and interaction routing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task '{task}' exposes {found} interactive elements, expected at least {expected}")]
    MissingElements {
        task: String,
        expected: usize,
        found: usize,
    },

    #[error("Task '{task}' has no interactive element {element} (it has {count})")]
    UnknownElement {
        task: String,
        element: usize,
        count: usize,
    },

    #[error(transparent)]
    Fsm(#[from] FsmError),
}

/// Capability every concrete task kind provides.
///
/// The task machine only talks to this trait. Placement hooks call
/// [`freeze`](Self::freeze)/[`unfreeze`](Self::unfreeze); while solving, the
/// machine forwards ticks and interactions and polls
/// [`check_solution`](Self::check_solution) once per tick.
pub trait TaskBehaviour {
    /// Short label of the task kind ("clock", "cryptex", ...).
    fn kind(&self) -> &str;

    /// Number of interactive elements the task's controller exposes.
    fn interactive_elements(&self) -> usize;

    /// Minimum number of elements the puzzle logic needs.
    fn required_elements(&self) -> usize {
        1
    }

    /// Lock spatial manipulation of the task.
    fn freeze(&mut self);

    /// Allow spatial manipulation of the task.
    fn unfreeze(&mut self);

    fn is_frozen(&self) -> bool;

    /// Advance puzzle mechanics by one tick. Only called while solving.
    fn on_solving_tick(&mut self, delta: Duration);

    /// React to an interaction on one element. Only called while solving.
    fn handle(&mut self, element: usize, interaction: Interaction);

    fn check_solution(&self) -> bool;

    /// Reveal completion feedback.
    fn on_solved(&mut self) {}

    fn set_visible(&mut self, _visible: bool) {}

    /// Put the puzzle back in its initial configuration.
    fn reset(&mut self);
}
