//! Errors raised by the state machine engine.

use thiserror::Error;

/// Errors that can occur while configuring or driving a state machine.
///
/// All of these are configuration errors: they surface the first time the
/// offending registration or transition is attempted and are never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsmError {
    #[error("State '{state}' is already registered on machine '{machine}'")]
    DuplicateState { machine: String, state: String },

    #[error("State '{state}' is not registered on machine '{machine}'")]
    UnknownState { machine: String, state: String },

    #[error("Machine '{machine}' does not allow a transition from '{from}' to '{to}'")]
    TransitionRejected {
        machine: String,
        from: String,
        to: String,
    },

    #[error("Machine '{machine}' exceeded {limit} chained transitions ending at '{state}'")]
    TransitionLoop {
        machine: String,
        state: String,
        limit: usize,
    },

    #[error("Machine '{machine}' must start in '{initial}', not '{state}'")]
    InitialStateRequired {
        machine: String,
        initial: String,
        state: String,
    },

    #[error("Machine '{machine}' has no states registered")]
    NoStates { machine: String },
}
