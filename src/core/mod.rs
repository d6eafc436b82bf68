//! Generic finite state machine engine.
//!
//! This module has no knowledge of tasks or rooms:
//! - Keys via the `StateKey` trait
//! - States with enter/exit/update/fixed-update hooks
//! - The machine that registers states and switches between them
//! - Edge guards and timestamped history
//!
//! Everything runs synchronously on the caller's thread. Hooks receive the
//! owner's context by `&mut` and must return promptly.

mod error;
mod guard;
mod history;
mod key;
mod machine;
mod state;

pub use error::FsmError;
pub use guard::TransitionGuard;
pub use history::{StateHistory, StateTransition};
pub use key::StateKey;
pub use machine::{FiniteStateMachine, MAX_CHAINED_TRANSITIONS};
pub use state::{ExitHook, Hook, HookResult, State, Transition};
