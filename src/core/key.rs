//! Keys that identify states inside a finite state machine.
//!
//! A key is a small value (usually a fieldless enum) that names a state.
//! Machines index their registered states by key, so keys must be hashable
//! and comparable.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine keys.
///
/// All methods are pure. A key carries no behavior of its own; hooks live on
/// the [`State`](crate::core::State) registered under it.
///
/// # Example
///
/// ```rust
/// use rehab_escape::core::StateKey;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Locked,
///     Open,
/// }
///
/// impl StateKey for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Locked => "Locked",
///             Self::Open => "Open",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Open)
///     }
/// }
///
/// assert_eq!(Door::Locked.name(), "Locked");
/// assert!(Door::Open.is_final());
/// ```
pub trait StateKey:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de>
{
    /// Human-readable name used for logging and error messages.
    fn name(&self) -> &str;

    /// Whether the state is terminal for the protocol it belongs to.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}
