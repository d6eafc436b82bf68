//! Guard predicates over state machine edges.
//!
//! A guard decides whether a machine may move from one key to another. It is
//! a pure function of the two keys and never looks at the machine's context.

use super::key::StateKey;
use std::marker::PhantomData;

/// Pure predicate that determines whether an edge `from -> to` is allowed.
///
/// # Example
///
/// ```rust
/// use rehab_escape::core::TransitionGuard;
/// use rehab_escape::state_key;
///
/// state_key! {
///     pub enum Phase {
///         Setup,
///         Running,
///         Done,
///     }
///     final: [Done]
/// }
///
/// let forward_only = TransitionGuard::new(|from: &Phase, to: &Phase| {
///     matches!(
///         (from, to),
///         (Phase::Setup, Phase::Running) | (Phase::Running, Phase::Done)
///     )
/// });
///
/// assert!(forward_only.allows(&Phase::Setup, &Phase::Running));
/// assert!(!forward_only.allows(&Phase::Done, &Phase::Setup));
/// ```
pub struct TransitionGuard<K: StateKey> {
    predicate: Box<dyn Fn(&K, &K) -> bool>,
    _phantom: PhantomData<K>,
}

impl<K: StateKey> TransitionGuard<K> {
    /// Create a guard from a pure predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&K, &K) -> bool + 'static,
    {
        TransitionGuard {
            predicate: Box::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Check whether the edge `from -> to` is allowed.
    pub fn allows(&self, from: &K, to: &K) -> bool {
        (self.predicate)(from, to)
    }
}
