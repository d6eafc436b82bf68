//! State transition history tracking.
//!
//! Every transition a machine performs is appended here with a timestamp.
//! Task reports read it back to find when a task was solved.

use super::key::StateKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single state transition.
///
/// `from` is `None` for the first transition of a machine, which starts
/// without a current state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<K: StateKey> {
    /// The state being left, if any
    pub from: Option<K>,
    /// The state being entered
    pub to: K,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions.
///
/// # Example
///
/// ```rust
/// use rehab_escape::core::{StateHistory, StateTransition};
/// use rehab_escape::state_key;
/// use chrono::Utc;
///
/// state_key! {
///     pub enum Step {
///         First,
///         Second,
///     }
/// }
///
/// let mut history = StateHistory::new();
/// history.record(StateTransition { from: None, to: Step::First, timestamp: Utc::now() });
/// history.record(StateTransition {
///     from: Some(Step::First),
///     to: Step::Second,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![&Step::First, &Step::Second]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<K: StateKey> {
    transitions: Vec<StateTransition<K>>,
}

impl<K: StateKey> Default for StateHistory<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKey> StateHistory<K> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition.
    pub fn record(&mut self, transition: StateTransition<K>) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Starts with the `from` of the first transition when there was one,
    /// followed by the `to` of every transition.
    pub fn get_path(&self) -> Vec<&K> {
        let mut path = Vec::new();
        if let Some(from) = self.transitions.first().and_then(|t| t.from.as_ref()) {
            path.push(from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// When `key` was most recently entered.
    pub fn last_entered(&self, key: &K) -> Option<DateTime<Utc>> {
        self.transitions
            .iter()
            .rev()
            .find(|t| &t.to == key)
            .map(|t| t.timestamp)
    }

    /// Time between the first and last recorded transitions.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[StateTransition<K>] {
        &self.transitions
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestKey {
        Initial,
        Processing,
        Complete,
    }

    impl StateKey for TestKey {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Processing => "Processing",
                Self::Complete => "Complete",
            }
        }
    }

    fn transition(from: Option<TestKey>, to: TestKey) -> StateTransition<TestKey> {
        StateTransition {
            from,
            to,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestKey> = StateHistory::new();
        assert!(history.transitions().is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn path_without_initial_from_starts_at_first_target() {
        let mut history = StateHistory::new();
        history.record(transition(None, TestKey::Initial));
        history.record(transition(Some(TestKey::Initial), TestKey::Processing));

        assert_eq!(
            history.get_path(),
            vec![&TestKey::Initial, &TestKey::Processing]
        );
    }

    #[test]
    fn path_with_initial_from_includes_it() {
        let mut history = StateHistory::new();
        history.record(transition(Some(TestKey::Initial), TestKey::Processing));
        history.record(transition(Some(TestKey::Processing), TestKey::Complete));

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &TestKey::Initial);
        assert_eq!(path[2], &TestKey::Complete);
    }

    #[test]
    fn last_entered_finds_most_recent_entry() {
        let mut history = StateHistory::new();
        let early = Utc::now() - chrono::Duration::seconds(30);
        history.record(StateTransition {
            from: None,
            to: TestKey::Processing,
            timestamp: early,
        });
        history.record(transition(Some(TestKey::Processing), TestKey::Initial));
        let late = Utc::now();
        history.record(StateTransition {
            from: Some(TestKey::Initial),
            to: TestKey::Processing,
            timestamp: late,
        });

        assert_eq!(history.last_entered(&TestKey::Processing), Some(late));
        assert!(history.last_entered(&TestKey::Complete).is_none());
    }

    #[test]
    fn duration_spans_first_to_last() {
        let mut history = StateHistory::new();
        let start = Utc::now() - chrono::Duration::seconds(5);
        history.record(StateTransition {
            from: None,
            to: TestKey::Initial,
            timestamp: start,
        });
        history.record(transition(Some(TestKey::Initial), TestKey::Complete));

        let duration = history.duration().unwrap();
        assert!(duration >= Duration::from_secs(5));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::new();
        history.record(transition(None, TestKey::Initial));

        let json = serde_json::to_string(&history).unwrap();
        let back: StateHistory<TestKey> = serde_json::from_str(&json).unwrap();

        assert_eq!(back.transitions().len(), 1);
        assert_eq!(back.transitions()[0].to, TestKey::Initial);
    }
}
