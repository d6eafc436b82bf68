//! Builder for constructing state machines.

use crate::core::{FiniteStateMachine, FsmError, State, StateKey, TransitionGuard};

/// Builder for constructing state machines with a fluent API.
///
/// Registration errors are collected lazily and reported by [`build`](Self::build),
/// so a chain of `.state(..)` calls reads top to bottom.
pub struct MachineBuilder<K: StateKey, Ctx> {
    label: String,
    states: Vec<State<K, Ctx>>,
    guard: Option<TransitionGuard<K>>,
    initial: Option<K>,
}

impl<K: StateKey, Ctx> MachineBuilder<K, Ctx> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            states: Vec::new(),
            guard: None,
            initial: None,
        }
    }

    /// Add a state.
    pub fn state(mut self, state: State<K, Ctx>) -> Self {
        self.states.push(state);
        self
    }

    /// Add a guard using a closure over `(from, to)`.
    pub fn allow<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&K, &K) -> bool + 'static,
    {
        self.guard = Some(TransitionGuard::new(predicate));
        self
    }

    /// Require the machine to start in `key`.
    pub fn initial(mut self, key: K) -> Self {
        self.initial = Some(key);
        self
    }

    /// Build the machine.
    ///
    /// Fails if no state was added or a key was added twice. The machine has
    /// no current state; the owner picks the first one.
    pub fn build(self) -> Result<FiniteStateMachine<K, Ctx>, FsmError> {
        if self.states.is_empty() {
            return Err(FsmError::NoStates {
                machine: self.label,
            });
        }

        let mut machine = FiniteStateMachine::new(self.label);
        for state in self.states {
            machine.add(state)?;
        }
        if let Some(guard) = self.guard {
            machine.set_guard(guard);
        }
        if let Some(initial) = self.initial {
            machine.set_initial(initial);
        }

        Ok(machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Transition;

    crate::state_key! {
        enum TestKey {
            Start,
            Middle,
            End,
        }
        final: [End]
    }

    #[test]
    fn builder_requires_states() {
        let result = MachineBuilder::<TestKey, ()>::new("empty").build();

        assert!(matches!(result, Err(FsmError::NoStates { .. })));
    }

    #[test]
    fn builder_rejects_duplicates() {
        let result = MachineBuilder::<TestKey, ()>::new("dupes")
            .state(State::new(TestKey::Start))
            .state(State::new(TestKey::Start))
            .build();

        assert!(matches!(result, Err(FsmError::DuplicateState { .. })));
    }

    #[test]
    fn fluent_api_builds_machine_without_current_state() {
        let machine = MachineBuilder::<TestKey, ()>::new("fluent")
            .state(State::new(TestKey::Start))
            .state(State::new(TestKey::Middle))
            .state(State::new(TestKey::End))
            .build()
            .unwrap();

        assert_eq!(machine.len(), 3);
        assert!(machine.current_key().is_none());
        assert_eq!(machine.label(), "fluent");
    }

    #[test]
    fn guard_blocks_leaving_final_state() {
        let mut machine = MachineBuilder::<TestKey, u8>::new("guarded")
            .state(State::new(TestKey::Start))
            .state(State::new(TestKey::Middle).on_enter(|hits: &mut u8| {
                *hits += 1;
                Ok(Transition::Stay)
            }))
            .state(State::new(TestKey::End))
            .allow(|from: &TestKey, _: &TestKey| !from.is_final())
            .build()
            .unwrap();
        let mut hits = 0;

        machine.set_current_state(TestKey::End, &mut hits).unwrap();
        let result = machine.set_current_state(TestKey::Middle, &mut hits);

        assert!(matches!(result, Err(FsmError::TransitionRejected { .. })));
        assert_eq!(hits, 0);
    }

    #[test]
    fn initial_key_is_required_first() {
        let mut machine = MachineBuilder::<TestKey, ()>::new("initial")
            .state(State::new(TestKey::Start))
            .state(State::new(TestKey::Middle))
            .initial(TestKey::Start)
            .build()
            .unwrap();

        assert_eq!(machine.initial(), Some(&TestKey::Start));
        assert!(matches!(
            machine.set_current_state(TestKey::Middle, &mut ()),
            Err(FsmError::InitialStateRequired { .. })
        ));
        machine.set_current_state(TestKey::Start, &mut ()).unwrap();
        assert!(machine.is_in(&TestKey::Start));
    }
}
