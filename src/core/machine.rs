//! The generic finite state machine.

use super::error::FsmError;
use super::guard::TransitionGuard;
use super::history::{StateHistory, StateTransition};
use super::key::StateKey;
use super::state::{State, Transition};
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// Upper bound on transitions requested back to back by hooks.
pub const MAX_CHAINED_TRANSITIONS: usize = 16;

/// Finite state machine keyed by `K`, driving hooks over a context `Ctx`.
///
/// The machine starts with no current state. The owner forces the first
/// transition with [`set_current_state`](Self::set_current_state) and then
/// calls [`update`](Self::update) once per tick.
///
/// The context is passed into every call rather than stored, so the owner
/// can keep the machine and its context as sibling fields.
///
/// # Example
///
/// ```rust
/// use rehab_escape::core::{FiniteStateMachine, State, Transition};
/// use rehab_escape::state_key;
///
/// state_key! {
///     pub enum Lamp {
///         Off,
///         On,
///     }
/// }
///
/// let mut lamp: FiniteStateMachine<Lamp, Vec<String>> = FiniteStateMachine::new("lamp");
/// lamp.add(State::new(Lamp::Off)).unwrap();
/// lamp.add(State::new(Lamp::On).on_enter(|log: &mut Vec<String>| {
///     log.push("lit".to_string());
///     Ok(Transition::Stay)
/// }))
/// .unwrap();
///
/// let mut log = Vec::new();
/// lamp.set_current_state(Lamp::Off, &mut log).unwrap();
/// lamp.set_current_state(Lamp::On, &mut log).unwrap();
///
/// assert_eq!(lamp.current_key(), Some(&Lamp::On));
/// assert_eq!(log, vec!["lit".to_string()]);
/// ```
pub struct FiniteStateMachine<K: StateKey, Ctx> {
    label: String,
    states: HashMap<K, State<K, Ctx>>,
    current: Option<K>,
    initial: Option<K>,
    guard: Option<TransitionGuard<K>>,
    history: StateHistory<K>,
}

impl<K: StateKey, Ctx> FiniteStateMachine<K, Ctx> {
    /// Create an empty machine. `label` names it in logs and errors.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            states: HashMap::new(),
            current: None,
            initial: None,
            guard: None,
            history: StateHistory::new(),
        }
    }

    /// Register a state under its own key.
    ///
    /// A key can be registered once; a second registration fails with
    /// [`FsmError::DuplicateState`] and leaves the first one in place.
    pub fn add(&mut self, state: State<K, Ctx>) -> Result<(), FsmError> {
        if self.states.contains_key(state.id()) {
            return Err(FsmError::DuplicateState {
                machine: self.label.clone(),
                state: state.name().to_string(),
            });
        }
        self.states.insert(state.id().clone(), state);
        Ok(())
    }

    /// Require the first transition, and the first one after a
    /// [`reset`](Self::reset), to enter `key`.
    pub fn set_initial(&mut self, key: K) {
        self.initial = Some(key);
    }

    pub fn initial(&self) -> Option<&K> {
        self.initial.as_ref()
    }

    /// Restrict which edges the machine may take.
    pub fn set_guard(&mut self, guard: TransitionGuard<K>) {
        self.guard = Some(guard);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn get_state(&self, key: &K) -> Option<&State<K, Ctx>> {
        self.states.get(key)
    }

    pub fn get_current_state(&self) -> Option<&State<K, Ctx>> {
        self.current.as_ref().and_then(|key| self.states.get(key))
    }

    pub fn current_key(&self) -> Option<&K> {
        self.current.as_ref()
    }

    pub fn is_in(&self, key: &K) -> bool {
        self.current.as_ref() == Some(key)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn history(&self) -> &StateHistory<K> {
        &self.history
    }

    /// Switch to the state registered under `key`.
    ///
    /// Switching to the current state does nothing. Otherwise the current
    /// state's exit hook runs, the new state becomes current, then its enter
    /// hook runs. If the enter hook asks for another state, that switch
    /// follows immediately.
    ///
    /// An unregistered key, a first key other than the required initial one,
    /// or an edge refused by the guard fails before any hook runs, leaving
    /// the current state unchanged.
    ///
    /// Hook errors are not rolled back. If an enter hook fails, the new state
    /// is already current and recorded in history; the previous state has
    /// been exited. The owner decides whether to retry or reset.
    pub fn set_current_state(&mut self, key: K, ctx: &mut Ctx) -> Result<(), FsmError> {
        let outcome = self.switch_to(key, ctx)?;
        self.follow(outcome, ctx)
    }

    /// Run the current state's update hook, if both exist.
    pub fn update(&mut self, ctx: &mut Ctx) -> Result<(), FsmError> {
        let outcome = match self.current_state_mut() {
            Some(state) => state.update(ctx)?,
            None => return Ok(()),
        };
        self.follow(outcome, ctx)
    }

    /// Run the current state's fixed-timestep hook, if both exist.
    pub fn fixed_update(&mut self, ctx: &mut Ctx) -> Result<(), FsmError> {
        let outcome = match self.current_state_mut() {
            Some(state) => state.fixed_update(ctx)?,
            None => return Ok(()),
        };
        self.follow(outcome, ctx)
    }

    /// Drop the current state without running any hook and forget history.
    ///
    /// Used when the owner rebuilds its own state from scratch; the next
    /// [`set_current_state`](Self::set_current_state) behaves like the first.
    pub fn reset(&mut self) {
        if let Some(key) = self.current.take() {
            debug!(machine = %self.label, state = key.name(), "machine reset");
        }
        self.history.clear();
    }

    fn current_state_mut(&mut self) -> Option<&mut State<K, Ctx>> {
        let key = self.current.as_ref()?;
        self.states.get_mut(key)
    }

    fn follow(&mut self, mut outcome: Transition<K>, ctx: &mut Ctx) -> Result<(), FsmError> {
        let mut hops = 0;
        while let Transition::To(next) = outcome {
            hops += 1;
            if hops > MAX_CHAINED_TRANSITIONS {
                return Err(FsmError::TransitionLoop {
                    machine: self.label.clone(),
                    state: next.name().to_string(),
                    limit: MAX_CHAINED_TRANSITIONS,
                });
            }
            outcome = self.switch_to(next, ctx)?;
        }
        Ok(())
    }

    fn switch_to(&mut self, key: K, ctx: &mut Ctx) -> Result<Transition<K>, FsmError> {
        if !self.states.contains_key(&key) {
            return Err(FsmError::UnknownState {
                machine: self.label.clone(),
                state: key.name().to_string(),
            });
        }

        if self.current.as_ref() == Some(&key) {
            trace!(machine = %self.label, state = key.name(), "already current");
            return Ok(Transition::Stay);
        }

        if self.current.is_none() {
            if let Some(initial) = self.initial.as_ref().filter(|initial| **initial != key) {
                return Err(FsmError::InitialStateRequired {
                    machine: self.label.clone(),
                    initial: initial.name().to_string(),
                    state: key.name().to_string(),
                });
            }
        }

        if let (Some(guard), Some(from)) = (&self.guard, &self.current) {
            if !guard.allows(from, &key) {
                return Err(FsmError::TransitionRejected {
                    machine: self.label.clone(),
                    from: from.name().to_string(),
                    to: key.name().to_string(),
                });
            }
        }

        if let Some(state) = self.current_state_mut() {
            state.exit(ctx);
        }

        let from = self.current.replace(key.clone());
        debug!(
            machine = %self.label,
            from = from.as_ref().map(|k| k.name()).unwrap_or("<none>"),
            to = key.name(),
            "transition"
        );
        self.history.record(StateTransition {
            from,
            to: key.clone(),
            timestamp: Utc::now(),
        });

        match self.states.get_mut(&key) {
            Some(state) => state.enter(ctx),
            None => Ok(Transition::Stay),
        }
    }
}

impl<K: StateKey, Ctx> fmt::Debug for FiniteStateMachine<K, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FiniteStateMachine")
            .field("label", &self.label)
            .field("states", &self.states.len())
            .field("current", &self.current)
            .finish()
    }
}
