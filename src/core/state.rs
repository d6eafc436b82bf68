//! States and their lifecycle hooks.
//!
//! A [`State`] pairs a key with up to four optional hooks. Hooks receive the
//! context owned by whoever drives the machine, so a state never holds a
//! reference back to its owner.

use super::error::FsmError;
use super::key::StateKey;
use std::fmt;

/// Outcome of an enter or update hook.
///
/// `To` asks the machine to switch to another state as soon as the hook
/// returns. This is how a state hands control onward (a solved task moving
/// itself to its terminal state, a finished room returning to its menu).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition<K> {
    /// Remain in the current state.
    Stay,
    /// Switch to the given state.
    To(K),
}

/// Result returned by enter and update hooks.
pub type HookResult<K> = Result<Transition<K>, FsmError>;

/// Hook run on enter, update or fixed update.
pub type Hook<K, Ctx> = Box<dyn FnMut(&mut Ctx) -> HookResult<K>>;

/// Hook run when a state is left.
pub type ExitHook<Ctx> = Box<dyn FnMut(&mut Ctx)>;

/// A named state with optional lifecycle hooks.
///
/// Hooks are bound while the state is built and cannot be replaced once the
/// state is registered on a machine.
///
/// # Example
///
/// ```rust
/// use rehab_escape::core::{State, Transition};
/// use rehab_escape::state_key;
///
/// state_key! {
///     pub enum Light {
///         Red,
///         Green,
///     }
/// }
///
/// let red: State<Light, u32> = State::new(Light::Red)
///     .on_enter(|ticks: &mut u32| {
///         *ticks = 0;
///         Ok(Transition::Stay)
///     })
///     .on_update(|ticks: &mut u32| {
///         *ticks += 1;
///         Ok(Transition::Stay)
///     });
///
/// assert_eq!(red.name(), "Red");
/// ```
pub struct State<K: StateKey, Ctx> {
    id: K,
    name: String,
    on_enter: Option<Hook<K, Ctx>>,
    on_exit: Option<ExitHook<Ctx>>,
    on_update: Option<Hook<K, Ctx>>,
    on_fixed_update: Option<Hook<K, Ctx>>,
}

impl<K: StateKey, Ctx> State<K, Ctx> {
    /// Create a state named after its key.
    pub fn new(id: K) -> Self {
        let name = id.name().to_string();
        Self::named(id, name)
    }

    /// Create a state with an explicit display name.
    pub fn named(id: K, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            on_enter: None,
            on_exit: None,
            on_update: None,
            on_fixed_update: None,
        }
    }

    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut Ctx) -> HookResult<K> + 'static,
    {
        self.on_enter = Some(Box::new(hook));
        self
    }

    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut Ctx) + 'static,
    {
        self.on_exit = Some(Box::new(hook));
        self
    }

    pub fn on_update<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut Ctx) -> HookResult<K> + 'static,
    {
        self.on_update = Some(Box::new(hook));
        self
    }

    /// Hook for the fixed-timestep tick, separate from [`on_update`](Self::on_update).
    pub fn on_fixed_update<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut Ctx) -> HookResult<K> + 'static,
    {
        self.on_fixed_update = Some(Box::new(hook));
        self
    }

    pub fn id(&self) -> &K {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_update(&self) -> bool {
        self.on_update.is_some()
    }

    pub(crate) fn enter(&mut self, ctx: &mut Ctx) -> HookResult<K> {
        match self.on_enter.as_mut() {
            Some(hook) => hook(ctx),
            None => Ok(Transition::Stay),
        }
    }

    pub(crate) fn exit(&mut self, ctx: &mut Ctx) {
        if let Some(hook) = self.on_exit.as_mut() {
            hook(ctx);
        }
    }

    pub(crate) fn update(&mut self, ctx: &mut Ctx) -> HookResult<K> {
        match self.on_update.as_mut() {
            Some(hook) => hook(ctx),
            None => Ok(Transition::Stay),
        }
    }

    pub(crate) fn fixed_update(&mut self, ctx: &mut Ctx) -> HookResult<K> {
        match self.on_fixed_update.as_mut() {
            Some(hook) => hook(ctx),
            None => Ok(Transition::Stay),
        }
    }
}

impl<K: StateKey, Ctx> fmt::Debug for State<K, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("on_enter", &self.on_enter.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_fixed_update", &self.on_fixed_update.is_some())
            .finish()
    }
}
