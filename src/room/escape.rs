//! The escape room: a room machine and the tasks it sequences.

use super::graph::{room_machine, RoomContext};
use super::host::RoomHost;
use super::session::SessionContext;
use super::{Modality, RoomError, RoomState};
use crate::config::RoomConfig;
use crate::core::{FiniteStateMachine, FsmError};
use crate::task::{GrtTask, Interaction};
use std::time::Duration;
use tracing::{debug, trace};

/// An escape room session driver.
///
/// The host loop calls [`update`](Self::update) once per frame. UI handlers
/// call [`start`](Self::start), [`pause`](Self::pause),
/// [`resume`](Self::resume) and route gestures through
/// [`interact`](Self::interact). The room has no state until the host forces
/// the first one, normally [`RoomState::Ready`].
pub struct Room {
    machine: FiniteStateMachine<RoomState, RoomContext>,
    ctx: RoomContext,
}

impl Room {
    /// Build a room over `tasks`, played in list order.
    ///
    /// The config is validated against the task list; every violation is
    /// reported at once.
    pub fn new(
        config: RoomConfig,
        tasks: Vec<GrtTask>,
        session: SessionContext,
        host: impl RoomHost + 'static,
    ) -> Result<Self, RoomError> {
        config.check(tasks.len())?;
        let machine = room_machine(&config.name)?;
        Ok(Self {
            machine,
            ctx: RoomContext::new(config, tasks, session, Box::new(host)),
        })
    }

    pub fn state(&self) -> Option<RoomState> {
        self.machine.current_key().copied()
    }

    pub fn machine(&self) -> &FiniteStateMachine<RoomState, RoomContext> {
        &self.machine
    }

    pub fn config(&self) -> &RoomConfig {
        &self.ctx.config
    }

    pub fn session(&self) -> &SessionContext {
        &self.ctx.session
    }

    pub fn into_session(self) -> SessionContext {
        self.ctx.session
    }

    pub fn modality(&self) -> Option<Modality> {
        self.ctx.modality
    }

    /// Index of the next task to bring into play.
    pub fn cursor(&self) -> usize {
        self.ctx.cursor()
    }

    pub fn next_task_prepared(&self) -> bool {
        self.ctx.next_task_prepared()
    }

    pub fn tasks(&self) -> &[GrtTask] {
        &self.ctx.tasks
    }

    pub fn task(&self, index: usize) -> Option<&GrtTask> {
        self.ctx.tasks.get(index)
    }

    pub fn task_mut(&mut self, index: usize) -> Option<&mut GrtTask> {
        self.ctx.tasks.get_mut(index)
    }

    /// Force the room into `state`.
    pub fn set_state(&mut self, state: RoomState) -> Result<(), FsmError> {
        let result = self.machine.set_current_state(state, &mut self.ctx);
        self.flush_signals();
        result
    }

    pub fn start(&mut self, modality: Modality) -> Result<(), FsmError> {
        self.set_state(RoomState::Playing(modality))
    }

    pub fn pause(&mut self) -> Result<(), FsmError> {
        self.set_state(RoomState::Pause)
    }

    /// Go back to playing the modality that was paused.
    pub fn resume(&mut self) -> Result<(), RoomError> {
        let modality = match (self.state(), self.ctx.modality) {
            (Some(RoomState::Pause), Some(modality)) => modality,
            _ => return Err(RoomError::NotPaused),
        };
        Ok(self.set_state(RoomState::Playing(modality))?)
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state(), Some(RoomState::Playing(_)))
    }

    /// Put the task at `index` into its solving state.
    ///
    /// Tasks are solved in list order: only the task at the cursor can
    /// begin, and only while the room is playing. A task the cursor has just
    /// moved to is placed on the next tick and cannot begin before that.
    pub fn begin_solving(&mut self, index: usize) -> Result<(), RoomError> {
        self.task_entry(index)?;
        if !self.is_playing() {
            return Err(RoomError::NotPlaying);
        }
        let cursor = self.ctx.cursor();
        if index != cursor {
            return Err(RoomError::OutOfOrder { index, cursor });
        }
        Ok(self.task_entry(index)?.begin_solving()?)
    }

    /// Route a gesture to element `element` of task `index`.
    ///
    /// Gestures made while the room is not playing are dropped and
    /// `Ok(false)` is returned.
    pub fn interact(
        &mut self,
        index: usize,
        element: usize,
        interaction: Interaction,
    ) -> Result<bool, RoomError> {
        let playing = self.is_playing();
        let task = self.task_entry(index)?;
        if !playing {
            trace!(task = index, ?interaction, "gesture dropped outside play");
            return Ok(false);
        }
        Ok(task.interact(element, interaction)?)
    }

    /// Advance one variable-rate tick of `delta`.
    pub fn update(&mut self, delta: Duration) -> Result<(), FsmError> {
        self.ctx.delta = delta;
        let result = self.machine.update(&mut self.ctx);
        self.flush_signals();
        result
    }

    /// Advance one fixed-rate tick of `delta`.
    pub fn fixed_update(&mut self, delta: Duration) -> Result<(), FsmError> {
        self.ctx.delta = delta;
        let result = self.machine.fixed_update(&mut self.ctx);
        self.flush_signals();
        result
    }

    fn task_entry(&mut self, index: usize) -> Result<&mut GrtTask, RoomError> {
        let count = self.ctx.tasks.len();
        self.ctx
            .tasks
            .get_mut(index)
            .ok_or(RoomError::UnknownTask { index, count })
    }

    /// Signals raised by hooks are delivered once the machine has settled.
    fn flush_signals(&mut self) {
        if std::mem::take(&mut self.ctx.home_requested) {
            debug!("returning to home screen");
            self.ctx.host.return_home();
        }
    }
}

impl std::fmt::Debug for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Room")
            .field("state", &self.state())
            .field("cursor", &self.cursor())
            .field("tasks", &self.ctx.tasks)
            .finish()
    }
}
