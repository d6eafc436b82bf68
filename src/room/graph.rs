//! The room state graph: Ready -> Playing -> Pause / Solved -> Ready.

use super::host::RoomHost;
use super::session::SessionContext;
use super::{Modality, RoomState};
use crate::builder::MachineBuilder;
use crate::config::RoomConfig;
use crate::core::{FiniteStateMachine, FsmError, HookResult, State, Transition};
use crate::task::GrtTask;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Context the room machine's hooks operate on.
pub struct RoomContext {
    pub(crate) config: RoomConfig,
    pub(crate) tasks: Vec<GrtTask>,
    pub(crate) session: SessionContext,
    pub(crate) host: Box<dyn RoomHost>,
    pub(crate) modality: Option<Modality>,
    /// Task most recently brought into play
    pub(crate) active: Option<usize>,
    /// Task hidden when play was last interrupted
    pub(crate) deactivated: Option<usize>,
    pub(crate) paused: bool,
    pub(crate) delta: Duration,
    pub(crate) home_requested: bool,
    cursor: usize,
    next_task_prepared: bool,
}

impl RoomContext {
    pub(crate) fn new(
        config: RoomConfig,
        tasks: Vec<GrtTask>,
        session: SessionContext,
        host: Box<dyn RoomHost>,
    ) -> Self {
        Self {
            config,
            tasks,
            session,
            host,
            modality: None,
            active: None,
            deactivated: None,
            paused: false,
            delta: Duration::ZERO,
            home_requested: false,
            cursor: 0,
            next_task_prepared: false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn next_task_prepared(&self) -> bool {
        self.next_task_prepared
    }

    /// Move the cursor. The task it now points at must be prepared again.
    fn set_cursor(&mut self, index: usize) {
        self.cursor = index;
        self.next_task_prepared = false;
        debug!(cursor = index, "task cursor moved");
    }

    /// Index of the task play leaves from. Cursor 0 counts as cursor 1 so
    /// the first task is addressed instead of underflowing.
    ///
    /// Solved tasks stay active when the cursor moves past them. Once the
    /// cursor has advanced, this is therefore the last solved task: it is the
    /// one hidden on pause and shown again on resume, while the task in play
    /// keeps its visibility throughout.
    pub(crate) fn exit_index(&self) -> usize {
        self.cursor.max(1) - 1
    }

    fn solved_in(&self, modality: Modality) -> (usize, usize) {
        let plan = self.config.plan(modality);
        let solved = self.tasks[plan.start..plan.end]
            .iter()
            .filter(|task| task.is_solved())
            .count();
        (solved, plan.len())
    }

    fn capture_reports(&mut self) {
        let Some(modality) = self.modality else {
            return;
        };
        let plan = *self.config.plan(modality);
        let reports = self.tasks[plan.start..plan.end]
            .iter()
            .map(GrtTask::report)
            .collect();
        self.session.record_tasks(reports);
    }

    fn persist(&mut self) {
        self.capture_reports();
        self.host.persist_anchors();
        match self.session.active() {
            Some(session) => self.host.save_session(session),
            None => warn!("no active session to save"),
        }
    }
}

/// Edges the room may take.
fn allowed(from: &RoomState, to: &RoomState) -> bool {
    use RoomState::*;
    matches!(
        (from, to),
        (Ready, Playing(_))
            | (Playing(_), Pause)
            | (Playing(_), Solved)
            | (Playing(_), Ready)
            | (Pause, Playing(_))
            | (Pause, Ready)
            | (Solved, Ready)
    )
}

pub(crate) fn room_machine(
    name: &str,
) -> Result<FiniteStateMachine<RoomState, RoomContext>, FsmError> {
    MachineBuilder::new(format!("room:{name}"))
        .state(State::new(RoomState::Ready).on_enter(enter_ready))
        .state(playing(Modality::Press))
        .state(playing(Modality::PinchSlide))
        .state(
            State::new(RoomState::Pause)
                .on_enter(enter_pause)
                .on_exit(|_: &mut RoomContext| debug!("leaving pause")),
        )
        .state(
            State::new(RoomState::Solved)
                .on_enter(enter_solved)
                .on_exit(|_: &mut RoomContext| debug!("leaving solved")),
        )
        .allow(allowed)
        .initial(RoomState::Ready)
        .build()
}

fn playing(modality: Modality) -> State<RoomState, RoomContext> {
    State::new(RoomState::Playing(modality))
        .on_enter(move |ctx: &mut RoomContext| enter_playing(ctx, modality))
        .on_exit(exit_playing)
        .on_update(move |ctx: &mut RoomContext| playing_tick(ctx, modality))
}

fn enter_ready(ctx: &mut RoomContext) -> HookResult<RoomState> {
    if ctx.session.active().is_some() {
        info!("session abandoned");
        ctx.session.abandon();
    }
    ctx.paused = false;
    ctx.modality = None;
    ctx.active = None;
    ctx.deactivated = None;

    let open = ctx.session.open_modalities();
    debug!(open = ?open, "menu refreshed");
    ctx.host.refresh_menu(&open);
    Ok(Transition::Stay)
}

fn enter_playing(ctx: &mut RoomContext, modality: Modality) -> HookResult<RoomState> {
    if ctx.paused && ctx.modality == Some(modality) {
        ctx.paused = false;
        if let Some(index) = ctx.deactivated.take() {
            ctx.tasks[index].set_active(true);
        }
        info!(%modality, cursor = ctx.cursor, "session resumed");
        return Ok(Transition::Stay);
    }

    ctx.paused = false;
    ctx.modality = Some(modality);
    ctx.deactivated = None;
    ctx.session.begin(modality);

    let plan = *ctx.config.plan(modality);
    for task in &mut ctx.tasks[plan.start..plan.end] {
        task.set_active(false);
        task.reset();
    }

    ctx.set_cursor(plan.start);
    let first = &mut ctx.tasks[plan.start];
    first.place()?;
    first.set_active(true);
    ctx.active = Some(plan.start);

    info!(%modality, first = plan.start, tasks = plan.len(), "session started");
    Ok(Transition::Stay)
}

fn exit_playing(ctx: &mut RoomContext) {
    let index = ctx.exit_index();
    if let Some(task) = ctx.tasks.get_mut(index) {
        task.set_active(false);
        ctx.deactivated = Some(index);
        debug!(task = index, "task deactivated");
    }
}

fn playing_tick(ctx: &mut RoomContext, modality: Modality) -> HookResult<RoomState> {
    let delta = ctx.delta;
    ctx.session.tick(delta);

    let (solved, total) = ctx.solved_in(modality);
    ctx.host.show_progress(solved, total);

    if !ctx.next_task_prepared && ctx.cursor != 0 {
        prepare_next(ctx)?;
        ctx.next_task_prepared = true;
    }

    for task in ctx.tasks.iter_mut().filter(|task| task.is_active()) {
        task.update(delta)?;
    }

    let Some(active) = ctx.active else {
        return Ok(Transition::Stay);
    };
    if ctx.cursor == active && ctx.tasks[active].is_solved() {
        if ctx.config.plan(modality).is_last(active) {
            return Ok(Transition::To(RoomState::Solved));
        }
        ctx.set_cursor(active + 1);
    }
    Ok(Transition::Stay)
}

fn prepare_next(ctx: &mut RoomContext) -> Result<(), FsmError> {
    let index = ctx.cursor;
    let Some(task) = ctx.tasks.get_mut(index) else {
        warn!(cursor = index, "cursor points past the task list");
        return Ok(());
    };
    if task.state().is_none() {
        task.place()?;
    }
    task.set_active(true);
    ctx.active = Some(index);
    debug!(task = index, name = task.name(), "next task prepared");
    Ok(())
}

fn enter_pause(ctx: &mut RoomContext) -> HookResult<RoomState> {
    ctx.paused = true;
    ctx.persist();
    info!(cursor = ctx.cursor, "session paused");
    Ok(Transition::Stay)
}

fn enter_solved(ctx: &mut RoomContext) -> HookResult<RoomState> {
    match ctx.modality {
        Some(modality) => {
            ctx.session.mark_solved(modality);
            info!(%modality, "room solved");
        }
        None => warn!("room solved without a modality in play"),
    }

    ctx.capture_reports();
    ctx.host.persist_anchors();
    match ctx.session.finish() {
        Some(session) => ctx.host.save_session(session),
        None => warn!("no active session to save"),
    }

    ctx.home_requested = true;
    Ok(Transition::To(RoomState::Ready))
}
