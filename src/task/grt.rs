//! A single gamified rehabilitation task and its machine.

use super::graph::{task_machine, TaskContext};
use super::metrics::{Interaction, TaskMetrics};
use super::{TaskBehaviour, TaskError, TaskState};
use crate::core::{FiniteStateMachine, FsmError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::trace;

/// Summary of one task, stored with the player's session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskReport {
    pub name: String,
    pub kind: String,
    pub state: Option<TaskState>,
    pub metrics: TaskMetrics,
    pub solved_at: Option<DateTime<Utc>>,
    /// Wall-clock time from placement to the latest state change
    pub elapsed: Option<Duration>,
}

/// A task instance: its behaviour plus the Placing/Solving/Solved machine
/// that gates it.
pub struct GrtTask {
    machine: FiniteStateMachine<TaskState, TaskContext>,
    ctx: TaskContext,
    active: bool,
}

impl GrtTask {
    /// Wrap `behaviour` in a task machine.
    ///
    /// Fails when the behaviour exposes fewer interactive elements than it
    /// requires; a task with no elements is always rejected.
    pub fn new(
        name: impl Into<String>,
        behaviour: impl TaskBehaviour + 'static,
    ) -> Result<Self, TaskError> {
        let name = name.into();
        let found = behaviour.interactive_elements();
        let expected = behaviour.required_elements().max(1);
        if found < expected {
            return Err(TaskError::MissingElements {
                task: name,
                expected,
                found,
            });
        }

        let machine = task_machine(&name)?;
        let mut task = Self {
            machine,
            ctx: TaskContext::new(name, Box::new(behaviour)),
            active: false,
        };
        task.ctx.behaviour.set_visible(false);
        Ok(task)
    }

    pub fn name(&self) -> &str {
        &self.ctx.name
    }

    pub fn kind(&self) -> &str {
        self.ctx.behaviour.kind()
    }

    pub fn state(&self) -> Option<TaskState> {
        self.machine.current_key().copied()
    }

    pub fn is_solved(&self) -> bool {
        self.machine.is_in(&TaskState::Solved)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn metrics(&self) -> &TaskMetrics {
        &self.ctx.metrics
    }

    pub fn behaviour(&self) -> &dyn TaskBehaviour {
        self.ctx.behaviour()
    }

    pub fn machine(&self) -> &FiniteStateMachine<TaskState, TaskContext> {
        &self.machine
    }

    pub fn set_state(&mut self, state: TaskState) -> Result<(), FsmError> {
        self.machine.set_current_state(state, &mut self.ctx)
    }

    pub fn place(&mut self) -> Result<(), FsmError> {
        self.set_state(TaskState::Placing)
    }

    pub fn begin_solving(&mut self) -> Result<(), FsmError> {
        self.set_state(TaskState::Solving)
    }

    /// Show or hide the task in the scene.
    pub fn set_active(&mut self, active: bool) {
        if self.active != active {
            self.active = active;
            self.ctx.behaviour.set_visible(active);
        }
    }

    /// Route an interaction to one of the task's elements.
    ///
    /// Interactions only count while the task is solving; otherwise they are
    /// dropped and `Ok(false)` is returned.
    pub fn interact(&mut self, element: usize, interaction: Interaction) -> Result<bool, TaskError> {
        let count = self.ctx.behaviour.interactive_elements();
        if element >= count {
            return Err(TaskError::UnknownElement {
                task: self.ctx.name.clone(),
                element,
                count,
            });
        }

        if !self.machine.is_in(&TaskState::Solving) {
            trace!(task = %self.ctx.name, ?interaction, "interaction ignored outside solving");
            return Ok(false);
        }

        self.ctx.metrics.record(interaction);
        self.ctx.behaviour.handle(element, interaction);
        Ok(true)
    }

    pub fn update(&mut self, delta: Duration) -> Result<(), FsmError> {
        self.ctx.delta = delta;
        self.machine.update(&mut self.ctx)
    }

    pub fn fixed_update(&mut self, delta: Duration) -> Result<(), FsmError> {
        self.ctx.delta = delta;
        self.machine.fixed_update(&mut self.ctx)
    }

    /// Return the task to its pristine, unplaced configuration.
    ///
    /// This is not a machine transition: no hooks run, and the owner has to
    /// place the task again before it can be solved.
    pub fn reset(&mut self) {
        self.machine.reset();
        self.ctx.behaviour.reset();
        self.ctx.behaviour.freeze();
        self.ctx.metrics = TaskMetrics::default();
    }

    pub fn report(&self) -> TaskReport {
        TaskReport {
            name: self.ctx.name.clone(),
            kind: self.kind().to_string(),
            state: self.state(),
            metrics: self.ctx.metrics.clone(),
            solved_at: self.machine.history().last_entered(&TaskState::Solved),
            elapsed: self.machine.history().duration(),
        }
    }
}

impl std::fmt::Debug for GrtTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrtTask")
            .field("name", &self.ctx.name)
            .field("kind", &self.kind())
            .field("state", &self.state())
            .field("active", &self.active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Spy {
        frozen: bool,
        visible: bool,
        revealed: bool,
        ticks: u32,
        presses: u32,
        solved: bool,
        resets: u32,
    }

    struct ScriptedTask {
        elements: usize,
        spy: Rc<RefCell<Spy>>,
    }

    impl TaskBehaviour for ScriptedTask {
        fn kind(&self) -> &str {
            "scripted"
        }

        fn interactive_elements(&self) -> usize {
            self.elements
        }

        fn freeze(&mut self) {
            self.spy.borrow_mut().frozen = true;
        }

        fn unfreeze(&mut self) {
            self.spy.borrow_mut().frozen = false;
        }

        fn is_frozen(&self) -> bool {
            self.spy.borrow().frozen
        }

        fn on_solving_tick(&mut self, _delta: Duration) {
            self.spy.borrow_mut().ticks += 1;
        }

        fn handle(&mut self, _element: usize, interaction: Interaction) {
            if interaction == Interaction::Press {
                self.spy.borrow_mut().presses += 1;
            }
        }

        fn check_solution(&self) -> bool {
            self.spy.borrow().solved
        }

        fn on_solved(&mut self) {
            self.spy.borrow_mut().revealed = true;
        }

        fn set_visible(&mut self, visible: bool) {
            self.spy.borrow_mut().visible = visible;
        }

        fn reset(&mut self) {
            let mut spy = self.spy.borrow_mut();
            spy.resets += 1;
            spy.solved = false;
        }
    }

    fn scripted(elements: usize) -> (GrtTask, Rc<RefCell<Spy>>) {
        let spy = Rc::new(RefCell::new(Spy {
            frozen: true,
            ..Spy::default()
        }));
        let task = GrtTask::new(
            "scripted",
            ScriptedTask {
                elements,
                spy: Rc::clone(&spy),
            },
        )
        .unwrap();
        (task, spy)
    }

    const TICK: Duration = Duration::from_millis(16);

    #[test]
    fn task_without_elements_is_rejected() {
        let spy = Rc::new(RefCell::new(Spy::default()));
        let result = GrtTask::new("empty", ScriptedTask { elements: 0, spy });

        assert!(matches!(
            result,
            Err(TaskError::MissingElements {
                expected: 1,
                found: 0,
                ..
            })
        ));
    }

    #[test]
    fn new_task_has_no_state() {
        let (task, spy) = scripted(2);

        assert!(task.state().is_none());
        assert!(!task.is_active());
        assert!(!spy.borrow().visible);
    }

    #[test]
    fn placing_unfreezes_and_solving_freezes() {
        let (mut task, spy) = scripted(1);

        task.place().unwrap();
        assert!(!spy.borrow().frozen);
        assert!(!task.behaviour().is_frozen());

        task.begin_solving().unwrap();
        assert!(spy.borrow().frozen);
        assert_eq!(task.state(), Some(TaskState::Solving));
    }

    #[test]
    fn solving_tick_only_runs_while_solving() {
        let (mut task, spy) = scripted(1);
        task.place().unwrap();

        task.update(TICK).unwrap();
        assert_eq!(spy.borrow().ticks, 0);

        task.begin_solving().unwrap();
        task.update(TICK).unwrap();
        task.update(TICK).unwrap();

        assert_eq!(spy.borrow().ticks, 2);
        assert_eq!(task.metrics().solving_time, TICK * 2);
    }

    #[test]
    fn correct_solution_moves_to_solved() {
        let (mut task, spy) = scripted(1);
        task.place().unwrap();
        task.begin_solving().unwrap();

        spy.borrow_mut().solved = true;
        task.update(TICK).unwrap();

        assert!(task.is_solved());
        assert!(spy.borrow().revealed);
        let report = task.report();
        assert!(report.solved_at.is_some());
        assert!(report.elapsed.is_some());
    }

    #[test]
    fn unplaced_task_cannot_skip_placing() {
        let (mut task, _spy) = scripted(1);

        for state in [TaskState::Solving, TaskState::Solved] {
            let result = task.set_state(state);
            assert!(matches!(
                result,
                Err(FsmError::InitialStateRequired { .. })
            ));
            assert!(task.state().is_none());
        }
        assert!(task.report().elapsed.is_none());
    }

    #[test]
    fn reset_task_must_be_placed_again() {
        let (mut task, _spy) = scripted(1);
        task.place().unwrap();
        task.begin_solving().unwrap();
        task.reset();

        assert!(matches!(
            task.begin_solving(),
            Err(FsmError::InitialStateRequired { .. })
        ));
        assert!(task.state().is_none());
    }

    #[test]
    fn solved_is_terminal() {
        let (mut task, spy) = scripted(1);
        task.place().unwrap();
        task.begin_solving().unwrap();
        spy.borrow_mut().solved = true;
        task.update(TICK).unwrap();

        let result = task.place();

        assert!(matches!(result, Err(FsmError::TransitionRejected { .. })));
        assert!(task.is_solved());
    }

    #[test]
    fn interactions_only_count_while_solving() {
        let (mut task, spy) = scripted(2);
        task.place().unwrap();

        assert_eq!(task.interact(1, Interaction::Press), Ok(false));
        assert_eq!(task.metrics().press_count, 0);

        task.begin_solving().unwrap();
        assert_eq!(task.interact(1, Interaction::Press), Ok(true));
        assert_eq!(task.metrics().press_count, 1);
        assert_eq!(spy.borrow().presses, 1);
    }

    #[test]
    fn unknown_element_is_an_error() {
        let (mut task, _spy) = scripted(2);
        task.place().unwrap();
        task.begin_solving().unwrap();

        let result = task.interact(2, Interaction::Touch);

        assert!(matches!(
            result,
            Err(TaskError::UnknownElement {
                element: 2,
                count: 2,
                ..
            })
        ));
    }

    #[test]
    fn set_active_toggles_visibility_once() {
        let (mut task, spy) = scripted(1);

        task.set_active(true);
        assert!(task.is_active());
        assert!(spy.borrow().visible);

        task.set_active(false);
        assert!(!spy.borrow().visible);
    }

    #[test]
    fn reset_returns_task_to_unplaced() {
        let (mut task, spy) = scripted(1);
        task.place().unwrap();
        task.begin_solving().unwrap();
        task.interact(0, Interaction::Press).unwrap();
        spy.borrow_mut().solved = true;
        task.update(TICK).unwrap();

        task.reset();

        assert!(task.state().is_none());
        assert_eq!(task.metrics(), &TaskMetrics::default());
        assert_eq!(spy.borrow().resets, 1);
        assert!(spy.borrow().frozen);

        task.place().unwrap();
        assert_eq!(task.state(), Some(TaskState::Placing));
    }
}
