//! The task state graph: Placing -> Solving -> Solved.

use super::metrics::TaskMetrics;
use super::{TaskBehaviour, TaskState};
use crate::builder::MachineBuilder;
use crate::core::{FiniteStateMachine, FsmError, HookResult, State, Transition};
use std::time::Duration;
use tracing::{debug, info};

/// Context the task machine's hooks operate on.
pub struct TaskContext {
    pub(crate) name: String,
    pub(crate) behaviour: Box<dyn TaskBehaviour>,
    pub(crate) metrics: TaskMetrics,
    pub(crate) delta: Duration,
}

impl TaskContext {
    pub(crate) fn new(name: String, behaviour: Box<dyn TaskBehaviour>) -> Self {
        Self {
            name,
            behaviour,
            metrics: TaskMetrics::default(),
            delta: Duration::ZERO,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn behaviour(&self) -> &dyn TaskBehaviour {
        self.behaviour.as_ref()
    }

    pub fn metrics(&self) -> &TaskMetrics {
        &self.metrics
    }
}

/// Edges a task may take. Solved is never left.
fn allowed(from: &TaskState, to: &TaskState) -> bool {
    matches!(
        (from, to),
        (TaskState::Placing, TaskState::Solving)
            | (TaskState::Solving, TaskState::Placing)
            | (TaskState::Solving, TaskState::Solved)
    )
}

pub(crate) fn task_machine(
    name: &str,
) -> Result<FiniteStateMachine<TaskState, TaskContext>, FsmError> {
    MachineBuilder::new(format!("task:{name}"))
        .state(
            State::new(TaskState::Placing)
                .on_enter(|ctx: &mut TaskContext| {
                    ctx.behaviour.unfreeze();
                    debug!(task = %ctx.name, "placement unlocked");
                    Ok(Transition::Stay)
                })
                .on_exit(|ctx: &mut TaskContext| {
                    ctx.behaviour.freeze();
                    debug!(task = %ctx.name, "placement locked");
                }),
        )
        .state(
            State::new(TaskState::Solving)
                .on_enter(|ctx: &mut TaskContext| {
                    debug!(task = %ctx.name, kind = ctx.behaviour.kind(), "solving started");
                    Ok(Transition::Stay)
                })
                .on_exit(|ctx: &mut TaskContext| {
                    debug!(task = %ctx.name, elapsed = ?ctx.metrics.solving_time, "solving stopped");
                })
                .on_update(solving_tick),
        )
        .state(
            State::new(TaskState::Solved)
                .on_enter(|ctx: &mut TaskContext| {
                    ctx.behaviour.on_solved();
                    info!(
                        task = %ctx.name,
                        elapsed = ?ctx.metrics.solving_time,
                        interactions = ctx.metrics.total_interactions(),
                        "task solved"
                    );
                    Ok(Transition::Stay)
                })
                .on_exit(|ctx: &mut TaskContext| {
                    debug!(task = %ctx.name, "left solved state");
                }),
        )
        .allow(allowed)
        .initial(TaskState::Placing)
        .build()
}

fn solving_tick(ctx: &mut TaskContext) -> HookResult<TaskState> {
    ctx.metrics.advance(ctx.delta);
    ctx.behaviour.on_solving_tick(ctx.delta);
    if ctx.behaviour.check_solution() {
        Ok(Transition::To(TaskState::Solved))
    } else {
        Ok(Transition::Stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_allows_protocol_edges_only() {
        assert!(allowed(&TaskState::Placing, &TaskState::Solving));
        assert!(allowed(&TaskState::Solving, &TaskState::Placing));
        assert!(allowed(&TaskState::Solving, &TaskState::Solved));

        assert!(!allowed(&TaskState::Placing, &TaskState::Solved));
        assert!(!allowed(&TaskState::Solved, &TaskState::Placing));
        assert!(!allowed(&TaskState::Solved, &TaskState::Solving));
    }

    #[test]
    fn machine_registers_three_states_without_current() {
        let machine = task_machine("spy").unwrap();

        assert_eq!(machine.len(), 3);
        assert!(machine.current_key().is_none());
        assert_eq!(machine.label(), "task:spy");
        assert!(machine.get_state(&TaskState::Solving).unwrap().has_update());
    }
}
