//! Validation rules for room configurations.
//!
//! Every rule runs and every violation is reported, so a broken config file
//! can be fixed in one pass.

use crate::config::error::ConfigViolation;
use crate::config::{ModalityPlan, RoomConfig};
use crate::room::Modality;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Validate `config` against a room holding `task_count` tasks.
pub fn validate(
    config: &RoomConfig,
    task_count: usize,
) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

    checks.push(if task_count == 0 {
        Validation::fail(ConfigViolation::NoTasks)
    } else {
        Validation::success(())
    });

    for modality in Modality::ALL {
        let plan = config.plan(modality);
        checks.push(non_empty(modality, plan));
        checks.push(in_range(modality, plan, task_count));
    }

    Validation::all_vec(checks).map(|_| ())
}

fn non_empty(
    modality: Modality,
    plan: &ModalityPlan,
) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if plan.start < plan.end {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::EmptyPlan {
            modality,
            start: plan.start,
            end: plan.end,
        })
    }
}

fn in_range(
    modality: Modality,
    plan: &ModalityPlan,
    task_count: usize,
) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if plan.end <= task_count {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::PlanOutOfRange {
            modality,
            end: plan.end,
            task_count,
        })
    }
}
