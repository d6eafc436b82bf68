//! Concrete task kinds.
//!
//! Each kind implements [`TaskBehaviour`](crate::task::TaskBehaviour) and
//! keeps its mechanics engine-free: positions are step indices advanced by
//! [`StepRotation`](crate::task::StepRotation), and presentation is reduced
//! to a few flags the host mirrors into the scene.

mod clock;
mod cryptex;
mod pipes;

pub use clock::ClockTask;
pub use cryptex::CryptexTask;
pub use pipes::PipesTask;

use std::time::Duration;

/// Default time between two rotation steps.
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(120);

/// Presentation flags shared by every kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Presentation {
    pub frozen: bool,
    pub visible: bool,
    pub revealed: bool,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            frozen: true,
            visible: false,
            revealed: false,
        }
    }
}

/// Steps requested by a press or slide gesture.
/// Largest number of steps a single gesture can ask for.
const MAX_GESTURE_STEPS: f32 = 64.0;

pub(crate) fn requested_steps(interaction: crate::task::Interaction) -> i32 {
    use crate::task::Interaction;
    match interaction {
        Interaction::Press => 1,
        Interaction::Slide(value) => value
            .round()
            .clamp(-MAX_GESTURE_STEPS, MAX_GESTURE_STEPS) as i32,
        Interaction::HoverStart | Interaction::HoverEnd | Interaction::Touch => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Interaction;

    #[test]
    fn press_is_one_step_and_slide_rounds() {
        assert_eq!(requested_steps(Interaction::Press), 1);
        assert_eq!(requested_steps(Interaction::Slide(2.6)), 3);
        assert_eq!(requested_steps(Interaction::Slide(-1.4)), -1);
        assert_eq!(requested_steps(Interaction::Touch), 0);
        assert_eq!(requested_steps(Interaction::HoverStart), 0);
    }

    #[test]
    fn oversized_slides_are_bounded() {
        assert_eq!(requested_steps(Interaction::Slide(3.0e9)), 64);
        assert_eq!(requested_steps(Interaction::Slide(f32::NEG_INFINITY)), -64);
        assert_eq!(requested_steps(Interaction::Slide(f32::NAN)), 0);
    }
}
