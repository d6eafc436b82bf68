//! Clock puzzle: turn the hands to a target time.

use super::{requested_steps, Presentation, DEFAULT_STEP_INTERVAL};
use crate::task::{Interaction, StepRotation, TaskBehaviour};
use std::time::Duration;

const HOUR_HAND: usize = 0;
const MINUTE_HAND: usize = 1;
const POSITIONS: u32 = 12;

/// Two hands with twelve positions each. Element 0 is the hour hand,
/// element 1 the minute hand (five-minute steps).
#[derive(Clone, Debug)]
pub struct ClockTask {
    hands: [StepRotation; 2],
    start: [u32; 2],
    target: [u32; 2],
    presentation: Presentation,
}

impl ClockTask {
    /// Clock showing `start` that must be set to `target`, both as
    /// `(hour, minute)` with minutes rounded down to five-minute steps.
    pub fn new(start: (u32, u32), target: (u32, u32)) -> Self {
        Self::with_interval(start, target, DEFAULT_STEP_INTERVAL)
    }

    pub fn with_interval(start: (u32, u32), target: (u32, u32), interval: Duration) -> Self {
        let start = to_positions(start);
        let target = to_positions(target);
        Self {
            hands: [
                StepRotation::at(POSITIONS, interval, start[HOUR_HAND]),
                StepRotation::at(POSITIONS, interval, start[MINUTE_HAND]),
            ],
            start,
            target,
            presentation: Presentation::default(),
        }
    }

    /// Current `(hour, minute)` shown by the hands.
    pub fn time(&self) -> (u32, u32) {
        (
            self.hands[HOUR_HAND].position(),
            self.hands[MINUTE_HAND].position() * 5,
        )
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }
}

fn to_positions((hour, minute): (u32, u32)) -> [u32; 2] {
    [hour % POSITIONS, (minute / 5) % POSITIONS]
}

impl TaskBehaviour for ClockTask {
    fn kind(&self) -> &str {
        "clock"
    }

    fn interactive_elements(&self) -> usize {
        self.hands.len()
    }

    fn required_elements(&self) -> usize {
        2
    }

    fn freeze(&mut self) {
        self.presentation.frozen = true;
    }

    fn unfreeze(&mut self) {
        self.presentation.frozen = false;
    }

    fn is_frozen(&self) -> bool {
        self.presentation.frozen
    }

    fn on_solving_tick(&mut self, delta: Duration) {
        for hand in &mut self.hands {
            hand.advance(delta);
        }
    }

    fn handle(&mut self, element: usize, interaction: Interaction) {
        if let Some(hand) = self.hands.get_mut(element) {
            hand.queue(requested_steps(interaction));
        }
    }

    fn check_solution(&self) -> bool {
        self.hands
            .iter()
            .zip(self.target)
            .all(|(hand, target)| hand.is_idle() && hand.position() == target)
    }

    fn on_solved(&mut self) {
        self.presentation.revealed = true;
    }

    fn set_visible(&mut self, visible: bool) {
        self.presentation.visible = visible;
    }

    fn reset(&mut self) {
        for (hand, start) in self.hands.iter_mut().zip(self.start) {
            hand.snap_to(start);
        }
        self.presentation.revealed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(10);

    #[test]
    fn clock_starts_at_given_time() {
        let clock = ClockTask::with_interval((3, 20), (5, 0), STEP);
        assert_eq!(clock.time(), (3, 20));
        assert!(!clock.check_solution());
    }

    #[test]
    fn hands_turn_step_by_step() {
        let mut clock = ClockTask::with_interval((3, 0), (5, 10), STEP);
        clock.handle(HOUR_HAND, Interaction::Press);
        clock.handle(HOUR_HAND, Interaction::Press);
        clock.handle(MINUTE_HAND, Interaction::Slide(2.0));

        clock.on_solving_tick(STEP);
        assert_eq!(clock.time(), (4, 5));
        assert!(!clock.check_solution());

        clock.on_solving_tick(STEP);
        assert_eq!(clock.time(), (5, 10));
        assert!(clock.check_solution());
    }

    #[test]
    fn solution_waits_for_animation() {
        let mut clock = ClockTask::with_interval((4, 10), (5, 10), STEP);
        clock.handle(HOUR_HAND, Interaction::Press);
        clock.handle(HOUR_HAND, Interaction::Slide(12.0));

        clock.on_solving_tick(STEP);
        assert_eq!(clock.time(), (5, 10));
        assert!(!clock.check_solution());
    }

    #[test]
    fn reset_restores_start_time() {
        let mut clock = ClockTask::with_interval((1, 0), (2, 0), STEP);
        clock.handle(HOUR_HAND, Interaction::Press);
        clock.on_solving_tick(STEP);
        clock.on_solved();

        clock.reset();

        assert_eq!(clock.time(), (1, 0));
        assert!(!clock.presentation().revealed);
    }
}
