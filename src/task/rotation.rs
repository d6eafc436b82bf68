//! Step-wise rotation advanced by frame ticks.
//!
//! Rotating parts (clock hands, cryptex rings, pipe tiles) turn in discrete
//! steps, one step per interval. Requested steps are queued and played back
//! by [`StepRotation::advance`] as ticks arrive.

use std::time::Duration;

/// Rotating element with a fixed number of positions per full turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepRotation {
    steps_per_turn: u32,
    interval: Duration,
    position: u32,
    steps_remaining: i32,
    since_last_step: Duration,
}

impl StepRotation {
    /// A rotation at position 0. `steps_per_turn` is clamped to at least 1.
    pub fn new(steps_per_turn: u32, interval: Duration) -> Self {
        Self::at(steps_per_turn, interval, 0)
    }

    pub fn at(steps_per_turn: u32, interval: Duration, position: u32) -> Self {
        let steps_per_turn = steps_per_turn.max(1);
        Self {
            steps_per_turn,
            interval,
            position: position % steps_per_turn,
            steps_remaining: 0,
            since_last_step: Duration::ZERO,
        }
    }

    /// Queue `steps` more steps; negative values turn the other way.
    ///
    /// At most one full turn is pending in either direction. Steps past that
    /// are dropped.
    pub fn queue(&mut self, steps: i32) {
        let limit = i32::try_from(self.steps_per_turn).unwrap_or(i32::MAX);
        self.steps_remaining = self
            .steps_remaining
            .saturating_add(steps)
            .clamp(-limit, limit);
    }

    /// Play back queued steps for a tick of length `delta`.
    ///
    /// Returns the signed number of steps applied during this tick.
    pub fn advance(&mut self, delta: Duration) -> i32 {
        if self.steps_remaining == 0 {
            self.since_last_step = Duration::ZERO;
            return 0;
        }

        self.since_last_step += delta;
        let mut applied = 0;
        while self.steps_remaining != 0 && self.since_last_step >= self.interval {
            self.since_last_step -= self.interval;
            let direction = self.steps_remaining.signum();
            self.turn(direction);
            self.steps_remaining -= direction;
            applied += direction;
        }

        if self.steps_remaining == 0 {
            self.since_last_step = Duration::ZERO;
        }
        applied
    }

    /// Jump to `position` and drop any queued steps.
    pub fn snap_to(&mut self, position: u32) {
        self.position = position % self.steps_per_turn;
        self.steps_remaining = 0;
        self.since_last_step = Duration::ZERO;
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn steps_per_turn(&self) -> u32 {
        self.steps_per_turn
    }

    pub fn angle_degrees(&self) -> f32 {
        self.position as f32 * 360.0 / self.steps_per_turn as f32
    }

    pub fn is_idle(&self) -> bool {
        self.steps_remaining == 0
    }

    pub fn steps_remaining(&self) -> i32 {
        self.steps_remaining
    }

    fn turn(&mut self, direction: i32) {
        let turn = self.steps_per_turn as i64;
        let next = (self.position as i64 + direction as i64).rem_euclid(turn);
        self.position = next as u32;
    }
}
