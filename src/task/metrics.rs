//! Interaction counters kept per task.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A user interaction routed to one of a task's elements.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Interaction {
    HoverStart,
    HoverEnd,
    Touch,
    Press,
    /// Pinch-slide gesture; the value is the signed number of steps dragged.
    Slide(f32),
}

/// Observability counters for one task.
///
/// These are not machine state. They only move while the task is solving.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskMetrics {
    pub hover_count: u32,
    pub touch_count: u32,
    pub press_count: u32,
    pub slide_count: u32,
    pub solving_time: Duration,
    pub hover_time: Duration,
    #[serde(skip)]
    hovering: bool,
}

impl TaskMetrics {
    pub fn record(&mut self, interaction: Interaction) {
        match interaction {
            Interaction::HoverStart => {
                self.hover_count += 1;
                self.hovering = true;
            }
            Interaction::HoverEnd => self.hovering = false,
            Interaction::Touch => self.touch_count += 1,
            Interaction::Press => self.press_count += 1,
            Interaction::Slide(_) => self.slide_count += 1,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.solving_time += delta;
        if self.hovering {
            self.hover_time += delta;
        }
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn total_interactions(&self) -> u32 {
        self.hover_count + self.touch_count + self.press_count + self.slide_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_each_kind() {
        let mut metrics = TaskMetrics::default();
        metrics.record(Interaction::HoverStart);
        metrics.record(Interaction::Touch);
        metrics.record(Interaction::Press);
        metrics.record(Interaction::Press);
        metrics.record(Interaction::Slide(-2.0));
        metrics.record(Interaction::HoverEnd);

        assert_eq!(metrics.hover_count, 1);
        assert_eq!(metrics.touch_count, 1);
        assert_eq!(metrics.press_count, 2);
        assert_eq!(metrics.slide_count, 1);
        assert_eq!(metrics.total_interactions(), 5);
        assert!(!metrics.is_hovering());
    }

    #[test]
    fn hover_time_accumulates_only_while_hovering() {
        let mut metrics = TaskMetrics::default();
        metrics.advance(Duration::from_millis(100));
        metrics.record(Interaction::HoverStart);
        metrics.advance(Duration::from_millis(250));
        metrics.record(Interaction::HoverEnd);
        metrics.advance(Duration::from_millis(100));

        assert_eq!(metrics.solving_time, Duration::from_millis(450));
        assert_eq!(metrics.hover_time, Duration::from_millis(250));
    }
}
