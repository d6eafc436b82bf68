//! Cryptex puzzle: turn each ring to its symbol of the code.

use super::{requested_steps, Presentation, DEFAULT_STEP_INTERVAL};
use crate::task::{Interaction, StepRotation, TaskBehaviour};
use std::time::Duration;

/// A row of rings; each ring is one interactive element.
#[derive(Clone, Debug)]
pub struct CryptexTask {
    rings: Vec<StepRotation>,
    code: Vec<u32>,
    presentation: Presentation,
}

impl CryptexTask {
    /// Rings with `symbols` positions each, all starting on symbol 0. The
    /// cryptex has one ring per entry of `code`.
    pub fn new(symbols: u32, code: Vec<u32>) -> Self {
        Self::with_interval(symbols, code, DEFAULT_STEP_INTERVAL)
    }

    pub fn with_interval(symbols: u32, code: Vec<u32>, interval: Duration) -> Self {
        let rings = code
            .iter()
            .map(|_| StepRotation::new(symbols, interval))
            .collect();
        let symbols = symbols.max(1);
        let code = code.into_iter().map(|symbol| symbol % symbols).collect();
        Self {
            rings,
            code,
            presentation: Presentation::default(),
        }
    }

    /// Symbols currently facing the player.
    pub fn reading(&self) -> Vec<u32> {
        self.rings.iter().map(StepRotation::position).collect()
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }
}

impl TaskBehaviour for CryptexTask {
    fn kind(&self) -> &str {
        "cryptex"
    }

    fn interactive_elements(&self) -> usize {
        self.rings.len()
    }

    fn required_elements(&self) -> usize {
        self.code.len()
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
        for ring in &mut self.rings {
            ring.advance(delta);
        }
    }

    fn handle(&mut self, element: usize, interaction: Interaction) {
        if let Some(ring) = self.rings.get_mut(element) {
            ring.queue(requested_steps(interaction));
        }
    }

    fn check_solution(&self) -> bool {
        self.rings
            .iter()
            .zip(&self.code)
            .all(|(ring, symbol)| ring.is_idle() && ring.position() == *symbol)
    }

    fn on_solved(&mut self) {
        self.presentation.revealed = true;
    }

    fn set_visible(&mut self, visible: bool) {
        self.presentation.visible = visible;
    }

    fn reset(&mut self) {
        for ring in &mut self.rings {
            ring.snap_to(0);
        }
        self.presentation.revealed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(10);

    #[test]
    fn empty_code_has_no_elements() {
        let cryptex = CryptexTask::new(10, Vec::new());
        assert_eq!(cryptex.interactive_elements(), 0);
    }

    #[test]
    fn code_is_entered_ring_by_ring() {
        let mut cryptex = CryptexTask::with_interval(6, vec![1, 5], STEP);
        cryptex.handle(0, Interaction::Press);
        cryptex.handle(1, Interaction::Slide(-1.0));

        cryptex.on_solving_tick(STEP);

        assert_eq!(cryptex.reading(), vec![1, 5]);
        assert!(cryptex.check_solution());
    }

    #[test]
    fn code_symbols_wrap() {
        let cryptex = CryptexTask::with_interval(4, vec![6], STEP);
        assert_eq!(cryptex.code, vec![2]);
    }

    #[test]
    fn repeated_huge_slides_spin_at_most_one_turn() {
        let mut cryptex = CryptexTask::with_interval(6, vec![2], STEP);
        cryptex.handle(0, Interaction::Slide(3.0e9));
        cryptex.handle(0, Interaction::Slide(3.0e9));

        assert_eq!(cryptex.rings[0].steps_remaining(), 6);
        cryptex.on_solving_tick(STEP * 6);
        assert_eq!(cryptex.reading(), vec![0]);
    }

    #[test]
    fn unknown_ring_is_ignored() {
        let mut cryptex = CryptexTask::with_interval(4, vec![0], STEP);
        cryptex.handle(3, Interaction::Press);
        cryptex.on_solving_tick(STEP);

        assert_eq!(cryptex.reading(), vec![0]);
    }
}
