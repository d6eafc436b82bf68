//! Pipes puzzle: rotate tiles a quarter turn at a time until every pipe
//! segment lines up.

use super::{requested_steps, Presentation, DEFAULT_STEP_INTERVAL};
use crate::task::{Interaction, StepRotation, TaskBehaviour};
use std::time::Duration;

const QUARTER_TURNS: u32 = 4;

#[derive(Clone, Debug)]
pub struct PipesTask {
    tiles: Vec<StepRotation>,
    start: Vec<u32>,
    target: Vec<u32>,
    presentation: Presentation,
}

impl PipesTask {
    /// Tiles at `start` orientations (quarter turns) that must reach `target`.
    /// Extra entries in the longer list are ignored.
    pub fn new(start: Vec<u32>, target: Vec<u32>) -> Self {
        Self::with_interval(start, target, DEFAULT_STEP_INTERVAL)
    }

    pub fn with_interval(start: Vec<u32>, target: Vec<u32>, interval: Duration) -> Self {
        let len = start.len().min(target.len());
        let start: Vec<u32> = start.into_iter().take(len).collect();
        let target: Vec<u32> = target
            .into_iter()
            .take(len)
            .map(|turns| turns % QUARTER_TURNS)
            .collect();
        let tiles = start
            .iter()
            .map(|&turns| StepRotation::at(QUARTER_TURNS, interval, turns))
            .collect();
        Self {
            tiles,
            start,
            target,
            presentation: Presentation::default(),
        }
    }

    pub fn orientations(&self) -> Vec<u32> {
        self.tiles.iter().map(StepRotation::position).collect()
    }

    /// Number of tiles already in their target orientation.
    pub fn aligned(&self) -> usize {
        self.tiles
            .iter()
            .zip(&self.target)
            .filter(|(tile, target)| tile.position() == **target)
            .count()
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }
}

impl TaskBehaviour for PipesTask {
    fn kind(&self) -> &str {
        "pipes"
    }

    fn interactive_elements(&self) -> usize {
        self.tiles.len()
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
        for tile in &mut self.tiles {
            tile.advance(delta);
        }
    }

    fn handle(&mut self, element: usize, interaction: Interaction) {
        if let Some(tile) = self.tiles.get_mut(element) {
            tile.queue(requested_steps(interaction));
        }
    }

    fn check_solution(&self) -> bool {
        self.tiles.iter().all(StepRotation::is_idle) && self.aligned() == self.tiles.len()
    }

    fn on_solved(&mut self) {
        self.presentation.revealed = true;
    }

    fn set_visible(&mut self, visible: bool) {
        self.presentation.visible = visible;
    }

    fn reset(&mut self) {
        for (tile, &start) in self.tiles.iter_mut().zip(&self.start) {
            tile.snap_to(start);
        }
        self.presentation.revealed = false;
    }
}
