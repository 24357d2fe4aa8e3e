use crate::game::{Boundary, Cell, GameState, Grid, Heading};

use super::Pilot;

/// Heads straight for the food, avoiding any move that crashes this tick
///
/// It looks a single move ahead, so it will happily steer into a dead end.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPilot;

impl GreedyPilot {
    pub fn new() -> Self {
        Self
    }

    /// Distance from `from` to `to`, taking the short way round on a
    /// wrapping board
    fn distance(grid: Grid, wrap: bool, from: Cell, to: Cell) -> u32 {
        if !wrap {
            return from.manhattan(to);
        }
        let dx = from.x.abs_diff(to.x);
        let dy = from.y.abs_diff(to.y);
        dx.min(grid.width as u32 - dx) + dy.min(grid.height as u32 - dy)
    }
}

impl Pilot for GreedyPilot {
    fn choose(&mut self, state: &GameState) -> Option<Heading> {
        let current = state.heading();
        let grid = state.grid();
        let wrap = state.config().boundary == Boundary::Wrap;
        let target = state.food();

        let reversible = state.len() == 1;
        let candidates = Heading::ALL
            .into_iter()
            .filter(|heading| reversible || !current.is_opposite(*heading))
            .filter_map(|heading| state.probe(heading).ok().map(|cell| (heading, cell)));

        // Ties go to the current heading, then to the order of Heading::ALL
        candidates
            .min_by_key(|(heading, cell)| {
                let distance = target.map_or(0, |food| Self::distance(grid, wrap, *cell, food));
                (distance, *heading != current)
            })
            .map(|(heading, _)| heading)
    }
}
