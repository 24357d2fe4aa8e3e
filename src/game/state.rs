use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use super::config::GameConfig;
use super::grid::{Boundary, Cell, Grid};
use super::heading::Heading;
use crate::error::Result;

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collision {
    /// Snake left the grid with walls enabled
    Wall,
    /// Snake ran into its own body
    SelfBite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Crashed(Collision),
    /// The snake fills every cell
    Won,
}

/// What happened during one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub ate_food: bool,
    pub collision: Option<Collision>,
    /// New food cell, when food was eaten and somewhere was left to put it
    pub respawned_food: Option<Cell>,
    /// Status after the tick
    pub status: Status,
}

/// Complete game state
///
/// The body is stored head first. `heading` is the direction of the last
/// move; a turn requested between ticks waits in `queued_turn` so that a
/// reversal is judged against where the neck actually is.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    body: VecDeque<Cell>,
    /// `occupied[grid.index(cell)]` is true for every body cell
    occupied: Vec<bool>,
    heading: Heading,
    queued_turn: Option<Heading>,
    food: Option<Cell>,
    pending_growth: usize,
    score: u32,
    ticks: u64,
    status: Status,
    rng: StdRng,
}

impl GameState {
    /// Build the starting position described by `config`
    pub fn new(config: &GameConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut state = Self {
            config: config.clone(),
            grid: config.grid(),
            body: VecDeque::new(),
            occupied: vec![false; config.grid().area()],
            heading: config.heading,
            queued_turn: None,
            food: None,
            pending_growth: 0,
            score: 0,
            ticks: 0,
            status: Status::Running,
            rng,
        };
        state.lay_out();
        Ok(state)
    }

    /// Start a new game with the same configuration
    ///
    /// The random generator is not reseeded, so food appears in a different
    /// order from the previous game.
    pub fn restart(&mut self) {
        self.lay_out();
        info!("game restarted");
    }

    fn lay_out(&mut self) {
        self.body.clear();
        self.occupied.fill(false);
        for cell in self.config.initial_body() {
            self.body.push_back(cell);
            self.mark(cell, true);
        }
        self.heading = self.config.heading;
        self.queued_turn = None;
        self.pending_growth = 0;
        self.score = 0;
        self.ticks = 0;
        self.status = Status::Running;
        self.food = match self.config.initial_food {
            Some(cell) => Some(cell),
            None => self.spawn_food(),
        };
    }

    /// Request a heading change for the next tick
    ///
    /// Returns false when the turn would fold the head back onto the neck.
    pub fn turn(&mut self, heading: Heading) -> bool {
        if self.body.len() > 1 && self.heading.is_opposite(heading) {
            return false;
        }
        self.queued_turn = Some(heading);
        true
    }

    /// Advance the simulation by one tick
    pub fn step(&mut self) -> StepOutcome {
        if self.status != Status::Running {
            return StepOutcome {
                ate_food: false,
                collision: None,
                respawned_food: None,
                status: self.status,
            };
        }

        if let Some(heading) = self.queued_turn.take() {
            self.heading = heading;
        }

        self.ticks += 1;

        let next = match self.probe(self.heading) {
            Ok(cell) => cell,
            Err(collision) => return self.crash(collision),
        };
        let ate_food = self.food == Some(next);

        self.body.push_front(next);
        self.mark(next, true);
        if ate_food {
            self.score += 1;
            self.pending_growth += self.config.growth_per_food;
        }
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else if let Some(tail) = self.body.pop_back() {
            // The head may have moved into the cell the tail just left
            if tail != next {
                self.mark(tail, false);
            }
        }

        let mut respawned_food = None;
        if ate_food {
            self.food = self.spawn_food();
            respawned_food = self.food;
            debug!(
                head = %next,
                score = self.score,
                length = self.len(),
                food = ?self.food,
                "food eaten"
            );
            if self.food.is_none() {
                self.status = Status::Won;
                info!(score = self.score, ticks = self.ticks, "board filled");
            }
        }

        StepOutcome {
            ate_food,
            collision: None,
            respawned_food,
            status: self.status,
        }
    }

    /// Where the head would land moving along `heading` this tick, or the
    /// collision that move would cause
    pub fn probe(&self, heading: Heading) -> std::result::Result<Cell, Collision> {
        let mut next = self.head().neighbour(heading);
        if !self.grid.contains(next) {
            match self.config.boundary {
                Boundary::Walls => return Err(Collision::Wall),
                Boundary::Wrap => next = self.grid.wrap(next),
            }
        }

        let tail_moves = self.pending_growth == 0 && self.food != Some(next);
        if self.bites(next, tail_moves) {
            return Err(Collision::SelfBite);
        }
        Ok(next)
    }

    /// Whether `cell` lands on the body, ignoring a tail that is about to move
    fn bites(&self, cell: Cell, tail_moves: bool) -> bool {
        if tail_moves && self.body.back() == Some(&cell) {
            return false;
        }
        self.occupies(cell)
    }

    fn mark(&mut self, cell: Cell, occupied: bool) {
        if let Some(i) = self.grid.index(cell) {
            self.occupied[i] = occupied;
        }
    }

    fn crash(&mut self, collision: Collision) -> StepOutcome {
        self.status = Status::Crashed(collision);
        info!(
            ?collision,
            score = self.score,
            ticks = self.ticks,
            length = self.len(),
            "game over"
        );
        StepOutcome {
            ate_food: false,
            collision: Some(collision),
            respawned_food: None,
            status: self.status,
        }
    }

    /// Pick a free cell uniformly at random, or `None` when the board is full
    fn spawn_food(&mut self) -> Option<Cell> {
        let free = self.free_cells();
        free.choose(&mut self.rng).copied()
    }

    /// Every cell not covered by the snake, row by row
    pub fn free_cells(&self) -> Vec<Cell> {
        self.grid
            .cells()
            .zip(&self.occupied)
            .filter(|(_, occupied)| !**occupied)
            .map(|(cell, _)| cell)
            .collect()
    }

    pub fn head(&self) -> Cell {
        // The body is never empty: validation rejects a zero-length snake
        // and collisions leave the body untouched.
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Body cells, head first
    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.grid.index(cell).is_some_and(|i| self.occupied[i])
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// The heading the next tick will use
    pub fn next_heading(&self) -> Heading {
        self.queued_turn.unwrap_or(self.heading)
    }

    pub fn pending_growth(&self) -> usize {
        self.pending_growth
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::pilot::{GreedyPilot, Pilot};
    use std::collections::HashSet;

    fn config(start: Cell, heading: Heading, length: usize) -> GameConfig {
        GameConfig {
            start: Some(start),
            heading,
            initial_length: length,
            initial_food: Some(Cell::new(0, 0)),
            seed: Some(7),
            ..GameConfig::new(10, 10)
        }
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new(&config(Cell::new(5, 5), Heading::Right, 3)).unwrap();

        assert!(state.is_running());
        assert_eq!(state.score(), 0);
        assert_eq!(state.ticks(), 0);
        assert_eq!(state.len(), 3);
        assert_eq!(state.head(), Cell::new(5, 5));
        assert_eq!(state.food(), Some(Cell::new(0, 0)));
    }

    #[test]
    fn test_default_layout_starts_in_centre_heading_up() {
        let state = GameState::new(&GameConfig {
            seed: Some(1),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(state.head(), Cell::new(12, 7));
        assert_eq!(state.heading(), Heading::Up);
        assert_eq!(state.len(), 1);
        let food = state.food().unwrap();
        assert!(state.grid().contains(food));
        assert!(!state.occupies(food));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = GameState::new(&GameConfig::new(0, 0)).unwrap_err();
        assert!(matches!(err, GameError::GridTooSmall { .. }));
    }

    #[test]
    fn test_head_moves_one_cell_per_tick() {
        let mut state = GameState::new(&config(Cell::new(5, 5), Heading::Right, 3)).unwrap();

        let outcome = state.step();

        assert_eq!(outcome.status, Status::Running);
        assert!(!outcome.ate_food);
        assert_eq!(outcome.collision, None);
        assert_eq!(state.ticks(), 1);
        assert_eq!(state.len(), 3);
        let body: Vec<Cell> = state.segments().collect();
        assert_eq!(body, vec![Cell::new(6, 5), Cell::new(5, 5), Cell::new(4, 5)]);
    }

    #[test]
    fn test_eating_grows_by_one_and_respawns_food() {
        let mut cfg = config(Cell::new(5, 5), Heading::Right, 3);
        cfg.initial_food = Some(Cell::new(6, 5));
        let mut state = GameState::new(&cfg).unwrap();

        let outcome = state.step();

        assert!(outcome.ate_food);
        assert_eq!(state.score(), 1);
        assert_eq!(state.len(), 4);
        assert_eq!(state.head(), Cell::new(6, 5));
        let food = outcome.respawned_food.unwrap();
        assert_eq!(state.food(), Some(food));
        assert!(!state.occupies(food));
        assert_eq!(state.pending_growth(), 0);

        // Growth does not carry over into the next tick
        state.food = Some(Cell::new(0, 9));
        state.turn(Heading::Down);
        state.step();
        assert_eq!(state.len(), 4);
    }

    #[test]
    fn test_growth_per_food_spreads_over_ticks() {
        let mut cfg = config(Cell::new(2, 5), Heading::Right, 1);
        cfg.initial_food = Some(Cell::new(3, 5));
        cfg.growth_per_food = 3;
        let mut state = GameState::new(&cfg).unwrap();

        state.step();
        assert_eq!(state.len(), 2);
        assert_eq!(state.pending_growth(), 2);

        state.food = Some(Cell::new(9, 0));
        state.turn(Heading::Down);
        state.step();
        assert_eq!(state.len(), 3);
        state.step();
        assert_eq!(state.len(), 4);
        assert_eq!(state.pending_growth(), 0);
        state.step();
        assert_eq!(state.len(), 4);
    }

    #[test]
    fn test_wall_collision() {
        let mut state = GameState::new(&config(Cell::new(0, 5), Heading::Left, 1)).unwrap();
        let before: Vec<Cell> = state.segments().collect();

        let outcome = state.step();

        assert_eq!(outcome.collision, Some(Collision::Wall));
        assert_eq!(outcome.status, Status::Crashed(Collision::Wall));
        assert!(!state.is_running());
        assert_eq!(state.ticks(), 1);
        assert_eq!(state.segments().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_wrap_boundary_re_enters_opposite_edge() {
        let mut cfg = config(Cell::new(0, 5), Heading::Left, 1);
        cfg.boundary = Boundary::Wrap;
        let mut state = GameState::new(&cfg).unwrap();

        let outcome = state.step();

        assert_eq!(outcome.status, Status::Running);
        assert_eq!(state.head(), Cell::new(9, 5));
    }

    #[test]
    fn test_self_collision() {
        // Body: (5,5), (4,5), (3,5), (2,5), (1,5)
        let mut state = GameState::new(&config(Cell::new(5, 5), Heading::Right, 5)).unwrap();

        assert!(state.turn(Heading::Down));
        state.step(); // (5,6)
        assert!(state.turn(Heading::Left));
        state.step(); // (4,6)
        assert!(state.turn(Heading::Up));
        let outcome = state.step(); // (4,5) is still body

        assert_eq!(outcome.collision, Some(Collision::SelfBite));
        assert_eq!(state.status(), Status::Crashed(Collision::SelfBite));
    }

    #[test]
    fn test_chasing_the_tail_is_allowed() {
        // A 2x2 loop: the head moves into the cell the tail is vacating
        let mut state = GameState::new(&config(Cell::new(5, 5), Heading::Right, 4)).unwrap();
        state.turn(Heading::Down);
        state.step(); // (5,6) (5,5) (4,5) (3,5)
        state.turn(Heading::Left);
        state.step(); // (4,6) (5,6) (5,5) (4,5)
        state.turn(Heading::Up);
        let outcome = state.step(); // (4,5) is the tail

        assert_eq!(outcome.status, Status::Running);
        assert_eq!(state.head(), Cell::new(4, 5));
        assert_eq!(state.len(), 4);
    }

    #[test]
    fn test_probe_matches_step() {
        let mut state = GameState::new(&config(Cell::new(0, 5), Heading::Up, 3)).unwrap();

        assert_eq!(state.probe(Heading::Left), Err(Collision::Wall));
        assert_eq!(state.probe(Heading::Down), Err(Collision::SelfBite));
        assert_eq!(state.probe(Heading::Up), Ok(Cell::new(0, 4)));

        let outcome = state.step();
        assert_eq!(outcome.status, Status::Running);
        assert_eq!(state.head(), Cell::new(0, 4));
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut state = GameState::new(&config(Cell::new(5, 5), Heading::Right, 3)).unwrap();

        assert!(!state.turn(Heading::Left));
        state.step();
        assert_eq!(state.heading(), Heading::Right);
        assert_eq!(state.head(), Cell::new(6, 5));
    }

    #[test]
    fn test_reversal_judged_against_last_move() {
        let mut state = GameState::new(&config(Cell::new(5, 5), Heading::Right, 3)).unwrap();

        // Up then Left within one tick must not fold back onto the neck
        assert!(state.turn(Heading::Up));
        assert!(!state.turn(Heading::Left));
        assert_eq!(state.next_heading(), Heading::Up);
    }

    #[test]
    fn test_single_segment_may_reverse() {
        let mut state = GameState::new(&config(Cell::new(5, 5), Heading::Right, 1)).unwrap();
        assert!(state.turn(Heading::Left));
        state.step();
        assert_eq!(state.head(), Cell::new(4, 5));
    }

    #[test]
    fn test_finished_game_does_not_advance() {
        let mut state = GameState::new(&config(Cell::new(0, 5), Heading::Left, 1)).unwrap();
        state.step();
        let ticks = state.ticks();

        let outcome = state.step();

        assert_eq!(outcome.status, Status::Crashed(Collision::Wall));
        assert_eq!(outcome.collision, None);
        assert!(!outcome.ate_food);
        assert_eq!(state.ticks(), ticks);
    }

    #[test]
    fn test_filling_the_board_wins() {
        let cfg = GameConfig {
            start: Some(Cell::new(1, 1)),
            heading: Heading::Down,
            initial_length: 1,
            initial_food: Some(Cell::new(0, 1)),
            seed: Some(3),
            ..GameConfig::new(2, 2)
        };
        let mut state = GameState::new(&cfg).unwrap();

        state.turn(Heading::Left);
        assert!(state.step().ate_food); // (0,1) (1,1)

        state.food = Some(Cell::new(0, 0));
        state.turn(Heading::Up);
        let outcome = state.step(); // (0,0) (0,1) (1,1)
        assert!(outcome.ate_food);
        // Only one free cell is left, so the respawn is forced
        assert_eq!(outcome.respawned_food, Some(Cell::new(1, 0)));

        state.turn(Heading::Right);
        let outcome = state.step();

        assert!(outcome.ate_food);
        assert_eq!(outcome.status, Status::Won);
        assert_eq!(outcome.respawned_food, None);
        assert_eq!(state.food(), None);
        assert_eq!(state.len(), 4);
        assert_eq!(state.score(), 3);
        assert!(state.free_cells().is_empty());
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut cfg = config(Cell::new(5, 5), Heading::Right, 3);
        cfg.initial_food = Some(Cell::new(6, 5));
        let mut state = GameState::new(&cfg).unwrap();
        state.step();
        state.turn(Heading::Up);
        state.step();

        state.restart();

        assert!(state.is_running());
        assert_eq!(state.score(), 0);
        assert_eq!(state.ticks(), 0);
        assert_eq!(state.len(), 3);
        assert_eq!(state.head(), Cell::new(5, 5));
        assert_eq!(state.heading(), Heading::Right);
        assert_eq!(state.food(), Some(Cell::new(6, 5)));
    }

    #[test]
    fn test_seeded_games_are_reproducible() {
        let cfg = GameConfig {
            seed: Some(42),
            ..Default::default()
        };
        let a = GameState::new(&cfg).unwrap();
        let b = GameState::new(&cfg).unwrap();
        assert_eq!(a.food(), b.food());
    }

    #[test]
    fn test_food_never_spawns_on_snake() {
        let cfg = GameConfig {
            start: Some(Cell::new(2, 0)),
            heading: Heading::Right,
            initial_length: 3,
            ..GameConfig::new(3, 2)
        };
        for seed in 0..50 {
            let state = GameState::new(&GameConfig {
                seed: Some(seed),
                ..cfg.clone()
            })
            .unwrap();
            let food = state.food().unwrap();
            assert_eq!(food.y, 1, "seed {seed} put food on the snake");
        }
    }

    #[test]
    fn test_invariants_hold_over_long_play() {
        for boundary in [Boundary::Walls, Boundary::Wrap] {
            for growth_per_food in [1, 3] {
                for seed in 0..6 {
                    let mut state = GameState::new(&GameConfig {
                        boundary,
                        growth_per_food,
                        seed: Some(seed),
                        ..GameConfig::new(12, 9)
                    })
                    .unwrap();
                    let mut pilot = GreedyPilot::new();
                    let area = state.grid().area();

                    for _ in 0..3_000 {
                        if let Some(heading) = pilot.choose(&state) {
                            state.turn(heading);
                        }
                        let before = state.head();
                        let heading = state.next_heading();
                        let outcome = state.step();
                        if outcome.status != Status::Running {
                            break;
                        }

                        let expected = state.grid().wrap(before.neighbour(heading));
                        assert_eq!(state.head(), expected, "seed {seed}");

                        let distinct: HashSet<Cell> = state.segments().collect();
                        assert_eq!(distinct.len(), state.len(), "seed {seed}");
                        assert!(state.segments().all(|cell| state.occupies(cell)));
                        assert_eq!(state.free_cells().len(), area - state.len());

                        let food = state.food().unwrap();
                        assert!(!state.occupies(food), "seed {seed} put food on the snake");
                    }
                }
            }
        }
    }

    #[test]
    fn test_long_snake_on_large_grid() {
        let mut state = GameState::new(&GameConfig {
            start: Some(Cell::new(255, 128)),
            heading: Heading::Right,
            initial_length: 256,
            initial_food: Some(Cell::new(0, 0)),
            seed: Some(13),
            ..GameConfig::new(256, 256)
        })
        .unwrap();
        assert_eq!(state.free_cells().len(), 256 * 256 - 256);

        state.turn(Heading::Down);
        state.step();
        assert!(state.occupies(Cell::new(255, 129)));
        assert!(!state.occupies(Cell::new(0, 128)));
        assert_eq!(state.free_cells().len(), 256 * 256 - 256);

        // Eating still respawns away from a long body
        state.food = Some(Cell::new(255, 130));
        let outcome = state.step();
        assert!(outcome.ate_food);
        let food = outcome.respawned_food.unwrap();
        assert!(!state.occupies(food));
        assert_eq!(state.free_cells().len(), 256 * 256 - 257);
    }
}
