use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::grid::{Boundary, Cell, Grid};
use super::heading::Heading;
use crate::error::{GameError, Result};

/// Smallest playable grid side
pub const MIN_SIDE: usize = 2;

/// Upper bound on the number of cells in a grid
pub const MAX_CELLS: usize = 1 << 16;

/// Rules and starting layout of a game
///
/// Every field may be omitted from a config file; missing fields take their
/// default. The defaults reproduce a 1280x720 window split into 50px cells,
/// with a single-segment snake heading up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Number of segments the snake starts with
    pub initial_length: usize,
    /// Head cell at start; the grid centre when unset
    pub start: Option<Cell>,
    /// Heading at start
    pub heading: Heading,
    /// First food cell; a random free cell when unset
    pub initial_food: Option<Cell>,
    pub boundary: Boundary,
    /// Segments added for every food eaten
    pub growth_per_food: usize,
    /// Seed for food placement; OS entropy when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 25,
            grid_height: 14,
            initial_length: 1,
            start: None,
            heading: Heading::Up,
            initial_food: None,
            boundary: Boundary::Walls,
            growth_per_food: 1,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&text).map_err(|source| GameError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), ?config, "loaded game config");
        Ok(config)
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    pub fn start_cell(&self) -> Cell {
        self.start.unwrap_or_else(|| self.grid().centre())
    }

    /// Cells of the starting snake, head first, laid out behind the head
    pub fn initial_body(&self) -> Vec<Cell> {
        let back = self.heading.opposite();
        std::iter::successors(Some(self.start_cell()), |cell| Some(cell.neighbour(back)))
            .take(self.initial_length)
            .collect()
    }

    /// Check that the configuration describes a playable starting position
    pub fn validate(&self) -> Result<()> {
        self.check().map_err(|error| {
            warn!(%error, "rejected game config");
            error
        })
    }

    fn check(&self) -> Result<()> {
        let grid = self.grid();

        if grid.width < MIN_SIDE || grid.height < MIN_SIDE {
            return Err(GameError::GridTooSmall {
                width: grid.width,
                height: grid.height,
                min: MIN_SIDE,
            });
        }
        if grid.width.saturating_mul(grid.height) > MAX_CELLS {
            return Err(GameError::GridTooLarge {
                width: grid.width,
                height: grid.height,
                max: MAX_CELLS,
            });
        }
        if self.initial_length == 0 {
            return Err(GameError::EmptySnake);
        }
        if self.growth_per_food == 0 {
            return Err(GameError::ZeroGrowth);
        }

        let start = self.start_cell();
        if !grid.contains(start) {
            return Err(GameError::StartOutOfBounds(start));
        }

        // A snake covering the whole grid leaves nowhere to put food
        let too_long = self.initial_length >= grid.area();
        let body = if too_long { Vec::new() } else { self.initial_body() };
        if too_long || !body.iter().all(|cell| grid.contains(*cell)) {
            return Err(GameError::SnakeDoesNotFit {
                start,
                heading: self.heading,
                length: self.initial_length,
            });
        }

        if let Some(food) = self.initial_food {
            if !grid.contains(food) || body.contains(&food) {
                return Err(GameError::FoodPlacement(food));
            }
        }

        Ok(())
    }
}
