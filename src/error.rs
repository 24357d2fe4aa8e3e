use std::path::PathBuf;

use thiserror::Error;

use crate::game::{Cell, Heading};

/// Errors raised while building a game from its configuration
#[derive(Debug, Error)]
pub enum GameError {
    /// The config file could not be read
    #[error("failed to read config file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for a `GameConfig`
    #[error("failed to parse config file {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("grid must be at least {min}x{min} cells, got {width}x{height}")]
    GridTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },

    #[error("grid of {width}x{height} cells exceeds the limit of {max} cells")]
    GridTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("start cell {0} lies outside the grid")]
    StartOutOfBounds(Cell),

    #[error("snake of length {length} heading {heading:?} does not fit behind {start}")]
    SnakeDoesNotFit {
        start: Cell,
        heading: Heading,
        length: usize,
    },

    #[error("initial food {0} is outside the grid or under the snake")]
    FoodPlacement(Cell),

    #[error("initial length must be at least 1")]
    EmptySnake,

    #[error("growth per food must be at least 1")]
    ZeroGrowth,
}

pub type Result<T> = std::result::Result<T, GameError>;
