use serde::{Deserialize, Serialize};

/// Direction the snake's head travels in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heading {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// Every heading, in the order the autopilot breaks ties
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Right, Heading::Down, Heading::Left];

    /// Unit offset (dx, dy) of one move; y grows downwards
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    /// True if turning from self to other would be a 180-degree turn
    pub fn is_opposite(self, other: Heading) -> bool {
        self.opposite() == other
    }
}
