use std::time::{Duration, Instant};

/// Statistics for one sitting, across restarts
pub struct SessionStats {
    pub start_time: Instant,
    /// Time spent in the current game
    pub elapsed: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub longest_snake: usize,
    pub food_eaten: u64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            longest_snake: 0,
            food_eaten: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed = self.start_time.elapsed();
    }

    /// Restart the clock for a new game whose snake starts `length` long
    pub fn on_game_start(&mut self, length: usize) {
        self.start_time = Instant::now();
        self.elapsed = Duration::ZERO;
        self.longest_snake = self.longest_snake.max(length);
    }

    pub fn on_food_eaten(&mut self, length: usize) {
        self.food_eaten += 1;
        self.longest_snake = self.longest_snake.max(length);
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    /// Elapsed game time as `MM:SS`
    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
