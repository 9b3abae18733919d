use std::time::{Duration, Instant};

use crate::game::CollisionType;

/// Statistics kept across the games of one session
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub longest_snake: usize,
    pub wall_deaths: u32,
    pub self_deaths: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            longest_snake: 0,
            wall_deaths: 0,
            self_deaths: 0,
        }
    }

    /// Refresh the running clock; called once per rendered frame
    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_snake_grew(&mut self, length: usize) {
        self.longest_snake = self.longest_snake.max(length);
    }

    pub fn on_game_over(&mut self, final_score: u32, cause: CollisionType) {
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);

        match cause {
            CollisionType::Wall => self.wall_deaths += 1,
            CollisionType::SelfCollision => self.self_deaths += 1,
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_game_over_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10, CollisionType::Wall);
        metrics.on_game_over(5, CollisionType::SelfCollision);
        metrics.on_game_over(7, CollisionType::Wall);

        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 3);
        assert_eq!(metrics.wall_deaths, 2);
        assert_eq!(metrics.self_deaths, 1);
    }

    #[test]
    fn test_longest_snake_never_shrinks() {
        let mut metrics = GameMetrics::new();
        metrics.on_snake_grew(6);
        metrics.on_snake_grew(4);
        assert_eq!(metrics.longest_snake, 6);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(30);

        metrics.on_game_start();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
    }
}
