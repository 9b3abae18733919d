use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Widest cell the renderer supports, in terminal columns
pub const MAX_TILE_SIZE: u16 = 16;

/// Where new food may appear when the old one is eaten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodPlacement {
    /// Any cell on the board, including cells under the snake
    #[default]
    Anywhere,
    /// Only cells not covered by the snake (falls back to anywhere when full)
    AvoidSnake,
}

/// Configuration for a game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid, in cells
    pub board_size: usize,
    /// Render width of one cell, in terminal columns
    pub tile_size: u16,
    /// Seconds between snake moves
    pub move_delay: f64,
    /// Number of segments the snake starts with
    pub initial_snake_length: usize,
    pub food_placement: FoodPlacement,
    /// Draw the distance overlay on empty cells
    pub show_distances: bool,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 25,
            tile_size: 3,
            move_delay: 0.1,
            initial_snake_length: 3,
            food_placement: FoodPlacement::Anywhere,
            show_distances: true,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            ..Default::default()
        }
    }

    /// Read a configuration from a JSON file
    ///
    /// Missing fields take their default values. The result is not validated;
    /// call [`GameConfig::validate`] once any overrides have been applied.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Time between two snake moves
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(self.move_delay)
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if !(5..=256).contains(&self.board_size) {
            return Err(format!(
                "board_size must be in [5, 256], got {}",
                self.board_size
            ));
        }

        if !(1..=MAX_TILE_SIZE).contains(&self.tile_size) {
            return Err(format!(
                "tile_size must be in [1, {MAX_TILE_SIZE}], got {}",
                self.tile_size
            ));
        }

        if !self.move_delay.is_finite() || self.move_delay <= 0.0 || self.move_delay > 10.0 {
            return Err(format!(
                "move_delay must be in (0, 10] seconds, got {}",
                self.move_delay
            ));
        }

        if self.initial_snake_length == 0 || self.initial_snake_length > self.board_size / 2 {
            return Err(format!(
                "initial_snake_length must be in [1, {}], got {}",
                self.board_size / 2,
                self.initial_snake_length
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 25);
        assert_eq!(config.tile_size, 3);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.food_placement, FoodPlacement::Anywhere);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15);
        assert_eq!(config.board_size, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = GameConfig::new(4);
        assert!(config.validate().is_err());

        config = GameConfig::default();
        config.tile_size = 0;
        assert!(config.validate().is_err());

        config = GameConfig::default();
        config.tile_size = 3000;
        assert!(config.validate().is_err());

        config = GameConfig::default();
        config.move_delay = 0.0;
        assert!(config.validate().is_err());

        config.move_delay = f64::NAN;
        assert!(config.validate().is_err());

        config = GameConfig::new(10);
        config.initial_snake_length = 6;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_largest_valid_board_fits_terminal_units() {
        let mut config = GameConfig::new(256);
        config.tile_size = MAX_TILE_SIZE;
        assert!(config.validate().is_ok());

        let columns = config.board_size * config.tile_size as usize + 2;
        assert!(columns <= u16::MAX as usize);

        config.tile_size = MAX_TILE_SIZE + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "board_size": 12, "food_placement": "avoid_snake" }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.board_size, 12);
        assert_eq!(config.food_placement, FoodPlacement::AvoidSnake);
        assert_eq!(config.tile_size, 3);
        assert!(config.show_distances);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "board_size = 12").unwrap();

        let err = GameConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
