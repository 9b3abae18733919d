use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use log::info;
use snake_field::game::{FoodPlacement, GameConfig};
use snake_field::modes::HumanMode;

#[derive(Parser)]
#[command(name = "snake_field")]
#[command(version, about = "Snake with a breadth-first distance overlay")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square board, in cells
    #[arg(long)]
    board_size: Option<usize>,

    /// Width of one cell, in terminal columns
    #[arg(long)]
    tile_size: Option<u16>,

    /// Seconds between snake moves
    #[arg(long)]
    move_delay: Option<f64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where new food may appear
    #[arg(long, value_enum)]
    food_placement: Option<Placement>,

    /// Start with the distance overlay hidden
    #[arg(long)]
    hide_distances: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Placement {
    /// Any cell, even under the snake
    Anywhere,
    /// Only cells the snake does not cover
    AvoidSnake,
}

impl From<Placement> for FoodPlacement {
    fn from(placement: Placement) -> Self {
        match placement {
            Placement::Anywhere => FoodPlacement::Anywhere,
            Placement::AvoidSnake => FoodPlacement::AvoidSnake,
        }
    }
}

impl Cli {
    fn into_config(self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(board_size) = self.board_size {
            config.board_size = board_size;
        }
        if let Some(tile_size) = self.tile_size {
            config.tile_size = tile_size;
        }
        if let Some(move_delay) = self.move_delay {
            config.move_delay = move_delay;
        }
        if let Some(placement) = self.food_placement {
            config.food_placement = placement.into();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.hide_distances {
            config.show_distances = false;
        }

        config
            .validate()
            .map_err(|e| anyhow!("Invalid configuration: {e}"))?;

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let config = Cli::parse().into_config()?;
    info!(
        "starting {0}x{0} board, tile size {1}, move delay {2}s",
        config.board_size, config.tile_size, config.move_delay
    );

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_from(args: &[&str]) -> Result<GameConfig> {
        let argv = std::iter::once("snake_field").chain(args.iter().copied());
        Cli::try_parse_from(argv)?.into_config()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config_from(&[]).unwrap(), GameConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "board_size": 12, "move_delay": 0.5 }}"#).unwrap();
        let path = file.path().to_str().unwrap();

        let config = config_from(&[
            "--config",
            path,
            "--move-delay",
            "0.2",
            "--food-placement",
            "avoid-snake",
            "--hide-distances",
        ])
        .unwrap();

        assert_eq!(config.board_size, 12);
        assert_eq!(config.move_delay, 0.2);
        assert_eq!(config.food_placement, FoodPlacement::AvoidSnake);
        assert!(!config.show_distances);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = config_from(&["--board-size", "3"]).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }
}
