use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::{GameConfig, GameState};
use grid_snake::logger;
use grid_snake::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a fixed grid, played in the terminal")]
struct Cli {
    /// TOML file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Width of the playing field in units
    #[arg(long)]
    width: Option<u32>,

    /// Height of the playing field in units
    #[arg(long)]
    height: Option<u32>,

    /// Distance between adjacent cells in units
    #[arg(long)]
    step: Option<u32>,

    /// Milliseconds between game ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Merge the config file (if any) with command-line overrides
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.window_width = width;
        }
        if let Some(height) = self.height {
            config.window_height = height;
        }
        if let Some(step) = self.step {
            config.step_size = step;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(logger::default_log_path);
    logger::init(&log_path)?;

    let config = cli.game_config().context("Invalid game configuration")?;
    log::info!("Starting with {:?}", config);

    let mut human_mode = match cli.seed {
        Some(seed) => HumanMode::new(GameState::seeded(config, seed)?),
        None => HumanMode::with_config(config)?,
    };
    human_mode.run().await?;

    log::info!("Shutting down");
    Ok(())
}
