use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use torus_snake::game::GameConfig;
use torus_snake::modes::HumanMode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// Grid width
    #[arg(long, default_value = "50")]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "50")]
    height: usize,

    /// Seed for food placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Frames per second of the render/input loop
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = GameConfig {
        frames_per_second: cli.fps,
        ..GameConfig::new(cli.width, cli.height)
    };

    let mut human_mode = HumanMode::new(config, cli.seed).context("Invalid game configuration")?;
    human_mode.run().await?;

    Ok(())
}
