use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use snake_duel::game::SnakeGame;
use snake_duel::{GameConfig, Mode};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file overriding the default settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the menu and start straight away
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here; the terminal itself is taken by the game
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    info!(width = config.width, height = config.height, tick_ms = config.tick_ms, "starting snake-duel");

    let mut game = SnakeGame::new(config)?;
    game.run(args.mode)?;

    Ok(())
}
