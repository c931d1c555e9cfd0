mod config;
mod controller;
mod food;
mod game;
mod input;
mod render;
mod snake;
mod term;

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{error, info, LevelFilter};
use simplelog::{Config, WriteLogger};

use config::{Difficulty, GameConfig};

pub type TermInt = u16;
/// Position on the canvas. Both values are multiples of the grid size.
pub type Coords = (i32, i32);

#[derive(Parser)]
#[command(name = "canvas-snake")]
#[command(version, about = "Snake on a wrap-around grid, in the terminal")]
struct Cli {
    /// Speed preset used until another one is picked in game
    #[arg(long, value_enum, default_value = "normal")]
    difficulty: Difficulty,

    /// Side length of the square canvas, in canvas units
    #[arg(long, default_value_t = 600)]
    canvas_size: i32,

    /// Side length of one cell, in canvas units
    #[arg(long, default_value_t = 20)]
    grid_size: i32,

    /// File that receives the log output; nothing is logged without it
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Copy, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the game, so logs only ever go to a file
    if let Some(path) = &cli.log_file {
        let log_file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        WriteLogger::init(cli.log_level.into(), Config::default(), log_file).context("Failed to initialize logger")?;
    }

    let config = GameConfig { canvas_size: cli.canvas_size, grid_size: cli.grid_size, ..Default::default() };
    config.validate().context("Invalid board configuration")?;
    info!("starting with {:?} at {} difficulty", config, cli.difficulty.label());

    let result = game::SnakeGame::new(config, cli.difficulty, rand::thread_rng()).and_then(|mut game| game.run());
    if let Err(e) = &result {
        error!("{:#}", e);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_log_file_by_default() {
        let cli = Cli::try_parse_from(["canvas-snake"]).unwrap();
        assert!(cli.log_file.is_none());
        assert_eq!(cli.difficulty, Difficulty::Normal);
    }

    #[test]
    fn test_log_file_flag() {
        let cli = Cli::try_parse_from(["canvas-snake", "--log-file", "run.log", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
        assert_eq!(LevelFilter::from(cli.log_level), LevelFilter::Debug);
    }
}
