use std::time::Duration;

use anyhow::{ensure, Result};
use clap::ValueEnum;

use crate::snake::Direction;
use crate::Coords;

/// Game speed presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    /// 100 ms per step, used until a preset is picked
    Normal,
    /// 150 ms per step
    Easy,
    /// 50 ms per step
    Hard,
}

impl Difficulty {
    pub fn tick_interval(self) -> Duration {
        match self {
            Difficulty::Normal => Duration::from_millis(100),
            Difficulty::Easy => Duration::from_millis(150),
            Difficulty::Hard => Duration::from_millis(50),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Normal => "normal",
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        }
    }
}

/// Largest board side, in cells, that fits a terminal's `u16` coordinates
/// with room to spare.
pub const MAX_CELLS: i32 = 500;

/// Board geometry and scoring. Coordinates are in canvas units, so every
/// cell position is a multiple of `grid_size`.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub canvas_size: i32,
    pub grid_size: i32,
    pub score_increment: u32,
    pub initial_head: Coords,
    pub initial_direction: Direction,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            canvas_size: 600,
            grid_size: 20,
            score_increment: 10,
            initial_head: (160, 160),
            initial_direction: Direction::Right,
        }
    }
}

impl GameConfig {
    /// Number of cells along each side of the canvas.
    pub fn cells(&self) -> i32 {
        self.canvas_size / self.grid_size
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.grid_size > 0, "grid size must be positive, got {}", self.grid_size);
        ensure!(self.canvas_size > 0, "canvas size must be positive, got {}", self.canvas_size);
        ensure!(
            self.canvas_size % self.grid_size == 0,
            "canvas size {} is not a multiple of grid size {}",
            self.canvas_size,
            self.grid_size
        );
        ensure!(
            self.cells() <= MAX_CELLS,
            "a {}-unit canvas with {}-unit cells is {} cells wide, more than the {} a terminal can show",
            self.canvas_size,
            self.grid_size,
            self.cells(),
            MAX_CELLS
        );

        let (x, y) = self.initial_head;
        ensure!(
            x % self.grid_size == 0 && y % self.grid_size == 0,
            "initial head {:?} is not aligned to the {}-unit grid",
            self.initial_head,
            self.grid_size
        );
        ensure!(
            (0..self.canvas_size).contains(&x) && (0..self.canvas_size).contains(&y),
            "initial head {:?} lies outside the {}x{} canvas",
            self.initial_head,
            self.canvas_size,
            self.canvas_size
        );

        Ok(())
    }
}
