use crossterm::style::Color;

use crate::config::GameConfig;
use crate::controller::GameState;
use crate::Coords;

const SNAKE_COLOR: Color = Color::Green;
const FOOD_COLOR: Color = Color::Red;
const GRID_COLOR: Color = Color::DarkGreen;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tile {
    Grid,
    Snake,
    Food,
}

impl Tile {
    /// Each cell is two columns wide so it looks square in a terminal.
    pub fn glyph(self) -> ([char; 2], Color) {
        match self {
            Tile::Grid => (['·', ' '], GRID_COLOR),
            Tile::Snake => (['█', '█'], SNAKE_COLOR),
            Tile::Food => (['█', '█'], FOOD_COLOR),
        }
    }
}

/// A snapshot of what the board should look like, one tile per cell.
#[derive(Debug, PartialEq)]
pub struct Frame {
    cells: usize,
    tiles: Vec<Tile>,
    score_text: String,
}

impl Frame {
    pub fn capture(state: &GameState, config: &GameConfig) -> Self {
        let cells = config.cells() as usize;
        let mut tiles = vec![Tile::Grid; cells * cells];

        let mut paint = |pos: Coords, tile: Tile| {
            if let Some(i) = tile_index(pos, config) {
                tiles[i] = tile;
            }
        };

        for segment in state.snake.body() {
            paint(*segment, Tile::Snake);
        }
        paint(state.food, Tile::Food);

        Frame { cells, tiles, score_text: format!("Score: {}", state.score) }
    }

    pub fn cells(&self) -> usize {
        self.cells
    }

    pub fn tile(&self, col: usize, row: usize) -> Tile {
        self.tiles[row * self.cells + col]
    }

    pub fn score_text(&self) -> &str {
        &self.score_text
    }
}

fn tile_index(pos: Coords, config: &GameConfig) -> Option<usize> {
    let cells = config.cells();
    let (col, row) = (pos.0 / config.grid_size, pos.1 / config.grid_size);

    if pos.0 < 0 || pos.1 < 0 || col >= cells || row >= cells {
        return None;
    }

    Some(row as usize * cells as usize + col as usize)
}
