use std::time::Duration;

use log::{debug, info, trace};
use rand::Rng;

use crate::config::{Difficulty, GameConfig};
use crate::food::place_food;
use crate::snake::{Direction, MoveResult, Snake};
use crate::Coords;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    GameOver,
}

/// Everything that changes while playing.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Coords,
    pub score: u32,
    pub game_over: bool,
}

impl GameState {
    pub fn initial<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        GameState {
            snake: Snake::new(config.initial_head, config.initial_direction),
            food: place_food(rng, config),
            score: 0,
            game_over: false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing is running.
    Idle,
    /// The snake moved and the board should be redrawn.
    Advanced { ate: bool },
    /// The previous step ended the game; state is already back to its
    /// initial values.
    GameOver { score: u32 },
}

/// Owns the game state and decides what every timer tick and every
/// command does to it.
pub struct Controller<R: Rng> {
    config: GameConfig,
    difficulty: Difficulty,
    phase: Phase,
    state: GameState,
    rng: R,
}

impl<R: Rng> Controller<R> {
    pub fn new(config: GameConfig, difficulty: Difficulty, mut rng: R) -> Self {
        let state = GameState::initial(&config, &mut rng);
        Controller { config, difficulty, phase: Phase::NotStarted, state, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn tick_interval(&self) -> Duration {
        self.difficulty.tick_interval()
    }

    /// Whether the repeating tick should be active.
    pub fn is_running(&self) -> bool {
        self.phase != Phase::NotStarted
    }

    /// Returns false if a run is already in progress.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }

        info!("starting run at {} difficulty ({:?} per step)", self.difficulty.label(), self.tick_interval());
        self.phase = Phase::Running;
        true
    }

    pub fn steer(&mut self, direction: Direction) -> bool {
        let accepted = self.state.snake.set_direction(direction);
        if !accepted {
            trace!("ignored turn {:?} while heading {:?}", direction, self.state.snake.heading());
        }
        accepted
    }

    /// Takes effect on the next run; the current one is abandoned.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        info!("difficulty set to {}", difficulty.label());
        self.difficulty = difficulty;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.state = GameState::initial(&self.config, &mut self.rng);
        self.phase = Phase::NotStarted;
        info!("state reset, food at {:?}", self.state.food);
    }

    pub fn tick(&mut self) -> TickOutcome {
        match self.phase {
            Phase::NotStarted => TickOutcome::Idle,
            Phase::GameOver => {
                let score = self.state.score;
                info!("game over with score {} and length {}", score, self.state.snake.len());
                self.reset();
                TickOutcome::GameOver { score }
            }
            Phase::Running => {
                let ate = self.advance();

                if self.state.snake.collides_with_self() {
                    self.state.game_over = true;
                    self.phase = Phase::GameOver;
                }

                TickOutcome::Advanced { ate }
            }
        }
    }

    fn advance(&mut self) -> bool {
        let GameConfig { grid_size, canvas_size, score_increment, .. } = self.config;

        match self.state.snake.move_step(grid_size, canvas_size, self.state.food) {
            MoveResult::Ate { new_head } => {
                self.state.score += score_increment;
                self.state.food = place_food(&mut self.rng, &self.config);
                debug!("ate food at {:?}, score {}, next food at {:?}", new_head, self.state.score, self.state.food);
                true
            }
            MoveResult::Moved { new_head, old_tail } => {
                trace!("moved to {:?}, freed {:?}", new_head, old_tail);
                false
            }
        }
    }
}

#[cfg(test)]
impl<R: Rng> Controller<R> {
    pub fn phase(&self) -> Phase {
        self.phase
    }
}
