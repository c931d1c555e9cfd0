use std::time::{Duration, Instant};

use crate::config::{Difficulty, GameConfig};
use crate::controller::{Controller, TickOutcome};
use crate::input::{command_for_key, is_ctrl_c, Command};
use crate::render::Frame;
use crate::term::TermManager;

use anyhow::Result;
use log::{error, info};
use rand::Rng;

/// How long to wait for a key while no run is in progress.
const IDLE_POLL: Duration = Duration::from_millis(250);

pub struct SnakeGame<R: Rng> {
    term: TermManager,
    controller: Controller<R>,
}

impl<R: Rng> SnakeGame<R> {
    pub fn new(config: GameConfig, difficulty: Difficulty, rng: R) -> Result<Self> {
        let term = TermManager::new(config.cells() as usize)?;
        let controller = Controller::new(config, difficulty, rng);
        Ok(SnakeGame { term, controller })
    }

    /// Plays until the player quits. The terminal is restored on every
    /// exit path.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let result = self.play();

        let restored = self.term.restore();
        if let Err(e) = &restored {
            error!("failed to restore terminal: {:#}", e);
        }

        result.and(restored)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn play(&mut self) -> Result<()> {
        self.term.clear()?;
        self.term.draw_borders()?;
        self.draw()?;
        self.show_intro()?;

        // Deadline of the next tick; None while the timer is stopped.
        let mut next_tick: Option<Instant> = None;

        loop {
            let timeout = match next_tick {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => IDLE_POLL,
            };

            if let Some(key) = self.term.poll_key(timeout)? {
                match command_for_key(&key) {
                    Command::Quit => {
                        info!("quit requested");
                        return Ok(());
                    }
                    Command::Start => {
                        if self.controller.start() {
                            self.term.hide_message()?;
                            next_tick = Some(Instant::now() + self.controller.tick_interval());
                        }
                    }
                    Command::Steer(dir) => {
                        self.controller.steer(dir);
                    }
                    Command::SelectDifficulty(difficulty) => {
                        self.controller.select_difficulty(difficulty);
                        next_tick = None;
                        self.draw()?;
                        self.show_intro()?;
                    }
                    Command::Ignore => {}
                }
                continue;
            }

            let deadline = match next_tick {
                Some(deadline) if Instant::now() >= deadline => deadline,
                _ => continue,
            };

            match self.controller.tick() {
                TickOutcome::Idle => next_tick = None,
                TickOutcome::Advanced { .. } => {
                    self.draw()?;
                    next_tick = Some(deadline + self.controller.tick_interval());
                }
                TickOutcome::GameOver { score } => {
                    next_tick = None;
                    if !self.notify_game_over(score)? {
                        info!("quit from game over screen");
                        return Ok(());
                    }
                    self.draw()?;
                    self.show_intro()?;
                }
            }
        }
    }

    fn draw(&mut self) -> Result<()> {
        let frame = Frame::capture(self.controller.state(), self.controller.config());
        self.term.draw_frame(&frame)
    }

    fn show_intro(&mut self) -> Result<()> {
        let difficulty = format!("Difficulty: {}", self.controller.difficulty().label());
        self.term.show_message(&[
            "Enter or Space to start",
            "Arrow keys or WASD to move",
            "E: easy   H: hard",
            "Q or Esc to quit",
            "",
            &difficulty,
        ])
    }

    /// Blocks until a key is pressed. Returns false if that key was CTRL+C.
    fn notify_game_over(&mut self, score: u32) -> Result<bool> {
        let text = format!("Game Over! Your score is {}", score);
        self.term.show_message(&[&text, "", "Press any key"])?;

        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;
        Ok(!is_ctrl_c(&key))
    }
}
