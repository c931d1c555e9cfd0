use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Difficulty;
use crate::snake::Direction::{self, *};

/// What a key press asks the game to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Start,
    SelectDifficulty(Difficulty),
    Quit,
    Ignore,
}

pub fn command_for_key(key: &KeyEvent) -> Command {
    if is_ctrl_c(key) {
        return Command::Quit;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Steer(Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::Steer(Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::Steer(Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Command::Steer(Right),
        KeyCode::Enter | KeyCode::Char(' ') => Command::Start,
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Char('1') => Command::SelectDifficulty(Difficulty::Easy),
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('2') => Command::SelectDifficulty(Difficulty::Hard),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
        _ => Command::Ignore,
    }
}

pub fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(command_for_key(&key(KeyCode::Up)), Command::Steer(Up));
        assert_eq!(command_for_key(&key(KeyCode::Down)), Command::Steer(Down));
        assert_eq!(command_for_key(&key(KeyCode::Left)), Command::Steer(Left));
        assert_eq!(command_for_key(&key(KeyCode::Right)), Command::Steer(Right));
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(command_for_key(&key(KeyCode::Char('w'))), Command::Steer(Up));
        assert_eq!(command_for_key(&key(KeyCode::Char('a'))), Command::Steer(Left));
        assert_eq!(command_for_key(&key(KeyCode::Char('S'))), Command::Steer(Down));
        assert_eq!(command_for_key(&key(KeyCode::Char('D'))), Command::Steer(Right));
    }

    #[test]
    fn test_buttons() {
        assert_eq!(command_for_key(&key(KeyCode::Enter)), Command::Start);
        assert_eq!(command_for_key(&key(KeyCode::Char(' '))), Command::Start);
        assert_eq!(command_for_key(&key(KeyCode::Char('e'))), Command::SelectDifficulty(Difficulty::Easy));
        assert_eq!(command_for_key(&key(KeyCode::Char('2'))), Command::SelectDifficulty(Difficulty::Hard));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(command_for_key(&key(KeyCode::Char('q'))), Command::Quit);
        assert_eq!(command_for_key(&key(KeyCode::Esc)), Command::Quit);
        assert_eq!(command_for_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)), Command::Quit);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        assert_eq!(command_for_key(&key(KeyCode::Char('x'))), Command::Ignore);
        assert_eq!(command_for_key(&key(KeyCode::Char('c'))), Command::Ignore);
        assert_eq!(command_for_key(&key(KeyCode::Tab)), Command::Ignore);
    }
}
