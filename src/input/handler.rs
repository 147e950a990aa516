use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Restart,
    Quit,
    None,
}

/// Maps key presses to actions for the current phase of the game
///
/// While playing only movement keys count; after a game over only restart
/// does. Quit works in both.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent, phase: Phase) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if matches!(
            key.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) {
            return KeyAction::Quit;
        }

        match phase {
            Phase::Playing => Self::movement(key.code)
                .map(KeyAction::Turn)
                .unwrap_or(KeyAction::None),
            Phase::GameOver => match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
                _ => KeyAction::None,
            },
        }
    }

    fn movement(code: KeyCode) -> Option<Direction> {
        let direction = match code {
            // Arrow keys
            KeyCode::Up => Direction::Up,
            KeyCode::Down => Direction::Down,
            KeyCode::Left => Direction::Left,
            KeyCode::Right => Direction::Right,

            // WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Direction::Up,
            KeyCode::Char('s') | KeyCode::Char('S') => Direction::Down,
            KeyCode::Char('a') | KeyCode::Char('A') => Direction::Left,
            KeyCode::Char('d') | KeyCode::Char('D') => Direction::Right,

            _ => return None,
        };
        Some(direction)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
