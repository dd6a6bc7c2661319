use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Command(Command),
    Quit,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        let command = match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Command::Turn(Direction::Up),
            KeyCode::Down => Command::Turn(Direction::Down),
            KeyCode::Left => Command::Turn(Direction::Left),
            KeyCode::Right => Command::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Command::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => Command::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => Command::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => Command::Turn(Direction::Right),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') => return KeyAction::Quit,
            KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => Command::TogglePause,
            KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,

            // Anything else still wakes a paused game
            _ => Command::Resume,
        };

        KeyAction::Command(command)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
