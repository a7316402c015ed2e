//! Key event decoding for the frame loop.
//!
//! Turns raw crossterm key events into loop commands: either a gameplay input
//! for the state machine or a request to quit.

use crate::game::GameInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the frame loop should do with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Game(GameInput),
    Quit,
}

/// Decode one key event. Releases and repeats are ignored.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Quit),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char(' ')
        | KeyCode::Up
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('k')
        | KeyCode::Char('K') => Command::Game(GameInput::Flap),
        KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => {
            Command::Game(GameInput::NewGame)
        }
        KeyCode::Char('c') | KeyCode::Char('C') => Command::Game(GameInput::Continue),
        _ => Command::Game(GameInput::Other),
    };
    Some(command)
}
