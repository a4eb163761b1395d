use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::{Direction, PlayerSlot};
use crate::state::Mode;

/// Intents produced from raw keys and consumed by `Flow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start(Mode),
    Steer(PlayerSlot, Direction),
    TogglePause,
    Restart,
    ReturnToMenu,
    Quit,
}

/// Which screen a key arrived on; the same key means different things on each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Menu,
    InGame(Mode),
    GameOver,
}

/// Maps keys to commands. In multi mode WASD drives player one and the
/// arrows drive player two; in single mode both sets drive player one.
#[derive(Debug, Default)]
pub struct InputTranslator;

impl InputTranslator {
    pub fn new() -> Self {
        InputTranslator
    }

    pub fn translate(&self, key: KeyEvent, context: KeyContext) -> Option<Command> {
        if is_ctrl_c(&key) {
            return Some(Command::Quit);
        }

        match context {
            KeyContext::Menu => match key.code {
                KeyCode::Char('1') => Some(Command::Start(Mode::Single)),
                KeyCode::Char('2') => Some(Command::Start(Mode::Multi)),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
                _ => None,
            },
            KeyContext::InGame(mode) => match key.code {
                KeyCode::Char(' ') | KeyCode::Esc => Some(Command::TogglePause),
                KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
                KeyCode::Char('m') | KeyCode::Char('M') => Some(Command::ReturnToMenu),
                code => steer(code, mode),
            },
            KeyContext::GameOver => match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(Command::Restart),
                KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => Some(Command::ReturnToMenu),
                KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
                _ => None,
            },
        }
    }
}

fn steer(code: KeyCode, mode: Mode) -> Option<Command> {
    let arrows_slot = match mode {
        Mode::Single => PlayerSlot::One,
        Mode::Multi => PlayerSlot::Two,
    };

    let (slot, dir) = match code {
        KeyCode::Char('w') | KeyCode::Char('W') => (PlayerSlot::One, Direction::Up),
        KeyCode::Char('a') | KeyCode::Char('A') => (PlayerSlot::One, Direction::Left),
        KeyCode::Char('s') | KeyCode::Char('S') => (PlayerSlot::One, Direction::Down),
        KeyCode::Char('d') | KeyCode::Char('D') => (PlayerSlot::One, Direction::Right),
        KeyCode::Up => (arrows_slot, Direction::Up),
        KeyCode::Left => (arrows_slot, Direction::Left),
        KeyCode::Down => (arrows_slot, Direction::Down),
        KeyCode::Right => (arrows_slot, Direction::Right),
        _ => return None,
    };

    Some(Command::Steer(slot, dir))
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.modifiers.contains(KeyModifiers::CONTROL) && matches!(ev.code, KeyCode::Char('c') | KeyCode::Char('C'))
}
