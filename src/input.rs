//! Terminal events to game commands.

use crate::game::Command;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Resize(u16, u16),
    Quit,
}

pub fn map_event(event: &Event) -> Option<Input> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            ..
        }) => Some(Input::Command(Command::Flap)),
        Event::Resize(c, r) => Some(Input::Resize(*c, *r)),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<Input> {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let cmd = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Input::Quit);
        }
        KeyCode::Char('q') | KeyCode::Esc => return Some(Input::Quit),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') => Command::Flap,
        KeyCode::Enter | KeyCode::Char('r') => Command::StartOrRetry,
        KeyCode::Char('m') => Command::ReturnToMenu,
        _ => return None,
    };
    Some(Input::Command(cmd))
}
