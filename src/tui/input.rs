use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

use super::mode::TuiState;
use crate::shared::{InputEvent, Key};

// poll for input from the terminal, waiting at most `timeout` for the first
// event and then draining whatever else is already queued. Held keys are
// tracked in tuistate for the on-screen keyboard.
pub fn poll_input(timeout: Duration, ts: &mut TuiState) -> anyhow::Result<Vec<InputEvent>> {
    let mut events = Vec::new();
    let mut wait = timeout;
    while event::poll(wait)? {
        if let Some(ev) = translate(event::read()?, ts, Instant::now()) {
            events.push(ev);
        }
        wait = Duration::ZERO;
    }
    Ok(events)
}

fn translate(event: Event, ts: &mut TuiState, now: Instant) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key, ts, now),
        Event::Resize(_, _) => Some(InputEvent::Resize),
        _ => None,
    }
}

fn translate_key(key: KeyEvent, ts: &mut TuiState, now: Instant) -> Option<InputEvent> {
    let is_ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c' | 'C'));
    if key.code == KeyCode::Esc || is_ctrl_c {
        return (key.kind == KeyEventKind::Press).then_some(InputEvent::Quit);
    }

    let physical = code_to_key(key.code)?;
    match key.kind {
        KeyEventKind::Press => {
            if ts.absorb_repeat(physical, now) {
                return None;
            }
            ts.press(physical, now);
            Some(InputEvent::KeyDown(physical))
        }
        KeyEventKind::Release => {
            ts.release(physical);
            Some(InputEvent::KeyUp(physical))
        }
        // one event per physical press, holding a key down doesn't retrigger
        KeyEventKind::Repeat => None,
    }
}

// resolve what the terminal reports back to the key that was pressed, so
// holding shift (itself a note) doesn't change which note a key plays
fn code_to_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Modifier(ModifierKeyCode::LeftShift) => Key::LShift,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(c) => char_to_key(c)?,
        _ => return None,
    };
    Some(key)
}

fn char_to_key(c: char) -> Option<Key> {
    let key = match c {
        '`' | '~' => Key::Grave,
        '1' | '!' => Key::Num1,
        '3' | '#' => Key::Num3,
        '4' | '$' => Key::Num4,
        '5' | '%' => Key::Num5,
        '7' | '&' => Key::Num7,
        '8' | '*' => Key::Num8,
        '0' | ')' => Key::Num0,
        '-' | '_' => Key::Hyphen,
        '=' | '+' => Key::Equal,
        '[' | '{' => Key::LBracket,
        ']' | '}' => Key::RBracket,
        '\\' | '|' => Key::Backslash,
        'q' | 'Q' => Key::Q,
        'w' | 'W' => Key::W,
        'e' | 'E' => Key::E,
        'r' | 'R' => Key::R,
        't' | 'T' => Key::T,
        'y' | 'Y' => Key::Y,
        'u' | 'U' => Key::U,
        'i' | 'I' => Key::I,
        'o' | 'O' => Key::O,
        'p' | 'P' => Key::P,
        _ => return None,
    };
    Some(key)
}
