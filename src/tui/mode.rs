use std::time::{Duration, Instant};

use crate::shared::Key;

// how long a press stays lit when the terminal never reports key releases
pub const HOLD_FALLBACK: Duration = Duration::from_millis(150);

// Without release reports autorepeat shows up as plain presses. A press this
// soon after the last one of the same key is taken as a repeat; it has to
// span the usual initial autorepeat delay.
pub const REPEAT_WINDOW: Duration = Duration::from_millis(600);

// state local to the tui: which physical keys are down right now, for
// highlighting the on-screen keyboard
#[derive(Clone, Debug)]
pub struct TuiState {
    pressed_at: [Option<Instant>; Key::COUNT],
    // set by the first release we see; until then presses fade after HOLD_FALLBACK
    saw_release: bool,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            pressed_at: [None; Key::COUNT],
            saw_release: false,
        }
    }

    pub fn press(&mut self, key: Key, now: Instant) {
        self.pressed_at[key.index()] = Some(now);
    }

    // true (and the key stays down) if this press is really an autorepeat
    pub fn absorb_repeat(&mut self, key: Key, now: Instant) -> bool {
        if self.saw_release {
            return false;
        }
        match self.pressed_at[key.index()] {
            Some(at) if now.saturating_duration_since(at) < REPEAT_WINDOW => {
                self.pressed_at[key.index()] = Some(now);
                true
            }
            _ => false,
        }
    }

    pub fn release(&mut self, key: Key) {
        self.saw_release = true;
        self.pressed_at[key.index()] = None;
    }

    pub fn is_held(&self, key: Key, now: Instant) -> bool {
        match self.pressed_at[key.index()] {
            None => false,
            Some(_) if self.saw_release => true,
            Some(at) => now.saturating_duration_since(at) < HOLD_FALLBACK,
        }
    }
}
