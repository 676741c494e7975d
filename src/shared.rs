// The keyboard layout, up to two octaves plus one note:
//
//   `  1     3  4  5     7  8     0  -  =          <- sharps
//   LShift Tab Q  W  E  R  T  Y  U  I  O  P  [  ]  \   <- naturals
//
// Control keys:
//   Up / Down     //  previous / next sample in the sounds dir
//   Left / Right  //  transpose down / up one semitone
//
// Quit:
//   Esc, Ctrl-C
//
// Keys are physical keys, not characters: the tui resolves whatever the terminal
// reports (shifted symbols, enhanced modifier codes) into a `Key` before anything
// else sees it. Left shift on its own only arrives from terminals that report
// every key as an escape code (the kitty keyboard protocol); elsewhere the
// lowest C can't be played.

pub const NUM_NOTES: usize = 25;
pub const NUM_NATURALS: usize = 15;

// semitone positions (mod 12) of the black keys
const SHARPS: [usize; 5] = [1, 3, 6, 8, 10];

pub fn is_sharp(note: usize) -> bool {
    SHARPS.contains(&(note % 12))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    LShift,
    Grave,
    Tab,
    Num0,
    Num1,
    Num3,
    Num4,
    Num5,
    Num7,
    Num8,
    Q,
    W,
    E,
    R,
    T,
    Y,
    U,
    I,
    O,
    P,
    Hyphen,
    Equal,
    LBracket,
    RBracket,
    Backslash,

    // control
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    pub const COUNT: usize = 29;

    pub fn index(self) -> usize {
        self as usize
    }

    // label printed on the on-screen key
    pub fn label(self) -> &'static str {
        match self {
            Key::LShift => "⇧",
            Key::Grave => "`",
            Key::Tab => "⇥",
            Key::Num0 => "0",
            Key::Num1 => "1",
            Key::Num3 => "3",
            Key::Num4 => "4",
            Key::Num5 => "5",
            Key::Num7 => "7",
            Key::Num8 => "8",
            Key::Q => "Q",
            Key::W => "W",
            Key::E => "E",
            Key::R => "R",
            Key::T => "T",
            Key::Y => "Y",
            Key::U => "U",
            Key::I => "I",
            Key::O => "O",
            Key::P => "P",
            Key::Hyphen => "-",
            Key::Equal => "=",
            Key::LBracket => "[",
            Key::RBracket => "]",
            Key::Backslash => "\\",
            Key::Up => "↑",
            Key::Down => "↓",
            Key::Left => "←",
            Key::Right => "→",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    Resize,
    Quit,
}

// Everything the tui needs to draw one frame, snapshotted from the middle layer
#[derive(Clone, Debug)]
pub struct DisplayState {
    pub sample_name: String, // file stem of the current sample
    pub transpose: i32,
    pub note_keys: [Key; NUM_NOTES],
    pub shots: Vec<ShotView>, // active shots only
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotView {
    pub distance: f32,
    pub note: usize,
    pub row: usize, // natural-note row, 0 = lowest C
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sharps_repeat_every_octave() {
        let sharps: Vec<usize> = (0..NUM_NOTES).filter(|&n| is_sharp(n)).collect();
        assert_eq!(sharps, vec![1, 3, 6, 8, 10, 13, 15, 18, 20, 22]);
        assert_eq!(NUM_NOTES - sharps.len(), NUM_NATURALS);
    }

    #[test]
    fn key_indices_are_dense() {
        assert_eq!(Key::LShift.index(), 0);
        assert_eq!(Key::Right.index(), Key::COUNT - 1);
    }
}
