use std::sync::Arc;

use tracing::{debug, info};

use crate::audio::SampleBuffer;
use crate::audio_api::AudioCommand;
use crate::config::Config;
use crate::loader::{SampleError, SampleSet};
use crate::shared::{Key, NUM_NOTES};

// index = semitones above the lowest C
pub const NOTE_KEYS: [Key; NUM_NOTES] = [
    Key::LShift,    // C
    Key::Grave,     // C#
    Key::Tab,       // D
    Key::Num1,      // D#
    Key::Q,         // E
    Key::W,         // F
    Key::Num3,      // F#
    Key::E,         // G
    Key::Num4,      // G#
    Key::R,         // A
    Key::Num5,      // A#
    Key::T,         // B
    Key::Y,         // C
    Key::Num7,      // C#
    Key::U,         // D
    Key::Num8,      // D#
    Key::I,         // E
    Key::O,         // F
    Key::Num0,      // F#
    Key::P,         // G
    Key::Hyphen,    // G#
    Key::LBracket,  // A
    Key::Equal,     // A#
    Key::RBracket,  // B
    Key::Backslash, // C
];

// equal temperament, note 12 untransposed plays the sample as recorded
pub fn pitch_ratio(note: usize, transpose: i32) -> f32 {
    2.0_f32.powf((transpose + note as i32 - 12) as f32 / 12.0)
}

// Owns the 25 note slots, the sample set and the decoded sample. Nothing here
// talks to the audio device directly: every change is queued as an
// `AudioCommand` and the main loop forwards them with `take_commands`.
pub struct Piano {
    keys: [Key; NUM_NOTES],
    pitches: [f32; NUM_NOTES],
    transpose: i32,
    samples: SampleSet,
    buffer: Arc<SampleBuffer>,
    sample_rate: u32,
    outbox: Vec<AudioCommand>,
}

impl Piano {
    pub fn new(config: &Config, sample_rate: u32) -> Result<Self, SampleError> {
        let samples = SampleSet::from_dir(&config.sounds_dir, &config.extension, config.start_sample)?;
        info!(
            dir = %config.sounds_dir.display(),
            count = samples.len(),
            "indexed sound files"
        );
        let buffer = Arc::new(SampleBuffer::load(samples.current_path(), sample_rate)?);

        let mut piano = Self {
            keys: NOTE_KEYS,
            pitches: [1.0; NUM_NOTES],
            transpose: 0,
            samples,
            buffer,
            sample_rate,
            outbox: Vec::new(),
        };
        piano.outbox.push(AudioCommand::SetBuffer(piano.buffer.clone()));
        piano.recompute_pitches();
        info!(sample = %piano.sample_name(), "piano ready");
        Ok(piano)
    }

    // Decode whatever the sample set points at and hand it to every voice.
    // The set keeps its index in range on every step, so there is nothing to
    // wrap here.
    pub fn load_current_sample(&mut self) -> Result<(), SampleError> {
        let buffer = SampleBuffer::load(self.samples.current_path(), self.sample_rate)?;
        self.buffer = Arc::new(buffer);
        self.outbox.push(AudioCommand::SetBuffer(self.buffer.clone()));
        info!(
            index = self.samples.index(),
            sample = %self.sample_name(),
            frames = self.buffer.len(),
            "switched sample"
        );
        Ok(())
    }

    pub fn recompute_pitches(&mut self) {
        for (note, pitch) in self.pitches.iter_mut().enumerate() {
            *pitch = pitch_ratio(note, self.transpose);
        }
        self.outbox.push(AudioCommand::Retune(self.pitches));
    }

    // the note bound to `key`, if any, after queueing it to play
    pub fn play_for_key(&mut self, key: Key) -> Option<usize> {
        let note = self.keys.iter().position(|&k| k == key)?;
        debug!(note, ?key, pitch = self.pitches[note], "note on");
        self.outbox.push(AudioCommand::Play(note));
        Some(note)
    }

    pub fn handle_control_key(&mut self, key: Key) -> Result<(), SampleError> {
        match key {
            // sound file
            Key::Up => {
                self.samples.step(-1);
                self.load_current_sample()?;
            }
            Key::Down => {
                self.samples.step(1);
                self.load_current_sample()?;
            }

            // transpose
            Key::Left => {
                self.transpose -= 1;
                self.recompute_pitches();
            }
            Key::Right => {
                self.transpose += 1;
                self.recompute_pitches();
            }
            _ => {}
        }
        Ok(())
    }

    pub fn take_commands(&mut self) -> Vec<AudioCommand> {
        std::mem::take(&mut self.outbox)
    }

    pub fn key(&self, note: usize) -> Key {
        self.keys[note]
    }

    pub fn transpose(&self) -> i32 {
        self.transpose
    }

    pub fn sample_name(&self) -> String {
        self.samples.current_name()
    }

    #[cfg(test)]
    pub fn sample_index(&self) -> usize {
        self.samples.index()
    }

    #[cfg(test)]
    pub fn pitch(&self, note: usize) -> f32 {
        self.pitches[note]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::test_fixture;
    use clap::Parser;

    const RATE: u32 = 44100;

    fn piano_in(dir: &tempfile::TempDir, start: usize) -> Piano {
        let start = start.to_string();
        let config = Config::parse_from([
            "pianotty",
            dir.path().to_str().unwrap(),
            "--extension",
            "wav",
            "--start-sample",
            start.as_str(),
        ]);
        Piano::new(&config, RATE).unwrap()
    }

    // the fixture makes file i exactly 100 * (i + 1) frames long
    fn loaded_len(cmds: &[AudioCommand]) -> Option<usize> {
        cmds.iter().find_map(|c| match c {
            AudioCommand::SetBuffer(b) => Some(b.len()),
            _ => None,
        })
    }

    #[test]
    fn pitch_ratio_matches_equal_temperament() {
        for transpose in [-13, -1, 0, 5] {
            for note in 0..NUM_NOTES {
                let expected = 2.0_f32.powf((transpose + note as i32 - 12) as f32 / 12.0);
                assert_eq!(pitch_ratio(note, transpose), expected);
            }
        }
        assert_eq!(pitch_ratio(12, 0), 1.0);
        assert!((pitch_ratio(0, 0) - 0.5).abs() < 1e-6);
        assert!((pitch_ratio(24, 0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn pitch_ratio_rises_with_note() {
        for transpose in [-3, 0, 7] {
            for note in 1..NUM_NOTES {
                assert!(pitch_ratio(note, transpose) > pitch_ratio(note - 1, transpose));
            }
        }
    }

    #[test]
    fn construction_loads_start_sample_and_pitches() {
        let dir = test_fixture::sounds_dir(&["a.wav", "b.wav", "c.wav"], RATE);
        let mut piano = piano_in(&dir, 1);
        assert_eq!(piano.sample_index(), 1);
        assert_eq!(piano.sample_name(), "b");
        assert_eq!(piano.transpose(), 0);
        assert_eq!(piano.pitch(12), 1.0);

        let cmds = piano.take_commands();
        assert_eq!(loaded_len(&cmds), Some(200));
        assert!(matches!(cmds.last(), Some(AudioCommand::Retune(p)) if p[12] == 1.0));
    }

    #[test]
    fn default_start_past_the_end_uses_first_sample() {
        let dir = test_fixture::sounds_dir(&["a.wav", "b.wav"], RATE);
        let piano = piano_in(&dir, 4);
        assert_eq!(piano.sample_index(), 0);
    }

    #[test]
    fn empty_sounds_dir_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::parse_from(["pianotty", dir.path().to_str().unwrap()]);
        let err = Piano::new(&config, RATE).err().unwrap();
        assert!(matches!(err, SampleError::EmptyDirectory { .. }));
    }

    #[test]
    fn undecodable_start_sample_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.wav"), b"nope").unwrap();
        let config = Config::parse_from(["pianotty", dir.path().to_str().unwrap(), "--extension", "wav"]);
        assert!(Piano::new(&config, RATE).is_err());
    }

    #[test]
    fn play_for_key_finds_the_bound_note() {
        let dir = test_fixture::sounds_dir(&["a.wav"], RATE);
        let mut piano = piano_in(&dir, 0);
        piano.take_commands();

        assert_eq!(piano.play_for_key(Key::LShift), Some(0));
        assert_eq!(piano.play_for_key(Key::Y), Some(12));
        assert_eq!(piano.play_for_key(Key::Backslash), Some(24));
        assert_eq!(piano.play_for_key(Key::Up), None);

        let notes: Vec<usize> = piano
            .take_commands()
            .into_iter()
            .filter_map(|c| match c {
                AudioCommand::Play(n) => Some(n),
                _ => None,
            })
            .collect();
        assert_eq!(notes, vec![0, 12, 24]);
    }

    #[test]
    fn every_note_has_its_own_key() {
        for (note, key) in NOTE_KEYS.iter().enumerate() {
            assert_eq!(NOTE_KEYS.iter().position(|k| k == key), Some(note));
            assert!(![Key::Up, Key::Down, Key::Left, Key::Right].contains(key));
        }
    }

    #[test]
    fn transpose_keys_retune_every_note() {
        let dir = test_fixture::sounds_dir(&["a.wav"], RATE);
        let mut piano = piano_in(&dir, 0);
        piano.take_commands();

        piano.handle_control_key(Key::Right).unwrap();
        piano.handle_control_key(Key::Right).unwrap();
        assert_eq!(piano.transpose(), 2);
        assert_eq!(piano.pitch(10), 1.0);

        piano.handle_control_key(Key::Left).unwrap();
        assert_eq!(piano.transpose(), 1);
        assert_eq!(piano.pitch(11), 1.0);

        let cmds = piano.take_commands();
        assert_eq!(cmds.len(), 3);
        assert!(cmds.iter().all(|c| matches!(c, AudioCommand::Retune(_))));
    }

    #[test]
    fn transpose_is_not_clamped() {
        let dir = test_fixture::sounds_dir(&["a.wav"], RATE);
        let mut piano = piano_in(&dir, 0);
        for _ in 0..40 {
            piano.handle_control_key(Key::Left).unwrap();
        }
        assert_eq!(piano.transpose(), -40);
        assert_eq!(piano.pitch(0), pitch_ratio(0, -40));
    }

    #[test]
    fn next_sample_at_last_wraps_and_reloads_first() {
        let dir = test_fixture::sounds_dir(&["a.wav", "b.wav", "c.wav"], RATE);
        let mut piano = piano_in(&dir, 2);
        piano.take_commands();

        piano.handle_control_key(Key::Down).unwrap();
        assert_eq!(piano.sample_index(), 0);
        assert_eq!(piano.sample_name(), "a");
        assert_eq!(loaded_len(&piano.take_commands()), Some(100));
    }

    #[test]
    fn previous_sample_at_first_wraps_to_last() {
        let dir = test_fixture::sounds_dir(&["a.wav", "b.wav", "c.wav"], RATE);
        let mut piano = piano_in(&dir, 0);
        piano.take_commands();

        piano.handle_control_key(Key::Up).unwrap();
        assert_eq!(piano.sample_index(), 2);
        assert_eq!(loaded_len(&piano.take_commands()), Some(300));
    }

    #[test]
    fn other_keys_are_not_controls() {
        let dir = test_fixture::sounds_dir(&["a.wav", "b.wav"], RATE);
        let mut piano = piano_in(&dir, 0);
        piano.take_commands();

        piano.handle_control_key(Key::Q).unwrap();
        assert_eq!(piano.sample_index(), 0);
        assert_eq!(piano.transpose(), 0);
        assert!(piano.take_commands().is_empty());
    }

    #[test]
    fn failed_reload_is_an_error() {
        let dir = test_fixture::sounds_dir(&["a.wav"], RATE);
        std::fs::write(dir.path().join("b.wav"), b"nope").unwrap();
        let mut piano = piano_in(&dir, 0);

        let err = piano.handle_control_key(Key::Down).unwrap_err();
        assert!(matches!(err, SampleError::Decode { .. }));
    }
}
