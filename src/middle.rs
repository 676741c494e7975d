// The middle layer between the tui and the audio engine: it owns the piano and
// the shooter, turns input events into note plays, shots and setting changes,
// and hands back whatever the audio engine needs to hear about.

use crate::audio_api::AudioCommand;
use crate::loader::SampleError;
use crate::piano::Piano;
use crate::shared::{DisplayState, InputEvent, ShotView};
use crate::shooter::Shooter;

pub struct Middle {
    pub piano: Piano,
    pub shooter: Shooter,
    range: f32,
}

impl Middle {
    pub fn new(piano: Piano, shooter: Shooter, range: f32) -> Self {
        Self { piano, shooter, range }
    }

    // commands queued while building the piano (first sample, first tuning)
    pub fn startup_commands(&mut self) -> Vec<AudioCommand> {
        self.piano.take_commands()
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Result<Vec<AudioCommand>, SampleError> {
        if let InputEvent::KeyDown(key) = event {
            // play sound & shoot
            if let Some(note) = self.piano.play_for_key(key) {
                self.shooter.shoot(note);
            }

            // change sound or transpose
            self.piano.handle_control_key(key)?;
        }
        Ok(self.piano.take_commands())
    }

    pub fn tick(&mut self, dt: f32) {
        self.shooter.update(dt, self.range);
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState {
            sample_name: self.piano.sample_name(),
            transpose: self.piano.transpose(),
            note_keys: std::array::from_fn(|note| self.piano.key(note)),
            shots: self
                .shooter
                .active_shots()
                .map(|s| ShotView {
                    distance: s.distance,
                    note: s.note,
                    row: self.shooter.row(s.note),
                })
                .collect(),
        }
    }
}
