use std::sync::Arc;

use crossbeam_channel::Sender;

use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;
use super::voice::Voice;
use crate::audio_api::AudioCommand;
use crate::shared::NUM_NOTES;

const VOICE_GAIN: f32 = 0.8;
pub const BLOCK_FRAMES: usize = 512; // scratch size so we wont malloc in audio callback

pub struct Engine {
    buffer: Option<Arc<SampleBuffer>>, // the one sample every voice reads
    voices: [Voice; NUM_NOTES],        // one per note, index = note
    scratch: [StereoFrame; BLOCK_FRAMES],
    retired: Sender<Arc<SampleBuffer>>, // swapped-out buffers go back to be freed off this thread
}

impl Engine {
    pub fn new(retired: Sender<Arc<SampleBuffer>>) -> Self {
        Self {
            buffer: None,
            voices: [Voice::new(VOICE_GAIN); NUM_NOTES],
            scratch: [StereoFrame::zero(); BLOCK_FRAMES],
            retired,
        }
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            // voices keep their positions; any past the new end go quiet on the next block
            AudioCommand::SetBuffer(buffer) => {
                if let Some(old) = self.buffer.replace(buffer) {
                    // on a full queue the buffer is freed here
                    let _ = self.retired.try_send(old);
                }
            }
            AudioCommand::Retune(pitches) => {
                for (voice, pitch) in self.voices.iter_mut().zip(pitches) {
                    voice.pitch = pitch;
                }
            }
            AudioCommand::Play(note) => {
                if let Some(voice) = self.voices.get_mut(note) {
                    voice.restart();
                }
            }
        }
    }

    #[cfg(test)]
    fn render_block(&mut self, out: &mut [StereoFrame]) {
        mix_voices(self.buffer.as_deref(), &mut self.voices, out);
    }

    // fill an interleaved device buffer of any channel count
    pub fn render_interleaved(&mut self, data: &mut [f32], channels: usize) {
        if channels == 0 {
            return;
        }
        let buffer = self.buffer.as_deref();
        for chunk in data.chunks_mut(BLOCK_FRAMES * channels) {
            let frames = &mut self.scratch[..chunk.len() / channels];
            mix_voices(buffer, &mut self.voices, frames);
            for (out, frame) in chunk.chunks_exact_mut(channels).zip(frames.iter()) {
                write_frame(out, *frame);
            }
        }
    }

    #[cfg(test)]
    fn voice(&self, note: usize) -> &Voice {
        &self.voices[note]
    }
}

fn mix_voices(buffer: Option<&SampleBuffer>, voices: &mut [Voice], out: &mut [StereoFrame]) {
    out.fill(StereoFrame::zero());
    let Some(buffer) = buffer else {
        return;
    };
    if buffer.is_empty() {
        return;
    }
    for voice in voices.iter_mut() {
        voice.render_into(buffer, out);
    }
}

fn write_frame(out: &mut [f32], frame: StereoFrame) {
    match out {
        [mono] => *mono = frame.mono(),
        [left, right, rest @ ..] => {
            *left = frame.left;
            *right = frame.right;
            rest.fill(0.0);
        }
        [] => {}
    }
}
