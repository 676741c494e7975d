use std::sync::Arc;

use crate::shared::NUM_NOTES;

use crate::audio::SampleBuffer;

#[derive(Clone, Debug)]
pub enum AudioCommand {
    // The engine can't decode files (blocks the audio thread), so the piano
    // decodes on the ui thread and hands the finished buffer over. Every voice
    // plays from whatever buffer was sent last.
    SetBuffer(Arc<SampleBuffer>),

    // Playback rate of each note voice, 1.0 = the sample's native pitch.
    // Applies to voices that are already sounding too.
    Retune([f32; NUM_NOTES]),

    // Restart one note voice from the top; other voices keep going.
    Play(usize),
}
