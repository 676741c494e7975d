use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer as DecodeBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::warn;

use super::frame::StereoFrame;
use crate::loader::SampleError;

#[derive(Clone, Debug)]
pub struct SampleBuffer {
    pub data: Vec<StereoFrame>, // the audio data array, already at the output rate
}

impl SampleBuffer {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Decode a sound file (mp3, wav, ...) from disk into a stereo buffer at `target_rate`
    pub fn load(path: &Path, target_rate: u32) -> Result<Self, SampleError> {
        let decode_err = |source: SymphoniaError| SampleError::Decode { path: path.to_path_buf(), source };

        let file = File::open(path).map_err(|source| SampleError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // the extension helps the probe pick a format reader
        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(decode_err)?;
        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| SampleError::NoAudioTrack { path: path.to_path_buf() })?;
        let track_id = track.id;
        let params = track.codec_params.clone();

        let mut decoder = symphonia::default::get_codecs()
            .make(&params, &DecoderOptions::default())
            .map_err(decode_err)?;

        let mut file_rate = params.sample_rate.unwrap_or(target_rate);
        let mut frames: Vec<StereoFrame> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
                Err(SymphoniaError::ResetRequired) => {
                    decoder.reset();
                    continue;
                }
                Err(e) => return Err(decode_err(e)),
            };
            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(msg)) => {
                    // mp3 streams often open with a junk frame, skip it and carry on
                    warn!(path = %path.display(), "skipping undecodable packet: {msg}");
                    continue;
                }
                Err(e) => return Err(decode_err(e)),
            };

            let spec = *decoded.spec();
            file_rate = spec.rate;
            let channels = spec.channels.count();
            if channels == 0 {
                continue;
            }

            let mut samples = DecodeBuffer::<f32>::new(decoded.capacity() as u64, spec);
            samples.copy_interleaved_ref(decoded);
            frames.extend(interleaved_to_stereo(samples.samples(), channels));
        }

        if frames.is_empty() {
            return Err(SampleError::NoFrames { path: path.to_path_buf() });
        }

        if file_rate != target_rate {
            frames = resample_linear(&frames, file_rate, target_rate);
        }

        Ok(Self { data: frames })
    }
}

// mono is duplicated to both sides, anything wider keeps its first two channels
fn interleaved_to_stereo(samples: &[f32], channels: usize) -> impl Iterator<Item = StereoFrame> + '_ {
    samples.chunks_exact(channels).map(move |c| {
        if channels == 1 {
            StereoFrame { left: c[0], right: c[0] }
        } else {
            StereoFrame { left: c[0], right: c[1] }
        }
    })
}

fn resample_linear(frames: &[StereoFrame], source_rate: u32, target_rate: u32) -> Vec<StereoFrame> {
    // This is a simple linear resampler, good enough for one-shot piano samples
    if source_rate == target_rate {
        return frames.to_vec();
    }
    let ratio = target_rate as f64 / source_rate as f64;
    let out_len = (frames.len() as f64 * ratio).ceil() as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        // fractional position in the source buffer
        let src_pos = i as f64 / ratio; // ex. 3.7
        let idx = src_pos.floor() as usize; // ex. 3
        let frac = (src_pos - idx as f64) as f32; // ex. 0.7
        if idx >= frames.len().saturating_sub(1) { // edge case
            out.push(*frames.last().unwrap_or(&StereoFrame::zero()));
        } else {
            out.push(frames[idx].lerp(frames[idx + 1], frac)); // blend via frac
        }
    }
    out
}
