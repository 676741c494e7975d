use anyhow::Context;
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{info, warn};

use crate::audio_api::AudioCommand;

mod engine;
mod frame;
mod sample_buffer;
mod voice;

pub use sample_buffer::SampleBuffer;

use engine::Engine;

const COMMAND_QUEUE: usize = 1024;
const RETIRED_QUEUE: usize = 16;

pub struct AudioHandle {
    tx: Sender<AudioCommand>,
    retired_rx: Receiver<Arc<SampleBuffer>>,
    sample_rate: u32,
    _output_stream: cpal::Stream,
}

impl AudioHandle {
    // a full queue drops the command rather than stalling the ui
    pub fn send(&self, cmd: AudioCommand) {
        let _ = self.tx.try_send(cmd);
    }

    // drop buffers the engine swapped out, here instead of on the audio thread
    pub fn collect_retired(&self) {
        while self.retired_rx.try_recv().is_ok() {}
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

pub fn start_audio() -> anyhow::Result<AudioHandle> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(COMMAND_QUEUE);
    let (retired_tx, retired_rx) = crossbeam_channel::bounded::<Arc<SampleBuffer>>(RETIRED_QUEUE);

    let host = cpal::default_host();
    let device = host.default_output_device().context("no default output device")?;
    let config = device.default_output_config().context("no default output config")?;

    let sample_rate = config.sample_rate();
    let channels = config.channels() as usize;

    match config.sample_format() {
        cpal::SampleFormat::F32 => {
            let output_stream = build_output_stream_f32(&device, &config.into(), rx, retired_tx, channels)?;
            output_stream.play().context("failed to play output stream")?;
            info!(sample_rate, channels, "audio output started");

            Ok(AudioHandle {
                tx,
                retired_rx,
                sample_rate,
                _output_stream: output_stream,
            })
        }
        other => anyhow::bail!("unsupported sample format {other:?} (only f32 supported for now)"),
    }
}

fn build_output_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
    retired_tx: Sender<Arc<SampleBuffer>>,
    channels: usize,
) -> anyhow::Result<cpal::Stream> {
    let mut engine = Engine::new(retired_tx);

    let err_fn = |err| warn!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _info| {
            while let Ok(cmd) = rx.try_recv() { // apply everything the ui sent since last block
                engine.handle_cmd(cmd);
            }
            engine.render_interleaved(data, channels);
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}
