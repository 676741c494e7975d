// Purely for testing: write short mono WAV files that the real decoder can load.

use std::path::{Path, PathBuf};

// 16-bit mono sine at 440Hz, `frames` long
pub fn write_tone(dir: &Path, name: &str, sample_rate: u32, frames: usize) -> PathBuf {
    let path = dir.join(name);
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for i in 0..frames {
        let t = i as f32 / sample_rate as f32;
        let s = (t * 440.0 * std::f32::consts::TAU).sin();
        writer.write_sample((s * i16::MAX as f32 * 0.5) as i16).unwrap();
    }
    writer.finalize().unwrap();
    path
}

// a sounds dir holding one tone per name, each a different length so tests can tell them apart
pub fn sounds_dir(names: &[&str], sample_rate: u32) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (i, name) in names.iter().enumerate() {
        write_tone(dir.path(), name, sample_rate, 100 * (i + 1));
    }
    dir
}
