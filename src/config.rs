use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

// Everything has a default, so a bare `pianotty` next to a `Sounds` folder of
// mp3s behaves like the classic toy.
#[derive(Parser, Debug, Clone)]
#[command(version, about = "A 25-key sample piano with a scrolling note shooter.")]
pub struct Config {
    /// Directory holding the sound files.
    #[arg(default_value = "Sounds")]
    pub sounds_dir: PathBuf,

    /// Extension of the sound files to pick up.
    #[arg(long, default_value = "mp3")]
    pub extension: String,

    /// Index of the sound selected at startup, counting files sorted by name.
    /// Past the end means the first one.
    #[arg(long, default_value_t = 4)]
    pub start_sample: usize,

    /// Speed of the note shots, in units per second.
    #[arg(long, default_value_t = 200.0)]
    pub velocity: f32,

    /// Distance a shot travels before it disappears.
    #[arg(long, default_value_t = 2000.0)]
    pub range: f32,

    /// Frame rate cap.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Write logs here. Without it only warnings and errors go to stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }
}

// stdout belongs to the tui, so logs go to a file or stay quiet on stderr
pub fn init_logging(config: &Config) -> anyhow::Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("can't create log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
