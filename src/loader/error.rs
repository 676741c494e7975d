use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("can't read sounds directory '{}': {source}", dir.display())]
    ReadDir {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("no .{extension} files in sounds directory '{}'", dir.display())]
    EmptyDirectory { dir: PathBuf, extension: String },

    #[error("can't open sound file '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("can't decode sound file '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        source: symphonia::core::errors::Error,
    },

    #[error("no audio track in sound file '{}'", path.display())]
    NoAudioTrack { path: PathBuf },

    #[error("sound file '{}' has no audio frames", path.display())]
    NoFrames { path: PathBuf },
}
