use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::SampleError;

// Every sound file in the sounds dir, plus which one is selected. Stepping
// past either end wraps around to the other.
#[derive(Clone, Debug)]
pub struct SampleSet {
    paths: Vec<PathBuf>, // never empty
    current: isize,
}

impl SampleSet {
    pub fn from_dir(dir: &Path, extension: &str, start: usize) -> Result<Self, SampleError> {
        let paths = index_in_dir(dir, extension)?;
        Self::from_paths(paths, start).ok_or_else(|| SampleError::EmptyDirectory {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
        })
    }

    pub fn from_paths(paths: Vec<PathBuf>, start: usize) -> Option<Self> {
        if paths.is_empty() {
            return None;
        }
        let mut set = Self {
            paths,
            current: start.min(isize::MAX as usize) as isize,
        };
        set.normalize();
        Some(set)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn index(&self) -> usize {
        self.current as usize
    }

    pub fn step(&mut self, delta: isize) {
        self.current = self.current.saturating_add(delta);
        self.normalize();
    }

    // below the start lands on the last entry, past the end lands on the first
    fn normalize(&mut self) {
        let count = self.paths.len() as isize;
        if self.current < 0 {
            self.current = count - 1;
        } else if self.current >= count {
            self.current = 0;
        }
    }

    pub fn current_path(&self) -> &Path {
        &self.paths[self.index()]
    }

    // file stem for the status bar
    pub fn current_name(&self) -> String {
        self.current_path()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

// All files in `dir` with the given extension, sorted by file name so the
// order doesn't depend on the filesystem
pub fn index_in_dir(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, SampleError> {
    let read_err = |source: std::io::Error| SampleError::ReadDir { dir: dir.to_path_buf(), source };
    let extension = extension.trim_start_matches('.');

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && path.extension() == Some(OsStr::new(extension)) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(n: usize, start: usize) -> SampleSet {
        let paths = (0..n).map(|i| PathBuf::from(format!("Sounds/{i}.mp3"))).collect();
        SampleSet::from_paths(paths, start).unwrap()
    }

    #[test]
    fn decrement_from_first_wraps_to_last() {
        let mut set = set_of(5, 0);
        set.step(-1);
        assert_eq!(set.index(), 4);
    }

    #[test]
    fn increment_from_last_wraps_to_first() {
        let mut set = set_of(5, 4);
        set.step(1);
        assert_eq!(set.index(), 0);
    }

    #[test]
    fn start_past_the_end_begins_at_first() {
        assert_eq!(set_of(3, 4).index(), 0);
        assert_eq!(set_of(6, 4).index(), 4);
    }

    #[test]
    fn no_paths_no_set() {
        assert!(SampleSet::from_paths(vec![], 0).is_none());
    }

    #[test]
    fn name_is_the_file_stem() {
        let set = set_of(2, 1);
        assert_eq!(set.current_name(), "1");
        assert_eq!(set.current_path(), Path::new("Sounds/1.mp3"));
    }

    #[test]
    fn indexes_only_matching_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.mp3", "a.mp3", "c.wav", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("d.mp3")).unwrap();

        let paths = index_in_dir(dir.path(), ".mp3").unwrap();
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.mp3", "b.mp3"]);
    }

    #[test]
    fn empty_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"").unwrap();
        let err = SampleSet::from_dir(dir.path(), "mp3", 4).unwrap_err();
        assert!(matches!(err, SampleError::EmptyDirectory { .. }));
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SampleSet::from_dir(&dir.path().join("Sounds"), "mp3", 0).unwrap_err();
        assert!(matches!(err, SampleError::ReadDir { .. }));
    }
}
