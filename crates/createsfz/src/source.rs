//! Listing sample files in a directory.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions treated as audio when no filename pattern is applied.
pub const AUDIO_EXTENSIONS: [&str; 5] = ["wav", "flac", "ogg", "aif", "aiff"];

/// Normalize a path string based on the current operating system
///
/// On Windows backslashes are kept, everywhere else they become forward
/// slashes.
pub fn normalize_path(path: &str) -> String {
    if cfg!(windows) {
        path.to_string()
    } else {
        path.replace('\\', "/")
    }
}

/// Whether a file name has one of the [`AUDIO_EXTENSIONS`].
pub fn is_audio_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)))
}

/// A directory of sample files.
#[derive(Clone, Debug)]
pub struct SampleSource {
    dir: PathBuf,
    files: Vec<String>,
}

impl SampleSource {
    /// Read the names of all files in `dir`, including symlinks to files, sorted by name.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::BadDirectory(dir.to_path_buf()));
        }
        let entries = fs::read_dir(dir).map_err(|e| {
            log::debug!("Cannot read {}: {}", dir.display(), e);
            Error::BadDirectory(dir.to_path_buf())
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            // Follows symlinks
            if !entry.path().is_file() {
                log::debug!("Skipping {}: not a file", entry.path().display());
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => files.push(name),
                Err(name) => log::warn!("Skipping non UTF-8 file name {:?}", name),
            }
        }
        files.sort();

        log::debug!("{}: {} files", dir.display(), files.len());
        Ok(Self {
            dir: dir.to_path_buf(),
            files,
        })
    }

    /// The directory these files live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All file names, sorted.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// File names with an audio extension, sorted.
    pub fn audio_files(&self) -> Vec<String> {
        self.files
            .iter()
            .filter(|name| is_audio_file(name))
            .cloned()
            .collect()
    }

    /// The directory as an SFZ `default_path`.
    ///
    /// Players join `default_path` and `sample` without adding a separator,
    /// so the result always ends with one.
    pub fn default_path(&self) -> String {
        let mut path = normalize_path(&self.dir.to_string_lossy());
        if !path.ends_with('/') && !path.ends_with('\\') {
            path.push('/');
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        if cfg!(windows) {
            assert_eq!(normalize_path("samples\\piano\\C4.wav"), "samples\\piano\\C4.wav");
        } else {
            assert_eq!(normalize_path("samples\\piano\\C4.wav"), "samples/piano/C4.wav");
        }

        // Forward slashes should remain unchanged on all platforms
        assert_eq!(normalize_path("samples/piano/C4.wav"), "samples/piano/C4.wav");
    }

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file("kick.wav"));
        assert!(is_audio_file("kick.WAV"));
        assert!(is_audio_file("pad.aiff"));
        assert!(!is_audio_file("notes.txt"));
        assert!(!is_audio_file("wav"));
    }

    #[test]
    fn test_open_lists_sorted_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.wav", "a.wav", "readme.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("sub.wav")).unwrap();

        let source = SampleSource::open(dir.path()).unwrap();
        assert_eq!(source.files(), ["a.wav", "b.wav", "readme.txt"]);
        assert_eq!(source.audio_files(), ["a.wav", "b.wav"]);
        assert!(source.default_path().ends_with('/'));
    }

    #[test]
    fn test_default_path_keeps_trailing_separator() {
        let dir = tempfile::tempdir().unwrap();
        let with_slash = format!("{}/", dir.path().display());
        let source = SampleSource::open(&with_slash).unwrap();
        assert!(!source.default_path().ends_with("//"));
    }

    #[cfg(unix)]
    #[test]
    fn test_open_follows_symlinks() {
        let samples = tempfile::tempdir().unwrap();
        fs::write(samples.path().join("Organ C3.wav"), b"").unwrap();

        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(
            samples.path().join("Organ C3.wav"),
            dir.path().join("Organ C3.wav"),
        )
        .unwrap();
        std::os::unix::fs::symlink(samples.path(), dir.path().join("linked.wav")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.wav"), dir.path().join("dangling.wav"))
            .unwrap();

        let source = SampleSource::open(dir.path()).unwrap();
        assert_eq!(source.files(), ["Organ C3.wav"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(SampleSource::open(&missing), Err(Error::BadDirectory(_))));

        let file = dir.path().join("file.wav");
        fs::write(&file, b"").unwrap();
        assert!(matches!(SampleSource::open(&file), Err(Error::BadDirectory(_))));
    }
}
