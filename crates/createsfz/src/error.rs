//! Error types for createsfz

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for createsfz operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a run.
///
/// Problems with individual sample files are not errors: they are recorded as
/// [`SkipReason`](crate::classify::SkipReason)s and the run carries on without
/// the offending file.
#[derive(Debug, Error)]
pub enum Error {
    /// The sample source is missing, not a directory, or unreadable
    #[error("bad sample directory: {}", .0.display())]
    BadDirectory(PathBuf),

    /// A format was requested by a name we do not know
    #[error("unknown sample name format '{0}' (known: format1, format2, pianobook)")]
    UnknownFormat(String),

    /// Probing tried every format and none recognized a single file
    #[error("no recognized sample name format among {files} files")]
    NoRecognizedFormat {
        /// Number of candidate files that were tried
        files: usize,
    },

    /// Classification finished with an empty main sample index
    #[error("no samples found")]
    NoSamples,

    /// The destination exists and overwriting was not allowed
    #[error("destination/output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    /// A note name could not be turned into a MIDI note number
    #[error("invalid note name '{0}'")]
    InvalidNote(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
