//! Build SFZ instruments from directories of audio samples.
//!
//! Sample filenames usually say which note they are, how hard it was played
//! and which take it is. This crate reads that information back out of the
//! names and writes an SFZ file mapping every sample to its key range,
//! velocity layer and round-robin slot.
//!
//! # Architecture
//!
//! - [`format`]: the supported filename conventions
//! - [`classify`]: filenames to [`Sample`]s, collected in a [`SampleIndex`]
//! - [`probe`]: picking the convention that fits a directory best
//! - [`emit`]: the [`SampleIndex`] to an [`SfzDocument`]
//! - [`pipeline`]: all of the above for one directory
//!
//! # Example
//!
//! ```no_run
//! use createsfz::{build, write_document, BuildOptions, SampleSource};
//!
//! let source = SampleSource::open("samples/piano")?;
//! let build = build(&source, &BuildOptions::default())?;
//! write_document("Piano.sfz".as_ref(), &build.document, false)?;
//! # Ok::<(), createsfz::Error>(())
//! ```

pub mod classify;
pub mod config;
pub mod document;
pub mod emit;
pub mod error;
pub mod format;
pub mod index;
pub mod note;
pub mod output;
pub mod pipeline;
pub mod probe;
pub mod sample;
pub mod source;

// Re-export main types
pub use classify::{Classification, Classifier, SkipReason, SkippedFile};
pub use config::{Config, Defaults, VelocitySettings};
pub use document::{SfzDocument, SfzItem, SfzSection, SfzSectionType};
pub use emit::{velocity_ranges, EmitOptions, RegionEmitter};
pub use error::{Error, Result};
pub use format::{CaptureRole, FilenameFormat, FilenameParts};
pub use index::{Layer, SampleIndex};
pub use note::{note_name, note_name_to_number, parse_root_note};
pub use output::{default_output_path, write_document};
pub use pipeline::{build, Build, BuildOptions, Mapping};
pub use probe::{FormatProbe, ProbeOutcome};
pub use sample::Sample;
pub use source::SampleSource;
