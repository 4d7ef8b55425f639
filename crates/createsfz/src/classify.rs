//! Turning sample filenames into [`Sample`]s.
//!
//! A [`Classifier`] applies one [`FilenameFormat`] to a list of filenames and
//! collects the recognized samples into a [`SampleIndex`]. Files that cannot
//! be used are recorded with a [`SkipReason`] and never abort the run.

use crate::format::{CaptureRole, FilenameFormat};
use crate::index::SampleIndex;
use crate::note::{note_name_to_number, MAX_NOTE};
use crate::sample::Sample;
use std::path::Path;
use thiserror::Error;

/// Why a file was left out of the index.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SkipReason {
    /// The filename does not follow the format's pattern
    #[error("name does not match the {0} pattern")]
    NoMatch(FilenameFormat),

    /// The base name belongs to a different instrument
    #[error("base name '{found}' does not match '{expected}'")]
    BaseNameMismatch {
        /// Base name of this file
        found: String,
        /// Base name established by the first matching file
        expected: String,
    },

    /// The note name could not be resolved
    #[error("invalid note name '{0}'")]
    InvalidNote(String),

    /// The variation is not a number
    #[error("invalid variation number '{0}'")]
    InvalidVariation(String),

    /// Sequential mapping ran past the top of the MIDI note range
    #[error("note number {0} is out of range")]
    NoteOutOfRange(u32),

    /// The same file was listed twice
    #[error("duplicate sample")]
    Duplicate,
}

/// A file that was not used, and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedFile {
    /// File name as listed
    pub filename: String,
    /// Reason it was skipped
    pub reason: SkipReason,
}

/// Result of classifying a set of files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    /// Recognized samples
    pub index: SampleIndex,
    /// Base name of the instrument, set by the first matching file
    pub base_name: Option<String>,
    /// Files that made it into the index, in listing order
    pub used: Vec<String>,
    /// Files that matched the filter but could not be used
    pub skipped: Vec<SkippedFile>,
    /// Used files whose velocity name is not in the list, with that name
    pub unknown_velocities: Vec<(String, String)>,
}

impl Classification {
    /// Number of samples in the index.
    pub fn sample_count(&self) -> usize {
        self.index.len()
    }

    /// Map samples to consecutive notes starting at `root_note`, in list order.
    ///
    /// No filename inference takes place: velocity is unspecified and every
    /// sample is variation 1. The base name is the first sample's file stem.
    pub fn sequential<I, S>(filenames: I, root_note: u8) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = Classification::default();
        let mut next_note = root_note as u32;

        for filename in filenames {
            let filename = filename.as_ref();
            if result.base_name.is_none() {
                result.base_name = Path::new(filename)
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned());
            }

            let note = match u8::try_from(next_note).ok().filter(|n| *n <= MAX_NOTE) {
                Some(note) => note,
                None => {
                    result.skip(filename, SkipReason::NoteOutOfRange(next_note));
                    continue;
                }
            };

            let sample = Sample::new(filename, note).with_variation(Some(1));
            if result.index.insert(sample) {
                log::debug!("Mapped {} to note {}", filename, note);
                result.used.push(filename.to_string());
                next_note += 1;
            } else {
                result.skip(filename, SkipReason::Duplicate);
            }
        }

        result
    }

    /// Warn about every skipped file and unknown velocity name.
    ///
    /// Classifying never warns by itself, so that probing can try formats
    /// that end up unused without reporting their skips.
    pub fn log_warnings(&self) {
        for skipped in &self.skipped {
            log::warn!("Skipping {}: {}", skipped.filename, skipped.reason);
        }
        for (filename, name) in &self.unknown_velocities {
            log::warn!(
                "{}: unknown velocity '{}', leaving velocity unspecified",
                filename,
                name
            );
        }
    }

    fn skip(&mut self, filename: &str, reason: SkipReason) {
        log::debug!("Skipping {}: {}", filename, reason);
        self.skipped.push(SkippedFile {
            filename: filename.to_string(),
            reason,
        });
    }
}

/// Classifies filenames with one format.
#[derive(Clone, Debug)]
pub struct Classifier {
    format: FilenameFormat,
    velocities: Vec<String>,
    filter: Option<String>,
}

impl Classifier {
    /// Create a classifier using the format's built-in velocity names.
    pub fn new(format: FilenameFormat) -> Self {
        Self {
            format,
            velocities: format
                .default_velocities()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            filter: None,
        }
    }

    /// Replace the velocity names, softest first.
    pub fn with_velocities(mut self, velocities: Vec<String>) -> Self {
        self.velocities = velocities;
        self
    }

    /// Only consider filenames containing `filter`.
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter.filter(|f| !f.is_empty());
        self
    }

    /// The format this classifier applies.
    pub fn format(&self) -> FilenameFormat {
        self.format
    }

    /// Velocity ordinal for a velocity name.
    ///
    /// Names are looked up in list order, exact match first, then ignoring
    /// case. Unknown names give `None`, the same as no velocity at all, so
    /// they never land in the softest layer by accident.
    pub fn velocity_ordinal(&self, name: &str) -> Option<usize> {
        self.velocities
            .iter()
            .position(|v| v == name)
            .or_else(|| self.velocities.iter().position(|v| v.eq_ignore_ascii_case(name)))
    }

    /// Classify filenames in listing order.
    pub fn classify<I, S>(&self, filenames: I) -> Classification
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = Classification::default();
        let has_velocity = self.format.captures_role(CaptureRole::Velocity);

        for filename in filenames {
            let filename = filename.as_ref();

            if let Some(filter) = &self.filter {
                if !filename.contains(filter.as_str()) {
                    continue;
                }
            }

            let Some(parts) = self.format.parse(filename) else {
                result.skip(filename, SkipReason::NoMatch(self.format));
                continue;
            };

            // The first matching file names the instrument.
            let expected = result
                .base_name
                .get_or_insert_with(|| parts.base_name.to_string());
            if !parts.base_name.starts_with(expected.as_str()) {
                let reason = SkipReason::BaseNameMismatch {
                    found: parts.base_name.to_string(),
                    expected: expected.clone(),
                };
                result.skip(filename, reason);
                continue;
            }

            let (velocity, unknown_velocity) = match parts.velocity_name {
                Some(name) if has_velocity => match self.velocity_ordinal(name) {
                    Some(ordinal) => (Some(ordinal), None),
                    None => (None, Some(name)),
                },
                _ => (None, None),
            };

            let variation = match parts.variation {
                Some(text) => match text.parse::<u32>() {
                    Ok(v) => Some(v),
                    Err(_) => {
                        result.skip(filename, SkipReason::InvalidVariation(text.to_string()));
                        continue;
                    }
                },
                None => None,
            };

            let note = match note_name_to_number(parts.note_name) {
                Ok(note) => note,
                Err(_) => {
                    result.skip(filename, SkipReason::InvalidNote(parts.note_name.to_string()));
                    continue;
                }
            };

            let sample = Sample::new(filename, note)
                .with_velocity(velocity)
                .with_variation(variation)
                .with_release_trigger(parts.release_trigger);
            log::debug!("Found {}: {:?}", filename, sample);

            if result.index.insert(sample) {
                result.used.push(filename.to_string());
                if let Some(name) = unknown_velocity {
                    result
                        .unknown_velocities
                        .push((filename.to_string(), name.to_string()));
                }
            } else {
                result.skip(filename, SkipReason::Duplicate);
            }
        }

        result
    }
}
