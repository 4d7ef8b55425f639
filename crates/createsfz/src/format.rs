//! Sample filename conventions.
//!
//! Each [`FilenameFormat`] is a regular expression with named capture groups
//! for the parts of a sample filename we care about:
//!
//! | group  | role                                      |
//! |--------|-------------------------------------------|
//! | `base` | instrument base name, shared by all files |
//! | `note` | note name, e.g. `C3` or `A#-1`            |
//! | `vel`  | velocity layer name                       |
//! | `rt`   | release trigger marker                    |
//! | `var`  | round-robin variation number              |
//!
//! A format that does not encode an attribute simply has no group for it.

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Audio file extensions accepted by every format (case-insensitive).
const EXTENSION: &str = r"\.(?i:wav|flac|ogg|aiff?)$";

/// Note name as it appears in a filename. Deliberately looser than the note
/// grammar so that bad notes are reported rather than silently ignored.
const NOTE: &str = r"(?P<note>[A-Za-z]#?-?\d+)";

static FORMAT1_PATTERN: OnceLock<Regex> = OnceLock::new();
static FORMAT2_PATTERN: OnceLock<Regex> = OnceLock::new();
static PIANOBOOK_PATTERN: OnceLock<Regex> = OnceLock::new();

/// The naming conventions we know how to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilenameFormat {
    /// `base_velocity-Note-Variation.ext`, e.g. `Piano_Hard-C4-1.wav`
    Format1,
    /// `base [RT ]Note.ext`, e.g. `Organ C3.wav` or `Organ RT C3.wav`
    Format2,
    /// `base[_velocity]_Note[_RT].ext`, e.g. `Piano_mf_C3.wav` or `Piano_C3_RT.wav`
    PianoBook,
}

/// Roles a format can capture from a filename.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureRole {
    /// Instrument base name
    BaseName,
    /// Note name
    NoteName,
    /// Velocity layer name
    Velocity,
    /// Release trigger marker
    ReleaseTrigger,
    /// Round-robin variation number
    Variation,
}

impl CaptureRole {
    fn group_name(self) -> &'static str {
        match self {
            CaptureRole::BaseName => "base",
            CaptureRole::NoteName => "note",
            CaptureRole::Velocity => "vel",
            CaptureRole::ReleaseTrigger => "rt",
            CaptureRole::Variation => "var",
        }
    }
}

/// The pieces of a filename that matched a format's pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilenameParts<'a> {
    /// Instrument base name
    pub base_name: &'a str,
    /// Unresolved note name
    pub note_name: &'a str,
    /// Velocity layer name, if the format has one and it was present
    pub velocity_name: Option<&'a str>,
    /// Whether the release trigger marker was present
    pub release_trigger: bool,
    /// Unparsed variation number, if the format has one
    pub variation: Option<&'a str>,
}

impl FilenameFormat {
    /// Every known format, in the order probing tries them.
    pub const ALL: [FilenameFormat; 3] = [
        FilenameFormat::Format1,
        FilenameFormat::Format2,
        FilenameFormat::PianoBook,
    ];

    /// Name used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            FilenameFormat::Format1 => "format1",
            FilenameFormat::Format2 => "format2",
            FilenameFormat::PianoBook => "pianobook",
        }
    }

    /// An example filename in this format.
    pub fn example(self) -> &'static str {
        match self {
            FilenameFormat::Format1 => "Piano_Hard-C4-1.wav",
            FilenameFormat::Format2 => "Organ RT C3.wav",
            FilenameFormat::PianoBook => "Piano_mf_C3_RT.wav",
        }
    }

    /// Built-in velocity layer names, softest first.
    pub fn default_velocities(self) -> &'static [&'static str] {
        match self {
            FilenameFormat::Format1 => &["Soft", "Medium", "Hard"],
            FilenameFormat::Format2 => &[],
            FilenameFormat::PianoBook => &["pp", "p", "mp", "mf", "f", "ff"],
        }
    }

    fn pattern_source(self) -> String {
        match self {
            FilenameFormat::Format1 => {
                format!(r"^(?P<base>.+)_(?P<vel>[^_\-]+)-{NOTE}-(?P<var>[^.]+){EXTENSION}")
            }
            FilenameFormat::Format2 => format!(r"^(?P<base>.+?) (?P<rt>RT )?{NOTE}{EXTENSION}"),
            FilenameFormat::PianoBook => format!(
                r"^(?P<base>.+?)(?:_(?P<vel>ff|pp|mp|mf|p|f))?_{NOTE}(?:_(?P<rt>RT))?{EXTENSION}"
            ),
        }
    }

    /// The compiled filename pattern.
    pub fn pattern(self) -> &'static Regex {
        let cell = match self {
            FilenameFormat::Format1 => &FORMAT1_PATTERN,
            FilenameFormat::Format2 => &FORMAT2_PATTERN,
            FilenameFormat::PianoBook => &PIANOBOOK_PATTERN,
        };
        cell.get_or_init(|| {
            Regex::new(&self.pattern_source()).expect("built-in filename pattern is valid")
        })
    }

    /// Whether this format's pattern has a group for `role`.
    pub fn captures_role(self, role: CaptureRole) -> bool {
        self.pattern()
            .capture_names()
            .flatten()
            .any(|name| name == role.group_name())
    }

    /// Match a filename against this format.
    pub fn parse<'a>(self, filename: &'a str) -> Option<FilenameParts<'a>> {
        let caps = self.pattern().captures(filename)?;
        let group = |role: CaptureRole| caps.name(role.group_name()).map(|m| m.as_str());

        Some(FilenameParts {
            base_name: group(CaptureRole::BaseName)?,
            note_name: group(CaptureRole::NoteName)?,
            velocity_name: group(CaptureRole::Velocity),
            release_trigger: group(CaptureRole::ReleaseTrigger).is_some_and(|m| !m.is_empty()),
            variation: group(CaptureRole::Variation),
        })
    }
}

impl fmt::Display for FilenameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilenameFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "format1" | "1" => Ok(FilenameFormat::Format1),
            "format2" | "2" => Ok(FilenameFormat::Format2),
            "pianobook" | "piano-book" | "piano_book" => Ok(FilenameFormat::PianoBook),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}
