//! The full conversion: sample directory in, SFZ document out.

use crate::classify::{Classification, Classifier};
use crate::config::VelocitySettings;
use crate::document::SfzDocument;
use crate::emit::{EmitOptions, RegionEmitter};
use crate::error::{Error, Result};
use crate::format::FilenameFormat;
use crate::index::Layer;
use crate::probe::FormatProbe;
use crate::source::SampleSource;

/// How samples are assigned to notes.
#[derive(Clone, Debug, PartialEq)]
pub enum Mapping {
    /// Read note, velocity and variation from filenames with this format
    Format(FilenameFormat),
    /// Try every format and keep the best
    Probe,
    /// Assign consecutive notes from `root_note` in list order
    Sequential {
        /// Note for the first sample
        root_note: u8,
        /// Samples to map; every audio file in the directory when `None`
        samples: Option<Vec<String>>,
    },
}

/// Everything needed for one conversion.
#[derive(Clone, Debug)]
pub struct BuildOptions {
    /// Sample-to-note mapping
    pub mapping: Mapping,
    /// Only consider filenames containing this text
    pub filter: Option<String>,
    /// Velocity layer names
    pub velocities: VelocitySettings,
    /// Key range expansion below the lowest note
    pub key_range_low: u8,
    /// Release trigger volume in dB
    pub release_volume: f32,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            mapping: Mapping::Probe,
            filter: None,
            velocities: VelocitySettings::default(),
            key_range_low: 0,
            release_volume: 0.0,
        }
    }
}

/// Result of a conversion.
#[derive(Clone, Debug)]
pub struct Build {
    /// Generated instrument
    pub document: SfzDocument,
    /// Samples used and files skipped
    pub classification: Classification,
    /// Format used, `None` for sequential mapping
    pub format: Option<FilenameFormat>,
    /// Instrument base name, used for the default output file name
    pub base_name: String,
}

/// Classify the files of `source` and emit the instrument.
pub fn build(source: &SampleSource, options: &BuildOptions) -> Result<Build> {
    let filtered = |names: Vec<String>| -> Vec<String> {
        match options.filter.as_deref().filter(|f| !f.is_empty()) {
            Some(filter) => names.into_iter().filter(|n| n.contains(filter)).collect(),
            None => names,
        }
    };

    let (format, classification) = match &options.mapping {
        Mapping::Format(format) => {
            let classifier = Classifier::new(*format)
                .with_velocities(options.velocities.for_format(*format))
                .with_filter(options.filter.clone());
            (Some(*format), classifier.classify(source.files()))
        }
        Mapping::Probe => {
            let outcome = FormatProbe::new(&options.velocities, options.filter.clone())
                .run(source.files())?;
            (Some(outcome.format), outcome.classification)
        }
        Mapping::Sequential { root_note, samples } => {
            let samples = match samples {
                Some(samples) => filtered(samples.clone()),
                None => filtered(source.audio_files()),
            };
            (None, Classification::sequential(samples, *root_note))
        }
    };

    classification.log_warnings();
    log::info!(
        "{}: files used: {}, skipped: {}",
        source.dir().display(),
        classification.used.len(),
        classification.skipped.len()
    );

    if classification.index.layer(Layer::Attack).is_empty() {
        return Err(Error::NoSamples);
    }

    let emit_options = EmitOptions {
        default_path: Some(source.default_path()),
        key_range_low: options.key_range_low,
        release_volume: options.release_volume,
    };
    let document = RegionEmitter::new(&classification.index, emit_options).emit()?;
    let base_name = classification
        .base_name
        .clone()
        .unwrap_or_else(|| "instrument".to_string());

    Ok(Build {
        document,
        classification,
        format,
        base_name,
    })
}
