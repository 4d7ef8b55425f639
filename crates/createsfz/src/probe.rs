//! Picking a filename format by trying them all.

use crate::classify::{Classification, Classifier};
use crate::config::VelocitySettings;
use crate::error::{Error, Result};
use crate::format::FilenameFormat;

/// The format probing settled on, with its classification.
#[derive(Clone, Debug)]
pub struct ProbeOutcome {
    /// Winning format
    pub format: FilenameFormat,
    /// Classification produced by the winning format
    pub classification: Classification,
    /// Recognized sample count for every candidate, in probe order
    pub counts: Vec<(FilenameFormat, usize)>,
}

/// Tries each candidate format and keeps the one recognizing the most samples.
#[derive(Clone, Debug)]
pub struct FormatProbe {
    candidates: Vec<Classifier>,
}

impl FormatProbe {
    /// Probe every known format, in [`FilenameFormat::ALL`] order.
    pub fn new(velocities: &VelocitySettings, filter: Option<String>) -> Self {
        let candidates = FilenameFormat::ALL
            .into_iter()
            .map(|format| {
                Classifier::new(format)
                    .with_velocities(velocities.for_format(format))
                    .with_filter(filter.clone())
            })
            .collect();
        Self { candidates }
    }

    /// Probe an explicit set of classifiers, in the given order.
    pub fn with_candidates(candidates: Vec<Classifier>) -> Self {
        Self { candidates }
    }

    /// Classify `filenames` with every candidate.
    ///
    /// A candidate only replaces the current best with a strictly higher
    /// count, so ties go to the earlier format.
    pub fn run(&self, filenames: &[String]) -> Result<ProbeOutcome> {
        let mut counts = Vec::with_capacity(self.candidates.len());
        let mut best: Option<(FilenameFormat, Classification)> = None;

        for classifier in &self.candidates {
            let classification = classifier.classify(filenames);
            let count = classification.sample_count();
            log::debug!("Format {} recognized {} samples", classifier.format(), count);
            counts.push((classifier.format(), count));

            let best_count = best.as_ref().map_or(0, |(_, c)| c.sample_count());
            if count > best_count {
                best = Some((classifier.format(), classification));
            }
        }

        match best {
            Some((format, classification)) => {
                log::info!(
                    "Using format {} ({} samples)",
                    format,
                    classification.sample_count()
                );
                Ok(ProbeOutcome {
                    format,
                    classification,
                    counts,
                })
            }
            None => Err(Error::NoRecognizedFormat {
                files: filenames.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    thread_local! {
        static WARNINGS: Cell<usize> = const { Cell::new(0) };
    }

    /// Counts warnings logged on the current test thread.
    struct WarningCounter;

    impl log::Log for WarningCounter {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Warn
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                WARNINGS.with(|w| w.set(w.get() + 1));
            }
        }

        fn flush(&self) {}
    }

    static COUNTER: WarningCounter = WarningCounter;

    fn warnings_during(f: impl FnOnce()) -> usize {
        let _ = log::set_logger(&COUNTER);
        log::set_max_level(log::LevelFilter::Warn);
        WARNINGS.with(|w| w.set(0));
        f();
        WARNINGS.with(|w| w.get())
    }

    fn names(files: &[&str]) -> Vec<String> {
        files.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_probe_picks_only_matching_format() {
        let files = names(&["Organ C3.wav", "Organ RT C3.wav", "Organ D3.wav"]);
        let outcome = FormatProbe::new(&VelocitySettings::default(), None)
            .run(&files)
            .unwrap();

        assert_eq!(outcome.format, FilenameFormat::Format2);
        assert_eq!(outcome.classification.sample_count(), 3);
        assert_eq!(
            outcome.counts,
            [
                (FilenameFormat::Format1, 0),
                (FilenameFormat::Format2, 3),
                (FilenameFormat::PianoBook, 0),
            ]
        );
    }

    #[test]
    fn test_probe_picks_highest_count() {
        let files = names(&[
            "Piano_Soft-C3-1.wav",
            "Piano_mf_C3.wav",
            "Piano_f_C3.wav",
            "Piano_C3_RT.wav",
        ]);
        let outcome = FormatProbe::new(&VelocitySettings::default(), None)
            .run(&files)
            .unwrap();
        assert_eq!(outcome.format, FilenameFormat::PianoBook);
        assert_eq!(outcome.classification.sample_count(), 3);
    }

    #[test]
    fn test_probe_ties_keep_first() {
        let files = names(&["Piano_Soft-C3-1.wav", "Organ C3.wav"]);
        let outcome = FormatProbe::new(&VelocitySettings::default(), None)
            .run(&files)
            .unwrap();
        assert_eq!(outcome.format, FilenameFormat::Format1);
    }

    #[test]
    fn test_probe_respects_filter() {
        let files = names(&["Piano_Soft-C3-1.wav", "Organ C3.wav", "Organ D3.wav"]);
        let outcome = FormatProbe::new(&VelocitySettings::default(), Some("Piano".to_string()))
            .run(&files)
            .unwrap();
        assert_eq!(outcome.format, FilenameFormat::Format1);
        assert_eq!(outcome.classification.used, ["Piano_Soft-C3-1.wav"]);
    }

    #[test]
    fn test_losing_formats_stay_quiet() {
        let files = names(&["Piano_Soft-C3-1.wav", "Piano_Hard-C3-1.wav"]);
        let mut outcome = None;
        let warnings = warnings_during(|| {
            let probed = FormatProbe::new(&VelocitySettings::default(), None)
                .run(&files)
                .unwrap();
            probed.classification.log_warnings();
            outcome = Some(probed);
        });
        let outcome = outcome.unwrap();

        assert_eq!(outcome.format, FilenameFormat::Format1);
        assert!(outcome.classification.skipped.is_empty());
        assert_eq!(warnings, 0);
    }

    #[test]
    fn test_winner_skips_are_reported() {
        let files = names(&[
            "Piano_Soft-C3-1.wav",
            "Piano_Soft-H3-1.wav",
            "Piano_Loud-D3-1.wav",
        ]);
        let warnings = warnings_during(|| {
            let outcome = FormatProbe::new(&VelocitySettings::default(), None)
                .run(&files)
                .unwrap();
            assert_eq!(outcome.classification.skipped.len(), 1);
            assert_eq!(outcome.classification.unknown_velocities.len(), 1);
            outcome.classification.log_warnings();
        });
        assert_eq!(warnings, 2);
    }

    #[test]
    fn test_probe_fails_without_matches() {
        let files = names(&["readme.txt", "cover.png"]);
        let result = FormatProbe::new(&VelocitySettings::default(), None).run(&files);
        assert!(matches!(result, Err(Error::NoRecognizedFormat { files: 2 })));
    }

    #[test]
    fn test_probe_explicit_candidates() {
        let files = names(&["Organ C3.wav"]);
        let probe = FormatProbe::with_candidates(vec![Classifier::new(FilenameFormat::Format1)]);
        assert!(probe.run(&files).is_err());
    }
}
