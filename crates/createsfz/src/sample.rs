//! Sample information such as filename, the note and velocity it represents.

use std::cmp::Ordering;

/// One sound file assigned to a specific pitch.
///
/// Samples sort by note, then velocity ordinal, then variation, then filename.
/// The ordering is what groups samples into velocity layers and round-robin
/// sequences, so two different files never compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sample {
    /// Sample file name, written verbatim into the output.
    pub filename: String,
    /// MIDI note number.
    pub note: u8,
    /// Position in the format's velocity name list; `None` when unspecified.
    pub velocity: Option<usize>,
    /// Round-robin variation number; `None` when the format has none.
    pub variation: Option<u32>,
    /// Whether this sample plays on key release.
    pub release_trigger: bool,
}

impl Sample {
    /// Create an attack sample.
    pub fn new(filename: impl Into<String>, note: u8) -> Self {
        Self {
            filename: filename.into(),
            note,
            velocity: None,
            variation: None,
            release_trigger: false,
        }
    }

    /// Set the velocity ordinal.
    pub fn with_velocity(mut self, velocity: Option<usize>) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the round-robin variation.
    pub fn with_variation(mut self, variation: Option<u32>) -> Self {
        self.variation = variation;
        self
    }

    /// Mark as a release trigger sample.
    pub fn with_release_trigger(mut self, release_trigger: bool) -> Self {
        self.release_trigger = release_trigger;
        self
    }
}

impl Ord for Sample {
    fn cmp(&self, other: &Self) -> Ordering {
        self.note
            .cmp(&other.note)
            .then_with(|| self.velocity.cmp(&other.velocity))
            .then_with(|| self.variation.cmp(&other.variation))
            .then_with(|| self.filename.cmp(&other.filename))
            .then_with(|| self.release_trigger.cmp(&other.release_trigger))
    }
}

impl PartialOrd for Sample {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn sample(name: &str, note: u8, velocity: Option<usize>, variation: Option<u32>) -> Sample {
        Sample::new(name, note)
            .with_velocity(velocity)
            .with_variation(variation)
    }

    #[test]
    fn test_sort_order() {
        let mut samples = vec![
            sample("d", 61, Some(0), Some(1)),
            sample("c", 60, Some(2), Some(1)),
            sample("b", 60, Some(0), Some(2)),
            sample("a", 60, Some(0), Some(1)),
            sample("e", 60, None, Some(1)),
        ];
        samples.sort();
        let names: Vec<_> = samples.iter().map(|s| s.filename.as_str()).collect();
        assert_eq!(names, ["e", "a", "b", "c", "d"]);
    }

    #[test]
    fn test_identical_keys_do_not_collapse() {
        // Same note and velocity, no variation: both files must survive in a set.
        let mut set = BTreeSet::new();
        assert!(set.insert(sample("Organ C3.wav", 60, None, None)));
        assert!(set.insert(sample("Organ C3 take2.wav", 60, None, None)));
        assert_eq!(set.len(), 2);

        // Re-inserting the same file is still a no-op.
        assert!(!set.insert(sample("Organ C3.wav", 60, None, None)));
    }

    #[test]
    fn test_total_order() {
        let samples = [
            sample("x", 60, Some(1), Some(1)),
            sample("x", 60, Some(1), Some(2)),
            sample("x", 60, Some(2), None),
            sample("y", 60, Some(2), None),
            sample("x", 72, None, None),
        ];
        for a in &samples {
            for b in &samples {
                let lt = a < b;
                let gt = b < a;
                assert!(a == b || lt != gt, "{:?} / {:?}", a, b);
                for c in &samples {
                    if a < b && b < c {
                        assert!(a < c);
                    }
                }
            }
        }
    }
}
