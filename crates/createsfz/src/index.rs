//! Samples grouped by note number.

use crate::sample::Sample;
use std::collections::{BTreeMap, BTreeSet};

/// Which of the two sample layers a sample belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    /// Samples played on key press
    Attack,
    /// Samples played on key release
    Release,
}

/// Sorted samples for each note, one map per layer.
///
/// Notes iterate in ascending order and each note's samples iterate in
/// [`Sample`] order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SampleIndex {
    attack: BTreeMap<u8, BTreeSet<Sample>>,
    release: BTreeMap<u8, BTreeSet<Sample>>,
}

impl SampleIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sample to the layer its release flag selects.
    ///
    /// Returns false if the same sample was already present.
    pub fn insert(&mut self, sample: Sample) -> bool {
        let layer = if sample.release_trigger {
            &mut self.release
        } else {
            &mut self.attack
        };
        layer.entry(sample.note).or_default().insert(sample)
    }

    /// Samples of one layer, keyed by note.
    pub fn layer(&self, layer: Layer) -> &BTreeMap<u8, BTreeSet<Sample>> {
        match layer {
            Layer::Attack => &self.attack,
            Layer::Release => &self.release,
        }
    }

    /// Number of samples in one layer.
    pub fn layer_len(&self, layer: Layer) -> usize {
        self.layer(layer).values().map(BTreeSet::len).sum()
    }

    /// Total number of samples in both layers.
    pub fn len(&self) -> usize {
        self.layer_len(Layer::Attack) + self.layer_len(Layer::Release)
    }

    /// True when neither layer holds a sample.
    pub fn is_empty(&self) -> bool {
        self.attack.is_empty() && self.release.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_splits_layers() {
        let mut index = SampleIndex::new();
        assert!(index.is_empty());

        index.insert(Sample::new("a.wav", 60));
        index.insert(Sample::new("b.wav", 60).with_release_trigger(true));
        index.insert(Sample::new("c.wav", 62));

        assert_eq!(index.layer_len(Layer::Attack), 2);
        assert_eq!(index.layer_len(Layer::Release), 1);
        assert_eq!(index.len(), 3);

        let notes: Vec<u8> = index.layer(Layer::Attack).keys().copied().collect();
        assert_eq!(notes, [60, 62]);
    }

    #[test]
    fn test_notes_iterate_ascending() {
        let mut index = SampleIndex::new();
        for note in [72, 48, 60, 50] {
            index.insert(Sample::new(format!("{}.wav", note), note));
        }
        let notes: Vec<u8> = index.layer(Layer::Attack).keys().copied().collect();
        assert_eq!(notes, [48, 50, 60, 72]);
    }

    #[test]
    fn test_duplicate_insert() {
        let mut index = SampleIndex::new();
        assert!(index.insert(Sample::new("a.wav", 60)));
        assert!(!index.insert(Sample::new("a.wav", 60)));
        assert_eq!(index.len(), 1);
    }
}
