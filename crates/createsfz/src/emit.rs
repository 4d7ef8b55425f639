//! Building the SFZ document from a [`SampleIndex`].
//!
//! For every note, in ascending order, we emit:
//!
//! ```text
//! <global>          pitch_keycenter, lokey, hikey
//! <group>           lovel/hivel of one velocity layer, seq_length
//! <region>          sample, seq_position      (one per round-robin sample)
//! ...
//! ```
//!
//! Key ranges are chained: each note's range starts one above the previous
//! note, so the keyboard is covered without gaps. Only the lowest note of a
//! layer is extended downwards, by [`EmitOptions::key_range_low`].

use crate::document::{SfzDocument, SfzSection, SfzSectionType};
use crate::error::{Error, Result};
use crate::index::{Layer, SampleIndex};
use crate::note::note_name;
use crate::sample::Sample;
use std::collections::BTreeSet;

/// Highest MIDI velocity.
const MAX_VELOCITY: u32 = 127;

/// Most velocity layers a note can be split into, one per velocity value.
pub const MAX_VELOCITY_LAYERS: usize = 128;

/// Settings for region emission.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmitOptions {
    /// Sample directory recorded in `<control>`, if any
    pub default_path: Option<String>,
    /// How many keys below the lowest note it should also cover
    pub key_range_low: u8,
    /// Volume in dB for release trigger regions; 0 leaves it out
    pub release_volume: f32,
}

/// Split the velocity range 0-127 into `count` contiguous parts.
///
/// Parts are equal in size except the last, which absorbs the remainder so
/// that it always ends at 127. There are only 128 velocities, so `count` is
/// capped at [`MAX_VELOCITY_LAYERS`].
pub fn velocity_ranges(count: usize) -> Vec<(u8, u8)> {
    let count = count.min(MAX_VELOCITY_LAYERS);
    if count == 0 {
        return Vec::new();
    }
    let count = count as u32;
    let each = (MAX_VELOCITY / count).max(1);
    (0..count)
        .map(|i| {
            let lo = (i * each).min(MAX_VELOCITY);
            let hi = if i == count - 1 {
                MAX_VELOCITY
            } else {
                ((i + 1) * each - 1).min(MAX_VELOCITY)
            };
            (lo as u8, hi as u8)
        })
        .collect()
}

/// Split one note's samples into velocity layers, softest first.
///
/// Each layer keeps [`Sample`] order, which is the round-robin order.
pub fn split_by_velocity(samples: &BTreeSet<Sample>) -> Vec<Vec<&Sample>> {
    let mut layers: Vec<Vec<&Sample>> = Vec::new();
    for sample in samples {
        match layers.last_mut() {
            Some(layer) if layer[0].velocity == sample.velocity => layer.push(sample),
            _ => layers.push(vec![sample]),
        }
    }
    layers
}

/// Emits `<global>`, `<group>` and `<region>` sections for a sample index.
pub struct RegionEmitter<'a> {
    index: &'a SampleIndex,
    options: EmitOptions,
}

impl<'a> RegionEmitter<'a> {
    /// Create an emitter for `index`.
    pub fn new(index: &'a SampleIndex, options: EmitOptions) -> Self {
        Self { index, options }
    }

    /// Build the whole document.
    ///
    /// Fails with [`Error::NoSamples`] when there are no attack samples. The
    /// release layer is optional.
    pub fn emit(&self) -> Result<SfzDocument> {
        if self.index.layer(Layer::Attack).is_empty() {
            return Err(Error::NoSamples);
        }

        let mut doc = SfzDocument::new();
        let mut control = SfzSection::new(SfzSectionType::Control);
        if let Some(path) = &self.options.default_path {
            control.set("default_path", path);
        }
        doc.push_section(control);

        self.emit_layer(&mut doc, Layer::Attack);

        if !self.index.layer(Layer::Release).is_empty() {
            doc.push_blank();
            doc.push_comment("Release triggers");
            self.emit_layer(&mut doc, Layer::Release);
        }

        Ok(doc)
    }

    fn emit_layer(&self, doc: &mut SfzDocument, layer: Layer) {
        let mut previous_note: Option<u8> = None;

        for (&note, samples) in self.index.layer(layer) {
            doc.push_blank();
            doc.push_comment(format!("Note: {} ({})", note, note_name(note)));

            let lokey = match previous_note {
                Some(prev) => prev.saturating_add(1),
                None => note.saturating_sub(self.options.key_range_low),
            };
            previous_note = Some(note);

            doc.push_section(
                SfzSection::new(SfzSectionType::Global)
                    .with("pitch_keycenter", note)
                    .with("lokey", lokey)
                    .with("hikey", note),
            );

            // Unspecified velocity sorts first and never takes a range.
            let velocity_layers = split_by_velocity(samples);
            let tiers = velocity_layers
                .iter()
                .filter(|layer| layer[0].velocity.is_some())
                .count();
            let mut ranges = velocity_ranges(tiers).into_iter();

            for samples in &velocity_layers {
                let mut group = SfzSection::new(SfzSectionType::Group);
                if samples[0].velocity.is_some() {
                    if let Some((lovel, hivel)) = ranges.next() {
                        group.set("lovel", lovel);
                        group.set("hivel", hivel);
                    }
                }
                group.set("seq_length", samples.len());
                doc.push_section(group);

                for (position, sample) in samples.iter().enumerate() {
                    doc.push_section(self.region(sample, position + 1, layer));
                }
            }
        }
    }

    fn region(&self, sample: &Sample, seq_position: usize, layer: Layer) -> SfzSection {
        let mut region = SfzSection::new(SfzSectionType::Region)
            .with("sample", &sample.filename)
            .with("seq_position", seq_position);
        if layer == Layer::Release {
            region.set("trigger", "release");
            if self.options.release_volume != 0.0 {
                region.set("volume", self.options.release_volume);
            }
        }
        region
    }
}
