//! Spatial bucketing of scattered samples.
//!
//! Observed samples live in one flat buffer grouped by bin, with an offset
//! table giving each bin's range. Records borrow their channel values from the
//! caller's source buffer.

use std::ops::Range;

use crate::resample::error::{ResampleError, try_with_capacity};

/// A scattered sample: its position and its channel values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleRef<'s> {
    pub position: f32,
    pub values: &'s [f32],
}

/// Geometry shared by every stage of the irregular pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinLayout {
    pub x0: f32,
    pub x1: f32,
    pub dst_w: usize,
    /// Kernel half-width, also the number of margin bins on each side.
    pub a: usize,
}

impl BinLayout {
    pub fn bin_count(&self) -> usize {
        self.dst_w + 2 * self.a
    }

    /// Position expressed in destination-sample units, `0` at `x0` and
    /// `dst_w` at `x1`.
    #[inline]
    pub fn grid_coordinate(&self, position: f32) -> f64 {
        let span = self.x1 as f64 - self.x0 as f64;
        self.dst_w as f64 * (position as f64 - self.x0 as f64) / span
    }

    /// Bin holding `position`, or `None` when it falls outside the margins.
    pub fn bin_of(&self, position: f32) -> Option<usize> {
        let jf = self.grid_coordinate(position);
        if !jf.is_finite() {
            return None;
        }
        let ja = jf.floor() + self.a as f64;
        if ja < 0.0 || ja >= self.bin_count() as f64 {
            return None;
        }
        Some(ja as usize)
    }

    /// Domain position at the center of `bin`.
    pub fn bin_center(&self, bin: usize) -> f32 {
        let jf = bin as f64 - self.a as f64 + 0.5;
        let span = self.x1 as f64 - self.x0 as f64;
        (self.x0 as f64 + jf * span / self.dst_w as f64) as f32
    }
}

/// Observed samples grouped by bin.
#[derive(Debug)]
pub struct BinGrid<'s> {
    layout: BinLayout,
    channels: usize,
    samples: Vec<SampleRef<'s>>,
    /// `bin_count + 1` offsets into `samples`.
    offsets: Vec<usize>,
    discarded: usize,
}

impl<'s> BinGrid<'s> {
    /// Bucket `count` records of `(position, value₁..value_channels)` from `src`.
    ///
    /// Records whose position lands outside every bin are dropped. Order
    /// within a bin follows the order of `src`.
    pub fn build(
        layout: BinLayout,
        channels: usize,
        count: usize,
        src: &'s [f32],
    ) -> Result<Self, ResampleError> {
        let stride = 1 + channels;
        let count = count.min(src.len() / stride);
        let mut keyed: Vec<(usize, SampleRef<'s>)> = try_with_capacity(count, "bin records")?;
        for record in src.chunks_exact(stride).take(count) {
            let position = record[0];
            if let Some(bin) = layout.bin_of(position) {
                keyed.push((
                    bin,
                    SampleRef {
                        position,
                        values: &record[1..],
                    },
                ));
            }
        }
        let discarded = count - keyed.len();
        keyed.sort_by_key(|(bin, _)| *bin);

        let bin_count = layout.bin_count();
        let mut offsets = try_with_capacity(bin_count + 1, "bin offsets")?;
        let mut cursor = 0;
        for bin in 0..bin_count {
            offsets.push(cursor);
            while cursor < keyed.len() && keyed[cursor].0 == bin {
                cursor += 1;
            }
        }
        offsets.push(cursor);

        let mut samples = try_with_capacity(keyed.len(), "binned samples")?;
        samples.extend(keyed.into_iter().map(|(_, sample)| sample));
        Ok(Self {
            layout,
            channels,
            samples,
            offsets,
            discarded,
        })
    }

    pub fn layout(&self) -> &BinLayout {
        &self.layout
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn bin_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Observed samples in `bin`; empty for out-of-range bins.
    pub fn samples(&self, bin: usize) -> &[SampleRef<'s>] {
        match self.range(bin) {
            Some(range) => &self.samples[range],
            None => &[],
        }
    }

    pub fn is_empty_bin(&self, bin: usize) -> bool {
        self.samples(bin).is_empty()
    }

    /// Number of samples that landed in some bin.
    pub fn binned(&self) -> usize {
        self.samples.len()
    }

    /// Number of samples dropped for falling outside every bin.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    fn range(&self, bin: usize) -> Option<Range<usize>> {
        let start = *self.offsets.get(bin)?;
        let end = *self.offsets.get(bin + 1)?;
        Some(start..end)
    }
}
