//! Placeholder samples for bins that received no observations.

use crate::resample::error::{ResampleError, try_with_capacity};
use crate::resample::options::NodataPolicy;

use super::bins::{BinGrid, SampleRef};

/// Synthesized samples, at most one per bin, owned by the pipeline.
#[derive(Debug)]
pub struct HoleSet {
    channels: usize,
    /// Bin of each hole, ascending.
    bins: Vec<usize>,
    positions: Vec<f32>,
    /// `channels` values per hole.
    values: Vec<f32>,
    /// Hole index for each bin, if that bin was filled.
    by_bin: Vec<Option<usize>>,
}

impl HoleSet {
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// The synthesized sample in `bin`, if any.
    pub fn get(&self, bin: usize) -> Option<SampleRef<'_>> {
        let hole = (*self.by_bin.get(bin)?)?;
        Some(self.sample(hole))
    }

    /// Every hole with the bin it fills, in bin order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, SampleRef<'_>)> + '_ {
        self.bins
            .iter()
            .enumerate()
            .map(|(hole, &bin)| (bin, self.sample(hole)))
    }

    fn sample(&self, hole: usize) -> SampleRef<'_> {
        let start = hole * self.channels;
        SampleRef {
            position: self.positions[hole],
            values: &self.values[start..start + self.channels],
        }
    }
}

/// Bins after hole filling: every bin holds at least one sample.
#[derive(Debug)]
pub struct FilledBins<'g, 's> {
    pub grid: &'g BinGrid<'s>,
    pub holes: HoleSet,
}

impl FilledBins<'_, '_> {
    /// Observed samples in `bin` followed by its synthesized sample, if any.
    pub fn samples(&self, bin: usize) -> impl Iterator<Item = SampleRef<'_>> + '_ {
        let observed: &[SampleRef<'_>] = self.grid.samples(bin);
        observed.iter().copied().chain(self.holes.get(bin))
    }
}

/// Synthesize one sample for every empty bin of `grid`.
///
/// Neighbors are searched among observed samples only, at most `a` bins to
/// each side, so results do not depend on the order holes are filled in.
pub fn fill_holes(grid: &BinGrid<'_>, policy: NodataPolicy) -> Result<HoleSet, ResampleError> {
    let layout = grid.layout();
    let channels = grid.channels();
    let bin_count = grid.bin_count();
    let empty = (0..bin_count).filter(|&bin| grid.is_empty_bin(bin)).count();

    let mut holes = HoleSet {
        channels,
        bins: try_with_capacity(empty, "hole bins")?,
        positions: try_with_capacity(empty, "hole positions")?,
        values: try_with_capacity(empty.saturating_mul(channels), "hole values")?,
        by_bin: try_with_capacity(bin_count, "hole index")?,
    };

    for bin in 0..bin_count {
        if !grid.is_empty_bin(bin) {
            holes.by_bin.push(None);
            continue;
        }
        let position = layout.bin_center(bin);
        let start = holes.values.len();
        holes.values.resize(start + channels, 0.0);
        let out = &mut holes.values[start..];

        if policy != NodataPolicy::Zero {
            let left = left_neighbor(grid, bin, position);
            let right = right_neighbor(grid, bin, position);
            synthesize(policy, position, left, right, out);
        }

        holes.by_bin.push(Some(holes.bins.len()));
        holes.bins.push(bin);
        holes.positions.push(position);
    }
    Ok(holes)
}

/// Closest observed sample below `position`, scanning at most `a` bins left.
fn left_neighbor<'s>(grid: &BinGrid<'s>, bin: usize, position: f32) -> Option<SampleRef<'s>> {
    let lo = bin.saturating_sub(grid.layout().a);
    (lo..bin).rev().find_map(|k| {
        grid.samples(k)
            .iter()
            .filter(|s| s.position < position)
            .max_by(|a, b| a.position.total_cmp(&b.position))
            .copied()
    })
}

/// Closest observed sample above `position`, scanning at most `a` bins right.
fn right_neighbor<'s>(grid: &BinGrid<'s>, bin: usize, position: f32) -> Option<SampleRef<'s>> {
    let hi = (bin + grid.layout().a).min(grid.bin_count().saturating_sub(1));
    (bin + 1..=hi).find_map(|k| {
        grid.samples(k)
            .iter()
            .filter(|s| s.position > position)
            .min_by(|a, b| a.position.total_cmp(&b.position))
            .copied()
    })
}

fn synthesize(
    policy: NodataPolicy,
    position: f32,
    left: Option<SampleRef<'_>>,
    right: Option<SampleRef<'_>>,
    out: &mut [f32],
) {
    match (left, right) {
        (Some(l), Some(r)) if policy == NodataPolicy::Weighted => {
            let s = (position - l.position) / (r.position - l.position);
            for ((o, &lv), &rv) in out.iter_mut().zip(l.values).zip(r.values) {
                *o = lv + s * (rv - lv);
            }
        }
        (Some(l), Some(r)) => {
            let nearest = if position - l.position <= r.position - position {
                l
            } else {
                r
            };
            out.copy_from_slice(nearest.values);
        }
        (Some(only), None) | (None, Some(only)) => out.copy_from_slice(only.values),
        (None, None) => {}
    }
}
