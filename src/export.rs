//! Plain-text and WAV export of sampled signals.
//!
//! `.dat` files hold one `"x y"` pair per line, ready for gnuplot.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Errors that may occur while exporting a signal.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create or write a data file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to encode a WAV file.
    #[error("Failed to write wav {path}: {source}")]
    Wav { path: PathBuf, source: hound::Error },
}

/// Write `(x, y)` points to `path`, one per line with six decimals.
pub fn write_dat<I>(path: &Path, points: I) -> Result<(), ExportError>
where
    I: IntoIterator<Item = (f32, f32)>,
{
    let map_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(map_err)?;
    let mut writer = BufWriter::new(file);
    for (x, y) in points {
        writeln!(writer, "{x:.6} {y:.6}").map_err(map_err)?;
    }
    writer.flush().map_err(map_err)
}

/// Write interleaved float samples as a 32-bit float WAV file.
pub fn write_wav(
    path: &Path,
    samples: &[f32],
    channels: u16,
    sample_rate: u32,
) -> Result<(), ExportError> {
    let map_err = |source| ExportError::Wav {
        path: path.to_path_buf(),
        source,
    };
    let spec = hound::WavSpec {
        channels: channels.max(1),
        sample_rate: sample_rate.max(1),
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).map_err(map_err)?;
    for &sample in samples {
        writer.write_sample(sample).map_err(map_err)?;
    }
    writer.finalize().map_err(map_err)
}

/// Source-index positions `(j + 0.5) * src_w / dst_w - 0.5` of a regular
/// destination grid.
pub fn regular_positions(src_w: usize, dst_w: usize) -> impl Iterator<Item = f32> {
    let step = src_w as f32 / dst_w.max(1) as f32;
    (0..dst_w).map(move |j| (j as f32 + 0.5) * step - 0.5)
}

/// Domain positions of destination sample centers across `[x0, x1]`.
pub fn domain_positions(x0: f32, x1: f32, dst_w: usize) -> impl Iterator<Item = f32> {
    let w = dst_w.max(1) as f32;
    (0..dst_w).map(move |j| x0 + (x1 - x0) * (j as f32 + 0.5) / w)
}
