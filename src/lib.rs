//! Lanczos resampling of regular and scattered signals, plus the small
//! amount of plumbing the `lanczos` binary needs around it.
/// The resampling engine.
pub mod resample;
/// Synthetic test signals.
pub mod signal;
/// `.dat` and WAV export.
pub mod export;
/// Persistent settings.
pub mod config;
/// Application directory resolution.
pub mod app_dirs;
/// Tracing subscriber setup.
pub mod logging;
