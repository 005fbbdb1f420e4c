use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resample::ResampleOptions;

/// Kernel half-width used when the settings file does not name one.
pub const DEFAULT_KERNEL_SIZE: u32 = 3;
const DEFAULT_SAMPLE_RATE: u32 = 48_000;
const DEFAULT_LOG_FILES: usize = 10;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors that may occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config root could be resolved.
    #[error("No suitable config directory available")]
    NoConfigDir,
    /// Failed to create the config directory.
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        /// Directory path that failed to create.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to read the settings file.
    #[error("Unable to read config file {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to write the settings file.
    #[error("Unable to write config file {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// The settings file is not valid TOML for [`AppSettings`].
    #[error("Invalid config file {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// Settings could not be serialized.
    #[error("Unable to serialize config for {path}: {source}")]
    SerializeToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML serialization error.
        source: toml::ser::Error,
    },
}

/// Settings read from `lanczos.toml`. Every field falls back to its default
/// when absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Kernel half-width used by the CLI harnesses.
    pub a: u32,
    pub resample: ResampleOptions,
    pub export: ExportSettings,
    pub logging: LoggingSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            a: DEFAULT_KERNEL_SIZE,
            resample: ResampleOptions::default(),
            export: ExportSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl AppSettings {
    /// Replace values the resampler would reject with their defaults.
    pub fn normalized(mut self) -> Self {
        if self.a == 0 {
            self.a = DEFAULT_KERNEL_SIZE;
        }
        if self.export.sample_rate == 0 {
            self.export.sample_rate = DEFAULT_SAMPLE_RATE;
        }
        // The current run's file always survives pruning.
        self.logging.max_files = self.logging.max_files.max(1);
        if self.logging.level.trim().is_empty() {
            self.logging.level = DEFAULT_LOG_LEVEL.to_string();
        }
        self
    }
}

/// Output toggles for the CLI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Also write a `.wav` next to every `.dat`.
    pub wav: bool,
    pub sample_rate: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            wav: false,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

/// Log file retention and the default filter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Number of log files kept in the logs directory, including this run's.
    pub max_files: usize,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_LOG_FILES,
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
