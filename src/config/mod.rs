//! Persistent CLI settings stored as `lanczos.toml` in the app directory.

use crate::app_dirs;

mod load;
mod save;
mod settings;


/// Filename of the settings file inside the app directory.
pub const CONFIG_FILE_NAME: &str = "lanczos.toml";

pub use load::{config_path, load_or_default, load_settings_from};
pub use save::{save, save_settings_to_path};
pub use settings::{
    AppSettings, ConfigError, DEFAULT_KERNEL_SIZE, ExportSettings, LoggingSettings,
};

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}
