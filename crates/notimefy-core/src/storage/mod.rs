mod state;

pub use state::StateStore;

use std::path::PathBuf;

use crate::error::ConfigError;

const APP_DIR: &str = "notimefy";
const APP_DIR_DEV: &str = "notimefy-dev";

/// `notimefy` or `notimefy-dev` depending on NOTIMEFY_ENV.
///
/// Set NOTIMEFY_ENV=dev to keep config and state apart from a production
/// install.
fn app_dir_name() -> &'static str {
    let env = std::env::var("NOTIMEFY_ENV").unwrap_or_else(|_| "production".to_string());
    if env == "dev" {
        APP_DIR_DEV
    } else {
        APP_DIR
    }
}

/// Returns `~/.config/notimefy[-dev]/`.
///
/// # Errors
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoDirectory("home"))?;
    Ok(home.join(".config").join(app_dir_name()))
}

/// Returns the per-user data directory for tracker state,
/// `~/.local/share/notimefy[-dev]/` on Linux.
///
/// # Errors
/// Returns an error if the data directory cannot be determined.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base = dirs::data_dir().ok_or(ConfigError::NoDirectory("data"))?;
    Ok(base.join(app_dir_name()))
}
