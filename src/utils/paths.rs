use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".trip_desk";
const CONFIG_FILE: &str = "config.json";
const REPORTS_DIR: &str = "reports";

/// Environment variable that relocates the application directory.
pub const HOME_ENV: &str = "TRIP_DESK_HOME";

/// Returns the application-specific data directory, defaulting to `~/.trip_desk`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Default destination for exported analytics reports.
pub fn reports_dir_in(base: &std::path::Path) -> PathBuf {
    base.join(REPORTS_DIR)
}
