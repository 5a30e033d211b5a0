use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    errors::DeskError,
    utils::{
        paths,
        persistence::{ensure_dir, write_atomic},
    },
};

pub const API_DELAY_ENV: &str = "TRIP_DESK_API_DELAY_MS";
pub const TYPING_DELAY_ENV: &str = "TRIP_DESK_TYPING_DELAY_MS";

const DEFAULT_DELAY_MS: u64 = 1000;

/// User-tunable settings persisted as `config.json` in the app directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency_symbol: String,
    /// Fixed latency applied to every mock API call.
    pub api_delay_ms: u64,
    /// Pause before the assistant posts its replies.
    pub typing_delay_ms: u64,
    /// Makes every mock API call fail with its generic error.
    pub simulate_failures: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency_symbol: "₹".into(),
            api_delay_ms: DEFAULT_DELAY_MS,
            typing_delay_ms: DEFAULT_DELAY_MS,
            simulate_failures: false,
            export_dir: None,
        }
    }
}

impl Config {
    pub fn api_delay(&self) -> Duration {
        Duration::from_millis(self.api_delay_ms)
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    /// Applies the delay overrides from the environment, ignoring values that
    /// are not whole milliseconds.
    pub fn apply_env_overrides(&mut self) {
        if let Some(ms) = env_millis(API_DELAY_ENV) {
            self.api_delay_ms = ms;
        }
        if let Some(ms) = env_millis(TYPING_DELAY_ENV) {
            self.typing_delay_ms = ms;
        }
    }

    /// Updates a single setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), DeskError> {
        let value = value.trim();
        match key {
            "locale" => self.locale = value.to_string(),
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "api_delay_ms" => self.api_delay_ms = parse_millis(key, value)?,
            "typing_delay_ms" => self.typing_delay_ms = parse_millis(key, value)?,
            "simulate_failures" => {
                self.simulate_failures = match value.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => {
                        let message = format!("`{}` expects true/false, got `{}`", key, value);
                        return Err(DeskError::Config(message));
                    }
                }
            }
            "export_dir" => {
                self.export_dir = if value.is_empty() || value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            other => {
                let message = format!("unknown setting `{}`", other);
                return Err(DeskError::Config(message));
            }
        }
        Ok(())
    }

    /// Key/value pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let export_dir = self.export_dir.as_deref().unwrap_or("(default)");
        vec![
            ("locale", self.locale.clone()),
            ("currency_symbol", self.currency_symbol.clone()),
            ("api_delay_ms", self.api_delay_ms.to_string()),
            ("typing_delay_ms", self.typing_delay_ms.to_string()),
            ("simulate_failures", self.simulate_failures.to_string()),
            ("export_dir", export_dir.to_string()),
        ]
    }
}

fn env_millis(var: &str) -> Option<u64> {
    env::var(var).ok()?.trim().parse().ok()
}

fn parse_millis(key: &str, value: &str) -> Result<u64, DeskError> {
    value.parse::<u64>().map_err(|_| {
        let message = format!("`{}` expects whole milliseconds, got `{}`", key, value);
        DeskError::Config(message)
    })
}

/// Loads and saves [`Config`] inside the application directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, DeskError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, DeskError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, DeskError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), DeskError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    /// Directory used for exports when the config does not name one.
    pub fn export_dir(&self, config: &Config) -> PathBuf {
        config
            .export_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| paths::reports_dir_in(&self.base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_delay(), Duration::from_secs(1));
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("api_delay_ms", "0").unwrap();
        config.set("simulate_failures", "yes").unwrap();
        config.set("export_dir", "/tmp/reports").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.api_delay_ms, 0);
        assert!(loaded.simulate_failures);
        assert_eq!(manager.export_dir(&loaded), PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "locale": "en-IN" }"#).unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.locale, "en-IN");
        assert_eq!(config.typing_delay_ms, 1000);
        assert_eq!(manager.export_dir(&config), dir.path().join("reports"));
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("colour", "blue"),
            Err(DeskError::Config(_))
        ));
        assert!(config.set("api_delay_ms", "fast").is_err());
        assert!(config.set("simulate_failures", "maybe").is_err());
    }
}
