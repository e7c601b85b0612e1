//! Settings loaded from the user's config.toml
//!
//! One file at `<config-dir>/stockpile/config.toml`. A missing file means
//! defaults; a broken file logs a warning and also means defaults, so a
//! bad edit never prevents startup. `STOCKPILE_API_URL` overrides the
//! configured server for one run.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use stockpile_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const API_URL_ENV: &str = "STOCKPILE_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// User-tunable settings for the shell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the API server; the HAL root document lives here.
    pub api_url: String,
    /// Per-request timeout, in seconds.
    pub request_timeout_secs: u64,
    /// Where log files go. Unset means the platform data directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_dir: None,
        }
    }
}

impl Settings {
    /// Load from the default location, then apply environment overrides.
    pub fn load() -> Self {
        let mut settings = match default_config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("no config directory on this platform, using defaults");
                Self::default()
            }
        };
        settings.apply_env_overrides();
        settings
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.is_empty() {
                self.api_url = url;
            }
        }
    }

    /// Load from a specific file. Missing or unparseable files yield
    /// defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("no config file at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    debug!("loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("failed to parse {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("failed to read {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}

/// `<config-dir>/stockpile/config.toml`, alongside the stored token.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stockpile").join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("config.toml"));

        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.log_dir, None);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = \"https://stockpile.example.com/api\"\n").unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.api_url, "https://stockpile.example.com/api");
        assert_eq!(settings.request_timeout_secs, 30);
    }

    #[test]
    fn test_full_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            concat!(
                "api_url = \"https://stockpile.example.com/api\"\n",
                "request_timeout_secs = 5\n",
                "log_dir = \"/var/log/stockpile\"\n",
            ),
        )
        .unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.request_timeout_secs, 5);
        assert_eq!(settings.request_timeout(), std::time::Duration::from_secs(5));
        assert_eq!(settings.log_dir, Some(PathBuf::from("/var/log/stockpile")));
    }

    #[test]
    fn test_broken_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid toml {{{{").unwrap();

        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    #[serial]
    fn test_env_overrides_api_url() {
        std::env::set_var(API_URL_ENV, "http://10.0.0.5:8080/api");
        let mut settings = Settings::default();
        settings.apply_env_overrides();
        std::env::remove_var(API_URL_ENV);

        assert_eq!(settings.api_url, "http://10.0.0.5:8080/api");
    }

    #[test]
    #[serial]
    fn test_empty_env_override_is_ignored() {
        std::env::set_var(API_URL_ENV, "");
        let mut settings = Settings::default();
        settings.apply_env_overrides();
        std::env::remove_var(API_URL_ENV);

        assert_eq!(settings.api_url, DEFAULT_API_URL);
    }
}
