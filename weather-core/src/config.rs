use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// OpenWeatherMap API, version 2.5.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Environment variable holding the API key. Takes precedence over the
/// config file; may also come from a local `.env` file.
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "WEATHER_BASE_URL";

/// On-disk configuration, stored as TOML in the platform config directory.
///
/// Example:
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/data/2.5"
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Fully resolved configuration handed to the service layer.
///
/// Held immutably for the life of the process; there is no other long-lived
/// state.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    /// Load config from disk (if the file exists) and overlay the process
    /// environment on top. A `.env` file in the working directory is honored
    /// before the environment is read.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = Self::config_file_path()?;
        let mut cfg = if path.exists() { Self::load_from_path(&path)? } else { Self::default() };

        cfg.overlay(env::var(API_KEY_ENV).ok(), env::var(BASE_URL_ENV).ok());

        Ok(cfg)
    }

    /// Load config from an explicit TOML file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Environment values win over file values.
    fn overlay(&mut self, api_key: Option<String>, base_url: Option<String>) {
        if let Some(key) = api_key {
            self.api_key = Some(key);
        }
        if let Some(url) = base_url {
            self.base_url = Some(url);
        }
    }

    /// Resolve into validated [`Settings`], failing when no API key is
    /// configured anywhere.
    pub fn into_settings(self) -> Result<Settings> {
        let api_key = self.api_key.filter(|key| !key.trim().is_empty()).ok_or_else(|| {
            let path = Self::config_file_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "the config file".to_string());

            anyhow!(
                "No API key configured.\n\
                 Hint: set the {API_KEY_ENV} environment variable (a .env file works too),\n\
                 or add `api_key = \"...\"` to {path}."
            )
        })?;

        let base_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Settings { api_key, base_url })
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-cli", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn into_settings_errors_without_api_key() {
        let cfg = Config::default();
        let err = cfg.into_settings().unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains(API_KEY_ENV));
    }

    #[test]
    fn into_settings_rejects_blank_api_key() {
        let cfg = Config { api_key: Some("   ".into()), base_url: None };
        assert!(cfg.into_settings().is_err());
    }

    #[test]
    fn into_settings_applies_default_base_url() {
        let cfg = Config { api_key: Some("KEY".into()), base_url: None };
        let settings = cfg.into_settings().expect("api key is present");

        assert_eq!(settings.api_key, "KEY");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn environment_overlay_wins_over_file_values() {
        let mut cfg = Config {
            api_key: Some("FILE_KEY".into()),
            base_url: Some("https://file.example/data/2.5".into()),
        };

        cfg.overlay(Some("ENV_KEY".into()), None);

        let settings = cfg.into_settings().expect("api key is present");
        assert_eq!(settings.api_key, "ENV_KEY");
        assert_eq!(settings.base_url, "https://file.example/data/2.5");
    }

    #[test]
    fn load_from_path_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "api_key = \"TOML_KEY\"").expect("write temp config");

        let cfg = Config::load_from_path(file.path()).expect("config must parse");
        assert_eq!(cfg.api_key.as_deref(), Some("TOML_KEY"));
        assert_eq!(cfg.base_url, None);
    }

    #[test]
    fn load_from_path_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "api_key = [not toml").expect("write temp config");

        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
