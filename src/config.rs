//src/config.rs
use comfy_table::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_CONFIG_DIR: &str = "gym-tracker";
const CONFIG_ENV_VAR: &str = "GYM_TRACKER_CONFIG_DIR"; // Environment variable name
const API_URL_ENV_VAR: &str = "GYM_TRACKER_API_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine configuration directory.")]
    CannotDetermineConfigDir,
    #[error("I/O error accessing config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file (TOML): {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Failed to serialize config data (TOML): {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Invalid color name: {0}")]
    InvalidColor(String),
    #[error("Request timeout must be at least one second.")]
    InvalidTimeout,
}

// Define standard colors using strum for easy iteration/parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum StandardColor {
    Black, Red, Green, Yellow, Blue, Magenta, Cyan, White,
    DarkGrey, DarkRed, DarkGreen, DarkYellow, DarkBlue, DarkMagenta, DarkCyan, Grey,
}

impl From<StandardColor> for Color {
    fn from(value: StandardColor) -> Self {
        match value {
            StandardColor::Black => Color::Black, StandardColor::Red => Color::Red,
            StandardColor::Green => Color::Green, StandardColor::Yellow => Color::Yellow,
            StandardColor::Blue => Color::Blue, StandardColor::Magenta => Color::Magenta,
            StandardColor::Cyan => Color::Cyan, StandardColor::White => Color::White,
            StandardColor::DarkGrey => Color::DarkGrey, StandardColor::DarkRed => Color::DarkRed,
            StandardColor::DarkGreen => Color::DarkGreen, StandardColor::DarkYellow => Color::DarkYellow,
            StandardColor::DarkBlue => Color::DarkBlue, StandardColor::DarkMagenta => Color::DarkMagenta,
            StandardColor::DarkCyan => Color::DarkCyan, StandardColor::Grey => Color::Grey,
        }
    }
}

pub fn parse_color(color_str: &str) -> Result<StandardColor, ConfigError> {
    StandardColor::iter()
        .find(|color| format!("{:?}", color).eq_ignore_ascii_case(color_str.trim()))
        .ok_or_else(|| ConfigError::InvalidColor(color_str.to_string()))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeConfig {
    pub header_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig { header_color: "Green".to_string() }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)] // Missing sections fall back to defaults
pub struct Config {
    pub api: ApiConfig,
    pub theme: ThemeConfig,
}

impl Config {
    /// Backend URL, with `GYM_TRACKER_API_URL` taking precedence over the file.
    pub fn resolve_base_url(&self) -> String {
        pick_base_url(std::env::var(API_URL_ENV_VAR).ok(), &self.api.base_url)
    }

    pub fn request_timeout(&self) -> Result<Duration, ConfigError> {
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(Duration::from_secs(self.api.timeout_secs))
    }

    pub fn header_color(&self) -> Result<Color, ConfigError> {
        parse_color(&self.theme.header_color).map(Color::from)
    }
}

// A blank override counts as unset.
fn pick_base_url(env_url: Option<String>, configured: &str) -> String {
    env_url
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| configured.to_string())
}

/// Determines the path to the configuration file, creating its directory.
pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    config_path_in(std::env::var(CONFIG_ENV_VAR).ok())
}

fn config_path_in(dir_override: Option<String>) -> Result<PathBuf, ConfigError> {
    let config_dir_path = match dir_override {
        Some(path_str) => PathBuf::from(path_str),
        None => {
            let base_config_dir = dirs::config_dir().ok_or(ConfigError::CannotDetermineConfigDir)?;
            base_config_dir.join(APP_CONFIG_DIR)
        }
    };

    if !config_dir_path.exists() {
        fs::create_dir_all(&config_dir_path)?;
    }

    Ok(config_dir_path.join(CONFIG_FILE_NAME))
}

/// Loads the configuration, writing a default file first if none exists.
pub fn load(config_path: &Path) -> Result<Config, ConfigError> {
    if !config_path.exists() {
        let default_config = Config::default();
        save(config_path, &default_config)?;
        return Ok(default_config);
    }
    let config_content = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&config_content)?;
    Ok(config)
}

pub fn save(config_path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent_dir) = config_path.parent() {
        if !parent_dir.exists() {
            fs::create_dir_all(parent_dir)?;
        }
    }
    let config_content = toml::to_string_pretty(config)?;
    fs::write(config_path, config_content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = load(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
        assert_eq!(config.api.base_url, "http://localhost:8080");
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[api]\nbase_url = \"http://gym.local:9000\"\n").unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.api.base_url, "http://gym.local:9000");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.theme, ThemeConfig::default());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut config = Config::default();
        config.theme.header_color = "cyan".into();
        config.api.timeout_secs = 3;

        save(&path, &config).unwrap();
        assert_eq!(load(&path).unwrap(), config);
    }

    #[test]
    fn broken_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "api = [").unwrap();
        assert!(matches!(load(&path), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn colors_parse_case_insensitively() {
        assert_eq!(parse_color("darkblue").unwrap(), StandardColor::DarkBlue);
        assert!(matches!(
            parse_color("chartreuse"),
            Err(ConfigError::InvalidColor(_))
        ));
        assert_eq!(Config::default().header_color().unwrap(), Color::Green);
    }

    #[test]
    fn api_url_env_var_overrides_configured_url() {
        assert_eq!(
            pick_base_url(Some("http://gym.remote:9000".into()), "http://localhost:8080"),
            "http://gym.remote:9000"
        );
    }

    #[test]
    fn blank_api_url_env_var_falls_back_to_file() {
        assert_eq!(
            pick_base_url(Some("   ".into()), "http://localhost:8080"),
            "http://localhost:8080"
        );
    }

    #[test]
    fn unset_api_url_env_var_uses_configured_url() {
        assert_eq!(pick_base_url(None, "http://gym.local"), "http://gym.local");
    }

    #[test]
    fn config_dir_override_is_created_and_used() {
        let dir = tempfile::tempdir().unwrap();
        let override_dir = dir.path().join("custom");

        let path = config_path_in(Some(override_dir.to_string_lossy().into_owned())).unwrap();
        assert_eq!(path, override_dir.join(CONFIG_FILE_NAME));
        assert!(override_dir.is_dir());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(matches!(
            config.request_timeout(),
            Err(ConfigError::InvalidTimeout)
        ));
    }
}
