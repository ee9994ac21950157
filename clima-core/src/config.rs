use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::{Path, PathBuf}};

use crate::provider::{ServiceId, gemini, openweather};

/// Environment variable overriding `advice.model`.
pub const MODEL_ENV: &str = "CLIMA_GEMINI_MODEL";

/// Credentials for a single service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Request parameters for the weather lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub units: String,
    pub lang: String,
    pub base_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            units: "metric".to_string(),
            lang: "es".to_string(),
            base_url: openweather::DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceConfig {
    pub model: String,
    pub base_url: String,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            model: gemini::DEFAULT_MODEL.to_string(),
            base_url: gemini::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Example TOML:
    /// [providers.openweather]
    /// api_key = "..."
    pub providers: HashMap<String, ProviderConfig>,

    pub weather: WeatherConfig,

    pub advice: AdviceConfig,
}

impl Config {
    /// Load config from disk and apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_overrides(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Read a config file, or return an empty default if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "clima", "clima")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Non-empty values from `lookup` win over the file.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        for id in ServiceId::all() {
            if let Some(key) = present(id.api_key_env()) {
                self.upsert_provider_api_key(*id, key);
            }
        }

        if let Some(model) = present(MODEL_ENV) {
            self.advice.model = model;
        }
    }

    /// Set or replace the API key of a service.
    pub fn upsert_provider_api_key(&mut self, id: ServiceId, api_key: String) {
        self.providers.insert(id.as_str().to_string(), ProviderConfig { api_key });
    }

    /// Returns the API key for a service, if present.
    pub fn provider_api_key(&self, id: ServiceId) -> Option<&str> {
        self.providers
            .get(id.as_str())
            .map(|cfg| cfg.api_key.as_str())
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_match_original_request_parameters() {
        let cfg = Config::default();
        assert_eq!(cfg.weather.units, "metric");
        assert_eq!(cfg.weather.lang, "es");
        assert_eq!(cfg.advice.model, "gemini-1.5-flash-latest");
        assert_eq!(cfg.weather.base_url, "https://api.openweathermap.org");
        assert_eq!(cfg.advice.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(cfg.provider_api_key(ServiceId::OpenWeather), None);
    }

    #[test]
    fn set_api_key_for_service() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(ServiceId::OpenWeather, "OPEN_KEY".into());

        assert_eq!(cfg.provider_api_key(ServiceId::OpenWeather), Some("OPEN_KEY"));
        assert_eq!(cfg.provider_api_key(ServiceId::Gemini), None);
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ServiceId::Gemini, String::new());
        assert_eq!(cfg.provider_api_key(ServiceId::Gemini), None);
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [providers.gemini]
            api_key = "G"

            [weather]
            lang = "en"
            "#,
        )
        .expect("valid toml");

        assert_eq!(cfg.provider_api_key(ServiceId::Gemini), Some("G"));
        assert_eq!(cfg.weather.lang, "en");
        assert_eq!(cfg.weather.units, "metric");
        assert_eq!(cfg.advice.model, gemini::DEFAULT_MODEL);
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ServiceId::OpenWeather, "FROM_FILE".into());

        cfg.apply_overrides(env(&[
            ("OPEN_WEATHER_KEY", "FROM_ENV"),
            ("GEMINI_KEY", ""),
            ("CLIMA_GEMINI_MODEL", "gemini-2.0-flash"),
        ]));

        assert_eq!(cfg.provider_api_key(ServiceId::OpenWeather), Some("FROM_ENV"));
        assert_eq!(cfg.provider_api_key(ServiceId::Gemini), None);
        assert_eq!(cfg.advice.model, "gemini-2.0-flash");
    }

    #[test]
    fn save_and_load_from_path() {
        let dir = std::env::temp_dir()
            .join(format!("clima-config-test-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ServiceId::Gemini, "G".into());
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.provider_api_key(ServiceId::Gemini), Some("G"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir()
            .join("clima-definitely-missing")
            .join("config.toml");
        let cfg = Config::load_from(&path).expect("defaults");
        assert!(cfg.providers.is_empty());
    }
}
