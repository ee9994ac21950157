use crate::{
    Config, Query, WeatherResult,
    error::WeatherError,
    provider::{gemini::GeminiProvider, openweather::OpenWeatherProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod gemini;
pub mod openweather;

/// The two external services the app talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    OpenWeather,
    Gemini,
}

impl ServiceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::OpenWeather => "openweather",
            ServiceId::Gemini => "gemini",
        }
    }

    pub const fn all() -> &'static [ServiceId] {
        &[ServiceId::OpenWeather, ServiceId::Gemini]
    }

    /// Environment variable that overrides the configured key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ServiceId::OpenWeather => "OPEN_WEATHER_KEY",
            ServiceId::Gemini => "GEMINI_KEY",
        }
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ServiceId::OpenWeather),
            "gemini" => Ok(ServiceId::Gemini),
            _ => Err(anyhow::anyhow!(
                "Unknown service '{value}'. Supported services: openweather, gemini."
            )),
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, query: &Query) -> Result<WeatherResult, WeatherError>;
}

/// Single-prompt text completion. Errors are returned as-is; callers decide
/// whether they are fatal.
#[async_trait]
pub trait TextGenerator: Send + Sync + Debug {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Missing keys are not an error here: the provider call itself fails later.
fn api_key_or_empty(config: &Config, id: ServiceId) -> String {
    match config.provider_api_key(id) {
        Some(key) => key.to_owned(),
        None => {
            tracing::warn!(
                service = %id,
                "no API key configured; run `clima configure {id}` or set {}",
                id.api_key_env()
            );
            String::new()
        }
    }
}

pub fn weather_provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let api_key = api_key_or_empty(config, ServiceId::OpenWeather);
    Box::new(
        OpenWeatherProvider::new(api_key)
            .with_base_url(&config.weather.base_url)
            .with_units(&config.weather.units)
            .with_lang(&config.weather.lang),
    )
}

pub fn text_generator_from_config(config: &Config) -> Box<dyn TextGenerator> {
    let api_key = api_key_or_empty(config, ServiceId::Gemini);
    Box::new(
        GeminiProvider::new(api_key, &config.advice.model)
            .with_base_url(&config.advice.base_url),
    )
}
