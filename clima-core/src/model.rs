use serde::Serialize;

use crate::error::QueryError;

/// Text shown in place of advice when the generative provider fails.
pub const ADVICE_FALLBACK: &str = "No se pudo generar el consejo.";

/// A validated city name, the only input of a query cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    city: String,
}

impl Query {
    /// Only emptiness is checked; any other text is passed to the provider as typed.
    pub fn new(city: &str) -> Result<Self, QueryError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(QueryError::EmptyCity);
        }

        Ok(Self {
            city: city.to_string(),
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Current conditions for one city, in Celsius.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherResult {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advice {
    Generated(String),
    Fallback,
}

impl Advice {
    pub fn text(&self) -> &str {
        match self {
            Advice::Generated(text) => text,
            Advice::Fallback => ADVICE_FALLBACK,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Advice::Fallback)
    }
}

impl std::fmt::Display for Advice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}
