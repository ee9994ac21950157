//! Core library for the `clima` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather and text-generation provider abstractions and their HTTP clients
//! - Advice generation with a guaranteed fallback
//! - The query-cycle orchestration (`Session`)
//!
//! It is used by `clima-cli`, but any other front end can drive a `Session`
//! through its own `SearchView`.

pub mod advice;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod session;

pub use advice::Advisor;
pub use config::{AdviceConfig, Config, ProviderConfig, WeatherConfig};
pub use error::{QueryError, WeatherError};
pub use model::{ADVICE_FALLBACK, Advice, Query, WeatherResult};
pub use provider::{ServiceId, TextGenerator, WeatherProvider};
pub use session::{SearchView, Session, session_from_config};
