//! One query cycle: validate, clear, look up weather, then generate advice.
//!
//! `Session::search` borrows the session mutably for the whole cycle, so two
//! searches can never interleave on the same session.

use crate::{
    Config,
    advice::Advisor,
    error::QueryError,
    model::{Advice, Query, WeatherResult},
    provider::{
        TextGenerator, WeatherProvider, text_generator_from_config, weather_provider_from_config,
    },
};

/// Rendering side of a session. Every state change is pushed here in order.
pub trait SearchView {
    /// Previous weather and advice were discarded.
    fn cleared(&mut self) {}

    fn show_weather(&mut self, weather: &WeatherResult);

    fn show_advice(&mut self, advice: &Advice);

    /// Blocking, user-visible notification.
    fn alert(&mut self, message: &str);
}

#[derive(Debug)]
pub struct Session {
    provider: Box<dyn WeatherProvider>,
    advisor: Advisor,
    weather: Option<WeatherResult>,
    advice: Option<Advice>,
}

impl Session {
    pub fn new(provider: Box<dyn WeatherProvider>, generator: Box<dyn TextGenerator>) -> Self {
        Self {
            provider,
            advisor: Advisor::new(generator),
            weather: None,
            advice: None,
        }
    }

    pub fn weather(&self) -> Option<&WeatherResult> {
        self.weather.as_ref()
    }

    /// Only ever `Some` while `weather()` is `Some`.
    pub fn advice(&self) -> Option<&Advice> {
        self.advice.as_ref()
    }

    fn clear<V: SearchView + ?Sized>(&mut self, view: &mut V) {
        self.weather = None;
        self.advice = None;
        view.cleared();
    }

    fn set_weather<V: SearchView + ?Sized>(&mut self, weather: WeatherResult, view: &mut V) {
        view.show_weather(&weather);
        self.weather = Some(weather);
    }

    fn set_advice<V: SearchView + ?Sized>(&mut self, advice: Advice, view: &mut V) {
        if self.weather.is_none() {
            return;
        }
        view.show_advice(&advice);
        self.advice = Some(advice);
    }

    pub async fn search<V: SearchView + ?Sized>(
        &mut self,
        city: &str,
        view: &mut V,
    ) -> Result<(), QueryError> {
        let query = match Query::new(city) {
            Ok(query) => query,
            Err(err) => {
                view.alert(&err.to_string());
                return Err(err);
            }
        };

        self.clear(view);

        let weather = match self.provider.current_weather(&query).await {
            Ok(weather) => weather,
            Err(err) => {
                tracing::info!(
                    city = %query.city(),
                    reason = %err.reason(),
                    "weather lookup failed"
                );
                view.alert(&err.to_string());
                return Err(err.into());
            }
        };

        let description = weather.description.clone();
        self.set_weather(weather, view);

        let advice = self.advisor.advise(&description).await;
        self.set_advice(advice, view);

        Ok(())
    }
}

/// Session wired to the real HTTP providers.
pub fn session_from_config(config: &Config) -> Session {
    Session::new(
        weather_provider_from_config(config),
        text_generator_from_config(config),
    )
}
