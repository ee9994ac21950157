use clima_core::{Advice, SearchView, WeatherResult};

/// Human-readable rendering of a query cycle on the terminal.
#[derive(Debug, Default)]
pub struct TerminalView;

impl SearchView for TerminalView {
    fn show_weather(&mut self, weather: &WeatherResult) {
        println!();
        println!("{}", summary(weather));
    }

    fn show_advice(&mut self, advice: &Advice) {
        println!("{}", advice_line(advice));
        println!();
    }

    fn alert(&mut self, message: &str) {
        eprintln!("! {message}");
    }
}

/// Collects the outcome instead of printing, for `show --json`.
#[derive(Debug, Default)]
pub struct JsonView {
    pub weather: Option<WeatherResult>,
    pub advice: Option<Advice>,
}

impl JsonView {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "weather": self.weather,
            "advice": self.advice.as_ref().map(Advice::text),
        })
    }
}

impl SearchView for JsonView {
    fn cleared(&mut self) {
        self.weather = None;
        self.advice = None;
    }

    fn show_weather(&mut self, weather: &WeatherResult) {
        self.weather = Some(weather.clone());
    }

    fn show_advice(&mut self, advice: &Advice) {
        self.advice = Some(advice.clone());
    }

    fn alert(&mut self, message: &str) {
        eprintln!("! {message}");
    }
}

fn summary(weather: &WeatherResult) -> String {
    [
        format!("{}, {}", weather.city, weather.country),
        format!("  Temperatura: {} °C", weather.temperature_c),
        format!("  Temperatura máxima: {} °C", weather.temp_max_c),
        format!("  Temperatura mínima: {} °C", weather.temp_min_c),
        format!("  Clima: {}", weather.description),
    ]
    .join("\n")
}

fn advice_line(advice: &Advice) -> String {
    format!("Consejo inteligente: {advice}")
}
