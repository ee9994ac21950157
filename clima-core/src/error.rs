use thiserror::Error;

/// Failure of the weather lookup. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Ciudad no encontrada. Por favor, verifica el nombre.")]
    CityNotFound,

    /// Any non-404 failure: other statuses, transport errors, undecodable bodies.
    #[error("Error al obtener datos del clima.")]
    Service { reason: String },
}

impl WeatherError {
    pub fn service(reason: impl Into<String>) -> Self {
        WeatherError::Service {
            reason: reason.into(),
        }
    }

    /// Technical detail for logs; the user only sees `Display`.
    pub fn reason(&self) -> &str {
        match self {
            WeatherError::CityNotFound => "provider returned 404",
            WeatherError::Service { reason } => reason,
        }
    }
}

/// The request URL carries the API key, so it is stripped from the reason.
impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::service(err.without_url().to_string())
    }
}

/// Failure of a whole query cycle.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Por favor, ingresa una ciudad. No se permiten números ni caracteres especiales")]
    EmptyCity,

    #[error(transparent)]
    Weather(#[from] WeatherError),
}
