use thiserror::Error;

/// Failures surfaced by geocoding, fetching and normalization.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WeatherError {
    /// The geocoder returned no candidate for the query.
    #[error("City not found: '{0}'")]
    NotFound(String),

    /// Transport failure or non-2xx response.
    #[error("Network error: {0}")]
    Network(String),

    /// 2xx response whose body is missing or mangles expected fields.
    #[error("Unexpected response from weather provider: {0}")]
    Upstream(String),
}

impl WeatherError {
    pub fn upstream(msg: impl Into<String>) -> Self {
        WeatherError::Upstream(msg.into())
    }

    pub fn missing(field: &str) -> Self {
        WeatherError::Upstream(format!("missing field `{field}`"))
    }
}
