use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::WeatherError,
    model::{CitySuggestion, CurrentConditions, ForecastSeries, LocationRef},
};

pub mod open_meteo;

pub use open_meteo::OpenMeteo;

/// Resolves free-text city names.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Best single match for `query`. Fails with `NotFound` when there is none.
    async fn resolve(&self, query: &str) -> Result<LocationRef, WeatherError>;

    /// Autocomplete candidates; an empty list when nothing matches.
    async fn search(&self, query: &str) -> Result<Vec<CitySuggestion>, WeatherError>;
}

/// Fetches weather for an already resolved location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, location: &LocationRef)
    -> Result<CurrentConditions, WeatherError>;

    async fn fetch_forecast(&self, location: &LocationRef) -> Result<ForecastSeries, WeatherError>;
}
