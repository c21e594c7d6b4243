use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    Config,
    error::WeatherError,
    model::{CitySuggestion, CurrentConditions, ForecastSeries, LocationRef},
    normalize::{
        self, MAX_FORECAST_DAYS, MAX_SUGGESTIONS, RawForecastResponse, RawGeocodeResponse,
    },
};

use super::{Geocoder, WeatherProvider};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,\
precipitation,rain,weather_code,surface_pressure,wind_speed_10m,wind_direction_10m,visibility";

const CURRENT_DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,\
apparent_temperature_max,apparent_temperature_min,sunrise,sunset,uv_index_max,\
relative_humidity_2m_max";

const FORECAST_DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,\
apparent_temperature_max,apparent_temperature_min,sunrise,sunset,relative_humidity_2m_max";

/// Open-Meteo forecast and geocoding client. No API key is needed.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    http: Client,
    api_base_url: String,
    geo_base_url: String,
}

impl OpenMeteo {
    pub fn new(
        api_base_url: &str,
        geo_base_url: &str,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("meteo/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WeatherError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            geo_base_url: geo_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        Self::new(
            &config.api_base_url,
            &config.geo_base_url,
            Duration::from_secs(config.timeout_secs),
        )
    }

    async fn get_json<T>(
        &self,
        url: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T, WeatherError>
    where
        T: for<'de> Deserialize<'de>,
    {
        tracing::debug!(%url, ?query, "Open-Meteo {what} request");

        let res = self.http.get(url).query(query).send().await.map_err(|e| {
            WeatherError::Network(format!("Failed to send request to Open-Meteo ({what}): {e}"))
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::Network(format!("Failed to read Open-Meteo {what} response body: {e}"))
        })?;

        if !status.is_success() {
            tracing::warn!(%status, "Open-Meteo {what} request failed");
            return Err(WeatherError::Network(format!(
                "Open-Meteo {what} request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        normalize::decode(&body, what).inspect_err(|e| {
            tracing::warn!(error = %e, "Open-Meteo {what} payload rejected");
        })
    }

    async fn geocode(&self, name: &str, count: usize) -> Result<RawGeocodeResponse, WeatherError> {
        let url = format!("{}/search", self.geo_base_url);
        self.get_json(
            &url,
            &[("name", name.to_string()), ("count", count.to_string())],
            "geocoding",
        )
        .await
    }

    async fn forecast(
        &self,
        location: &LocationRef,
        current: bool,
    ) -> Result<RawForecastResponse, WeatherError> {
        let url = format!("{}/forecast", self.api_base_url);

        let mut query = vec![
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
        ];
        if current {
            query.push(("current", CURRENT_FIELDS.to_string()));
            query.push(("daily", CURRENT_DAILY_FIELDS.to_string()));
        } else {
            query.push(("daily", FORECAST_DAILY_FIELDS.to_string()));
        }
        query.push(("timezone", "auto".to_string()));
        let days = if current { 1 } else { MAX_FORECAST_DAYS };
        query.push(("forecast_days", days.to_string()));

        let what = if current { "current weather" } else { "forecast" };
        self.get_json(&url, &query, what).await
    }
}

#[async_trait]
impl Geocoder for OpenMeteo {
    async fn resolve(&self, query: &str) -> Result<LocationRef, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WeatherError::NotFound(String::new()));
        }

        let raw = self.geocode(query, 1).await?;
        let location = normalize::location_from_geocode(raw, query)?;

        tracing::info!(
            name = %location.name,
            country = %location.country,
            lat = location.latitude,
            lon = location.longitude,
            "Resolved '{query}'"
        );
        Ok(location)
    }

    async fn search(&self, query: &str) -> Result<Vec<CitySuggestion>, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let raw = self.geocode(query, MAX_SUGGESTIONS).await?;
        Ok(normalize::suggestions_from_geocode(raw))
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteo {
    async fn fetch_current(
        &self,
        location: &LocationRef,
    ) -> Result<CurrentConditions, WeatherError> {
        let raw = self.forecast(location, true).await?;
        normalize::normalize_current(raw, location)
    }

    async fn fetch_forecast(&self, location: &LocationRef) -> Result<ForecastSeries, WeatherError> {
        let raw = self.forecast(location, false).await?;
        normalize::normalize_forecast(raw, location)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
