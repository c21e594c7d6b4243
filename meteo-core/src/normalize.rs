//! Raw Open-Meteo payloads and their conversion into the domain model.
//!
//! Every field is optional at the serde layer; presence is checked here so a
//! truncated or reshaped payload becomes [`WeatherError::Upstream`] instead of
//! a panic or a silently zeroed reading.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::{
    condition::{Condition, icon_for, legacy_descriptor_id},
    error::WeatherError,
    model::{
        CitySuggestion, ConditionDescriptor, CurrentConditions, ForecastEntry, ForecastSeries,
        LocationRef,
    },
};

/// Entries kept from the daily block.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Entries kept from a city search.
pub const MAX_SUGGESTIONS: usize = 5;

/// Used when the provider omits visibility.
pub const DEFAULT_VISIBILITY_M: f64 = 10_000.0;

#[derive(Debug, Default, Deserialize)]
pub struct RawGeocodeResponse {
    pub results: Option<Vec<RawGeocodeResult>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawGeocodeResult {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub admin1: Option<String>,
    pub admin2: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawForecastResponse {
    pub utc_offset_seconds: Option<i64>,
    pub current: Option<RawCurrent>,
    pub daily: Option<RawDaily>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawCurrent {
    pub time: Option<String>,
    pub temperature_2m: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub is_day: Option<i64>,
    pub weather_code: Option<i64>,
    pub surface_pressure: Option<f64>,
    pub wind_speed_10m: Option<f64>,
    pub wind_direction_10m: Option<f64>,
    pub visibility: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawDaily {
    pub time: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub weather_code: Vec<Option<i64>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub apparent_temperature_max: Vec<Option<f64>>,
    #[serde(default)]
    pub apparent_temperature_min: Vec<Option<f64>>,
    #[serde(default)]
    pub sunrise: Vec<Option<String>>,
    #[serde(default)]
    pub sunset: Vec<Option<String>>,
    #[serde(default)]
    pub relative_humidity_2m_max: Vec<Option<f64>>,
}

/// Decode a JSON body, reporting shape errors as upstream failures.
pub fn decode<T: for<'de> Deserialize<'de>>(body: &str, what: &str) -> Result<T, WeatherError> {
    serde_json::from_str(body)
        .map_err(|e| WeatherError::upstream(format!("failed to parse {what} JSON: {e}")))
}

/// First geocoding hit as a [`LocationRef`].
pub fn location_from_geocode(
    raw: RawGeocodeResponse,
    query: &str,
) -> Result<LocationRef, WeatherError> {
    let first = raw
        .results
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| WeatherError::NotFound(query.to_string()))?;

    let name = first.name.ok_or_else(|| WeatherError::missing("results[0].name"))?;
    let latitude = first.latitude.ok_or_else(|| WeatherError::missing("results[0].latitude"))?;
    let longitude = first.longitude.ok_or_else(|| WeatherError::missing("results[0].longitude"))?;
    let country = first
        .country
        .or(first.country_code)
        .ok_or_else(|| WeatherError::missing("results[0].country"))?;

    Ok(LocationRef { name, country, latitude, longitude })
}

/// Up to [`MAX_SUGGESTIONS`] named candidates. A missing `results` array is
/// an empty list, not an error.
pub fn suggestions_from_geocode(raw: RawGeocodeResponse) -> Vec<CitySuggestion> {
    raw.results
        .unwrap_or_default()
        .into_iter()
        .filter_map(|r| {
            let name = r.name?;
            let country = r.country.or(r.country_code).unwrap_or_default();
            Some(CitySuggestion { name, country })
        })
        .take(MAX_SUGGESTIONS)
        .collect()
}

pub fn normalize_current(
    raw: RawForecastResponse,
    location: &LocationRef,
) -> Result<CurrentConditions, WeatherError> {
    let offset = required(raw.utc_offset_seconds, "utc_offset_seconds")?;
    let current = raw.current.ok_or_else(|| WeatherError::missing("current"))?;
    let daily = raw.daily.ok_or_else(|| WeatherError::missing("daily"))?;

    let code = required(current.weather_code, "current.weather_code")?;
    let is_day = required(current.is_day, "current.is_day")? != 0;
    let observed = required(current.time.as_deref(), "current.time")?;

    let condition = ConditionDescriptor::new(
        legacy_descriptor_id(code),
        Condition::from_code(code),
        icon_for(code, is_day),
    );

    Ok(CurrentConditions {
        location: location.clone(),
        temperature_c: required(current.temperature_2m, "current.temperature_2m")?,
        feels_like_c: required(current.apparent_temperature, "current.apparent_temperature")?,
        temp_min_c: *daily_at(&daily.temperature_2m_min, 0, "temperature_2m_min")?,
        temp_max_c: *daily_at(&daily.temperature_2m_max, 0, "temperature_2m_max")?,
        humidity_pct: percent(required(
            current.relative_humidity_2m,
            "current.relative_humidity_2m",
        )?),
        pressure_hpa: required(current.surface_pressure, "current.surface_pressure")?,
        wind_speed_kmh: required(current.wind_speed_10m, "current.wind_speed_10m")?,
        wind_direction_deg: required(current.wind_direction_10m, "current.wind_direction_10m")?,
        visibility_m: current.visibility.unwrap_or(DEFAULT_VISIBILITY_M),
        observed_at: local_to_epoch(observed, offset)?,
        sunrise: local_to_epoch(daily_at(&daily.sunrise, 0, "sunrise")?, offset)?,
        sunset: local_to_epoch(daily_at(&daily.sunset, 0, "sunset")?, offset)?,
        condition,
    })
}

pub fn normalize_forecast(
    raw: RawForecastResponse,
    location: &LocationRef,
) -> Result<ForecastSeries, WeatherError> {
    let daily = raw.daily.ok_or_else(|| WeatherError::missing("daily"))?;
    let time = required(daily.time.as_deref(), "daily.time")?;
    let days = time.len().min(MAX_FORECAST_DAYS);

    let entries = (0..days)
        .map(|i| forecast_entry(&daily, time, i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ForecastSeries { location: location.clone(), entries })
}

fn forecast_entry(
    daily: &RawDaily,
    time: &[Option<String>],
    i: usize,
) -> Result<ForecastEntry, WeatherError> {
    let date = daily_at(time, i, "time")?;
    let code = *daily_at(&daily.weather_code, i, "weather_code")?;
    let temp_min = *daily_at(&daily.temperature_2m_min, i, "temperature_2m_min")?;
    let temp_max = *daily_at(&daily.temperature_2m_max, i, "temperature_2m_max")?;
    let feels_min = *daily_at(&daily.apparent_temperature_min, i, "apparent_temperature_min")?;
    let feels_max = *daily_at(&daily.apparent_temperature_max, i, "apparent_temperature_max")?;
    let humidity = *daily_at(&daily.relative_humidity_2m_max, i, "relative_humidity_2m_max")?;

    let (timestamp, timestamp_text) = day_start(date)?;

    // Forecast ids carry the raw code, unlike current conditions.
    let condition =
        ConditionDescriptor::new(code, Condition::from_code(code), icon_for(code, true));

    Ok(ForecastEntry {
        timestamp,
        timestamp_text,
        temperature_c: (temp_min + temp_max) / 2.0,
        feels_like_c: (feels_min + feels_max) / 2.0,
        temp_min_c: temp_min,
        temp_max_c: temp_max,
        humidity_pct: percent(humidity),
        condition,
    })
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, WeatherError> {
    value.ok_or_else(|| WeatherError::missing(field))
}

fn daily_at<'a, T>(values: &'a [Option<T>], i: usize, field: &str) -> Result<&'a T, WeatherError> {
    values
        .get(i)
        .and_then(Option::as_ref)
        .ok_or_else(|| WeatherError::missing(&format!("daily.{field}[{i}]")))
}

fn percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Provider-local `YYYY-MM-DDTHH:MM[:SS]` to epoch seconds.
fn local_to_epoch(text: &str, utc_offset_seconds: i64) -> Result<i64, WeatherError> {
    let local = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| WeatherError::upstream(format!("invalid timestamp '{text}': {e}")))?;

    Ok(local.and_utc().timestamp() - utc_offset_seconds)
}

/// Calendar date to midnight UTC, as epoch seconds and ISO-8601 text.
fn day_start(text: &str) -> Result<(i64, String), WeatherError> {
    let start = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| WeatherError::upstream(format!("invalid date '{text}'")))?
        .and_utc();

    Ok((start.timestamp(), start.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()))
}
