use serde::{Deserialize, Serialize};

use crate::condition::Condition;

/// Canonical location resolved from a free-text city query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRef {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Autocomplete candidate returned by city search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySuggestion {
    pub name: String,
    pub country: String,
}

/// Classified weather code attached to every reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionDescriptor {
    pub id: i64,
    pub condition: Condition,
    pub description: String,
    pub icon: String,
}

impl ConditionDescriptor {
    pub fn new(id: i64, condition: Condition, icon: String) -> Self {
        Self {
            id,
            condition,
            description: condition.as_str().to_lowercase(),
            icon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location: LocationRef,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction_deg: f64,
    pub visibility_m: f64,
    /// Epoch seconds.
    pub observed_at: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub condition: ConditionDescriptor,
}

/// One day of the multi-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Epoch seconds of the day's start (UTC).
    pub timestamp: i64,
    /// ISO-8601 rendering of `timestamp`.
    pub timestamp_text: String,
    /// Midpoint of the day's min and max.
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: u8,
    pub condition: ConditionDescriptor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub location: LocationRef,
    pub entries: Vec<ForecastEntry>,
}

/// Current conditions and forecast for one location, fetched together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub current: CurrentConditions,
    pub forecast: ForecastSeries,
}
