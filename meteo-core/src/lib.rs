//! Core library for the `meteo` weather lookup CLI.
//!
//! This crate defines:
//! - The weather-code taxonomy (conditions, icon tokens, legacy ids)
//! - Validation and normalization of Open-Meteo payloads
//! - Geocoder / weather provider abstractions and the Open-Meteo client
//! - The orchestration service front ends call into
//! - Configuration handling
//!
//! It is used by `meteo-cli`, but can also be reused by other binaries or services.

pub mod condition;
pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod service;

pub use condition::{Condition, icon_for, legacy_descriptor_id};
pub use config::{Config, Units};
pub use error::WeatherError;
pub use model::{
    CitySuggestion, ConditionDescriptor, CurrentConditions, Dashboard, ForecastEntry,
    ForecastSeries, LocationRef,
};
pub use provider::{Geocoder, OpenMeteo, WeatherProvider};
pub use service::{WeatherService, service_from_config};
