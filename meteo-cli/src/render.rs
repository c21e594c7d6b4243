use std::fmt::Write;

use meteo_core::{
    CitySuggestion, CurrentConditions, ForecastSeries, Units,
    display::{celsius_to_fahrenheit, format_date, format_time, visibility_km, wind_direction},
};

const KMH_TO_MPH: f64 = 0.621_371;

fn temp(celsius: f64, units: Units) -> String {
    match units {
        Units::Metric => format!("{:.0}°C", celsius),
        Units::Imperial => format!("{:.0}°F", celsius_to_fahrenheit(celsius)),
    }
}

fn speed(kmh: f64, units: Units) -> String {
    match units {
        Units::Metric => format!("{:.0} km/h", kmh),
        Units::Imperial => format!("{:.0} mph", kmh * KMH_TO_MPH),
    }
}

pub fn suggestion_label(city: &CitySuggestion) -> String {
    if city.country.is_empty() {
        city.name.clone()
    } else {
        format!("{}, {}", city.name, city.country)
    }
}

pub fn current(c: &CurrentConditions, units: Units) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}, {} ({})",
        c.location.name,
        c.location.country,
        format_date(c.observed_at)
    );
    let _ = writeln!(
        out,
        "  {}  {} [{}]",
        temp(c.temperature_c, units),
        c.condition.condition,
        c.condition.icon
    );
    let _ = writeln!(
        out,
        "  Feels like {}  Low {}  High {}",
        temp(c.feels_like_c, units),
        temp(c.temp_min_c, units),
        temp(c.temp_max_c, units)
    );
    let _ = writeln!(
        out,
        "  Humidity {}%  Pressure {:.0} hPa  Visibility {}",
        c.humidity_pct,
        c.pressure_hpa,
        visibility_km(c.visibility_m)
    );
    let _ = writeln!(
        out,
        "  Wind {} {}",
        speed(c.wind_speed_kmh, units),
        wind_direction(c.wind_direction_deg)
    );
    let _ = writeln!(
        out,
        "  Sunrise {} UTC  Sunset {} UTC",
        format_time(c.sunrise),
        format_time(c.sunset)
    );

    out
}

pub fn forecast(f: &ForecastSeries, units: Units) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Forecast for {}, {}", f.location.name, f.location.country);
    if f.entries.is_empty() {
        let _ = writeln!(out, "  (no forecast data)");
    }
    for day in &f.entries {
        let _ = writeln!(
            out,
            "  {:<11} {:>6} ({} / {})  {:<13} {}%",
            format_date(day.timestamp),
            temp(day.temperature_c, units),
            temp(day.temp_min_c, units),
            temp(day.temp_max_c, units),
            day.condition.condition.as_str(),
            day.humidity_pct
        );
    }

    out
}

pub fn suggestions(found: &[CitySuggestion]) -> String {
    if found.is_empty() {
        return "No matching cities.\n".to_string();
    }

    found
        .iter()
        .map(|c| format!("{}\n", suggestion_label(c)))
        .collect()
}
