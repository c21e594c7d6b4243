//! Small formatting helpers shared by front ends.

use chrono::DateTime;

const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Eight-point compass label for a bearing in degrees.
pub fn wind_direction(degrees: f64) -> &'static str {
    let normalized = degrees.rem_euclid(360.0);
    let index = (normalized / 45.0).round() as usize % COMPASS.len();
    COMPASS[index]
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// `"Sat, Jun 1"`; empty for timestamps chrono cannot represent.
pub fn format_date(epoch: i64) -> String {
    DateTime::from_timestamp(epoch, 0)
        .map(|dt| dt.format("%a, %b %-d").to_string())
        .unwrap_or_default()
}

/// `"07:45 AM"` in UTC.
pub fn format_time(epoch: i64) -> String {
    DateTime::from_timestamp(epoch, 0)
        .map(|dt| dt.format("%I:%M %p").to_string())
        .unwrap_or_default()
}

pub fn visibility_km(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compass_points() {
        assert_eq!(wind_direction(0.0), "N");
        assert_eq!(wind_direction(22.0), "N");
        assert_eq!(wind_direction(23.0), "NE");
        assert_eq!(wind_direction(180.0), "S");
        assert_eq!(wind_direction(230.0), "SW");
        assert_eq!(wind_direction(350.0), "N");
        assert_eq!(wind_direction(360.0), "N");
        assert_eq!(wind_direction(-90.0), "W");
    }

    #[test]
    fn fahrenheit() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
    }

    #[test]
    fn dates_and_times() {
        // 2024-06-01T03:46:00Z
        assert_eq!(format_date(1_717_213_560), "Sat, Jun 1");
        assert_eq!(format_time(1_717_213_560), "03:46 AM");
        assert_eq!(format_time(1_717_272_660), "08:11 PM");
    }

    #[test]
    fn visibility() {
        assert_eq!(visibility_km(10_000.0), "10.0 km");
        assert_eq!(visibility_km(24_140.0), "24.1 km");
    }
}
