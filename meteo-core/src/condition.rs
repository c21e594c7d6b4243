//! Weather-code taxonomy.
//!
//! The provider reports WMO-style integer codes. They are mapped here to a
//! coarse condition category, a legacy two-digit icon token and a legacy
//! numeric descriptor id. The three mappings use deliberately different
//! boundaries and must not be merged.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Condition {
    #[default]
    Clear,
    MainlyClear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
}

impl Condition {
    /// Classify a provider weather code. Anything outside 0..=99 is `Clear`.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Condition::Clear,
            1 => Condition::MainlyClear,
            2 => Condition::PartlyCloudy,
            3 => Condition::Cloudy,
            4..=49 => Condition::Fog,
            50..=59 => Condition::Drizzle,
            60..=69 => Condition::Rain,
            70..=79 => Condition::Snow,
            80..=99 => Condition::Thunderstorm,
            _ => Condition::Clear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Clear => "Clear",
            Condition::MainlyClear => "Mainly Clear",
            Condition::PartlyCloudy => "Partly Cloudy",
            Condition::Cloudy => "Cloudy",
            Condition::Fog => "Fog",
            Condition::Drizzle => "Drizzle",
            Condition::Rain => "Rain",
            Condition::Snow => "Snow",
            Condition::Thunderstorm => "Thunderstorm",
        }
    }

    pub const fn all() -> &'static [Condition] {
        &[
            Condition::Clear,
            Condition::MainlyClear,
            Condition::PartlyCloudy,
            Condition::Cloudy,
            Condition::Fog,
            Condition::Drizzle,
            Condition::Rain,
            Condition::Snow,
            Condition::Thunderstorm,
        ]
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Legacy icon token for a weather code, e.g. `"10d"`.
///
/// Out-of-range codes always yield `"01d"`, whatever `is_day` says.
pub fn icon_for(code: i64, is_day: bool) -> String {
    let suffix = if is_day { 'd' } else { 'n' };

    let number = match code {
        0 => "01",
        1 => "02",
        2 => "03",
        3 => "04",
        4..=49 => "50",
        50..=59 => "09",
        60..=69 => "10",
        70..=79 => "13",
        80..=99 => "11",
        _ => return "01d".to_string(),
    };

    format!("{number}{suffix}")
}

/// Legacy descriptor id used for current conditions.
///
/// Buckets follow an older provider's id families and do not line up with
/// [`Condition::from_code`]: code 61 classifies as `Rain` but lands in the
/// 600 family.
pub fn legacy_descriptor_id(code: i64) -> i64 {
    if code < 3 {
        800
    } else if code < 50 {
        700
    } else if code < 70 {
        600
    } else if code < 80 {
        300
    } else if code < 100 {
        500
    } else {
        800
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_covers_every_code_in_range() {
        for code in 0..=99 {
            let expected = match code {
                0 => Condition::Clear,
                1 => Condition::MainlyClear,
                2 => Condition::PartlyCloudy,
                3 => Condition::Cloudy,
                c if c <= 49 => Condition::Fog,
                c if c <= 59 => Condition::Drizzle,
                c if c <= 69 => Condition::Rain,
                c if c <= 79 => Condition::Snow,
                _ => Condition::Thunderstorm,
            };
            assert_eq!(Condition::from_code(code), expected, "code {code}");
        }
    }

    #[test]
    fn classify_falls_back_to_clear() {
        for code in [-1, -50, 100, 150, 999, i64::MAX, i64::MIN] {
            assert_eq!(Condition::from_code(code), Condition::Clear);
        }
    }

    #[test]
    fn condition_labels() {
        assert_eq!(Condition::MainlyClear.as_str(), "Mainly Clear");
        assert_eq!(Condition::PartlyCloudy.to_string(), "Partly Cloudy");
        assert_eq!(Condition::all().len(), 9);
    }

    #[test]
    fn icon_tokens_follow_ranges() {
        for code in 0..=99 {
            let number = match code {
                0 => "01".to_string(),
                c if c <= 3 => format!("0{}", 1 + c),
                c if c <= 49 => "50".to_string(),
                c if c <= 59 => "09".to_string(),
                c if c <= 69 => "10".to_string(),
                c if c <= 79 => "13".to_string(),
                _ => "11".to_string(),
            };
            assert_eq!(icon_for(code, true), format!("{number}d"), "code {code} day");
            assert_eq!(icon_for(code, false), format!("{number}n"), "code {code} night");
        }
    }

    #[test]
    fn icon_fallback_is_always_day() {
        assert_eq!(icon_for(150, true), "01d");
        assert_eq!(icon_for(150, false), "01d");
        assert_eq!(icon_for(-3, false), "01d");
    }

    #[test]
    fn legacy_ids_use_their_own_buckets() {
        assert_eq!(legacy_descriptor_id(0), 800);
        assert_eq!(legacy_descriptor_id(2), 800);
        assert_eq!(legacy_descriptor_id(3), 700);
        assert_eq!(legacy_descriptor_id(49), 700);
        assert_eq!(legacy_descriptor_id(50), 600);
        assert_eq!(legacy_descriptor_id(61), 600);
        assert_eq!(legacy_descriptor_id(70), 300);
        assert_eq!(legacy_descriptor_id(80), 500);
        assert_eq!(legacy_descriptor_id(99), 500);
        assert_eq!(legacy_descriptor_id(100), 800);
    }
}
