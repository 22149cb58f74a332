use crate::model::{DisplayRow, Reading};
use std::fmt;

const SECONDS_PER_HOUR: f64 = 3600.0;
const MPS_TO_MPH: f64 = 2.23694;

/// Wind direction label as recorded by the station's vane.
///
/// The vane reports one of eight raw angles and the labels below are the ones
/// the station has always displayed for them. They do not follow compass
/// bearings, so this stays an exact lookup rather than a range bucket.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindDirection {
    N,
    NW,
    W,
    SW,
    S,
    SE,
    E,
    NE,
    Unknown,
}

impl WindDirection {
    pub fn from_degrees(degrees: f64) -> Self {
        if !degrees.is_finite() {
            return WindDirection::Unknown;
        }

        match degrees.round() as i64 {
            225 => WindDirection::N,
            180 => WindDirection::NW,
            135 => WindDirection::W,
            90 => WindDirection::SW,
            45 => WindDirection::S,
            0 => WindDirection::SE,
            315 => WindDirection::E,
            270 => WindDirection::NE,
            _ => WindDirection::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindDirection::N => "N",
            WindDirection::NW => "NW",
            WindDirection::W => "W",
            WindDirection::SW => "SW",
            WindDirection::S => "S",
            WindDirection::SE => "SE",
            WindDirection::E => "E",
            WindDirection::NE => "NE",
            WindDirection::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rounds half away from zero to `digits` fractional digits.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// Formats with one fractional digit, `.` as separator and no grouping.
pub fn format_decimal(value: f64) -> String {
    let rounded = round_to(value, 1);
    // avoid "-0.0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.1}", rounded)
}

pub fn rain_rate_per_hour(rain_rate: f64) -> f64 {
    rain_rate * SECONDS_PER_HOUR
}

pub fn wind_speed_mph(wind_speed: f64) -> f64 {
    round_to(wind_speed * MPS_TO_MPH, 1)
}

impl From<&Reading> for DisplayRow {
    fn from(r: &Reading) -> Self {
        DisplayRow {
            id: r.id,
            timestamp: r.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            temperature: format_decimal(r.temperature),
            pressure: format_decimal(r.pressure),
            humidity: format_decimal(r.humidity),
            rain: format_decimal(r.rain),
            rain_rate: format_decimal(rain_rate_per_hour(r.rain_rate)),
            luminance: format_decimal(r.luminance),
            wind_speed: format_decimal(wind_speed_mph(r.wind_speed)),
            wind_direction: WindDirection::from_degrees(r.wind_direction).to_string(),
            day: r.day,
            week: r.week,
            month: r.month,
            year: r.year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reading() -> Reading {
        Reading {
            id: 42,
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 1)
                .and_then(|d| d.and_hms_opt(9, 15, 0))
                .unwrap(),
            temperature: 1234.56,
            pressure: 1013.25,
            humidity: 81.0,
            rain: 0.3,
            rain_rate: 0.001,
            luminance: 512.04,
            wind_speed: 10.0,
            wind_direction: 225.4,
            day: 61,
            week: 9,
            month: 3,
            year: 2024,
        }
    }

    #[test]
    fn test_wind_direction_exact_table() {
        let table = [
            (225.0, "N"),
            (180.0, "NW"),
            (135.0, "W"),
            (90.0, "SW"),
            (45.0, "S"),
            (0.0, "SE"),
            (315.0, "E"),
            (270.0, "NE"),
        ];

        for (degrees, label) in table {
            assert_eq!(WindDirection::from_degrees(degrees).as_str(), label);
        }
    }

    #[test]
    fn test_wind_direction_rounds_before_lookup() {
        assert_eq!(WindDirection::from_degrees(225.4), WindDirection::N);
        assert_eq!(WindDirection::from_degrees(44.5), WindDirection::S);
        assert_eq!(WindDirection::from_degrees(226.0), WindDirection::Unknown);
        assert_eq!(WindDirection::from_degrees(360.0), WindDirection::Unknown);
        assert_eq!(WindDirection::from_degrees(f64::NAN), WindDirection::Unknown);
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(format_decimal(wind_speed_mph(10.0)), "22.4");
        assert_eq!(format_decimal(rain_rate_per_hour(0.001)), "3.6");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(1234.56), "1234.6");
        assert_eq!(format_decimal(1_000_000.0), "1000000.0");
        assert_eq!(format_decimal(12.25), "12.3");
        assert_eq!(format_decimal(-3.14), "-3.1");
        assert_eq!(format_decimal(-0.04), "0.0");
    }

    #[test]
    fn test_display_row_from_reading() {
        let row = DisplayRow::from(&reading());

        assert_eq!(row.id, 42);
        assert_eq!(row.timestamp, "2024-03-01 09:15:00");
        assert_eq!(row.temperature, "1234.6");
        assert_eq!(row.pressure, "1013.3");
        assert_eq!(row.humidity, "81.0");
        assert_eq!(row.rain, "0.3");
        assert_eq!(row.rain_rate, "3.6");
        assert_eq!(row.luminance, "512.0");
        assert_eq!(row.wind_speed, "22.4");
        assert_eq!(row.wind_direction, "N");
        assert_eq!((row.day, row.week, row.month, row.year), (61, 9, 3, 2024));
    }
}
