//! Time and angle helpers shared by the ephemeris and house engines.
//!
//! Every astronomical formula in this crate is expressed in Julian
//! centuries from J2000.0, derived here from a UTC instant.

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000: f64 = 2451545.0;
/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36525.0;

/// Errors raised while validating caller-supplied input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Invalid date/time '{input}': expected RFC 3339 or YYYY-MM-DDTHH:MM[:SS]")]
    InvalidInstant { input: String },
    #[error("Latitude must be a finite value in [-90, 90], got {0}")]
    LatitudeOutOfRange(f64),
    #[error("Longitude must be a finite value in [-180, 180], got {0}")]
    LongitudeOutOfRange(f64),
    #[error("Longitude value must be finite, got {0}")]
    NonFiniteDegrees(f64),
}

/// Convert a UTC instant to a Julian Date.
///
/// Uses the Fliegel–Van Flandern day number, offset by the time of day so
/// that the fractional part starts at noon.
pub fn julian_date(instant: DateTime<Utc>) -> f64 {
    let y = instant.year() as i64;
    let m = instant.month() as i64;
    let d = instant.day() as i64;
    let hours = instant.hour() as f64
        + instant.minute() as f64 / 60.0
        + (instant.second() as f64 + instant.nanosecond() as f64 / 1e9) / 3600.0;

    let a = (14 - m).div_euclid(12);
    let y2 = y + 4800 - a;
    let m2 = m + 12 * a - 3;

    let jdn = d + (153 * m2 + 2).div_euclid(5) + 365 * y2 + y2.div_euclid(4) - y2.div_euclid(100)
        + y2.div_euclid(400)
        - 32045;

    jdn as f64 + (hours - 12.0) / 24.0
}

/// Julian centuries elapsed since J2000.0.
pub fn julian_century(jd: f64) -> f64 {
    (jd - J2000) / DAYS_PER_CENTURY
}

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let mut normalized = value % 360.0;
    if normalized < 0.0 {
        normalized += 360.0;
    }
    // -1e-20 % 360 + 360 rounds to exactly 360
    if normalized >= 360.0 {
        normalized = 0.0;
    }
    normalized
}

pub fn to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Parse a birth or transit instant.
///
/// Accepts RFC 3339 (`1990-01-01T12:00:00Z`, with offset) as well as the
/// bare form-field layouts `YYYY-MM-DDTHH:MM[:SS]` and
/// `YYYY-MM-DD HH:MM[:SS]`, which are read as UTC.
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>, InputError> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| InputError::InvalidInstant {
            input: input.to_string(),
        })
}

/// Degree / minute / second split of an angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    pub degree: u16,
    pub minute: u8,
    /// Seconds rounded to two decimals.
    pub second: f64,
}

impl Dms {
    /// Rounds once to hundredths of a second, so 59.995" carries into the
    /// next minute instead of printing as 60.00".
    pub fn from_degrees(value: f64) -> Self {
        let hundredths = (value.abs() * 360_000.0).round() as u64;
        Self {
            degree: (hundredths / 360_000) as u16,
            minute: ((hundredths / 6_000) % 60) as u8,
            second: (hundredths % 6_000) as f64 / 100.0,
        }
    }
}

impl std::fmt::Display for Dms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°{:02}'{:05.2}\"", self.degree, self.minute, self.second)
    }
}
