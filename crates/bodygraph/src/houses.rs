//! Sidereal time, obliquity, ascendant and equal-house cusps.

use crate::ephemeris::GeoLocation;
use crate::time::{julian_century, julian_date, normalize_degrees, to_radians, J2000};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Latitude of the polar circles; beyond it the ascendant jumps erratically.
pub const POLAR_CIRCLE_LATITUDE: f64 = 66.56;

/// Errors that can occur during house calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HouseError {
    #[error("Ascendant is undefined at the geographic poles (latitude {lat})")]
    PolarLatitude { lat: f64 },
    #[error(transparent)]
    InvalidLocation(#[from] crate::time::InputError),
}

/// Equal-house positions for one instant and place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    /// Ascendant, degrees [0, 360)
    pub ascendant: f64,
    pub descendant: f64,
    /// Cusp of house i+1 at index i
    pub cusps: [f64; 12],
    /// Local sidereal time, degrees
    pub local_sidereal_time: f64,
    /// Mean obliquity of the ecliptic, degrees
    pub obliquity: f64,
    /// Set inside the polar circles where the ascendant formula is unstable
    pub polar_unreliable: bool,
}

impl HouseCusps {
    /// House (1-12) containing `longitude`, 0 if none matched.
    pub fn house_of(&self, longitude: f64) -> u8 {
        find_house(longitude, &self.cusps)
    }
}

/// Greenwich sidereal time in hours.
pub fn greenwich_sidereal_time(jd: f64) -> f64 {
    let t = julian_century(jd);
    let theta = 280.46061837 + 360.98564736629 * (jd - J2000) + 0.000387933 * t * t
        - t * t * t / 38710000.0;
    normalize_degrees(theta) / 15.0
}

/// Local sidereal time in degrees for an east-positive longitude.
pub fn local_sidereal_time(jd: f64, geo_lon: f64) -> f64 {
    normalize_degrees(greenwich_sidereal_time(jd) * 15.0 + geo_lon)
}

/// Mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity(jd: f64) -> f64 {
    let t = julian_century(jd);
    23.439291 - 0.0130042 * t - 0.00000016 * t * t + 0.000000504 * t * t * t
}

/// Ascendant longitude from local sidereal time, obliquity and latitude.
pub fn ascendant(lst: f64, obliquity: f64, lat: f64) -> f64 {
    let lst_rad = to_radians(lst);
    let eps_rad = to_radians(obliquity);
    let lat_rad = to_radians(lat);
    let asc = (-lst_rad.cos())
        .atan2(eps_rad.sin() * lat_rad.tan() + eps_rad.cos() * lst_rad.sin())
        .to_degrees();
    normalize_degrees(asc)
}

/// Equal-house cusps: cusp 1 is the ascendant, each following cusp 30° on.
pub fn equal_cusps(ascendant: f64) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = normalize_degrees(ascendant + 30.0 * i as f64);
    }
    cusps
}

/// Compute ascendant and equal-house cusps.
pub fn house_cusps(
    instant: DateTime<Utc>,
    location: &GeoLocation,
) -> Result<HouseCusps, HouseError> {
    location.validate()?;
    if location.lat.abs() >= 90.0 {
        return Err(HouseError::PolarLatitude { lat: location.lat });
    }

    let jd = julian_date(instant);
    let lst = local_sidereal_time(jd, location.lon);
    let obliquity = mean_obliquity(jd);
    let asc = ascendant(lst, obliquity, location.lat);
    let polar_unreliable = location.lat.abs() > POLAR_CIRCLE_LATITUDE;
    if polar_unreliable {
        log::warn!(
            "latitude {} lies inside a polar circle; ascendant {:.2} is unreliable",
            location.lat,
            asc
        );
    }

    Ok(HouseCusps {
        ascendant: asc,
        descendant: normalize_degrees(asc + 180.0),
        cusps: equal_cusps(asc),
        local_sidereal_time: lst,
        obliquity,
        polar_unreliable,
    })
}

/// Find which 30° arc between consecutive cusps holds `longitude`.
///
/// Arcs are half-open `[start, end)`; the arc crossing 0° wraps around.
/// Returns 1-12, or 0 when nothing matches (e.g. NaN input).
pub fn find_house(longitude: f64, cusps: &[f64; 12]) -> u8 {
    for i in 0..12 {
        let start = cusps[i];
        let end = cusps[(i + 1) % 12];

        let inside = if start < end {
            longitude >= start && longitude < end
        } else {
            longitude >= start || longitude < end
        };
        if inside {
            return (i + 1) as u8;
        }
    }
    0
}
