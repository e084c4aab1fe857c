use crate::ephemeris::series;
use crate::ephemeris::types::{Body, BodyLongitude};
use crate::time::{julian_century, julian_date, normalize_degrees};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Unknown body '{name}'. Valid bodies: sun, earth, moon, north_node, south_node, mercury, venus, mars, jupiter, saturn, uranus, neptune, pluto")]
    UnknownBody { name: String },
}

/// Low-order ephemeris evaluated at one instant.
///
/// Holds the Julian Date and Julian century so a batch of bodies at the
/// same instant shares the time conversion.
#[derive(Debug, Clone, Copy)]
pub struct Ephemeris {
    instant: DateTime<Utc>,
    jd: f64,
    t: f64,
}

impl Ephemeris {
    pub fn at(instant: DateTime<Utc>) -> Self {
        let jd = julian_date(instant);
        Self {
            instant,
            jd,
            t: julian_century(jd),
        }
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn julian_date(&self) -> f64 {
        self.jd
    }

    /// Julian centuries since J2000.0
    pub fn century(&self) -> f64 {
        self.t
    }

    /// Geocentric ecliptic longitude of `body`, degrees in [0, 360).
    pub fn longitude(&self, body: Body) -> f64 {
        let t = self.t;
        match body {
            Body::Sun => series::sun_longitude(t),
            Body::Earth => normalize_degrees(series::sun_longitude(t) + 180.0),
            Body::Moon => series::moon_longitude(t),
            Body::NorthNode => series::mean_node_longitude(t),
            Body::SouthNode => normalize_degrees(series::mean_node_longitude(t) + 180.0),
            Body::Mercury => series::mercury_longitude(t),
            Body::Venus => series::venus_longitude(t),
            Body::Mars => series::mars_longitude(t),
            Body::Jupiter => series::outer_planet_longitude(&series::JUPITER, t),
            Body::Saturn => series::outer_planet_longitude(&series::SATURN, t),
            Body::Uranus => series::outer_planet_longitude(&series::URANUS, t),
            Body::Neptune => series::outer_planet_longitude(&series::NEPTUNE, t),
            Body::Pluto => series::outer_planet_longitude(&series::PLUTO, t),
        }
    }

    /// Longitude for a body given by name. Unknown names are an error.
    pub fn longitude_by_name(&self, name: &str) -> Result<f64, EphemerisError> {
        let body: Body = name.parse()?;
        Ok(self.longitude(body))
    }

    /// Longitudes for a list of bodies, preserving order.
    pub fn positions(&self, bodies: &[Body]) -> Vec<BodyLongitude> {
        bodies
            .iter()
            .map(|&body| BodyLongitude {
                body,
                longitude: self.longitude(body),
            })
            .collect()
    }
}

/// Longitude of `body` at `instant`.
pub fn longitude(body: Body, instant: DateTime<Utc>) -> f64 {
    Ephemeris::at(instant).longitude(body)
}

/// Longitudes of `bodies` at `instant`.
pub fn positions(instant: DateTime<Utc>, bodies: &[Body]) -> Vec<BodyLongitude> {
    Ephemeris::at(instant).positions(bodies)
}
