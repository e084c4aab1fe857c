use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ephemeris::engine::EphemerisError;
use crate::time::InputError;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    /// Validating constructor: lat in [-90, 90], lon in [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Result<Self, InputError> {
        let location = Self { lat, lon };
        location.validate()?;
        Ok(location)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(InputError::LatitudeOutOfRange(self.lat));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(InputError::LongitudeOutOfRange(self.lon));
        }
        Ok(())
    }
}

/// Bodies activated in a chart, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Earth,
    Moon,
    NorthNode,
    SouthNode,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// All thirteen bodies in the order a chart lists them.
    pub const ALL: [Body; 13] = [
        Body::Sun,
        Body::Earth,
        Body::Moon,
        Body::NorthNode,
        Body::SouthNode,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Bodies shown in the current-sky panel.
    pub const TRANSIT: [Body; 5] = [Body::Sun, Body::Moon, Body::Mercury, Body::Venus, Body::Mars];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Earth => "Earth",
            Body::Moon => "Moon",
            Body::NorthNode => "North Node",
            Body::SouthNode => "South Node",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    /// Whether the longitude comes from a Keplerian-element approximation
    /// rather than a dedicated series.
    pub fn is_approximate(&self) -> bool {
        matches!(
            self,
            Body::Jupiter | Body::Saturn | Body::Uranus | Body::Neptune | Body::Pluto
        )
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect();
        let body = match key.as_str() {
            "sun" => Body::Sun,
            "earth" => Body::Earth,
            "moon" => Body::Moon,
            "northnode" | "rahu" => Body::NorthNode,
            "southnode" | "ketu" => Body::SouthNode,
            "mercury" => Body::Mercury,
            "venus" => Body::Venus,
            "mars" => Body::Mars,
            "jupiter" => Body::Jupiter,
            "saturn" => Body::Saturn,
            "uranus" => Body::Uranus,
            "neptune" => Body::Neptune,
            "pluto" => Body::Pluto,
            _ => {
                return Err(EphemerisError::UnknownBody {
                    name: s.to_string(),
                })
            }
        };
        Ok(body)
    }
}

/// Ecliptic longitude of one body at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyLongitude {
    pub body: Body,
    /// Longitude in degrees (0-360)
    pub longitude: f64,
}
