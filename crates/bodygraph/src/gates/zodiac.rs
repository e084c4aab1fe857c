//! Zodiac signs and the zodiac systems a chart can be cast in.

use crate::time::{julian_date, normalize_degrees};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

const SIGN_ORDER: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// Sign containing an ecliptic longitude.
    pub fn from_longitude(longitude: f64) -> Self {
        let index = (normalize_degrees(longitude) / 30.0) as usize;
        SIGN_ORDER[index.min(11)]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference frame longitudes are expressed in before decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSystem {
    #[default]
    Tropical,
    /// Tropical minus the Lahiri ayanamsa
    Sidereal,
    /// Sidereal, measured from the sidereal north node
    Draco,
}

impl FromStr for ZodiacSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tropical" => Ok(ZodiacSystem::Tropical),
            "sidereal" => Ok(ZodiacSystem::Sidereal),
            "draco" | "draconic" => Ok(ZodiacSystem::Draco),
            other => Err(format!(
                "Unknown zodiac system '{}'. Valid systems: tropical, sidereal, draco",
                other
            )),
        }
    }
}

const TROPICAL_YEAR_DAYS: f64 = 365.2425;
/// Julian Date of 2000-01-01 00:00 UTC, the ayanamsa reference point.
const AYANAMSA_EPOCH_JD: f64 = 2451544.5;

/// Lahiri ayanamsa, linear approximation good to roughly 0.1°.
pub fn lahiri_ayanamsa(instant: DateTime<Utc>) -> f64 {
    let days = julian_date(instant) - AYANAMSA_EPOCH_JD;
    23.85675 + 0.013 * (days / TROPICAL_YEAR_DAYS)
}

/// Converts tropical longitudes into a chosen zodiac system.
///
/// Built once per chart from the birth instant and the tropical north node,
/// then applied to every longitude in both activation sets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZodiacFrame {
    pub system: ZodiacSystem,
    pub ayanamsa: f64,
    /// Sidereal north node, used by the draco frame
    pub sidereal_node: f64,
}

impl ZodiacFrame {
    pub fn new(system: ZodiacSystem, instant: DateTime<Utc>, tropical_node: f64) -> Self {
        let ayanamsa = lahiri_ayanamsa(instant);
        Self {
            system,
            ayanamsa,
            sidereal_node: normalize_degrees(tropical_node - ayanamsa),
        }
    }

    pub fn apply(&self, tropical: f64) -> f64 {
        match self.system {
            ZodiacSystem::Tropical => normalize_degrees(tropical),
            ZodiacSystem::Sidereal => normalize_degrees(tropical - self.ayanamsa),
            ZodiacSystem::Draco => {
                normalize_degrees(normalize_degrees(tropical - self.ayanamsa) - self.sidereal_node)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sign_from_longitude() {
        assert_eq!(ZodiacSign::from_longitude(0.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(29.999), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(30.0), ZodiacSign::Taurus);
        assert_eq!(ZodiacSign::from_longitude(280.8), ZodiacSign::Capricorn);
        assert_eq!(ZodiacSign::from_longitude(359.9999), ZodiacSign::Pisces);
    }

    #[test]
    fn test_ayanamsa_epoch() {
        let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        assert!((lahiri_ayanamsa(epoch) - 23.85675).abs() < 1e-12);
    }

    #[test]
    fn test_frames() {
        let instant = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let tropical = ZodiacFrame::new(ZodiacSystem::Tropical, instant, 125.0);
        assert_eq!(tropical.apply(100.0), 100.0);

        let sidereal = ZodiacFrame::new(ZodiacSystem::Sidereal, instant, 125.0);
        assert!((sidereal.apply(100.0) - 76.14325).abs() < 1e-9);

        // The node itself sits at 0° in the draco frame
        let draco = ZodiacFrame::new(ZodiacSystem::Draco, instant, 125.0);
        assert!(draco.apply(125.0).abs() < 1e-9 || (draco.apply(125.0) - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_system() {
        assert_eq!("Sidereal".parse::<ZodiacSystem>(), Ok(ZodiacSystem::Sidereal));
        assert!("equal".parse::<ZodiacSystem>().is_err());
    }
}
