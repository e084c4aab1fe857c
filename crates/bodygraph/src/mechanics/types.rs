//! Chart-level classifications derived from the defined centers.

use crate::mechanics::centers::Center;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HdType {
    Generator,
    #[serde(rename = "Manifesting Generator")]
    ManifestingGenerator,
    Manifestor,
    Projector,
    Reflector,
}

impl HdType {
    /// Classify a set of defined centers.
    ///
    /// Evaluated strictly in order; a center set that fits several rules
    /// takes the first.
    pub fn from_centers(centers: &[Center]) -> Self {
        let has = |c: Center| centers.contains(&c);
        let sacral = has(Center::Sacral);
        let throat = has(Center::Throat);

        if sacral && throat {
            HdType::ManifestingGenerator
        } else if sacral {
            HdType::Generator
        } else if throat && (has(Center::Heart) || has(Center::G)) {
            HdType::Manifestor
        } else if !centers.is_empty() {
            HdType::Projector
        } else {
            HdType::Reflector
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HdType::Generator => "Generator",
            HdType::ManifestingGenerator => "Manifesting Generator",
            HdType::Manifestor => "Manifestor",
            HdType::Projector => "Projector",
            HdType::Reflector => "Reflector",
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            HdType::Generator | HdType::ManifestingGenerator => Strategy::Respond,
            HdType::Manifestor => Strategy::Inform,
            HdType::Projector => Strategy::WaitForInvitation,
            HdType::Reflector => Strategy::WaitLunarCycle,
        }
    }
}

impl fmt::Display for HdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "To Respond")]
    Respond,
    #[serde(rename = "To Inform")]
    Inform,
    #[serde(rename = "To Wait for the Invitation")]
    WaitForInvitation,
    #[serde(rename = "To Wait a Lunar Cycle")]
    WaitLunarCycle,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Respond => "To Respond",
            Strategy::Inform => "To Inform",
            Strategy::WaitForInvitation => "To Wait for the Invitation",
            Strategy::WaitLunarCycle => "To Wait a Lunar Cycle",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Authority {
    Emotional,
    Sacral,
    Splenic,
    Ego,
    #[serde(rename = "Self-Projected")]
    SelfProjected,
    Lunar,
}

impl Authority {
    /// First defined center in priority order decides; none defined is Lunar.
    pub fn from_centers(centers: &[Center]) -> Self {
        const PRIORITY: [(Center, Authority); 5] = [
            (Center::SolarPlexus, Authority::Emotional),
            (Center::Sacral, Authority::Sacral),
            (Center::Spleen, Authority::Splenic),
            (Center::Heart, Authority::Ego),
            (Center::G, Authority::SelfProjected),
        ];
        PRIORITY
            .iter()
            .find(|(center, _)| centers.contains(center))
            .map(|(_, authority)| *authority)
            .unwrap_or(Authority::Lunar)
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Authority::Emotional => "Emotional",
            Authority::Sacral => "Sacral",
            Authority::Splenic => "Splenic",
            Authority::Ego => "Ego",
            Authority::SelfProjected => "Self-Projected",
            Authority::Lunar => "Lunar",
        })
    }
}

/// Conscious Sun line over unconscious Earth line, e.g. "6/2".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Profile {
    pub conscious: u8,
    pub unconscious: u8,
}

/// The twelve line pairings of the traditional profile wheel.
const STANDARD_PROFILES: [(u8, u8); 12] = [
    (1, 3),
    (1, 4),
    (2, 4),
    (2, 5),
    (3, 5),
    (3, 6),
    (4, 6),
    (4, 1),
    (5, 1),
    (5, 2),
    (6, 2),
    (6, 3),
];

impl Profile {
    pub fn new(conscious: u8, unconscious: u8) -> Self {
        Self {
            conscious,
            unconscious,
        }
    }

    /// Whether the pairing is one of the twelve canonical profiles.
    ///
    /// The low-order ephemeris can place the Sun and the Design Earth so
    /// that a non-canonical pairing comes out; callers may flag that.
    pub fn is_standard(&self) -> bool {
        STANDARD_PROFILES.contains(&(self.conscious, self.unconscious))
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.conscious, self.unconscious)
    }
}

impl From<Profile> for String {
    fn from(profile: Profile) -> Self {
        profile.to_string()
    }
}

impl TryFrom<String> for Profile {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (left, right) = value
            .split_once('/')
            .ok_or_else(|| format!("Profile must look like 'n/m', got '{}'", value))?;
        let parse = |s: &str| {
            s.trim()
                .parse::<u8>()
                .ok()
                .filter(|line| (1..=6).contains(line))
                .ok_or_else(|| format!("Profile line must be 1-6, got '{}'", s))
        };
        Ok(Profile::new(parse(left)?, parse(right)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_decision_table() {
        assert_eq!(
            HdType::from_centers(&[Center::Sacral, Center::Throat]),
            HdType::ManifestingGenerator
        );
        assert_eq!(HdType::from_centers(&[Center::Sacral]), HdType::Generator);
        assert_eq!(
            HdType::from_centers(&[Center::Throat, Center::Heart]),
            HdType::Manifestor
        );
        assert_eq!(
            HdType::from_centers(&[Center::Throat, Center::G]),
            HdType::Manifestor
        );
        assert_eq!(HdType::from_centers(&[Center::Throat]), HdType::Projector);
        assert_eq!(HdType::from_centers(&[Center::Root]), HdType::Projector);
        assert_eq!(HdType::from_centers(&[]), HdType::Reflector);
    }

    #[test]
    fn test_authority_priority() {
        assert_eq!(
            Authority::from_centers(&[Center::G, Center::Sacral, Center::SolarPlexus]),
            Authority::Emotional
        );
        assert_eq!(
            Authority::from_centers(&[Center::Spleen, Center::Sacral]),
            Authority::Sacral
        );
        assert_eq!(
            Authority::from_centers(&[Center::Heart, Center::Spleen]),
            Authority::Splenic
        );
        assert_eq!(Authority::from_centers(&[Center::Heart]), Authority::Ego);
        assert_eq!(Authority::from_centers(&[Center::G]), Authority::SelfProjected);
        assert_eq!(
            Authority::from_centers(&[Center::Head, Center::Ajna]),
            Authority::Lunar
        );
    }

    #[test]
    fn test_strategy_lookup() {
        assert_eq!(HdType::Generator.strategy().to_string(), "To Respond");
        assert_eq!(HdType::ManifestingGenerator.strategy(), Strategy::Respond);
        assert_eq!(HdType::Reflector.strategy().to_string(), "To Wait a Lunar Cycle");
    }

    #[test]
    fn test_profile_text() {
        let profile = Profile::new(6, 2);
        assert_eq!(profile.to_string(), "6/2");
        assert!(profile.is_standard());
        assert!(!Profile::new(6, 6).is_standard());
        assert_eq!(Profile::try_from("4/1".to_string()), Ok(Profile::new(4, 1)));
        assert!(Profile::try_from("7/1".to_string()).is_err());
    }
}
