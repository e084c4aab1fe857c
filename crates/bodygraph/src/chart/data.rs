use crate::ephemeris::{Body, GeoLocation};
use crate::gates::{GateCoordinate, ZodiacSystem};
use crate::houses::HouseCusps;
use crate::mechanics::{Authority, Center, Channel, HdType, Profile, Strategy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One body's placement in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Activation {
    pub body: Body,
    /// Longitude in the chart's zodiac frame
    pub longitude: f64,
    pub coordinate: GateCoordinate,
    /// Equal house against the birth cusps, 0 when not placed
    pub house: u8,
}

/// The four gates of the Sun/Earth axes in both activation sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncarnationCross {
    pub name: String,
    pub personality_sun: u8,
    pub personality_earth: u8,
    pub design_sun: u8,
    pub design_earth: u8,
}

impl IncarnationCross {
    pub fn new(personality_sun: u8, personality_earth: u8, design_sun: u8, design_earth: u8) -> Self {
        Self {
            name: format!("Cross of {}/{}", personality_sun, personality_earth),
            personality_sun,
            personality_earth,
            design_sun,
            design_earth,
        }
    }
}

impl fmt::Display for IncarnationCross {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}/{} | {}/{})",
            self.name,
            self.personality_sun,
            self.personality_earth,
            self.design_sun,
            self.design_earth
        )
    }
}

/// Color and tone of one node activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Variable {
    pub color: u8,
    pub tone: u8,
}

impl From<&GateCoordinate> for Variable {
    fn from(coordinate: &GateCoordinate) -> Self {
        Self {
            color: coordinate.color,
            tone: coordinate.tone,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color {} - Tone {}", self.color, self.tone)
    }
}

impl From<Variable> for String {
    fn from(variable: Variable) -> Self {
        variable.to_string()
    }
}

impl TryFrom<String> for Variable {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let bad = || format!("Variable must look like 'Color n - Tone m', got '{}'", value);
        let (color, tone) = value.split_once(" - ").ok_or_else(bad)?;
        let color = color
            .strip_prefix("Color ")
            .and_then(|c| c.trim().parse().ok())
            .ok_or_else(bad)?;
        let tone = tone
            .strip_prefix("Tone ")
            .and_then(|t| t.trim().parse().ok())
            .ok_or_else(bad)?;
        Ok(Self { color, tone })
    }
}

/// Node-derived variables. Personality nodes give digestion and
/// perspective, Design nodes give environment and awareness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variables {
    pub digestion: Variable,
    pub environment: Variable,
    pub perspective: Variable,
    pub awareness: Variable,
}

/// A fully assembled chart. Immutable; recompute to change inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub birth: DateTime<Utc>,
    pub design_instant: DateTime<Utc>,
    pub location: GeoLocation,
    pub zodiac: ZodiacSystem,
    pub houses: HouseCusps,
    pub personality: Vec<Activation>,
    pub design: Vec<Activation>,
    pub active_gates: Vec<u8>,
    pub active_channels: Vec<Channel>,
    pub defined_centers: Vec<Center>,
    #[serde(rename = "type")]
    pub hd_type: HdType,
    pub authority: Authority,
    pub strategy: Strategy,
    pub profile: Profile,
    pub incarnation_cross: IncarnationCross,
    pub variables: Variables,
}

impl Chart {
    pub fn personality_of(&self, body: Body) -> Option<&Activation> {
        self.personality.iter().find(|a| a.body == body)
    }

    pub fn design_of(&self, body: Body) -> Option<&Activation> {
        self.design.iter().find(|a| a.body == body)
    }

    pub fn is_defined(&self, center: Center) -> bool {
        self.defined_centers.contains(&center)
    }

    /// Centers not touched by any active gate.
    pub fn open_centers(&self) -> Vec<Center> {
        Center::ALL
            .iter()
            .filter(|c| !self.is_defined(**c))
            .copied()
            .collect()
    }
}
