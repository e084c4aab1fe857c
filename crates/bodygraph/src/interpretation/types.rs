use crate::gates::GateCoordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five subdivision indices, without zodiac placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HdCoordinate {
    pub gate: u8,
    pub line: u8,
    pub color: u8,
    pub tone: u8,
    pub base: u8,
}

impl HdCoordinate {
    pub fn new(gate: u8, line: u8, color: u8, tone: u8, base: u8) -> Self {
        Self {
            gate,
            line,
            color,
            tone,
            base,
        }
    }

    /// First level whose index falls outside its range, if any.
    pub fn out_of_range(&self) -> Option<(Level, u8)> {
        Level::ALL
            .iter()
            .map(|&level| (level, self.index(level)))
            .find(|&(level, index)| index < 1 || index > level.count())
    }

    pub fn index(&self, level: Level) -> u8 {
        match level {
            Level::Gate => self.gate,
            Level::Line => self.line,
            Level::Color => self.color,
            Level::Tone => self.tone,
            Level::Base => self.base,
        }
    }
}

impl From<&GateCoordinate> for HdCoordinate {
    fn from(c: &GateCoordinate) -> Self {
        Self::new(c.gate, c.line, c.color, c.tone, c.base)
    }
}

impl fmt::Display for HdCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}.{}",
            self.gate, self.line, self.color, self.tone, self.base
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Gate,
    Line,
    Color,
    Tone,
    Base,
}

impl Level {
    pub const ALL: [Level; 5] = [Level::Gate, Level::Line, Level::Color, Level::Tone, Level::Base];

    /// Number of slots at this level.
    pub fn count(&self) -> u8 {
        match self {
            Level::Gate => 64,
            Level::Line | Level::Color | Level::Tone => 6,
            Level::Base => 5,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Gate => "gate",
            Level::Line => "line",
            Level::Color => "color",
            Level::Tone => "tone",
            Level::Base => "base",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateMeaning {
    pub name: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub keynote: String,
}

/// Meaning of a line, color, tone or base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentMeaning {
    pub name: String,
    #[serde(default)]
    pub sentence_fragment: String,
}

/// Joined meanings for one coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    pub gate: GateMeaning,
    pub line: FragmentMeaning,
    pub color: FragmentMeaning,
    pub tone: FragmentMeaning,
    pub base: FragmentMeaning,
    pub sentence: String,
}
