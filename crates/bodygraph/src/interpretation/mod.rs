//! Static meaning table keyed by gate, line, color, tone and base.

pub mod types;

pub use types::{FragmentMeaning, GateMeaning, HdCoordinate, Interpretation, Level};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

const BUILTIN_TABLE: &str = include_str!("../../data/interpretation.json");

/// Errors that can occur when loading or querying a reference table
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("Coordinate {coordinate} is out of range at the {level} level")]
    InvalidCoordinate { coordinate: HdCoordinate, level: Level },
    #[error("No {level} entry for index {index}")]
    NotFound { level: Level, index: u8 },
    #[error("Invalid reference table: {0}")]
    Parse(String),
    #[error("Failed to read reference table: {0}")]
    Io(String),
}

/// Reference data for every level, indexed from 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTable {
    pub gates: BTreeMap<u8, GateMeaning>,
    pub lines: BTreeMap<u8, FragmentMeaning>,
    pub colors: BTreeMap<u8, FragmentMeaning>,
    pub tones: BTreeMap<u8, FragmentMeaning>,
    pub bases: BTreeMap<u8, FragmentMeaning>,
}

lazy_static::lazy_static! {
    static ref BUILTIN: Result<ReferenceTable, LookupError> = ReferenceTable::from_json(BUILTIN_TABLE);
}

impl ReferenceTable {
    /// The table bundled with the crate.
    pub fn builtin() -> Result<&'static ReferenceTable, LookupError> {
        (*BUILTIN).as_ref().map_err(Clone::clone)
    }

    pub fn from_json(json: &str) -> Result<Self, LookupError> {
        let table: ReferenceTable =
            serde_json::from_str(json).map_err(|e| LookupError::Parse(e.to_string()))?;
        table.validate_keys()?;
        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LookupError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| LookupError::Io(format!("{}: {}", path.display(), e)))?;
        log::debug!("loaded reference table from {}", path.display());
        Self::from_json(&text)
    }

    /// Keys must be valid indices for their level. Gaps are allowed and
    /// surface as `NotFound` on lookup.
    fn validate_keys(&self) -> Result<(), LookupError> {
        let check = |level: Level, keys: Vec<u8>| {
            match keys.into_iter().find(|&k| k < 1 || k > level.count()) {
                Some(bad) => Err(LookupError::Parse(format!(
                    "{} key {} is outside 1-{}",
                    level,
                    bad,
                    level.count()
                ))),
                None => Ok(()),
            }
        };
        check(Level::Gate, self.gates.keys().copied().collect())?;
        check(Level::Line, self.lines.keys().copied().collect())?;
        check(Level::Color, self.colors.keys().copied().collect())?;
        check(Level::Tone, self.tones.keys().copied().collect())?;
        check(Level::Base, self.bases.keys().copied().collect())
    }

    /// Join each level's meaning for `coordinate`.
    pub fn lookup(&self, coordinate: &HdCoordinate) -> Result<Interpretation, LookupError> {
        if let Some((level, _)) = coordinate.out_of_range() {
            return Err(LookupError::InvalidCoordinate {
                coordinate: *coordinate,
                level,
            });
        }

        let gate = fetch(&self.gates, Level::Gate, coordinate.gate)?;
        let line = fetch(&self.lines, Level::Line, coordinate.line)?;
        let color = fetch(&self.colors, Level::Color, coordinate.color)?;
        let tone = fetch(&self.tones, Level::Tone, coordinate.tone)?;
        let base = fetch(&self.bases, Level::Base, coordinate.base)?;

        let sentence = assemble_sentence(&gate, &line, &color, &tone, &base);
        Ok(Interpretation {
            gate,
            line,
            color,
            tone,
            base,
            sentence,
        })
    }
}

fn fetch<T: Clone>(map: &BTreeMap<u8, T>, level: Level, index: u8) -> Result<T, LookupError> {
    map.get(&index)
        .cloned()
        .ok_or(LookupError::NotFound { level, index })
}

/// Gate name followed by the four fragments, empty parts skipped.
pub fn assemble_sentence(
    gate: &GateMeaning,
    line: &FragmentMeaning,
    color: &FragmentMeaning,
    tone: &FragmentMeaning,
    base: &FragmentMeaning,
) -> String {
    [
        gate.name.as_str(),
        line.sentence_fragment.as_str(),
        color.sentence_fragment.as_str(),
        tone.sentence_fragment.as_str(),
        base.sentence_fragment.as_str(),
    ]
    .iter()
    .map(|part| part.trim())
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

/// Look up a coordinate in the bundled table.
pub fn lookup(coordinate: &HdCoordinate) -> Result<Interpretation, LookupError> {
    ReferenceTable::builtin()?.lookup(coordinate)
}
