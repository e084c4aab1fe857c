//! Gate decoder.
//!
//! The circle is split into 64 gates of 5.625°; each gate into 6 lines, each
//! line into 6 colors, each color into 6 tones and each tone into 5 bases.
//! Every level is `floor(remainder / width) + 1`: a longitude exactly on an
//! edge opens the slot that starts there, and a clamp keeps floating error
//! from ever producing line 7 or gate 65.

use crate::gates::zodiac::ZodiacSign;
use crate::time::{normalize_degrees, Dms, InputError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const GATE_COUNT: u8 = 64;
pub const LINES_PER_GATE: u8 = 6;
pub const COLORS_PER_LINE: u8 = 6;
pub const TONES_PER_COLOR: u8 = 6;
pub const BASES_PER_TONE: u8 = 5;

pub const GATE_WIDTH: f64 = 360.0 / GATE_COUNT as f64;
pub const LINE_WIDTH: f64 = GATE_WIDTH / LINES_PER_GATE as f64;
pub const COLOR_WIDTH: f64 = LINE_WIDTH / COLORS_PER_LINE as f64;
pub const TONE_WIDTH: f64 = COLOR_WIDTH / TONES_PER_COLOR as f64;
pub const BASE_WIDTH: f64 = TONE_WIDTH / BASES_PER_TONE as f64;

/// Which arc the degree/minute/second split is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DmsReference {
    /// Longitude modulo 30°, relative to the start of the sign
    #[default]
    Sign,
    /// Longitude modulo 360°
    Absolute,
}

/// Five-level subdivision of one longitude plus its zodiac placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateCoordinate {
    pub gate: u8,
    pub line: u8,
    pub color: u8,
    pub tone: u8,
    pub base: u8,
    pub sign: ZodiacSign,
    pub degree: u16,
    pub minute: u8,
    pub second: f64,
}

impl GateCoordinate {
    /// Longitude where this coordinate's base begins.
    pub fn start_longitude(&self) -> f64 {
        let base = (self.base - 1) as f64 / BASES_PER_TONE as f64;
        let tone = ((self.tone - 1) as f64 + base) / TONES_PER_COLOR as f64;
        let color = ((self.color - 1) as f64 + tone) / COLORS_PER_LINE as f64;
        let line = ((self.line - 1) as f64 + color) / LINES_PER_GATE as f64;
        ((self.gate - 1) as f64 + line) * GATE_WIDTH
    }

    pub fn dms(&self) -> Dms {
        Dms {
            degree: self.degree,
            minute: self.minute,
            second: self.second,
        }
    }
}

impl fmt::Display for GateCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}.{}",
            self.gate, self.line, self.color, self.tone, self.base
        )
    }
}

/// Index of `remainder` within slots of `width`, 1-based and clamped to `count`.
fn slot(remainder: f64, width: f64, count: u8) -> u8 {
    let index = (remainder / width).floor();
    if index < 0.0 {
        1
    } else {
        (index as u8).min(count - 1) + 1
    }
}

/// Decode a longitude with the sign-relative degree split.
pub fn decode(longitude: f64) -> GateCoordinate {
    decode_with(longitude, DmsReference::Sign)
}

/// Decode a longitude, choosing the arc the degree split is measured on.
pub fn decode_with(longitude: f64, reference: DmsReference) -> GateCoordinate {
    let lon = normalize_degrees(longitude);

    let gate = slot(lon, GATE_WIDTH, GATE_COUNT);
    let gate_pos = lon - (gate - 1) as f64 * GATE_WIDTH;

    let line = slot(gate_pos, LINE_WIDTH, LINES_PER_GATE);
    let line_pos = gate_pos - (line - 1) as f64 * LINE_WIDTH;

    let color = slot(line_pos, COLOR_WIDTH, COLORS_PER_LINE);
    let color_pos = line_pos - (color - 1) as f64 * COLOR_WIDTH;

    let tone = slot(color_pos, TONE_WIDTH, TONES_PER_COLOR);
    let tone_pos = color_pos - (tone - 1) as f64 * TONE_WIDTH;

    let base = slot(tone_pos, BASE_WIDTH, BASES_PER_TONE);

    let dms = match reference {
        DmsReference::Sign => Dms::from_degrees(lon % 30.0),
        DmsReference::Absolute => Dms::from_degrees(lon),
    };

    GateCoordinate {
        gate,
        line,
        color,
        tone,
        base,
        sign: ZodiacSign::from_longitude(lon),
        degree: dms.degree,
        minute: dms.minute,
        second: dms.second,
    }
}

/// Decode a caller-supplied value, rejecting NaN and infinities.
pub fn try_decode(longitude: f64) -> Result<GateCoordinate, InputError> {
    if !longitude.is_finite() {
        return Err(InputError::NonFiniteDegrees(longitude));
    }
    Ok(decode(longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_tile() {
        assert_eq!(GATE_WIDTH, 5.625);
        assert_eq!(LINE_WIDTH, 0.9375);
        assert_eq!(COLOR_WIDTH, 0.15625);
        assert!((BASE_WIDTH * 5.0 * 6.0 * 6.0 * 6.0 * 64.0 - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_longitude() {
        let c = decode(0.0);
        assert_eq!((c.gate, c.line, c.color, c.tone, c.base), (1, 1, 1, 1, 1));
        assert_eq!(c.sign, ZodiacSign::Aries);
    }

    #[test]
    fn test_top_of_circle() {
        let c = decode(359.999999);
        assert_eq!(c.gate, 64);
        assert_eq!(c.line, 6);
        assert!(c.base <= 5);
    }

    #[test]
    fn test_gate_edge_starts_next_gate() {
        let c = decode(5.625);
        assert_eq!((c.gate, c.line, c.color, c.tone, c.base), (2, 1, 1, 1, 1));
    }

    #[test]
    fn test_dms_reference() {
        let sign = decode_with(45.5, DmsReference::Sign);
        assert_eq!((sign.degree, sign.minute), (15, 30));
        let absolute = decode_with(45.5, DmsReference::Absolute);
        assert_eq!((absolute.degree, absolute.minute), (45, 30));
    }

    #[test]
    fn test_try_decode_rejects_nan() {
        assert!(try_decode(f64::NAN).is_err());
        assert!(try_decode(f64::INFINITY).is_err());
        assert_eq!(try_decode(-5.625).unwrap().gate, 64);
    }
}
