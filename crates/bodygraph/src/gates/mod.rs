pub mod decoder;
pub mod zodiac;

pub use decoder::{
    decode, decode_with, try_decode, DmsReference, GateCoordinate, BASE_WIDTH, COLOR_WIDTH,
    GATE_WIDTH, LINE_WIDTH, TONE_WIDTH,
};
pub use zodiac::{lahiri_ayanamsa, ZodiacFrame, ZodiacSign, ZodiacSystem};
