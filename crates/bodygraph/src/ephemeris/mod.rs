pub mod engine;
pub mod series;
pub mod types;

pub use engine::{longitude, positions, Ephemeris, EphemerisError};
pub use types::{Body, BodyLongitude, GeoLocation};
