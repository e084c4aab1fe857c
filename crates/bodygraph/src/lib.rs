pub mod chart;
pub mod ephemeris;
pub mod gates;
pub mod houses;
pub mod interpretation;
pub mod mechanics;
pub mod time;

pub use chart::{build_chart, transit, Chart, ChartError, ChartSettings, Transit};
pub use ephemeris::{Body, BodyLongitude, Ephemeris, EphemerisError, GeoLocation};
pub use gates::{decode, decode_with, DmsReference, GateCoordinate, ZodiacSign, ZodiacSystem};
pub use houses::{find_house, house_cusps, HouseCusps, HouseError};
pub use interpretation::{HdCoordinate, Interpretation, LookupError, ReferenceTable};
pub use mechanics::{Authority, Center, Channel, HdType, Profile, Strategy};
pub use time::{julian_date, normalize_degrees, parse_instant, InputError};

/// Parse a birth date/time and location from form-field text and build
/// the chart with default settings.
pub fn chart_from_fields(datetime: &str, lat: f64, lon: f64) -> Result<Chart, ChartError> {
    let birth = parse_instant(datetime)?;
    let location = GeoLocation::new(lat, lon)?;
    build_chart(birth, &location, &ChartSettings::default())
}
