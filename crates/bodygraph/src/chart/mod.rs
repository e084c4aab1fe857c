pub mod builder;
pub mod data;
pub mod settings;
pub mod transit;

pub use builder::build_chart;
pub use data::{Activation, Chart, IncarnationCross, Variable, Variables};
pub use settings::{ChartSettings, DEFAULT_DESIGN_OFFSET_DAYS};
pub use transit::{transit, transit_bodies, Transit, TransitPosition};

use crate::ephemeris::{Body, EphemerisError};
use crate::houses::HouseError;
use crate::time::InputError;
use thiserror::Error;

/// Errors that can occur while assembling a chart
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error(transparent)]
    Houses(#[from] HouseError),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error("Invalid chart settings: {0}")]
    InvalidSettings(String),
    #[error("No {0} activation was computed")]
    MissingActivation(Body),
}
