pub mod centers;
pub mod channels;
pub mod types;

pub use centers::{center_of_gate, defined_centers, Center, GATE_CENTERS};
pub use channels::{active_channels, Channel, CHANNELS};
pub use types::{Authority, HdType, Profile, Strategy};
