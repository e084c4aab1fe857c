use crate::mechanics::centers::{center_of_gate, Center};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed pair of gates joining two centers. Lower gate first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Channel(pub u8, pub u8);

pub const CHANNELS: [Channel; 36] = [
    Channel(1, 8),
    Channel(2, 14),
    Channel(3, 60),
    Channel(4, 63),
    Channel(5, 15),
    Channel(6, 59),
    Channel(7, 31),
    Channel(9, 52),
    Channel(10, 20),
    Channel(10, 34),
    Channel(10, 57),
    Channel(11, 56),
    Channel(12, 22),
    Channel(13, 33),
    Channel(16, 48),
    Channel(17, 62),
    Channel(18, 58),
    Channel(19, 49),
    Channel(20, 34),
    Channel(20, 57),
    Channel(21, 45),
    Channel(23, 43),
    Channel(24, 61),
    Channel(25, 51),
    Channel(26, 44),
    Channel(27, 50),
    Channel(28, 38),
    Channel(29, 46),
    Channel(30, 41),
    Channel(32, 54),
    Channel(34, 57),
    Channel(35, 36),
    Channel(37, 40),
    Channel(39, 55),
    Channel(42, 53),
    Channel(47, 64),
];

impl Channel {
    pub fn gates(&self) -> (u8, u8) {
        (self.0, self.1)
    }

    /// The two centers this channel connects.
    pub fn centers(&self) -> Option<(Center, Center)> {
        Some((center_of_gate(self.0)?, center_of_gate(self.1)?))
    }

    pub fn is_active(&self, active_gates: &[u8]) -> bool {
        active_gates.contains(&self.0) && active_gates.contains(&self.1)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

/// Channels whose two gates are both active, in table order.
pub fn active_channels(active_gates: &[u8]) -> Vec<Channel> {
    CHANNELS
        .iter()
        .filter(|channel| channel.is_active(active_gates))
        .copied()
        .collect()
}
