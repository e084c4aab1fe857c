//! The nine energy centers and the gate → center table.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Center {
    Root,
    Sacral,
    /// Emotions
    SolarPlexus,
    Spleen,
    /// Ego / will
    Heart,
    /// Self / identity
    G,
    Throat,
    /// Mind
    Ajna,
    /// Crown
    Head,
}

impl Center {
    pub const ALL: [Center; 9] = [
        Center::Root,
        Center::Sacral,
        Center::SolarPlexus,
        Center::Spleen,
        Center::Heart,
        Center::G,
        Center::Throat,
        Center::Ajna,
        Center::Head,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Center::Root => "Root",
            Center::Sacral => "Sacral",
            Center::SolarPlexus => "Solar Plexus",
            Center::Spleen => "Spleen",
            Center::Heart => "Heart (Ego)",
            Center::G => "G Center (Self)",
            Center::Throat => "Throat",
            Center::Ajna => "Ajna (Mind)",
            Center::Head => "Head (Crown)",
        }
    }

    /// Gates that belong to this center, ascending.
    pub fn gates(&self) -> Vec<u8> {
        (1..=64u8)
            .filter(|&gate| center_of_gate(gate) == Some(*self))
            .collect()
    }
}

impl fmt::Display for Center {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Center of gate `i + 1` at index `i`.
pub const GATE_CENTERS: [Center; 64] = [
    Center::G,           // 1
    Center::G,           // 2
    Center::Sacral,      // 3
    Center::Ajna,        // 4
    Center::Sacral,      // 5
    Center::SolarPlexus, // 6
    Center::G,           // 7
    Center::Throat,      // 8
    Center::Sacral,      // 9
    Center::G,           // 10
    Center::Ajna,        // 11
    Center::Throat,      // 12
    Center::G,           // 13
    Center::Sacral,      // 14
    Center::G,           // 15
    Center::Throat,      // 16
    Center::Ajna,        // 17
    Center::Spleen,      // 18
    Center::Root,        // 19
    Center::Throat,      // 20
    Center::Heart,       // 21
    Center::SolarPlexus, // 22
    Center::Throat,      // 23
    Center::Ajna,        // 24
    Center::G,           // 25
    Center::Heart,       // 26
    Center::Sacral,      // 27
    Center::Spleen,      // 28
    Center::Sacral,      // 29
    Center::SolarPlexus, // 30
    Center::Throat,      // 31
    Center::Spleen,      // 32
    Center::Throat,      // 33
    Center::Sacral,      // 34
    Center::Throat,      // 35
    Center::SolarPlexus, // 36
    Center::SolarPlexus, // 37
    Center::Root,        // 38
    Center::Root,        // 39
    Center::Heart,       // 40
    Center::Root,        // 41
    Center::Sacral,      // 42
    Center::Ajna,        // 43
    Center::Spleen,      // 44
    Center::Throat,      // 45
    Center::G,           // 46
    Center::Ajna,        // 47
    Center::Spleen,      // 48
    Center::SolarPlexus, // 49
    Center::Spleen,      // 50
    Center::Heart,       // 51
    Center::Root,        // 52
    Center::Root,        // 53
    Center::Root,        // 54
    Center::SolarPlexus, // 55
    Center::Throat,      // 56
    Center::Spleen,      // 57
    Center::Root,        // 58
    Center::Sacral,      // 59
    Center::Root,        // 60
    Center::Head,        // 61
    Center::Throat,      // 62
    Center::Head,        // 63
    Center::Head,        // 64
];

/// Center a gate belongs to, `None` outside 1-64.
pub fn center_of_gate(gate: u8) -> Option<Center> {
    if (1..=64).contains(&gate) {
        Some(GATE_CENTERS[(gate - 1) as usize])
    } else {
        None
    }
}

/// Distinct centers touched by a set of active gates, in `Center` order.
pub fn defined_centers(active_gates: &[u8]) -> Vec<Center> {
    let mut centers: Vec<Center> = active_gates
        .iter()
        .filter_map(|&gate| center_of_gate(gate))
        .collect();
    centers.sort();
    centers.dedup();
    centers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_gate_has_one_center() {
        let total: usize = Center::ALL.iter().map(|c| c.gates().len()).sum();
        assert_eq!(total, 64);
        assert_eq!(center_of_gate(0), None);
        assert_eq!(center_of_gate(65), None);
    }

    #[test]
    fn test_center_sizes() {
        assert_eq!(Center::Head.gates(), vec![61, 63, 64]);
        assert_eq!(Center::Ajna.gates().len(), 6);
        assert_eq!(Center::Throat.gates().len(), 11);
        assert_eq!(Center::G.gates().len(), 8);
        assert_eq!(Center::Heart.gates().len(), 4);
        assert_eq!(Center::Sacral.gates().len(), 9);
        assert_eq!(Center::Root.gates().len(), 9);
    }

    #[test]
    fn test_defined_centers_dedup() {
        let centers = defined_centers(&[34, 5, 20, 62]);
        assert_eq!(centers, vec![Center::Sacral, Center::Throat]);
        assert!(defined_centers(&[]).is_empty());
    }
}
