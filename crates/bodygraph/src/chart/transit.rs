use crate::chart::settings::ChartSettings;
use crate::ephemeris::{Body, Ephemeris};
use crate::gates::{decode, GateCoordinate, ZodiacFrame, ZodiacSystem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sky snapshot without location or houses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transit {
    pub instant: DateTime<Utc>,
    pub zodiac: ZodiacSystem,
    pub positions: Vec<TransitPosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitPosition {
    pub body: Body,
    pub longitude: f64,
    pub coordinate: GateCoordinate,
}

impl Transit {
    pub fn gates(&self) -> Vec<u8> {
        self.positions.iter().map(|p| p.coordinate.gate).collect()
    }
}

/// Positions of the fast bodies at `instant`.
pub fn transit(instant: DateTime<Utc>, settings: &ChartSettings) -> Transit {
    transit_bodies(instant, settings, &Body::TRANSIT)
}

pub fn transit_bodies(instant: DateTime<Utc>, settings: &ChartSettings, bodies: &[Body]) -> Transit {
    let sky = Ephemeris::at(instant);
    let frame = ZodiacFrame::new(settings.zodiac, instant, sky.longitude(Body::NorthNode));

    let positions = sky
        .positions(bodies)
        .into_iter()
        .map(|p| {
            let longitude = frame.apply(p.longitude);
            TransitPosition {
                body: p.body,
                longitude,
                coordinate: decode(longitude),
            }
        })
        .collect();

    Transit {
        instant,
        zodiac: settings.zodiac,
        positions,
    }
}
