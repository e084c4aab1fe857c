//! Chart assembly: two ephemeris passes, decode, then the mechanics tables.

use crate::chart::data::{Activation, Chart, IncarnationCross, Variable, Variables};
use crate::chart::settings::ChartSettings;
use crate::chart::ChartError;
use crate::ephemeris::{Body, Ephemeris, GeoLocation};
use crate::gates::{decode, ZodiacFrame};
use crate::houses::{house_cusps, HouseCusps};
use crate::mechanics::{active_channels, defined_centers, Authority, HdType, Profile};
use chrono::{DateTime, Utc};

/// Build the chart for a birth instant and place.
pub fn build_chart(
    birth: DateTime<Utc>,
    location: &GeoLocation,
    settings: &ChartSettings,
) -> Result<Chart, ChartError> {
    location.validate()?;
    let design_instant = settings.design_instant(birth)?;
    let houses = house_cusps(birth, location)?;

    let personality_sky = Ephemeris::at(birth);
    let design_sky = Ephemeris::at(design_instant);
    // One frame for both sets, anchored at birth
    let frame = ZodiacFrame::new(settings.zodiac, birth, personality_sky.longitude(Body::NorthNode));

    let personality = activations(&personality_sky, &frame, &houses);
    let design = activations(&design_sky, &frame, &houses);

    let mut active_gates: Vec<u8> = personality
        .iter()
        .chain(design.iter())
        .map(|a| a.coordinate.gate)
        .collect();
    active_gates.sort_unstable();
    active_gates.dedup();

    let channels = active_channels(&active_gates);
    let centers = defined_centers(&active_gates);
    let hd_type = HdType::from_centers(&centers);
    let authority = Authority::from_centers(&centers);

    let p = |body| lookup(&personality, body);
    let d = |body| lookup(&design, body);

    let profile = Profile::new(p(Body::Sun)?.coordinate.line, d(Body::Earth)?.coordinate.line);
    if !profile.is_standard() {
        log::info!("profile {} is not one of the twelve standard profiles", profile);
    }

    let incarnation_cross = IncarnationCross::new(
        p(Body::Sun)?.coordinate.gate,
        p(Body::Earth)?.coordinate.gate,
        d(Body::Sun)?.coordinate.gate,
        d(Body::Earth)?.coordinate.gate,
    );

    let variables = Variables {
        digestion: Variable::from(&p(Body::NorthNode)?.coordinate),
        environment: Variable::from(&d(Body::NorthNode)?.coordinate),
        perspective: Variable::from(&p(Body::SouthNode)?.coordinate),
        awareness: Variable::from(&d(Body::SouthNode)?.coordinate),
    };

    log::debug!(
        "chart {}: {} gates, {} channels, {} centers, type {}",
        birth.to_rfc3339(),
        active_gates.len(),
        channels.len(),
        centers.len(),
        hd_type
    );

    Ok(Chart {
        birth,
        design_instant,
        location: *location,
        zodiac: settings.zodiac,
        houses,
        personality,
        design,
        active_gates,
        active_channels: channels,
        defined_centers: centers,
        hd_type,
        authority,
        strategy: hd_type.strategy(),
        profile,
        incarnation_cross,
        variables,
    })
}

/// Decode every body; houses use the tropical longitude so they agree with
/// the tropical cusps whatever frame the gates are read in.
fn activations(sky: &Ephemeris, frame: &ZodiacFrame, houses: &HouseCusps) -> Vec<Activation> {
    sky.positions(&Body::ALL)
        .into_iter()
        .map(|position| {
            let longitude = frame.apply(position.longitude);
            Activation {
                body: position.body,
                longitude,
                coordinate: decode(longitude),
                house: houses.house_of(position.longitude),
            }
        })
        .collect()
}

fn lookup(activations: &[Activation], body: Body) -> Result<&Activation, ChartError> {
    activations
        .iter()
        .find(|a| a.body == body)
        .ok_or(ChartError::MissingActivation(body))
}
