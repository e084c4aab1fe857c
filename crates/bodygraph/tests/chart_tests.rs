use bodygraph::chart::{build_chart, ChartError, ChartSettings};
use bodygraph::ephemeris::{Body, GeoLocation};
use bodygraph::gates::ZodiacSystem;
use bodygraph::mechanics::{Authority, Center, Channel, HdType, Profile, Strategy};
use bodygraph::{chart_from_fields, InputError};
use chrono::{DateTime, TimeZone, Utc};

fn fixture_birth() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1990, 1, 1, 12, 0, 0).unwrap()
}

fn fixture_location() -> GeoLocation {
    GeoLocation::new(37.7749, -122.4194).unwrap()
}

#[test]
fn test_fixture_chart() {
    let chart = build_chart(fixture_birth(), &fixture_location(), &ChartSettings::default()).unwrap();

    let sun = chart.personality_of(Body::Sun).unwrap();
    assert_eq!(sun.coordinate.to_string(), "50.6.4.2.3");
    assert_eq!(chart.personality_of(Body::Earth).unwrap().coordinate.gate, 18);
    assert_eq!(chart.design_of(Body::Sun).unwrap().coordinate.to_string(), "35.2.1.2.4");
    assert_eq!(chart.design_of(Body::Earth).unwrap().coordinate.to_string(), "3.2.1.2.4");

    assert_eq!(
        chart.active_gates,
        vec![3, 16, 17, 18, 25, 26, 35, 40, 41, 43, 45, 49, 50, 51, 56, 57, 58, 60]
    );
    assert_eq!(
        chart.active_channels,
        vec![Channel(3, 60), Channel(18, 58), Channel(25, 51)]
    );
    assert_eq!(chart.open_centers(), vec![Center::Head]);
    assert_eq!(chart.hd_type, HdType::ManifestingGenerator);
    assert_eq!(chart.authority, Authority::Emotional);
    assert_eq!(chart.strategy, Strategy::Respond);
    assert_eq!(chart.profile, Profile::new(6, 2));
    assert_eq!(chart.incarnation_cross.name, "Cross of 50/18");
    assert_eq!(chart.variables.digestion.to_string(), "Color 4 - Tone 6");
    assert_eq!(chart.variables.awareness.to_string(), "Color 4 - Tone 5");
}

#[test]
fn test_fixture_houses() {
    let chart = build_chart(fixture_birth(), &fixture_location(), &ChartSettings::default()).unwrap();
    let houses: Vec<u8> = chart.personality.iter().map(|a| a.house).collect();
    assert_eq!(houses, vec![8, 2, 10, 9, 3, 2, 2, 7, 2, 8, 8, 8, 6]);
    assert!(chart.design.iter().all(|a| (1..=12).contains(&a.house)));
}

#[test]
fn test_chart_lists_every_body_in_order() {
    let chart = build_chart(fixture_birth(), &fixture_location(), &ChartSettings::default()).unwrap();
    let bodies: Vec<Body> = chart.personality.iter().map(|a| a.body).collect();
    assert_eq!(bodies, Body::ALL.to_vec());
    assert_eq!(chart.design.len(), 13);
    assert_eq!(
        chart.design_instant,
        Utc.with_ymd_and_hms(1989, 10, 5, 12, 0, 0).unwrap()
    );
}

#[test]
fn test_centers_and_channels_consistent() {
    let start = Utc.with_ymd_and_hms(1960, 3, 1, 6, 0, 0).unwrap();
    for step in 0..40 {
        let birth = start + chrono::Duration::days(step * 397);
        let chart = build_chart(birth, &fixture_location(), &ChartSettings::default()).unwrap();
        for channel in &chart.active_channels {
            let (a, b) = channel.centers().unwrap();
            assert!(chart.is_defined(a) && chart.is_defined(b));
            assert!(chart.active_gates.contains(&channel.0));
            assert!(chart.active_gates.contains(&channel.1));
        }
        assert_eq!(chart.hd_type, HdType::from_centers(&chart.defined_centers));
        assert_eq!(chart.strategy, chart.hd_type.strategy());
    }
}

#[test]
fn test_chart_is_deterministic() {
    let a = build_chart(fixture_birth(), &fixture_location(), &ChartSettings::default()).unwrap();
    let b = build_chart(fixture_birth(), &fixture_location(), &ChartSettings::default()).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_chart_json_shape() {
    let chart = build_chart(fixture_birth(), &fixture_location(), &ChartSettings::default()).unwrap();
    let value = serde_json::to_value(&chart).unwrap();
    assert_eq!(value["type"], "Manifesting Generator");
    assert_eq!(value["profile"], "6/2");
    assert_eq!(value["authority"], "Emotional");
    assert_eq!(value["strategy"], "To Respond");
    assert_eq!(value["personality"][0]["body"], "sun");
}

#[test]
fn test_sidereal_frame_shifts_longitudes() {
    let tropical = build_chart(fixture_birth(), &fixture_location(), &ChartSettings::default()).unwrap();
    let settings = ChartSettings::default().with_zodiac(ZodiacSystem::Sidereal);
    let sidereal = build_chart(fixture_birth(), &fixture_location(), &settings).unwrap();

    let t = tropical.personality_of(Body::Sun).unwrap();
    let s = sidereal.personality_of(Body::Sun).unwrap();
    let shift = t.longitude - s.longitude;
    assert!((shift - 23.72).abs() < 0.05, "ayanamsa shift {}", shift);
    // House placement does not depend on the frame
    assert_eq!(t.house, s.house);
}

#[test]
fn test_draco_puts_node_at_zero() {
    let settings = ChartSettings::default().with_zodiac(ZodiacSystem::Draco);
    let chart = build_chart(fixture_birth(), &fixture_location(), &settings).unwrap();
    let node = chart.personality_of(Body::NorthNode).unwrap();
    assert!(node.longitude < 1e-6 || node.longitude > 360.0 - 1e-6);
}

#[test]
fn test_invalid_inputs() {
    let bad_lat = GeoLocation { lat: 91.0, lon: 0.0 };
    assert_eq!(
        build_chart(fixture_birth(), &bad_lat, &ChartSettings::default()),
        Err(ChartError::InvalidInput(InputError::LatitudeOutOfRange(91.0)))
    );
    assert!(matches!(
        chart_from_fields("not a date", 10.0, 10.0),
        Err(ChartError::InvalidInput(InputError::InvalidInstant { .. }))
    ));
    let pole = GeoLocation { lat: -90.0, lon: 0.0 };
    assert!(matches!(
        build_chart(fixture_birth(), &pole, &ChartSettings::default()),
        Err(ChartError::Houses(_))
    ));
}

#[test]
fn test_form_fields() {
    let chart = chart_from_fields("1990-01-01T12:00", 37.7749, -122.4194).unwrap();
    assert_eq!(chart.profile.to_string(), "6/2");
}
