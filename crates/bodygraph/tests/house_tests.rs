use bodygraph::ephemeris::GeoLocation;
use bodygraph::houses::{
    equal_cusps, find_house, greenwich_sidereal_time, house_cusps, mean_obliquity, HouseError,
};
use bodygraph::time::{julian_date, J2000};
use chrono::{TimeZone, Utc};

fn san_francisco() -> GeoLocation {
    GeoLocation::new(37.7749, -122.4194).unwrap()
}

#[test]
fn test_gst_at_j2000() {
    let gst = greenwich_sidereal_time(J2000);
    assert!((gst - 18.697374558).abs() < 1e-6, "gst {}", gst);
}

#[test]
fn test_fixture_ascendant() {
    let birth = Utc.with_ymd_and_hms(1990, 1, 1, 12, 0, 0).unwrap();
    let houses = house_cusps(birth, &san_francisco()).unwrap();
    assert!((houses.ascendant - 55.2535).abs() < 0.01, "asc {}", houses.ascendant);
    assert!((houses.obliquity - 23.44059124).abs() < 1e-6);
    assert!((mean_obliquity(julian_date(birth)) - houses.obliquity).abs() < 1e-12);
    assert!(!houses.polar_unreliable);
    assert!((houses.descendant - (houses.ascendant + 180.0)).abs() < 1e-9);
    assert_eq!(houses.cusps[0], houses.ascendant);
}

#[test]
fn test_every_longitude_has_exactly_one_house() {
    for asc in [0.0, 17.3, 55.2535, 200.0, 345.9] {
        let cusps = equal_cusps(asc);
        for tenth in 0..3600 {
            let lon = tenth as f64 / 10.0;
            let house = find_house(lon, &cusps);
            assert!((1..=12).contains(&house), "lon {} asc {}", lon, asc);

            let hits = (0..12)
                .filter(|&i| {
                    let start = cusps[i];
                    let end = cusps[(i + 1) % 12];
                    if start < end {
                        lon >= start && lon < end
                    } else {
                        lon >= start || lon < end
                    }
                })
                .count();
            assert_eq!(hits, 1);
        }
    }
}

#[test]
fn test_find_house_wraparound() {
    let cusps = equal_cusps(350.0);
    assert_eq!(find_house(355.0, &cusps), 1);
    assert_eq!(find_house(5.0, &cusps), 1);
    assert_eq!(find_house(20.0, &cusps), 2);
    assert_eq!(find_house(349.9, &cusps), 12);
    assert_eq!(find_house(f64::NAN, &cusps), 0);
}

#[test]
fn test_pole_is_an_error() {
    let birth = Utc.with_ymd_and_hms(1990, 1, 1, 12, 0, 0).unwrap();
    let pole = GeoLocation { lat: 90.0, lon: 0.0 };
    assert_eq!(
        house_cusps(birth, &pole),
        Err(HouseError::PolarLatitude { lat: 90.0 })
    );
}

#[test]
fn test_polar_circle_is_flagged() {
    let birth = Utc.with_ymd_and_hms(1990, 6, 21, 0, 0, 0).unwrap();
    let tromso = GeoLocation::new(69.65, 18.96).unwrap();
    let houses = house_cusps(birth, &tromso).unwrap();
    assert!(houses.polar_unreliable);
    assert!((0.0..360.0).contains(&houses.ascendant));
}

#[test]
fn test_invalid_location_rejected() {
    let birth = Utc.with_ymd_and_hms(1990, 1, 1, 12, 0, 0).unwrap();
    let bad = GeoLocation { lat: 12.0, lon: 200.0 };
    assert!(matches!(
        house_cusps(birth, &bad),
        Err(HouseError::InvalidLocation(_))
    ));
}
