//! Truncated longitude series.
//!
//! All functions take `t`, Julian centuries from J2000.0, and return a
//! geocentric ecliptic longitude in degrees normalized to [0, 360). These
//! are deliberately low-order: the Sun is good to about 0.01°, the Moon to a
//! few arcminutes at best, the inner planets only roughly.

use crate::time::{normalize_degrees, to_radians};

/// Solar mean anomaly in degrees.
fn sun_mean_anomaly(t: f64) -> f64 {
    357.52911 + 35999.05029 * t - 0.0001537 * t * t
}

/// Solar equation of center in degrees.
fn sun_equation_of_center(t: f64) -> f64 {
    let m = sun_mean_anomaly(t);
    (1.914602 - 0.004817 * t - 0.000014 * t * t) * to_radians(m).sin()
        + (0.019993 - 0.000101 * t) * to_radians(2.0 * m).sin()
        + 0.000289 * to_radians(3.0 * m).sin()
}

pub fn sun_longitude(t: f64) -> f64 {
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    normalize_degrees(l0 + sun_equation_of_center(t))
}

pub fn moon_longitude(t: f64) -> f64 {
    let l = 218.3164477 + 481267.88123421 * t;
    let d = 297.8501921 + 445267.1114034 * t;
    let mp = 134.9633964 + 477198.8675055 * t;

    let mut lon = l + 6.288774 * to_radians(mp).sin();
    lon += 1.274027 * to_radians(2.0 * d - mp).sin();
    lon += 0.658314 * to_radians(2.0 * d).sin();
    normalize_degrees(lon)
}

// Inner planets: one mean-longitude term plus a single first-order
// sinusoid. A simplification, not a physical model.

pub fn mercury_longitude(t: f64) -> f64 {
    let l = 252.250906 + 149472.6746358 * t;
    normalize_degrees(l + 23.4406 * to_radians(l).sin())
}

pub fn venus_longitude(t: f64) -> f64 {
    let l = 181.979801 + 58517.8156760 * t;
    normalize_degrees(l + 0.7758 * to_radians(l).sin())
}

pub fn mars_longitude(t: f64) -> f64 {
    let l = 355.433 + 19140.299 * t;
    normalize_degrees(l + 1.849 * to_radians(l).sin())
}

/// Mean longitude of the ascending lunar node, no periodic terms.
pub fn mean_node_longitude(t: f64) -> f64 {
    let omega = 125.04452 - 1934.136261 * t + 0.0020708 * t * t + t * t * t / 450000.0;
    normalize_degrees(omega)
}

/// J2000 mean orbital elements with linear rates per century.
#[derive(Debug, Clone, Copy)]
pub struct OrbitalElements {
    /// Semi-major axis (AU)
    pub a: f64,
    /// Eccentricity
    pub e: f64,
    /// Mean longitude at epoch and rate (degrees, degrees/century)
    pub l0: f64,
    pub l_rate: f64,
    /// Longitude of perihelion at epoch and rate
    pub peri0: f64,
    pub peri_rate: f64,
}

pub const JUPITER: OrbitalElements = OrbitalElements {
    a: 5.20288700,
    e: 0.04838624,
    l0: 34.39644051,
    l_rate: 3034.74612775,
    peri0: 14.72847983,
    peri_rate: 0.21252668,
};

pub const SATURN: OrbitalElements = OrbitalElements {
    a: 9.53667594,
    e: 0.05386179,
    l0: 49.95424423,
    l_rate: 1222.49362201,
    peri0: 92.59887831,
    peri_rate: -0.41897216,
};

pub const URANUS: OrbitalElements = OrbitalElements {
    a: 19.18916464,
    e: 0.04725744,
    l0: 313.23810451,
    l_rate: 428.48202785,
    peri0: 170.95427630,
    peri_rate: 0.40805281,
};

pub const NEPTUNE: OrbitalElements = OrbitalElements {
    a: 30.06992276,
    e: 0.00859048,
    l0: -55.12002969,
    l_rate: 218.45945325,
    peri0: 44.96476227,
    peri_rate: -0.32241464,
};

pub const PLUTO: OrbitalElements = OrbitalElements {
    a: 39.48211675,
    e: 0.24882730,
    l0: 238.92903833,
    l_rate: 145.20780515,
    peri0: 224.06891629,
    peri_rate: -0.04062942,
};

/// Equation of center to third order in eccentricity, degrees.
fn equation_of_center(mean_anomaly: f64, e: f64) -> f64 {
    let m = to_radians(mean_anomaly);
    ((2.0 * e - e.powi(3) / 4.0) * m.sin()
        + 1.25 * e * e * (2.0 * m).sin()
        + 13.0 / 12.0 * e.powi(3) * (3.0 * m).sin())
    .to_degrees()
}

/// Heliocentric (longitude, radius) of the Earth derived from the solar series.
fn earth_heliocentric(t: f64) -> (f64, f64) {
    let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;
    let true_anomaly = sun_mean_anomaly(t) + sun_equation_of_center(t);
    let radius = 1.000001018 * (1.0 - e * e) / (1.0 + e * to_radians(true_anomaly).cos());
    (normalize_degrees(sun_longitude(t) + 180.0), radius)
}

/// Geocentric longitude of an outer planet from its mean elements.
///
/// Orbital inclination is ignored; the heliocentric position is taken in
/// the ecliptic plane and shifted by the Earth's position.
pub fn outer_planet_longitude(elements: &OrbitalElements, t: f64) -> f64 {
    let mean_longitude = elements.l0 + elements.l_rate * t;
    let perihelion = elements.peri0 + elements.peri_rate * t;
    let mean_anomaly = mean_longitude - perihelion;

    let true_anomaly = mean_anomaly + equation_of_center(mean_anomaly, elements.e);
    let helio_lon = normalize_degrees(true_anomaly + perihelion);
    let radius = elements.a * (1.0 - elements.e * elements.e)
        / (1.0 + elements.e * to_radians(true_anomaly).cos());

    let (earth_lon, earth_radius) = earth_heliocentric(t);
    let x = radius * to_radians(helio_lon).cos() - earth_radius * to_radians(earth_lon).cos();
    let y = radius * to_radians(helio_lon).sin() - earth_radius * to_radians(earth_lon).sin();
    normalize_degrees(y.atan2(x).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_at_j2000() {
        // Geometric mean longitude 280.46646 plus equation of center
        assert!((sun_longitude(0.0) - 280.3822).abs() < 1e-3);
    }

    #[test]
    fn test_node_regresses() {
        let t0 = mean_node_longitude(0.0);
        let t1 = mean_node_longitude(0.01); // ~1 year later
        assert!((t0 - 125.04452).abs() < 1e-9);
        // Moves backwards about 19.3 degrees per year
        assert!((normalize_degrees(t0 - t1) - 19.34).abs() < 0.05);
    }

    #[test]
    fn test_equation_of_center_vanishes_for_circular_orbit() {
        assert_eq!(equation_of_center(123.0, 0.0), 0.0);
    }
}
