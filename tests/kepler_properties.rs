//! Integration tests for the orbit solver's observable properties.

mod common;

use approx::assert_relative_eq;
use orrery::ephemeris::kepler::{MAX_ITERATIONS, solve_kepler};
use orrery::ephemeris::{KeplerError, OrbitParameters, all_planets, position_at};
use orrery::types::MEAN_MOTION_SCALE;

use common::reference_orbit;

#[test]
fn test_reference_scenario_starts_at_perihelion() {
    let orbit = reference_orbit();
    assert_relative_eq!(orbit.focus_distance(), 15.0665, epsilon = 1e-4);

    let m = orbit.mean_anomaly(0.0);
    assert_eq!(m, 0.0);
    let solution = orbit.solve_eccentric_anomaly(m).unwrap();
    assert_relative_eq!(solution.eccentric_anomaly, 0.0);

    let pos = position_at(0.0, &orbit).unwrap();
    assert_relative_eq!(pos.x, -20.0, epsilon = 1e-9);
    assert_relative_eq!(pos.y, 0.0);
    assert_relative_eq!(pos.z, 0.0, epsilon = 1e-9);
}

#[test]
fn test_convergence_for_documented_case() {
    let orbit = OrbitParameters::new(20.0, 20.0, 0.01).unwrap();
    let m = orbit.mean_anomaly(1000.0);
    let solution = solve_kepler(m, orbit.eccentricity()).unwrap();
    let e = solution.eccentric_anomaly;

    assert!(solution.iterations <= MAX_ITERATIONS);
    assert!((e - orbit.eccentricity() * e.sin() - m).abs() < 1e-6);
}

#[test]
fn test_all_builtin_planets_are_valid() {
    for planet in all_planets() {
        let orbit = OrbitParameters::from_descriptor(planet, MEAN_MOTION_SCALE);
        assert!(orbit.is_ok(), "{}: {:?}", planet.name, orbit);
    }
}

#[test]
fn test_degenerate_orbit_is_rejected() {
    // Foci farther apart than the major axis
    let result = OrbitParameters::new(10.0, 30.0, MEAN_MOTION_SCALE);
    assert!(matches!(result, Err(KeplerError::InvalidOrbit { .. })));
}

#[test]
fn test_positions_track_the_ellipse_over_many_orbits() {
    let orbit = reference_orbit();
    let a = orbit.semi_major_axis();
    let b = orbit.semi_minor_axis();

    let mut t = 0.0;
    while t < 20.0 * orbit.period() {
        let pos = position_at(t, &orbit).unwrap();
        let residual = (pos.x / a).powi(2) + (pos.z / b).powi(2);
        assert!((residual - 1.0).abs() < 1e-4, "t={t}: residual {residual}");
        t += 97.0;
    }
}

#[test]
fn test_circular_orbit_equal_angles() {
    let orbit = OrbitParameters::new(35.0, 0.0, MEAN_MOTION_SCALE).unwrap();
    let angle = |t: f64| {
        let p = position_at(t, &orbit).unwrap();
        p.z.atan2(p.x)
    };

    let (start, step) = (5.0, 10.0);
    let first = angle(start + step) - angle(start);
    let second = angle(start + 2.0 * step) - angle(start + step);
    assert_relative_eq!(first, second, epsilon = 1e-9);
}
