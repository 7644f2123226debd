//! Property-based tests for the Kepler solver using proptest.
//!
//! These tests verify geometric invariants across a wide range of orbits.

use proptest::prelude::*;
use std::f64::consts::{PI, TAU};

use super::kepler::{MAX_ITERATIONS, OrbitParameters, position_at, solve_kepler};
use crate::test_utils::fixtures;

/// Orbits with eccentricity in [0, 0.95).
fn orbit_strategy() -> impl Strategy<Value = OrbitParameters> {
    (1.0f64..200.0, 0.0f64..0.95).prop_map(|(a, e)| fixtures::eccentric_orbit(a, e))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every solved position satisfies (x/a)² + (z/b)² = 1.
    #[test]
    fn prop_position_on_ellipse(orbit in orbit_strategy(), time in 0.0f64..1.0e7) {
        let pos = position_at(time, &orbit).unwrap();
        let residual = (pos.x / orbit.semi_major_axis()).powi(2)
            + (pos.z / orbit.semi_minor_axis()).powi(2);

        prop_assert!((residual - 1.0).abs() < 1e-4, "residual {}", residual);
        prop_assert_eq!(pos.y, 0.0);
    }

    /// The solver converges inside the iteration cap and satisfies the equation.
    #[test]
    fn prop_kepler_equation_residual(m in -50.0f64..50.0, e in 0.0f64..0.95) {
        let solution = solve_kepler(m, e).unwrap();
        let ea = solution.eccentric_anomaly;

        prop_assert!(solution.iterations <= MAX_ITERATIONS);
        prop_assert!((ea - e * ea.sin() - m).abs() < 1e-6);
    }

    /// Circular orbits sweep equal angles in equal times.
    #[test]
    fn prop_circular_constant_angular_speed(
        a in 5.0f64..150.0,
        start in 0.0f64..1.0e5,
        step in 1.0f64..50.0,
    ) {
        let orbit = fixtures::circular_orbit(a);
        let angle = |t: f64| {
            let p = position_at(t, &orbit).unwrap();
            p.z.atan2(p.x)
        };
        let wrap = |d: f64| (d + PI).rem_euclid(TAU) - PI;

        let first = wrap(angle(start + step) - angle(start));
        let second = wrap(angle(start + 2.0 * step) - angle(start + step));

        prop_assert!((first - second).abs() < 1e-6, "{} vs {}", first, second);
    }

    /// Eccentric orbits sweep angle about the central mass faster near
    /// perihelion than near aphelion.
    #[test]
    fn prop_angular_speed_peaks_at_perihelion(a in 5.0f64..150.0, e in 0.05f64..0.9) {
        let orbit = fixtures::eccentric_orbit(a, e);
        let n = orbit.mean_motion();
        // Small step relative to the period keeps both samples local.
        let dt = 1e-3 / n;
        let aphelion = PI / n;

        let focus = orbit.near_focus();
        let angle = |t: f64| {
            let p = position_at(t, &orbit).unwrap() - focus;
            p.z.atan2(p.x)
        };
        let wrap = |d: f64| (d + PI).rem_euclid(TAU) - PI;
        let sweep = |t: f64| wrap(angle(t + dt) - angle(t)).abs();

        prop_assert!(sweep(0.0) > sweep(aphelion), "{} vs {}", sweep(0.0), sweep(aphelion));
    }
}
