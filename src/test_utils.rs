//! Test utilities for solver and picker tests.
//!
//! Provides orbit fixtures and a deterministic camera for ray picking.

use bevy::math::Ray3d;
use bevy::prelude::*;

use crate::ephemeris::OrbitParameters;
use crate::picking::{ColliderShape, PickCamera};
use crate::types::MEAN_MOTION_SCALE;

/// Fixtures for creating test orbits.
pub mod fixtures {
    use super::*;

    /// Orbit with the given semi-major axis and eccentricity.
    pub fn eccentric_orbit(semi_major_axis: f64, eccentricity: f64) -> OrbitParameters {
        assert!(
            (0.0..1.0).contains(&eccentricity),
            "Eccentricity must be in [0, 1) for elliptical orbit"
        );
        OrbitParameters::new(
            semi_major_axis,
            2.0 * semi_major_axis * eccentricity,
            MEAN_MOTION_SCALE,
        )
        .unwrap()
    }

    /// Circular orbit of the given radius.
    pub fn circular_orbit(radius: f64) -> OrbitParameters {
        eccentric_orbit(radius, 0.0)
    }

    /// Sphere collider centered at `center`.
    pub fn sphere(center: Vec3, radius: f32) -> ColliderShape {
        ColliderShape::Sphere { center, radius }
    }
}

/// Orthographic camera looking down -Z from z = 100; NDC maps to world
/// x/y scaled by 10.
pub struct TopDownCamera;

impl PickCamera for TopDownCamera {
    fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray3d> {
        Some(Ray3d::new((ndc * 10.0).extend(100.0), Dir3::NEG_Z))
    }
}
