//! Common test utilities for integration tests.

use bevy::math::Ray3d;
use bevy::prelude::*;
use orrery::ephemeris::OrbitParameters;
use orrery::picking::PickCamera;
use orrery::types::MEAN_MOTION_SCALE;

/// App with only the minimal plugins (no window, no GPU).
pub fn create_minimal_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app
}

/// The innermost built-in planet: a = 20, second focus at (15, -1, 1).
pub fn reference_orbit() -> OrbitParameters {
    let focus_distance = (15.0f64 * 15.0 + 1.0 + 1.0).sqrt();
    OrbitParameters::new(20.0, focus_distance, MEAN_MOTION_SCALE).unwrap()
}

/// Orthographic camera looking down -Z from z = 100; NDC maps to world
/// x/y scaled by 10.
pub struct TopDownCamera;

impl PickCamera for TopDownCamera {
    fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray3d> {
        Some(Ray3d::new((ndc * 10.0).extend(100.0), Dir3::NEG_Z))
    }
}

/// NDC that the top-down camera maps onto world (x, y).
pub fn ndc_over(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y) / 10.0
}
