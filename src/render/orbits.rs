//! Orbit path rendering using Bevy Gizmos.
//!
//! Paths are sampled from the same ellipse parametrization the solver uses,
//! so a planet always sits exactly on its drawn path. The path entity's
//! `GlobalTransform` is applied at draw time, which makes the picker's
//! scale emphasis visible.

use bevy::prelude::*;

use crate::ephemeris::OrbitParameters;
use crate::render::bodies::OrbitPath;

/// Plugin providing orbit path visualization.
pub struct OrbitPathPlugin;

impl Plugin for OrbitPathPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitPathSettings>()
            .add_systems(Update, draw_orbit_paths);
    }
}

/// Settings for orbit path rendering.
#[derive(Resource, Clone, Debug)]
pub struct OrbitPathSettings {
    /// Whether to show orbit paths.
    pub visible: bool,
    /// Number of segments for drawing the ellipse (higher = smoother).
    pub segments: usize,
    /// Path color.
    pub color: Color,
    /// Radius of the pick tube around the path, in render units.
    pub pick_radius: f32,
}

impl Default for OrbitPathSettings {
    fn default() -> Self {
        Self {
            visible: true,
            segments: 256,
            color: Color::srgb_u8(0xe8, 0xe8, 0xe8),
            pick_radius: 0.6,
        }
    }
}

/// Sample `segments` points around the ellipse, in orbit-frame space.
///
/// The closing point is not repeated; consumers close the loop themselves.
pub fn sample_orbit(params: &OrbitParameters, segments: usize) -> Vec<Vec3> {
    (0..segments)
        .map(|i| {
            let e = i as f64 / segments as f64 * std::f64::consts::TAU;
            params.position_on_ellipse(e).as_vec3()
        })
        .collect()
}

/// Draw every orbit path as a closed line strip.
fn draw_orbit_paths(
    mut gizmos: Gizmos,
    settings: Res<OrbitPathSettings>,
    paths: Query<(&OrbitPath, &GlobalTransform)>,
) {
    if !settings.visible {
        return;
    }

    let segments = settings.segments.max(16);

    for (path, transform) in paths.iter() {
        let points = sample_orbit(&path.params, segments);
        let Some(&first) = points.first() else {
            continue;
        };

        gizmos.linestrip(
            points
                .into_iter()
                .chain(std::iter::once(first))
                .map(|p| transform.transform_point(p)),
            path.color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MEAN_MOTION_SCALE;

    #[test]
    fn test_samples_lie_on_ellipse() {
        let params = OrbitParameters::new(55.0, 6.7, MEAN_MOTION_SCALE).unwrap();
        let a = params.semi_major_axis() as f32;
        let b = params.semi_minor_axis() as f32;

        let points = sample_orbit(&params, 50);
        assert_eq!(points.len(), 50);
        assert!(points[0].abs_diff_eq(Vec3::new(-a, 0.0, 0.0), 1e-4));
        for p in points {
            let residual = (p.x / a).powi(2) + (p.z / b).powi(2);
            assert!((residual - 1.0).abs() < 1e-4);
        }
    }
}
