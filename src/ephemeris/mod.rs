//! Ephemeris module for computing orbiting body positions.
//!
//! Coordinate frame:
//! - Each orbit has its own local frame with the ellipse in the XZ plane,
//!   centered on the frame origin and with the major axis along +X.
//! - The frame is placed halfway between the two foci and aimed at the
//!   second focus, which puts the central mass (world origin) on the near
//!   focus of every orbit.

pub mod data;
pub mod kepler;

#[cfg(test)]
mod proptest_kepler;

pub use data::{PlanetDescriptor, all_planets};
pub use kepler::{KeplerError, KeplerSolution, OrbitParameters, position_at};

use bevy::prelude::*;

use crate::types::{DEG_TO_RAD, MEAN_MOTION_SCALE};

/// Global orbit settings shared by every body.
#[derive(Resource, Clone, Debug)]
pub struct OrbitSettings {
    /// Gravitational strength of the central mass (GM).
    pub mean_motion_scale: f64,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            mean_motion_scale: MEAN_MOTION_SCALE,
        }
    }
}

/// Placement of an orbit's local frame in world space.
///
/// Below this focus length the orbit is treated as circular and the frame is
/// only rolled about +X.
pub fn orbit_frame(descriptor: &PlanetDescriptor) -> Transform {
    let focus = descriptor.orbit_focus.as_vec3();
    let roll = (descriptor.orbit_roll_deg * DEG_TO_RAD) as f32;

    let axis = if focus.length_squared() > 1e-12 {
        focus.normalize()
    } else {
        Vec3::X
    };

    let aim = Quat::from_rotation_arc(Vec3::X, axis);
    let rotation = Quat::from_axis_angle(axis, roll) * aim;

    Transform::from_translation(focus / 2.0).with_rotation(rotation)
}
