//! Position synchronization between the orbit solver and rendering.

use bevy::prelude::*;

use crate::ephemeris::position_at;
use crate::render::bodies::{LastKnownPosition, OrbitingBody};
use crate::types::SimulationTime;

/// Move every orbiting body to its solved position for the current time.
///
/// A solver failure holds the body at its last good position for this frame
/// instead of halting the frame.
pub fn sync_orbit_positions(
    mut query: Query<(&OrbitingBody, &mut Transform, &mut LastKnownPosition)>,
    time: Res<SimulationTime>,
) {
    for (body, mut transform, mut last) in query.iter_mut() {
        match position_at(time.current, &body.params) {
            Ok(pos) => {
                let pos = pos.as_vec3();
                transform.translation = pos;
                last.0 = pos;
            }
            Err(err) => {
                transform.translation = last.0;
                warn!("{}: holding last known position ({})", body.name, err);
            }
        }
    }
}
