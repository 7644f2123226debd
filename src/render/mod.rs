//! Rendering systems for the orrery.
//!
//! This module provides the visual representation of the sun, planets,
//! orbit paths, labels and background.

mod background;
pub mod bodies;
pub mod labels;
pub mod orbits;
pub mod sync;

use bevy::prelude::*;

use self::background::BackgroundPlugin;
use self::bodies::CelestialBodyPlugin;
use self::labels::LabelPlugin;
use self::orbits::OrbitPathPlugin;
use self::sync::sync_orbit_positions;
use crate::types::PickingSet;

// Re-export for use in other modules
pub use self::bodies::{LastKnownPosition, OrbitPath, OrbitingBody, PlanetCatalog};
pub use self::labels::LabelSettings;
pub use self::orbits::OrbitPathSettings;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            CelestialBodyPlugin,
            BackgroundPlugin,
            OrbitPathPlugin,
            LabelPlugin,
        ))
        .add_systems(Update, sync_orbit_positions.before(PickingSet::Resolve));
    }
}
