//! Orrery - Kepler orbits with pointer picking
//!
//! A desktop application animating a handful of planets on elliptical
//! orbits. Pointing at a planet or its orbit path highlights it.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orrery::camera::CameraPlugin;
use orrery::ephemeris::OrbitSettings;
use orrery::input::InputPlugin;
use orrery::picking::PickingPlugin;
use orrery::render::RenderPlugin;
use orrery::time::TimePlugin;
use orrery::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(EguiPlugin::default())
        .insert_resource(ClearColor(Color::BLACK))
        // Insert resources before plugins that depend on them
        .insert_resource(OrbitSettings::default())
        // Add simulation plugins
        .add_plugins((
            CameraPlugin,
            TimePlugin,
            PickingPlugin,
            InputPlugin,
            RenderPlugin,
            UiPlugin,
        ))
        .run();
}
