//! Body spawning: the sun, the planets and their orbit frames.
//!
//! Every planet lives in its own orbit frame (see [`orbit_frame`]) together
//! with its orbit path. Both the planet and the path carry a pick collider
//! and are registered with the scene picker.

use bevy::prelude::*;

use crate::ephemeris::{
    OrbitParameters, OrbitSettings, PlanetDescriptor, all_planets, orbit_frame, position_at,
};
use crate::picking::{ColliderShape, PickCategory, PickCollider, ScenePicker};
use crate::render::orbits::{OrbitPathSettings, sample_orbit};
use crate::types::SimulationTime;

/// Visual radius of the sun.
pub const SUN_RADIUS: f32 = 7.0;

/// Number of segments in an orbit path's pick tube.
pub const PATH_COLLIDER_SEGMENTS: usize = 50;

/// Marker for the central mass.
#[derive(Component)]
pub struct Sun;

/// A planet moving along its orbit frame's ellipse.
#[derive(Component, Clone, Debug)]
pub struct OrbitingBody {
    pub name: &'static str,
    pub params: OrbitParameters,
    pub radius: f32,
}

/// Position from the last frame the solver succeeded, in orbit-frame space.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct LastKnownPosition(pub Vec3);

/// Drawable orbit path of one planet.
#[derive(Component, Clone, Debug)]
pub struct OrbitPath {
    pub name: &'static str,
    pub params: OrbitParameters,
    pub color: Color,
}

/// Planets to spawn at startup. Defaults to the built-in set.
#[derive(Resource, Clone, Debug)]
pub struct PlanetCatalog(pub Vec<PlanetDescriptor>);

impl Default for PlanetCatalog {
    fn default() -> Self {
        Self(all_planets().to_vec())
    }
}

/// Plugin providing body spawning.
pub struct CelestialBodyPlugin;

impl Plugin for CelestialBodyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlanetCatalog>()
            .add_systems(Startup, (spawn_sun, spawn_planets));
    }
}

/// Approximate sRGB color of a planet.
pub fn planet_color(planet: &PlanetDescriptor) -> Color {
    let [r, g, b] = planet.color_rgb();
    Color::srgb_u8(r, g, b)
}

fn spawn_sun(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let color = Color::srgb_u8(0xff, 0xaf, 0x00);
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(SUN_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: color,
            emissive: color.to_linear() * 2.0,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        Sun,
    ));
}

/// Spawn every valid planet with its orbit frame, path and colliders.
///
/// Planets whose orbit parameters are invalid are skipped with a warning so
/// the rest of the scene still comes up.
pub fn spawn_planets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut picker: ResMut<ScenePicker>,
    orbit_settings: Res<OrbitSettings>,
    path_settings: Res<OrbitPathSettings>,
    time: Res<SimulationTime>,
    catalog: Res<PlanetCatalog>,
) {
    let mut spawned = 0;

    for planet in &catalog.0 {
        let scale = orbit_settings.mean_motion_scale;
        let params = match OrbitParameters::from_descriptor(planet, scale) {
            Ok(params) => params,
            Err(err) => {
                warn!("Skipping {}: {}", planet.name, err);
                continue;
            }
        };

        let start = position_at(time.current, &params)
            .unwrap_or_else(|_| params.position_on_ellipse(0.0))
            .as_vec3();
        let color = planet_color(planet);

        let frame = commands
            .spawn((
                orbit_frame(planet),
                Visibility::default(),
                Name::new(format!("{} orbit frame", planet.name)),
            ))
            .id();

        let body = commands
            .spawn((
                Mesh3d(meshes.add(Sphere::new(planet.radius))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: color,
                    ..default()
                })),
                Transform::from_translation(start),
                OrbitingBody {
                    name: planet.name,
                    params,
                    radius: planet.radius,
                },
                LastKnownPosition(start),
                PickCollider {
                    shape: ColliderShape::Sphere {
                        center: Vec3::ZERO,
                        radius: planet.radius,
                    },
                },
                Name::new(planet.name),
                ChildOf(frame),
            ))
            .id();

        let path = commands
            .spawn((
                Transform::default(),
                Visibility::default(),
                OrbitPath {
                    name: planet.name,
                    params,
                    color: path_settings.color,
                },
                PickCollider {
                    shape: ColliderShape::Tube {
                        points: sample_orbit(&params, PATH_COLLIDER_SEGMENTS),
                        radius: path_settings.pick_radius,
                        closed: true,
                    },
                },
                Name::new(format!("{} orbit path", planet.name)),
                ChildOf(frame),
            ))
            .id();

        for (collider, category) in [(body, PickCategory::Body), (path, PickCategory::Orbit)] {
            if let Err(err) = picker.0.register_pickable(collider.into(), collider, category) {
                warn!("{}: {}", planet.name, err);
            }
        }

        spawned += 1;
    }

    info!("Spawned {} of {} planets", spawned, catalog.0.len());
}
