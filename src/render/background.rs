//! Background rendering for the orrery.
//!
//! Provides the starfield and the sun's light.

use bevy::prelude::*;
use rand::Rng;

/// Distance of the star shell from the origin.
const STAR_SHELL_RADIUS: f32 = 900.0;

/// Number of background stars.
const STAR_COUNT: usize = 400;

/// Plugin providing background visual elements.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_starfield, spawn_lighting));
    }
}

/// Random point on a sphere of the given radius (rejection sampled).
fn random_on_shell(rng: &mut impl Rng, radius: f32) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let len_sq = candidate.length_squared();
        if len_sq > 1e-4 && len_sq <= 1.0 {
            return candidate / len_sq.sqrt() * radius;
        }
    }
}

/// Spawn a shell of randomly placed stars around the system.
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Material for stars - emissive white
    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::WHITE * 0.5,
        unlit: true,
        ..default()
    });

    let star_mesh = meshes.add(Sphere::new(1.0));

    let mut rng = rand::thread_rng();

    for _ in 0..STAR_COUNT {
        let position = random_on_shell(&mut rng, STAR_SHELL_RADIUS);
        let scale = rng.gen_range(0.5..1.5);

        commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(star_material.clone()),
            Transform::from_translation(position).with_scale(Vec3::splat(scale)),
        ));
    }

    info!("Spawned {} background stars", STAR_COUNT);
}

/// Light the planets from the sun's position.
fn spawn_lighting(mut commands: Commands) {
    commands.spawn((
        PointLight {
            intensity: 4_000_000.0,
            range: 400.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::default(),
    ));

    info!("Scene lighting initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_lie_on_shell() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let p = random_on_shell(&mut rng, STAR_SHELL_RADIUS);
            assert!((p.length() - STAR_SHELL_RADIUS).abs() < 1e-2);
        }
    }
}
