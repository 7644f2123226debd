//! Camera system for the orrery.
//!
//! A perspective camera that orbits the central mass: left drag rotates,
//! the scroll wheel zooms. Panning is disabled so the sun stays centered.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
};

/// Initial camera position in render units.
pub const START_POSITION: Vec3 = Vec3::new(-160.0, 80.0, -20.0);

/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 45.0;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Tunables for camera control.
#[derive(Resource, Clone, Debug)]
pub struct CameraSettings {
    /// Closest allowed distance to the origin.
    pub min_distance: f32,
    /// Farthest allowed distance to the origin.
    pub max_distance: f32,
    /// Fractional distance change per scroll line.
    pub zoom_speed: f32,
    /// Radians of rotation per pixel of drag.
    pub rotate_speed: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            min_distance: 15.0,
            max_distance: 200.0,
            zoom_speed: 0.1,
            rotate_speed: 0.005,
        }
    }
}

/// Spherical coordinates of the camera around the origin.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Angle around +Y, radians.
    pub yaw: f32,
    /// Elevation above the XZ plane, radians.
    pub pitch: f32,
    pub distance: f32,
}

impl OrbitCamera {
    /// Keep the camera just short of the poles, where `looking_at` flips.
    const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

    pub fn from_position(position: Vec3) -> Self {
        let distance = position.length();
        Self {
            yaw: position.x.atan2(position.z),
            pitch: (position.y / distance).asin(),
            distance,
        }
    }

    pub fn position(&self) -> Vec3 {
        let horizontal = self.distance * self.pitch.cos();
        Vec3::new(
            horizontal * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            horizontal * self.yaw.cos(),
        )
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x;
        self.pitch = (self.pitch + delta.y).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    pub fn zoom(&mut self, factor: f32, settings: &CameraSettings) {
        self.distance =
            (self.distance * factor).clamp(settings.min_distance, settings.max_distance);
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(Vec3::ZERO, Vec3::Y)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_position(START_POSITION)
    }
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .init_resource::<OrbitCamera>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, (camera_zoom, camera_rotate, apply_orbit_camera).chain());
    }
}

/// Spawn the main camera with perspective projection.
fn setup_camera(mut commands: Commands, orbit: Res<OrbitCamera>) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            near: 0.1,
            far: 4000.0,
            ..default()
        }),
        orbit.transform(),
        MainCamera,
    ));
}

/// Handle mouse scroll wheel for zoom.
fn camera_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    settings: Res<CameraSettings>,
    mut orbit: ResMut<OrbitCamera>,
) {
    // Skip if no scroll input
    if mouse_scroll.delta.y == 0.0 {
        return;
    }

    let zoom_factor = 1.0 - mouse_scroll.delta.y * settings.zoom_speed;
    orbit.zoom(zoom_factor, &settings);
}

/// Handle left mouse button drag for rotation.
fn camera_rotate(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    settings: Res<CameraSettings>,
    mut orbit: ResMut<OrbitCamera>,
) {
    if !mouse_buttons.pressed(MouseButton::Left) || mouse_motion.delta == Vec2::ZERO {
        return;
    }

    orbit.rotate(mouse_motion.delta * settings.rotate_speed);
}

fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    if !orbit.is_changed() {
        return;
    }

    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    *transform = orbit.transform();
}
