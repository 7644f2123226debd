//! Bevy wiring for the picker.
//!
//! Owns the scene's [`Picker`], converts collider components into world-space
//! shapes each frame and writes emphasis into `Transform::scale`.
//!
//! Placements are composed from the current `Transform`s rather than read
//! from `GlobalTransform`, which lags one frame behind in `Update`.

use bevy::ecs::query::QueryFilter;
use bevy::math::Ray3d;
use bevy::prelude::*;

use super::collider::pick_placement;
use super::{
    ColliderId, ColliderShape, DEFAULT_MAX_PICK_DISTANCE, EmphasisSink, PickCamera, Picker,
};
use crate::camera::MainCamera;
use crate::types::PickingSet;

/// Plugin providing pointer picking and emphasis.
pub struct PickingPlugin;

impl Plugin for PickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PickerConfig>()
            .init_resource::<ScenePicker>()
            .init_resource::<LabelHover>()
            .configure_sets(Update, PickingSet::Resolve.after(PickingSet::Input))
            .add_systems(
                Update,
                (
                    apply_label_hover.in_set(PickingSet::Input),
                    resolve_pick.in_set(PickingSet::Resolve),
                ),
            );
    }
}

/// Settings for the scene picker.
#[derive(Resource, Clone, Debug)]
pub struct PickerConfig {
    /// Hits farther than this along the ray are ignored.
    pub max_distance: f32,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_PICK_DISTANCE,
        }
    }
}

/// The scene's picker. Targets are the entities whose scale gets emphasized.
#[derive(Resource, Debug)]
pub struct ScenePicker(pub Picker<Entity>);

impl FromWorld for ScenePicker {
    fn from_world(world: &mut World) -> Self {
        let max_distance = world
            .get_resource::<PickerConfig>()
            .map_or(DEFAULT_MAX_PICK_DISTANCE, |config| config.max_distance);
        ScenePicker(Picker::new(max_distance))
    }
}

/// Local-space hit-test shape attached to a collider entity.
#[derive(Component, Clone, Debug)]
pub struct PickCollider {
    pub shape: ColliderShape,
}

/// Body whose overlay label is under the pointer this frame, if any.
///
/// Written by the label UI; turned into picker override calls by
/// [`apply_label_hover`].
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct LabelHover {
    pub target: Option<Entity>,
}

/// A Bevy camera seen through the [`PickCamera`] interface.
pub struct CameraRay<'a> {
    pub camera: &'a Camera,
    pub transform: &'a GlobalTransform,
}

impl PickCamera for CameraRay<'_> {
    fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray3d> {
        let size = self.camera.logical_viewport_size()?;
        let viewport = Vec2::new((ndc.x + 1.0) * 0.5 * size.x, (1.0 - ndc.y) * 0.5 * size.y);
        self.camera.viewport_to_world(self.transform, viewport).ok()
    }
}

impl<F: QueryFilter> EmphasisSink<Entity> for Query<'_, '_, &mut Transform, F> {
    fn set_scale(&mut self, target: Entity, scale: Vec3) {
        if let Ok(mut transform) = self.get_mut(target) {
            transform.scale = scale;
        }
    }
}

/// Translate label hover transitions into override activation/release.
pub fn apply_label_hover(
    hover: Res<LabelHover>,
    mut picker: ResMut<ScenePicker>,
    mut transforms: Query<&mut Transform>,
) {
    let picker = &mut picker.0;
    match hover.target {
        Some(target) => {
            if !(picker.override_active() && picker.emphasized() == Some(target)) {
                picker.activate_override(target, &mut transforms);
                debug!("Label override on {:?}", target);
            }
        }
        None => {
            if picker.override_active() {
                picker.deactivate_override();
                debug!("Label override released");
            }
        }
    }
}

/// Parent links and local transforms, enough to place anything in the scene.
pub type Hierarchy<'w, 's> = Query<'w, 's, (&'static Transform, Option<&'static ChildOf>)>;

/// Hit-test placement of `entity` from this frame's transforms.
///
/// See [`pick_placement`]; the entity's own scale is left out.
pub fn placement_of(entity: Entity, hierarchy: &Hierarchy) -> Option<GlobalTransform> {
    let (local, child_of) = hierarchy.get(entity).ok()?;

    let mut ancestors = Vec::new();
    let mut next = child_of.map(ChildOf::parent);
    while let Some(ancestor) = next {
        let Ok((transform, child_of)) = hierarchy.get(ancestor) else {
            break;
        };
        ancestors.push(*transform);
        next = child_of.map(ChildOf::parent);
    }

    Some(pick_placement(local, ancestors))
}

/// World-space shapes of every collider that can be placed.
pub fn world_shapes(
    colliders: &Query<(Entity, &PickCollider)>,
    hierarchy: &Hierarchy,
) -> Vec<(ColliderId, ColliderShape)> {
    colliders
        .iter()
        .filter_map(|(entity, collider)| {
            let placement = placement_of(entity, hierarchy)?;
            Some((entity.into(), collider.shape.to_world(&placement)))
        })
        .collect()
}

/// Once-per-frame ray pick against every collider in the scene.
pub fn resolve_pick(
    mut picker: ResMut<ScenePicker>,
    cameras: Query<(Entity, &Camera), With<MainCamera>>,
    colliders: Query<(Entity, &PickCollider)>,
    mut scene: ParamSet<(Hierarchy, Query<&mut Transform>)>,
) {
    let Ok((camera_entity, camera)) = cameras.single() else {
        return;
    };

    let hierarchy = scene.p0();
    let Some(camera_transform) = placement_of(camera_entity, &hierarchy) else {
        return;
    };
    let shapes = world_shapes(&colliders, &hierarchy);

    let camera = CameraRay {
        camera,
        transform: &camera_transform,
    };

    let previous = picker.0.emphasized();
    let current = picker.0.resolve_pick(&shapes, &camera, &mut scene.p1());
    if current != previous {
        debug!("Pick changed: {:?} -> {:?}", previous, current);
    }
}
