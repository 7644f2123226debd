//! Pointer-driven picking.
//!
//! [`Picker`] maps the current pointer position to the single nearest
//! registered collider and moves a reversible scale emphasis onto that
//! collider's target. It is an explicit three-state machine:
//!
//! - `Idle`: nothing emphasized.
//! - `Hovering`: the last ray test emphasized a target.
//! - `Overridden`: an external source (a hovered overlay label) forced
//!   emphasis; ray testing is suspended until the override is released.
//!
//! Input callbacks only record pointer state. All intersection work and all
//! emphasis changes happen inside [`Picker::resolve_pick`], once per frame.

pub mod collider;
pub mod plugin;

pub use collider::ColliderShape;
pub use plugin::{LabelHover, PickCollider, PickingPlugin, PickerConfig, ScenePicker};

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use bevy::math::Ray3d;
use bevy::prelude::*;

/// Scale written to a target when its emphasis is removed.
pub const RESET_SCALE: Vec3 = Vec3::ONE;

/// Coordinates beyond this magnitude are treated as "no pointer present".
///
/// The browser-era convention parks absent pointers at (-100000, -100000).
pub const ABSENT_POINTER_THRESHOLD: f32 = 1.0e4;

/// Default far limit for ray hits.
pub const DEFAULT_MAX_PICK_DISTANCE: f32 = 1000.0;

/// Opaque identifier of one registered collider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(pub u64);

impl From<Entity> for ColliderId {
    fn from(entity: Entity) -> Self {
        ColliderId(entity.to_bits())
    }
}

/// Which emphasis a pickable receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickCategory {
    Orbit,
    Body,
}

impl PickCategory {
    /// Scale applied to a target while it is emphasized.
    pub fn emphasis_scale(self) -> Vec3 {
        match self {
            PickCategory::Orbit => Vec3::splat(2.0),
            PickCategory::Body => Vec3::new(2.0, 3.0, 2.0),
        }
    }
}

/// One hit-testable proxy and the object it stands in for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickableEntry<T> {
    pub collider: ColliderId,
    pub target: T,
    pub category: PickCategory,
}

/// Pointer location in normalized device coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerPosition {
    #[default]
    Absent,
    At(Vec2),
}

impl PointerPosition {
    /// Wrap an NDC coordinate, mapping sentinel or non-finite values to
    /// [`PointerPosition::Absent`].
    pub fn from_ndc(ndc: Vec2) -> Self {
        if !ndc.is_finite() || ndc.abs().max_element() > ABSENT_POINTER_THRESHOLD {
            PointerPosition::Absent
        } else {
            PointerPosition::At(ndc)
        }
    }

    pub fn ndc(&self) -> Option<Vec2> {
        match self {
            PointerPosition::At(ndc) => Some(*ndc),
            PointerPosition::Absent => None,
        }
    }
}

/// A target currently carrying emphasis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emphasis<T> {
    pub target: T,
    pub category: PickCategory,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PickState<T> {
    Idle,
    Hovering(Emphasis<T>),
    Overridden(Emphasis<T>),
}

impl<T> PickState<T> {
    pub fn emphasis(&self) -> Option<&Emphasis<T>> {
        match self {
            PickState::Idle => None,
            PickState::Hovering(emphasis) | PickState::Overridden(emphasis) => Some(emphasis),
        }
    }
}

/// Receiver of emphasis scale changes (scene transforms, test doubles).
pub trait EmphasisSink<T> {
    fn set_scale(&mut self, target: T, scale: Vec3);
}

impl<T: Eq + Hash> EmphasisSink<T> for HashMap<T, Vec3> {
    fn set_scale(&mut self, target: T, scale: Vec3) {
        self.insert(target, scale);
    }
}

/// Camera abstraction able to shoot a ray through an NDC coordinate.
pub trait PickCamera {
    fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray3d>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PickerError {
    #[error("collider {0:?} is already registered")]
    DuplicateCollider(ColliderId),
}

/// Apply the category's emphasis to `target`.
pub fn apply_effect<T>(target: T, category: PickCategory, sink: &mut impl EmphasisSink<T>) {
    sink.set_scale(target, category.emphasis_scale());
}

/// Restore `target` to its un-emphasized scale. Idempotent.
pub fn reset_effect<T>(target: T, sink: &mut impl EmphasisSink<T>) {
    sink.set_scale(target, RESET_SCALE);
}

/// Stateful hit-testing engine; one per scene.
#[derive(Debug)]
pub struct Picker<T> {
    entries: Vec<PickableEntry<T>>,
    by_collider: HashMap<ColliderId, usize>,
    pointer: PointerPosition,
    state: PickState<T>,
    max_distance: f32,
}

impl<T> Default for Picker<T> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PICK_DISTANCE)
    }
}

impl<T> Picker<T> {
    pub fn new(max_distance: f32) -> Self {
        Self {
            entries: Vec::new(),
            by_collider: HashMap::new(),
            pointer: PointerPosition::Absent,
            state: PickState::Idle,
            max_distance,
        }
    }
}

impl<T: Copy + PartialEq + Debug> Picker<T> {
    /// Register a collider. Each collider maps to exactly one entry, while
    /// several colliders may share a target.
    pub fn register_pickable(
        &mut self,
        collider: ColliderId,
        target: T,
        category: PickCategory,
    ) -> Result<(), PickerError> {
        if self.by_collider.contains_key(&collider) {
            return Err(PickerError::DuplicateCollider(collider));
        }
        self.by_collider.insert(collider, self.entries.len());
        self.entries.push(PickableEntry {
            collider,
            target,
            category,
        });
        Ok(())
    }

    pub fn entry(&self, collider: ColliderId) -> Option<&PickableEntry<T>> {
        self.by_collider.get(&collider).map(|&index| &self.entries[index])
    }

    pub fn entries(&self) -> &[PickableEntry<T>] {
        &self.entries
    }

    pub fn pointer(&self) -> PointerPosition {
        self.pointer
    }

    pub fn state(&self) -> &PickState<T> {
        &self.state
    }

    pub fn override_active(&self) -> bool {
        matches!(self.state, PickState::Overridden(_))
    }

    pub fn emphasized(&self) -> Option<T> {
        self.state.emphasis().map(|emphasis| emphasis.target)
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Record the pointer position. Emphasis is only recomputed on the next
    /// [`Picker::resolve_pick`].
    pub fn update_pointer_position(&mut self, ndc: Vec2) {
        self.pointer = PointerPosition::from_ndc(ndc);
    }

    /// Mark the pointer as absent (mouse left the window, touch ended).
    pub fn clear_pointer_position(&mut self) {
        self.pointer = PointerPosition::Absent;
    }

    /// Run one frame of ray-based picking.
    ///
    /// Does nothing while an override is active. Otherwise the previous
    /// emphasis is removed, the nearest hit among `colliders` is found, and
    /// its entry (if registered) is emphasized. Returns the emphasized target.
    pub fn resolve_pick(
        &mut self,
        colliders: &[(ColliderId, ColliderShape)],
        camera: &impl PickCamera,
        sink: &mut impl EmphasisSink<T>,
    ) -> Option<T> {
        if self.override_active() {
            return self.emphasized();
        }

        self.clear_emphasis(sink);

        let hit = self
            .pointer
            .ndc()
            .and_then(|ndc| camera.ray_from_ndc(ndc))
            .and_then(|ray| self.nearest_hit(colliders, &ray));

        // Unregistered colliders are a normal miss.
        let entry = hit.and_then(|collider| self.entry(collider)).copied()?;

        apply_effect(entry.target, entry.category, sink);
        self.state = PickState::Hovering(Emphasis {
            target: entry.target,
            category: entry.category,
        });
        Some(entry.target)
    }

    /// Force `Body` emphasis onto `target`, suspending ray picking until
    /// [`Picker::deactivate_override`].
    pub fn activate_override(&mut self, target: T, sink: &mut impl EmphasisSink<T>) {
        self.clear_emphasis(sink);
        apply_effect(target, PickCategory::Body, sink);
        self.state = PickState::Overridden(Emphasis {
            target,
            category: PickCategory::Body,
        });
    }

    /// Release the override. The forced emphasis stays visible until the
    /// next `resolve_pick`, which starts by removing it.
    pub fn deactivate_override(&mut self) {
        if let PickState::Overridden(emphasis) = self.state {
            self.state = PickState::Hovering(emphasis);
        }
    }

    fn clear_emphasis(&mut self, sink: &mut impl EmphasisSink<T>) {
        let previous = std::mem::replace(&mut self.state, PickState::Idle);
        if let Some(emphasis) = previous.emphasis() {
            reset_effect(emphasis.target, sink);
        }
    }

    /// Nearest collider hit within range. Ties go to the earlier registered
    /// collider; unregistered colliders rank after registered ones, then by
    /// their order in `colliders`.
    fn nearest_hit(
        &self,
        colliders: &[(ColliderId, ColliderShape)],
        ray: &Ray3d,
    ) -> Option<ColliderId> {
        colliders
            .iter()
            .enumerate()
            .filter_map(|(position, (id, shape))| {
                let distance = shape.intersect_ray(ray)?;
                if distance > self.max_distance {
                    return None;
                }
                let rank = match self.by_collider.get(id) {
                    Some(&index) => (0u8, index),
                    None => (1u8, position),
                };
                Some((distance, rank, *id))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
            .map(|(_, _, id)| id)
    }
}
