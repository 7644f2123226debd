//! Hit-test shapes for the picker and their ray intersection routines.
//!
//! Colliders are proxies: a body is tested as a sphere, an orbit path as a
//! tube swept along the sampled ellipse.

use bevy::math::Ray3d;
use bevy::math::bounding::{BoundingSphere, RayCast3d};
use bevy::prelude::*;

/// Rays nearly parallel to a tube segment skip the cylinder test.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A hit-testable shape, in whatever space the ray is expressed in.
#[derive(Clone, Debug, PartialEq)]
pub enum ColliderShape {
    Sphere {
        center: Vec3,
        radius: f32,
    },
    /// Chain of capsules through `points`, closed back to the first point
    /// when `closed` is set.
    Tube {
        points: Vec<Vec3>,
        radius: f32,
        closed: bool,
    },
}

impl ColliderShape {
    /// Distance along the ray to the first surface hit, if any.
    pub fn intersect_ray(&self, ray: &Ray3d) -> Option<f32> {
        let dir = ray.direction;
        match self {
            ColliderShape::Sphere { center, radius } => {
                ray_sphere(ray.origin, dir, *center, *radius)
            }
            ColliderShape::Tube {
                points,
                radius,
                closed,
            } => {
                let closing = if *closed && points.len() > 2 {
                    points.last().copied().zip(points.first().copied())
                } else {
                    None
                };

                points
                    .windows(2)
                    .map(|pair| (pair[0], pair[1]))
                    .chain(closing)
                    .filter_map(|(a, b)| ray_capsule(ray.origin, dir, a, b, *radius))
                    .min_by(f32::total_cmp)
            }
        }
    }

    /// Map a local-space shape into world space.
    ///
    /// Radii follow the largest scale axis of `transform`. Pass a placement
    /// from [`pick_placement`] so emphasis scale never moves the hit area.
    pub fn to_world(&self, transform: &GlobalTransform) -> ColliderShape {
        let (scale, _, _) = transform.to_scale_rotation_translation();
        let radius_scale = scale.abs().max_element();

        match self {
            ColliderShape::Sphere { center, radius } => ColliderShape::Sphere {
                center: transform.transform_point(*center),
                radius: radius * radius_scale,
            },
            ColliderShape::Tube {
                points,
                radius,
                closed,
            } => ColliderShape::Tube {
                points: points.iter().map(|p| transform.transform_point(*p)).collect(),
                radius: radius * radius_scale,
                closed: *closed,
            },
        }
    }
}

/// World placement of a collider for hit testing.
///
/// Composes the local transform with its `ancestors` (nearest parent first)
/// but drops the collider's own scale. Emphasis is written to that scale, and
/// an orbit tube scaled about its frame center would slide off the pointer
/// that emphasized it.
pub fn pick_placement(
    local: &Transform,
    ancestors: impl IntoIterator<Item = Transform>,
) -> GlobalTransform {
    let unscaled = Transform {
        scale: Vec3::ONE,
        ..*local
    };
    ancestors
        .into_iter()
        .fold(GlobalTransform::from(unscaled), |placed, parent| {
            GlobalTransform::from(parent) * placed
        })
}

/// Entry distance of a ray into a sphere, zero when the origin is inside.
pub fn ray_sphere(origin: Vec3, dir: Dir3, center: Vec3, radius: f32) -> Option<f32> {
    RayCast3d::new(origin, dir, f32::MAX)
        .sphere_intersection_at(&BoundingSphere::new(center, radius))
}

/// Entry distance of a ray into the capsule around segment `a`-`b`.
pub fn ray_capsule(origin: Vec3, direction: Dir3, a: Vec3, b: Vec3, radius: f32) -> Option<f32> {
    let dir = *direction;
    let ba = b - a;
    let oa = origin - a;
    let baba = ba.dot(ba);
    let bard = ba.dot(dir);
    let baoa = ba.dot(oa);
    let rdoa = dir.dot(oa);
    let oaoa = oa.dot(oa);

    let mut best: Option<f32> = None;
    let mut consider = |t: f32| {
        if t >= 0.0 && best.is_none_or(|current| t < current) {
            best = Some(t);
        }
    };

    // Cylinder body
    let aa = baba - bard * bard;
    if aa > PARALLEL_EPSILON * baba.max(1.0) {
        let bb = baba * rdoa - baoa * bard;
        let cc = baba * oaoa - baoa * baoa - radius * radius * baba;
        let h = bb * bb - aa * cc;
        if h >= 0.0 {
            let t = (-bb - h.sqrt()) / aa;
            let y = baoa + t * bard;
            if y > 0.0 && y < baba {
                consider(t);
            }
        }
    }

    // End caps
    for cap in [a, b] {
        if let Some(t) = ray_sphere(origin, direction, cap, radius) {
            consider(t);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn down_ray(x: f32, y: f32) -> Ray3d {
        Ray3d::new(Vec3::new(x, y, 100.0), Dir3::NEG_Z)
    }

    #[test]
    fn test_sphere_hit_distance() {
        let sphere = ColliderShape::Sphere {
            center: Vec3::ZERO,
            radius: 2.0,
        };
        let t = sphere.intersect_ray(&down_ray(0.0, 0.0)).unwrap();
        assert_relative_eq!(t, 98.0, epsilon = 1e-4);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = ColliderShape::Sphere {
            center: Vec3::ZERO,
            radius: 2.0,
        };
        assert!(sphere.intersect_ray(&down_ray(3.0, 0.0)).is_none());
    }

    #[test]
    fn test_sphere_behind_ray() {
        let ray = Ray3d::new(Vec3::new(0.0, 0.0, -10.0), Dir3::NEG_Z);
        assert!(ray_sphere(ray.origin, ray.direction, Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_origin_inside_sphere_hits_at_zero() {
        let t = ray_sphere(Vec3::ZERO, Dir3::X, Vec3::ZERO, 3.0).unwrap();
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_capsule_body_hit() {
        // Segment along X at z = 0, ray straight down onto its middle
        let t = ray_capsule(
            Vec3::new(5.0, 0.0, 100.0),
            Dir3::NEG_Z,
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            0.5,
        )
        .unwrap();
        assert_relative_eq!(t, 99.5, epsilon = 1e-3);
    }

    #[test]
    fn test_capsule_cap_hit_and_miss() {
        let a = Vec3::ZERO;
        let b = Vec3::new(10.0, 0.0, 0.0);
        // Just past the end, still within the rounded cap
        assert!(ray_capsule(Vec3::new(10.3, 0.0, 100.0), Dir3::NEG_Z, a, b, 0.5).is_some());
        // Beyond the cap
        assert!(ray_capsule(Vec3::new(11.0, 0.0, 100.0), Dir3::NEG_Z, a, b, 0.5).is_none());
        // Beside the body
        assert!(ray_capsule(Vec3::new(5.0, 0.8, 100.0), Dir3::NEG_Z, a, b, 0.5).is_none());
    }

    #[test]
    fn test_capsule_parallel_ray_hits_cap() {
        let t = ray_capsule(
            Vec3::new(-20.0, 0.0, 0.0),
            Dir3::X,
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            1.0,
        )
        .unwrap();
        assert_relative_eq!(t, 19.0, epsilon = 1e-4);
    }

    #[test]
    fn test_closed_tube_includes_closing_segment() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 10.0, 0.0),
        ];
        let open = ColliderShape::Tube {
            points: points.clone(),
            radius: 0.5,
            closed: false,
        };
        let closed = ColliderShape::Tube {
            points,
            radius: 0.5,
            closed: true,
        };
        // Midpoint of the closing segment (10,10) -> (0,0)
        let ray = down_ray(5.0, 5.0);
        assert!(open.intersect_ray(&ray).is_none());
        assert!(closed.intersect_ray(&ray).is_some());
    }

    #[test]
    fn test_to_world_scales_radius() {
        let transform = GlobalTransform::from(
            Transform::from_xyz(1.0, 2.0, 3.0).with_scale(Vec3::new(2.0, 3.0, 2.0)),
        );
        let world = ColliderShape::Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
        }
        .to_world(&transform);

        match world {
            ColliderShape::Sphere { center, radius } => {
                assert!(center.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-5));
                assert_relative_eq!(radius, 3.0, epsilon = 1e-5);
            }
            other => panic!("expected sphere, got {other:?}"),
        }
    }

    #[test]
    fn test_pick_placement_ignores_own_scale() {
        let parent = Transform::from_xyz(10.0, 0.0, 0.0);
        let emphasized = Transform::from_xyz(0.0, 2.0, 0.0).with_scale(Vec3::splat(2.0));

        let placed = pick_placement(&emphasized, [parent]);
        let (scale, _, translation) = placed.to_scale_rotation_translation();

        assert!(scale.abs_diff_eq(Vec3::ONE, 1e-6));
        assert!(translation.abs_diff_eq(Vec3::new(10.0, 2.0, 0.0), 1e-5));
    }

    #[test]
    fn test_pick_placement_keeps_ancestor_rotation() {
        let frame = Transform::from_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));
        let ring = ColliderShape::Tube {
            points: vec![Vec3::new(8.0, 0.0, 0.0), Vec3::new(8.0, 1.0, 0.0)],
            radius: 0.5,
            closed: false,
        }
        .to_world(&pick_placement(&Transform::default(), [frame]));

        match ring {
            ColliderShape::Tube { points, radius, .. } => {
                assert!(points[0].abs_diff_eq(Vec3::new(0.0, 8.0, 0.0), 1e-5));
                assert_relative_eq!(radius, 0.5, epsilon = 1e-6);
            }
            other => panic!("expected tube, got {other:?}"),
        }
    }
}
