//! Ray queries against simple trace shapes
//!
//! Entities opt in to cursor traces with a [`TraceCollider`]. Weapons and other
//! decoration carry none, so they never block a trace.

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TraceShape {
    /// Sphere centred on the entity
    Sphere { radius: f32 },
    /// Infinite plane through the entity, facing up
    Ground,
}

#[derive(Clone, Component, Copy, Debug)]
pub struct TraceCollider {
    pub shape: TraceShape,
}

impl TraceCollider {
    pub fn sphere(radius: f32) -> Self {
        Self { shape: TraceShape::Sphere { radius } }
    }

    pub fn ground() -> Self {
        Self { shape: TraceShape::Ground }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceHit {
    pub entity: Entity,
    pub distance: f32,
    pub point: Vec3,
}

/// Distance along the ray to the first intersection in front of the origin
pub fn intersect(ray: Ray3d, center: Vec3, shape: TraceShape) -> Option<f32> {
    let dir = *ray.direction;
    match shape {
        TraceShape::Sphere { radius } => {
            let oc = ray.origin - center;
            let b = oc.dot(dir);
            let c = oc.length_squared() - radius * radius;
            let disc = b * b - c;
            if disc < 0. { return None; }
            let sq = disc.sqrt();
            let near = -b - sq;
            let far = -b + sq;
            if near >= 0. { Some(near) }
            else if far >= 0. { Some(0.) } // origin inside the sphere
            else { None }
        }
        TraceShape::Ground => {
            let denom = dir.y;
            if denom.abs() < f32::EPSILON { return None; }
            let t = (center.y - ray.origin.y) / denom;
            (t >= 0.).then_some(t)
        }
    }
}

/// Nearest blocking hit among the candidates
pub fn nearest_hit<'a>(
    ray: Ray3d,
    candidates: impl IntoIterator<Item = (Entity, Vec3, &'a TraceCollider)>,
) -> Option<TraceHit> {
    candidates
        .into_iter()
        .filter_map(|(entity, center, collider)| {
            intersect(ray, center, collider.shape).map(|distance| TraceHit {
                entity,
                distance,
                point: ray.get_point(distance),
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_from(origin: Vec3) -> Ray3d {
        Ray3d::new(origin, Dir3::NEG_Y)
    }

    #[test]
    fn test_sphere_hit_distance() {
        let ray = down_from(Vec3::new(0., 10., 0.));
        let t = intersect(ray, Vec3::ZERO, TraceShape::Sphere { radius: 1. }).unwrap();
        assert!((t - 9.).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let ray = down_from(Vec3::new(5., 10., 0.));
        assert_eq!(intersect(ray, Vec3::ZERO, TraceShape::Sphere { radius: 1. }), None);
    }

    #[test]
    fn test_sphere_behind_origin_is_ignored() {
        let ray = down_from(Vec3::new(0., -5., 0.));
        assert_eq!(intersect(ray, Vec3::ZERO, TraceShape::Sphere { radius: 1. }), None);
    }

    #[test]
    fn test_ground_hit() {
        let ray = down_from(Vec3::new(3., 4., -2.));
        let t = intersect(ray, Vec3::ZERO, TraceShape::Ground).unwrap();
        assert!((t - 4.).abs() < 1e-5);
    }

    #[test]
    fn test_ground_parallel_ray_misses() {
        let ray = Ray3d::new(Vec3::new(0., 1., 0.), Dir3::X);
        assert_eq!(intersect(ray, Vec3::ZERO, TraceShape::Ground), None);
    }

    #[test]
    fn test_nearest_hit_prefers_closest() {
        let ground = TraceCollider::ground();
        let enemy = TraceCollider::sphere(1.);
        let ground_ent = Entity::from_raw(1);
        let enemy_ent = Entity::from_raw(2);
        let ray = down_from(Vec3::new(0., 10., 0.));

        let hit = nearest_hit(ray, [
            (ground_ent, Vec3::ZERO, &ground),
            (enemy_ent, Vec3::new(0., 1., 0.), &enemy),
        ]).unwrap();

        assert_eq!(hit.entity, enemy_ent);
        assert!((hit.distance - 8.).abs() < 1e-5);
        assert!((hit.point - Vec3::new(0., 2., 0.)).length() < 1e-5);
    }

    #[test]
    fn test_nearest_hit_none_when_nothing_blocks() {
        let enemy = TraceCollider::sphere(1.);
        let ray = down_from(Vec3::new(10., 10., 0.));
        assert_eq!(nearest_hit(ray, [(Entity::from_raw(1), Vec3::ZERO, &enemy)]), None);
    }
}
