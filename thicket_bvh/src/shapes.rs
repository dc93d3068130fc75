// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reference shapes.
//!
//! These are deliberately simple; a renderer supplies its own geometry through
//! the [`Primitive`] trait. They exist so the hierarchy can be exercised on its
//! own in tests, benchmarks and demos.

use glam::Vec3;

use crate::primitive::Primitive;
use crate::types::{Bounds3, Intersection, Ray};

/// A sphere given by center and radius.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    /// Center.
    pub center: Vec3,
    /// Radius. Must be positive.
    pub radius: f32,
}

impl Sphere {
    /// Create a sphere.
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Primitive for Sphere {
    fn world_bound(&self) -> Bounds3 {
        Bounds3::new(
            self.center - Vec3::splat(self.radius),
            self.center + Vec3::splat(self.radius),
        )
    }

    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let half_b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;
        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 || a == 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let near = (-half_b - root) / a;
        let far = (-half_b + root) / a;
        let t = [near, far]
            .into_iter()
            .find(|&t| t > 0.0 && t < ray.t_max)?;
        let point = ray.at(t);
        Some(Intersection {
            t,
            point,
            normal: (point - self.center) / self.radius,
        })
    }
}

/// A solid axis-aligned box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisBox {
    /// Extent of the box.
    pub bounds: Bounds3,
}

impl AxisBox {
    /// Create a box from two corners in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            bounds: Bounds3::new(a, b),
        }
    }

    /// A cube with unit edges whose minimum corner is `min`.
    pub fn unit_at(min: Vec3) -> Self {
        Self::new(min, min + Vec3::ONE)
    }
}

impl Primitive for AxisBox {
    fn world_bound(&self) -> Bounds3 {
        self.bounds
    }

    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let mut t0 = f32::NEG_INFINITY;
        let mut t1 = f32::INFINITY;
        let mut enter_axis = 0;
        let mut exit_axis = 0;
        for axis in 0..3 {
            let inv = ray.direction[axis].recip();
            let mut near = (self.bounds.min[axis] - ray.origin[axis]) * inv;
            let mut far = (self.bounds.max[axis] - ray.origin[axis]) * inv;
            if near > far {
                core::mem::swap(&mut near, &mut far);
            }
            // NaN appears when the origin sits on a slab of a parallel ray; skip it.
            if near > t0 {
                t0 = near;
                enter_axis = axis;
            }
            if far < t1 {
                t1 = far;
                exit_axis = axis;
            }
            if t0 > t1 {
                return None;
            }
        }

        let (t, axis) = if t0 > 0.0 {
            (t0, enter_axis)
        } else {
            (t1, exit_axis)
        };
        if !(t > 0.0 && t < ray.t_max) {
            return None;
        }

        let mut normal = Vec3::ZERO;
        normal[axis] = if ray.direction[axis] > 0.0 { -1.0 } else { 1.0 };
        if t == t1 && t0 <= 0.0 {
            normal = -normal;
        }
        Some(Intersection {
            t,
            point: ray.at(t),
            normal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_hit_from_outside_and_inside() {
        let s = Sphere::new(Vec3::ZERO, 1.0);
        let outside = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let hit = s.intersect(&outside).expect("ray points at the sphere");
        assert!((hit.t - 4.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);

        let inside = Ray::new(Vec3::ZERO, Vec3::X);
        let hit = s.intersect(&inside).expect("origin is inside");
        assert!((hit.t - 1.0).abs() < 1e-5);

        assert!(!s.intersect_p(&outside.with_t_max(3.0)));
        assert!(!s.intersect_p(&Ray::new(Vec3::new(0.0, 3.0, -5.0), Vec3::Z)));
    }

    #[test]
    fn box_entry_exit_and_misses() {
        let b = AxisBox::unit_at(Vec3::ZERO);
        let ray = Ray::new(Vec3::new(0.5, 0.5, -2.0), Vec3::Z);
        let hit = b.intersect(&ray).expect("ray points at the box");
        assert_eq!(hit.t, 2.0);
        assert_eq!(hit.normal, Vec3::new(0.0, 0.0, -1.0));

        let from_inside = Ray::new(Vec3::splat(0.5), Vec3::X);
        let hit = b.intersect(&from_inside).expect("origin is inside");
        assert_eq!(hit.t, 0.5);
        assert_eq!(hit.normal, Vec3::X);

        assert!(b.intersect(&ray.with_t_max(1.5)).is_none());
        assert!(b.intersect(&Ray::new(Vec3::new(0.5, 0.5, 2.0), Vec3::Z)).is_none());
        assert!(b.intersect(&Ray::new(Vec3::new(2.0, 0.5, -2.0), Vec3::Z)).is_none());
        assert_eq!(b.world_bound(), Bounds3::new(Vec3::ZERO, Vec3::ONE));
    }
}
