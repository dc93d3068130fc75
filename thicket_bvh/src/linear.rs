// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brute-force aggregate that tests every primitive. Small and simple; good
//! for tiny sets and as a reference when checking [`Bvh`](crate::Bvh) results.

use core::fmt;

use crate::bvh::BvhHit;
use crate::primitive::Primitive;
use crate::types::{Bounds3, Intersection, Ray};

/// Aggregate with linear scans.
pub struct LinearScan<P> {
    primitives: Vec<P>,
    bounds: Bounds3,
}

impl<P: Primitive> LinearScan<P> {
    /// Wrap `primitives` in input order.
    pub fn new(primitives: Vec<P>) -> Self {
        let bounds = primitives
            .iter()
            .fold(Bounds3::EMPTY, |acc, p| acc.union(&p.world_bound()));
        Self { primitives, bounds }
    }

    /// Nearest hit; `primitive` is the index into the input.
    pub fn closest_hit(&self, ray: &Ray) -> Option<BvhHit> {
        let mut ray = *ray;
        let mut best = None;
        for (i, p) in self.primitives.iter().enumerate() {
            if let Some(hit) = p.intersect(&ray) {
                ray.t_max = hit.t;
                best = Some(BvhHit {
                    primitive: i,
                    intersection: hit,
                });
            }
        }
        best
    }

    /// Whether anything is hit.
    pub fn any_hit(&self, ray: &Ray) -> bool {
        self.primitives.iter().any(|p| p.intersect_p(ray))
    }
}

impl<P> LinearScan<P> {
    /// The wrapped primitives.
    pub fn primitives(&self) -> &[P] {
        &self.primitives
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Whether there are no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl<P: Primitive> Primitive for LinearScan<P> {
    fn world_bound(&self) -> Bounds3 {
        self.bounds
    }

    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        self.closest_hit(ray).map(|hit| hit.intersection)
    }

    fn intersect_p(&self, ray: &Ray) -> bool {
        self.any_hit(ray)
    }
}

impl<P> fmt::Debug for LinearScan<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearScan")
            .field("primitives", &self.primitives.len())
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Sphere;
    use glam::Vec3;

    #[test]
    fn keeps_the_nearest_of_overlapping_hits() {
        let scan = LinearScan::new(vec![
            Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0),
            Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0),
            Sphere::new(Vec3::new(0.0, 0.0, 20.0), 1.0),
        ]);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = scan.closest_hit(&ray).expect("all three lie on the ray");
        assert_eq!(hit.primitive, 1);
        assert!((hit.intersection.t - 4.0).abs() < 1e-5);
        assert!(scan.any_hit(&ray));
        assert!(!scan.any_hit(&ray.with_t_max(3.0)));
        assert_eq!(
            scan.world_bound(),
            Bounds3::new(Vec3::new(-1.0, -1.0, 4.0), Vec3::new(1.0, 1.0, 21.0))
        );
    }

    #[test]
    fn empty_scan_misses() {
        let scan = LinearScan::<Sphere>::new(Vec::new());
        assert!(scan.is_empty());
        assert!(scan.world_bound().is_empty());
        assert!(scan.closest_hit(&Ray::new(Vec3::ZERO, Vec3::X)).is_none());
    }
}
