// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The intersection contract shared by geometry and aggregates.

use std::sync::Arc;

use crate::types::{Bounds3, Intersection, Ray};

/// Anything a ray can hit.
///
/// Both individual shapes and whole aggregates implement this trait, so an
/// aggregate can be stored inside another aggregate.
pub trait Primitive {
    /// World-space bounds enclosing every point [`Primitive::intersect`] can report.
    fn world_bound(&self) -> Bounds3;

    /// Nearest hit with `t` in `(0, ray.t_max)`, if any.
    fn intersect(&self, ray: &Ray) -> Option<Intersection>;

    /// Whether any hit exists with `t` in `(0, ray.t_max)`.
    fn intersect_p(&self, ray: &Ray) -> bool {
        self.intersect(ray).is_some()
    }
}

impl<T: Primitive + ?Sized> Primitive for &T {
    fn world_bound(&self) -> Bounds3 {
        (**self).world_bound()
    }

    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        (**self).intersect(ray)
    }

    fn intersect_p(&self, ray: &Ray) -> bool {
        (**self).intersect_p(ray)
    }
}

impl<T: Primitive + ?Sized> Primitive for Box<T> {
    fn world_bound(&self) -> Bounds3 {
        (**self).world_bound()
    }

    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        (**self).intersect(ray)
    }

    fn intersect_p(&self, ray: &Ray) -> bool {
        (**self).intersect_p(ray)
    }
}

impl<T: Primitive + ?Sized> Primitive for Arc<T> {
    fn world_bound(&self) -> Bounds3 {
        (**self).world_bound()
    }

    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        (**self).intersect(ray)
    }

    fn intersect_p(&self, ray: &Ray) -> bool {
        (**self).intersect_p(ray)
    }
}
