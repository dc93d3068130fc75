// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry types consumed by the hierarchy: boxes, rays, axes and hit records.

use core::fmt;

use bitflags::bitflags;
use glam::Vec3;

/// One of the three coordinate axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// The x axis.
    #[default]
    X,
    /// The y axis.
    Y,
    /// The z axis.
    Z,
}

impl Axis {
    /// All three axes in index order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Component index of this axis (0, 1 or 2).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Axis for a component index. Indices past 2 wrap modulo 3.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        match index % 3 {
            0 => Self::X,
            1 => Self::Y,
            _ => Self::Z,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        })
    }
}

bitflags! {
    /// Which components of a ray direction are negative.
    ///
    /// Computed once per ray; the slab test uses it to pick the near and far
    /// corner of each box without comparisons.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct DirIsNeg: u8 {
        /// Negative x direction.
        const X = 0b001;
        /// Negative y direction.
        const Y = 0b010;
        /// Negative z direction.
        const Z = 0b100;
    }
}

impl DirIsNeg {
    /// Signs of an inverse ray direction. `-0.0` components count as negative,
    /// matching the sign of their infinite reciprocal.
    pub fn from_inv_dir(inv_dir: Vec3) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::X, inv_dir.x < 0.0);
        flags.set(Self::Y, inv_dir.y < 0.0);
        flags.set(Self::Z, inv_dir.z < 0.0);
        flags
    }

    /// Whether the direction is negative along `axis`.
    #[inline]
    pub const fn on(self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.contains(Self::X),
            Axis::Y => self.contains(Self::Y),
            Axis::Z => self.contains(Self::Z),
        }
    }
}

/// Axis-aligned bounding box in 3D.
///
/// An empty box has `min > max` on every axis, so that the union with any other
/// box yields that box unchanged.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3 {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Default for Bounds3 {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Bounds3 {
    /// The empty box: the identity for [`Bounds3::union`].
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create a box from two corners in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// A degenerate box holding a single point.
    pub const fn from_point(p: Vec3) -> Self {
        Self { min: p, max: p }
    }

    /// Return true if the box contains nothing (inverted on some axis).
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// The smallest box enclosing both boxes.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// The smallest box enclosing this box and a point.
    #[inline]
    pub fn union_point(&self, p: Vec3) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// Whether the point lies inside or on the boundary.
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Whether `other` lies entirely inside this box.
    pub fn encloses(&self, other: &Self) -> bool {
        other.is_empty() || (self.contains(other.min) && self.contains(other.max))
    }

    /// Extent along each axis.
    #[inline]
    pub fn diagonal(&self) -> Vec3 {
        self.max - self.min
    }

    /// Midpoint of the box.
    #[inline]
    pub fn centroid(&self) -> Vec3 {
        0.5 * self.min + 0.5 * self.max
    }

    /// Surface area. Empty boxes have zero area.
    #[inline]
    pub fn surface_area(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let d = self.diagonal();
        2.0 * (d.x * d.y + d.y * d.z + d.z * d.x)
    }

    /// The axis along which the box is widest. Ties favour the lower axis.
    pub fn maximum_extent(&self) -> Axis {
        let d = self.diagonal();
        if d.x >= d.y && d.x >= d.z {
            Axis::X
        } else if d.y >= d.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Extent along a single axis.
    #[inline]
    pub fn extent(&self, axis: Axis) -> f32 {
        self.max[axis.index()] - self.min[axis.index()]
    }

    /// Position of `p` relative to the box: `min` maps to 0 and `max` to 1 on
    /// each axis. Axes with zero extent map to 0.
    pub fn offset(&self, p: Vec3) -> Vec3 {
        let mut o = p - self.min;
        for axis in 0..3 {
            if self.max[axis] > self.min[axis] {
                o[axis] /= self.max[axis] - self.min[axis];
            }
        }
        o
    }

    /// Slab test against a ray whose inverse direction and per-axis sign have
    /// been computed once up front.
    ///
    /// Far slab distances are widened by `1 + 2γ(3)` so that rounding in the
    /// products never rejects a box the ray actually grazes. A ray parallel to
    /// an axis whose origin lies on one of the box's faces on that axis
    /// produces `0 * inf = NaN` for that slab; `f32::max` and `f32::min` drop
    /// the NaN, so the ray counts as inside that slab.
    #[inline]
    pub fn intersect_p(&self, ray: &Ray, inv_dir: Vec3, dir_is_neg: DirIsNeg) -> bool {
        let widen = 1.0 + 2.0 * gamma(3);
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        for axis in Axis::ALL {
            let a = axis.index();
            let (near, far) = if dir_is_neg.on(axis) {
                (self.max[a], self.min[a])
            } else {
                (self.min[a], self.max[a])
            };
            t_min = t_min.max((near - ray.origin[a]) * inv_dir[a]);
            t_max = t_max.min((far - ray.origin[a]) * inv_dir[a] * widen);
            if t_min > t_max {
                return false;
            }
        }
        t_min < ray.t_max && t_max > 0.0
    }
}

/// Conservative bound on the relative error of `n` chained float operations.
#[inline]
pub(crate) fn gamma(n: u8) -> f32 {
    let e = f32::EPSILON * 0.5;
    let n = f32::from(n);
    (n * e) / (1.0 - n * e)
}

/// A semi-infinite ray, valid on the open parametric interval `(0, t_max)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Ray origin.
    pub origin: Vec3,
    /// Ray direction. Need not be normalized.
    pub direction: Vec3,
    /// Upper bound on the parametric hit distance.
    pub t_max: f32,
}

impl Ray {
    /// A ray with an unbounded `t_max`.
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            t_max: f32::INFINITY,
        }
    }

    /// The same ray restricted to `(0, t_max)`.
    #[must_use]
    pub const fn with_t_max(mut self, t_max: f32) -> Self {
        self.t_max = t_max;
        self
    }

    /// Point at parametric distance `t`.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Hit record returned by [`Primitive::intersect`](crate::Primitive::intersect).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection {
    /// Parametric distance along the ray.
    pub t: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Geometric normal at the hit point.
    pub normal: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Bounds3 {
        Bounds3::new(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn empty_is_union_identity() {
        let b = Bounds3::new(Vec3::new(-1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(Bounds3::EMPTY.union(&b), b);
        assert!(Bounds3::EMPTY.is_empty());
        assert_eq!(Bounds3::EMPTY.surface_area(), 0.0);
    }

    #[test]
    fn area_extent_and_offset() {
        let b = Bounds3::new(Vec3::ZERO, Vec3::new(4.0, 2.0, 1.0));
        assert_eq!(b.surface_area(), 2.0 * (8.0 + 2.0 + 4.0));
        assert_eq!(b.maximum_extent(), Axis::X);
        assert_eq!(b.offset(Vec3::new(2.0, 2.0, 0.0)), Vec3::new(0.5, 1.0, 0.0));

        let flat = Bounds3::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(flat.maximum_extent(), Axis::Y);
        assert_eq!(flat.offset(Vec3::new(0.0, 1.5, 0.0)), Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn axis_index_round_trips_and_wraps() {
        for axis in Axis::ALL {
            assert_eq!(Axis::from_index(axis.index()), axis);
        }
        assert_eq!(Axis::from_index(17), Axis::Z);
    }

    fn slab(b: &Bounds3, ray: &Ray) -> bool {
        let inv = ray.direction.recip();
        b.intersect_p(ray, inv, DirIsNeg::from_inv_dir(inv))
    }

    #[test]
    fn dir_is_neg_tracks_signed_zero() {
        let flags = DirIsNeg::from_inv_dir(Vec3::new(-0.0_f32, 2.0, -1.0).recip());
        assert!(flags.on(Axis::X));
        assert!(!flags.on(Axis::Y));
        assert!(flags.on(Axis::Z));
        assert_eq!(flags, DirIsNeg::X | DirIsNeg::Z);
    }

    #[test]
    fn slab_hits_and_misses() {
        let b = unit();
        let hit = Ray::new(Vec3::new(0.5, 0.5, -5.0), Vec3::Z);
        assert!(slab(&b, &hit));

        let behind = Ray::new(Vec3::new(0.5, 0.5, 5.0), Vec3::Z);
        assert!(!slab(&b, &behind));

        let beside = Ray::new(Vec3::new(2.0, 0.5, -5.0), Vec3::Z);
        assert!(!slab(&b, &beside));

        let short = hit.with_t_max(1.0);
        assert!(!slab(&b, &short), "box starts at t = 5");

        let negative = Ray::new(Vec3::new(0.5, 0.5, 5.0), -Vec3::Z);
        assert!(slab(&b, &negative));
    }

    #[test]
    fn slab_accepts_origin_inside_and_axis_parallel_rays() {
        let b = unit();
        let inside = Ray::new(Vec3::splat(0.5), Vec3::new(1.0, 2.0, -3.0));
        assert!(slab(&b, &inside));

        let diagonal = Ray::new(Vec3::splat(-1.0), Vec3::ONE);
        assert!(slab(&b, &diagonal));
    }

    #[test]
    fn slab_accepts_parallel_rays_starting_on_a_face() {
        let b = unit();
        for x in [0.0, 1.0] {
            for direction in [Vec3::Z, -Vec3::Z] {
                let origin = Vec3::new(x, 0.5, -5.0 * direction.z);
                assert!(slab(&b, &Ray::new(origin, direction)), "x = {x}, {direction}");
            }
        }
        let corner = Ray::new(Vec3::new(1.0, 0.0, 5.0), -Vec3::Z);
        assert!(slab(&b, &corner));
        let inside_face = Ray::new(Vec3::new(0.0, 0.5, 0.5), Vec3::Y);
        assert!(slab(&b, &inside_face));

        let outside = Ray::new(Vec3::new(1.0, 2.0, -5.0), Vec3::Z);
        assert!(!slab(&b, &outside));
        let past_the_box = Ray::new(Vec3::new(0.0, 0.5, 5.0), Vec3::Z);
        assert!(!slab(&b, &past_the_box));
    }
}
