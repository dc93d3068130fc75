// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bucketed surface area heuristic.

use glam::Vec3;

use crate::types::{Axis, Bounds3};

/// Number of buckets along the split axis.
pub(crate) const BUCKETS: usize = 12;

/// Relative cost of visiting an interior node; intersecting a primitive costs 1.
const TRAVERSAL_COST: f32 = 1.0;

#[derive(Copy, Clone, Debug, Default)]
struct BucketInfo {
    count: usize,
    bounds: Bounds3,
}

/// Cheapest split found by [`SahBuckets::min_cost_split`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct SahSplit {
    /// Items in buckets `0..=bucket` go left.
    pub(crate) bucket: usize,
    pub(crate) cost: f32,
}

/// Centroid histogram along one axis of a node's centroid bounds.
#[derive(Debug)]
pub(crate) struct SahBuckets {
    axis: Axis,
    centroid_bounds: Bounds3,
    buckets: [BucketInfo; BUCKETS],
}

impl SahBuckets {
    pub(crate) fn new(axis: Axis, centroid_bounds: Bounds3) -> Self {
        Self {
            axis,
            centroid_bounds,
            buckets: [BucketInfo::default(); BUCKETS],
        }
    }

    /// Bucket a centroid falls in, clamped to the last bucket.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "offsets lie in [0, 1], so the product is a small non-negative integer"
    )]
    pub(crate) fn bucket_index(&self, centroid: Vec3) -> usize {
        let offset = self.centroid_bounds.offset(centroid)[self.axis.index()];
        ((BUCKETS as f32 * offset) as usize).min(BUCKETS - 1)
    }

    pub(crate) fn add(&mut self, centroid: Vec3, bounds: &Bounds3) {
        let b = self.bucket_index(centroid);
        self.buckets[b].count += 1;
        self.buckets[b].bounds = self.buckets[b].bounds.union(bounds);
    }

    /// Evaluate all `BUCKETS - 1` split planes and return the cheapest.
    ///
    /// `cost = 1 + (n_left * area_left + n_right * area_right) / total_area`.
    /// Ties keep the lowest bucket.
    #[allow(
        clippy::cast_precision_loss,
        reason = "primitive counts far below 2^24 in practice"
    )]
    pub(crate) fn min_cost_split(&self, total_area: f32) -> SahSplit {
        let inv_area = if total_area > 0.0 { total_area.recip() } else { 0.0 };

        let mut left_weight = [0.0_f32; BUCKETS - 1];
        let mut sweep = Bounds3::EMPTY;
        let mut count = 0;
        for (i, bucket) in self.buckets[..BUCKETS - 1].iter().enumerate() {
            sweep = sweep.union(&bucket.bounds);
            count += bucket.count;
            left_weight[i] = count as f32 * sweep.surface_area();
        }

        let mut best = SahSplit {
            bucket: 0,
            cost: f32::INFINITY,
        };
        let mut sweep = Bounds3::EMPTY;
        let mut count = 0;
        for i in (0..BUCKETS - 1).rev() {
            let bucket = &self.buckets[i + 1];
            sweep = sweep.union(&bucket.bounds);
            count += bucket.count;
            let cost =
                TRAVERSAL_COST + (left_weight[i] + count as f32 * sweep.surface_area()) * inv_area;
            if cost <= best.cost {
                best = SahSplit { bucket: i, cost };
            }
        }
        best
    }
}
