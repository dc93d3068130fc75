// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top-down construction with the middle, equal-counts and SAH policies.

use crate::build::sah::SahBuckets;
use crate::build::{BuildTree, BuiltTree, NodeId, partition};
use crate::config::SplitMethod;
use crate::summary::{PrimitiveSummary, bounds_of, centroid_bounds_of};
use crate::types::{Axis, Bounds3};

/// Build a tree by recursively partitioning `summaries`.
///
/// `SplitMethod::Hlbvh` is never routed here; if it were, it would behave like SAH.
pub(crate) fn build(
    mut summaries: Vec<PrimitiveSummary>,
    method: SplitMethod,
    max_prims_in_node: usize,
) -> BuiltTree {
    let n = summaries.len();
    let mut builder = TopDown {
        method,
        max_prims_in_node,
        tree: BuildTree::with_capacity(2 * n - 1),
        order: Vec::with_capacity(n),
    };
    let root = builder.build(&mut summaries);
    debug_assert_eq!(builder.order.len(), n, "every primitive lands in one leaf");
    BuiltTree {
        tree: builder.tree,
        root,
        order: builder.order,
        treelets: 0,
    }
}

struct TopDown {
    method: SplitMethod,
    max_prims_in_node: usize,
    tree: BuildTree,
    order: Vec<usize>,
}

impl TopDown {
    fn build(&mut self, summaries: &mut [PrimitiveSummary]) -> NodeId {
        let n = summaries.len();
        let bounds = bounds_of(summaries);
        if n == 1 {
            return self.leaf(summaries, bounds);
        }

        let centroid_bounds = centroid_bounds_of(summaries);
        let axis = centroid_bounds.maximum_extent();
        // Coincident centroids cannot be separated by any plane.
        if centroid_bounds.extent(axis) == 0.0 {
            return self.leaf(summaries, bounds);
        }

        let mid = match self.method {
            SplitMethod::Middle => split_middle(summaries, axis, &centroid_bounds)
                .unwrap_or_else(|| split_equal_counts(summaries, axis)),
            SplitMethod::EqualCounts => split_equal_counts(summaries, axis),
            SplitMethod::Sah | SplitMethod::Hlbvh => {
                match self.split_sah(summaries, axis, centroid_bounds, &bounds) {
                    Some(mid) => mid,
                    None => return self.leaf(summaries, bounds),
                }
            }
        };
        assert!(
            mid > 0 && mid < n,
            "split of {n} primitives along {axis} left one side empty (mid = {mid})"
        );

        let (left, right) = summaries.split_at_mut(mid);
        let left = self.build(left);
        let right = self.build(right);
        self.tree.interior(axis, left, right)
    }

    fn leaf(&mut self, summaries: &[PrimitiveSummary], bounds: Bounds3) -> NodeId {
        let first = self.order.len();
        self.order.extend(summaries.iter().map(|s| s.index));
        self.tree.leaf(bounds, first, summaries.len())
    }

    /// Returns `None` when a leaf is cheaper than the best split and small enough.
    #[allow(
        clippy::cast_precision_loss,
        reason = "leaf cost only needs to be comparable to the SAH estimate"
    )]
    fn split_sah(
        &self,
        summaries: &mut [PrimitiveSummary],
        axis: Axis,
        centroid_bounds: Bounds3,
        bounds: &Bounds3,
    ) -> Option<usize> {
        let n = summaries.len();
        if n <= 2 {
            return Some(split_equal_counts(summaries, axis));
        }

        let mut buckets = SahBuckets::new(axis, centroid_bounds);
        for s in summaries.iter() {
            buckets.add(s.centroid, &s.bounds);
        }
        let split = buckets.min_cost_split(bounds.surface_area());

        let leaf_cost = n as f32;
        if n > self.max_prims_in_node || split.cost < leaf_cost {
            Some(partition(summaries, |s| {
                buckets.bucket_index(s.centroid) <= split.bucket
            }))
        } else {
            None
        }
    }
}

/// Partition at the midpoint of the centroid bounds. `None` if one side is empty.
fn split_middle(
    summaries: &mut [PrimitiveSummary],
    axis: Axis,
    centroid_bounds: &Bounds3,
) -> Option<usize> {
    let a = axis.index();
    let mid_plane = 0.5 * (centroid_bounds.min[a] + centroid_bounds.max[a]);
    let mid = partition(summaries, |s| s.centroid[a] < mid_plane);
    (mid != 0 && mid != summaries.len()).then_some(mid)
}

/// Place the median centroid at `n / 2`, smaller ones before it and larger after.
fn split_equal_counts(summaries: &mut [PrimitiveSummary], axis: Axis) -> usize {
    let a = axis.index();
    let mid = summaries.len() / 2;
    summaries.select_nth_unstable_by(mid, |x, y| x.centroid[a].total_cmp(&y.centroid[a]));
    mid
}
