// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-primitive bound and centroid records consumed by the builders.

use glam::Vec3;

use crate::primitive::Primitive;
use crate::types::Bounds3;

/// World bound and centroid of one input primitive.
///
/// Builders reorder slices of these in place; a summary's position in the
/// slice decides which subtree it lands in, and `index` names the primitive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct PrimitiveSummary {
    pub(crate) index: usize,
    pub(crate) bounds: Bounds3,
    pub(crate) centroid: Vec3,
}

impl PrimitiveSummary {
    pub(crate) fn new(index: usize, bounds: Bounds3) -> Self {
        Self {
            index,
            bounds,
            centroid: bounds.centroid(),
        }
    }
}

/// One summary per primitive, index-aligned with the input.
pub(crate) fn summarize<P: Primitive>(primitives: &[P]) -> Vec<PrimitiveSummary> {
    primitives
        .iter()
        .enumerate()
        .map(|(i, p)| PrimitiveSummary::new(i, p.world_bound()))
        .collect()
}

/// Union of the bounds of every summary.
pub(crate) fn bounds_of(summaries: &[PrimitiveSummary]) -> Bounds3 {
    summaries
        .iter()
        .fold(Bounds3::EMPTY, |acc, s| acc.union(&s.bounds))
}

/// Union of the centroids of every summary.
pub(crate) fn centroid_bounds_of(summaries: &[PrimitiveSummary]) -> Bounds3 {
    summaries
        .iter()
        .fold(Bounds3::EMPTY, |acc, s| acc.union_point(s.centroid))
}
