// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hierarchical linear BVH construction.
//!
//! Centroids are quantized to 30-bit Morton codes and radix sorted. Runs that
//! share their top 12 bits form treelets; each treelet is built bottom-up from
//! the remaining code bits on the rayon pool, and the treelet roots are then
//! merged top-down with the surface area heuristic.

use core::ops::Range;

use rayon::prelude::*;

use crate::build::sah::SahBuckets;
use crate::build::{BuildTree, BuiltTree, NodeId, partition};
use crate::counter::AtomicOffset;
use crate::morton::{MORTON_CODE_BITS, MortonPrimitive, encode_morton3, radix_sort};
use crate::summary::{PrimitiveSummary, centroid_bounds_of};
use crate::types::{Axis, Bounds3};

/// Leading code bits shared by every primitive of a treelet.
const TREELET_BITS: u32 = 12;

const TREELET_MASK: u32 = ((1 << TREELET_BITS) - 1) << (MORTON_CODE_BITS - TREELET_BITS);

/// Highest code bit tested inside a treelet.
const FIRST_BIT_INDEX: u32 = MORTON_CODE_BITS - 1 - TREELET_BITS;

/// Build over summaries whose `index` equals their position in the slice.
pub(crate) fn build(summaries: &[PrimitiveSummary], max_prims_in_node: usize) -> BuiltTree {
    debug_assert!(
        summaries.iter().enumerate().all(|(i, s)| s.index == i),
        "HLBVH expects index-aligned summaries"
    );
    let n = summaries.len();

    let centroid_bounds = centroid_bounds_of(summaries);
    let mut morton: Vec<MortonPrimitive> = summaries
        .par_iter()
        .map(|s| MortonPrimitive {
            index: s.index,
            code: encode_morton3(centroid_bounds.offset(s.centroid)),
        })
        .collect();
    radix_sort(&mut morton);

    let ranges = treelet_ranges(&morton);
    tracing::trace!(treelets = ranges.len(), "emitting LBVH treelets");

    let offset = AtomicOffset::new();
    let treelets: Vec<Treelet> = ranges
        .into_par_iter()
        .map(|range| {
            let mut builder = TreeletBuilder {
                morton: &morton,
                summaries,
                offset: &offset,
                max_prims_in_node,
                tree: BuildTree::with_capacity(2 * range.len()),
                leaves: Vec::new(),
            };
            let root = builder.emit(range, Some(FIRST_BIT_INDEX));
            Treelet {
                tree: builder.tree,
                root,
                leaves: builder.leaves,
            }
        })
        .collect();
    let reserved = offset.into_inner();
    assert_eq!(reserved, n, "treelet leaves reserved {reserved} slots for {n} primitives");

    let treelet_count = treelets.len();
    let node_count: usize = treelets.iter().map(|t| t.tree.len()).sum();
    let mut tree = BuildTree::with_capacity(node_count + treelet_count);
    let mut order = vec![usize::MAX; n];
    let mut roots = Vec::with_capacity(treelet_count);
    for treelet in treelets {
        for (slots, prims) in &treelet.leaves {
            for (slot, mp) in slots.clone().zip(&morton[prims.clone()]) {
                order[slot] = mp.index;
            }
        }
        roots.push(tree.append(treelet.tree, treelet.root));
    }
    assert!(
        order.iter().all(|&i| i != usize::MAX),
        "every output slot must be filled by exactly one treelet leaf"
    );

    let root = build_upper_sah(&mut tree, &mut roots);
    BuiltTree {
        tree,
        root,
        order,
        treelets: treelet_count,
    }
}

/// Split the sorted codes wherever the top `TREELET_BITS` change.
fn treelet_ranges(morton: &[MortonPrimitive]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for end in 1..=morton.len() {
        if end == morton.len() || (morton[start].code & TREELET_MASK) != (morton[end].code & TREELET_MASK)
        {
            ranges.push(start..end);
            start = end;
        }
    }
    ranges
}

#[derive(Debug)]
struct Treelet {
    tree: BuildTree,
    root: NodeId,
    /// Output slots reserved by each leaf and the sorted codes that fill them.
    leaves: Vec<(Range<usize>, Range<usize>)>,
}

struct TreeletBuilder<'a> {
    morton: &'a [MortonPrimitive],
    summaries: &'a [PrimitiveSummary],
    offset: &'a AtomicOffset,
    max_prims_in_node: usize,
    tree: BuildTree,
    leaves: Vec<(Range<usize>, Range<usize>)>,
}

impl TreeletBuilder<'_> {
    /// Emit the subtree for `prims`, a run of sorted codes that agree on every
    /// bit above `bit`.
    fn emit(&mut self, prims: Range<usize>, bit: Option<u32>) -> NodeId {
        let n = prims.len();
        let bit = match bit {
            Some(bit) if n >= self.max_prims_in_node => bit,
            _ => return self.emit_leaf(prims),
        };

        let mask = 1_u32 << bit;
        let next = bit.checked_sub(1);
        let run = &self.morton[prims.clone()];
        if run[0].code & mask == run[n - 1].code & mask {
            // Everything falls on one side; test the next bit without a node.
            return self.emit(prims, next);
        }

        // Higher bits agree, so `bit` is 0 for a prefix of the run and 1 after it.
        let split = prims.start + run.partition_point(|mp| mp.code & mask == 0);
        let left = self.emit(prims.start..split, next);
        let right = self.emit(split..prims.end, next);
        self.tree.interior(Axis::from_index(bit as usize), left, right)
    }

    fn emit_leaf(&mut self, prims: Range<usize>) -> NodeId {
        let slots = self.offset.reserve(prims.len());
        let bounds = self.morton[prims.clone()]
            .iter()
            .fold(Bounds3::EMPTY, |acc, mp| acc.union(&self.summaries[mp.index].bounds));
        let node = self.tree.leaf(bounds, slots.start, prims.len());
        self.leaves.push((slots, prims));
        node
    }
}

/// Merge treelet roots top-down with the bucketed SAH.
fn build_upper_sah(tree: &mut BuildTree, roots: &mut [NodeId]) -> NodeId {
    let n = roots.len();
    if n == 1 {
        return roots[0];
    }

    let (bounds, centroid_bounds) = roots.iter().fold(
        (Bounds3::EMPTY, Bounds3::EMPTY),
        |(b, cb), &id| {
            let node_bounds = tree.get(id).bounds;
            (b.union(&node_bounds), cb.union_point(node_bounds.centroid()))
        },
    );
    let axis = centroid_bounds.maximum_extent();

    let mid = if centroid_bounds.extent(axis) == 0.0 {
        tracing::warn!(
            treelets = n,
            "treelet roots share one centroid; splitting them evenly"
        );
        n / 2
    } else {
        let mut buckets = SahBuckets::new(axis, centroid_bounds);
        for &id in roots.iter() {
            let b = tree.get(id).bounds;
            buckets.add(b.centroid(), &b);
        }
        let split = buckets.min_cost_split(bounds.surface_area());
        partition(roots, |&id| {
            buckets.bucket_index(tree.get(id).bounds.centroid()) <= split.bucket
        })
    };
    assert!(
        mid > 0 && mid < n,
        "upper SAH split of {n} treelets along {axis} left one side empty (mid = {mid})"
    );

    let (left, right) = roots.split_at_mut(mid);
    let left = build_upper_sah(tree, left);
    let right = build_upper_sah(tree, right);
    tree.interior(axis, left, right)
}
