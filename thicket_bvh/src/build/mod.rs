// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree construction.
//!
//! Builders produce a transient [`BuildTree`]: an arena of nodes whose
//! children are arena indices. It is written once by a builder, read once by
//! [`flatten`](crate::flatten::flatten), and then dropped.
//!
//! - `recursive`: top-down splitting with the middle, equal-counts or SAH policy.
//! - `hlbvh`: Morton-ordered treelets built in parallel, merged top-down with SAH.
//! - `sah`: the 12-bucket cost evaluation shared by both.

pub(crate) mod hlbvh;
pub(crate) mod recursive;
pub(crate) mod sah;

use crate::config::{BvhConfig, SplitMethod};
use crate::summary::PrimitiveSummary;
use crate::types::{Axis, Bounds3};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum BuildKind {
    Leaf {
        /// First slot in the final primitive order.
        first_prim_offset: usize,
        primitive_count: usize,
    },
    Interior {
        axis: Axis,
        children: [NodeId; 2],
    },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct BuildNode {
    pub(crate) bounds: Bounds3,
    pub(crate) kind: BuildKind,
}

/// Arena holding the pointer-free build tree.
#[derive(Debug, Default)]
pub(crate) struct BuildTree {
    nodes: Vec<BuildNode>,
}

impl BuildTree {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn get(&self, id: NodeId) -> &BuildNode {
        &self.nodes[id.get()]
    }

    fn push(&mut self, node: BuildNode) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub(crate) fn leaf(&mut self, bounds: Bounds3, first_prim_offset: usize, count: usize) -> NodeId {
        self.push(BuildNode {
            bounds,
            kind: BuildKind::Leaf {
                first_prim_offset,
                primitive_count: count,
            },
        })
    }

    /// Interior node whose bound is the union of its children's bounds.
    pub(crate) fn interior(&mut self, axis: Axis, left: NodeId, right: NodeId) -> NodeId {
        let bounds = self.get(left).bounds.union(&self.get(right).bounds);
        self.push(BuildNode {
            bounds,
            kind: BuildKind::Interior {
                axis,
                children: [left, right],
            },
        })
    }

    /// Move every node of `other` into this arena and return the new id of `root`.
    pub(crate) fn append(&mut self, other: Self, root: NodeId) -> NodeId {
        let base = self.nodes.len();
        self.nodes.extend(other.nodes.into_iter().map(|mut node| {
            if let BuildKind::Interior { children, .. } = &mut node.kind {
                for child in children {
                    *child = NodeId::new(child.get() + base);
                }
            }
            node
        }));
        NodeId::new(root.get() + base)
    }
}

/// Output of a builder.
#[derive(Debug)]
pub(crate) struct BuiltTree {
    pub(crate) tree: BuildTree,
    pub(crate) root: NodeId,
    /// `order[slot]` is the input index of the primitive stored at `slot`.
    pub(crate) order: Vec<usize>,
    /// Number of HLBVH treelets; zero for top-down builds.
    pub(crate) treelets: usize,
}

/// Build a tree over a non-empty, index-aligned summary array.
pub(crate) fn build(summaries: Vec<PrimitiveSummary>, config: &BvhConfig) -> BuiltTree {
    assert!(!summaries.is_empty(), "builders require at least one primitive");
    match config.split_method() {
        SplitMethod::Hlbvh => hlbvh::build(&summaries, config.max_prims_in_node()),
        method => recursive::build(summaries, method, config.max_prims_in_node()),
    }
}

/// Reorder `slice` so that every element satisfying `pred` precedes every
/// element that does not. Returns the number satisfying `pred`.
pub(crate) fn partition<T, F>(slice: &mut [T], mut pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    let mut left = 0;
    let mut right = slice.len();
    while left < right {
        if pred(&slice[left]) {
            left += 1;
        } else {
            right -= 1;
            slice.swap(left, right);
        }
    }
    left
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn cube(at: f32) -> Bounds3 {
        Bounds3::new(Vec3::splat(at), Vec3::splat(at + 1.0))
    }

    #[test]
    fn interior_bounds_are_child_unions() {
        let mut tree = BuildTree::default();
        let a = tree.leaf(cube(0.0), 0, 1);
        let b = tree.leaf(cube(5.0), 1, 1);
        let root = tree.interior(Axis::Y, a, b);
        assert_eq!(tree.get(root).bounds, cube(0.0).union(&cube(5.0)));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn append_remaps_children() {
        let mut sub = BuildTree::default();
        let a = sub.leaf(cube(0.0), 0, 1);
        let b = sub.leaf(cube(1.0), 1, 1);
        let sub_root = sub.interior(Axis::X, a, b);

        let mut tree = BuildTree::default();
        tree.leaf(cube(9.0), 2, 1);
        let root = tree.append(sub, sub_root);
        assert_eq!(root.get(), 3);
        match tree.get(root).kind {
            BuildKind::Interior { children, .. } => {
                assert_eq!(children, [NodeId::new(1), NodeId::new(2)]);
            }
            BuildKind::Leaf { .. } => panic!("appended root should stay interior"),
        }
    }

    #[test]
    fn partition_splits_by_predicate() {
        let mut v = [5, 1, 8, 2, 9, 3];
        let mid = partition(&mut v, |&x| x < 5);
        assert_eq!(mid, 3);
        assert!(v[..mid].iter().all(|&x| x < 5));
        assert!(v[mid..].iter().all(|&x| x >= 5));
        assert_eq!(partition(&mut [] as &mut [i32], |_| true), 0);
    }
}
