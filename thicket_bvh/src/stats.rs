// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build statistics reported alongside the finished hierarchy.

use crate::node::{LinearNode, LinearNodeKind};

/// Shape of a finished hierarchy, for tuning and diagnostics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Total entries in the node array.
    pub total_nodes: usize,
    /// Interior nodes.
    pub interior_nodes: usize,
    /// Leaf nodes.
    pub leaf_nodes: usize,
    /// Primitive references summed over all leaves.
    pub primitives: usize,
    /// Nodes on the longest root-to-leaf path.
    pub max_depth: usize,
    /// Treelets produced by an HLBVH build; zero otherwise.
    pub treelets: usize,
    /// Bytes occupied by the node array.
    pub tree_bytes: usize,
}

impl BuildStats {
    pub(crate) fn new(nodes: &[LinearNode], max_depth: usize, treelets: usize) -> Self {
        let mut stats = Self {
            total_nodes: nodes.len(),
            max_depth,
            treelets,
            tree_bytes: core::mem::size_of_val(nodes),
            ..Self::default()
        };
        for node in nodes {
            match node.kind {
                LinearNodeKind::Leaf {
                    primitive_count, ..
                } => {
                    stats.leaf_nodes += 1;
                    stats.primitives += primitive_count as usize;
                }
                LinearNodeKind::Interior { .. } => stats.interior_nodes += 1,
            }
        }
        stats
    }

    /// Mean primitives per leaf, or 0 for an empty hierarchy.
    #[allow(
        clippy::cast_precision_loss,
        reason = "a diagnostic ratio; precision loss is irrelevant"
    )]
    pub fn primitives_per_leaf(&self) -> f32 {
        if self.leaf_nodes == 0 {
            0.0
        } else {
            self.primitives as f32 / self.leaf_nodes as f32
        }
    }
}
