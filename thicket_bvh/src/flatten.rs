// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth-first flattening of the build tree into a contiguous node array.

use crate::build::{BuildKind, BuildTree, NodeId};
use crate::node::{LinearNode, LinearNodeKind};

#[derive(Debug)]
pub(crate) struct Flattened {
    pub(crate) nodes: Vec<LinearNode>,
    /// Number of nodes on the longest root-to-leaf path.
    pub(crate) max_depth: usize,
}

/// Lay the tree rooted at `root` out in pre-order.
pub(crate) fn flatten(tree: &BuildTree, root: NodeId) -> Flattened {
    let mut out = Flattened {
        nodes: Vec::with_capacity(tree.len()),
        max_depth: 0,
    };
    flatten_node(tree, root, 1, &mut out);
    out
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).expect("flattened BVH offsets must fit in 32 bits")
}

fn flatten_node(tree: &BuildTree, id: NodeId, depth: usize, out: &mut Flattened) -> u32 {
    out.max_depth = out.max_depth.max(depth);
    let node = tree.get(id);
    let offset = out.nodes.len();
    match node.kind {
        BuildKind::Leaf {
            first_prim_offset,
            primitive_count,
        } => {
            out.nodes.push(LinearNode {
                bounds: node.bounds,
                kind: LinearNodeKind::Leaf {
                    primitives_offset: to_u32(first_prim_offset),
                    primitive_count: to_u32(primitive_count),
                },
            });
        }
        BuildKind::Interior {
            axis,
            children: [left, right],
        } => {
            out.nodes.push(LinearNode {
                bounds: node.bounds,
                kind: LinearNodeKind::Interior {
                    second_child_offset: 0,
                    axis,
                },
            });
            let first = flatten_node(tree, left, depth + 1, out);
            debug_assert_eq!(first as usize, offset + 1, "first child follows its parent");
            let second = flatten_node(tree, right, depth + 1, out);
            out.nodes[offset].kind = LinearNodeKind::Interior {
                second_child_offset: second,
                axis,
            };
        }
    }
    to_u32(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Axis, Bounds3};
    use glam::Vec3;

    fn cube(at: f32) -> Bounds3 {
        Bounds3::new(Vec3::splat(at), Vec3::splat(at + 1.0))
    }

    #[test]
    fn pre_order_layout_with_second_child_offsets() {
        // ((a b) c)
        let mut tree = BuildTree::default();
        let a = tree.leaf(cube(0.0), 0, 1);
        let b = tree.leaf(cube(1.0), 1, 2);
        let ab = tree.interior(Axis::X, a, b);
        let c = tree.leaf(cube(4.0), 3, 1);
        let root = tree.interior(Axis::Z, ab, c);

        let flat = flatten(&tree, root);
        assert_eq!(flat.nodes.len(), 5);
        assert_eq!(flat.max_depth, 3);
        assert_eq!(
            flat.nodes[0].kind,
            LinearNodeKind::Interior {
                second_child_offset: 4,
                axis: Axis::Z
            }
        );
        assert_eq!(
            flat.nodes[1].kind,
            LinearNodeKind::Interior {
                second_child_offset: 3,
                axis: Axis::X
            }
        );
        assert_eq!(flat.nodes[3].primitives(), Some(1..3));
        assert_eq!(flat.nodes[4].primitives(), Some(3..4));
        assert_eq!(flat.nodes[0].bounds, cube(0.0).union(&cube(4.0)));

        for (i, node) in flat.nodes.iter().enumerate() {
            if let LinearNodeKind::Interior {
                second_child_offset,
                ..
            } = node.kind
            {
                let second = second_child_offset as usize;
                assert!(second > i && second < flat.nodes.len());
            }
        }
    }

    #[test]
    fn single_leaf_is_the_whole_array() {
        let mut tree = BuildTree::default();
        let leaf = tree.leaf(cube(2.0), 0, 3);
        let flat = flatten(&tree, leaf);
        assert_eq!(flat.nodes.len(), 1);
        assert_eq!(flat.max_depth, 1);
        assert!(flat.nodes[0].is_leaf());
    }
}
