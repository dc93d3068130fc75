// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack-based traversal of the flattened node array.

use core::ops::{ControlFlow, Range};

use smallvec::SmallVec;

use crate::node::{LinearNode, LinearNodeKind};
use crate::primitive::Primitive;
use crate::types::{DirIsNeg, Intersection, Ray};

/// Pending node offsets. Inline capacity covers any tree of sane depth.
type NodeStack = SmallVec<[u32; 64]>;

/// Visit every leaf whose bound `ray` crosses, roughly front to back.
///
/// `visit` receives the ray and the leaf's primitive range. It may shorten
/// `ray.t_max`, which prunes later box tests, or break to stop the walk.
pub(crate) fn walk<F>(nodes: &[LinearNode], ray: &mut Ray, mut visit: F)
where
    F: FnMut(&mut Ray, Range<usize>) -> ControlFlow<()>,
{
    if nodes.is_empty() {
        return;
    }
    let inv_dir = ray.direction.recip();
    let dir_is_neg = DirIsNeg::from_inv_dir(inv_dir);

    let mut stack = NodeStack::new();
    let mut current = 0_u32;
    loop {
        let node = &nodes[current as usize];
        if node.bounds.intersect_p(ray, inv_dir, dir_is_neg) {
            match node.kind {
                LinearNodeKind::Leaf {
                    primitives_offset,
                    primitive_count,
                } => {
                    let start = primitives_offset as usize;
                    if visit(ray, start..start + primitive_count as usize).is_break() {
                        return;
                    }
                }
                LinearNodeKind::Interior {
                    second_child_offset,
                    axis,
                } => {
                    // Descend into the child nearer along the split axis first.
                    if dir_is_neg.on(axis) {
                        stack.push(current + 1);
                        current = second_child_offset;
                    } else {
                        stack.push(second_child_offset);
                        current += 1;
                    }
                    continue;
                }
            }
        }
        match stack.pop() {
            Some(next) => current = next,
            None => return,
        }
    }
}

/// Nearest hit among `primitives`, with the slot it was found at.
pub(crate) fn closest_hit<P: Primitive>(
    nodes: &[LinearNode],
    primitives: &[P],
    ray: &Ray,
) -> Option<(usize, Intersection)> {
    let mut ray = *ray;
    let mut best = None;
    walk(nodes, &mut ray, |ray, range| {
        for slot in range {
            if let Some(hit) = primitives[slot].intersect(ray) {
                ray.t_max = hit.t;
                best = Some((slot, hit));
            }
        }
        ControlFlow::Continue(())
    });
    best
}

/// Whether any primitive is hit; stops at the first one found.
pub(crate) fn any_hit<P: Primitive>(nodes: &[LinearNode], primitives: &[P], ray: &Ray) -> bool {
    let mut ray = *ray;
    let mut hit = false;
    walk(nodes, &mut ray, |ray, range| {
        if primitives[range].iter().any(|p| p.intersect_p(ray)) {
            hit = true;
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    hit
}
