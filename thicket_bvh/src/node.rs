// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The flattened node layout that traversal walks.

use core::ops::Range;

use crate::types::{Axis, Bounds3};

/// One entry of the depth-first node array.
///
/// Node 0 is the root. An interior node's first child is always the next
/// entry, so only the second child's position is stored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinearNode {
    /// Union of everything beneath this node.
    pub bounds: Bounds3,
    /// Leaf or interior payload.
    pub kind: LinearNodeKind,
}

/// Payload of a [`LinearNode`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LinearNodeKind {
    /// Terminal node referencing a run of the reordered primitive array.
    Leaf {
        /// Position of the first primitive.
        primitives_offset: u32,
        /// Number of primitives in the run.
        primitive_count: u32,
    },
    /// Branching node.
    Interior {
        /// Array position of the second child.
        second_child_offset: u32,
        /// Axis the children were split along.
        axis: Axis,
    },
}

impl LinearNode {
    /// Whether this node is a leaf.
    pub const fn is_leaf(&self) -> bool {
        matches!(self.kind, LinearNodeKind::Leaf { .. })
    }

    /// Range of the reordered primitive array held by a leaf.
    pub fn primitives(&self) -> Option<Range<usize>> {
        match self.kind {
            LinearNodeKind::Leaf {
                primitives_offset,
                primitive_count,
            } => {
                let start = primitives_offset as usize;
                Some(start..start + primitive_count as usize)
            }
            LinearNodeKind::Interior { .. } => None,
        }
    }
}
