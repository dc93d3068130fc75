// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The bounding volume hierarchy aggregate.

use core::fmt;

use crate::build;
use crate::config::BvhConfig;
use crate::flatten::flatten;
use crate::node::LinearNode;
use crate::primitive::Primitive;
use crate::stats::BuildStats;
use crate::summary::summarize;
use crate::traverse;
use crate::types::{Bounds3, Intersection, Ray};

/// A closest-hit result.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BvhHit {
    /// Index of the hit primitive in the input given to [`Bvh::new`].
    pub primitive: usize,
    /// Where the ray hit it.
    pub intersection: Intersection,
}

/// Bounding volume hierarchy over an owned set of primitives.
///
/// Built once by [`Bvh::new`] and immutable afterwards; rebuild to change the
/// geometry. Queries take `&self`, so any number of threads can trace rays
/// against one hierarchy at the same time.
pub struct Bvh<P> {
    /// Primitives in leaf order.
    primitives: Vec<P>,
    /// `order[slot]` is the input index of `primitives[slot]`.
    order: Vec<usize>,
    nodes: Vec<LinearNode>,
    config: BvhConfig,
    stats: BuildStats,
}

impl<P: Primitive> Bvh<P> {
    /// Build a hierarchy over `primitives`.
    ///
    /// An empty input yields an empty hierarchy that never reports a hit.
    #[tracing::instrument(
        name = "bvh_build",
        skip_all,
        fields(primitives = primitives.len(), method = %config.split_method())
    )]
    pub fn new(primitives: Vec<P>, config: BvhConfig) -> Self {
        if primitives.is_empty() {
            tracing::debug!("no primitives; hierarchy is empty");
            return Self {
                primitives,
                order: Vec::new(),
                nodes: Vec::new(),
                config,
                stats: BuildStats::default(),
            };
        }

        let built = build::build(summarize(&primitives), &config);
        let flat = flatten(&built.tree, built.root);
        drop(built.tree);

        let mut pending: Vec<Option<P>> = primitives.into_iter().map(Some).collect();
        let primitives: Vec<P> = built
            .order
            .iter()
            .map(|&index| {
                pending[index]
                    .take()
                    .expect("primitive order must be a permutation of the input")
            })
            .collect();

        let stats = BuildStats::new(&flat.nodes, flat.max_depth, built.treelets);
        tracing::debug!(
            nodes = stats.total_nodes,
            interior = stats.interior_nodes,
            leaves = stats.leaf_nodes,
            depth = stats.max_depth,
            treelets = stats.treelets,
            prims_per_leaf = stats.primitives_per_leaf(),
            tree_bytes = stats.tree_bytes,
            "built BVH"
        );

        Self {
            primitives,
            order: built.order,
            nodes: flat.nodes,
            config,
            stats,
        }
    }
}

impl<P> Bvh<P> {
    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Whether the hierarchy holds no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Bound of every primitive; [`Bounds3::EMPTY`] when empty.
    pub fn world_bound(&self) -> Bounds3 {
        self.nodes.first().map_or(Bounds3::EMPTY, |root| root.bounds)
    }

    /// The depth-first node array. Node 0 is the root.
    pub fn nodes(&self) -> &[LinearNode] {
        &self.nodes
    }

    /// Primitives in the order leaves reference them.
    pub fn primitives(&self) -> &[P] {
        &self.primitives
    }

    /// Input index of each stored primitive.
    pub fn primitive_order(&self) -> &[usize] {
        &self.order
    }

    /// Shape of the finished hierarchy.
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Configuration the hierarchy was built with.
    pub fn config(&self) -> &BvhConfig {
        &self.config
    }
}

impl<P: Primitive> Bvh<P> {
    /// Nearest primitive hit by `ray` within `(0, ray.t_max)`.
    pub fn closest_hit(&self, ray: &Ray) -> Option<BvhHit> {
        traverse::closest_hit(&self.nodes, &self.primitives, ray).map(|(slot, intersection)| {
            BvhHit {
                primitive: self.order[slot],
                intersection,
            }
        })
    }

    /// Whether `ray` hits anything within `(0, ray.t_max)`.
    pub fn any_hit(&self, ray: &Ray) -> bool {
        traverse::any_hit(&self.nodes, &self.primitives, ray)
    }
}

impl<P: Primitive> Primitive for Bvh<P> {
    fn world_bound(&self) -> Bounds3 {
        Self::world_bound(self)
    }

    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        self.closest_hit(ray).map(|hit| hit.intersection)
    }

    fn intersect_p(&self, ray: &Ray) -> bool {
        self.any_hit(ray)
    }
}

impl<P> fmt::Debug for Bvh<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bvh")
            .field("primitives", &self.primitives.len())
            .field("nodes", &self.nodes.len())
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
