// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket BVH: a bounding volume hierarchy for ray tracing.
//!
//! A [`Bvh`] is built once over a set of [`Primitive`]s and then answers two
//! queries far faster than testing every primitive:
//!
//! - [`Bvh::closest_hit`]: the nearest primitive a ray hits, and where.
//! - [`Bvh::any_hit`]: whether the ray hits anything (shadow and occlusion rays).
//!
//! A `Bvh` is itself a [`Primitive`], so hierarchies nest: an instance or
//! object-level hierarchy can sit inside a scene-level one.
//!
//! # Example
//!
//! ```rust
//! use glam::Vec3;
//! use thicket_bvh::shapes::Sphere;
//! use thicket_bvh::{Bvh, BvhConfig, Ray, SplitMethod};
//!
//! let spheres: Vec<Sphere> = (0..8)
//!     .map(|i| Sphere::new(Vec3::new(i as f32 * 4.0, 0.0, 0.0), 1.0))
//!     .collect();
//! let bvh = Bvh::new(spheres, BvhConfig::default().with_split_method(SplitMethod::Sah));
//!
//! // Straight down the z axis through the third sphere.
//! let ray = Ray::new(Vec3::new(8.0, 0.0, -10.0), Vec3::Z);
//! let hit = bvh.closest_hit(&ray).unwrap();
//! assert_eq!(hit.primitive, 2);
//! assert!((hit.intersection.t - 9.0).abs() < 1e-4);
//!
//! // A ray that passes between spheres hits nothing.
//! assert!(!bvh.any_hit(&Ray::new(Vec3::new(2.0, 0.0, -10.0), Vec3::Z)));
//! ```
//!
//! Scene descriptions name the split method as a string; [`BvhConfig::from_params`]
//! parses it, warning and falling back to the defaults on bad input:
//!
//! ```rust
//! use thicket_bvh::{BvhConfig, SplitMethod};
//!
//! let config = BvhConfig::from_params(Some("hlbvh"), Some(8));
//! assert_eq!(config.split_method(), SplitMethod::Hlbvh);
//! assert_eq!(config.max_prims_in_node(), 8);
//!
//! let fallback = BvhConfig::from_params(Some("octree"), Some(1000));
//! assert_eq!(fallback.split_method(), SplitMethod::Sah);
//! assert_eq!(fallback.max_prims_in_node(), BvhConfig::MAX_PRIMS_IN_NODE_LIMIT);
//! ```
//!
//! ## Choosing a split method
//!
//! - `Sah` (default): buckets centroids and picks the split with the lowest
//!   surface-area cost. Best trees; moderate build time.
//! - `Hlbvh`: sorts Morton codes, builds spatially local treelets in parallel on
//!   the rayon pool, then merges the treelets with SAH. Fastest build for large
//!   scenes; trees are close to SAH quality.
//! - `Middle`: splits the centroid bounds in half. Cheap; poor on clustered input.
//! - `EqualCounts`: splits at the median centroid. Balanced; ignores box sizes.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber. Builds
//! run inside a `bvh_build` span and log their statistics at `debug` level;
//! configuration fallbacks are logged at `warn`.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs in primitive bounds or ray origins. Direction
//! components may be zero, including `-0.0`. The reciprocal of a zero
//! component is an infinity whose sign follows the zero's sign, and that sign
//! picks the near and far faces of each node box. When the origin of such a
//! ray lies exactly on a face of that axis, the slab product is `0 * inf`,
//! which is NaN. The slab test ignores NaN slab distances, so the ray counts as
//! inside the box on that axis and the node is still visited. [`AxisBox`]
//! treats these rays the same way, so a [`Bvh`] and a [`LinearScan`] agree on
//! them.
//!
//! [`AxisBox`]: shapes::AxisBox

mod build;
mod bvh;
mod config;
mod counter;
mod error;
mod flatten;
mod linear;
mod morton;
mod node;
mod primitive;
mod stats;
mod summary;
mod traverse;
mod types;

pub mod shapes;

pub use bvh::{Bvh, BvhHit};
pub use config::{BvhConfig, SplitMethod};
pub use error::UnknownSplitMethod;
pub use linear::LinearScan;
pub use node::{LinearNode, LinearNodeKind};
pub use primitive::Primitive;
pub use stats::BuildStats;
pub use types::{Axis, Bounds3, DirIsNeg, Intersection, Ray};
