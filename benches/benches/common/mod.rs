// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene and ray generators shared by the benchmarks.

#![allow(dead_code, reason = "each bench target uses a subset")]

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thicket_bvh::Ray;
use thicket_bvh::shapes::AxisBox;

/// Unit boxes scattered uniformly through a cube of side `extent`.
pub(crate) fn uniform_boxes(count: usize, extent: f32, seed: u64) -> Vec<AxisBox> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            AxisBox::unit_at(Vec3::new(
                rng.gen_range(0.0..extent),
                rng.gen_range(0.0..extent),
                rng.gen_range(0.0..extent),
            ))
        })
        .collect()
}

/// Tight clusters of small boxes, the case where the middle split suffers.
pub(crate) fn clustered_boxes(clusters: usize, per_cluster: usize, seed: u64) -> Vec<AxisBox> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(clusters * per_cluster);
    for _ in 0..clusters {
        let center = Vec3::new(
            rng.gen_range(0.0..2000.0),
            rng.gen_range(0.0..2000.0),
            rng.gen_range(0.0..2000.0),
        );
        for _ in 0..per_cluster {
            let min = center
                + Vec3::new(
                    rng.gen_range(-5.0..5.0),
                    rng.gen_range(-5.0..5.0),
                    rng.gen_range(-5.0..5.0),
                );
            out.push(AxisBox::new(min, min + Vec3::splat(0.25)));
        }
    }
    out
}

/// Rays starting inside a cube of side `extent`, pointing anywhere.
pub(crate) fn random_rays(count: usize, extent: f32, seed: u64) -> Vec<Ray> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let origin = Vec3::new(
                rng.gen_range(0.0..extent),
                rng.gen_range(0.0..extent),
                rng.gen_range(0.0..extent),
            );
            let direction = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            )
            .normalize_or(Vec3::X);
            Ray::new(origin, direction)
        })
        .collect()
}
