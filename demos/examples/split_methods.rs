// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compare split methods.
//!
//! Builds the same random scene with each split method named on the command
//! line (all four by default), then prints build time, tree shape and ray
//! throughput. Unknown names fall back to SAH with a warning.
//!
//! Run:
//! - `cargo run --release -p thicket_demos --example split_methods`
//! - `cargo run --release -p thicket_demos --example split_methods -- hlbvh middle 8`

use std::time::Instant;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thicket_bvh::shapes::AxisBox;
use thicket_bvh::{Bvh, BvhConfig, Ray};
use tracing_subscriber::EnvFilter;

const PRIMITIVES: usize = 200_000;
const RAYS: usize = 100_000;
const EXTENT: f32 = 1000.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Trailing integer argument, if any, is the leaf size.
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let max_prims = match args.last().and_then(|a| a.parse::<i64>().ok()) {
        Some(n) => {
            args.pop();
            Some(n)
        }
        None => None,
    };
    let names: Vec<String> = if args.is_empty() {
        ["sah", "hlbvh", "middle", "equal"].map(String::from).to_vec()
    } else {
        args
    };

    let mut rng = StdRng::seed_from_u64(0x5EED);
    let boxes: Vec<AxisBox> = (0..PRIMITIVES)
        .map(|_| {
            let min = Vec3::new(
                rng.gen_range(0.0..EXTENT),
                rng.gen_range(0.0..EXTENT),
                rng.gen_range(0.0..EXTENT),
            );
            AxisBox::new(min, min + Vec3::splat(rng.gen_range(0.5..3.0)))
        })
        .collect();
    let rays: Vec<Ray> = (0..RAYS)
        .map(|_| {
            let origin = Vec3::new(
                rng.gen_range(0.0..EXTENT),
                rng.gen_range(0.0..EXTENT),
                rng.gen_range(0.0..EXTENT),
            );
            let dir = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            Ray::new(origin, dir.normalize_or(Vec3::Z))
        })
        .collect();

    println!(
        "{:<8} {:>10} {:>9} {:>9} {:>6} {:>9} {:>8} {:>12}",
        "method", "build_ms", "nodes", "leaves", "depth", "prims/lf", "treelets", "rays/s"
    );
    for name in &names {
        let config = BvhConfig::from_params(Some(name.as_str()), max_prims);

        let start = Instant::now();
        let bvh = Bvh::new(boxes.clone(), config);
        let build = start.elapsed();

        let start = Instant::now();
        let hits = rays.iter().filter_map(|r| bvh.closest_hit(r)).count();
        let trace = start.elapsed();

        let stats = bvh.stats();
        println!(
            "{:<8} {:>10.1} {:>9} {:>9} {:>6} {:>9.2} {:>8} {:>12.0}",
            config.split_method(),
            build.as_secs_f64() * 1e3,
            stats.total_nodes,
            stats.leaf_nodes,
            stats.max_depth,
            stats.primitives_per_leaf(),
            stats.treelets,
            RAYS as f64 / trace.as_secs_f64(),
        );
        tracing::info!(method = %config.split_method(), hits, "traced");
    }
}
