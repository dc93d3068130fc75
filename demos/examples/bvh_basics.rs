// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! BVH basics.
//!
//! Build a hierarchy over a grid of spheres, trace a closest-hit and a shadow
//! ray, and nest the hierarchy inside another one.
//!
//! Run:
//! - `cargo run -p thicket_demos --example bvh_basics`
//! - `RUST_LOG=thicket_bvh=trace cargo run -p thicket_demos --example bvh_basics`

use glam::Vec3;
use thicket_bvh::shapes::{AxisBox, Sphere};
use thicket_bvh::{Bvh, BvhConfig, Primitive, Ray, SplitMethod};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("thicket_bvh=debug")),
        )
        .init();

    // A 10 x 10 grid of spheres on the z = 20 plane.
    let spheres: Vec<Sphere> = (0..100)
        .map(|i| {
            let (x, y) = ((i % 10) as f32, (i / 10) as f32);
            Sphere::new(Vec3::new(x * 3.0, y * 3.0, 20.0), 1.0)
        })
        .collect();
    let bvh = Bvh::new(spheres, BvhConfig::default());
    let stats = bvh.stats();
    println!(
        "{} primitives -> {} nodes ({} leaves, depth {}, {:.2} prims/leaf, {} bytes)",
        bvh.len(),
        stats.total_nodes,
        stats.leaf_nodes,
        stats.max_depth,
        stats.primitives_per_leaf(),
        stats.tree_bytes,
    );

    // Aim at the sphere in row 4, column 7.
    let ray = Ray::new(Vec3::new(21.0, 12.0, 0.0), Vec3::Z);
    match bvh.closest_hit(&ray) {
        Some(hit) => println!(
            "closest hit: sphere {} at t={:.3} point={} normal={}",
            hit.primitive, hit.intersection.t, hit.intersection.point, hit.intersection.normal
        ),
        None => println!("closest hit: none"),
    }

    // Shadow rays: one blocked by the grid, one stopping short of it.
    let light_dir = Vec3::Z;
    let blocked = Ray::new(Vec3::new(21.0, 12.0, 0.0), light_dir);
    let short = blocked.with_t_max(10.0);
    println!("shadow ray blocked: {}", bvh.any_hit(&blocked));
    println!("short shadow ray blocked: {}", bvh.any_hit(&short));

    // A hierarchy is a primitive, so it can sit inside another one.
    let tiles: Vec<AxisBox> = (0..16)
        .map(|i| {
            let x = i as f32 * 2.0;
            AxisBox::new(Vec3::new(x, -2.0, 0.0), Vec3::new(x + 2.0, -1.0, 40.0))
        })
        .collect();
    let floor = Bvh::new(tiles, BvhConfig::new(SplitMethod::EqualCounts, 2));
    let scene: Vec<Box<dyn Primitive>> = vec![Box::new(bvh), Box::new(floor)];
    let scene = Bvh::new(scene, BvhConfig::default());
    println!("scene bound: {:?}", scene.world_bound());
    let down = Ray::new(Vec3::new(5.0, 10.0, 30.0), -Vec3::Y);
    if let Some(hit) = scene.closest_hit(&down) {
        println!(
            "downward ray hits scene object {} at t={:.3}",
            hit.primitive, hit.intersection.t
        );
    }
}
