// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Thicket BVH: build over a few spheres, then trace rays.

use glam::Vec3;
use thicket_bvh::shapes::Sphere;
use thicket_bvh::{Bvh, BvhConfig, Ray};

fn main() {
    let spheres = vec![
        Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0),
        Sphere::new(Vec3::new(0.0, 0.0, 5.0), 0.5),
        Sphere::new(Vec3::new(4.0, 0.0, 5.0), 1.0),
    ];
    let bvh = Bvh::new(spheres, BvhConfig::default());
    println!("built: {:?}", bvh.stats());

    // Closest hit along +z: the small sphere in front wins.
    let ray = Ray::new(Vec3::ZERO, Vec3::Z);
    if let Some(hit) = bvh.closest_hit(&ray) {
        println!(
            "closest: primitive {} at t={} normal={}",
            hit.primitive, hit.intersection.t, hit.intersection.normal
        );
    }

    // Shadow ray that stops short of everything.
    let shadow = ray.with_t_max(3.0);
    println!("occluded within t<3: {}", bvh.any_hit(&shadow));
}
