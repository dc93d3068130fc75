// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closest-hit and any-hit throughput per split method, with a linear scan
//! as the baseline.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use thicket_bvh::{Bvh, BvhConfig, LinearScan, SplitMethod};

mod common;

const METHODS: [SplitMethod; 4] = [
    SplitMethod::Sah,
    SplitMethod::Hlbvh,
    SplitMethod::Middle,
    SplitMethod::EqualCounts,
];

fn bench_closest_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("closest_hit");
    let boxes = common::uniform_boxes(20_000, 500.0, 0x7A7A);
    let rays = common::random_rays(4096, 500.0, 0x4A75);
    group.throughput(Throughput::Elements(rays.len() as u64));
    for method in METHODS {
        let bvh = Bvh::new(boxes.clone(), BvhConfig::new(method, 4));
        group.bench_function(format!("{method}"), |b| {
            b.iter(|| {
                let hits = rays.iter().filter_map(|r| bvh.closest_hit(r)).count();
                black_box(hits);
            })
        });
    }
    group.finish();
}

fn bench_any_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("any_hit");
    let boxes = common::uniform_boxes(20_000, 500.0, 0x7A7A);
    let rays: Vec<_> = common::random_rays(4096, 500.0, 0x5EAD)
        .into_iter()
        .map(|r| r.with_t_max(50.0))
        .collect();
    group.throughput(Throughput::Elements(rays.len() as u64));
    for method in METHODS {
        let bvh = Bvh::new(boxes.clone(), BvhConfig::new(method, 4));
        group.bench_function(format!("{method}"), |b| {
            b.iter(|| {
                let hits = rays.iter().filter(|r| bvh.any_hit(r)).count();
                black_box(hits);
            })
        });
    }
    group.finish();
}

fn bench_linear_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("closest_hit_baseline");
    for &n in &[64usize, 512, 4096] {
        let boxes = common::uniform_boxes(n, 100.0, 0xBA5E);
        let rays = common::random_rays(256, 100.0, 0x0123);
        let scan = LinearScan::new(boxes.clone());
        let bvh = Bvh::new(boxes, BvhConfig::default());
        group.throughput(Throughput::Elements(rays.len() as u64));
        group.bench_function(format!("linear_n{n}"), |b| {
            b.iter(|| black_box(rays.iter().filter_map(|r| scan.closest_hit(r)).count()))
        });
        group.bench_function(format!("bvh_n{n}"), |b| {
            b.iter(|| black_box(rays.iter().filter_map(|r| bvh.closest_hit(r)).count()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_closest_hit, bench_any_hit, bench_linear_baseline);
criterion_main!(benches);
