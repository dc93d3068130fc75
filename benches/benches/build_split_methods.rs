// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build time for each split method on uniform and clustered scenes.

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use thicket_bvh::{Bvh, BvhConfig, SplitMethod};

mod common;

const METHODS: [SplitMethod; 4] = [
    SplitMethod::Sah,
    SplitMethod::Hlbvh,
    SplitMethod::Middle,
    SplitMethod::EqualCounts,
];

fn bench_uniform(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_uniform");
    for &n in &[1_000usize, 10_000, 100_000] {
        let boxes = common::uniform_boxes(n, 1000.0, 0xB0C5);
        group.throughput(Throughput::Elements(n as u64));
        for method in METHODS {
            group.bench_function(format!("{method}_n{n}"), |b| {
                b.iter_batched(
                    || boxes.clone(),
                    |boxes| black_box(Bvh::new(boxes, BvhConfig::new(method, 4))),
                    BatchSize::LargeInput,
                )
            });
        }
    }
    group.finish();
}

fn bench_clustered(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_clustered");
    let boxes = common::clustered_boxes(200, 250, 0xC1A5);
    group.throughput(Throughput::Elements(boxes.len() as u64));
    for method in METHODS {
        group.bench_function(format!("{method}"), |b| {
            b.iter_batched(
                || boxes.clone(),
                |boxes| black_box(Bvh::new(boxes, BvhConfig::new(method, 4))),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_leaf_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_sah_leaf_size");
    let boxes = common::uniform_boxes(50_000, 1000.0, 0x1EAF);
    for max in [1usize, 4, 16, 64] {
        group.bench_function(format!("max{max}"), |b| {
            b.iter_batched(
                || boxes.clone(),
                |boxes| black_box(Bvh::new(boxes, BvhConfig::new(SplitMethod::Sah, max))),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_uniform, bench_clustered, bench_leaf_size);
criterion_main!(benches);
