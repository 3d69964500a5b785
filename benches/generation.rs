// SPDX-License-Identifier: Apache-2.0
//
// Copyright 2026 wgsl-struct-fuzz contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wgsl_struct_fuzz::{mutate, render, MutationKind};

fn corpus_of(len: usize, seed: u8) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect()
}

fn bench_render_by_corpus_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_by_corpus_size");

    let sizes = vec![("tiny_16", 16), ("small_128", 128), ("medium_1024", 1024), ("large_8192", 8192)];

    for (name, size) in sizes {
        let data = corpus_of(size, 7);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("bytes", name), &data, |b, data| {
            b.iter(|| black_box(render(data)));
        });
    }

    group.finish();
}

fn bench_mutate_by_kind(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutate_by_kind");
    let data = corpus_of(512, 3);

    for kind in MutationKind::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &kind, |b, &kind| {
            b.iter(|| black_box(mutate(&data, usize::MAX, 42, kind)));
        });
    }

    group.finish();
}

fn bench_batch_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_render");

    let batch_sizes = vec![10, 100, 1000];

    for size in batch_sizes {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                for i in 0..size {
                    let data = corpus_of(64, i as u8);
                    black_box(render(&data));
                }
            });
        });
    }

    group.finish();
}

fn bench_deterministic_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("deterministic");
    let data = corpus_of(256, 1);

    group.bench_function("fixed_seed", |b| {
        b.iter(|| black_box(mutate(&data, usize::MAX, 42, MutationKind::RandomTerminal)));
    });

    group.bench_function("subtree_transfer", |b| {
        b.iter(|| black_box(mutate(&data, usize::MAX, 42, MutationKind::SubtreeTransfer)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_render_by_corpus_size,
    bench_mutate_by_kind,
    bench_batch_render,
    bench_deterministic_mutation
);
criterion_main!(benches);
