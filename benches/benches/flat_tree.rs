// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for building, walking, and deleting from a flat tree.
//!
//! Trees are synthetic and deterministic: every node at depth `< depth` has
//! `fanout` children, and payloads are `u32` ids.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_flat_tree::FlatTree;

/// Children table for a complete tree; ids are assigned breadth-first.
fn complete_tree(fanout: u32, depth: u32) -> Vec<Vec<u32>> {
    let mut children: Vec<Vec<u32>> = vec![Vec::new()];
    let mut frontier = vec![0_u32];
    for _ in 0..depth {
        let mut next = Vec::new();
        for parent in frontier {
            for _ in 0..fanout {
                let id = u32::try_from(children.len()).unwrap();
                children.push(Vec::new());
                children[parent as usize].push(id);
                next.push(id);
            }
        }
        frontier = next;
    }
    children
}

fn build(children: &[Vec<u32>]) -> FlatTree<u32> {
    FlatTree::new([0_u32], |&id| children[id as usize].clone())
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_tree/build");
    for (fanout, depth) in [(4_u32, 5_u32), (8, 4), (2, 12)] {
        let children = complete_tree(fanout, depth);
        group.throughput(Throughput::Elements(children.len() as u64));
        group.bench_with_input(
            BenchmarkId::new(format!("fanout{fanout}"), children.len()),
            &children,
            |b, children| b.iter(|| black_box(build(children))),
        );
    }

    // A single chain: exercises the explicit work stack past its inline size.
    let chain = 10_000_u32;
    group.bench_function(BenchmarkId::new("chain", chain), |b| {
        b.iter(|| {
            black_box(FlatTree::new([0_u32], |&id| {
                if id + 1 < chain { Some(id + 1) } else { None }
            }))
        });
    });
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_tree/query");
    let tree = build(&complete_tree(2, 14));
    let deepest = tree.len() - 1;

    group.bench_function("ancestors_of_last_leaf", |b| {
        b.iter(|| black_box(tree.ancestors(black_box(deepest)).unwrap().count()));
    });
    group.bench_function("children_of_root", |b| {
        b.iter(|| black_box(tree.children(black_box(0)).unwrap().count()));
    });
    group.bench_function("find_index_last", |b| {
        let target = *tree.get(deepest).unwrap().payload();
        b.iter(|| black_box(tree.find_index(|n| *n.payload() == target)));
    });
    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_tree/delete");
    let tree = build(&complete_tree(4, 6));

    // First leaf: the whole tail shifts and every ancestor shrinks.
    let first_leaf = tree.find_index(|n| !n.has_children()).unwrap();
    // Last root child: nothing follows the removed range.
    let last_child = tree.children(0).unwrap().last().unwrap().index();

    for (name, index) in [("first_leaf", first_leaf), ("last_root_child", last_child)] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| black_box(tree.delete(index).unwrap()),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_queries, bench_delete);
criterion_main!(benches);
