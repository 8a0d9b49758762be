use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tsp_algos::cs::graph::prim::{minimum_spanning_tree, minimum_spanning_tree_dense};
use tsp_algos::cs::tsp::generate::random_euclidean;
use tsp_algos::cs::tsp::{solve_christofides, solve_held_karp, solve_nn_2opt};

fn bench_approximate(c: &mut Criterion) {
    let mut group = c.benchmark_group("approximate");
    for n in [10, 50, 100] {
        let graph = random_euclidean(n, &mut ChaCha8Rng::seed_from_u64(n as u64)).unwrap();
        group.bench_with_input(BenchmarkId::new("christofides", n), &graph, |b, g| {
            b.iter(|| solve_christofides(black_box(g)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("nn_2opt", n), &graph, |b, g| {
            b.iter(|| solve_nn_2opt(black_box(g), &[]).unwrap())
        });
    }
    group.finish();
}

fn bench_prim(c: &mut Criterion) {
    let mut group = c.benchmark_group("prim");
    for n in [50, 200] {
        let graph = random_euclidean(n, &mut ChaCha8Rng::seed_from_u64(n as u64)).unwrap();
        group.bench_with_input(BenchmarkId::new("heap", n), &graph, |b, g| {
            b.iter(|| minimum_spanning_tree(black_box(g)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("dense", n), &graph, |b, g| {
            b.iter(|| minimum_spanning_tree_dense(black_box(g)).unwrap())
        });
    }
    group.finish();
}

fn bench_held_karp(c: &mut Criterion) {
    let mut group = c.benchmark_group("held_karp");
    group.sample_size(10);
    for n in [8, 12, 15] {
        let graph = random_euclidean(n, &mut ChaCha8Rng::seed_from_u64(n as u64)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, g| {
            b.iter(|| solve_held_karp(black_box(g)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_approximate, bench_prim, bench_held_karp);
criterion_main!(benches);
