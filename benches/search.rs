use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use hamgraph::analysis::{classify, find_cycle};
use hamgraph::graph::{RandomGraphGenerator, Saturation};

fn hamiltonian_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamiltonian_search");
    let saturation = Saturation::from_percent(50).unwrap();
    for nodes in [8usize, 12, 16] {
        let graph = RandomGraphGenerator::from_seed(nodes as u64)
            .generate_with_saturation(nodes, saturation)
            .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &graph, |b, graph| {
            b.iter(|| find_cycle(black_box(graph)))
        });
    }
    group.finish();
}

fn eulerian_classify(c: &mut Criterion) {
    let graph = RandomGraphGenerator::from_seed(1)
        .generate_with_saturation(64, Saturation::from_percent(70).unwrap())
        .unwrap();
    c.bench_function("eulerian_classify_64", |b| b.iter(|| classify(black_box(&graph))));
}

criterion_group!(benches, hamiltonian_search, eulerian_classify);
criterion_main!(benches);
