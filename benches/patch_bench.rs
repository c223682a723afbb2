//! Patch extraction benchmarks: brute force against the R*-tree search.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use surfpatch::options::NearestSearch;
use surfpatch::util::ranges::compress;
use surfpatch::{Mesh, PatchExtractor, StructureAtom};

fn random_points(rng: &mut StdRng, n: usize, extent: f32) -> Vec<Vec3> {
    (0..n)
        .map(|_| {
            Vec3::new(
                rng.random_range(-extent..extent),
                rng.random_range(-extent..extent),
                rng.random_range(-extent..extent),
            )
        })
        .collect()
}

fn point_mesh(rng: &mut StdRng, vertex_count: usize) -> Mesh {
    let vertices = random_points(rng, vertex_count, 30.0);
    Mesh::new(vertices, Vec::new(), Vec::new()).unwrap()
}

fn extraction_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let atoms: Vec<StructureAtom> = random_points(&mut rng, 2_000, 35.0)
        .into_iter()
        .enumerate()
        .map(|(i, p)| StructureAtom::new(i as u32, p, "ALA", i as i32, "A"))
        .collect();

    let mut group = c.benchmark_group("extract_patch");
    for vertex_count in [1_000, 10_000, 50_000] {
        let mesh = point_mesh(&mut rng, vertex_count);
        for search in [NearestSearch::BruteForce, NearestSearch::RTree] {
            let extractor = PatchExtractor::new(4.0).with_search(search);
            group.bench_function(
                format!("{search:?}_{vertex_count}_vertices"),
                |b| b.iter(|| black_box(extractor.extract(&atoms, &mesh))),
            );
        }
    }
    group.finish();
}

fn compress_benchmark(c: &mut Criterion) {
    let ints: Vec<i32> = (0..5_000).filter(|i| i % 7 != 0).collect();
    c.bench_function("compress_5000", |b| {
        b.iter(|| black_box(compress(black_box(ints.iter().copied()), "A")))
    });
}

criterion_group!(benches, extraction_benchmark, compress_benchmark);
criterion_main!(benches);
