//! Benchmarks for mesh-gravity operations.
//!
//! Run with: cargo bench -p mesh-gravity
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-gravity -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-gravity -- --baseline main

#![allow(clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_gravity::{EvaluationSites, PolyhedronGravity, Topology, evaluate_sites};
use mesh_types::{Point3, icosphere};

// =============================================================================
// Topology Benchmarks
// =============================================================================

fn bench_topology(c: &mut Criterion) {
    let mut group = c.benchmark_group("Topology");

    for subdivisions in [2, 3, 4] {
        let mesh = icosphere(1.0, subdivisions);
        let name = format!("sphere_{}tri", mesh.faces.len());

        group.throughput(Throughput::Elements(mesh.faces.len() as u64));
        group.bench_with_input(BenchmarkId::new("build", &name), &mesh, |b, mesh| {
            b.iter(|| Topology::build(black_box(mesh)));
        });
    }

    group.finish();
}

// =============================================================================
// Field Evaluation Benchmarks
// =============================================================================

fn bench_single_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("Evaluate");

    for subdivisions in [2, 3, 4] {
        let gravity = PolyhedronGravity::new(icosphere(1.0, subdivisions)).unwrap();
        let name = format!("sphere_{}tri", gravity.mesh().faces.len());
        let point = Point3::new(0.3, -0.2, 1.8);
        let mut cache = gravity.new_cache();

        group.bench_with_input(
            BenchmarkId::new("potential_only", &name),
            &point,
            |b, point| {
                b.iter(|| gravity.evaluate_with_cache(black_box(point), false, &mut cache));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("with_acceleration", &name),
            &point,
            |b, point| {
                b.iter(|| gravity.evaluate_with_cache(black_box(point), true, &mut cache));
            },
        );

        group.bench_with_input(BenchmarkId::new("is_inside", &name), &point, |b, point| {
            b.iter(|| gravity.is_inside(black_box(point)));
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Batch");
    group.sample_size(20); // Every site walks the whole mesh

    for subdivisions in [2, 3] {
        let gravity = PolyhedronGravity::new(icosphere(1.0, subdivisions)).unwrap();
        let faces = gravity.mesh().faces.len();
        let name = format!("sphere_{faces}tri");

        group.throughput(Throughput::Elements(faces as u64));
        group.bench_with_input(
            BenchmarkId::new("face_centers", &name),
            &gravity,
            |b, gravity| {
                b.iter(|| evaluate_sites(black_box(gravity), &EvaluationSites::FaceCenters));
            },
        );
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_topology, bench_single_point, bench_batch);
criterion_main!(benches);
