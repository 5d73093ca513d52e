//! Benchmarks for mesh-subdivide operations.
//!
//! Run with: cargo bench -p mesh-subdivide
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-subdivide -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-subdivide -- --baseline main

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_subdivide::{SubdivideParams, Topology, subdivide_soup, weld};
use mesh_types::{Point3, TriangleSoup};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Create an icosahedron soup, optionally pre-refined with midpoint passes.
fn create_sphere(refinements: u32) -> TriangleSoup {
    let phi = f64::midpoint(1.0, 5.0_f64.sqrt());
    let a = 1.0;
    let b = 1.0 / phi;

    let ico_verts: [[f64; 3]; 12] = [
        [0.0, b, -a],
        [b, a, 0.0],
        [-b, a, 0.0],
        [0.0, b, a],
        [0.0, -b, a],
        [-a, 0.0, b],
        [0.0, -b, -a],
        [a, 0.0, -b],
        [a, 0.0, b],
        [-a, 0.0, -b],
        [b, -a, 0.0],
        [-b, -a, 0.0],
    ];

    let ico_faces: [[usize; 3]; 20] = [
        [0, 1, 2],
        [3, 2, 1],
        [3, 4, 5],
        [3, 8, 4],
        [0, 6, 7],
        [0, 9, 6],
        [4, 10, 11],
        [6, 11, 10],
        [2, 5, 9],
        [11, 9, 5],
        [1, 7, 8],
        [10, 8, 7],
        [3, 5, 2],
        [3, 1, 8],
        [0, 2, 9],
        [0, 7, 1],
        [6, 9, 11],
        [6, 10, 7],
        [4, 11, 5],
        [4, 8, 10],
    ];

    let points: Vec<Point3<f64>> = ico_verts
        .iter()
        .map(|v| Point3::from(*v) / Point3::from(*v).coords.norm())
        .collect();

    let mut soup = TriangleSoup::with_capacity(ico_faces.len(), false);
    for f in &ico_faces {
        soup.push_triangle([points[f[0]], points[f[1]], points[f[2]]], None);
    }

    if refinements == 0 {
        return soup;
    }
    let params = SubdivideParams::midpoint().with_iterations(refinements);
    subdivide_soup(&soup, &params).map_or(soup, |r| r.mesh)
}

// =============================================================================
// Subdivision Benchmarks
// =============================================================================

fn bench_subdivision(c: &mut Criterion) {
    let mut group = c.benchmark_group("Subdivision");

    let test_cases = [
        ("sphere_20tri", create_sphere(0)),
        ("sphere_320tri", create_sphere(2)),
        ("sphere_1280tri", create_sphere(3)),
    ];

    for (name, soup) in &test_cases {
        group.throughput(Throughput::Elements(soup.triangle_count() as u64));

        group.bench_with_input(BenchmarkId::new("loop_1x", name), soup, |b, soup| {
            let params = SubdivideParams::loop_subdivision();
            b.iter(|| subdivide_soup(black_box(soup), black_box(&params)));
        });

        group.bench_with_input(BenchmarkId::new("midpoint_1x", name), soup, |b, soup| {
            let params = SubdivideParams::midpoint();
            b.iter(|| subdivide_soup(black_box(soup), black_box(&params)));
        });

        // Two passes over the output of the first
        group.bench_with_input(BenchmarkId::new("loop_2x", name), soup, |b, soup| {
            let params = SubdivideParams::loop_subdivision().with_iterations(2);
            b.iter(|| subdivide_soup(black_box(soup), black_box(&params)));
        });
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stages");
    let soup = create_sphere(3);

    group.throughput(Throughput::Elements(soup.corner_count() as u64));
    group.bench_function("weld", |b| {
        b.iter(|| weld(black_box(&soup), black_box(1e-4)));
    });

    if let Ok(welded) = weld(&soup, 1e-4) {
        group.bench_function("build_topology", |b| {
            b.iter(|| Topology::build(welded.vertex_count(), black_box(&welded.triangles)));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_subdivision, bench_stages);
criterion_main!(benches);
