//! # Marshal Benchmark
//!
//! Cost of crossing the boundary: trivial copies, runtime-owned copies and
//! array traffic through the host heap.
//!
//! Run with: `cargo bench --package meridian_variant`

#![allow(missing_docs)]

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meridian_math::{Real, Transform3D, Vector3};
use meridian_variant::{HostHeap, Variant, VariantArray, VariantType};

fn bench_copies(c: &mut Criterion) {
    let heap = Arc::new(HostHeap::new());
    let rt = heap.runtime();

    let trivial = Variant::from(Transform3D::IDENTITY);
    c.bench_function("variant_clone_trivial", |b| {
        b.iter(|| black_box(black_box(&trivial).clone()));
    });

    let owned = String::from("benchmark").to_variant(&rt).unwrap();
    c.bench_function("variant_clone_string", |b| {
        b.iter(|| black_box(black_box(&owned).clone()));
    });
}

fn bench_array_traffic(c: &mut Criterion) {
    let heap = Arc::new(HostHeap::new());
    let rt = heap.runtime();

    c.bench_function("array_push_read_1000", |b| {
        b.iter(|| {
            let array = VariantArray::new(&rt).unwrap();
            for i in 0..1000_i64 {
                array.push(Variant::Int(i)).unwrap();
            }
            let mut sum = 0;
            for item in array.iter() {
                if let Ok(Variant::Int(v)) = item {
                    sum += v;
                }
            }
            black_box(sum)
        });
    });

    let points: Vec<Vector3> = (0..1000_u16).map(|i| Vector3::new(Real::from(i), 0.0, 1.0)).collect();
    c.bench_function("packed_vector3_round_trip_1000", |b| {
        b.iter(|| {
            let variant = black_box(&points).to_variant(&rt).unwrap();
            black_box(Vec::<Vector3>::from_variant(&variant).unwrap())
        });
    });
}

criterion_group!(benches, bench_copies, bench_array_traffic);
criterion_main!(benches);
