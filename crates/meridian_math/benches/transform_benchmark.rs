//! # Transform Benchmark
//!
//! Hot paths a script hits every frame: point transforms, composition,
//! inversion and interpolation.
//!
//! Run with: `cargo bench --package meridian_math`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use meridian_math::{Basis, Quaternion, Real, Transform2D, Transform3D, Vector2, Vector3};

const POINT_COUNTS: [usize; 3] = [1_000, 10_000, 100_000];

fn sample_transform() -> Transform3D {
    Transform3D::new(
        Basis::from_axis_angle(Vector3::new(0.0, 0.6, 0.8), 0.9).scaled_local(Vector3::new(2.0, 1.0, 0.5)),
        Vector3::new(1.0, -2.0, 3.0),
    )
}

fn bench_xform_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform3d_xform");
    let t = sample_transform();

    for count in POINT_COUNTS {
        #[allow(clippy::cast_precision_loss)]
        let points: Vec<Vector3> = (0..count)
            .map(|i| Vector3::new(i as Real, (i % 7) as Real, -(i as Real) * 0.5))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &points, |b, points| {
            b.iter(|| {
                let mut acc = Vector3::ZERO;
                for &p in points {
                    acc += t * p;
                }
                black_box(acc)
            });
        });
    }

    group.finish();
}

fn bench_compose_and_invert(c: &mut Criterion) {
    let t = sample_transform();
    c.bench_function("transform3d_compose", |b| {
        b.iter(|| black_box(black_box(t) * black_box(t)));
    });
    c.bench_function("transform3d_affine_inverse", |b| {
        b.iter(|| black_box(black_box(t).affine_inverse()));
    });

    let t2 = Transform2D::from_components(0.3, Vector2::new(2.0, 3.0), 0.1, Vector2::ONE);
    c.bench_function("transform2d_affine_inverse", |b| {
        b.iter(|| black_box(black_box(t2).affine_inverse()));
    });
}

fn bench_interpolation(c: &mut Criterion) {
    let a = sample_transform();
    let b_t = Transform3D::IDENTITY.translated(Vector3::new(10.0, 0.0, 0.0));
    c.bench_function("transform3d_interpolate_with", |b| {
        b.iter(|| black_box(a.interpolate_with(black_box(&b_t), 0.37)));
    });

    let qa = Quaternion::from_axis_angle(Vector3::UP, 0.2);
    let qb = Quaternion::from_axis_angle(Vector3::RIGHT, 1.4);
    c.bench_function("quaternion_slerp", |b| {
        b.iter(|| black_box(black_box(qa).slerp(black_box(qb), 0.5)));
    });
}

criterion_group!(benches, bench_xform_points, bench_compose_and_invert, bench_interpolation);
criterion_main!(benches);
