use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use xform_algebra::{AxisConvention, EulerAngles};
use xform_geometry::{
    compose_matrix, decompose_matrix, euler_from_matrix, euler_matrix, quaternion_from_matrix,
    quaternion_slerp, random_quaternion, random_rotation_matrix, superimposition_matrix,
    QuaternionExtraction, SuperimposeParams,
};

fn bench_quaternion_from_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("quaternion_from_matrix");
    let m = random_rotation_matrix(&mut StdRng::seed_from_u64(0));

    for method in [QuaternionExtraction::Precise, QuaternionExtraction::Fast] {
        group.bench_function(BenchmarkId::new("method", format!("{method:?}")), |b| {
            b.iter(|| black_box(quaternion_from_matrix(black_box(&m), method)))
        });
    }
}

fn bench_euler(c: &mut Criterion) {
    let mut group = c.benchmark_group("euler");
    let angles = EulerAngles::new(0.3, -1.1, 2.0, AxisConvention::Rzxz);
    let m = euler_matrix(&angles);

    group.bench_function("euler_matrix", |b| {
        b.iter(|| black_box(euler_matrix(black_box(&angles))))
    });
    group.bench_function("euler_from_matrix", |b| {
        b.iter(|| black_box(euler_from_matrix(black_box(&m), AxisConvention::Rzxz)))
    });
}

fn bench_decompose(c: &mut Criterion) {
    let m = random_rotation_matrix(&mut StdRng::seed_from_u64(1))
        * glam::DMat4::from_scale(DVec3::new(1.0, 2.0, 3.0));

    c.bench_function("decompose_compose", |b| {
        b.iter(|| {
            let parts = decompose_matrix(black_box(&m));
            black_box(parts.map(|p| compose_matrix(&p)))
        })
    });
}

fn bench_slerp(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let q0 = random_quaternion(&mut rng);
    let q1 = random_quaternion(&mut rng);

    c.bench_function("quaternion_slerp", |b| {
        b.iter(|| black_box(quaternion_slerp(q0, q1, black_box(0.3), 0, true)))
    });
}

fn bench_superimposition(c: &mut Criterion) {
    let mut group = c.benchmark_group("superimposition_matrix");
    let mut rng = StdRng::seed_from_u64(3);
    let m = random_rotation_matrix(&mut rng);

    for n in [10, 100, 1000] {
        let from: Vec<DVec3> = (0..n)
            .map(|_| {
                DVec3::new(
                    rng.random_range(-1.0..1.0),
                    rng.random_range(-1.0..1.0),
                    rng.random_range(-1.0..1.0),
                )
            })
            .collect();
        let to: Vec<DVec3> = from.iter().map(|p| m.transform_point3(*p)).collect();
        let params = SuperimposeParams::default();

        group.bench_with_input(BenchmarkId::new("points", n), &n, |b, _| {
            b.iter(|| black_box(superimposition_matrix(&from, &to, &params)))
        });
    }
}

criterion_group!(
    benches,
    bench_quaternion_from_matrix,
    bench_euler,
    bench_decompose,
    bench_slerp,
    bench_superimposition
);
criterion_main!(benches);
