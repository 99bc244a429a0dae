//! Benchmarks for the accumulation kernel.
//!
//! Run with: `cargo bench --bench accumulate_bench`
//!
//! Measures the per-snapshot cost of the deviation-energy computation and
//! the accumulator update across field sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tkepost::{Dimensions, ScalarField, TimeInstant, Vec3, VectorField};

/// Generate a velocity field with smoothly varying cell values.
fn generate_velocity(name: &str, n_cells: usize) -> VectorField {
    let values: Vec<Vec3> = (0..n_cells)
        .map(|i| {
            let phase = i as f64 * 0.01;
            Vec3::new(1.0 + phase.sin(), 0.3 * phase.cos(), 0.1 * (phase * 0.5).sin())
        })
        .collect();
    VectorField::new(name, TimeInstant::new(0.0), Dimensions::VELOCITY, values)
}

fn bench_deviation_energy(c: &mut Criterion) {
    let mut group = c.benchmark_group("deviation_energy");

    for n_cells in [1_000, 10_000, 100_000] {
        let u = generate_velocity("U", n_cells);
        let mean = generate_velocity("UMean", n_cells);

        group.bench_with_input(BenchmarkId::from_parameter(n_cells), &n_cells, |b, _| {
            b.iter(|| black_box(&u).deviation_energy(black_box(&mean)).unwrap())
        });
    }

    group.finish();
}

fn bench_accumulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("accumulate");

    for n_cells in [1_000, 10_000, 100_000] {
        let u = generate_velocity("U", n_cells);
        let mean = generate_velocity("UMean", n_cells);
        let contribution = u.deviation_energy(&mean).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(n_cells), &n_cells, |b, _| {
            let mut acc = ScalarField::zeros(
                "kMean",
                TimeInstant::new(0.0),
                Dimensions::SPECIFIC_ENERGY,
                n_cells,
            );
            b.iter(|| acc.add_assign_field(black_box(&contribution)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_deviation_energy, bench_accumulate);
criterion_main!(benches);
