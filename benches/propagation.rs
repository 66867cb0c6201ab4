//! Benchmarks for the transfer matrix of a jet
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use jetalp::{JetAlp, DensityMatrix, energy_scan, log_energies};

/// Full chain for the default blazar jet at different domain resolutions
fn bench_transfer_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer_matrix");

    for sens in [0.9, 0.99, 0.999] {
        let jet = JetAlp::standard().with_update(Some(("sens", sens))).unwrap();
        let domains = jet.grid().unwrap().len();
        group.bench_with_input(BenchmarkId::new("domains", domains), &jet, |b, jet| {
            b.iter(|| black_box(jet).transfer_matrix().unwrap())
        });
    }

    group.finish();
}

/// Single-step estimate, for comparison
fn bench_analytical(c: &mut Criterion) {
    let jet = JetAlp::standard();
    c.bench_function("analytical", |b| {
        b.iter(|| black_box(&jet).analytical_transfer_matrix().unwrap())
    });
}

/// Survival probability over a spectrum of energies
fn bench_energy_scan(c: &mut Criterion) {
    let jet = JetAlp::standard();
    let energies = log_energies(1.0, 1.0e4, 32);
    let rho = DensityMatrix::unpolarized();
    c.bench_function("energy_scan_32", |b| {
        b.iter(|| energy_scan(black_box(&jet), black_box(&energies), &rho).unwrap())
    });
}

criterion_group!(benches, bench_transfer_matrix, bench_analytical, bench_energy_scan);
criterion_main!(benches);
