//! Criterion benchmarks for isodecay-core table operations.
//!
//! Covers: construction from materials, conversion back, decay with a
//! trivial engine, element aggregation, and normalized merge.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use isodecay_core::abundance::{AbundanceTable, SampleId};
use isodecay_core::element::ElementTable;
use isodecay_core::error::DecayError;
use isodecay_core::material::Material;
use isodecay_core::nuclide::symbol_of;
use isodecay_core::traits::DecayEngine;

/// Scales every amount by a constant; stands in for a real engine.
struct ScaleEngine;

impl DecayEngine for ScaleEngine {
    fn decay(&self, material: &Material, _elapsed: f64) -> Result<Material, DecayError> {
        Ok(material.iter().map(|(k, v)| (k.clone(), v * 0.9)).collect())
    }
}

/// `samples` materials with `nuclides` random entries each, seeded.
fn random_materials(samples: usize, nuclides: usize) -> Vec<Material> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..samples)
        .map(|_| {
            (0..nuclides)
                .filter_map(|_| {
                    let z: u8 = rng.gen_range(1..=92);
                    let a = z as u16 + rng.gen_range(0..=60);
                    let symbol = symbol_of(z, a).ok()?;
                    Some((symbol, rng.gen_range(0.0..1.0)))
                })
                .collect()
        })
        .collect()
}

fn bench_from_materials(c: &mut Criterion) {
    let materials = random_materials(16, 200);

    c.bench_function("from_materials_16x200", |b| {
        b.iter(|| AbundanceTable::from_materials(black_box(&materials)))
    });
}

fn bench_to_materials(c: &mut Criterion) {
    let table = AbundanceTable::from_materials(&random_materials(16, 200)).unwrap();

    c.bench_function("to_materials_16x200", |b| {
        b.iter(|| black_box(&table).to_materials())
    });
}

fn bench_decay(c: &mut Criterion) {
    let table = AbundanceTable::from_materials(&random_materials(16, 200)).unwrap();

    c.bench_function("decay_16x200", |b| {
        b.iter(|| black_box(&table).decay(&ScaleEngine, black_box(30.0)))
    });
}

fn bench_as_atoms(c: &mut Criterion) {
    let table = AbundanceTable::from_materials(&random_materials(16, 200)).unwrap();

    c.bench_function("as_atoms_16x200", |b| b.iter(|| black_box(&table).as_atoms()));
}

fn bench_merge(c: &mut Criterion) {
    let table = AbundanceTable::from_materials(&random_materials(16, 200)).unwrap();
    let other = ElementTable::from_cells((1..=92u8).map(|z| (z, SampleId::Index(0), 0.01))).unwrap();

    c.bench_function("merge_normalized_16x200", |b| {
        b.iter(|| black_box(&table).merge(black_box(&other), true))
    });
}

criterion_group!(
    benches,
    bench_from_materials,
    bench_to_materials,
    bench_decay,
    bench_as_atoms,
    bench_merge,
);
criterion_main!(benches);
