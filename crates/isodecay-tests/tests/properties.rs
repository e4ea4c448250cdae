//! Property tests over random tables: union completeness, round trips,
//! time progression, element sums and normalization.

use std::collections::BTreeSet;

use isodecay_core::abundance::{AbundanceTable, SampleId};
use isodecay_core::element::ElementTable;
use isodecay_core::material::Material;
use isodecay_core::nuclide::{identity_of, symbol_of};
use isodecay_core::units::TimeQuantity;
use isodecay_engine::{HalfLifeEngine, HalfLifeTable};
use isodecay_tests::helpers::*;
use proptest::prelude::*;

/// Up to 5 samples of up to 8 nuclides, drawn from Z in 1..=30.
fn materials() -> impl Strategy<Value = Vec<Material>> {
    let entry = (1u8..=30, 0u16..=30, 0.0f64..1.0).prop_map(|(z, extra, v)| {
        (symbol_of(z, z as u16 + extra).unwrap(), v)
    });
    prop::collection::vec(prop::collection::vec(entry, 0..8), 0..5).prop_map(|samples| {
        samples
            .into_iter()
            .map(|entries| entries.into_iter().collect::<Material>())
            .collect()
    })
}

proptest! {
    #[test]
    fn rows_are_the_union_of_sample_keys(mats in materials()) {
        let t = AbundanceTable::from_materials(&mats).unwrap();
        let expected: BTreeSet<_> = mats
            .iter()
            .flat_map(|m| m.symbols().map(|s| identity_of(s).unwrap()))
            .collect();
        let rows: BTreeSet<_> = t.nuclides().iter().copied().collect();
        prop_assert_eq!(rows, expected);
        prop_assert_eq!(t.n_samples(), mats.len());
    }

    #[test]
    fn present_values_survive_round_trip(mats in materials()) {
        let back = AbundanceTable::from_materials(&mats).unwrap().to_materials();
        prop_assert_eq!(back.len(), mats.len());
        for (before, after) in mats.iter().zip(&back) {
            for (symbol, &value) in before {
                prop_assert_eq!(after.get(symbol), Some(value));
            }
            for (symbol, &value) in after {
                if !before.contains(symbol) {
                    prop_assert_eq!(value, 0.0);
                }
            }
        }
    }

    #[test]
    fn decay_moves_time_0_to_target(mats in materials(), days in 0.0f64..1e3) {
        let t = AbundanceTable::from_materials(&mats).unwrap();
        let target = TimeQuantity::days(days).unwrap();
        let d = t.decay(&Silent, target).unwrap();
        prop_assert_eq!(d.time_0(), target);
    }

    #[test]
    fn decay_at_time_0_is_identity_for_carried_nuclides(mats in materials()) {
        let t = AbundanceTable::from_materials(&mats).unwrap();
        let engine = HalfLifeEngine::new(HalfLifeTable::common());
        let d = t.decay(&engine, t.time_0()).unwrap();
        for nuclide in t.nuclides() {
            for sample in t.samples() {
                prop_assert_eq!(d.get(nuclide, sample), t.get(nuclide, sample));
            }
        }
    }

    #[test]
    fn as_atoms_preserves_sample_totals(mats in materials()) {
        let t = AbundanceTable::from_materials(&mats).unwrap();
        let atoms = t.as_atoms();
        for (a, b) in t.column_sums().iter().zip(atoms.column_sums()) {
            prop_assert!((a - b).abs() <= 1e-12 * a.max(1.0));
        }
        let mut elements = atoms.elements().to_vec();
        elements.dedup();
        prop_assert_eq!(elements.len(), atoms.len());
    }

    #[test]
    fn normalized_merge_sums_to_one(mats in materials(), extra in 0.01f64..5.0) {
        let t = AbundanceTable::from_materials(&mats).unwrap();
        let other = ElementTable::from_cells(
            (0..mats.len()).map(|i| (1u8, SampleId::Index(i), extra)),
        )
        .unwrap();
        let merged = t.merge(&other, true).unwrap();
        for sum in merged.column_sums() {
            prop_assert!((sum - 1.0).abs() < 1e-12, "sum = {}", sum);
        }
    }
}
