//! Shared fixtures and mock engines for integration tests.

use isodecay_core::error::DecayError;
use isodecay_core::material::Material;
use isodecay_core::nuclide::Nuclide;
use isodecay_core::traits::DecayEngine;

/// Nuclide from `(Z, A)`; panics on invalid input.
pub fn nuc(z: u8, a: u16) -> Nuclide {
    Nuclide::new(z, a).unwrap()
}

/// Material from `(symbol, amount)` pairs.
pub fn material(entries: &[(&str, f64)]) -> Material {
    entries.iter().map(|&(k, v)| (k, v)).collect()
}

/// Two samples: pure Ni56, and an even Fe56/Ni56 mix.
pub fn nickel_iron() -> Vec<Material> {
    vec![
        material(&[("Ni56", 1.0)]),
        material(&[("Fe56", 0.5), ("Ni56", 0.5)]),
    ]
}

/// Turns all Ni56 into Fe56 regardless of elapsed time.
pub struct NickelToIron;

impl DecayEngine for NickelToIron {
    fn decay(&self, material: &Material, _elapsed: f64) -> Result<Material, DecayError> {
        let ni = material.get("Ni56").unwrap_or(0.0);
        let fe = material.get("Fe56").unwrap_or(0.0);
        Ok(Material::from_iter([("Ni56", 0.0), ("Fe56", fe + ni)]))
    }
}

/// Reports nothing, so every sample carries forward.
pub struct Silent;

impl DecayEngine for Silent {
    fn decay(&self, _material: &Material, _elapsed: f64) -> Result<Material, DecayError> {
        Ok(Material::new())
    }
}

/// Records the elapsed time it was called with as the amount of `H1`.
pub struct ElapsedEcho;

impl DecayEngine for ElapsedEcho {
    fn decay(&self, _material: &Material, elapsed: f64) -> Result<Material, DecayError> {
        Ok(Material::from_iter([("H1", elapsed.abs())]))
    }
}

/// Always fails.
pub struct Failing;

impl DecayEngine for Failing {
    fn decay(&self, _material: &Material, _elapsed: f64) -> Result<Material, DecayError> {
        Err(DecayError::Rejected("engine offline".into()))
    }
}
