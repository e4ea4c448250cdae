//! Reference engines implementing the [`DecayEngine`] trait.
//!
//! [`HalfLifeEngine`] depletes each nuclide with a known half-life as
//! `N * 2^(-t / T_half)`. It does not produce daughters: nuclides without a
//! half-life are left out of its output and carry forward unchanged when the
//! abundance table overlays the result.

use isodecay_core::error::DecayError;
use isodecay_core::material::Material;
use isodecay_core::nuclide::identity_of;
use isodecay_core::traits::DecayEngine;
use tracing::debug;

use crate::halflife::HalfLifeTable;

/// Exponential depletion from a half-life table.
#[derive(Debug, Clone, Default)]
pub struct HalfLifeEngine {
    half_lives: HalfLifeTable,
    allow_backward: bool,
}

impl HalfLifeEngine {
    /// Create an engine over `half_lives`. Negative elapsed times are rejected.
    pub fn new(half_lives: HalfLifeTable) -> Self {
        Self {
            half_lives,
            allow_backward: false,
        }
    }

    /// Accept negative elapsed times and grow amounts back as `2^(|t| / T_half)`.
    pub fn allow_backward(mut self, allow: bool) -> Self {
        self.allow_backward = allow;
        self
    }

    pub fn half_lives(&self) -> &HalfLifeTable {
        &self.half_lives
    }
}

/// Fraction of a nuclide left after `elapsed_seconds`.
fn surviving_fraction(elapsed_seconds: f64, half_life_seconds: f64) -> f64 {
    (-elapsed_seconds / half_life_seconds).exp2()
}

impl DecayEngine for HalfLifeEngine {
    fn decay(&self, material: &Material, elapsed_seconds: f64) -> Result<Material, DecayError> {
        if !elapsed_seconds.is_finite() {
            return Err(DecayError::Rejected(format!(
                "non-finite elapsed time {elapsed_seconds}"
            )));
        }
        if elapsed_seconds < 0.0 && !self.allow_backward {
            return Err(DecayError::Rejected(format!(
                "cannot decay backwards by {elapsed_seconds} s"
            )));
        }

        let mut out = Material::new();
        for (symbol, &amount) in material {
            let nuclide = identity_of(symbol).map_err(|e| DecayError::Rejected(e.to_string()))?;
            if let Some(half_life) = self.half_lives.seconds(&nuclide) {
                out.insert(symbol.clone(), amount * surviving_fraction(elapsed_seconds, half_life));
            }
        }

        debug!(
            input = material.len(),
            decayed = out.len(),
            elapsed_seconds,
            "half-life engine step"
        );
        Ok(out)
    }

    fn name(&self) -> &str {
        "half-life"
    }
}

/// Treats every nuclide as stable: reports nothing, so the whole material
/// carries forward.
#[derive(Debug, Clone, Copy, Default)]
pub struct StableEngine;

impl StableEngine {
    pub fn new() -> Self {
        Self
    }
}

impl DecayEngine for StableEngine {
    fn decay(&self, _material: &Material, _elapsed_seconds: f64) -> Result<Material, DecayError> {
        Ok(Material::new())
    }

    fn name(&self) -> &str {
        "stable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isodecay_core::constants::SECONDS_PER_DAY;
    use proptest::prelude::*;

    fn engine() -> HalfLifeEngine {
        HalfLifeEngine::new(HalfLifeTable::common())
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1.0)
    }

    // --- HalfLifeEngine ---

    #[test]
    fn one_half_life_halves() {
        let m = Material::from_iter([("Ni56", 1.0)]);
        let out = engine().decay(&m, 6.075 * SECONDS_PER_DAY).unwrap();
        assert!(close(out.get("Ni56").unwrap(), 0.5));
    }

    #[test]
    fn two_half_lives_quarter() {
        let m = Material::from_iter([("Co56", 0.8)]);
        let out = engine().decay(&m, 2.0 * 77.236 * SECONDS_PER_DAY).unwrap();
        assert!(close(out.get("Co56").unwrap(), 0.2));
    }

    #[test]
    fn zero_elapsed_is_identity_for_known_nuclides() {
        let m = Material::from_iter([("Ni56", 0.7), ("Co57", 0.3)]);
        let out = engine().decay(&m, 0.0).unwrap();
        assert_eq!(out, m);
    }

    #[test]
    fn unknown_half_life_is_omitted() {
        let m = Material::from_iter([("Fe56", 1.0), ("Ni56", 1.0)]);
        let out = engine().decay(&m, SECONDS_PER_DAY).unwrap();
        assert!(!out.contains("Fe56"));
        assert!(out.contains("Ni56"));
    }

    #[test]
    fn keeps_caller_spelling() {
        let m = Material::from_iter([("ni-56", 1.0)]);
        let out = engine().decay(&m, 1.0).unwrap();
        assert!(out.contains("ni-56"));
    }

    #[test]
    fn rejects_negative_by_default() {
        let m = Material::from_iter([("Ni56", 1.0)]);
        assert!(matches!(
            engine().decay(&m, -1.0),
            Err(DecayError::Rejected(_))
        ));
    }

    #[test]
    fn backward_grows_when_allowed() {
        let m = Material::from_iter([("Ni56", 0.5)]);
        let out = engine()
            .allow_backward(true)
            .decay(&m, -6.075 * SECONDS_PER_DAY)
            .unwrap();
        assert!(close(out.get("Ni56").unwrap(), 1.0));
    }

    #[test]
    fn rejects_non_finite() {
        let m = Material::from_iter([("Ni56", 1.0)]);
        assert!(engine().decay(&m, f64::NAN).is_err());
    }

    #[test]
    fn rejects_bad_symbol() {
        let m = Material::from_iter([("Zz9", 1.0)]);
        assert!(matches!(engine().decay(&m, 1.0), Err(DecayError::Rejected(_))));
    }

    // --- StableEngine ---

    #[test]
    fn stable_reports_nothing() {
        let m = Material::from_iter([("Ni56", 1.0)]);
        assert!(StableEngine::new().decay(&m, 1e9).unwrap().is_empty());
    }

    // --- dyn compatibility ---

    #[test]
    fn engines_are_object_safe() {
        let engines: Vec<Box<dyn DecayEngine>> = vec![Box::new(engine()), Box::new(StableEngine)];
        let names: Vec<&str> = engines.iter().map(|e| e.name()).collect();
        assert_eq!(names, ["half-life", "stable"]);
    }

    // --- proptest ---

    proptest! {
        #[test]
        fn never_increases_forward(amount in 0.0f64..10.0, days in 0.0f64..1e4) {
            let m = Material::from_iter([("Co60", amount)]);
            let out = engine().decay(&m, days * SECONDS_PER_DAY).unwrap();
            prop_assert!(out.get("Co60").unwrap() <= amount);
        }

        #[test]
        fn composes_over_steps(amount in 0.01f64..10.0, d1 in 0.0f64..100.0, d2 in 0.0f64..100.0) {
            let e = engine();
            let m = Material::from_iter([("Ni56", amount)]);
            let once = e.decay(&m, (d1 + d2) * SECONDS_PER_DAY).unwrap();
            let step = e.decay(&m, d1 * SECONDS_PER_DAY).unwrap();
            let twice = e.decay(&step, d2 * SECONDS_PER_DAY).unwrap();
            let a = once.get("Ni56").unwrap();
            let b = twice.get("Ni56").unwrap();
            prop_assert!((a - b).abs() <= 1e-9 * amount, "{} vs {}", a, b);
        }
    }
}
