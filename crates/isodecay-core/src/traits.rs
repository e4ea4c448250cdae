//! Trait interfaces for isodecay.
//!
//! - [`DecayEngine`]: advances one material by an elapsed duration
//!   (isodecay-engine implements; callers may bring their own)

use crate::error::DecayError;
use crate::material::Material;

/// Pure per-sample decay: `Material x elapsed seconds -> Material`.
///
/// The engine owns all decay physics: half-lives, branching, daughter
/// production. The returned material may be partial; abundance tables
/// overlay it onto the input, so nuclides the engine leaves out keep their
/// pre-decay amount.
///
/// Implementations must be deterministic for a given input and must not
/// rely on state shared between calls.
pub trait DecayEngine: Send + Sync {
    /// Decay `material` by `elapsed_seconds`.
    ///
    /// Negative durations only reach the engine when the caller opted into
    /// pass-through; engines that cannot run backwards should return
    /// [`DecayError::Rejected`].
    fn decay(&self, material: &Material, elapsed_seconds: f64) -> Result<Material, DecayError>;

    /// Short name for logs.
    ///
    /// Default implementation: the Rust type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<E: DecayEngine + ?Sized> DecayEngine for &E {
    fn decay(&self, material: &Material, elapsed_seconds: f64) -> Result<Material, DecayError> {
        (**self).decay(material, elapsed_seconds)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<E: DecayEngine + ?Sized> DecayEngine for Box<E> {
    fn decay(&self, material: &Material, elapsed_seconds: f64) -> Result<Material, DecayError> {
        (**self).decay(material, elapsed_seconds)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------
    // Mock: DecayEngine
    // ------------------------------------------------------------------

    /// Halves every nuclide regardless of elapsed time.
    struct HalvingEngine;

    impl DecayEngine for HalvingEngine {
        fn decay(&self, material: &Material, _elapsed: f64) -> Result<Material, DecayError> {
            Ok(material.iter().map(|(k, v)| (k.clone(), v / 2.0)).collect())
        }

        fn name(&self) -> &str {
            "halving"
        }
    }

    struct RefusingEngine;

    impl DecayEngine for RefusingEngine {
        fn decay(&self, _material: &Material, elapsed: f64) -> Result<Material, DecayError> {
            Err(DecayError::Rejected(format!("refused {elapsed} s")))
        }
    }

    #[test]
    fn engine_is_object_safe() {
        let e = HalvingEngine;
        let dyn_e: &dyn DecayEngine = &e;
        let out = dyn_e
            .decay(&Material::from_iter([("Ni56", 1.0)]), 1.0)
            .unwrap();
        assert_eq!(out.get("Ni56"), Some(0.5));
    }

    #[test]
    fn boxed_and_borrowed_engines_delegate() {
        let boxed: Box<dyn DecayEngine> = Box::new(HalvingEngine);
        assert_eq!(boxed.name(), "halving");
        let borrowed = &HalvingEngine;
        assert_eq!(DecayEngine::name(&borrowed), "halving");
    }

    #[test]
    fn default_name_is_type_name() {
        assert!(RefusingEngine.name().ends_with("RefusingEngine"));
    }

    #[test]
    fn engine_errors_propagate() {
        let err = RefusingEngine.decay(&Material::new(), -5.0).unwrap_err();
        assert_eq!(err, DecayError::Rejected("refused -5 s".into()));
    }
}
