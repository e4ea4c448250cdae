//! # isodecay-engine: Reference decay engines.
//!
//! Implementations of [`isodecay_core::traits::DecayEngine`]:
//! - **[`HalfLifeEngine`]**: exponential depletion `N * 2^(-t / T_half)` from a
//!   caller-supplied [`HalfLifeTable`]. No daughter production; nuclides
//!   without a half-life are left to carry forward.
//! - **[`StableEngine`]**: reports nothing, so every sample carries forward
//!   unchanged.

pub mod engine;
pub mod halflife;

pub use engine::{HalfLifeEngine, StableEngine};
pub use halflife::{HalfLifeError, HalfLifeTable};
