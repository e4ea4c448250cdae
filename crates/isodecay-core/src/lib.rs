//! # isodecay-core
//! Isotope abundance tables and the contracts around them.
//!
//! - [`abundance`]: the per-sample nuclide table and its operations
//!   (`from_materials`, `to_materials`, `decay`, `as_atoms`, `merge`)
//! - [`nuclide`]: nuclide identity and symbol naming
//! - [`traits`]: the [`DecayEngine`](traits::DecayEngine) capability
//! - [`units`]: time quantities
//! - [`frame`]: the generic labeled table underneath

pub mod abundance;
pub mod config;
pub mod constants;
pub mod element;
pub mod error;
pub mod frame;
pub mod material;
pub mod nuclide;
pub mod traits;
pub mod units;

pub use abundance::{AbundanceTable, AbundanceTableBuilder, SampleId};
pub use config::{DecayConfig, NegativeElapsedPolicy, ZeroSumPolicy};
pub use element::ElementTable;
pub use error::IsodecayError;
pub use material::Material;
pub use nuclide::{Nuclide, identity_of, symbol_of};
pub use traits::DecayEngine;
pub use units::{TargetTime, TimeQuantity, TimeUnit};
