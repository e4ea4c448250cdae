//! Error types for isodecay.
use thiserror::Error;

use crate::abundance::SampleId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NuclideError {
    #[error("empty nuclide identifier")] Empty,
    #[error("malformed nuclide identifier: {0:?}")] Malformed(String),
    #[error("unknown element symbol: {0:?}")] UnknownElement(String),
    #[error("atomic number out of range: {0}")] AtomicNumberOutOfRange(u32),
    #[error("invalid mass number {mass_number} for atomic number {atomic_number}")] InvalidMassNumber { atomic_number: u32, mass_number: i64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("unknown time unit: {0:?}")] UnknownUnit(String),
    #[error("quantity has no unit: {0:?}")] MissingUnit(String),
    #[error("malformed time quantity: {0:?}")] Malformed(String),
    #[error("non-finite time value: {0}")] NonFinite(f64),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("invalid abundance {value} for {key} in sample {sample}")] InvalidAbundance { key: String, sample: SampleId, value: f64 },
    #[error("nuclide {nuclide} given twice in sample {sample}")] DuplicateNuclide { nuclide: String, sample: SampleId },
    #[error("duplicate row key: {0}")] DuplicateRow(String),
    #[error("duplicate column key: {0}")] DuplicateColumn(String),
    #[error("{ids} sample ids for {materials} materials")] SampleCountMismatch { ids: usize, materials: usize },
    #[error("sample {0} sums to zero; cannot normalize")] ZeroColumnSum(SampleId),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecayError {
    #[error("negative elapsed time: {seconds} s")] NegativeElapsed { seconds: f64 },
    #[error("decay engine failed for sample {sample}: {reason}")] Engine { sample: SampleId, reason: String },
    #[error("decay engine rejected input: {0}")] Rejected(String),
}

#[derive(Error, Debug)]
pub enum IsodecayError {
    #[error(transparent)] Nuclide(#[from] NuclideError),
    #[error(transparent)] Unit(#[from] UnitError),
    #[error(transparent)] Table(#[from] TableError),
    #[error(transparent)] Decay(#[from] DecayError),
}
