//! Half-life tables for the reference engine.
//!
//! A table maps nuclides to their half-life. Tables load from JSON objects
//! keyed by nuclide symbol:
//!
//! ```json
//! { "Ni56": { "value": 6.075, "unit": "d" }, "Co60": { "value": 5.2714, "unit": "y" } }
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use isodecay_core::nuclide::Nuclide;
use isodecay_core::units::{TimeQuantity, TimeUnit};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HalfLifeError {
    #[error("half-life json: {0}")] Json(#[from] serde_json::Error),
    #[error("reading half-life table: {0}")] Io(#[from] std::io::Error),
    #[error("half-life of {nuclide} must be positive, got {half_life}")] NonPositive { nuclide: Nuclide, half_life: TimeQuantity },
}

/// Nuclide -> half-life.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HalfLifeTable {
    entries: BTreeMap<Nuclide, TimeQuantity>,
}

impl HalfLifeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handful of commonly tracked radionuclides (supernova and
    /// activation products).
    pub fn common() -> Self {
        const COMMON: [(u8, u16, f64, TimeUnit); 12] = [
            (1, 3, 12.32, TimeUnit::Year),
            (6, 14, 5_700.0, TimeUnit::Year),
            (11, 22, 2.6018, TimeUnit::Year),
            (13, 26, 7.17e5, TimeUnit::Year),
            (22, 44, 59.1, TimeUnit::Year),
            (26, 55, 2.737, TimeUnit::Year),
            (26, 60, 2.62e6, TimeUnit::Year),
            (27, 56, 77.236, TimeUnit::Day),
            (27, 57, 271.74, TimeUnit::Day),
            (27, 60, 5.2714, TimeUnit::Year),
            (28, 56, 6.075, TimeUnit::Day),
            (28, 57, 35.60, TimeUnit::Hour),
        ];

        let entries = COMMON
            .iter()
            .filter_map(|&(z, a, value, unit)| {
                Some((Nuclide::new(z, a).ok()?, TimeQuantity::new(value, unit).ok()?))
            })
            .collect();
        Self { entries }
    }

    /// Set a half-life, returning the previous one.
    pub fn insert(
        &mut self,
        nuclide: Nuclide,
        half_life: TimeQuantity,
    ) -> Result<Option<TimeQuantity>, HalfLifeError> {
        if half_life.value() <= 0.0 {
            return Err(HalfLifeError::NonPositive { nuclide, half_life });
        }
        Ok(self.entries.insert(nuclide, half_life))
    }

    pub fn get(&self, nuclide: &Nuclide) -> Option<TimeQuantity> {
        self.entries.get(nuclide).copied()
    }

    /// Half-life in seconds, the unit engines work in.
    pub fn seconds(&self, nuclide: &Nuclide) -> Option<f64> {
        self.get(nuclide).map(|t| t.as_seconds())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Nuclide, &TimeQuantity)> {
        self.entries.iter()
    }

    /// Add every entry of `other`, replacing existing ones.
    pub fn extend(&mut self, other: HalfLifeTable) {
        self.entries.extend(other.entries);
    }

    pub fn from_json_str(json: &str) -> Result<Self, HalfLifeError> {
        let raw: BTreeMap<Nuclide, TimeQuantity> = serde_json::from_str(json)?;
        Self::from_entries(raw)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, HalfLifeError> {
        let raw: BTreeMap<Nuclide, TimeQuantity> = serde_json::from_reader(reader)?;
        Self::from_entries(raw)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, HalfLifeError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    fn from_entries(raw: BTreeMap<Nuclide, TimeQuantity>) -> Result<Self, HalfLifeError> {
        let mut table = Self::new();
        for (nuclide, half_life) in raw {
            table.insert(nuclide, half_life)?;
        }
        Ok(table)
    }
}
