//! Isotope abundance tables.
//!
//! An [`AbundanceTable`] holds the fractional abundance of every nuclide in
//! every sample, valid at a reference time `time_0`. Tables are values:
//! each operation returns a new table and leaves its input untouched.
//!
//! Lifecycle:
//! 1. Build from per-sample [`Material`]s ([`AbundanceTable::from_materials`]),
//!    from raw cells ([`AbundanceTableBuilder`]), or from a prepared
//!    [`LabeledTable`] ([`AbundanceTable::new`]).
//! 2. Advance in time with [`AbundanceTable::decay`].
//! 3. Collapse to elements with [`AbundanceTable::as_atoms`] and combine with
//!    another element table via [`AbundanceTable::merge`].

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{DecayConfig, NegativeElapsedPolicy};
use crate::element::ElementTable;
use crate::error::{DecayError, IsodecayError, TableError, UnitError};
use crate::frame::LabeledTable;
use crate::material::Material;
use crate::nuclide::{Nuclide, identity_of};
use crate::traits::DecayEngine;
use crate::units::{TargetTime, TimeQuantity};

/// Column key of a table: a positional index or a caller-chosen name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SampleId {
    Index(usize),
    Name(String),
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<usize> for SampleId {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

impl From<&str> for SampleId {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for SampleId {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Fractional nuclide abundances per sample at a reference time.
///
/// Invariants:
/// - row keys (nuclides) and column keys (samples) are unique;
/// - every cell is defined, finite and non-negative;
/// - `time_0` is a finite time quantity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AbundanceTable {
    cells: LabeledTable<Nuclide, SampleId>,
    time_0: TimeQuantity,
}

impl AbundanceTable {
    /// Wrap prepared cells, validating every value.
    pub fn new(
        cells: LabeledTable<Nuclide, SampleId>,
        time_0: TimeQuantity,
    ) -> Result<Self, TableError> {
        for (nuclide, sample, value) in cells.cells() {
            check_abundance(&nuclide.symbol(), sample, value)?;
        }
        Ok(Self { cells, time_0 })
    }

    /// Build a table from per-sample materials, valid at time zero.
    ///
    /// Columns are `SampleId::Index(0..N)` in input order; rows are the union
    /// of nuclides across all samples, zero-filled where a sample lacks one.
    ///
    /// # Examples
    ///
    /// ```
    /// use isodecay_core::abundance::{AbundanceTable, SampleId};
    /// use isodecay_core::material::Material;
    /// use isodecay_core::nuclide::Nuclide;
    ///
    /// let table = AbundanceTable::from_materials(&[
    ///     Material::from_iter([("Ni56", 1.0)]),
    ///     Material::from_iter([("Fe56", 0.5), ("Ni56", 0.5)]),
    /// ])
    /// .unwrap();
    /// let fe56 = Nuclide::new(26, 56).unwrap();
    /// assert_eq!(table.get(&fe56, &SampleId::Index(0)), Some(0.0));
    /// assert_eq!(table.get(&fe56, &SampleId::Index(1)), Some(0.5));
    /// ```
    pub fn from_materials(materials: &[Material]) -> Result<Self, IsodecayError> {
        Self::from_materials_at(materials, TimeQuantity::ZERO)
    }

    /// [`from_materials`](Self::from_materials) with an explicit `time_0`.
    pub fn from_materials_at(
        materials: &[Material],
        time_0: TimeQuantity,
    ) -> Result<Self, IsodecayError> {
        let ids = (0..materials.len()).map(SampleId::Index).collect();
        Self::from_labeled_materials(ids, materials, time_0)
    }

    /// Build from materials with caller-chosen sample ids.
    ///
    /// `ids` and `materials` are paired positionally and must have the same
    /// length.
    pub fn from_labeled_materials(
        ids: Vec<SampleId>,
        materials: &[Material],
        time_0: TimeQuantity,
    ) -> Result<Self, IsodecayError> {
        if ids.len() != materials.len() {
            return Err(TableError::SampleCountMismatch {
                ids: ids.len(),
                materials: materials.len(),
            }
            .into());
        }
        let mut cells = LabeledTable::default();

        for (id, material) in ids.into_iter().zip(materials) {
            let column = cells.push_column(id.clone())?;
            let mut seen = HashSet::with_capacity(material.len());

            for (symbol, &amount) in material {
                let nuclide = identity_of(symbol)?;
                check_abundance(symbol, &id, amount)?;
                if !seen.insert(nuclide) {
                    return Err(TableError::DuplicateNuclide {
                        nuclide: nuclide.symbol(),
                        sample: id,
                    }
                    .into());
                }
                let row = cells.ensure_row(&nuclide);
                cells.set_at(row, column, amount);
            }
        }

        Ok(Self { cells, time_0 })
    }

    /// One material per sample, in column order.
    ///
    /// Every row is emitted for every sample, zeros included, keyed by the
    /// canonical nuclide symbol.
    pub fn to_materials(&self) -> Vec<Material> {
        let rows = self.cells.rows();
        (0..self.cells.n_columns())
            .map(|c| {
                rows.iter()
                    .enumerate()
                    .map(|(r, nuclide)| (nuclide.symbol(), self.cells.at(r, c)))
                    .collect()
            })
            .collect()
    }

    /// Advance every sample to `t` with the default [`DecayConfig`].
    ///
    /// A bare number is read as days.
    pub fn decay<E>(&self, engine: &E, t: impl Into<TargetTime>) -> Result<Self, IsodecayError>
    where
        E: DecayEngine + ?Sized,
    {
        self.decay_with(engine, t, &DecayConfig::default())
    }

    /// Advance every sample from `time_0` to `t`.
    ///
    /// Each sample's material goes through `engine` with the elapsed time in
    /// seconds; the engine's output is overlaid on the original material, so
    /// nuclides the engine does not report keep their amount. The result is
    /// valid at `t`, keeps this table's sample ids, and has its rows sorted
    /// by nuclide unless `config.sort_rows` is off.
    pub fn decay_with<E>(
        &self,
        engine: &E,
        t: impl Into<TargetTime>,
        config: &DecayConfig,
    ) -> Result<Self, IsodecayError>
    where
        E: DecayEngine + ?Sized,
    {
        let target = t.into().resolve(config.bare_time_unit)?;
        let elapsed = target.seconds_since(&self.time_0);
        if !elapsed.is_finite() {
            return Err(UnitError::NonFinite(elapsed).into());
        }
        if elapsed < 0.0 {
            match config.negative_elapsed {
                NegativeElapsedPolicy::Reject => {
                    return Err(DecayError::NegativeElapsed { seconds: elapsed }.into());
                }
                NegativeElapsedPolicy::PassThrough => {
                    warn!(elapsed_seconds = elapsed, "passing negative elapsed time to decay engine");
                }
            }
        }

        info!(
            engine = engine.name(),
            samples = self.n_samples(),
            nuclides = self.len(),
            from = %self.time_0,
            to = %target,
            "decaying abundance table"
        );

        let mut updated = Vec::with_capacity(self.n_samples());
        for (sample, material) in self.samples().iter().zip(self.to_materials()) {
            debug!(%sample, nuclides = material.len(), "calling decay engine");
            let decayed = engine
                .decay(&material, elapsed)
                .map_err(|e| DecayError::Engine {
                    sample: sample.clone(),
                    reason: e.to_string(),
                })?;
            updated.push(material.updated_with(&canonical_keys(&decayed, sample)?));
        }

        let table = Self::from_labeled_materials(self.samples().to_vec(), &updated, target)?;
        Ok(if config.sort_rows { table.sorted() } else { table })
    }

    /// Sum mass-number variants of each element, per sample.
    ///
    /// Rows of the result ascend by atomic number.
    pub fn as_atoms(&self) -> ElementTable {
        let grouped = self.cells.group_sum(Nuclide::atomic_number).sorted_rows();
        ElementTable::from_valid(grouped)
    }

    /// Element view of this table plus `other`, optionally normalized, with
    /// the default [`DecayConfig`].
    pub fn merge(&self, other: &ElementTable, normalize: bool) -> Result<ElementTable, TableError> {
        self.merge_with(other, normalize, &DecayConfig::default())
    }

    /// Add `other` to [`as_atoms`](Self::as_atoms) as an outer join (rows and
    /// samples unioned, absent cells count as zero). With `normalize`, every
    /// sample is then scaled to unit sum; zero-sum samples follow
    /// `config.zero_sum`.
    pub fn merge_with(
        &self,
        other: &ElementTable,
        normalize: bool,
        config: &DecayConfig,
    ) -> Result<ElementTable, TableError> {
        let combined = self.as_atoms().outer_add(other);
        info!(
            elements = combined.len(),
            samples = combined.n_samples(),
            normalize,
            "merged element tables"
        );
        if normalize {
            combined.normalized(config.zero_sum)
        } else {
            Ok(combined)
        }
    }

    /// Copy with rows ordered by (atomic number, mass number).
    pub fn sorted(&self) -> Self {
        Self {
            cells: self.cells.sorted_rows(),
            time_0: self.time_0,
        }
    }

    /// Copy valid at another reference time. Cells are unchanged.
    pub fn with_time_0(&self, time_0: TimeQuantity) -> Self {
        Self {
            cells: self.cells.clone(),
            time_0,
        }
    }

    pub fn time_0(&self) -> TimeQuantity {
        self.time_0
    }

    pub fn nuclides(&self) -> &[Nuclide] {
        self.cells.rows()
    }

    pub fn samples(&self) -> &[SampleId] {
        self.cells.columns()
    }

    /// Number of nuclide rows.
    pub fn len(&self) -> usize {
        self.cells.n_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.n_rows() == 0
    }

    pub fn n_samples(&self) -> usize {
        self.cells.n_columns()
    }

    pub fn get(&self, nuclide: &Nuclide, sample: &SampleId) -> Option<f64> {
        self.cells.get(nuclide, sample)
    }

    /// `(nuclide, abundance)` for one sample, in row order.
    pub fn column(&self, sample: &SampleId) -> Option<Vec<(Nuclide, f64)>> {
        self.cells
            .column(sample)
            .map(|col| col.into_iter().map(|(n, v)| (*n, v)).collect())
    }

    /// Per-sample totals, aligned with [`samples`](Self::samples).
    pub fn column_sums(&self) -> Vec<f64> {
        self.cells.column_sums()
    }

    pub fn cells(&self) -> &LabeledTable<Nuclide, SampleId> {
        &self.cells
    }
}

impl fmt::Display for AbundanceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "time_0 = {}", self.time_0)?;
        write!(f, "{:<8}", "nuclide")?;
        for sample in self.samples() {
            write!(f, " {:>12}", sample.to_string())?;
        }
        writeln!(f)?;
        for (r, nuclide) in self.nuclides().iter().enumerate() {
            write!(f, "{:<8}", nuclide.symbol())?;
            for c in 0..self.n_samples() {
                write!(f, " {:>12.6e}", self.cells.at(r, c))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Assemble an [`AbundanceTable`] from individual cells.
///
/// # Examples
///
/// ```
/// use isodecay_core::abundance::AbundanceTableBuilder;
/// use isodecay_core::nuclide::Nuclide;
/// use isodecay_core::units::TimeQuantity;
///
/// let ni58 = Nuclide::new(28, 58).unwrap();
/// let table = AbundanceTableBuilder::new()
///     .sample("core")
///     .sample("shell")
///     .cell(ni58, "core", 0.3)
///     .time_0(TimeQuantity::days(10.0).unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(table.n_samples(), 2);
/// assert_eq!(table.get(&ni58, &"shell".into()), Some(0.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AbundanceTableBuilder {
    samples: Vec<SampleId>,
    cells: Vec<(Nuclide, SampleId, f64)>,
    time_0: TimeQuantity,
}

impl AbundanceTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a sample column. Columns appear in declaration order, followed
    /// by undeclared samples referenced from [`cell`](Self::cell).
    pub fn sample(mut self, id: impl Into<SampleId>) -> Self {
        self.samples.push(id.into());
        self
    }

    pub fn cell(mut self, nuclide: Nuclide, sample: impl Into<SampleId>, value: f64) -> Self {
        self.cells.push((nuclide, sample.into(), value));
        self
    }

    pub fn time_0(mut self, time_0: TimeQuantity) -> Self {
        self.time_0 = time_0;
        self
    }

    pub fn build(self) -> Result<AbundanceTable, TableError> {
        let mut cells = LabeledTable::default();
        for sample in self.samples {
            cells.push_column(sample)?;
        }

        let mut seen = HashSet::with_capacity(self.cells.len());
        for (nuclide, sample, value) in self.cells {
            check_abundance(&nuclide.symbol(), &sample, value)?;
            if !seen.insert((nuclide, sample.clone())) {
                return Err(TableError::DuplicateNuclide {
                    nuclide: nuclide.symbol(),
                    sample,
                });
            }
            let c = cells.ensure_column(&sample);
            let r = cells.ensure_row(&nuclide);
            cells.set_at(r, c, value);
        }

        Ok(AbundanceTable {
            cells,
            time_0: self.time_0,
        })
    }
}

/// Re-key `material` by canonical nuclide symbol so engine output that
/// spells a nuclide differently still overlays the matching row.
fn canonical_keys(material: &Material, sample: &SampleId) -> Result<Material, IsodecayError> {
    let mut out = Material::new();
    for (symbol, &amount) in material {
        let canonical = identity_of(symbol)?.symbol();
        if out.insert(canonical.clone(), amount).is_some() {
            return Err(TableError::DuplicateNuclide {
                nuclide: canonical,
                sample: sample.clone(),
            }
            .into());
        }
    }
    Ok(out)
}

pub(crate) fn check_abundance(key: &str, sample: &SampleId, value: f64) -> Result<(), TableError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TableError::InvalidAbundance {
            key: key.to_string(),
            sample: sample.clone(),
            value,
        })
    }
}
