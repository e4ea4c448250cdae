//! Element-level abundance tables, keyed by atomic number.

use std::fmt;

use tracing::warn;

use crate::abundance::{SampleId, check_abundance};
use crate::config::ZeroSumPolicy;
use crate::constants::{ELEMENT_SYMBOLS, MAX_ATOMIC_NUMBER};
use crate::error::{IsodecayError, NuclideError, TableError};
use crate::frame::LabeledTable;

/// Abundances summed per element (atomic number) and sample.
///
/// Produced by [`AbundanceTable::as_atoms`](crate::abundance::AbundanceTable::as_atoms)
/// and consumed by `merge`. Cells are finite and non-negative, except after
/// [`normalized`](Self::normalized) under [`ZeroSumPolicy::NonFinite`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementTable {
    cells: LabeledTable<u8, SampleId>,
}

impl ElementTable {
    /// Build from `(atomic number, sample, value)` cells. Repeated
    /// `(atomic number, sample)` pairs add up.
    ///
    /// # Examples
    ///
    /// ```
    /// use isodecay_core::element::ElementTable;
    /// use isodecay_core::abundance::SampleId;
    ///
    /// let t = ElementTable::from_cells([(8u8, SampleId::Index(0), 0.25)]).unwrap();
    /// assert_eq!(t.get(8, &SampleId::Index(0)), Some(0.25));
    /// ```
    pub fn from_cells<I>(cells: I) -> Result<Self, IsodecayError>
    where
        I: IntoIterator<Item = (u8, SampleId, f64)>,
    {
        let mut table = LabeledTable::default();
        for (z, sample, value) in cells {
            if z > MAX_ATOMIC_NUMBER {
                return Err(NuclideError::AtomicNumberOutOfRange(z as u32).into());
            }
            check_abundance(ELEMENT_SYMBOLS[z as usize], &sample, value)?;
            let c = table.ensure_column(&sample);
            let r = table.ensure_row(&z);
            table.add_at(r, c, value);
        }
        Ok(Self { cells: table })
    }

    /// Wrap cells already known to satisfy the invariants.
    pub(crate) fn from_valid(cells: LabeledTable<u8, SampleId>) -> Self {
        Self { cells }
    }

    /// Outer-join addition; see [`LabeledTable::outer_add`].
    pub fn outer_add(&self, other: &ElementTable) -> Self {
        Self {
            cells: self.cells.outer_add(&other.cells),
        }
    }

    /// Scale every sample to unit sum.
    ///
    /// A sample summing to zero either fails with
    /// [`TableError::ZeroColumnSum`] or, under [`ZeroSumPolicy::NonFinite`],
    /// is divided anyway and comes out as NaN.
    pub fn normalized(&self, policy: ZeroSumPolicy) -> Result<Self, TableError> {
        let sums = self.cells.column_sums();
        for (sample, &sum) in self.samples().iter().zip(&sums) {
            if sum == 0.0 {
                match policy {
                    ZeroSumPolicy::Error => return Err(TableError::ZeroColumnSum(sample.clone())),
                    ZeroSumPolicy::NonFinite => {
                        warn!(%sample, "normalizing zero-sum sample; values become NaN");
                    }
                }
            }
        }
        Ok(Self {
            cells: self.cells.map_cells(|c, v| v / sums[c]),
        })
    }

    /// Copy with rows ascending by atomic number.
    pub fn sorted(&self) -> Self {
        Self {
            cells: self.cells.sorted_rows(),
        }
    }

    /// Atomic numbers, in row order.
    pub fn elements(&self) -> &[u8] {
        self.cells.rows()
    }

    pub fn samples(&self) -> &[SampleId] {
        self.cells.columns()
    }

    pub fn len(&self) -> usize {
        self.cells.n_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.n_rows() == 0
    }

    pub fn n_samples(&self) -> usize {
        self.cells.n_columns()
    }

    pub fn get(&self, atomic_number: u8, sample: &SampleId) -> Option<f64> {
        self.cells.get(&atomic_number, sample)
    }

    /// Per-sample totals, aligned with [`samples`](Self::samples).
    pub fn column_sums(&self) -> Vec<f64> {
        self.cells.column_sums()
    }

    pub fn cells(&self) -> &LabeledTable<u8, SampleId> {
        &self.cells
    }
}

impl fmt::Display for ElementTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8}", "element")?;
        for sample in self.samples() {
            write!(f, " {:>12}", sample.to_string())?;
        }
        writeln!(f)?;
        for (r, &z) in self.elements().iter().enumerate() {
            write!(f, "{:<8}", ELEMENT_SYMBOLS[z as usize])?;
            for c in 0..self.n_samples() {
                write!(f, " {:>12.6e}", self.cells.at(r, c))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
