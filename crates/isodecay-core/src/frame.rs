//! A small generic labeled two-dimensional container.
//!
//! `LabeledTable<R, C>` stores a dense, row-major grid of `f64` cells with
//! unique row labels `R` and unique column labels `C`. Label order is
//! insertion order. Every cell is defined; new rows and columns are filled
//! with `0.0`.
//!
//! The abundance and element tables are thin typed wrappers over this
//! container. It knows nothing about nuclides or samples.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::error::TableError;

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTable<R, C>
where
    R: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
{
    rows: Vec<R>,
    columns: Vec<C>,
    row_index: HashMap<R, usize>,
    column_index: HashMap<C, usize>,
    /// Row-major, `rows.len() * columns.len()` cells.
    values: Vec<f64>,
}

impl<R, C> Default for LabeledTable<R, C>
where
    R: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            columns: Vec::new(),
            row_index: HashMap::new(),
            column_index: HashMap::new(),
            values: Vec::new(),
        }
    }
}

impl<R, C> LabeledTable<R, C>
where
    R: Clone + Eq + Hash + Display,
    C: Clone + Eq + Hash + Display,
{
    /// Zero-filled table with the given labels.
    pub fn zeros(rows: Vec<R>, columns: Vec<C>) -> Result<Self, TableError> {
        let mut table = Self::default();
        for column in columns {
            table.push_column(column)?;
        }
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Append a zero-filled row. Fails if the label already exists.
    pub fn push_row(&mut self, row: R) -> Result<usize, TableError> {
        if self.row_index.contains_key(&row) {
            return Err(TableError::DuplicateRow(row.to_string()));
        }
        Ok(self.append_row(row))
    }

    /// Append a zero-filled column. Fails if the label already exists.
    pub fn push_column(&mut self, column: C) -> Result<usize, TableError> {
        if self.column_index.contains_key(&column) {
            return Err(TableError::DuplicateColumn(column.to_string()));
        }
        Ok(self.append_column(column))
    }
}

impl<R, C> LabeledTable<R, C>
where
    R: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
{
    fn append_row(&mut self, row: R) -> usize {
        let idx = self.rows.len();
        self.row_index.insert(row.clone(), idx);
        self.rows.push(row);
        self.values.resize(self.values.len() + self.columns.len(), 0.0);
        idx
    }

    fn append_column(&mut self, column: C) -> usize {
        let old_width = self.columns.len();
        let mut values = Vec::with_capacity(self.rows.len() * (old_width + 1));
        for r in 0..self.rows.len() {
            values.extend_from_slice(&self.values[r * old_width..(r + 1) * old_width]);
            values.push(0.0);
        }
        self.values = values;
        self.column_index.insert(column.clone(), old_width);
        self.columns.push(column);
        old_width
    }

    /// Index of `row`, appending a zero-filled row if it is new.
    pub fn ensure_row(&mut self, row: &R) -> usize {
        match self.row_index.get(row) {
            Some(&idx) => idx,
            None => self.append_row(row.clone()),
        }
    }

    /// Index of `column`, appending a zero-filled column if it is new.
    pub fn ensure_column(&mut self, column: &C) -> usize {
        match self.column_index.get(column) {
            Some(&idx) => idx,
            None => self.append_column(column.clone()),
        }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn columns(&self) -> &[C] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn row_position(&self, row: &R) -> Option<usize> {
        self.row_index.get(row).copied()
    }

    pub fn column_position(&self, column: &C) -> Option<usize> {
        self.column_index.get(column).copied()
    }

    pub fn get(&self, row: &R, column: &C) -> Option<f64> {
        let r = self.row_position(row)?;
        let c = self.column_position(column)?;
        Some(self.at(r, c))
    }

    /// Cell by position. Panics when out of bounds.
    pub fn at(&self, row: usize, column: usize) -> f64 {
        self.values[row * self.columns.len() + column]
    }

    /// Overwrite a cell by position. Panics when out of bounds.
    pub fn set_at(&mut self, row: usize, column: usize, value: f64) {
        let width = self.columns.len();
        self.values[row * width + column] = value;
    }

    /// Add to a cell by position. Panics when out of bounds.
    pub fn add_at(&mut self, row: usize, column: usize, value: f64) {
        let width = self.columns.len();
        self.values[row * width + column] += value;
    }

    /// Overwrite a cell by label. Returns `false` if either label is unknown.
    pub fn set(&mut self, row: &R, column: &C, value: f64) -> bool {
        match (self.row_position(row), self.column_position(column)) {
            (Some(r), Some(c)) => {
                self.set_at(r, c, value);
                true
            }
            _ => false,
        }
    }

    /// All cells of one row, in column order.
    pub fn row(&self, row: &R) -> Option<&[f64]> {
        let r = self.row_position(row)?;
        let width = self.columns.len();
        Some(&self.values[r * width..(r + 1) * width])
    }

    /// `(row label, value)` pairs of one column, in row order.
    pub fn column(&self, column: &C) -> Option<Vec<(&R, f64)>> {
        let c = self.column_position(column)?;
        Some(
            self.rows
                .iter()
                .enumerate()
                .map(|(r, label)| (label, self.at(r, c)))
                .collect(),
        )
    }

    /// Per-column totals, aligned with [`columns`](Self::columns).
    pub fn column_sums(&self) -> Vec<f64> {
        let width = self.columns.len();
        let mut sums = vec![0.0; width];
        if width == 0 {
            return sums;
        }
        for row in self.values.chunks(width) {
            for (sum, value) in sums.iter_mut().zip(row) {
                *sum += value;
            }
        }
        sums
    }

    /// Iterate `(row, column, value)` over every cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (&R, &C, f64)> + '_ {
        self.rows.iter().enumerate().flat_map(move |(r, row)| {
            self.columns
                .iter()
                .enumerate()
                .map(move |(c, column)| (row, column, self.at(r, c)))
        })
    }

    /// Apply `f(column position, value)` to every cell.
    pub fn map_cells(&self, mut f: impl FnMut(usize, f64) -> f64) -> Self {
        let width = self.columns.len().max(1);
        let values = self
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| f(i % width, v))
            .collect();
        Self {
            values,
            ..self.clone()
        }
    }

    /// Copy with rows reordered by `R`'s ordering.
    pub fn sorted_rows(&self) -> Self
    where
        R: Ord,
    {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        order.sort_by(|&a, &b| self.rows[a].cmp(&self.rows[b]));
        self.reorder_rows(&order)
    }

    fn reorder_rows(&self, order: &[usize]) -> Self {
        let width = self.columns.len();
        let mut rows = Vec::with_capacity(order.len());
        let mut values = Vec::with_capacity(self.values.len());
        for &r in order {
            rows.push(self.rows[r].clone());
            values.extend_from_slice(&self.values[r * width..(r + 1) * width]);
        }
        let row_index = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.clone(), i))
            .collect();
        Self {
            rows,
            row_index,
            values,
            columns: self.columns.clone(),
            column_index: self.column_index.clone(),
        }
    }
}

impl<R, C> LabeledTable<R, C>
where
    R: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
{
    /// Sum rows that share `key(row)`, column by column.
    ///
    /// Output rows appear in the order their key is first seen.
    pub fn group_sum<K, F>(&self, key: F) -> LabeledTable<K, C>
    where
        K: Clone + Eq + Hash,
        F: Fn(&R) -> K,
    {
        let mut out = LabeledTable::<K, C>::default();
        for column in &self.columns {
            out.ensure_column(column);
        }
        for (r, row) in self.rows.iter().enumerate() {
            let target = out.ensure_row(&key(row));
            for c in 0..self.columns.len() {
                out.add_at(target, c, self.at(r, c));
            }
        }
        out
    }

    /// Outer-join addition: rows and columns are unioned and cells missing on
    /// either side count as `0.0`. Never fails on mismatched shapes.
    pub fn outer_add(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for column in &other.columns {
            out.ensure_column(column);
        }
        for (r, row) in other.rows.iter().enumerate() {
            let target = out.ensure_row(row);
            for (c, column) in other.columns.iter().enumerate() {
                let c_out = out.ensure_column(column);
                out.add_at(target, c_out, other.at(r, c));
            }
        }
        out
    }
}
