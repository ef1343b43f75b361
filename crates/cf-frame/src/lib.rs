#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::ops::{Add, Div, Mul, Range, Sub};

use cf_columnar::{ArithmeticOp, ColumnError, SeriesData, validate_permutation};
use cf_runtime::{DecisionLedger, EnginePolicy, ExecutionMode};
use cf_types::{DType, Kind};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_HEAD_ROWS: usize = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("series length {found} does not match expected length {expected}")]
    InconsistentSeriesLength { expected: usize, found: usize },
    #[error("column '{name}' already exists")]
    DuplicateColumn { name: String },
    #[error("column '{name}' not found")]
    ColumnNotFound { name: String },
    #[error("Index {index} is out of bounds")]
    IndexOutOfBounds { index: i64 },
    #[error("expected a value of kind {expected} but found {found}")]
    InvalidType { expected: Kind, found: Kind },
    #[error("cannot erase from an empty column")]
    EmptyArray,
    #[error(transparent)]
    Column(ColumnError),
}

impl From<ColumnError> for FrameError {
    fn from(err: ColumnError) -> Self {
        match err {
            ColumnError::InvalidType { expected, found } => Self::InvalidType { expected, found },
            ColumnError::EmptyArray => Self::EmptyArray,
            other => Self::Column(other),
        }
    }
}

fn out_of_bounds(position: usize) -> FrameError {
    FrameError::IndexOutOfBounds {
        index: i64::try_from(position).unwrap_or(i64::MAX),
    }
}

/// Resolve a signed row position against `len`; negatives are out of bounds.
fn checked_position(index: i64, len: usize) -> Result<usize, FrameError> {
    usize::try_from(index)
        .ok()
        .filter(|&position| position < len)
        .ok_or(FrameError::IndexOutOfBounds { index })
}

fn clamp_rows(n: i64, len: usize) -> usize {
    usize::try_from(n).map_or(0, |n| n.min(len))
}

/// A named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    name: String,
    data: SeriesData,
}

impl Series {
    pub fn new(name: impl Into<String>, data: impl Into<SeriesData>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn data(&self) -> &SeriesData {
        &self.data
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.data.kind()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Deep copy with the same name.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn get(&self, index: i64) -> Result<DType, FrameError> {
        let position = checked_position(index, self.len())?;
        self.data
            .get(position)
            .ok_or(FrameError::IndexOutOfBounds { index })
    }

    /// The result keeps the left operand's name.
    fn binary_op(&self, other: &Self, op: ArithmeticOp) -> Result<Self, FrameError> {
        let data = self.data.binary(&other.data, op)?;
        Ok(Self::new(self.name.clone(), data))
    }

    pub fn add(&self, other: &Self) -> Result<Self, FrameError> {
        self.binary_op(other, ArithmeticOp::Add)
    }

    pub fn sub(&self, other: &Self) -> Result<Self, FrameError> {
        self.binary_op(other, ArithmeticOp::Sub)
    }

    pub fn mul(&self, other: &Self) -> Result<Self, FrameError> {
        self.binary_op(other, ArithmeticOp::Mul)
    }

    pub fn div(&self, other: &Self) -> Result<Self, FrameError> {
        self.binary_op(other, ArithmeticOp::Div)
    }

    /// Concatenate `other` below this column. Works for every kind, but both
    /// sides must share it.
    pub fn merge(&self, other: &Self) -> Result<Self, FrameError> {
        let data = self.data.merge(&other.data)?;
        Ok(Self::new(self.name.clone(), data))
    }

    /// Sorting permutation of this column; the column itself is not reordered.
    #[must_use]
    pub fn argsort(&self, descending: bool) -> Vec<usize> {
        self.data.argsort_permutation(descending)
    }
}

// Operator forms are the fatal variant of column arithmetic: unsupported kind
// pairs and length mismatches panic instead of returning an error.
macro_rules! impl_fatal_op {
    ($trait:ident, $method:ident) => {
        impl $trait<&Series> for &Series {
            type Output = Series;

            fn $method(self, rhs: &Series) -> Series {
                match Series::$method(self, rhs) {
                    Ok(out) => out,
                    Err(err) => panic!("{err}"),
                }
            }
        }

        impl $trait<Series> for Series {
            type Output = Series;

            fn $method(self, rhs: Series) -> Series {
                $trait::$method(&self, &rhs)
            }
        }
    };
}

impl_fatal_op!(Add, add);
impl_fatal_op!(Sub, sub);
impl_fatal_op!(Mul, mul);
impl_fatal_op!(Div, div);

/// Column lookup for [`DataFrame::item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSelector<'a> {
    Position(usize),
    Name(&'a str),
}

impl From<usize> for ColumnSelector<'_> {
    fn from(position: usize) -> Self {
        Self::Position(position)
    }
}

impl<'a> From<&'a str> for ColumnSelector<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

/// Row selection for [`DataFrame::take_rows`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSelection {
    /// Half-open `[begin, end)`.
    Range(Range<i64>),
    /// Arbitrary positions; sorted before use.
    Indices(Vec<i64>),
}

/// A table of equal-length, uniquely named columns.
///
/// `index` maps every column name to its position in `data` and is patched
/// on every structural change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Series>", into = "Vec<Series>")]
pub struct DataFrame {
    data: Vec<Series>,
    shape: [usize; 2],
    index: BTreeMap<String, usize>,
}

impl TryFrom<Vec<Series>> for DataFrame {
    type Error = FrameError;

    fn try_from(columns: Vec<Series>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<DataFrame> for Vec<Series> {
    fn from(frame: DataFrame) -> Self {
        frame.data
    }
}

impl DataFrame {
    /// Build a table; the first column's length is authoritative.
    pub fn new(columns: Vec<Series>) -> Result<Self, FrameError> {
        let rows = columns.first().map_or(0, Series::len);
        if let Some(bad) = columns.iter().find(|series| series.len() != rows) {
            return Err(FrameError::InconsistentSeriesLength {
                expected: rows,
                found: bad.len(),
            });
        }

        let mut index = BTreeMap::new();
        for (position, series) in columns.iter().enumerate() {
            if index.insert(series.name().to_owned(), position).is_some() {
                return Err(FrameError::DuplicateColumn {
                    name: series.name().to_owned(),
                });
            }
        }

        Ok(Self {
            shape: [rows, columns.len()],
            data: columns,
            index,
        })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// `[row_count, column_count]`.
    #[must_use]
    pub fn shape(&self) -> [usize; 2] {
        self.shape
    }

    #[must_use]
    pub fn data(&self) -> &[Series] {
        &self.data
    }

    #[must_use]
    pub fn index(&self) -> &BTreeMap<String, usize> {
        &self.index
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.shape[0]
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.shape[1]
    }

    /// True when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shape[0] == 0
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.data.iter().map(Series::name).collect()
    }

    fn position_of(&self, name: &str) -> Result<usize, FrameError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| FrameError::ColumnNotFound {
                name: name.to_owned(),
            })
    }

    pub fn column(&self, name: &str) -> Result<&Series, FrameError> {
        let position = self.position_of(name)?;
        Ok(&self.data[position])
    }

    pub fn add_column(&mut self, column: Series) -> Result<(), FrameError> {
        if !self.data.is_empty() && column.len() != self.shape[0] {
            return Err(FrameError::InconsistentSeriesLength {
                expected: self.shape[0],
                found: column.len(),
            });
        }
        if self.index.contains_key(column.name()) {
            return Err(FrameError::DuplicateColumn {
                name: column.name().to_owned(),
            });
        }

        debug!("add column '{}' ({})", column.name(), column.kind());
        if self.data.is_empty() {
            self.shape[0] = column.len();
        }
        self.index.insert(column.name().to_owned(), self.data.len());
        self.data.push(column);
        self.shape[1] += 1;
        Ok(())
    }

    /// Remove a column and return it.
    pub fn drop_column(&mut self, name: &str) -> Result<Series, FrameError> {
        let position = self.position_of(name)?;
        debug!("drop column '{name}' at position {position}");

        self.index.remove(name);
        let removed = self.data.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }

        self.shape[1] -= 1;
        if self.data.is_empty() {
            self.shape = [0, 0];
        }
        Ok(removed)
    }

    /// Rename a column in place; the index follows the new name.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), FrameError> {
        let position = self.position_of(old)?;
        if old == new {
            return Ok(());
        }
        if self.index.contains_key(new) {
            return Err(FrameError::DuplicateColumn {
                name: new.to_owned(),
            });
        }

        debug!("rename column '{old}' -> '{new}'");
        self.index.remove(old);
        self.index.insert(new.to_owned(), position);
        self.data[position].set_name(new);
        Ok(())
    }

    /// New table holding the named columns in the requested order.
    pub fn select_columns(&self, names: &[&str]) -> Result<Self, FrameError> {
        let columns = names
            .iter()
            .map(|name| self.column(name).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(columns)
    }

    pub fn drop_row(&mut self, index: i64) -> Result<(), FrameError> {
        let position = checked_position(index, self.shape[0])?;
        debug!("drop row {position}");
        for series in &mut self.data {
            series.data.erase(position)?;
        }
        self.shape[0] -= 1;
        Ok(())
    }

    /// Append one row. Every value is kind-checked before any column changes.
    pub fn add_row(&mut self, values: Vec<DType>) -> Result<(), FrameError> {
        if values.len() != self.shape[1] {
            return Err(FrameError::InconsistentSeriesLength {
                expected: self.shape[1],
                found: values.len(),
            });
        }
        for (series, value) in self.data.iter().zip(&values) {
            series.data.check_kind(value)?;
        }

        debug!("add row {}", self.shape[0]);
        for (series, value) in self.data.iter_mut().zip(values) {
            series.data.push(value)?;
        }
        if !self.data.is_empty() {
            self.shape[0] += 1;
        }
        Ok(())
    }

    /// Row selection by `range` or by `indices`; `range` wins when both are
    /// given, and giving neither yields a fresh empty table.
    pub fn select_rows(
        &self,
        range: Option<Range<i64>>,
        indices: Option<&[i64]>,
    ) -> Result<Self, FrameError> {
        let selection = match (range, indices) {
            (Some(range), _) => RowSelection::Range(range),
            (None, Some(indices)) => RowSelection::Indices(indices.to_vec()),
            (None, None) => return Ok(Self::empty()),
        };
        self.take_rows(selection)
    }

    pub fn take_rows(&self, selection: RowSelection) -> Result<Self, FrameError> {
        let rows = self.shape[0];
        match selection {
            RowSelection::Range(range) => {
                let begin = usize::try_from(range.start)
                    .ok()
                    .filter(|&begin| begin <= rows)
                    .ok_or(FrameError::IndexOutOfBounds { index: range.start })?;
                let end = usize::try_from(range.end)
                    .ok()
                    .filter(|&end| end >= begin && end <= rows)
                    .ok_or(FrameError::IndexOutOfBounds { index: range.end })?;
                self.slice_rows(begin..end)
            }
            RowSelection::Indices(mut indices) => {
                indices.sort_unstable();
                let positions = indices
                    .into_iter()
                    .map(|index| checked_position(index, rows))
                    .collect::<Result<Vec<_>, _>>()?;
                self.gather_rows(&positions)
            }
        }
    }

    fn slice_rows(&self, range: Range<usize>) -> Result<Self, FrameError> {
        let columns = self
            .data
            .iter()
            .map(|series| Ok(Series::new(series.name(), series.data.slice(range.clone())?)))
            .collect::<Result<Vec<_>, FrameError>>()?;
        Self::new(columns)
    }

    fn gather_rows(&self, positions: &[usize]) -> Result<Self, FrameError> {
        let columns = self
            .data
            .iter()
            .map(|series| Ok(Series::new(series.name(), series.data.take(positions)?)))
            .collect::<Result<Vec<_>, FrameError>>()?;
        Self::new(columns)
    }

    /// Rows whose value in `column` satisfies `predicate`, in original order.
    pub fn filter<F>(&self, column: &str, predicate: F) -> Result<Self, FrameError>
    where
        F: Fn(&DType) -> bool,
    {
        let series = self.column(column)?;
        let positions = series
            .data
            .iter()
            .enumerate()
            .filter(|(_, value)| predicate(value))
            .map(|(position, _)| position)
            .collect::<Vec<_>>();
        self.gather_rows(&positions)
    }

    pub fn sort(&mut self, column: &str, descending: bool) -> Result<(), FrameError> {
        self.sort_with_policy(
            column,
            descending,
            &EnginePolicy::default(),
            &mut DecisionLedger::new(),
        )
    }

    /// Sort every column by the permutation of `column`, keeping rows intact.
    pub fn sort_with_policy(
        &mut self,
        column: &str,
        descending: bool,
        policy: &EnginePolicy,
        ledger: &mut DecisionLedger,
    ) -> Result<(), FrameError> {
        let position = self.position_of(column)?;
        let perm = self.data[position].argsort(descending);
        validate_permutation(&perm, self.shape[0])?;

        debug!("sort by '{column}' (descending={descending})");
        match policy.decide_execution("sort", self.shape[0], self.shape[1], ledger) {
            ExecutionMode::Sequential => {
                for series in &mut self.data {
                    series.data.apply_permutation(&perm)?;
                }
            }
            ExecutionMode::Parallel => {
                self.data
                    .par_iter_mut()
                    .try_for_each(|series| series.data.apply_permutation(&perm))?;
            }
        }
        Ok(())
    }

    /// Append `other`'s rows below this table, matching columns by name.
    pub fn vstack(&self, other: &Self) -> Result<Self, FrameError> {
        if self.shape[1] != other.shape[1] {
            return Err(FrameError::InconsistentSeriesLength {
                expected: self.shape[1],
                found: other.shape[1],
            });
        }
        let columns = self
            .data
            .iter()
            .map(|series| series.merge(other.column(series.name())?))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(columns)
    }

    /// All of `other`'s columns followed by this table's columns whose names
    /// `other` does not use.
    pub fn hstack(&self, other: &Self) -> Result<Self, FrameError> {
        let mut columns = other.data.clone();
        columns.extend(
            self.data
                .iter()
                .filter(|series| !other.index.contains_key(series.name()))
                .cloned(),
        );
        Self::new(columns)
    }

    /// First `n` rows, with `n` clamped to `[0, rows]`.
    pub fn limit(&self, n: i64) -> Result<Self, FrameError> {
        let take = clamp_rows(n, self.shape[0]);
        self.slice_rows(0..take)
    }

    /// Last `n` rows, with `n` clamped to `[0, rows]`.
    pub fn tail(&self, n: i64) -> Result<Self, FrameError> {
        let rows = self.shape[0];
        let take = clamp_rows(n, rows);
        self.slice_rows(rows - take..rows)
    }

    pub fn item<'a>(
        &self,
        row: i64,
        column: impl Into<ColumnSelector<'a>>,
    ) -> Result<DType, FrameError> {
        let series = match column.into() {
            ColumnSelector::Position(position) => {
                self.data.get(position).ok_or_else(|| out_of_bounds(position))?
            }
            ColumnSelector::Name(name) => self.column(name)?,
        };
        series.get(row)
    }

    /// Reset to the empty table.
    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    fn render(&self, out: &mut impl fmt::Write, rows: usize) -> fmt::Result {
        out.write_char('\t')?;
        for series in &self.data {
            write!(out, "{}\t", series.name())?;
        }
        out.write_char('\n')?;

        for row in 0..rows.min(self.shape[0]) {
            write!(out, "{row}\t")?;
            for series in &self.data {
                if let Some(value) = series.data.get(row) {
                    write!(out, "{value}\t")?;
                }
            }
            out.write_char('\n')?;
        }
        Ok(())
    }

    /// Tab-separated rendering of the first `min(rows, row_count)` rows.
    #[must_use]
    pub fn to_tsv_string(&self, rows: usize) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.render(&mut out, rows);
        out
    }

    pub fn write_head<W: io::Write>(&self, out: &mut W, rows: usize) -> io::Result<()> {
        out.write_all(self.to_tsv_string(rows).as_bytes())
    }

    /// Print the first five rows to stdout.
    pub fn head(&self) -> io::Result<()> {
        self.write_head(&mut io::stdout().lock(), DEFAULT_HEAD_ROWS)
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, self.shape[0])
    }
}
