#![forbid(unsafe_code)]

//! Structural invariant checks and fixtures shared by the property and
//! scenario suites.

use cf_columnar::SeriesData;
use cf_frame::{DataFrame, FrameError, Series};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("column '{name}' has length {len}, shape says {rows} rows")]
    RowCount {
        name: String,
        len: usize,
        rows: usize,
    },
    #[error("shape says {declared} columns but table holds {actual}")]
    ColumnCount { declared: usize, actual: usize },
    #[error("index maps '{name}' to {found:?}, column sits at {expected}")]
    IndexEntry {
        name: String,
        expected: usize,
        found: Option<usize>,
    },
    #[error("index holds {entries} entries for {columns} columns")]
    StaleIndex { entries: usize, columns: usize },
    #[error("column-less table reports shape {shape:?}")]
    NonZeroEmptyShape { shape: [usize; 2] },
}

/// Verify shape, index and name-uniqueness invariants of `frame`.
pub fn check_frame_invariants(frame: &DataFrame) -> Result<(), InvariantViolation> {
    let [rows, cols] = frame.shape();
    let data = frame.data();

    if cols != data.len() {
        return Err(InvariantViolation::ColumnCount {
            declared: cols,
            actual: data.len(),
        });
    }
    if data.is_empty() && rows != 0 {
        return Err(InvariantViolation::NonZeroEmptyShape {
            shape: frame.shape(),
        });
    }

    for (position, series) in data.iter().enumerate() {
        if series.len() != rows {
            return Err(InvariantViolation::RowCount {
                name: series.name().to_owned(),
                len: series.len(),
                rows,
            });
        }
        let found = frame.index().get(series.name()).copied();
        if found != Some(position) {
            return Err(InvariantViolation::IndexEntry {
                name: series.name().to_owned(),
                expected: position,
                found,
            });
        }
    }

    // Every column resolved to its own slot above, so an entry count equal to
    // the column count rules out stale keys and duplicate names.
    if frame.index().len() != data.len() {
        return Err(InvariantViolation::StaleIndex {
            entries: frame.index().len(),
            columns: data.len(),
        });
    }
    Ok(())
}

/// Values of `frame`'s rows, one `Vec` of rendered cells per row.
#[must_use]
pub fn rows_of(frame: &DataFrame) -> Vec<Vec<String>> {
    (0..frame.num_rows())
        .map(|row| {
            frame
                .data()
                .iter()
                .filter_map(|series| series.data().get(row))
                .map(|value| value.to_string())
                .collect()
        })
        .collect()
}

/// Two-column fixture: `A:Int64[1..=6]`, `B:Float64[1.5, 2.0, .., 6.0]`.
pub fn fixture_numeric_frame() -> Result<DataFrame, FrameError> {
    DataFrame::new(vec![
        Series::new("A", vec![1_i64, 2, 3, 4, 5, 6]),
        Series::new("B", vec![1.5, 2.0, 3.5, 4.0, 5.5, 6.0]),
    ])
}

/// Fixture covering all four kinds, with duplicate keys in `group`.
pub fn fixture_mixed_frame() -> Result<DataFrame, FrameError> {
    DataFrame::new(vec![
        Series::new("group", vec![2_i64, 1, 2, 1, 3]),
        Series::new("weight", vec![0.25, 1.0, 0.75, 0.5, 2.0]),
        Series::new("active", vec![true, false, true, true, false]),
        Series::new("label", SeriesData::from(vec!["e", "b", "c", "a", "d"])),
    ])
}
