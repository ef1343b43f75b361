#![forbid(unsafe_code)]

use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

use cf_types::{DType, Kind, common_kind};
use log::trace;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithmeticOp {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColumnError {
    #[error("cannot erase from an empty column")]
    EmptyArray,
    #[error("position {position} out of range for column of length {len}")]
    PositionOutOfRange { position: usize, len: usize },
    #[error("expected a value of kind {expected} but found {found}")]
    InvalidType { expected: Kind, found: Kind },
    #[error("column length mismatch: left={left}, right={right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("unsupported operation: {left} {op} {right}")]
    UnsupportedOperation {
        op: ArithmeticOp,
        left: Kind,
        right: Kind,
    },
    #[error("integer division by zero at position {position}")]
    DivisionByZero { position: usize },
    #[error("not a permutation of 0..{len}")]
    InvalidPermutation { len: usize },
}

/// Typed storage behind a column: one homogeneous vector per element kind.
///
/// The variant never changes in place. Operations that produce a different
/// kind (arithmetic promotion) return a new `SeriesData`.
///
/// Equality agrees with [`DType`]: floats compare by total order, so a column
/// holding `NaN` equals its own clone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum SeriesData {
    Int64(Vec<i64>),
    Float64(Vec<f64>),
    Bool(Vec<bool>),
    Utf8(Vec<String>),
}

impl PartialEq for SeriesData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => {
                l.len() == r.len() && l.iter().zip(r).all(|(a, b)| a.total_cmp(b).is_eq())
            }
            (Self::Bool(l), Self::Bool(r)) => l == r,
            (Self::Utf8(l), Self::Utf8(r)) => l == r,
            _ => false,
        }
    }
}

impl From<Vec<i64>> for SeriesData {
    fn from(values: Vec<i64>) -> Self {
        Self::Int64(values)
    }
}

impl From<Vec<f64>> for SeriesData {
    fn from(values: Vec<f64>) -> Self {
        Self::Float64(values)
    }
}

impl From<Vec<bool>> for SeriesData {
    fn from(values: Vec<bool>) -> Self {
        Self::Bool(values)
    }
}

impl From<Vec<String>> for SeriesData {
    fn from(values: Vec<String>) -> Self {
        Self::Utf8(values)
    }
}

impl From<Vec<&str>> for SeriesData {
    fn from(values: Vec<&str>) -> Self {
        Self::Utf8(values.into_iter().map(str::to_owned).collect())
    }
}

/// Stable ascending order of `values` under `cmp`.
fn stable_order<T>(values: &[T], cmp: impl Fn(&T, &T) -> Ordering) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| cmp(&values[a], &values[b]));
    order
}

fn permute<T: Clone>(values: &mut Vec<T>, perm: &[usize]) {
    *values = perm.iter().map(|&i| values[i].clone()).collect();
}

fn gather<T: Clone>(values: &[T], positions: &[usize]) -> Result<Vec<T>, ColumnError> {
    positions
        .iter()
        .map(|&position| {
            values
                .get(position)
                .cloned()
                .ok_or(ColumnError::PositionOutOfRange {
                    position,
                    len: values.len(),
                })
        })
        .collect()
}

fn concat<T: Clone>(left: &[T], right: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    out.extend_from_slice(left);
    out.extend_from_slice(right);
    out
}

fn binary_f64(left: &[f64], right: &[f64], op: ArithmeticOp) -> Vec<f64> {
    let apply: fn(f64, f64) -> f64 = match op {
        ArithmeticOp::Add => |a, b| a + b,
        ArithmeticOp::Sub => |a, b| a - b,
        ArithmeticOp::Mul => |a, b| a * b,
        ArithmeticOp::Div => |a, b| a / b,
    };
    left.iter().zip(right).map(|(&l, &r)| apply(l, r)).collect()
}

fn binary_i64(left: &[i64], right: &[i64], op: ArithmeticOp) -> Result<Vec<i64>, ColumnError> {
    left.iter()
        .zip(right)
        .enumerate()
        .map(|(position, (&l, &r))| match op {
            ArithmeticOp::Add => Ok(l.wrapping_add(r)),
            ArithmeticOp::Sub => Ok(l.wrapping_sub(r)),
            ArithmeticOp::Mul => Ok(l.wrapping_mul(r)),
            ArithmeticOp::Div => {
                if r == 0 {
                    Err(ColumnError::DivisionByZero { position })
                } else {
                    Ok(l.wrapping_div(r))
                }
            }
        })
        .collect()
}

fn widen(values: &[i64]) -> Vec<f64> {
    values.iter().map(|&v| v as f64).collect()
}

impl SeriesData {
    /// Empty storage of the given kind.
    #[must_use]
    pub fn empty(kind: Kind) -> Self {
        match kind {
            Kind::Int64 => Self::Int64(Vec::new()),
            Kind::Float64 => Self::Float64(Vec::new()),
            Kind::Bool => Self::Bool(Vec::new()),
            Kind::Utf8 => Self::Utf8(Vec::new()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Int64(_) => Kind::Int64,
            Self::Float64(_) => Kind::Float64,
            Self::Bool(_) => Kind::Bool,
            Self::Utf8(_) => Kind::Utf8,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Int64(v) => v.len(),
            Self::Float64(v) => v.len(),
            Self::Bool(v) => v.len(),
            Self::Utf8(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<DType> {
        match self {
            Self::Int64(v) => v.get(position).copied().map(DType::Int64),
            Self::Float64(v) => v.get(position).copied().map(DType::Float64),
            Self::Bool(v) => v.get(position).copied().map(DType::Bool),
            Self::Utf8(v) => v.get(position).cloned().map(DType::Utf8),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = DType> + '_ {
        (0..self.len()).filter_map(|position| self.get(position))
    }

    /// Fails with `InvalidType` unless `value` has this column's kind.
    pub fn check_kind(&self, value: &DType) -> Result<(), ColumnError> {
        if value.kind() == self.kind() {
            Ok(())
        } else {
            Err(ColumnError::InvalidType {
                expected: self.kind(),
                found: value.kind(),
            })
        }
    }

    pub fn push(&mut self, value: DType) -> Result<(), ColumnError> {
        match (self, value) {
            (Self::Int64(v), DType::Int64(x)) => v.push(x),
            (Self::Float64(v), DType::Float64(x)) => v.push(x),
            (Self::Bool(v), DType::Bool(x)) => v.push(x),
            (Self::Utf8(v), DType::Utf8(x)) => v.push(x),
            (this, value) => {
                return Err(ColumnError::InvalidType {
                    expected: this.kind(),
                    found: value.kind(),
                });
            }
        }
        Ok(())
    }

    /// Remove the element at `position`, shifting later elements down.
    pub fn erase(&mut self, position: usize) -> Result<(), ColumnError> {
        let len = self.len();
        if len == 0 {
            return Err(ColumnError::EmptyArray);
        }
        if position >= len {
            return Err(ColumnError::PositionOutOfRange { position, len });
        }
        match self {
            Self::Int64(v) => {
                v.remove(position);
            }
            Self::Float64(v) => {
                v.remove(position);
            }
            Self::Bool(v) => {
                v.remove(position);
            }
            Self::Utf8(v) => {
                v.remove(position);
            }
        }
        Ok(())
    }

    /// Sort ascending in place by natural order.
    pub fn sort(&mut self) {
        match self {
            Self::Int64(v) => v.sort(),
            Self::Float64(v) => v.sort_by(f64::total_cmp),
            Self::Bool(v) => v.sort(),
            Self::Utf8(v) => v.sort(),
        }
    }

    /// Permutation that stable-sorts this column ascending, reversed as a
    /// whole when `descending` is set. The column is left untouched.
    ///
    /// Reversing the ascending order means equal keys come out in reverse
    /// original order under `descending`, unlike a stable descending sort.
    #[must_use]
    pub fn argsort_permutation(&self, descending: bool) -> Vec<usize> {
        let mut order = match self {
            Self::Int64(v) => stable_order(v, Ord::cmp),
            Self::Float64(v) => stable_order(v, f64::total_cmp),
            Self::Bool(v) => stable_order(v, Ord::cmp),
            Self::Utf8(v) => stable_order(v, Ord::cmp),
        };
        if descending {
            order.reverse();
        }
        order
    }

    /// Sort this column with [`Self::argsort_permutation`] and return the
    /// permutation that was applied.
    pub fn argsort(&mut self, descending: bool) -> Vec<usize> {
        let order = self.argsort_permutation(descending);
        self.permute_unchecked(&order);
        order
    }

    /// Reorder so that `new[i] == old[perm[i]]`.
    ///
    /// `perm` is validated before any element moves.
    pub fn apply_permutation(&mut self, perm: &[usize]) -> Result<(), ColumnError> {
        validate_permutation(perm, self.len())?;
        self.permute_unchecked(perm);
        Ok(())
    }

    fn permute_unchecked(&mut self, perm: &[usize]) {
        match self {
            Self::Int64(v) => permute(v, perm),
            Self::Float64(v) => permute(v, perm),
            Self::Bool(v) => permute(v, perm),
            Self::Utf8(v) => permute(v, perm),
        }
    }

    /// New storage holding the elements at `positions`, in that order.
    pub fn take(&self, positions: &[usize]) -> Result<Self, ColumnError> {
        Ok(match self {
            Self::Int64(v) => Self::Int64(gather(v, positions)?),
            Self::Float64(v) => Self::Float64(gather(v, positions)?),
            Self::Bool(v) => Self::Bool(gather(v, positions)?),
            Self::Utf8(v) => Self::Utf8(gather(v, positions)?),
        })
    }

    pub fn slice(&self, range: Range<usize>) -> Result<Self, ColumnError> {
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(ColumnError::PositionOutOfRange {
                position: range.end.max(range.start),
                len,
            });
        }
        Ok(match self {
            Self::Int64(v) => Self::Int64(v[range].to_vec()),
            Self::Float64(v) => Self::Float64(v[range].to_vec()),
            Self::Bool(v) => Self::Bool(v[range].to_vec()),
            Self::Utf8(v) => Self::Utf8(v[range].to_vec()),
        })
    }

    /// Concatenate two columns of the same kind.
    pub fn merge(&self, other: &Self) -> Result<Self, ColumnError> {
        Ok(match (self, other) {
            (Self::Int64(l), Self::Int64(r)) => Self::Int64(concat(l, r)),
            (Self::Float64(l), Self::Float64(r)) => Self::Float64(concat(l, r)),
            (Self::Bool(l), Self::Bool(r)) => Self::Bool(concat(l, r)),
            (Self::Utf8(l), Self::Utf8(r)) => Self::Utf8(concat(l, r)),
            _ => {
                return Err(ColumnError::InvalidType {
                    expected: self.kind(),
                    found: other.kind(),
                });
            }
        })
    }

    /// Elementwise arithmetic with int→float promotion.
    ///
    /// `Utf8 + Utf8` concatenates the two sequences instead of working
    /// elementwise. Every other pairing involving `Bool` or `Utf8` fails with
    /// `UnsupportedOperation`.
    pub fn binary(&self, other: &Self, op: ArithmeticOp) -> Result<Self, ColumnError> {
        if let (Self::Utf8(l), Self::Utf8(r), ArithmeticOp::Add) = (self, other, op) {
            return Ok(Self::Utf8(concat(l, r)));
        }

        let out_kind =
            common_kind(self.kind(), other.kind()).map_err(|_| ColumnError::UnsupportedOperation {
                op,
                left: self.kind(),
                right: other.kind(),
            })?;

        if self.len() != other.len() {
            return Err(ColumnError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }

        trace!(
            "binary {} {op} {} -> {out_kind} over {} rows",
            self.kind(),
            other.kind(),
            self.len()
        );

        let out = match (self, other) {
            (Self::Int64(l), Self::Int64(r)) => Self::Int64(binary_i64(l, r, op)?),
            (Self::Float64(l), Self::Float64(r)) => Self::Float64(binary_f64(l, r, op)),
            (Self::Int64(l), Self::Float64(r)) => Self::Float64(binary_f64(&widen(l), r, op)),
            (Self::Float64(l), Self::Int64(r)) => Self::Float64(binary_f64(l, &widen(r), op)),
            _ => {
                return Err(ColumnError::UnsupportedOperation {
                    op,
                    left: self.kind(),
                    right: other.kind(),
                });
            }
        };
        Ok(out)
    }

    pub fn add(&self, other: &Self) -> Result<Self, ColumnError> {
        self.binary(other, ArithmeticOp::Add)
    }

    pub fn sub(&self, other: &Self) -> Result<Self, ColumnError> {
        self.binary(other, ArithmeticOp::Sub)
    }

    pub fn mul(&self, other: &Self) -> Result<Self, ColumnError> {
        self.binary(other, ArithmeticOp::Mul)
    }

    pub fn div(&self, other: &Self) -> Result<Self, ColumnError> {
        self.binary(other, ArithmeticOp::Div)
    }
}

/// Check that `perm` holds every position in `0..len` exactly once.
pub fn validate_permutation(perm: &[usize], len: usize) -> Result<(), ColumnError> {
    if perm.len() != len {
        return Err(ColumnError::InvalidPermutation { len });
    }
    let mut seen = vec![false; len];
    for &position in perm {
        match seen.get_mut(position) {
            Some(slot) if !*slot => *slot = true,
            _ => return Err(ColumnError::InvalidPermutation { len }),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use cf_types::{DType, Kind};

    use super::{ArithmeticOp, ColumnError, SeriesData, validate_permutation};

    #[test]
    fn erase_shifts_later_elements_down() {
        let mut data = SeriesData::from(vec![10_i64, 20, 30]);
        data.erase(1).expect("erase");
        assert_eq!(data, SeriesData::Int64(vec![10, 30]));
    }

    #[test]
    fn erase_on_empty_column_fails() {
        let mut data = SeriesData::empty(Kind::Utf8);
        assert_eq!(data.erase(0).expect_err("empty"), ColumnError::EmptyArray);
    }

    #[test]
    fn erase_past_end_fails_without_panicking() {
        let mut data = SeriesData::from(vec![true]);
        assert_eq!(
            data.erase(3).expect_err("out of range"),
            ColumnError::PositionOutOfRange {
                position: 3,
                len: 1
            }
        );
    }

    #[test]
    fn sort_uses_natural_order_per_kind() {
        let mut ints = SeriesData::from(vec![3_i64, -1, 2]);
        ints.sort();
        assert_eq!(ints, SeriesData::Int64(vec![-1, 2, 3]));

        let mut bools = SeriesData::from(vec![true, false, true]);
        bools.sort();
        assert_eq!(bools, SeriesData::Bool(vec![false, true, true]));

        let mut text = SeriesData::from(vec!["pear", "apple", "fig"]);
        text.sort();
        assert_eq!(text, SeriesData::from(vec!["apple", "fig", "pear"]));

        let mut floats = SeriesData::from(vec![2.5, -0.5, 1.0]);
        floats.sort();
        assert_eq!(floats, SeriesData::Float64(vec![-0.5, 1.0, 2.5]));
    }

    #[test]
    fn argsort_sorts_in_place_and_returns_permutation() {
        let mut data = SeriesData::from(vec![30_i64, 10, 20]);
        let perm = data.argsort(false);
        assert_eq!(perm, vec![1, 2, 0]);
        assert_eq!(data, SeriesData::Int64(vec![10, 20, 30]));
    }

    #[test]
    fn descending_argsort_reverses_stable_ascending_order() {
        // keys: b=1 at 0, a=0 at 1, b=1 at 2, a=0 at 3
        let data = SeriesData::from(vec![1_i64, 0, 1, 0]);
        assert_eq!(data.argsort_permutation(false), vec![1, 3, 0, 2]);
        // Ties come out in reverse original order.
        assert_eq!(data.argsort_permutation(true), vec![2, 0, 3, 1]);
    }

    #[test]
    fn argsort_permutation_leaves_column_untouched() {
        let data = SeriesData::from(vec!["b", "a"]);
        assert_eq!(data.argsort_permutation(false), vec![1, 0]);
        assert_eq!(data, SeriesData::from(vec!["b", "a"]));
    }

    #[test]
    fn apply_permutation_reorders_by_source_position() {
        let mut data = SeriesData::from(vec!["x", "y", "z"]);
        data.apply_permutation(&[2, 0, 1]).expect("valid permutation");
        assert_eq!(data, SeriesData::from(vec!["z", "x", "y"]));
    }

    #[test]
    fn apply_permutation_rejects_duplicates_without_mutating() {
        let mut data = SeriesData::from(vec![1.0, 2.0]);
        let err = data.apply_permutation(&[0, 0]).expect_err("duplicate");
        assert_eq!(err, ColumnError::InvalidPermutation { len: 2 });
        assert_eq!(data, SeriesData::Float64(vec![1.0, 2.0]));
        assert!(validate_permutation(&[0], 2).is_err());
        assert!(validate_permutation(&[1, 2], 2).is_err());
    }

    #[test]
    fn push_rejects_wrong_kind() {
        let mut data = SeriesData::from(vec![1_i64]);
        data.push(DType::Int64(2)).expect("same kind");
        let err = data.push(DType::Float64(3.0)).expect_err("kind mismatch");
        assert_eq!(
            err,
            ColumnError::InvalidType {
                expected: Kind::Int64,
                found: Kind::Float64
            }
        );
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn mixed_arithmetic_promotes_to_float() {
        let floats = SeriesData::from(vec![1.5, 2.0, 3.5]);
        let ints = SeriesData::from(vec![4_i64, 5, 6]);
        assert_eq!(
            floats.add(&ints).expect("add"),
            SeriesData::Float64(vec![5.5, 7.0, 9.5])
        );
        assert_eq!(
            ints.sub(&floats).expect("sub"),
            SeriesData::Float64(vec![2.5, 3.0, 2.5])
        );
    }

    #[test]
    fn integer_arithmetic_stays_integer() {
        let left = SeriesData::from(vec![7_i64, 9]);
        let right = SeriesData::from(vec![2_i64, 3]);
        assert_eq!(left.mul(&right).expect("mul"), SeriesData::Int64(vec![14, 27]));
        assert_eq!(left.div(&right).expect("div"), SeriesData::Int64(vec![3, 3]));
    }

    #[test]
    fn integer_division_by_zero_fails() {
        let left = SeriesData::from(vec![1_i64, 2]);
        let right = SeriesData::from(vec![1_i64, 0]);
        assert_eq!(
            left.div(&right).expect_err("zero divisor"),
            ColumnError::DivisionByZero { position: 1 }
        );
    }

    #[test]
    fn string_add_concatenates_sequences() {
        let left = SeriesData::from(vec!["a", "b"]);
        let right = SeriesData::from(vec!["c"]);
        let out = left.add(&right).expect("concat");
        assert_eq!(out, SeriesData::from(vec!["a", "b", "c"]));
        assert_eq!(out.len(), left.len() + right.len());
    }

    #[test]
    fn unsupported_kind_pairs_fail() {
        let text = SeriesData::from(vec!["a"]);
        let bools = SeriesData::from(vec![true]);
        let ints = SeriesData::from(vec![1_i64]);

        assert_eq!(
            text.sub(&text).expect_err("text sub"),
            ColumnError::UnsupportedOperation {
                op: ArithmeticOp::Sub,
                left: Kind::Utf8,
                right: Kind::Utf8
            }
        );
        assert!(bools.add(&bools).is_err());
        assert!(ints.add(&text).is_err());
        assert!(bools.mul(&ints).is_err());
    }

    #[test]
    fn elementwise_ops_require_equal_lengths() {
        let left = SeriesData::from(vec![1_i64, 2]);
        let right = SeriesData::from(vec![1_i64]);
        assert_eq!(
            left.add(&right).expect_err("lengths differ"),
            ColumnError::LengthMismatch { left: 2, right: 1 }
        );
    }

    #[test]
    fn merge_concatenates_every_kind() {
        let merged = SeriesData::from(vec![true])
            .merge(&SeriesData::from(vec![false, true]))
            .expect("merge");
        assert_eq!(merged, SeriesData::Bool(vec![true, false, true]));

        let err = SeriesData::from(vec![1_i64])
            .merge(&SeriesData::from(vec![1.0]))
            .expect_err("kinds differ");
        assert_eq!(
            err,
            ColumnError::InvalidType {
                expected: Kind::Int64,
                found: Kind::Float64
            }
        );
    }

    #[test]
    fn take_and_slice_copy_selected_rows() {
        let data = SeriesData::from(vec![10_i64, 20, 30, 40]);
        assert_eq!(data.take(&[3, 1]).expect("take"), SeriesData::Int64(vec![40, 20]));
        assert_eq!(data.slice(1..3).expect("slice"), SeriesData::Int64(vec![20, 30]));
        assert!(data.take(&[4]).is_err());
        assert!(data.slice(2..5).is_err());
    }

    #[test]
    fn get_and_iter_yield_tagged_values() {
        let data = SeriesData::from(vec![0.5, 1.5]);
        assert_eq!(data.get(1), Some(DType::Float64(1.5)));
        assert_eq!(data.get(2), None);
        assert_eq!(
            data.iter().collect::<Vec<_>>(),
            vec![DType::Float64(0.5), DType::Float64(1.5)]
        );
    }

    #[test]
    fn storage_serializes_with_kind_tag() {
        let data = SeriesData::from(vec!["a", "b"]);
        let json = serde_json::to_string(&data).expect("serialize");
        assert_eq!(json, r#"{"kind":"utf8","values":["a","b"]}"#);
        let back: SeriesData = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, data);
    }

    #[test]
    fn mixed_mul_and_div_promote_to_float() {
        let ints = SeriesData::from(vec![3_i64, 5]);
        let floats = SeriesData::from(vec![0.5, 2.0]);
        assert_eq!(
            ints.mul(&floats).expect("mul"),
            SeriesData::Float64(vec![1.5, 10.0])
        );
        assert_eq!(
            floats.div(&ints).expect("div"),
            SeriesData::Float64(vec![0.5 / 3.0, 0.4])
        );
    }

    #[test]
    fn float_division_by_zero_follows_ieee() {
        let left = SeriesData::from(vec![1.0, -2.0]);
        let right = SeriesData::from(vec![0_i64, 0]);
        assert_eq!(
            left.div(&right).expect("float division never fails"),
            SeriesData::Float64(vec![f64::INFINITY, f64::NEG_INFINITY])
        );
    }

    #[test]
    fn nan_columns_equal_their_clone() {
        let data = SeriesData::from(vec![f64::NAN, 1.0]);
        assert_eq!(data.clone(), data);
        assert_ne!(data, SeriesData::from(vec![f64::NAN, 2.0]));
        assert_ne!(data, SeriesData::from(vec![f64::NAN]));
        assert_ne!(SeriesData::from(vec![1_i64]), SeriesData::from(vec![1.0]));
    }
}
