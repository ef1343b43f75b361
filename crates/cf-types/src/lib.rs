#![forbid(unsafe_code)]

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Element kind of a column. Every column holds values of exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Int64,
    Float64,
    Bool,
    Utf8,
}

impl Kind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::Utf8 => "utf8",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Int64 => 0,
            Self::Float64 => 1,
            Self::Bool => 2,
            Self::Utf8 => 3,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single cell value, tagged with its kind.
///
/// Values of the same kind compare by their natural order. Floats use IEEE
/// total ordering: `NaN` equals itself, a positive `NaN` sorts after `+inf`
/// and a negative one before `-inf`. Values of different kinds are never
/// equal and order by kind rank only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DType {
    Int64(i64),
    Float64(f64),
    Bool(bool),
    Utf8(String),
}

impl DType {
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Int64(_) => Kind::Int64,
            Self::Float64(_) => Kind::Float64,
            Self::Bool(_) => Kind::Bool,
            Self::Utf8(_) => Kind::Utf8,
        }
    }
}

impl PartialEq for DType {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DType {}

impl PartialOrd for DType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DType {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int64(a), Self::Int64(b)) => a.cmp(b),
            (Self::Float64(a), Self::Float64(b)) => a.total_cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Utf8(a), Self::Utf8(b)) => a.cmp(b),
            _ => self.kind().rank().cmp(&other.kind().rank()),
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Utf8(v) => f.write_str(v),
        }
    }
}

impl From<i64> for DType {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<f64> for DType {
    fn from(value: f64) -> Self {
        Self::Float64(value)
    }
}

impl From<bool> for DType {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for DType {
    fn from(value: &str) -> Self {
        Self::Utf8(value.to_owned())
    }
}

impl From<String> for DType {
    fn from(value: String) -> Self {
        Self::Utf8(value)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("kinds {left} and {right} have no common arithmetic kind")]
    IncompatibleKinds { left: Kind, right: Kind },
}

/// Result kind of elementwise arithmetic between two numeric kinds.
///
/// Integers promote to floats when mixed; booleans and text never take part
/// in arithmetic.
pub fn common_kind(left: Kind, right: Kind) -> Result<Kind, TypeError> {
    use Kind::{Float64, Int64};

    match (left, right) {
        (Int64, Int64) => Ok(Int64),
        (Float64, Float64) | (Int64, Float64) | (Float64, Int64) => Ok(Float64),
        _ => Err(TypeError::IncompatibleKinds { left, right }),
    }
}
