use core::fmt;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::dataframe::SdSeriesExt;

/// Scalar constant a selector compares against.
///
/// Floats take part in equality, hashing and ordering through their bit
/// pattern / total order, so selectors can live in hash sets and sorted
/// candidate lists.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SelectorValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl SelectorValue {
    fn rank(&self) -> u8 {
        match self {
            SelectorValue::Str(_) => 0,
            SelectorValue::Bool(_) => 1,
            SelectorValue::Int(_) => 2,
            SelectorValue::Float(_) => 3,
        }
    }
}

impl PartialEq for SelectorValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SelectorValue::Str(a), SelectorValue::Str(b)) => a == b,
            (SelectorValue::Bool(a), SelectorValue::Bool(b)) => a == b,
            (SelectorValue::Int(a), SelectorValue::Int(b)) => a == b,
            (SelectorValue::Float(a), SelectorValue::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for SelectorValue {}

impl Hash for SelectorValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            SelectorValue::Str(v) => v.hash(state),
            SelectorValue::Bool(v) => v.hash(state),
            SelectorValue::Int(v) => v.hash(state),
            SelectorValue::Float(v) => v.to_bits().hash(state),
        }
    }
}

impl PartialOrd for SelectorValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SelectorValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SelectorValue::Str(a), SelectorValue::Str(b)) => a.cmp(b),
            (SelectorValue::Bool(a), SelectorValue::Bool(b)) => a.cmp(b),
            (SelectorValue::Int(a), SelectorValue::Int(b)) => a.cmp(b),
            (SelectorValue::Float(a), SelectorValue::Float(b)) => a.total_cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for SelectorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorValue::Str(v) => write!(f, "{}", v),
            SelectorValue::Bool(v) => write!(f, "{}", v),
            SelectorValue::Int(v) => write!(f, "{}", v),
            SelectorValue::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for SelectorValue {
    fn from(v: &str) -> Self {
        SelectorValue::Str(v.to_string())
    }
}

impl From<String> for SelectorValue {
    fn from(v: String) -> Self {
        SelectorValue::Str(v)
    }
}

impl From<bool> for SelectorValue {
    fn from(v: bool) -> Self {
        SelectorValue::Bool(v)
    }
}

impl From<i64> for SelectorValue {
    fn from(v: i64) -> Self {
        SelectorValue::Int(v)
    }
}

impl From<f64> for SelectorValue {
    fn from(v: f64) -> Self {
        SelectorValue::Float(v)
    }
}

/// -------------------
/// EqualsSelector
/// -------------------
/// Matches rows whose attribute equals a scalar value. Nulls never match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EqualsSelector {
    pub attribute: String,
    pub value: SelectorValue,
}

impl EqualsSelector {
    pub fn new(attribute: impl Into<String>, value: impl Into<SelectorValue>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn covers(&self, data: &DataFrame) -> PolarsResult<Vec<bool>> {
        let series = data.column(&self.attribute)?.as_materialized_series();
        series.equals_mask(&self.value)
    }
}

impl fmt::Display for EqualsSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} == {}", self.attribute, self.value)
    }
}

/// -------------------
/// IntervalSelector
/// -------------------
/// Matches rows whose numeric attribute falls into `[low, high)`.
/// Unbounded ends use infinities. Nulls never match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntervalSelector {
    pub attribute: String,
    pub low: f64,
    pub high: f64,
}

impl IntervalSelector {
    pub fn new(attribute: impl Into<String>, low: f64, high: f64) -> Self {
        Self {
            attribute: attribute.into(),
            low,
            high,
        }
    }

    pub fn less_than(attribute: impl Into<String>, high: f64) -> Self {
        Self::new(attribute, f64::NEG_INFINITY, high)
    }

    pub fn at_least(attribute: impl Into<String>, low: f64) -> Self {
        Self::new(attribute, low, f64::INFINITY)
    }

    pub fn covers(&self, data: &DataFrame) -> PolarsResult<Vec<bool>> {
        let series = data.column(&self.attribute)?.as_materialized_series();
        series.interval_mask(self.low, self.high)
    }
}

impl PartialEq for IntervalSelector {
    fn eq(&self, other: &Self) -> bool {
        self.attribute == other.attribute
            && self.low.to_bits() == other.low.to_bits()
            && self.high.to_bits() == other.high.to_bits()
    }
}

impl Eq for IntervalSelector {}

impl Hash for IntervalSelector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.attribute.hash(state);
        self.low.to_bits().hash(state);
        self.high.to_bits().hash(state);
    }
}

impl PartialOrd for IntervalSelector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IntervalSelector {
    fn cmp(&self, other: &Self) -> Ordering {
        self.attribute
            .cmp(&other.attribute)
            .then_with(|| self.low.total_cmp(&other.low))
            .then_with(|| self.high.total_cmp(&other.high))
    }
}

impl fmt::Display for IntervalSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.low == f64::NEG_INFINITY {
            write!(f, "{} < {}", self.attribute, self.high)
        } else if self.high == f64::INFINITY {
            write!(f, "{} >= {}", self.attribute, self.low)
        } else {
            write!(f, "{} <= {} < {}", self.low, self.attribute, self.high)
        }
    }
}

/// Atomic predicate over one dataset attribute.
///
/// Selectors are hashable and totally ordered so algorithms can keep
/// canonical candidate orderings and perform set-membership checks on
/// generalizations.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Selector {
    Equals(EqualsSelector),
    Interval(IntervalSelector),
}

impl Selector {
    pub fn equals(attribute: impl Into<String>, value: impl Into<SelectorValue>) -> Self {
        Selector::Equals(EqualsSelector::new(attribute, value))
    }

    pub fn between(attribute: impl Into<String>, low: f64, high: f64) -> Self {
        Selector::Interval(IntervalSelector::new(attribute, low, high))
    }

    pub fn less_than(attribute: impl Into<String>, high: f64) -> Self {
        Selector::Interval(IntervalSelector::less_than(attribute, high))
    }

    pub fn at_least(attribute: impl Into<String>, low: f64) -> Self {
        Selector::Interval(IntervalSelector::at_least(attribute, low))
    }

    pub fn attribute(&self) -> &str {
        match self {
            Selector::Equals(s) => &s.attribute,
            Selector::Interval(s) => &s.attribute,
        }
    }

    /// Boolean coverage vector of this selector over the dataset.
    /// Pure and deterministic for a fixed frame.
    pub fn covers(&self, data: &DataFrame) -> PolarsResult<Vec<bool>> {
        match self {
            Selector::Equals(s) => s.covers(data),
            Selector::Interval(s) => s.covers(data),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Equals(s) => write!(f, "{}", s),
            Selector::Interval(s) => write!(f, "{}", s),
        }
    }
}
