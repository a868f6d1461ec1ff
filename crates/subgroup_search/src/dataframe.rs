use polars::prelude::*;

use crate::selectors::SelectorValue;

/// Extension methods for Series used by selector and target evaluation.
pub trait SdSeriesExt {
    /// Values cast to f64, nulls preserved as None.
    fn numeric_values(&self) -> PolarsResult<Vec<Option<f64>>>;

    /// Per-row equality mask against a scalar. Nulls never match.
    fn equals_mask(&self, value: &SelectorValue) -> PolarsResult<Vec<bool>>;

    /// Per-row membership mask for the half-open interval `[low, high)`.
    /// Nulls never match.
    fn interval_mask(&self, low: f64, high: f64) -> PolarsResult<Vec<bool>>;
}

impl SdSeriesExt for Series {
    fn numeric_values(&self) -> PolarsResult<Vec<Option<f64>>> {
        let cast = self.cast(&DataType::Float64)?;
        Ok(cast.f64()?.iter().collect())
    }

    fn equals_mask(&self, value: &SelectorValue) -> PolarsResult<Vec<bool>> {
        match value {
            SelectorValue::Str(v) => Ok(self
                .str()?
                .iter()
                .map(|opt| opt == Some(v.as_str()))
                .collect()),
            SelectorValue::Bool(v) => Ok(self
                .bool()?
                .iter()
                .map(|opt| opt == Some(*v))
                .collect()),
            SelectorValue::Int(v) => {
                let wanted = *v as f64;
                Ok(self
                    .numeric_values()?
                    .into_iter()
                    .map(|opt| opt == Some(wanted))
                    .collect())
            }
            SelectorValue::Float(v) => Ok(self
                .numeric_values()?
                .into_iter()
                .map(|opt| opt == Some(*v))
                .collect()),
        }
    }

    fn interval_mask(&self, low: f64, high: f64) -> PolarsResult<Vec<bool>> {
        Ok(self
            .numeric_values()?
            .into_iter()
            .map(|opt| matches!(opt, Some(x) if x >= low && x < high))
            .collect())
    }
}

/// Extension methods for DataFrame.
pub trait SdDataFrameExt {
    /// Row weights taken from the weighting attribute, or unit weights
    /// when no attribute is configured. Null weights count as zero.
    fn sample_weights(&self, attribute: Option<&str>) -> PolarsResult<Vec<f64>>;
}

impl SdDataFrameExt for DataFrame {
    fn sample_weights(&self, attribute: Option<&str>) -> PolarsResult<Vec<f64>> {
        match attribute {
            None => Ok(vec![1.0; self.height()]),
            Some(name) => {
                let series = self.column(name)?.as_materialized_series();
                Ok(series
                    .numeric_values()?
                    .into_iter()
                    .map(|opt| opt.unwrap_or(0.0))
                    .collect())
            }
        }
    }
}
