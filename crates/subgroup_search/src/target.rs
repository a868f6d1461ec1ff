use core::fmt;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::dataframe::SdSeriesExt;
use crate::selectors::Selector;

/// The concept a subgroup description is scored against.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// Rows covered by the selector are the positives.
    Binary(Selector),
    /// Numeric attribute; subgroups are scored by how far they shift
    /// its weighted mean.
    Numeric(String),
}

impl Target {
    /// Per-row contribution to the "positives" statistic: 1/0 for a
    /// binary target, the attribute value for a numeric one. Nulls
    /// contribute zero.
    pub fn contributions(&self, data: &DataFrame) -> PolarsResult<Vec<f64>> {
        match self {
            Target::Binary(selector) => Ok(selector
                .covers(data)?
                .into_iter()
                .map(|covered| if covered { 1.0 } else { 0.0 })
                .collect()),
            Target::Numeric(attribute) => {
                let series = data.column(attribute)?.as_materialized_series();
                Ok(series
                    .numeric_values()?
                    .into_iter()
                    .map(|opt| opt.unwrap_or(0.0))
                    .collect())
            }
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Target::Binary(_))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Binary(selector) => write!(f, "{}", selector),
            Target::Numeric(attribute) => write!(f, "mean({})", attribute),
        }
    }
}
