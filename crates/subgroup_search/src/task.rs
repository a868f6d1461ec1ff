use std::collections::HashSet;

use polars::prelude::*;
use thiserror::Error;

use crate::conf::DEFAULT_MIN_QUALITY;
use crate::quality::QualityMeasure;
use crate::result_set::ScoredSubgroup;
use crate::selectors::Selector;
use crate::target::Target;

/// Fatal configuration or evaluation errors. Configuration problems
/// are reported before any search executes; they are never retried.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search depth must be at least 1, got {0}")]
    DepthTooSmall(usize),
    #[error("result set size must be at least 1")]
    EmptyResultSet,
    #[error("search space must contain at least one selector")]
    EmptySearchSpace,
    #[error("beam width ({beam_width}) must be at least the result set size ({result_set_size})")]
    BeamWidthTooSmall {
        beam_width: usize,
        result_set_size: usize,
    },
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Immutable configuration for one search invocation.
///
/// The dataset is only ever read; selectors, target and quality measure
/// are shared read-only across the whole search.
#[derive(Clone, Debug)]
pub struct SubgroupDiscoveryTask {
    pub data: DataFrame,
    pub target: Target,
    /// Ordered selector library; candidate enumeration follows this order.
    pub search_space: Vec<Selector>,
    pub quality: QualityMeasure,
    pub result_set_size: usize,
    /// Maximum conjunction length.
    pub depth: usize,
    pub min_quality: f64,
    /// Numeric column of row weights; absent means unit weights.
    pub weighting_attribute: Option<String>,
}

impl SubgroupDiscoveryTask {
    pub fn new(
        data: DataFrame,
        target: Target,
        search_space: Vec<Selector>,
        quality: QualityMeasure,
        result_set_size: usize,
        depth: usize,
    ) -> Result<Self, SearchError> {
        if depth < 1 {
            return Err(SearchError::DepthTooSmall(depth));
        }
        if result_set_size < 1 {
            return Err(SearchError::EmptyResultSet);
        }
        if search_space.is_empty() {
            return Err(SearchError::EmptySearchSpace);
        }
        debug_assert!(
            search_space.iter().collect::<HashSet<_>>().len() == search_space.len(),
            "duplicate selectors in search space"
        );
        Ok(Self {
            data,
            target,
            search_space,
            quality,
            result_set_size,
            depth,
            min_quality: DEFAULT_MIN_QUALITY,
            weighting_attribute: None,
        })
    }

    pub fn with_min_quality(mut self, min_quality: f64) -> Self {
        self.min_quality = min_quality;
        self
    }

    pub fn with_weighting_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.weighting_attribute = Some(attribute.into());
        self
    }
}

/// Common contract of all search strategies: a task in, the
/// quality-descending top-k out.
pub trait SubgroupSearchAlgorithm {
    fn execute(&self, task: &SubgroupDiscoveryTask) -> Result<Vec<ScoredSubgroup>, SearchError>;
}
