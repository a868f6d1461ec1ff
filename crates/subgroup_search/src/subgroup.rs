use core::fmt;
use std::cell::OnceCell;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use itertools::Itertools;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::dataframe::SdDataFrameExt;
use crate::selectors::Selector;
use crate::target::Target;
use crate::task::SubgroupDiscoveryTask;

/// Weighted coverage statistics of one subgroup against the dataset.
///
/// For a binary target the two `positives` fields hold weighted positive
/// counts; for a numeric target they hold weighted target sums, so the
/// subgroup mean is `subgroup_positives / subgroup_size`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubgroupStatistics {
    pub population_size: f64,
    pub population_positives: f64,
    pub subgroup_size: f64,
    pub subgroup_positives: f64,
}

impl SubgroupStatistics {
    /// Share of positives in the population, zero when degenerate.
    pub fn population_rate(&self) -> f64 {
        if self.population_size <= 0.0 {
            0.0
        } else {
            self.population_positives / self.population_size
        }
    }

    /// Share of positives inside the subgroup, zero when degenerate.
    pub fn subgroup_rate(&self) -> f64 {
        if self.subgroup_size <= 0.0 {
            0.0
        } else {
            self.subgroup_positives / self.subgroup_size
        }
    }
}

/// Conjunction of selectors describing a subgroup.
///
/// Construction order is preserved for display, but equality, hashing
/// and ordering go by selector *set*: two descriptions built from the
/// same selectors in different order compare equal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubgroupDescription {
    selectors: Vec<Selector>,
}

impl SubgroupDescription {
    pub fn empty() -> Self {
        Self {
            selectors: Vec::new(),
        }
    }

    /// Builds a description, dropping duplicate selectors (first
    /// occurrence wins).
    pub fn new(selectors: Vec<Selector>) -> Self {
        let mut unique: Vec<Selector> = Vec::with_capacity(selectors.len());
        for selector in selectors {
            if !unique.contains(&selector) {
                unique.push(selector);
            }
        }
        Self { selectors: unique }
    }

    pub(crate) fn from_search_space(search_space: &[Selector], indices: &[usize]) -> Self {
        Self {
            selectors: indices.iter().map(|&i| search_space[i].clone()).collect(),
        }
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn contains(&self, selector: &Selector) -> bool {
        self.selectors.contains(selector)
    }

    /// New description with `selector` appended.
    pub fn refined_with(&self, selector: Selector) -> Self {
        debug_assert!(
            !self.contains(&selector),
            "refinement selector already present in description"
        );
        let mut selectors = self.selectors.clone();
        selectors.push(selector);
        Self { selectors }
    }

    fn canonical(&self) -> Vec<&Selector> {
        self.selectors.iter().sorted().collect()
    }

    /// Conjunction of all selector masks; the empty description covers
    /// every row.
    pub fn covers(&self, data: &DataFrame) -> PolarsResult<Vec<bool>> {
        let mut mask = vec![true; data.height()];
        for selector in &self.selectors {
            let selector_mask = selector.covers(data)?;
            for (slot, hit) in mask.iter_mut().zip(selector_mask) {
                *slot = *slot && hit;
            }
        }
        Ok(mask)
    }
}

impl PartialEq for SubgroupDescription {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for SubgroupDescription {}

impl Hash for SubgroupDescription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for selector in self.canonical() {
            selector.hash(state);
        }
    }
}

impl PartialOrd for SubgroupDescription {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SubgroupDescription {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical().cmp(&other.canonical())
    }
}

impl fmt::Display for SubgroupDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.selectors.is_empty() {
            return write!(f, "true");
        }
        let parts: Vec<String> = self.selectors.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", parts.join(" AND "))
    }
}

/// A target paired with a description. Statistics are computed on
/// demand against the task's dataset and cached; once computed they are
/// never mutated.
#[derive(Debug)]
pub struct Subgroup {
    target: Target,
    description: SubgroupDescription,
    statistics: OnceCell<SubgroupStatistics>,
}

impl Subgroup {
    pub fn new(target: Target, description: SubgroupDescription) -> Self {
        Self {
            target,
            description,
            statistics: OnceCell::new(),
        }
    }

    /// Subgroup whose statistics were already derived by a search
    /// algorithm; the cache is pre-seeded so they are never recomputed.
    pub fn with_statistics(
        target: Target,
        description: SubgroupDescription,
        statistics: SubgroupStatistics,
    ) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(statistics);
        Self {
            target,
            description,
            statistics: cell,
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn description(&self) -> &SubgroupDescription {
        &self.description
    }

    /// Cached statistics, if already derived.
    pub fn cached_statistics(&self) -> Option<&SubgroupStatistics> {
        self.statistics.get()
    }

    /// Coverage statistics against the task's dataset, computed once
    /// per instance.
    pub fn statistics(&self, task: &SubgroupDiscoveryTask) -> PolarsResult<&SubgroupStatistics> {
        if let Some(statistics) = self.statistics.get() {
            return Ok(statistics);
        }
        let weights = task
            .data
            .sample_weights(task.weighting_attribute.as_deref())?;
        let contributions = task.target.contributions(&task.data)?;
        let mask = self.description.covers(&task.data)?;

        let mut statistics = SubgroupStatistics {
            population_size: 0.0,
            population_positives: 0.0,
            subgroup_size: 0.0,
            subgroup_positives: 0.0,
        };
        for ((weight, contribution), covered) in
            weights.iter().zip(contributions.iter()).zip(mask.iter())
        {
            statistics.population_size += weight;
            statistics.population_positives += weight * contribution;
            if *covered {
                statistics.subgroup_size += weight;
                statistics.subgroup_positives += weight * contribution;
            }
        }
        Ok(self.statistics.get_or_init(|| statistics))
    }
}

impl Clone for Subgroup {
    fn clone(&self) -> Self {
        let cell = OnceCell::new();
        if let Some(statistics) = self.statistics.get() {
            let _ = cell.set(statistics.clone());
        }
        Self {
            target: self.target.clone(),
            description: self.description.clone(),
            statistics: cell,
        }
    }
}

impl PartialEq for Subgroup {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target && self.description == other.description
    }
}

impl Eq for Subgroup {}

impl fmt::Display for Subgroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}
