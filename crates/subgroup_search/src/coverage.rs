use std::cmp::Ordering;
use std::collections::BTreeSet;

use bit_set::BitSet;
use polars::prelude::*;

use crate::dataframe::SdDataFrameExt;
use crate::selectors::Selector;
use crate::subgroup::SubgroupStatistics;
use crate::task::SubgroupDiscoveryTask;

/// Evaluated, search-agnostic view of the task's dataset: row weights,
/// per-row target contributions and the population totals every
/// statistics object shares.
pub struct DatasetView {
    weights: Vec<f64>,
    contributions: Vec<f64>,
    pub population_size: f64,
    pub population_positives: f64,
    unit_weights: bool,
    binary_target: bool,
}

impl DatasetView {
    pub fn build(task: &SubgroupDiscoveryTask) -> PolarsResult<Self> {
        let weights = task
            .data
            .sample_weights(task.weighting_attribute.as_deref())?;
        let contributions = task.target.contributions(&task.data)?;
        let population_size = weights.iter().sum();
        let population_positives = weights
            .iter()
            .zip(contributions.iter())
            .map(|(w, t)| w * t)
            .sum();
        Ok(Self {
            population_size,
            population_positives,
            unit_weights: task.weighting_attribute.is_none(),
            binary_target: task.target.is_binary(),
            weights,
            contributions,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.weights.len()
    }

    pub fn statistics(&self, subgroup_size: f64, subgroup_positives: f64) -> SubgroupStatistics {
        SubgroupStatistics {
            population_size: self.population_size,
            population_positives: self.population_positives,
            subgroup_size,
            subgroup_positives,
        }
    }

    /// Bit population counts equal weighted sums only for unit weights
    /// and 0/1 target contributions.
    fn counts_by_popcount(&self) -> bool {
        self.unit_weights && self.binary_target
    }

    /// Weighted (size, positives) over an iterator of covered row ids.
    fn counts_over_rows(&self, rows: impl Iterator<Item = usize>) -> (f64, f64) {
        let mut size = 0.0;
        let mut positives = 0.0;
        for row in rows {
            size += self.weights[row];
            positives += self.weights[row] * self.contributions[row];
        }
        (size, positives)
    }
}

/// Per-selector masks precomputed once; evaluates any index conjunction
/// in a single AND-scan. Used by the level-wise, priority-queue and
/// beam strategies.
pub struct MaskEvaluator {
    pub view: DatasetView,
    masks: Vec<Vec<bool>>,
}

impl MaskEvaluator {
    pub fn build(task: &SubgroupDiscoveryTask) -> PolarsResult<Self> {
        let view = DatasetView::build(task)?;
        let masks = task
            .search_space
            .iter()
            .map(|selector| selector.covers(&task.data))
            .collect::<PolarsResult<Vec<_>>>()?;
        Ok(Self { view, masks })
    }

    /// Statistics of the conjunction of the given search-space indices.
    pub fn evaluate(&self, indices: &[usize]) -> SubgroupStatistics {
        let mut size = 0.0;
        let mut positives = 0.0;
        'rows: for row in 0..self.view.n_rows() {
            for &index in indices {
                if !self.masks[index][row] {
                    continue 'rows;
                }
            }
            size += self.view.weights[row];
            positives += self.view.weights[row] * self.view.contributions[row];
        }
        self.view.statistics(size, positives)
    }
}

/// Incremental coverage representation used by the depth-first family.
///
/// A store narrows the current coverage one selector at a time, so a
/// search node never rescans more than its parent's coverage. The
/// rescanning baseline deliberately ignores this and recomputes.
pub trait CoverageStore {
    type Cov: Clone;

    fn view(&self) -> &DatasetView;

    /// Coverage of the empty conjunction: every row.
    fn root(&self) -> Self::Cov;

    /// Coverage narrowed by search-space selector `index`.
    fn refine(&self, cov: &Self::Cov, index: usize) -> PolarsResult<Self::Cov>;

    /// Weighted (size, positives) of the covered rows.
    fn counts(&self, cov: &Self::Cov) -> (f64, f64);

    fn statistics(&self, cov: &Self::Cov) -> SubgroupStatistics {
        let (size, positives) = self.counts(cov);
        self.view().statistics(size, positives)
    }
}

/// -------------------
/// RescanCoverage
/// -------------------
/// No acceleration: every refinement re-evaluates the selector against
/// the raw dataset.
pub struct RescanCoverage<'a> {
    data: &'a DataFrame,
    search_space: &'a [Selector],
    view: DatasetView,
}

impl<'a> RescanCoverage<'a> {
    pub fn build(task: &'a SubgroupDiscoveryTask) -> PolarsResult<Self> {
        Ok(Self {
            data: &task.data,
            search_space: &task.search_space,
            view: DatasetView::build(task)?,
        })
    }
}

impl CoverageStore for RescanCoverage<'_> {
    type Cov = Vec<bool>;

    fn view(&self) -> &DatasetView {
        &self.view
    }

    fn root(&self) -> Vec<bool> {
        vec![true; self.view.n_rows()]
    }

    fn refine(&self, cov: &Vec<bool>, index: usize) -> PolarsResult<Vec<bool>> {
        let mask = self.search_space[index].covers(self.data)?;
        Ok(cov
            .iter()
            .zip(mask)
            .map(|(covered, hit)| *covered && hit)
            .collect())
    }

    fn counts(&self, cov: &Vec<bool>) -> (f64, f64) {
        self.view.counts_over_rows(
            cov.iter()
                .enumerate()
                .filter(|(_, covered)| **covered)
                .map(|(row, _)| row),
        )
    }
}

/// -------------------
/// BitsetCoverage
/// -------------------
/// One bit per record; refinement is a bitwise AND against the
/// selector's precomputed bitset, counting is a bit population count.
pub struct BitsetCoverage {
    selector_bits: Vec<BitSet>,
    positive_bits: BitSet,
    view: DatasetView,
}

impl BitsetCoverage {
    pub fn build(task: &SubgroupDiscoveryTask) -> PolarsResult<Self> {
        let view = DatasetView::build(task)?;
        let selector_bits = task
            .search_space
            .iter()
            .map(|selector| Ok(bitset_from_mask(&selector.covers(&task.data)?)))
            .collect::<PolarsResult<Vec<_>>>()?;
        let mut positive_bits = BitSet::with_capacity(view.n_rows());
        for (row, contribution) in view.contributions.iter().enumerate() {
            if *contribution != 0.0 {
                positive_bits.insert(row);
            }
        }
        Ok(Self {
            selector_bits,
            positive_bits,
            view,
        })
    }
}

impl CoverageStore for BitsetCoverage {
    type Cov = BitSet;

    fn view(&self) -> &DatasetView {
        &self.view
    }

    fn root(&self) -> BitSet {
        let mut bits = BitSet::with_capacity(self.view.n_rows());
        for row in 0..self.view.n_rows() {
            bits.insert(row);
        }
        bits
    }

    fn refine(&self, cov: &BitSet, index: usize) -> PolarsResult<BitSet> {
        let mut narrowed = cov.clone();
        narrowed.intersect_with(&self.selector_bits[index]);
        Ok(narrowed)
    }

    fn counts(&self, cov: &BitSet) -> (f64, f64) {
        if self.view.counts_by_popcount() {
            let size = cov.len() as f64;
            let positives = cov.intersection(&self.positive_bits).count() as f64;
            (size, positives)
        } else {
            self.view.counts_over_rows(cov.iter())
        }
    }
}

fn bitset_from_mask(mask: &[bool]) -> BitSet {
    let mut bits = BitSet::with_capacity(mask.len());
    for (row, hit) in mask.iter().enumerate() {
        if *hit {
            bits.insert(row);
        }
    }
    bits
}

/// -------------------
/// TidListCoverage
/// -------------------
/// Sorted row-ID lists; refinement is an ordered merge intersection.
/// Wins over bitsets when coverage is sparse.
pub struct TidListCoverage {
    selector_tids: Vec<Vec<u32>>,
    view: DatasetView,
}

impl TidListCoverage {
    pub fn build(task: &SubgroupDiscoveryTask) -> PolarsResult<Self> {
        let view = DatasetView::build(task)?;
        let selector_tids = task
            .search_space
            .iter()
            .map(|selector| Ok(tids_from_mask(&selector.covers(&task.data)?)))
            .collect::<PolarsResult<Vec<_>>>()?;
        Ok(Self { selector_tids, view })
    }
}

impl CoverageStore for TidListCoverage {
    type Cov = Vec<u32>;

    fn view(&self) -> &DatasetView {
        &self.view
    }

    fn root(&self) -> Vec<u32> {
        (0..self.view.n_rows() as u32).collect()
    }

    fn refine(&self, cov: &Vec<u32>, index: usize) -> PolarsResult<Vec<u32>> {
        Ok(intersect_sorted(cov, &self.selector_tids[index]))
    }

    fn counts(&self, cov: &Vec<u32>) -> (f64, f64) {
        self.view
            .counts_over_rows(cov.iter().map(|&row| row as usize))
    }
}

fn tids_from_mask(mask: &[bool]) -> Vec<u32> {
    mask.iter()
        .enumerate()
        .filter(|(_, hit)| **hit)
        .map(|(row, _)| row as u32)
        .collect()
}

/// Two-pointer intersection of sorted ID lists.
pub(crate) fn intersect_sorted(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// -------------------
/// TidSetCoverage
/// -------------------
/// Same row-ID scheme held in ordered sets instead of sorted lists.
pub struct TidSetCoverage {
    selector_tids: Vec<BTreeSet<u32>>,
    view: DatasetView,
}

impl TidSetCoverage {
    pub fn build(task: &SubgroupDiscoveryTask) -> PolarsResult<Self> {
        let view = DatasetView::build(task)?;
        let selector_tids = task
            .search_space
            .iter()
            .map(|selector| {
                let tids: BTreeSet<u32> = tids_from_mask(&selector.covers(&task.data)?)
                    .into_iter()
                    .collect();
                Ok(tids)
            })
            .collect::<PolarsResult<Vec<_>>>()?;
        Ok(Self { selector_tids, view })
    }
}

impl CoverageStore for TidSetCoverage {
    type Cov = BTreeSet<u32>;

    fn view(&self) -> &DatasetView {
        &self.view
    }

    fn root(&self) -> BTreeSet<u32> {
        (0..self.view.n_rows() as u32).collect()
    }

    fn refine(&self, cov: &BTreeSet<u32>, index: usize) -> PolarsResult<BTreeSet<u32>> {
        Ok(cov
            .intersection(&self.selector_tids[index])
            .copied()
            .collect())
    }

    fn counts(&self, cov: &BTreeSet<u32>) -> (f64, f64) {
        self.view
            .counts_over_rows(cov.iter().map(|&row| row as usize))
    }
}
