use crate::coverage::{
    BitsetCoverage, CoverageStore, RescanCoverage, TidListCoverage, TidSetCoverage,
};
use crate::result_set::{ScoredSubgroup, SubgroupResultSet};
use crate::subgroup::{Subgroup, SubgroupDescription};
use crate::task::{SearchError, SubgroupDiscoveryTask, SubgroupSearchAlgorithm};

/// Depth-first branch-and-bound that recomputes coverage from the raw
/// dataset at every node. The baseline the accelerated variants must
/// agree with exactly.
pub struct SimpleDfs;

impl SubgroupSearchAlgorithm for SimpleDfs {
    fn execute(&self, task: &SubgroupDiscoveryTask) -> Result<Vec<ScoredSubgroup>, SearchError> {
        let store = RescanCoverage::build(task)?;
        run_dfs(task, &store)
    }
}

/// Depth-first branch-and-bound over precomputed per-selector bitsets:
/// refinement is a bitwise AND, counting a bit population count.
pub struct Bsd;

impl SubgroupSearchAlgorithm for Bsd {
    fn execute(&self, task: &SubgroupDiscoveryTask) -> Result<Vec<ScoredSubgroup>, SearchError> {
        let store = BitsetCoverage::build(task)?;
        run_dfs(task, &store)
    }
}

/// Row-ID representation used by [`TidSd`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TidRepresentation {
    /// Sorted vector, merge intersection.
    #[default]
    SortedList,
    /// Ordered set, set intersection.
    Set,
}

/// Depth-first branch-and-bound over surviving row-ID collections.
/// Behaviorally identical to [`Bsd`]; the representation trades word
/// parallelism for sparsity.
pub struct TidSd {
    pub representation: TidRepresentation,
}

impl TidSd {
    pub fn new(representation: TidRepresentation) -> Self {
        Self { representation }
    }
}

impl Default for TidSd {
    fn default() -> Self {
        Self::new(TidRepresentation::SortedList)
    }
}

impl SubgroupSearchAlgorithm for TidSd {
    fn execute(&self, task: &SubgroupDiscoveryTask) -> Result<Vec<ScoredSubgroup>, SearchError> {
        match self.representation {
            TidRepresentation::SortedList => {
                let store = TidListCoverage::build(task)?;
                run_dfs(task, &store)
            }
            TidRepresentation::Set => {
                let store = TidSetCoverage::build(task)?;
                run_dfs(task, &store)
            }
        }
    }
}

/// Shared recursion of the depth-first family.
fn run_dfs<S: CoverageStore>(
    task: &SubgroupDiscoveryTask,
    store: &S,
) -> Result<Vec<ScoredSubgroup>, SearchError> {
    let mut result = SubgroupResultSet::new(task.result_set_size);
    let root = store.root();
    descend(task, store, &mut result, &[], &root, 0)?;
    Ok(result.into_sorted_vec())
}

/// Extends `prefix` by every selector from `start` on. Each child is
/// evaluated against the result set; its subtree is entered only while
/// the conjunction is short enough and its optimistic estimate clears
/// the acceptance threshold. Prefix vectors are rebuilt per call, no
/// frame is mutated after a recursive call sees it.
fn descend<S: CoverageStore>(
    task: &SubgroupDiscoveryTask,
    store: &S,
    result: &mut SubgroupResultSet,
    prefix: &[usize],
    cov: &S::Cov,
    start: usize,
) -> Result<(), SearchError> {
    for index in start..task.search_space.len() {
        let child_cov = store.refine(cov, index)?;
        let statistics = store.statistics(&child_cov);
        let quality = task.quality.evaluate(&statistics);

        let mut indices = prefix.to_vec();
        indices.push(index);
        let subgroup = Subgroup::with_statistics(
            task.target.clone(),
            SubgroupDescription::from_search_space(&task.search_space, &indices),
            statistics.clone(),
        );
        result.add_if_required(quality, subgroup);

        if indices.len() < task.depth {
            let estimate = task.quality.optimistic_estimate(&statistics);
            if estimate > result.minimum_required_quality(task.min_quality) {
                descend(task, store, result, &indices, &child_cov, index + 1)?;
            }
        }
    }
    Ok(())
}
