use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use crate::coverage::MaskEvaluator;
use crate::result_set::{ScoredSubgroup, SubgroupResultSet};
use crate::subgroup::{Subgroup, SubgroupDescription, SubgroupStatistics};
use crate::task::{SearchError, SubgroupDiscoveryTask, SubgroupSearchAlgorithm};

// Queue entry keyed by optimistic estimate (max-heap).
struct QueueEntry {
    estimate: f64,
    indices: Vec<usize>,
    statistics: SubgroupStatistics,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.estimate.total_cmp(&other.estimate) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.estimate.total_cmp(&other.estimate)
    }
}

/// Priority-queue branch-and-bound.
///
/// Candidates are popped best-bound-first. As soon as the best queued
/// bound cannot beat the acceptance threshold, nothing remaining can,
/// and the whole search terminates. Refinements append only selectors
/// that come after the candidate's last selector in search-space order,
/// so no conjunction is generated twice.
pub struct BestFirstSearch;

impl SubgroupSearchAlgorithm for BestFirstSearch {
    fn execute(&self, task: &SubgroupDiscoveryTask) -> Result<Vec<ScoredSubgroup>, SearchError> {
        let evaluator = MaskEvaluator::build(task)?;
        let mut result = SubgroupResultSet::new(task.result_set_size);
        let mut queue: BinaryHeap<QueueEntry> = BinaryHeap::new();

        for index in 0..task.search_space.len() {
            let statistics = evaluator.evaluate(&[index]);
            let estimate = task.quality.optimistic_estimate(&statistics);
            queue.push(QueueEntry {
                estimate,
                indices: vec![index],
                statistics,
            });
        }

        while let Some(entry) = queue.pop() {
            if entry.estimate <= result.minimum_required_quality(task.min_quality) {
                debug!(
                    "best-first cutoff: best queued estimate {} below threshold, {} entries dropped",
                    entry.estimate,
                    queue.len() + 1
                );
                break;
            }

            let quality = task.quality.evaluate(&entry.statistics);
            let subgroup = Subgroup::with_statistics(
                task.target.clone(),
                SubgroupDescription::from_search_space(&task.search_space, &entry.indices),
                entry.statistics.clone(),
            );
            result.add_if_required(quality, subgroup);

            // The threshold may have risen with that insertion.
            if entry.indices.len() < task.depth
                && entry.estimate > result.minimum_required_quality(task.min_quality)
            {
                let last = entry.indices[entry.indices.len() - 1];
                for next in last + 1..task.search_space.len() {
                    let mut indices = entry.indices.clone();
                    indices.push(next);
                    let statistics = evaluator.evaluate(&indices);
                    let estimate = task.quality.optimistic_estimate(&statistics);
                    queue.push(QueueEntry {
                        estimate,
                        indices,
                        statistics,
                    });
                }
            }
        }

        Ok(result.into_sorted_vec())
    }
}
