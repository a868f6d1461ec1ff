use std::collections::HashSet;

use itertools::Itertools;
use log::debug;

use crate::coverage::MaskEvaluator;
use crate::result_set::{ScoredSubgroup, SubgroupResultSet};
use crate::subgroup::{Subgroup, SubgroupDescription};
use crate::task::{SearchError, SubgroupDiscoveryTask, SubgroupSearchAlgorithm};

/// Level-wise, closure-pruned breadth-first search.
///
/// Level d holds candidate descriptions of exactly d selectors, kept as
/// sorted search-space index vectors. Each level is evaluated against
/// the result set; candidates whose optimistic estimate clears the
/// acceptance threshold form the promising set from which the next
/// level is joined.
pub struct Apriori;

impl SubgroupSearchAlgorithm for Apriori {
    fn execute(&self, task: &SubgroupDiscoveryTask) -> Result<Vec<ScoredSubgroup>, SearchError> {
        let evaluator = MaskEvaluator::build(task)?;
        let mut result = SubgroupResultSet::new(task.result_set_size);

        let mut frontier: Vec<Vec<usize>> =
            (0..task.search_space.len()).map(|index| vec![index]).collect();

        for level in 1..=task.depth {
            let mut scored: Vec<(Vec<usize>, f64)> = Vec::with_capacity(frontier.len());
            for candidate in frontier.drain(..) {
                let statistics = evaluator.evaluate(&candidate);
                let quality = task.quality.evaluate(&statistics);
                let estimate = task.quality.optimistic_estimate(&statistics);
                let subgroup = Subgroup::with_statistics(
                    task.target.clone(),
                    SubgroupDescription::from_search_space(&task.search_space, &candidate),
                    statistics,
                );
                result.add_if_required(quality, subgroup);
                scored.push((candidate, estimate));
            }

            let threshold = result.minimum_required_quality(task.min_quality);
            let promising: Vec<Vec<usize>> = scored
                .into_iter()
                .filter(|(_, estimate)| *estimate > threshold)
                .map(|(candidate, _)| candidate)
                .collect();
            debug!(
                "apriori level {}: {} promising candidates, threshold {}",
                level,
                promising.len(),
                threshold
            );

            if level == task.depth || promising.is_empty() {
                break;
            }
            frontier = join_next_level(&promising);
            if frontier.is_empty() {
                break;
            }
        }

        Ok(result.into_sorted_vec())
    }
}

/// Frequent-itemset join: two promising candidates sharing their whole
/// prefix except the last selector produce one candidate of the next
/// level. The join is followed by the closure check: a candidate is
/// kept only if *every* immediate generalization (drop exactly one
/// selector) is itself promising.
pub fn join_next_level(promising: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let promising_set: HashSet<&[usize]> =
        promising.iter().map(|candidate| candidate.as_slice()).collect();
    let mut next: Vec<Vec<usize>> = Vec::new();
    let mut seen: HashSet<Vec<usize>> = HashSet::new();

    for (a, b) in promising.iter().tuple_combinations() {
        if a[..a.len() - 1] != b[..b.len() - 1] {
            continue;
        }
        let (last_a, last_b) = (a[a.len() - 1], b[b.len() - 1]);
        if last_a == last_b {
            continue;
        }
        let (low, high) = if last_a < last_b {
            (last_a, last_b)
        } else {
            (last_b, last_a)
        };
        let mut candidate = a[..a.len() - 1].to_vec();
        candidate.push(low);
        candidate.push(high);

        let closed = (0..candidate.len()).all(|skip| {
            let generalization: Vec<usize> = candidate
                .iter()
                .enumerate()
                .filter(|(position, _)| *position != skip)
                .map(|(_, &index)| index)
                .collect();
            promising_set.contains(generalization.as_slice())
        });
        if !closed {
            continue;
        }

        debug_assert!(
            !seen.contains(&candidate),
            "candidate generated twice at one level"
        );
        if seen.insert(candidate.clone()) {
            next.push(candidate);
        }
    }
    next
}
