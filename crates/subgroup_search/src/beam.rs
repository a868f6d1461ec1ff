use std::collections::HashMap;

use log::debug;

use crate::coverage::MaskEvaluator;
use crate::result_set::{ScoredSubgroup, SubgroupResultSet};
use crate::selectors::Selector;
use crate::subgroup::{Subgroup, SubgroupDescription};
use crate::task::{SearchError, SubgroupDiscoveryTask, SubgroupSearchAlgorithm};

/// Fixed-width greedy level search.
///
/// The beam holds up to `beam_width` scored subgroups under the same
/// admission policy as the result set. Each level refines every beam
/// member by every selector it does not already contain; duplicates
/// (by selector set) are checked before admission. The search stops at
/// the depth bound or when a level leaves the beam unchanged.
///
/// Unlike the other strategies this is a heuristic: even with an
/// admissible bound it may miss the true top-k.
pub struct BeamSearch {
    pub beam_width: usize,
}

impl BeamSearch {
    pub fn new(beam_width: usize) -> Self {
        Self { beam_width }
    }
}

impl SubgroupSearchAlgorithm for BeamSearch {
    fn execute(&self, task: &SubgroupDiscoveryTask) -> Result<Vec<ScoredSubgroup>, SearchError> {
        if self.beam_width < task.result_set_size {
            return Err(SearchError::BeamWidthTooSmall {
                beam_width: self.beam_width,
                result_set_size: task.result_set_size,
            });
        }

        let evaluator = MaskEvaluator::build(task)?;
        let index_of: HashMap<Selector, usize> = task
            .search_space
            .iter()
            .enumerate()
            .map(|(index, selector)| (selector.clone(), index))
            .collect();

        let mut beam = SubgroupResultSet::new(self.beam_width);
        // Level 1 refines the empty description; later levels refine
        // the surviving beam members.
        let mut frontier: Vec<Vec<usize>> = vec![Vec::new()];

        for level in 1..=task.depth {
            let mut changed = false;
            for member in &frontier {
                for index in 0..task.search_space.len() {
                    if member.contains(&index) {
                        continue;
                    }
                    let mut indices = member.clone();
                    indices.push(index);
                    let description =
                        SubgroupDescription::from_search_space(&task.search_space, &indices);
                    if beam.contains_description(&description) {
                        continue;
                    }
                    let statistics = evaluator.evaluate(&indices);
                    let quality = task.quality.evaluate(&statistics);
                    let subgroup =
                        Subgroup::with_statistics(task.target.clone(), description, statistics);
                    changed |= beam.add_if_required(quality, subgroup);
                }
            }
            debug!("beam level {}: width {}, changed {}", level, beam.len(), changed);
            if !changed {
                break;
            }
            frontier = beam
                .iter()
                .filter(|entry| entry.subgroup.description().len() < task.depth)
                .map(|entry| {
                    entry
                        .subgroup
                        .description()
                        .selectors()
                        .iter()
                        .map(|selector| index_of[selector])
                        .collect()
                })
                .collect();
            if frontier.is_empty() {
                break;
            }
        }

        let mut sorted = beam.into_sorted_vec();
        sorted.truncate(task.result_set_size);
        Ok(sorted)
    }
}
