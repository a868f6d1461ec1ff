//! Integration tests for subgroup_search::beam:
//! - the beam-width configuration error fires before any search
//! - beam results never beat the exhaustive top-k (greedy heuristic)
//! - a beam wide enough to hold every candidate becomes exhaustive

use polars::prelude::*;
use subgroup_search::beam::BeamSearch;
use subgroup_search::dfs::SimpleDfs;
use subgroup_search::quality::{QualityMeasure, StandardQF};
use subgroup_search::selectors::Selector;
use subgroup_search::target::Target;
use subgroup_search::task::{SearchError, SubgroupDiscoveryTask, SubgroupSearchAlgorithm};

fn scenario_df() -> DataFrame {
    let a: Vec<&str> = (0..20).map(|i| if i < 10 { "x" } else { "y" }).collect();
    let b: Vec<&str> = (0..20)
        .map(|i| if (i / 5) % 2 == 0 { "u" } else { "v" })
        .collect();
    let c: Vec<&str> = (0..20).map(|i| if i % 2 == 0 { "p" } else { "q" }).collect();
    let t: Vec<bool> = (0..20).map(|i| i <= 6 || i == 10).collect();
    DataFrame::new_infer_height(vec![
        Series::new(PlSmallStr::from_static("a"), a).into(),
        Series::new(PlSmallStr::from_static("b"), b).into(),
        Series::new(PlSmallStr::from_static("c"), c).into(),
        Series::new(PlSmallStr::from_static("t"), t).into(),
    ])
    .unwrap()
}

fn scenario_task(result_set_size: usize, depth: usize) -> SubgroupDiscoveryTask {
    SubgroupDiscoveryTask::new(
        scenario_df(),
        Target::Binary(Selector::equals("t", true)),
        vec![
            Selector::equals("a", "x"),
            Selector::equals("a", "y"),
            Selector::equals("b", "u"),
            Selector::equals("b", "v"),
            Selector::equals("c", "p"),
            Selector::equals("c", "q"),
        ],
        QualityMeasure::bounded(StandardQF::weighted_relative_accuracy()),
        result_set_size,
        depth,
    )
    .unwrap()
}

/// A beam narrower than the result set is a configuration error,
/// reported before anything is evaluated.
#[test]
fn beam_width_below_result_set_size_is_an_error() {
    let task = scenario_task(5, 2);
    let err = BeamSearch::new(2).execute(&task).unwrap_err();
    assert!(matches!(
        err,
        SearchError::BeamWidthTooSmall {
            beam_width: 2,
            result_set_size: 5,
        }
    ));
}

/// Greedy beam search never returns a better i-th quality than the
/// exhaustive baseline, and respects size and ordering.
#[test]
fn beam_results_never_beat_exhaustive() {
    let task = scenario_task(5, 2);
    let exhaustive = SimpleDfs.execute(&task).unwrap();
    let beam = BeamSearch::new(5).execute(&task).unwrap();

    assert!(beam.len() <= 5);
    for window in beam.windows(2) {
        assert!(window[0].quality >= window[1].quality);
    }
    for (b, e) in beam.iter().zip(exhaustive.iter()) {
        assert!(b.quality <= e.quality + 1e-12);
    }
}

/// With room for every candidate the beam degenerates into exhaustive
/// search and reproduces the true top-k exactly.
#[test]
fn wide_beam_is_exhaustive() {
    let task = scenario_task(5, 2);
    let exhaustive = SimpleDfs.execute(&task).unwrap();
    let beam = BeamSearch::new(40).execute(&task).unwrap();

    assert_eq!(beam.len(), exhaustive.len());
    for (b, e) in beam.iter().zip(exhaustive.iter()) {
        assert_eq!(b.quality, e.quality);
        assert_eq!(b.subgroup.description(), e.subgroup.description());
    }
}
