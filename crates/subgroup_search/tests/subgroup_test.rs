//! Integration tests for subgroup_search::subgroup statistics:
//! - lazy, cached, never-mutated coverage statistics
//! - numeric targets carrying weighted sums through the same shape
//! - a full numeric-target search across representations

use polars::prelude::*;
use subgroup_search::apriori::Apriori;
use subgroup_search::best_first::BestFirstSearch;
use subgroup_search::dfs::{Bsd, SimpleDfs, TidSd};
use subgroup_search::quality::{QualityMeasure, StandardQF, StandardQFNumeric};
use subgroup_search::selectors::Selector;
use subgroup_search::subgroup::{Subgroup, SubgroupDescription, SubgroupStatistics};
use subgroup_search::target::Target;
use subgroup_search::task::{SubgroupDiscoveryTask, SubgroupSearchAlgorithm};

fn numeric_df() -> DataFrame {
    let score: Vec<f64> = (0..8).map(|i| ((i + 1) * 10) as f64).collect();
    let g: Vec<&str> = (0..8).map(|i| if i >= 4 { "a" } else { "b" }).collect();
    let h: Vec<&str> = (0..8).map(|i| if i % 2 == 0 { "c" } else { "d" }).collect();
    DataFrame::new_infer_height(vec![
        Series::new(PlSmallStr::from_static("score"), score).into(),
        Series::new(PlSmallStr::from_static("g"), g).into(),
        Series::new(PlSmallStr::from_static("h"), h).into(),
    ])
    .unwrap()
}

fn numeric_search_space() -> Vec<Selector> {
    vec![
        Selector::equals("g", "a"),
        Selector::equals("g", "b"),
        Selector::equals("h", "c"),
        Selector::equals("h", "d"),
    ]
}

/// Statistics are derived on first access, cached, and identical on
/// re-access.
#[test]
fn statistics_are_lazy_and_cached() {
    let df = DataFrame::new_infer_height(vec![
        Series::new(PlSmallStr::from_static("g"), &["a", "a", "b", "b"]).into(),
        Series::new(PlSmallStr::from_static("t"), &[true, false, true, false]).into(),
    ])
    .unwrap();
    let task = SubgroupDiscoveryTask::new(
        df,
        Target::Binary(Selector::equals("t", true)),
        vec![Selector::equals("g", "a")],
        QualityMeasure::bounded(StandardQF::weighted_relative_accuracy()),
        1,
        1,
    )
    .unwrap();

    let subgroup = Subgroup::new(
        task.target.clone(),
        SubgroupDescription::new(vec![Selector::equals("g", "a")]),
    );
    assert!(subgroup.cached_statistics().is_none());

    let first = subgroup.statistics(&task).unwrap().clone();
    assert_eq!(first.population_size, 4.0);
    assert_eq!(first.population_positives, 2.0);
    assert_eq!(first.subgroup_size, 2.0);
    assert_eq!(first.subgroup_positives, 1.0);

    assert_eq!(subgroup.cached_statistics(), Some(&first));
    let second = subgroup.statistics(&task).unwrap();
    assert_eq!(*second, first);
}

/// A pre-seeded subgroup never touches the dataset again.
#[test]
fn preseeded_statistics_are_returned_verbatim() {
    let df = DataFrame::new_infer_height(vec![
        Series::new(PlSmallStr::from_static("g"), &["a"]).into(),
        Series::new(PlSmallStr::from_static("t"), &[true]).into(),
    ])
    .unwrap();
    let task = SubgroupDiscoveryTask::new(
        df,
        Target::Binary(Selector::equals("t", true)),
        vec![Selector::equals("g", "a")],
        QualityMeasure::bounded(StandardQF::weighted_relative_accuracy()),
        1,
        1,
    )
    .unwrap();

    let seeded = SubgroupStatistics {
        population_size: 100.0,
        population_positives: 40.0,
        subgroup_size: 10.0,
        subgroup_positives: 9.0,
    };
    let subgroup = Subgroup::with_statistics(
        task.target.clone(),
        SubgroupDescription::new(vec![Selector::equals("g", "a")]),
        seeded.clone(),
    );
    assert_eq!(*subgroup.statistics(&task).unwrap(), seeded);
}

/// Numeric targets put weighted target sums into the positives fields.
#[test]
fn numeric_target_statistics_are_sums() {
    let task = SubgroupDiscoveryTask::new(
        numeric_df(),
        Target::Numeric("score".to_string()),
        numeric_search_space(),
        QualityMeasure::plain(StandardQFNumeric::new(1.0)),
        3,
        2,
    )
    .unwrap();

    let subgroup = Subgroup::new(
        task.target.clone(),
        SubgroupDescription::new(vec![Selector::equals("g", "a")]),
    );
    let stats = subgroup.statistics(&task).unwrap();
    assert_eq!(stats.population_size, 8.0);
    assert_eq!(stats.population_positives, 360.0);
    assert_eq!(stats.subgroup_size, 4.0);
    assert_eq!(stats.subgroup_positives, 260.0);
    // Mean shift of the "g == a" half: 65 vs 45 over half the rows.
    let quality = task.quality.evaluate(stats);
    assert_eq!(quality, 10.0);
}

/// A numeric-target search is exhaustive under the plain measure and
/// representation-independent.
#[test]
fn numeric_target_search_is_representation_independent() {
    let task = SubgroupDiscoveryTask::new(
        numeric_df(),
        Target::Numeric("score".to_string()),
        numeric_search_space(),
        QualityMeasure::plain(StandardQFNumeric::new(1.0)),
        3,
        2,
    )
    .unwrap();

    let baseline = SimpleDfs.execute(&task).unwrap();
    let qualities: Vec<f64> = baseline.iter().map(|entry| entry.quality).collect();
    assert_eq!(qualities, vec![10.0, 6.25, 3.75]);

    let strategies: Vec<Box<dyn SubgroupSearchAlgorithm>> = vec![
        Box::new(Apriori),
        Box::new(BestFirstSearch),
        Box::new(Bsd),
        Box::new(TidSd::default()),
    ];
    for strategy in strategies {
        let results = strategy.execute(&task).unwrap();
        assert_eq!(results.len(), baseline.len());
        for (got, want) in results.iter().zip(baseline.iter()) {
            assert_eq!(got.quality, want.quality);
            assert_eq!(got.subgroup.description(), want.subgroup.description());
        }
    }
}
