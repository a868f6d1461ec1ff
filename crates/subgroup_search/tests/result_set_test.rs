//! Integration tests for subgroup_search::result_set:
//! - admission policy below and at capacity
//! - the shifting acceptance threshold
//! - duplicate-description probing and the descending drain

use subgroup_search::result_set::SubgroupResultSet;
use subgroup_search::selectors::Selector;
use subgroup_search::subgroup::{Subgroup, SubgroupDescription, SubgroupStatistics};
use subgroup_search::target::Target;

fn subgroup_named(attribute: &str) -> Subgroup {
    let statistics = SubgroupStatistics {
        population_size: 10.0,
        population_positives: 4.0,
        subgroup_size: 5.0,
        subgroup_positives: 3.0,
    };
    Subgroup::with_statistics(
        Target::Binary(Selector::equals("t", true)),
        SubgroupDescription::new(vec![Selector::equals(attribute, "x")]),
        statistics,
    )
}

/// Below capacity every candidate is admitted; at capacity only
/// strictly better qualities evict the minimum.
#[test]
fn admission_policy() {
    let mut result = SubgroupResultSet::new(2);

    assert!(result.add_if_required(0.5, subgroup_named("a")));
    assert!(result.add_if_required(0.2, subgroup_named("b")));
    assert_eq!(result.len(), 2);

    // Beats the minimum: b is evicted.
    assert!(result.add_if_required(0.3, subgroup_named("c")));
    assert_eq!(result.len(), 2);

    // Does not beat the minimum.
    assert!(!result.add_if_required(0.1, subgroup_named("d")));
    // Equal to the minimum is not enough either.
    assert!(!result.add_if_required(0.3, subgroup_named("e")));

    let sorted = result.into_sorted_vec();
    let qualities: Vec<f64> = sorted.iter().map(|entry| entry.quality).collect();
    assert_eq!(qualities, vec![0.5, 0.3]);
    assert_eq!(sorted[0].subgroup.description().to_string(), "a == x");
    assert_eq!(sorted[1].subgroup.description().to_string(), "c == x");
}

/// The acceptance threshold is the configured floor until the set is
/// full, then the smallest retained quality.
#[test]
fn minimum_required_quality_shifts() {
    let mut result = SubgroupResultSet::new(2);
    assert_eq!(result.minimum_required_quality(0.1), 0.1);

    result.add_if_required(0.5, subgroup_named("a"));
    assert_eq!(result.minimum_required_quality(0.1), 0.1);

    result.add_if_required(0.2, subgroup_named("b"));
    assert_eq!(result.minimum_required_quality(0.1), 0.2);

    result.add_if_required(0.4, subgroup_named("c"));
    assert_eq!(result.minimum_required_quality(0.1), 0.4);
}

/// Even below capacity, admission reports whether the set changed, and
/// the duplicate probe sees descriptions by selector set.
#[test]
fn contains_description_probe() {
    let mut result = SubgroupResultSet::new(3);
    result.add_if_required(0.5, subgroup_named("a"));

    let same = SubgroupDescription::new(vec![Selector::equals("a", "x")]);
    let other = SubgroupDescription::new(vec![Selector::equals("b", "x")]);
    assert!(result.contains_description(&same));
    assert!(!result.contains_description(&other));
}

/// Draining returns quality-descending entries; equal qualities fall
/// back to description order so the output is deterministic.
#[test]
fn sorted_drain_is_deterministic() {
    let mut result = SubgroupResultSet::new(4);
    result.add_if_required(0.2, subgroup_named("d"));
    result.add_if_required(0.7, subgroup_named("c"));
    result.add_if_required(0.2, subgroup_named("a"));
    result.add_if_required(0.4, subgroup_named("b"));

    let sorted = result.into_sorted_vec();
    let rendered: Vec<String> = sorted
        .iter()
        .map(|entry| format!("{:.1} {}", entry.quality, entry.subgroup.description()))
        .collect();
    assert_eq!(
        rendered,
        vec!["0.7 c == x", "0.4 b == x", "0.2 a == x", "0.2 d == x"]
    );
}
