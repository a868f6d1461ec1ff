//! # Subgroup Search
//!
//! Top-k subgroup discovery over tabular data: given a polars frame, a
//! target concept, a library of atomic selectors and a quality
//! function, find the best conjunctive descriptions up to a bounded
//! length.
//!
//! ## Key Features
//!
//! - **Interchangeable strategies**: level-wise closure-pruned search
//!   (Apriori), priority-queue branch-and-bound, fixed-width beam
//!   search and a depth-first family with pluggable incremental
//!   coverage (rescan, bitset, sorted row-ID list)
//! - **Admissible pruning**: bounded quality functions supply an
//!   optimistic estimate checked against the result set's shifting
//!   acceptance threshold
//! - **Weighted rows**: an optional weighting attribute flows through
//!   every statistic
//!
//! ## Example
//!
//! ```rust,ignore
//! use polars::prelude::*;
//! use subgroup_search::apriori::Apriori;
//! use subgroup_search::quality::{QualityMeasure, StandardQF};
//! use subgroup_search::selectors::Selector;
//! use subgroup_search::target::Target;
//! use subgroup_search::task::{SubgroupDiscoveryTask, SubgroupSearchAlgorithm};
//!
//! let df = df!(
//!     "age" => &[23.0, 41.0, 35.0, 62.0],
//!     "sex" => &["f", "m", "f", "m"],
//!     "churned" => &[true, false, true, true],
//! )?;
//! let task = SubgroupDiscoveryTask::new(
//!     df,
//!     Target::Binary(Selector::equals("churned", true)),
//!     vec![
//!         Selector::equals("sex", "f"),
//!         Selector::equals("sex", "m"),
//!         Selector::less_than("age", 40.0),
//!         Selector::at_least("age", 40.0),
//!     ],
//!     QualityMeasure::bounded(StandardQF::weighted_relative_accuracy()),
//!     5, // result set size
//!     2, // max conjunction length
//! )?;
//! for scored in Apriori.execute(&task)? {
//!     println!("{}", scored);
//! }
//! ```

// Module declarations
pub mod apriori;
pub mod beam;
pub mod best_first;
pub mod conf;
pub mod coverage;
pub mod dataframe;
pub mod dfs;
pub mod quality;
pub mod result_set;
pub mod selectors;
pub mod subgroup;
pub mod target;
pub mod task;
