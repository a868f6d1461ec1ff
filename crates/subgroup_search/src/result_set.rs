use core::fmt;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::subgroup::{Subgroup, SubgroupDescription};

/// A subgroup together with its evaluated quality.
#[derive(Clone, Debug)]
pub struct ScoredSubgroup {
    pub quality: f64,
    pub subgroup: Subgroup,
}

impl PartialEq for ScoredSubgroup {
    fn eq(&self, other: &Self) -> bool {
        self.quality.total_cmp(&other.quality) == Ordering::Equal
    }
}

impl Eq for ScoredSubgroup {}

impl PartialOrd for ScoredSubgroup {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredSubgroup {
    fn cmp(&self, other: &Self) -> Ordering {
        self.quality.total_cmp(&other.quality)
    }
}

impl fmt::Display for ScoredSubgroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}: {}", self.quality, self.subgroup)
    }
}

/// Bounded top-k collection of scored subgroups.
///
/// Holds at most `capacity` entries in a min-heap; once full, the
/// smallest retained quality is the acceptance threshold fed back into
/// optimistic-estimate pruning.
pub struct SubgroupResultSet {
    capacity: usize,
    entries: BinaryHeap<Reverse<ScoredSubgroup>>,
}

impl SubgroupResultSet {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity >= 1, "result set capacity must be positive");
        Self {
            capacity,
            entries: BinaryHeap::with_capacity(capacity + 1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Admission policy: below capacity, insert unconditionally; at
    /// capacity, evict the current minimum only when `quality` beats
    /// it. Returns whether the set changed.
    pub fn add_if_required(&mut self, quality: f64, subgroup: Subgroup) -> bool {
        if self.entries.len() < self.capacity {
            self.entries.push(Reverse(ScoredSubgroup { quality, subgroup }));
            return true;
        }
        let minimum = self.entries.peek().map(|Reverse(entry)| entry.quality);
        match minimum {
            Some(minimum) if quality > minimum => {
                self.entries.pop();
                self.entries.push(Reverse(ScoredSubgroup { quality, subgroup }));
                true
            }
            _ => false,
        }
    }

    /// Pruning threshold: the configured floor until the set is full,
    /// then the smallest retained quality.
    pub fn minimum_required_quality(&self, min_quality: f64) -> f64 {
        if self.entries.len() < self.capacity {
            min_quality
        } else {
            self.entries
                .peek()
                .map(|Reverse(entry)| entry.quality)
                .unwrap_or(min_quality)
        }
    }

    /// Whether a subgroup with this description (by selector set) is
    /// already retained.
    pub fn contains_description(&self, description: &SubgroupDescription) -> bool {
        self.entries
            .iter()
            .any(|Reverse(entry)| entry.subgroup.description() == description)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoredSubgroup> {
        self.entries.iter().map(|Reverse(entry)| entry)
    }

    /// Drains into a quality-descending list. Ties are ordered by
    /// description so the output is deterministic.
    pub fn into_sorted_vec(self) -> Vec<ScoredSubgroup> {
        let mut entries: Vec<ScoredSubgroup> =
            self.entries.into_iter().map(|Reverse(entry)| entry).collect();
        entries.sort_by(|a, b| {
            b.quality
                .total_cmp(&a.quality)
                .then_with(|| a.subgroup.description().cmp(b.subgroup.description()))
        });
        entries
    }
}
