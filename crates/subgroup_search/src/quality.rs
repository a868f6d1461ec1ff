use core::fmt;
use std::sync::Arc;

use crate::conf::DEGENERATE_QUALITY;
use crate::subgroup::SubgroupStatistics;

/// Scores a subgroup from its coverage statistics.
pub trait QualityFunction {
    fn evaluate_from_statistics(&self, statistics: &SubgroupStatistics) -> f64;
}

/// Quality function that can also bound every refinement.
///
/// The estimate must be admissible: for a subgroup S and any refinement
/// S' (a description extending S by further selectors),
/// `optimistic_estimate(S) >= quality(S')`.
pub trait BoundedQualityFunction: QualityFunction {
    fn optimistic_estimate_from_statistics(&self, statistics: &SubgroupStatistics) -> f64;
}

/// Capability-tagged quality measure, resolved once when the task is
/// built rather than per search node.
///
/// A plain measure reports an optimistic estimate of `+inf`, which
/// keeps every subtree open: search still terminates through the depth
/// bound, just without pruning.
#[derive(Clone)]
pub enum QualityMeasure {
    Plain(Arc<dyn QualityFunction>),
    Bounded(Arc<dyn BoundedQualityFunction>),
}

impl QualityMeasure {
    pub fn plain<Q: QualityFunction + 'static>(qf: Q) -> Self {
        QualityMeasure::Plain(Arc::new(qf))
    }

    pub fn bounded<Q: BoundedQualityFunction + 'static>(qf: Q) -> Self {
        QualityMeasure::Bounded(Arc::new(qf))
    }

    pub fn is_bounded(&self) -> bool {
        matches!(self, QualityMeasure::Bounded(_))
    }

    pub fn evaluate(&self, statistics: &SubgroupStatistics) -> f64 {
        match self {
            QualityMeasure::Plain(qf) => qf.evaluate_from_statistics(statistics),
            QualityMeasure::Bounded(qf) => qf.evaluate_from_statistics(statistics),
        }
    }

    pub fn optimistic_estimate(&self, statistics: &SubgroupStatistics) -> f64 {
        match self {
            QualityMeasure::Plain(_) => f64::INFINITY,
            QualityMeasure::Bounded(qf) => qf.optimistic_estimate_from_statistics(statistics),
        }
    }
}

impl fmt::Debug for QualityMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityMeasure::Plain(_) => write!(f, "QualityMeasure::Plain"),
            QualityMeasure::Bounded(_) => write!(f, "QualityMeasure::Bounded"),
        }
    }
}

/// -------------------
/// StandardQF
/// -------------------
/// Size-exponent quality family for binary targets:
///
/// `q = (n_sg / N)^a * (p_sg - p_0)`
///
/// `a = 1` is weighted relative accuracy, `a = 0.5` the binomial-test
/// shape. Degenerate statistics evaluate to zero.
#[derive(Clone, Debug, PartialEq)]
pub struct StandardQF {
    pub a: f64,
}

impl StandardQF {
    pub fn new(a: f64) -> Self {
        Self { a }
    }

    pub fn weighted_relative_accuracy() -> Self {
        Self::new(1.0)
    }

    pub fn binomial() -> Self {
        Self::new(0.5)
    }
}

impl QualityFunction for StandardQF {
    fn evaluate_from_statistics(&self, statistics: &SubgroupStatistics) -> f64 {
        if statistics.population_size <= 0.0 || statistics.subgroup_size <= 0.0 {
            return DEGENERATE_QUALITY;
        }
        let share = statistics.subgroup_size / statistics.population_size;
        share.powf(self.a) * (statistics.subgroup_rate() - statistics.population_rate())
    }
}

impl BoundedQualityFunction for StandardQF {
    /// Best refinement keeps every positive and sheds every negative:
    /// `(pos_sg / N)^a * (1 - p_0)`.
    fn optimistic_estimate_from_statistics(&self, statistics: &SubgroupStatistics) -> f64 {
        if statistics.population_size <= 0.0 {
            return DEGENERATE_QUALITY;
        }
        let positive_share = statistics.subgroup_positives / statistics.population_size;
        positive_share.powf(self.a) * (1.0 - statistics.population_rate())
    }
}

/// -------------------
/// LiftQF
/// -------------------
/// Ratio of subgroup rate to population rate. Carries no optimistic
/// estimate: tasks built on it search without pruning.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LiftQF;

impl QualityFunction for LiftQF {
    fn evaluate_from_statistics(&self, statistics: &SubgroupStatistics) -> f64 {
        let population_rate = statistics.population_rate();
        if statistics.subgroup_size <= 0.0 || population_rate <= 0.0 {
            return DEGENERATE_QUALITY;
        }
        statistics.subgroup_rate() / population_rate
    }
}

/// -------------------
/// StandardQFNumeric
/// -------------------
/// Mean-shift quality for numeric targets:
///
/// `q = (n_sg / N)^a * (mean_sg - mean_0)`
///
/// Statistics alone cannot bound refinements of a numeric target
/// (that needs per-row maxima), so this measure is plain.
#[derive(Clone, Debug, PartialEq)]
pub struct StandardQFNumeric {
    pub a: f64,
}

impl StandardQFNumeric {
    pub fn new(a: f64) -> Self {
        Self { a }
    }
}

impl QualityFunction for StandardQFNumeric {
    fn evaluate_from_statistics(&self, statistics: &SubgroupStatistics) -> f64 {
        if statistics.population_size <= 0.0 || statistics.subgroup_size <= 0.0 {
            return DEGENERATE_QUALITY;
        }
        let share = statistics.subgroup_size / statistics.population_size;
        share.powf(self.a) * (statistics.subgroup_rate() - statistics.population_rate())
    }
}
