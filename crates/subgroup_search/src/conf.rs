/// Quality floor applied when a task does not set one explicitly.
pub const DEFAULT_MIN_QUALITY: f64 = 0.0;

/// Quality reported for statistically degenerate candidates
/// (zero population or zero subgroup size).
pub const DEGENERATE_QUALITY: f64 = 0.0;
