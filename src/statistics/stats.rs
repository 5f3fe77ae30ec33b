use serde::Serialize;

use crate::numerics::reference::tolerance;

/// Accuracy bookkeeping for one harness job, kept per thread and merged at the end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pairs: usize,
    mismatches: usize,
    max_abs_error: f32,
    max_rel_error: f32,
    checksum: f64,
}

impl Stats {
    pub fn new() -> Self {
        Stats {
            pairs: 0,
            mismatches: 0,
            max_abs_error: 0.0,
            max_rel_error: 0.0,
            checksum: 0.0,
        }
    }

    /// Record one kernel result next to the scalar reference for the same pair.
    /// A pair counts as a mismatch when the gap exceeds the rounding bound for `dim`.
    pub fn record(&mut self, kernel: f32, reference: f32, dim: usize) {
        let abs_error = (kernel - reference).abs();
        let rel_error = abs_error / reference.max(f32::MIN_POSITIVE);

        self.pairs += 1;
        self.checksum += kernel as f64;
        self.max_abs_error = self.max_abs_error.max(abs_error);
        self.max_rel_error = self.max_rel_error.max(rel_error);
        // NaN fails the comparison and lands here too
        if !(abs_error <= tolerance(dim, reference)) {
            self.mismatches += 1;
        }
    }

    pub fn merge(&self, other: &Stats) -> Stats {
        Stats {
            pairs: self.pairs + other.pairs,
            mismatches: self.mismatches + other.mismatches,
            max_abs_error: self.max_abs_error.max(other.max_abs_error),
            max_rel_error: self.max_rel_error.max(other.max_rel_error),
            checksum: self.checksum + other.checksum,
        }
    }

    pub fn get_pairs(&self) -> usize {
        self.pairs
    }

    pub fn get_mismatches(&self) -> usize {
        self.mismatches
    }

    pub fn get_max_abs_error(&self) -> f32 {
        self.max_abs_error
    }

    pub fn get_max_rel_error(&self) -> f32 {
        self.max_rel_error
    }

    pub fn get_checksum(&self) -> f64 {
        self.checksum
    }
}

impl Default for Stats {
    fn default() -> Self {
        Stats::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_initialized_to_zero() {
        let stats = Stats::new();
        assert_eq!(stats.get_pairs(), 0);
        assert_eq!(stats.get_mismatches(), 0);
        assert_eq!(stats.get_max_abs_error(), 0.0);
        assert_eq!(stats.get_checksum(), 0.0);
    }

    #[test]
    fn test_default_stats_initialized_to_zero() {
        assert_eq!(Stats::default(), Stats::new());
    }

    #[test]
    fn test_exact_result_is_not_a_mismatch() {
        let mut stats = Stats::new();
        stats.record(55.0, 55.0, 5);
        assert_eq!(stats.get_pairs(), 1);
        assert_eq!(stats.get_mismatches(), 0);
        assert_eq!(stats.get_max_abs_error(), 0.0);
        assert_eq!(stats.get_checksum(), 55.0);
    }

    #[test]
    fn test_rounding_sized_gap_is_accepted() {
        let mut stats = Stats::new();
        let reference = 1000.0f32;
        stats.record(reference + reference * f32::EPSILON, reference, 128);
        assert_eq!(stats.get_mismatches(), 0);
        assert!(stats.get_max_rel_error() > 0.0);
    }

    #[test]
    fn test_large_gap_is_a_mismatch() {
        let mut stats = Stats::new();
        stats.record(56.0, 55.0, 5);
        assert_eq!(stats.get_mismatches(), 1);
        assert_eq!(stats.get_max_abs_error(), 1.0);
    }

    #[test]
    fn test_nan_is_a_mismatch() {
        let mut stats = Stats::new();
        stats.record(f32::NAN, 3.0, 4);
        assert_eq!(stats.get_mismatches(), 1);
    }

    #[test]
    fn test_merge_sums_counts_and_keeps_worst_errors() {
        let mut left = Stats::new();
        left.record(10.0, 10.0, 16);
        left.record(21.0, 20.0, 16);

        let mut right = Stats::new();
        right.record(5.0, 5.0, 16);

        let merged = left.merge(&right);
        assert_eq!(merged.get_pairs(), 3);
        assert_eq!(merged.get_mismatches(), 1);
        assert_eq!(merged.get_max_abs_error(), 1.0);
        assert_eq!(merged.get_checksum(), 36.0);
    }

    #[test]
    fn test_serializes_to_json() {
        let mut stats = Stats::new();
        stats.record(2.0, 2.0, 1);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["pairs"], 1);
        assert_eq!(json["mismatches"], 0);
    }
}
