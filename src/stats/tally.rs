//! Running moment tallies for trial-averaged scores.
//!
//! Each named score keeps its running sum and sum of squares, which is all
//! the merge-friendly state needed to recover the mean and its relative
//! statistical error after any number of trials.

use std::collections::BTreeMap;

/// First and second moment of one scored quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    pub sum: f64,
    pub sum_sq: f64,
}

impl Tally {
    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.sum_sq += value * value;
    }

    pub fn merge(&mut self, other: Tally) {
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
    }

    /// Mean and relative error over `num_trials` trials.
    ///
    /// Returns `None` when no trials have been recorded or the mean is
    /// zero; the relative error is undefined in both cases.
    pub fn mean_and_relative_error(&self, num_trials: u64) -> Option<(f64, f64)> {
        if num_trials == 0 {
            return None;
        }
        let n = num_trials as f64;
        let mean = self.sum / n;
        if mean == 0.0 {
            return None;
        }
        // Population variance of the per-trial scores; tiny negative
        // values from cancellation are clamped to zero.
        let variance = (self.sum_sq / n - mean * mean).max(0.0);
        let relative_error = (variance.sqrt() / n.sqrt()) / mean;
        Some((mean, relative_error))
    }
}

/// Named tallies plus the shared trial count.
///
/// Keys are stored in a `BTreeMap` so iteration order, and therefore any
/// report built from it, is deterministic.
#[derive(Debug, Clone, Default)]
pub struct TallyAccumulator {
    entries: BTreeMap<String, Tally>,
    num_trials: u64,
}

impl TallyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one trial's value for a named score.
    pub fn add(&mut self, name: &str, value: f64) {
        self.entries.entry(name.to_owned()).or_default().add(value);
    }

    /// Mark one trial as complete. Every trial counts toward every score,
    /// including scores that stayed at zero this trial.
    pub fn count_trial(&mut self) {
        self.num_trials += 1;
    }

    pub fn num_trials(&self) -> u64 {
        self.num_trials
    }

    pub fn mean_and_relative_error(&self, name: &str) -> Option<(f64, f64)> {
        self.entries
            .get(name)
            .and_then(|tally| tally.mean_and_relative_error(self.num_trials))
    }

    pub fn tally(&self, name: &str) -> Option<Tally> {
        self.entries.get(name).copied()
    }

    /// Fold another accumulator in. Sums and trial counts both add, so
    /// merging is associative and commutative across workers.
    pub fn merge(&mut self, other: &TallyAccumulator) {
        for (name, tally) in &other.entries {
            self.entries.entry(name.clone()).or_default().merge(*tally);
        }
        self.num_trials += other.num_trials;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Tally)> + '_ {
        self.entries.iter().map(|(name, &tally)| (name.as_str(), tally))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_error_match_moment_formulas() {
        let mut tally = Tally::default();
        for v in [1.0, 2.0, 3.0, 4.0] {
            tally.add(v);
        }
        let (mean, rel_err) = tally.mean_and_relative_error(4).unwrap();
        assert!((mean - 2.5).abs() < 1e-12);
        // stdev = sqrt(30/4 - 6.25) = sqrt(1.25)
        let expected = (1.25f64.sqrt() / 2.0) / 2.5;
        assert!((rel_err - expected).abs() < 1e-12);
    }

    #[test]
    fn zero_trials_or_zero_mean_have_no_error_estimate() {
        let mut tally = Tally::default();
        assert_eq!(tally.mean_and_relative_error(0), None);
        tally.add(0.0);
        assert_eq!(tally.mean_and_relative_error(1), None);
    }

    #[test]
    fn constant_scores_have_zero_relative_error() {
        let mut tally = Tally::default();
        for _ in 0..10 {
            tally.add(7.0);
        }
        let (mean, rel_err) = tally.mean_and_relative_error(10).unwrap();
        assert!((mean - 7.0).abs() < 1e-12);
        assert!(rel_err.abs() < 1e-9, "identical samples must have no spread");
    }

    #[test]
    fn merge_is_commutative_and_associative() {
        let mut a = TallyAccumulator::new();
        a.add("dose", 1.0);
        a.count_trial();
        let mut b = TallyAccumulator::new();
        b.add("dose", 2.0);
        b.add("other", 5.0);
        b.count_trial();
        let mut c = TallyAccumulator::new();
        c.add("dose", 3.0);
        c.count_trial();

        let mut ab_c = a.clone();
        ab_c.merge(&b);
        ab_c.merge(&c);

        let mut c_ba = c.clone();
        let mut ba = b.clone();
        ba.merge(&a);
        c_ba.merge(&ba);

        assert_eq!(ab_c.num_trials(), 3);
        assert_eq!(ab_c.num_trials(), c_ba.num_trials());
        assert_eq!(ab_c.tally("dose"), c_ba.tally("dose"));
        assert_eq!(ab_c.tally("other"), c_ba.tally("other"));
    }
}
