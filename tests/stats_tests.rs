//! Integration tests for run statistics.
//!
//! Tests verify:
//! - Mean and relative-error estimates against closed forms
//! - Merge associativity and commutativity across worker accumulators
//! - Trial recording with primary weights and the run report

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use phantom_dose::stats::{TallyAccumulator, TrialRecorder};
use phantom_dose::dose::ProtectionQuantity;

// ============================================================================
// Accumulator Tests
// ============================================================================

#[test]
fn test_mean_and_error_against_closed_form() {
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let mut acc = TallyAccumulator::new();
    for v in values {
        acc.add("dose", v);
        acc.count_trial();
    }

    let (mean, rel_err) = acc.mean_and_relative_error("dose").unwrap();
    assert!((mean - 5.0).abs() < 1e-12);
    // Population stdev of this set is exactly 2.
    let expected = (2.0 / (values.len() as f64).sqrt()) / 5.0;
    assert!((rel_err - expected).abs() < 1e-12);
}

#[test]
fn test_unscored_names_have_no_estimate() {
    let mut acc = TallyAccumulator::new();
    acc.count_trial();
    assert_eq!(acc.mean_and_relative_error("missing"), None);
}

#[test]
fn test_merge_order_does_not_change_the_estimate() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut workers: Vec<TallyAccumulator> = Vec::new();
    let mut sequential = TallyAccumulator::new();

    for _ in 0..4 {
        let mut worker = TallyAccumulator::new();
        for _ in 0..250 {
            let v: f64 = rng.gen();
            worker.add("dose", v);
            worker.count_trial();
            sequential.add("dose", v);
            sequential.count_trial();
        }
        workers.push(worker);
    }

    // Merge in reverse order.
    let mut merged = TallyAccumulator::new();
    for worker in workers.iter().rev() {
        merged.merge(worker);
    }

    assert_eq!(merged.num_trials(), sequential.num_trials());
    let a = merged.mean_and_relative_error("dose").unwrap();
    let b = sequential.mean_and_relative_error("dose").unwrap();
    assert!((a.0 - b.0).abs() < 1e-12);
    assert!((a.1 - b.1).abs() < 1e-12);
}

// ============================================================================
// Recorder Tests
// ============================================================================

#[test]
fn test_relative_error_shrinks_with_trials() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut few = TallyAccumulator::new();
    let mut many = TallyAccumulator::new();

    for i in 0..10_000 {
        let v = 1.0 + rng.gen::<f64>();
        if i < 100 {
            few.add("dose", v);
            few.count_trial();
        }
        many.add("dose", v);
        many.count_trial();
    }

    let (_, err_few) = few.mean_and_relative_error("dose").unwrap();
    let (_, err_many) = many.mean_and_relative_error("dose").unwrap();
    assert!(
        err_many < err_few,
        "the error estimate must shrink as 1/sqrt(n)"
    );
}

#[test]
fn test_report_orders_quantities_stably() {
    let recorder = TrialRecorder::new();
    let report_a = recorder.report();
    let report_b = recorder.report();
    assert_eq!(report_a, report_b);
    assert!(report_a.contains(ProtectionQuantity::EffectiveDose.as_str()));
    assert!(report_a.contains(ProtectionQuantity::WholeBodyDose.as_str()));
}
