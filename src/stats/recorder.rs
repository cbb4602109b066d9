//! Per-run recording of protection quantities across trials.

use std::fmt::Write as _;

use crate::dose::{ProtectionQuantities, ProtectionQuantity};

use super::tally::TallyAccumulator;

/// The quantities tallied by default in a dosimetry run.
pub fn default_interest_list() -> Vec<ProtectionQuantity> {
    use ProtectionQuantity::*;
    vec![
        EffectiveDose,
        EffectiveDoseByDrfWhole,
        EffectiveDoseByMassRatioTarget,
        EffectiveDoseByMassRatioWhole,
        WholeBodyDose,
        EyeLensTarget,
        EyeLensWhole,
        RedBoneMarrowByDrf,
        RedBoneMarrowByMassRatio,
        Breast,
        ColonTarget,
        StomachTarget,
        Lungs,
        RemainderTarget,
        Gonads,
        Bladder,
        Liver,
        OesophagusTarget,
        Thyroid,
        BoneSurfaceByDrf,
        BoneSurfaceByMassRatio,
        Brain,
        SalivaryGlands,
        SkinTarget,
    ]
}

/// Accumulates trial results and turns them into a run report.
///
/// One recorder per worker; workers merge into a master recorder at the
/// end of the run.
#[derive(Debug, Clone)]
pub struct TrialRecorder {
    quantities: Vec<ProtectionQuantity>,
    tallies: TallyAccumulator,
}

impl TrialRecorder {
    pub fn new() -> Self {
        Self::with_quantities(default_interest_list())
    }

    pub fn with_quantities(quantities: Vec<ProtectionQuantity>) -> Self {
        Self {
            quantities,
            tallies: TallyAccumulator::new(),
        }
    }

    pub fn quantities(&self) -> &[ProtectionQuantity] {
        &self.quantities
    }

    pub fn num_trials(&self) -> u64 {
        self.tallies.num_trials()
    }

    /// Record one trial. The primary weight scales every quantity before
    /// it enters the tallies.
    pub fn record_trial(&mut self, values: &ProtectionQuantities, primary_weight: f64) {
        for &quantity in &self.quantities {
            self.tallies
                .add(quantity.as_str(), values.get(quantity) * primary_weight);
        }
        self.tallies.count_trial();
    }

    /// Fold a worker's recorder into this one.
    pub fn merge(&mut self, other: &TrialRecorder) {
        debug_assert_eq!(self.quantities, other.quantities);
        self.tallies.merge(&other.tallies);
    }

    pub fn mean_and_relative_error(&self, quantity: ProtectionQuantity) -> Option<(f64, f64)> {
        self.tallies.mean_and_relative_error(quantity.as_str())
    }

    /// Formatted run summary: one line per tallied quantity.
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "trials: {}", self.num_trials());
        let _ = writeln!(
            out,
            "{:<36} {:>16} {:>12}",
            "quantity", "mean [MeV/g]", "rel. error"
        );
        for &quantity in &self.quantities {
            match self.mean_and_relative_error(quantity) {
                Some((mean, rel_err)) => {
                    let _ = writeln!(
                        out,
                        "{:<36} {:>16.6e} {:>12.4}",
                        quantity.as_str(),
                        mean,
                        rel_err
                    );
                }
                None => {
                    let _ = writeln!(
                        out,
                        "{:<36} {:>16} {:>12}",
                        quantity.as_str(),
                        "0",
                        "-"
                    );
                }
            }
        }
        out
    }
}

impl Default for TrialRecorder {
    fn default() -> Self {
        Self::new()
    }
}
