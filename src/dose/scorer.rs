//! Per-step dose scoring.
//!
//! Reduces one transport step into the trial's [`DoseSampleTable`]: the
//! weighted energy deposit always, and for spongiosa regions with DRF
//! curves the fluence-based bone doses (fluence = step length / region
//! volume, converted with the response factor at the pre-step energy).
//! Only indirectly ionizing particles (photons, neutrons) score bone dose;
//! the DRF curves are defined for them alone.

use super::table::DoseSampleTable;
use crate::dose::BoneCompartment;
use crate::model::PhantomModel;
use crate::source::ParticleKind;

/// One transport step, as reported by the external stepping loop.
#[derive(Debug, Clone, Copy)]
pub struct StepRecord {
    /// Region containing the step.
    pub region_id: i32,
    /// Energy deposited along the step (MeV).
    pub energy_deposit_mev: f64,
    /// Step length (cm).
    pub step_length_cm: f64,
    /// Kinetic energy before the step (MeV). The pre-step energy is the
    /// one the DRF tables are parameterized in.
    pub pre_step_energy_mev: f64,
    /// Statistical weight of the track.
    pub weight: f64,
    /// Particle species of the track.
    pub particle: ParticleKind,
}

/// Scores transport steps against one phantom.
pub struct StepScorer<'a> {
    phantom: &'a PhantomModel,
}

impl<'a> StepScorer<'a> {
    pub fn new(phantom: &'a PhantomModel) -> Self {
        Self { phantom }
    }

    /// Fold one step into the trial table. Returns true if anything was
    /// scored.
    pub fn score(&self, table: &mut DoseSampleTable, step: &StepRecord) -> bool {
        let mut scored = false;

        if step.energy_deposit_mev != 0.0 {
            table.add_energy_deposit(step.region_id, step.energy_deposit_mev * step.weight);
            scored = true;
        }

        if self.phantom.has_drf_for(step.region_id) && step.particle.is_indirectly_ionizing() {
            let volume = self.phantom.region_volume_cm3(step.region_id);
            if volume > 0.0 && step.step_length_cm > 0.0 {
                let fluence = step.step_length_cm / volume;
                let rbm_factor = self.phantom.response_factor(
                    step.region_id,
                    BoneCompartment::RedBoneMarrow,
                    step.pre_step_energy_mev,
                );
                let bs_factor = self.phantom.response_factor(
                    step.region_id,
                    BoneCompartment::BoneSurface,
                    step.pre_step_energy_mev,
                );
                table.add_rbm_dose(step.region_id, fluence * rbm_factor * step.weight);
                table.add_bs_dose(step.region_id, fluence * bs_factor * step.weight);
                scored = true;
            }
        }

        scored
    }
}
