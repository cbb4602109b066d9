//! Per-trial dose sample table.
//!
//! One scalar accumulator per region id, filled by the transport engine
//! during a trial and consumed by the dose engine afterwards. Positive keys
//! hold raw energy deposits. Response-function bone doses share the table
//! under a reserved negative namespace: RBM dose for region `id` is stored
//! at `-id - 1000`, BS dose at `-id - 2000`. Region ids must stay within
//! 1..=999 for the bands not to collide.

use std::collections::HashMap;

/// Key for the RBM response-function dose of a region.
#[inline]
pub fn rbm_dose_key(region_id: i32) -> i32 {
    debug_assert!((1..=999).contains(&region_id));
    -region_id - 1000
}

/// Key for the BS response-function dose of a region.
#[inline]
pub fn bs_dose_key(region_id: i32) -> i32 {
    debug_assert!((1..=999).contains(&region_id));
    -region_id - 2000
}

/// Region-keyed scalar accumulators for a single trial.
#[derive(Debug, Clone, Default)]
pub struct DoseSampleTable {
    entries: HashMap<i32, f64>,
}

impl DoseSampleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate a value under a raw key.
    pub fn add(&mut self, key: i32, value: f64) {
        *self.entries.entry(key).or_insert(0.0) += value;
    }

    /// Accumulate an energy deposit for a region.
    pub fn add_energy_deposit(&mut self, region_id: i32, energy_mev: f64) {
        self.add(region_id, energy_mev);
    }

    /// Accumulate an RBM response-function dose for a region.
    pub fn add_rbm_dose(&mut self, region_id: i32, dose: f64) {
        self.add(rbm_dose_key(region_id), dose);
    }

    /// Accumulate a BS response-function dose for a region.
    pub fn add_bs_dose(&mut self, region_id: i32, dose: f64) {
        self.add(bs_dose_key(region_id), dose);
    }

    /// Value under a raw key, if any.
    pub fn get(&self, key: i32) -> Option<f64> {
        self.entries.get(&key).copied()
    }

    /// Energy deposit of a region; missing entries contribute zero.
    pub fn energy_deposit(&self, region_id: i32) -> f64 {
        self.get(region_id).unwrap_or(0.0)
    }

    /// RBM response-function dose of a region, if scored.
    pub fn rbm_dose(&self, region_id: i32) -> Option<f64> {
        self.get(rbm_dose_key(region_id))
    }

    /// BS response-function dose of a region, if scored.
    pub fn bs_dose(&self, region_id: i32) -> Option<f64> {
        self.get(bs_dose_key(region_id))
    }

    /// Whether any energy deposit (positive key) was scored.
    pub fn has_energy_deposits(&self) -> bool {
        self.entries.keys().any(|&k| k > 0)
    }

    /// Whether any response-function bone dose was scored.
    pub fn has_bone_doses(&self) -> bool {
        self.entries.keys().any(|&k| k < -999)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reset for the next trial.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.entries.iter().map(|(&k, &v)| (k, v))
    }
}
