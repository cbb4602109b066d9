//! Bone dose-response functions (DRF).
//!
//! Energy-dependent conversion factors mapping photon/neutron fluence in a
//! spongiosa region to red-bone-marrow or bone-surface dose. Curves are
//! tabulated on a fixed 25-point log-spaced energy grid and interpolated
//! log–log with flat extrapolation outside the grid.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::dose::BoneCompartment;

/// The fixed DRF energy grid in MeV.
pub const DRF_ENERGY_GRID_MEV: [f64; 25] = [
    0.010, 0.015, 0.020, 0.030, 0.040, 0.050, 0.060, 0.080, 0.10, 0.15, 0.20, 0.30, 0.40, 0.50,
    0.60, 0.80, 1.0, 1.5, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0,
];

/// RBM and BS response curves for one region.
#[derive(Debug, Clone)]
pub struct ResponseCurves {
    pub rbm: [f64; 25],
    pub bs: [f64; 25],
}

/// Per-region DRF table.
#[derive(Debug, Clone, Default)]
pub struct ResponseTable {
    curves: HashMap<i32, ResponseCurves>,
}

impl ResponseTable {
    pub fn new(curves: HashMap<i32, ResponseCurves>) -> Self {
        Self { curves }
    }

    /// Parse a DRF file: rows of region id followed by 25 RBM values and
    /// 25 BS values.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("loading DRF file {:?}", path.as_ref()))?;
        let table = Self::from_str_table(&contents)?;
        log::info!("Loaded bone DRF curves for {} regions", table.curves.len());
        Ok(table)
    }

    pub fn from_str_table(contents: &str) -> Result<Self> {
        let mut tokens = contents.split_whitespace();
        let mut curves = HashMap::new();

        while let Some(first) = tokens.next() {
            let region_id: i32 = first
                .parse()
                .with_context(|| format!("DRF region id '{}'", first))?;
            let mut entry = ResponseCurves {
                rbm: [0.0; 25],
                bs: [0.0; 25],
            };
            for slot in entry.rbm.iter_mut().chain(entry.bs.iter_mut()) {
                let Some(token) = tokens.next() else {
                    bail!("truncated DRF row for region {}", region_id);
                };
                *slot = token
                    .parse()
                    .with_context(|| format!("DRF value for region {}", region_id))?;
            }
            curves.insert(region_id, entry);
        }

        Ok(Self { curves })
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn has_region(&self, region_id: i32) -> bool {
        self.curves.contains_key(&region_id)
    }

    /// Interpolated response factor for a region and compartment at the
    /// given energy; 0 for regions without curves.
    pub fn response_factor(
        &self,
        region_id: i32,
        compartment: BoneCompartment,
        energy_mev: f64,
    ) -> f64 {
        let Some(entry) = self.curves.get(&region_id) else {
            return 0.0;
        };
        let curve = match compartment {
            BoneCompartment::RedBoneMarrow => &entry.rbm,
            BoneCompartment::BoneSurface => &entry.bs,
        };
        log_log_interpolate(energy_mev, &DRF_ENERGY_GRID_MEV, curve)
    }
}

/// Log–log linear interpolation over a sorted table, clamped flat outside
/// the grid. A zero leading table value marks the curve as not applicable
/// and always yields 0 (a log of zero is undefined anyway).
pub fn log_log_interpolate(xq: f64, xs: &[f64], ys: &[f64]) -> f64 {
    if ys[0] == 0.0 {
        return 0.0;
    }
    if xq <= xs[0] {
        return ys[0];
    }
    if xq >= xs[xs.len() - 1] {
        return ys[ys.len() - 1];
    }

    let mut i1 = 0;
    let mut i2 = 1;
    while i2 < xs.len() - 1 {
        if xq <= xs[i2] {
            break;
        }
        i1 += 1;
        i2 += 1;
    }

    // log(y) = log(y1) + log(x/x1) * log(y2/y1) / log(x2/x1)
    let log_yq = ys[i1].log10()
        + (xq / xs[i1]).log10() * (ys[i2] / ys[i1]).log10() / (xs[i2] / xs[i1]).log10();
    10f64.powf(log_yq)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn power_law_curve(exponent: f64) -> [f64; 25] {
        let mut curve = [0.0; 25];
        for (value, energy) in curve.iter_mut().zip(DRF_ENERGY_GRID_MEV.iter()) {
            *value = energy.powf(exponent);
        }
        curve
    }

    #[test]
    fn interpolation_is_exact_on_grid_points() {
        let curve = power_law_curve(1.5);
        for (i, &energy) in DRF_ENERGY_GRID_MEV.iter().enumerate() {
            let value = log_log_interpolate(energy, &DRF_ENERGY_GRID_MEV, &curve);
            assert!((value - curve[i]).abs() / curve[i] < 1e-12);
        }
    }

    #[test]
    fn interpolation_reproduces_a_power_law_between_bins() {
        // A power law is linear in log–log space, so interpolation must be
        // exact at any query energy, not just at the grid points.
        let curve = power_law_curve(2.0);
        for energy in [0.012, 0.07, 0.45, 2.5, 9.0] {
            let expected = f64::powf(energy, 2.0);
            let value = log_log_interpolate(energy, &DRF_ENERGY_GRID_MEV, &curve);
            assert!(
                (value - expected).abs() / expected < 1e-10,
                "at {} MeV: {} vs {}",
                energy,
                value,
                expected
            );
        }
    }

    #[test]
    fn out_of_grid_energies_clamp_to_boundary_values() {
        let curve = power_law_curve(1.0);
        assert_eq!(
            log_log_interpolate(0.001, &DRF_ENERGY_GRID_MEV, &curve),
            curve[0]
        );
        assert_eq!(
            log_log_interpolate(50.0, &DRF_ENERGY_GRID_MEV, &curve),
            curve[24]
        );
    }

    #[test]
    fn zero_leading_value_is_a_not_applicable_sentinel() {
        let mut curve = power_law_curve(1.0);
        curve[0] = 0.0;
        assert_eq!(log_log_interpolate(0.5, &DRF_ENERGY_GRID_MEV, &curve), 0.0);
    }

    #[test]
    fn missing_region_yields_zero_factor() {
        let table = ResponseTable::default();
        assert_eq!(
            table.response_factor(13, BoneCompartment::RedBoneMarrow, 1.0),
            0.0
        );
    }

    #[test]
    fn drf_rows_parse_into_both_compartments() {
        let mut row = String::from("13");
        for i in 0..50 {
            row.push_str(&format!(" {}", (i + 1) as f64));
        }
        let table = ResponseTable::from_str_table(&row).unwrap();
        assert!(table.has_region(13));
        // First bin values of each compartment.
        assert_eq!(
            table.response_factor(13, BoneCompartment::RedBoneMarrow, 0.010),
            1.0
        );
        assert_eq!(
            table.response_factor(13, BoneCompartment::BoneSurface, 0.010),
            26.0
        );
    }

    #[test]
    fn truncated_drf_rows_are_rejected() {
        assert!(ResponseTable::from_str_table("13 1.0 2.0").is_err());
    }
}
