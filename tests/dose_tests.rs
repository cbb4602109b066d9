//! Integration tests for dose scoring and reduction.
//!
//! Tests verify:
//! - Step scoring into the sample table, including the bone-dose gate
//! - Mass-averaged organ doses end to end (scorer → table → engine)
//! - The negative-key namespace round trip for response-function doses
//! - Effective dose composition across the tissue weighting groups

use std::collections::HashMap;

use glam::DVec3;

use phantom_dose::dose::{
    BoneCompartment, DoseEngine, DoseSampleTable, ProtectionQuantity, StepRecord, StepScorer,
    SubRegion,
};
use phantom_dose::model::{
    BoneMassRatios, Material, PhantomModel, ResponseCurves, ResponseTable, TetMesh, Tetrahedron,
};
use phantom_dose::source::ParticleKind;

/// Two lung regions with masses 10 g and 90 g (unit tets, densities 60
/// and 540 over a 1/6 cm³ volume).
fn lung_phantom() -> PhantomModel {
    let nodes = vec![
        DVec3::ZERO,
        DVec3::X,
        DVec3::Y,
        DVec3::Z,
        DVec3::new(3.0, 0.0, 0.0),
        DVec3::new(4.0, 0.0, 0.0),
        DVec3::new(3.0, 1.0, 0.0),
        DVec3::new(3.0, 0.0, 1.0),
    ];
    let tets = vec![
        Tetrahedron {
            nodes: [0, 1, 2, 3],
            region_id: SubRegion::LungR.id(),
        },
        Tetrahedron {
            nodes: [4, 5, 6, 7],
            region_id: SubRegion::LungL.id(),
        },
    ];
    let mesh = TetMesh::from_tables(nodes, tets).unwrap();

    let mut materials = HashMap::new();
    materials.insert(
        SubRegion::LungR.id(),
        Material {
            name: "LungR".to_owned(),
            density_g_cm3: 60.0,
            elements: vec![],
        },
    );
    materials.insert(
        SubRegion::LungL.id(),
        Material {
            name: "LungL".to_owned(),
            density_g_cm3: 540.0,
            elements: vec![],
        },
    );
    PhantomModel::from_tables("Lungs", mesh, materials)
}

/// One spongiosa region with flat DRF curves and known mass ratios.
fn spongiosa_phantom() -> PhantomModel {
    let region = SubRegion::CraniumS.id();
    let nodes = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
    let tets = vec![Tetrahedron {
        nodes: [0, 1, 2, 3],
        region_id: region,
    }];
    let mesh = TetMesh::from_tables(nodes, tets).unwrap();

    let mut curves = HashMap::new();
    curves.insert(
        region,
        ResponseCurves {
            rbm: [2.0; 25],
            bs: [6.0; 25],
        },
    );
    let mut ratios = HashMap::new();
    ratios.insert(region, BoneMassRatios { rbm: 0.5, bs: 0.25 });

    PhantomModel::from_tables("Spongiosa", mesh, HashMap::new())
        .with_response_table(ResponseTable::new(curves))
        .with_bone_ratios(ratios)
}

fn gamma_step(region_id: i32, energy_deposit_mev: f64) -> StepRecord {
    StepRecord {
        region_id,
        energy_deposit_mev,
        step_length_cm: 0.0,
        pre_step_energy_mev: 1.0,
        weight: 1.0,
        particle: ParticleKind::Gamma,
    }
}

// ============================================================================
// End-to-End Organ Dose Tests
// ============================================================================

#[test]
fn test_two_region_average_dose_round_trip() {
    let phantom = lung_phantom();
    let scorer = StepScorer::new(&phantom);
    let engine = DoseEngine::for_phantom(&phantom);
    let mut table = DoseSampleTable::new();

    scorer.score(&mut table, &gamma_step(SubRegion::LungR.id(), 5.0));
    scorer.score(&mut table, &gamma_step(SubRegion::LungL.id(), 45.0));

    let out = engine.compute(&table);
    assert!(
        (out.get(ProtectionQuantity::Lungs) - 0.5).abs() < 1e-12,
        "(5 + 45) MeV over (10 + 90) g must average to 0.5 MeV/g"
    );
}

#[test]
fn test_track_weight_scales_scored_energy() {
    let phantom = lung_phantom();
    let scorer = StepScorer::new(&phantom);
    let mut table = DoseSampleTable::new();

    let mut step = gamma_step(SubRegion::LungR.id(), 2.0);
    step.weight = 0.25;
    scorer.score(&mut table, &step);

    assert!((table.energy_deposit(SubRegion::LungR.id()) - 0.5).abs() < 1e-15);
}

// ============================================================================
// Bone Dose Tests
// ============================================================================

#[test]
fn test_bone_dose_round_trip_through_the_negative_namespace() {
    let phantom = spongiosa_phantom();
    let scorer = StepScorer::new(&phantom);
    let engine = DoseEngine::for_phantom(&phantom);
    let mut table = DoseSampleTable::new();

    let region = SubRegion::CraniumS.id();
    let step = StepRecord {
        region_id: region,
        energy_deposit_mev: 0.0,
        step_length_cm: 0.3,
        pre_step_energy_mev: 0.662,
        weight: 1.0,
        particle: ParticleKind::Gamma,
    };
    assert!(scorer.score(&mut table, &step));

    // fluence = 0.3 / (1/6) = 1.8; doses = fluence × flat factor.
    let fluence = 0.3 / phantom.region_volume_cm3(region);
    assert!((table.rbm_dose(region).unwrap() - fluence * 2.0).abs() < 1e-12);
    assert!((table.bs_dose(region).unwrap() - fluence * 6.0).abs() < 1e-12);
    assert_eq!(table.energy_deposit(region), 0.0);

    let out = engine.compute(&table);
    assert!(
        (out.get(ProtectionQuantity::RedBoneMarrowByDrf) - fluence * 2.0 * 0.5).abs() < 1e-12
    );
    assert!(
        (out.get(ProtectionQuantity::BoneSurfaceByDrf) - fluence * 6.0 * 0.25).abs() < 1e-12
    );
}

#[test]
fn test_charged_particles_do_not_score_bone_dose() {
    let phantom = spongiosa_phantom();
    let scorer = StepScorer::new(&phantom);
    let mut table = DoseSampleTable::new();

    let step = StepRecord {
        region_id: SubRegion::CraniumS.id(),
        energy_deposit_mev: 1.0,
        step_length_cm: 0.3,
        pre_step_energy_mev: 0.5,
        weight: 1.0,
        particle: ParticleKind::Electron,
    };
    scorer.score(&mut table, &step);

    assert!(table.has_energy_deposits());
    assert!(
        !table.has_bone_doses(),
        "response functions apply to indirectly ionizing particles only"
    );
}

#[test]
fn test_bone_dose_skips_regions_without_curves() {
    let phantom = lung_phantom();
    let scorer = StepScorer::new(&phantom);
    let mut table = DoseSampleTable::new();

    let mut step = gamma_step(SubRegion::LungR.id(), 0.0);
    step.step_length_cm = 0.5;
    assert!(!scorer.score(&mut table, &step));
    assert!(table.is_empty());
}

// ============================================================================
// Namespace Tests
// ============================================================================

#[test]
fn test_energy_and_bone_keys_never_collide() {
    let mut table = DoseSampleTable::new();
    for region in SubRegion::all() {
        table.add_energy_deposit(region.id(), 1.0);
        table.add_rbm_dose(region.id(), 2.0);
        table.add_bs_dose(region.id(), 3.0);
    }
    assert_eq!(table.len(), 3 * 170);
    assert_eq!(table.energy_deposit(SubRegion::CraniumS.id()), 1.0);
    assert_eq!(table.rbm_dose(SubRegion::CraniumS.id()), Some(2.0));
    assert_eq!(table.bs_dose(SubRegion::CraniumS.id()), Some(3.0));
}

// ============================================================================
// Effective Dose Tests
// ============================================================================

#[test]
fn test_effective_dose_variants_agree_on_shared_tissues() {
    let phantom = spongiosa_phantom();
    let engine = DoseEngine::for_phantom(&phantom);
    let mut table = DoseSampleTable::new();
    table.add_rbm_dose(SubRegion::CraniumS.id(), 4.0);
    table.add_bs_dose(SubRegion::CraniumS.id(), 8.0);

    let out = engine.compute(&table);
    // Only bone doses present: E = 0.12 × RBM + 0.01 × BS.
    let expected = 0.12 * out.get(ProtectionQuantity::RedBoneMarrowByDrf)
        + 0.01 * out.get(ProtectionQuantity::BoneSurfaceByDrf);
    assert!((out.get(ProtectionQuantity::EffectiveDose) - expected).abs() < 1e-15);
    assert!(
        (out.get(ProtectionQuantity::EffectiveDose)
            - out.get(ProtectionQuantity::EffectiveDoseByDrfWhole))
        .abs()
            < 1e-15,
        "target and whole variants coincide when only bone tissue is dosed"
    );
    assert_eq!(out.get(ProtectionQuantity::EffectiveDoseByMassRatioTarget), 0.0);
}

#[test]
fn test_response_factor_uses_the_compartment_curve() {
    let phantom = spongiosa_phantom();
    let region = SubRegion::CraniumS.id();
    assert_eq!(
        phantom.response_factor(region, BoneCompartment::RedBoneMarrow, 1.0),
        2.0
    );
    assert_eq!(
        phantom.response_factor(region, BoneCompartment::BoneSurface, 1.0),
        6.0
    );
}
