//! Integration tests for phantom model construction.
//!
//! Tests verify:
//! - TetGen node/ele import and per-region geometry aggregation
//! - Material deck parsing and mass derivation
//! - Response-function interpolation on the log energy grid
//! - Registry registration semantics

use std::collections::HashMap;

use glam::DVec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use phantom_dose::model::{
    log_log_interpolate, parse_material_deck, Material, ModelRegistry, PhantomModel,
    ResponseCurves, ResponseTable, TetMesh, Tetrahedron, DRF_ENERGY_GRID_MEV,
};

fn two_region_mesh() -> TetMesh {
    let nodes = vec![
        DVec3::ZERO,
        DVec3::X,
        DVec3::Y,
        DVec3::Z,
        DVec3::new(3.0, 0.0, 0.0),
        DVec3::new(5.0, 0.0, 0.0), // edge length 2, volume 8/6
        DVec3::new(3.0, 2.0, 0.0),
        DVec3::new(3.0, 0.0, 2.0),
    ];
    let tets = vec![
        Tetrahedron {
            nodes: [0, 1, 2, 3],
            region_id: 1,
        },
        Tetrahedron {
            nodes: [4, 5, 6, 7],
            region_id: 2,
        },
    ];
    TetMesh::from_tables(nodes, tets).unwrap()
}

// ============================================================================
// Mesh Geometry Tests
// ============================================================================

#[test]
fn test_region_volumes_sum_to_total() {
    let mesh = two_region_mesh();
    assert!((mesh.region_volume_cm3(1) - 1.0 / 6.0).abs() < 1e-12);
    assert!((mesh.region_volume_cm3(2) - 8.0 / 6.0).abs() < 1e-12);
    assert!(
        (mesh.total_volume_cm3() - (1.0 + 8.0) / 6.0).abs() < 1e-12,
        "total volume must equal the sum over regions"
    );
}

#[test]
fn test_bounding_box_covers_all_nodes() {
    let mesh = two_region_mesh();
    let bbox = mesh.bounding_box();
    assert_eq!(bbox.min, DVec3::ZERO);
    assert_eq!(bbox.max, DVec3::new(5.0, 2.0, 2.0));
}

#[test]
fn test_sampled_points_stay_inside_their_tet() {
    let mesh = two_region_mesh();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..1000 {
        let p = mesh.sample_point_in_tet(0, &mut rng);
        // Unit tet at the origin: x,y,z >= 0 and x+y+z <= 1.
        assert!(p.x >= 0.0 && p.y >= 0.0 && p.z >= 0.0);
        assert!(p.x + p.y + p.z <= 1.0 + 1e-12);
    }
}

#[test]
fn test_node_and_ele_files_parse() {
    let dir = std::env::temp_dir().join("phantom_dose_model_tests");
    std::fs::create_dir_all(&dir).unwrap();
    let node_path = dir.join("tiny.node");
    let ele_path = dir.join("tiny.ele");
    std::fs::write(
        &node_path,
        "4 3 0 0\n0 0.0 0.0 0.0\n1 1.0 0.0 0.0\n2 0.0 1.0 0.0\n3 0.0 0.0 1.0\n",
    )
    .unwrap();
    std::fs::write(&ele_path, "1 4 1\n0 0 1 2 3 7\n").unwrap();

    let mesh = TetMesh::from_files(&node_path, &ele_path).unwrap();
    assert_eq!(mesh.num_nodes(), 4);
    assert_eq!(mesh.num_tets(), 1);
    assert_eq!(mesh.cell_region(0), 7);
    assert!((mesh.region_volume_cm3(7) - 1.0 / 6.0).abs() < 1e-12);
}

#[test]
fn test_out_of_range_node_reference_is_rejected() {
    let nodes = vec![DVec3::ZERO, DVec3::X, DVec3::Y];
    let tets = vec![Tetrahedron {
        nodes: [0, 1, 2, 9],
        region_id: 1,
    }];
    assert!(TetMesh::from_tables(nodes, tets).is_err());
}

// ============================================================================
// Material and Mass Tests
// ============================================================================

#[test]
fn test_material_deck_parses_cards_and_fractions() {
    let deck = "\
C  Adipose  0.95  g/cm3
m1
   1000  -0.114
   6000  -0.589
   8000  -0.278
C  CorticalBone  1.92  g/cm3
m2
   20000  -0.228
";
    let materials = parse_material_deck(deck).unwrap();
    assert_eq!(materials.len(), 2);
    let adipose = &materials[&1];
    assert_eq!(adipose.name, "Adipose");
    assert!((adipose.density_g_cm3 - 0.95).abs() < 1e-12);
    assert_eq!(adipose.elements[0], (1, 0.114));
    // Material names are a single token; "C <name> <density> g/cm3".
    assert_eq!(materials[&2].name, "CorticalBone");
    assert!((materials[&2].density_g_cm3 - 1.92).abs() < 1e-12);
    assert_eq!(materials[&2].elements[0], (20, 0.228));
}

#[test]
fn test_mass_is_volume_times_density() {
    let mut materials = HashMap::new();
    materials.insert(
        2,
        Material {
            name: "Dense".to_owned(),
            density_g_cm3: 2.0,
            elements: vec![(8, 1.0)],
        },
    );
    let phantom = PhantomModel::from_tables("TwoRegion", two_region_mesh(), materials);

    // Region 1 has no material card and falls back to unit-density water.
    assert!((phantom.region_mass_g(1) - 1.0 / 6.0).abs() < 1e-12);
    assert!((phantom.region_mass_g(2) - 2.0 * 8.0 / 6.0).abs() < 1e-12);
    assert!(
        (phantom.total_mass_g() - (1.0 / 6.0 + 16.0 / 6.0)).abs() < 1e-12,
        "phantom mass must equal the sum of region masses"
    );
}

// ============================================================================
// Response-Function Tests
// ============================================================================

#[test]
fn test_log_log_interpolation_is_exact_for_power_laws() {
    // factor(E) = 2 E^1.5 sampled on the grid must interpolate exactly.
    let mut values = [0.0; 25];
    for (i, v) in values.iter_mut().enumerate() {
        *v = 2.0 * DRF_ENERGY_GRID_MEV[i].powf(1.5);
    }
    let energy = (DRF_ENERGY_GRID_MEV[7] * DRF_ENERGY_GRID_MEV[8]).sqrt();
    let interpolated = log_log_interpolate(energy, &DRF_ENERGY_GRID_MEV, &values);
    assert!((interpolated - 2.0 * energy.powf(1.5)).abs() / interpolated < 1e-12);
}

#[test]
fn test_interpolation_clamps_outside_the_grid() {
    let values = [3.0; 25];
    let below = log_log_interpolate(1e-4, &DRF_ENERGY_GRID_MEV, &values);
    let above = log_log_interpolate(100.0, &DRF_ENERGY_GRID_MEV, &values);
    assert_eq!(below, 3.0);
    assert_eq!(above, 3.0);
}

#[test]
fn test_phantom_capability_queries() {
    let phantom = PhantomModel::from_tables("Plain", two_region_mesh(), HashMap::new());
    assert!(!phantom.has_bone_data());
    assert!(!phantom.has_drf_data());

    let mut curves = HashMap::new();
    curves.insert(
        1,
        ResponseCurves {
            rbm: [1.0; 25],
            bs: [1.0; 25],
        },
    );
    let phantom = phantom.with_response_table(ResponseTable::new(curves));
    assert!(phantom.has_drf_data());
    assert!(phantom.has_drf_for(1));
    assert!(!phantom.has_drf_for(2));
}

// ============================================================================
// Registry Tests
// ============================================================================

#[test]
fn test_registry_keeps_the_first_of_duplicate_names() {
    let mut registry = ModelRegistry::new();
    let mut materials = HashMap::new();
    materials.insert(
        1,
        Material {
            name: "Marker".to_owned(),
            density_g_cm3: 3.0,
            elements: vec![],
        },
    );
    registry.register(PhantomModel::from_tables("AM", two_region_mesh(), materials));
    registry.register(PhantomModel::from_tables("AM", two_region_mesh(), HashMap::new()));

    assert_eq!(registry.len(), 2);
    let first = registry.get("AM").unwrap();
    assert!(
        (first.region_mass_g(1) - 3.0 / 6.0).abs() < 1e-12,
        "lookups must resolve to the first registration"
    );
}
