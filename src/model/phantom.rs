//! The phantom model: mesh geometry joined with per-region attribute tables.
//!
//! Built once at startup and read-only afterwards. Mandatory inputs are the
//! mesh and the material table (masses cannot be derived without them);
//! bone mass ratios, DRF curves, and colours are optional capabilities that
//! degrade to documented defaults when absent.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use super::drf::ResponseTable;
use super::material::{parse_material_file, Material};
use super::mesh::{BoundingBox, TetMesh};
use crate::dose::BoneCompartment;

/// RBM/BS mass fractions of a spongiosa region.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoneMassRatios {
    pub rbm: f64,
    pub bs: f64,
}

/// Display colour of a region (RGBA, 0–1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colour {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Default for Colour {
    /// Flesh tone used for regions without a colour entry.
    fn default() -> Self {
        Self {
            r: 1.0,
            g: 0.752941,
            b: 0.627451,
            a: 0.01,
        }
    }
}

/// A named tetrahedral phantom with per-region mass, material, bone, and
/// colour tables.
pub struct PhantomModel {
    name: String,
    mesh: TetMesh,
    materials: HashMap<i32, Material>,
    default_material: Material,
    masses_g: HashMap<i32, f64>,
    whole_mass_g: f64,
    bone_ratios: HashMap<i32, BoneMassRatios>,
    response_table: ResponseTable,
    colours: HashMap<i32, Colour>,
}

impl PhantomModel {
    /// Assemble a phantom from already-loaded tables. Region masses are
    /// derived here: mass = region volume × material density.
    pub fn from_tables(
        name: impl Into<String>,
        mesh: TetMesh,
        materials: HashMap<i32, Material>,
    ) -> Self {
        let default_material = Material::soft_tissue_equivalent();
        let mut masses_g = HashMap::new();
        let mut whole_mass_g = 0.0;
        for region_id in mesh.region_ids() {
            let density = materials
                .get(&region_id)
                .unwrap_or(&default_material)
                .density_g_cm3;
            let mass = mesh.region_volume_cm3(region_id) * density;
            masses_g.insert(region_id, mass);
            whole_mass_g += mass;
        }

        Self {
            name: name.into(),
            mesh,
            materials,
            default_material,
            masses_g,
            whole_mass_g,
            bone_ratios: HashMap::new(),
            response_table: ResponseTable::default(),
            colours: HashMap::new(),
        }
    }

    /// Load a phantom from its data files. Mesh and material files are
    /// mandatory; bone-ratio, DRF, and colour files are optional and their
    /// absence only logs a warning.
    pub fn load<P: AsRef<Path>>(
        name: impl Into<String>,
        node_path: P,
        ele_path: P,
        material_path: P,
        bone_ratio_path: Option<P>,
        drf_path: Option<P>,
        colour_path: Option<P>,
    ) -> Result<Self> {
        let name = name.into();
        let mesh = TetMesh::from_files(&node_path, &ele_path)
            .with_context(|| format!("phantom '{}': mesh", name))?;
        let materials = parse_material_file(&material_path)
            .with_context(|| format!("phantom '{}': materials", name))?;
        let mut phantom = Self::from_tables(name, mesh, materials);

        if let Some(path) = bone_ratio_path {
            match parse_bone_ratio_file(&path) {
                Ok(ratios) => phantom.bone_ratios = ratios,
                Err(e) => log::warn!(
                    "phantom '{}': no bone mass-ratio data ({e:#}); bone doses by mass ratio will be 0",
                    phantom.name
                ),
            }
        }
        if let Some(path) = drf_path {
            match ResponseTable::from_file(&path) {
                Ok(table) => phantom.response_table = table,
                Err(e) => log::warn!(
                    "phantom '{}': no DRF data ({e:#}); bone doses by DRF will be 0",
                    phantom.name
                ),
            }
        }
        if let Some(path) = colour_path {
            match parse_colour_file(&path) {
                Ok(colours) => phantom.colours = colours,
                Err(e) => log::warn!(
                    "phantom '{}': no colour data ({e:#}); using default colours",
                    phantom.name
                ),
            }
        }

        Ok(phantom)
    }

    /// Attach bone mass-ratio data (builder style, for in-memory tables).
    pub fn with_bone_ratios(mut self, ratios: HashMap<i32, BoneMassRatios>) -> Self {
        self.bone_ratios = ratios;
        self
    }

    /// Attach DRF curves (builder style, for in-memory tables).
    pub fn with_response_table(mut self, table: ResponseTable) -> Self {
        self.response_table = table;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mesh(&self) -> &TetMesh {
        &self.mesh
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.mesh.bounding_box()
    }

    pub fn total_volume_cm3(&self) -> f64 {
        self.mesh.total_volume_cm3()
    }

    pub fn total_mass_g(&self) -> f64 {
        self.whole_mass_g
    }

    /// Region mass; 0 for an unknown id.
    pub fn region_mass_g(&self, region_id: i32) -> f64 {
        self.masses_g.get(&region_id).copied().unwrap_or(0.0)
    }

    /// Region volume; 0 for an unknown id.
    pub fn region_volume_cm3(&self, region_id: i32) -> f64 {
        self.mesh.region_volume_cm3(region_id)
    }

    /// Region material; the soft-tissue default for an unknown id.
    pub fn region_material(&self, region_id: i32) -> &Material {
        self.materials.get(&region_id).unwrap_or(&self.default_material)
    }

    /// Region display colour; flesh tone for an unknown id.
    pub fn region_colour(&self, region_id: i32) -> Colour {
        self.colours.get(&region_id).copied().unwrap_or_default()
    }

    /// Bone compartment mass fraction of a region; 0 when the region is
    /// not a spongiosa or no bone data was loaded.
    pub fn bone_mass_ratio(&self, region_id: i32, compartment: BoneCompartment) -> f64 {
        self.bone_ratios
            .get(&region_id)
            .map_or(0.0, |ratios| match compartment {
                BoneCompartment::RedBoneMarrow => ratios.rbm,
                BoneCompartment::BoneSurface => ratios.bs,
            })
    }

    /// Whether bone mass-ratio data was loaded.
    pub fn has_bone_data(&self) -> bool {
        !self.bone_ratios.is_empty()
    }

    /// Whether DRF curves were loaded.
    pub fn has_drf_data(&self) -> bool {
        !self.response_table.is_empty()
    }

    /// Whether a region carries DRF curves.
    pub fn has_drf_for(&self, region_id: i32) -> bool {
        self.response_table.has_region(region_id)
    }

    /// Interpolated fluence-to-dose factor for a bone region.
    pub fn response_factor(
        &self,
        region_id: i32,
        compartment: BoneCompartment,
        energy_mev: f64,
    ) -> f64 {
        self.response_table
            .response_factor(region_id, compartment, energy_mev)
    }

    /// Per-region table formatted for logging.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>9} {:>10} {:>12} {:>12} {:>10}  Material",
            "Region", "Tets", "Vol [cm3]", "Mass [g]", "d [g/cm3]"
        );
        for region_id in self.mesh.region_ids() {
            let material = self.region_material(region_id);
            let _ = writeln!(
                out,
                "{:>9} {:>10} {:>12.3} {:>12.3} {:>10.3}  {}",
                region_id,
                self.mesh.region_num_tets(region_id),
                self.mesh.region_volume_cm3(region_id),
                self.region_mass_g(region_id),
                material.density_g_cm3,
                material.name
            );
        }
        let bbox = self.bounding_box();
        let size = bbox.size();
        let _ = writeln!(out);
        let _ = writeln!(out, "   Phantom name      {}", self.name);
        let _ = writeln!(
            out,
            "   Bounding box      {:.2} x {:.2} x {:.2} cm3",
            size.x, size.y, size.z
        );
        let _ = writeln!(out, "   Total volume      {:.3} cm3", self.total_volume_cm3());
        let _ = writeln!(out, "   Total mass        {:.3} g", self.total_mass_g());
        let _ = writeln!(out, "   Tetrahedrons      {}", self.mesh.num_tets());
        out
    }
}

/// Parse a bone mass-ratio file: rows of `regionId rbmRatio bsRatio`.
pub fn parse_bone_ratio_file<P: AsRef<Path>>(path: P) -> Result<HashMap<i32, BoneMassRatios>> {
    let contents = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("loading bone mass-ratio file {:?}", path.as_ref()))?;
    let mut table = HashMap::new();
    for (line_no, line) in contents.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let (Some(id), Some(rbm), Some(bs)) = (tokens.next(), tokens.next(), tokens.next()) else {
            continue;
        };
        let region_id: i32 = id
            .parse()
            .with_context(|| format!("bone ratio line {}: region id", line_no + 1))?;
        let rbm: f64 = rbm
            .parse()
            .with_context(|| format!("bone ratio line {}: RBM ratio", line_no + 1))?;
        let bs: f64 = bs
            .parse()
            .with_context(|| format!("bone ratio line {}: BS ratio", line_no + 1))?;
        table.insert(region_id, BoneMassRatios { rbm, bs });
    }
    log::info!("Loaded bone mass ratios for {} regions", table.len());
    Ok(table)
}

/// Parse a colour file: rows of `regionId r g b a`.
pub fn parse_colour_file<P: AsRef<Path>>(path: P) -> Result<HashMap<i32, Colour>> {
    let contents = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("loading colour file {:?}", path.as_ref()))?;
    let mut table = HashMap::new();
    for line in contents.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 {
            continue;
        }
        let region_id: i32 = fields[0].parse().context("colour row: region id")?;
        let mut rgba = [0.0f64; 4];
        for (slot, field) in rgba.iter_mut().zip(&fields[1..5]) {
            *slot = field.parse().context("colour row: component")?;
        }
        table.insert(
            region_id,
            Colour {
                r: rgba[0],
                g: rgba[1],
                b: rgba[2],
                a: rgba[3],
            },
        );
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mesh::Tetrahedron;
    use glam::DVec3;

    fn two_region_phantom() -> PhantomModel {
        // Two unit-ish tets sharing a face, regions 1 and 2.
        let nodes = vec![
            DVec3::ZERO,
            DVec3::X,
            DVec3::Y,
            DVec3::Z,
            DVec3::new(1.0, 1.0, 1.0),
        ];
        let tets = vec![
            Tetrahedron {
                nodes: [0, 1, 2, 3],
                region_id: 1,
            },
            Tetrahedron {
                nodes: [1, 2, 3, 4],
                region_id: 2,
            },
        ];
        let mesh = TetMesh::from_tables(nodes, tets).unwrap();
        let mut materials = HashMap::new();
        materials.insert(
            1,
            Material {
                name: "A".into(),
                density_g_cm3: 2.0,
                elements: vec![],
            },
        );
        // Region 2 has no material entry: default density 1.0 applies.
        PhantomModel::from_tables("TestPhantom", mesh, materials)
    }

    #[test]
    fn region_mass_is_volume_times_density() {
        let phantom = two_region_phantom();
        let v1 = phantom.region_volume_cm3(1);
        let v2 = phantom.region_volume_cm3(2);
        assert!((phantom.region_mass_g(1) - v1 * 2.0).abs() < 1e-12);
        assert!((phantom.region_mass_g(2) - v2 * 1.0).abs() < 1e-12);
        assert!(
            (phantom.total_mass_g() - (phantom.region_mass_g(1) + phantom.region_mass_g(2))).abs()
                < 1e-12
        );
    }

    #[test]
    fn unknown_region_lookups_use_defaults() {
        let phantom = two_region_phantom();
        assert_eq!(phantom.region_mass_g(99), 0.0);
        assert_eq!(phantom.region_material(99).name, "SoftTissueEquivalent");
        assert_eq!(phantom.region_colour(99), Colour::default());
        assert_eq!(
            phantom.bone_mass_ratio(99, BoneCompartment::RedBoneMarrow),
            0.0
        );
    }

    #[test]
    fn bone_capability_reflects_loaded_tables() {
        let phantom = two_region_phantom();
        assert!(!phantom.has_bone_data());
        assert!(!phantom.has_drf_data());

        let mut ratios = HashMap::new();
        ratios.insert(1, BoneMassRatios { rbm: 0.3, bs: 0.1 });
        let phantom = phantom.with_bone_ratios(ratios);
        assert!(phantom.has_bone_data());
        assert_eq!(phantom.bone_mass_ratio(1, BoneCompartment::RedBoneMarrow), 0.3);
        assert_eq!(phantom.bone_mass_ratio(1, BoneCompartment::BoneSurface), 0.1);
    }

    #[test]
    fn summary_lists_every_region() {
        let phantom = two_region_phantom();
        let summary = phantom.summary();
        assert!(summary.contains("TestPhantom"));
        assert!(summary.contains("SoftTissueEquivalent"));
    }
}
