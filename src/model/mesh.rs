//! Tetrahedral phantom mesh.
//!
//! Loads a TetGen node/ele file pair into an indexed tetrahedral mesh and
//! aggregates per-region geometry (volume, tet count). Region ids come from
//! the optional attribute column of the ele file; tets without an attribute
//! are assigned the null region `-1`.
//!
//! Coordinates are in cm, volumes in cm³.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use anyhow::{bail, Context, Result};
use glam::DVec3;
use rand::Rng;

/// Axis-aligned bounding box of the mesh.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl BoundingBox {
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Grow the box by `margin` on every side.
    pub fn expanded(&self, margin: f64) -> BoundingBox {
        BoundingBox {
            min: self.min - DVec3::splat(margin),
            max: self.max + DVec3::splat(margin),
        }
    }
}

/// One tetrahedral cell: four node indices plus its region assignment.
#[derive(Debug, Clone, Copy)]
pub struct Tetrahedron {
    pub nodes: [usize; 4],
    pub region_id: i32,
}

/// Per-region geometric aggregates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionGeometry {
    pub volume_cm3: f64,
    pub num_tets: usize,
}

/// Indexed tetrahedral mesh with per-region geometry tables.
pub struct TetMesh {
    nodes: Vec<DVec3>,
    tets: Vec<Tetrahedron>,
    bounding_box: BoundingBox,
    region_geometry: HashMap<i32, RegionGeometry>,
    region_ids: BTreeSet<i32>,
    total_volume_cm3: f64,
}

impl TetMesh {
    /// Build a mesh from already-loaded node and tet tables.
    pub fn from_tables(nodes: Vec<DVec3>, tets: Vec<Tetrahedron>) -> Result<Self> {
        if nodes.is_empty() {
            bail!("mesh has no nodes");
        }
        for (i, tet) in tets.iter().enumerate() {
            for &n in &tet.nodes {
                if n >= nodes.len() {
                    bail!("tet {} references node {} out of {}", i, n, nodes.len());
                }
            }
        }

        let mut min = DVec3::splat(f64::MAX);
        let mut max = DVec3::splat(f64::MIN);
        for node in &nodes {
            min = min.min(*node);
            max = max.max(*node);
        }
        let bounding_box = BoundingBox { min, max };

        let mut region_geometry: HashMap<i32, RegionGeometry> = HashMap::new();
        let mut region_ids = BTreeSet::new();
        let mut total_volume_cm3 = 0.0;
        for tet in &tets {
            let volume = tet_volume(
                nodes[tet.nodes[0]],
                nodes[tet.nodes[1]],
                nodes[tet.nodes[2]],
                nodes[tet.nodes[3]],
            );
            let entry = region_geometry.entry(tet.region_id).or_default();
            entry.volume_cm3 += volume;
            entry.num_tets += 1;
            region_ids.insert(tet.region_id);
            total_volume_cm3 += volume;
        }

        Ok(Self {
            nodes,
            tets,
            bounding_box,
            region_geometry,
            region_ids,
            total_volume_cm3,
        })
    }

    /// Load a TetGen `.node`/`.ele` file pair.
    pub fn from_files<P: AsRef<Path>>(node_path: P, ele_path: P) -> Result<Self> {
        let nodes = parse_node_file(node_path.as_ref())
            .with_context(|| format!("loading node file {:?}", node_path.as_ref()))?;
        let tets = parse_ele_file(ele_path.as_ref())
            .with_context(|| format!("loading ele file {:?}", ele_path.as_ref()))?;
        log::info!(
            "Loaded tetrahedral mesh: {} nodes, {} tets",
            nodes.len(),
            tets.len()
        );
        Self::from_tables(nodes, tets)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_tets(&self) -> usize {
        self.tets.len()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    pub fn total_volume_cm3(&self) -> f64 {
        self.total_volume_cm3
    }

    /// Region ids present in the mesh, in ascending order.
    pub fn region_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.region_ids.iter().copied()
    }

    /// Region id of a cell, or the null region for an unknown cell index.
    pub fn cell_region(&self, tet_index: usize) -> i32 {
        self.tets.get(tet_index).map_or(-1, |t| t.region_id)
    }

    /// Total volume of a region; 0 for an unknown id.
    pub fn region_volume_cm3(&self, region_id: i32) -> f64 {
        self.region_geometry
            .get(&region_id)
            .map_or(0.0, |g| g.volume_cm3)
    }

    /// Tet count of a region; 0 for an unknown id.
    pub fn region_num_tets(&self, region_id: i32) -> usize {
        self.region_geometry
            .get(&region_id)
            .map_or(0, |g| g.num_tets)
    }

    /// Uniformly sample a point inside cell `tet_index`.
    ///
    /// Barycentric folding per Rocchini & Cignoni, J Graphics Tools 2001.
    pub fn sample_point_in_tet<R: Rng + ?Sized>(&self, tet_index: usize, rng: &mut R) -> DVec3 {
        let tet = &self.tets[tet_index];
        let mut c1: f64 = rng.gen();
        let mut c2: f64 = rng.gen();
        let mut c3: f64 = rng.gen();

        if c1 + c2 > 1.0 {
            c1 = 1.0 - c1;
            c2 = 1.0 - c2;
        }
        if c2 + c3 > 1.0 {
            let prev = c3;
            c3 = 1.0 - c1 - c2;
            c2 = 1.0 - prev;
        } else if c1 + c2 + c3 > 1.0 {
            let prev = c3;
            c3 = c1 + c2 + c3 - 1.0;
            c1 = 1.0 - c2 - prev;
        }
        let c0 = 1.0 - c1 - c2 - c3;

        self.nodes[tet.nodes[0]] * c0
            + self.nodes[tet.nodes[1]] * c1
            + self.nodes[tet.nodes[2]] * c2
            + self.nodes[tet.nodes[3]] * c3
    }
}

/// Volume of a tetrahedron from its vertices: |det(b−a, c−a, d−a)| / 6.
pub fn tet_volume(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> f64 {
    ((b - a).cross(c - a)).dot(d - a).abs() / 6.0
}

fn parse_node_file(path: &Path) -> Result<Vec<DVec3>> {
    let contents = std::fs::read_to_string(path)?;
    let mut tokens = contents.split_whitespace();

    let n_nodes: usize = tokens
        .next()
        .context("node file is empty")?
        .parse()
        .context("node count")?;
    // Remaining header fields: dimension, #attributes, boundary flag
    for _ in 0..3 {
        tokens.next().context("truncated node header")?;
    }

    let mut nodes = Vec::with_capacity(n_nodes);
    for i in 0..n_nodes {
        let mut field = |name| {
            tokens
                .next()
                .with_context(|| format!("node {}: missing {}", i, name))
        };
        let _index = field("index")?;
        let x: f64 = field("x")?.parse()?;
        let y: f64 = field("y")?.parse()?;
        let z: f64 = field("z")?.parse()?;
        nodes.push(DVec3::new(x, y, z));
    }
    Ok(nodes)
}

fn parse_ele_file(path: &Path) -> Result<Vec<Tetrahedron>> {
    let contents = std::fs::read_to_string(path)?;
    let mut lines = contents.lines().filter(|l| !l.trim().is_empty());

    let header = lines.next().context("ele file is empty")?;
    let mut header_tokens = header.split_whitespace();
    let n_tets: usize = header_tokens
        .next()
        .context("tet count")?
        .parse()
        .context("tet count")?;

    let mut tets = Vec::with_capacity(n_tets);
    for i in 0..n_tets {
        let line = lines.next().with_context(|| format!("missing tet {}", i))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 {
            bail!("tet {}: expected at least 5 fields, got {}", i, fields.len());
        }
        let mut nodes = [0usize; 4];
        for (slot, field) in nodes.iter_mut().zip(&fields[1..5]) {
            *slot = field.parse().with_context(|| format!("tet {}: node index", i))?;
        }
        // Attribute column is optional; absent means the null region.
        let region_id = match fields.get(5) {
            Some(field) => field.parse().with_context(|| format!("tet {}: region id", i))?,
            None => -1,
        };
        tets.push(Tetrahedron { nodes, region_id });
    }
    Ok(tets)
}
