//! Anatomical mesh models.
//!
//! A phantom is a tetrahedral mesh whose cells are assigned to named
//! regions, joined with per-region material, mass, bone, and colour tables.
//! Models are built once at startup, registered into a [`ModelRegistry`],
//! and treated as read-only for the rest of the run.

mod drf;
mod material;
mod mesh;
mod phantom;
mod registry;

pub use drf::{log_log_interpolate, ResponseCurves, ResponseTable, DRF_ENERGY_GRID_MEV};
pub use material::{parse_material_deck, parse_material_file, Material};
pub use mesh::{tet_volume, BoundingBox, RegionGeometry, TetMesh, Tetrahedron};
pub use phantom::{
    parse_bone_ratio_file, parse_colour_file, BoneMassRatios, Colour, PhantomModel,
};
pub use registry::ModelRegistry;
