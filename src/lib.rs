//! Phantom Dose - mesh-phantom radiation dosimetry engine
//!
//! This library scores energy deposits on a tetrahedral-mesh reference
//! phantom and reduces them to ICRP protection quantities: organ
//! equivalent doses, bone doses by two attribution methods, effective
//! dose, and whole-body dose, with merge-friendly run statistics and
//! radionuclide primary sampling.

pub mod config;
pub mod dose;
pub mod model;
pub mod source;
pub mod stats;

pub use config::RunConfig;
pub use dose::{
    DoseEngine, DoseSampleTable, ProtectionQuantities, ProtectionQuantity, StepRecord,
    StepScorer, SubRegion,
};
pub use model::{ModelRegistry, PhantomModel, TetMesh};
pub use source::{ParticleKind, Radiation, Radionuclide};
pub use stats::{TallyAccumulator, TrialRecorder};
