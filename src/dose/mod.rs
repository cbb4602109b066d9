//! Dose scoring and protection-quantity reduction.

mod engine;
mod quantities;
mod scorer;
mod table;
mod taxonomy;

pub use engine::{
    DoseEngine, ProtectionQuantities, BONE_SURFACE_REGIONS, RED_BONE_MARROW_REGIONS,
    WHOLE_BODY_EXCLUDED,
};
pub use quantities::ProtectionQuantity;
pub use scorer::{StepRecord, StepScorer};
pub use table::{bs_dose_key, rbm_dose_key, DoseSampleTable};
pub use taxonomy::{BoneCompartment, SubRegion};
