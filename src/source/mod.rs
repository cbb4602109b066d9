//! Primary source sampling: radionuclide decay products and directional
//! importance biasing.

mod direction;
mod nuclide;
mod radiation;

pub use direction::{isotropic_direction, sample_direction_to_box, sample_direction_toward};
pub use nuclide::{
    co60_photon_source, cs137_photon_source, ir192_photon_source, DecayProduct, Radionuclide,
};
pub use radiation::{ParticleKind, Radiation, PHOTON_RADIATIONS};
