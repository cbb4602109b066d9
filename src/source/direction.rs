//! Directional importance biasing toward a phantom.
//!
//! An external point source wastes most of its 4π emission; aiming every
//! primary into the cone that just covers the phantom's bounding box and
//! scaling the weight by the subtended solid angle fraction keeps the
//! tallies unbiased while spending all trials on directions that can hit.

use glam::{DQuat, DVec3};
use log::warn;
use rand::Rng;
use rand_distr::{Distribution, UnitSphere};

use crate::model::{BoundingBox, ModelRegistry};

/// Uniform direction on the unit sphere.
pub fn isotropic_direction<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    let v: [f64; 3] = UnitSphere.sample(rng);
    DVec3::from_array(v)
}

/// Sample a direction from `reference` toward the named phantom's
/// bounding box, grown by `margin_cm` on every side.
///
/// The cone half-angle is the largest angle between the box-center axis
/// and any of the eight box corners, so the cone always covers the whole
/// box. The weight picks up the covered solid angle fraction. Degenerate
/// cases fall back to an isotropic draw with the weight untouched: no
/// target name, an unresolved name (logged), or a reference point inside
/// or beside the box (cone half-angle ≥ 90°).
pub fn sample_direction_toward<R: Rng + ?Sized>(
    reference: DVec3,
    registry: &ModelRegistry,
    target_name: Option<&str>,
    margin_cm: f64,
    rng: &mut R,
    weight: &mut f64,
) -> DVec3 {
    let Some(name) = target_name else {
        return isotropic_direction(rng);
    };
    let Some(phantom) = registry.get(name) else {
        warn!("no phantom named '{}' to aim at; sampling isotropically", name);
        return isotropic_direction(rng);
    };

    let mut bbox = phantom.bounding_box();
    if margin_cm > 0.0 {
        bbox = bbox.expanded(margin_cm);
    }
    sample_direction_to_box(reference, bbox, rng, weight)
}

/// Cone sampling toward an explicit box.
pub fn sample_direction_to_box<R: Rng + ?Sized>(
    reference: DVec3,
    bbox: BoundingBox,
    rng: &mut R,
    weight: &mut f64,
) -> DVec3 {
    let target_vector = bbox.center() - reference;

    // A reference inside the box (or exactly at its center, where the
    // axis is the zero vector and angles are undefined) sees the full
    // sphere. Fall back before touching the weight.
    if bbox.contains(reference) || target_vector.length_squared() == 0.0 {
        return isotropic_direction(rng);
    }

    // Conservative half-angle: widest corner as seen from the reference.
    let mut max_theta: f64 = 0.0;
    for corner in box_corners(&bbox) {
        let to_corner = corner - reference;
        max_theta = max_theta.max(target_vector.angle_between(to_corner));
    }

    let cos_theta = max_theta.cos();
    if cos_theta <= 0.0 {
        return isotropic_direction(rng);
    }

    // Solid angle of the cone over the full sphere.
    *weight *= (1.0 - cos_theta) / 2.0;

    // Uniform draw inside the cone about +z, rotated onto the target axis.
    let cos_sample = cos_theta + (1.0 - cos_theta) * rng.gen::<f64>();
    let sin_sample = (1.0 - cos_sample * cos_sample).max(0.0).sqrt();
    let phi = std::f64::consts::TAU * rng.gen::<f64>();
    let local = DVec3::new(sin_sample * phi.cos(), sin_sample * phi.sin(), cos_sample);

    DQuat::from_rotation_arc(DVec3::Z, target_vector.normalize()) * local
}

fn box_corners(bbox: &BoundingBox) -> [DVec3; 8] {
    let (min, max) = (bbox.min, bbox.max);
    [
        DVec3::new(min.x, min.y, min.z),
        DVec3::new(min.x, min.y, max.z),
        DVec3::new(min.x, max.y, min.z),
        DVec3::new(min.x, max.y, max.z),
        DVec3::new(max.x, min.y, min.z),
        DVec3::new(max.x, min.y, max.z),
        DVec3::new(max.x, max.y, min.z),
        DVec3::new(max.x, max.y, max.z),
    ]
}
