//! Protection-quantity engine.
//!
//! Reduces one trial's dose sample table into ICRP protection quantities:
//! simple mass-averaged organ doses, composite thin-organ doses, bone doses
//! by two attribution methods, the 13-organ remainder, four effective-dose
//! variants, and the whole-body dose.
//!
//! Organ composition and tissue weighting factors follow ICRP Publication
//! 103 applied to the adult mesh phantom region set.

use std::collections::HashMap;

use anyhow::{anyhow, Result};

use super::quantities::ProtectionQuantity;
use super::table::DoseSampleTable;
use super::taxonomy::{BoneCompartment, SubRegion};
use crate::model::{ModelRegistry, PhantomModel};

/// ICRP 103 tissue weighting factors.
const W_MARROW_GROUP: f64 = 0.12;
const W_GONADS: f64 = 0.08;
const W_BLADDER_GROUP: f64 = 0.04;
const W_BONE_SURFACE_GROUP: f64 = 0.01;

/// Extrathoracic composite split: ET1 carries 0.001 of the detriment,
/// ET2 the remaining 0.999. Fixed by the reference computation, not
/// re-derived from mass.
const ET1_SPLIT: f64 = 0.001;
const ET2_SPLIT: f64 = 0.999;

/// Number of organs in the remainder group.
const REMAINDER_COUNT: f64 = 13.0;

/// Value map produced per trial.
#[derive(Debug, Clone, Default)]
pub struct ProtectionQuantities {
    values: HashMap<ProtectionQuantity, f64>,
}

impl ProtectionQuantities {
    /// Value for a quantity; quantities that were not computed read as 0.
    pub fn get(&self, quantity: ProtectionQuantity) -> f64 {
        self.values.get(&quantity).copied().unwrap_or(0.0)
    }

    fn set(&mut self, quantity: ProtectionQuantity, value: f64) {
        self.values.insert(quantity, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProtectionQuantity, f64)> + '_ {
        self.values.iter().map(|(&q, &v)| (q, v))
    }
}

/// Per-trial protection-quantity calculator bound to one phantom.
///
/// Holds no per-trial state; the organ→region tables are cached once at
/// construction and every `compute` call is independent, so one engine can
/// serve a whole worker's trial stream.
pub struct DoseEngine<'a> {
    phantom: &'a PhantomModel,
    organ_regions: HashMap<ProtectionQuantity, Vec<SubRegion>>,
    simple_quantities: Vec<ProtectionQuantity>,
}

impl<'a> DoseEngine<'a> {
    /// Bind an engine to a registered phantom. An unknown phantom name is
    /// a fatal configuration error.
    pub fn new(registry: &'a ModelRegistry, phantom_name: &str) -> Result<Self> {
        let phantom = registry
            .get(phantom_name)
            .ok_or_else(|| anyhow!("no phantom named '{}' is registered", phantom_name))?;
        Ok(Self::for_phantom(phantom))
    }

    /// Bind an engine directly to a phantom reference.
    pub fn for_phantom(phantom: &'a PhantomModel) -> Self {
        Self {
            phantom,
            organ_regions: organ_region_tables(),
            simple_quantities: simple_quantity_order(),
        }
    }

    pub fn phantom(&self) -> &PhantomModel {
        self.phantom
    }

    /// Sub-regions composing a quantity (for the simple-average organs).
    pub fn regions_of(&self, quantity: ProtectionQuantity) -> Option<&[SubRegion]> {
        self.organ_regions.get(&quantity).map(Vec::as_slice)
    }

    /// Compute every protection quantity for one trial.
    pub fn compute(&self, table: &DoseSampleTable) -> ProtectionQuantities {
        use ProtectionQuantity::*;
        let mut out = ProtectionQuantities::default();

        if table.has_energy_deposits() {
            // Simple mass-averaged organ doses.
            for &quantity in &self.simple_quantities {
                let dose = self.average_dose(table, &self.organ_regions[&quantity]);
                out.set(quantity, dose);
            }

            // Extrathoracic composites: fixed ET1/ET2 split.
            out.set(
                ExtrathoracicTarget,
                out.get(Et1Target) * ET1_SPLIT + out.get(Et2Target) * ET2_SPLIT,
            );
            out.set(
                ExtrathoracicWhole,
                out.get(Et1Whole) * ET1_SPLIT + out.get(Et2Whole) * ET2_SPLIT,
            );

            // Bone doses by mass ratio: Σ (E/m) × compartment mass fraction.
            out.set(
                RedBoneMarrowByMassRatio,
                self.bone_dose_by_mass_ratio(table, BoneCompartment::RedBoneMarrow),
            );
            out.set(
                BoneSurfaceByMassRatio,
                self.bone_dose_by_mass_ratio(table, BoneCompartment::BoneSurface),
            );
        }

        // Bone doses by DRF: response-function doses live in the negative
        // key namespace, weighted by the compartment mass fraction.
        if table.has_bone_doses() {
            out.set(
                RedBoneMarrowByDrf,
                self.bone_dose_by_drf(table, BoneCompartment::RedBoneMarrow),
            );
            out.set(
                BoneSurfaceByDrf,
                self.bone_dose_by_drf(table, BoneCompartment::BoneSurface),
            );
        }

        // Remainder: arithmetic mean over the 13 remainder organs.
        out.set(RemainderTarget, self.remainder(&out, ExtrathoracicTarget, SmallIntestineTarget));
        out.set(RemainderWhole, self.remainder(&out, ExtrathoracicWhole, SmallIntestineWhole));

        // Effective dose, four variants: {DRF, mass ratio} × {target, whole}.
        out.set(
            EffectiveDose,
            effective_dose(&out, RedBoneMarrowByDrf, BoneSurfaceByDrf, ThinOrganVariant::Target),
        );
        out.set(
            EffectiveDoseByDrfWhole,
            effective_dose(&out, RedBoneMarrowByDrf, BoneSurfaceByDrf, ThinOrganVariant::Whole),
        );
        out.set(
            EffectiveDoseByMassRatioTarget,
            effective_dose(
                &out,
                RedBoneMarrowByMassRatio,
                BoneSurfaceByMassRatio,
                ThinOrganVariant::Target,
            ),
        );
        out.set(
            EffectiveDoseByMassRatioWhole,
            effective_dose(
                &out,
                RedBoneMarrowByMassRatio,
                BoneSurfaceByMassRatio,
                ThinOrganVariant::Whole,
            ),
        );

        out
    }

    /// Mass-averaged dose over a region set: ΣE / Σm, 0 on zero mass.
    fn average_dose(&self, table: &DoseSampleTable, regions: &[SubRegion]) -> f64 {
        let mut total_energy = 0.0;
        let mut total_mass = 0.0;
        for &region in regions {
            total_mass += self.phantom.region_mass_g(region.id());
            total_energy += table.energy_deposit(region.id());
        }
        if total_mass == 0.0 {
            0.0
        } else {
            total_energy / total_mass
        }
    }

    fn bone_dose_by_mass_ratio(&self, table: &DoseSampleTable, compartment: BoneCompartment) -> f64 {
        let regions = match compartment {
            BoneCompartment::RedBoneMarrow => RED_BONE_MARROW_REGIONS,
            BoneCompartment::BoneSurface => BONE_SURFACE_REGIONS,
        };
        let mut dose = 0.0;
        for &region in regions {
            let Some(energy) = table.get(region.id()) else {
                continue;
            };
            let mass = self.phantom.region_mass_g(region.id());
            if mass == 0.0 {
                continue;
            }
            dose += (energy / mass) * self.phantom.bone_mass_ratio(region.id(), compartment);
        }
        dose
    }

    fn bone_dose_by_drf(&self, table: &DoseSampleTable, compartment: BoneCompartment) -> f64 {
        let regions = match compartment {
            BoneCompartment::RedBoneMarrow => RED_BONE_MARROW_REGIONS,
            BoneCompartment::BoneSurface => BONE_SURFACE_REGIONS,
        };
        let mut dose = 0.0;
        for &region in regions {
            let scored = match compartment {
                BoneCompartment::RedBoneMarrow => table.rbm_dose(region.id()),
                BoneCompartment::BoneSurface => table.bs_dose(region.id()),
            };
            if let Some(region_dose) = scored {
                dose += region_dose * self.phantom.bone_mass_ratio(region.id(), compartment);
            }
        }
        dose
    }

    fn remainder(
        &self,
        out: &ProtectionQuantities,
        extrathoracic: ProtectionQuantity,
        small_intestine: ProtectionQuantity,
    ) -> f64 {
        use ProtectionQuantity::*;
        (out.get(Adrenals)
            + out.get(extrathoracic)
            + out.get(GallBladder)
            + out.get(Heart)
            + out.get(Kidneys)
            + out.get(LymphaticNodes)
            + out.get(Muscle)
            + out.get(OralMucosa)
            + out.get(Pancreas)
            + out.get(ProstateUterus)
            + out.get(small_intestine)
            + out.get(Spleen)
            + out.get(Thymus))
            / REMAINDER_COUNT
    }
}

/// Which thin-organ dose feeds the effective-dose sum.
#[derive(Clone, Copy)]
enum ThinOrganVariant {
    Target,
    Whole,
}

fn effective_dose(
    out: &ProtectionQuantities,
    marrow: ProtectionQuantity,
    bone_surface: ProtectionQuantity,
    variant: ThinOrganVariant,
) -> f64 {
    use ProtectionQuantity::*;
    let (colon, stomach, remainder, oesophagus, skin) = match variant {
        ThinOrganVariant::Target => (
            ColonTarget,
            StomachTarget,
            RemainderTarget,
            OesophagusTarget,
            SkinTarget,
        ),
        ThinOrganVariant::Whole => (
            ColonWhole,
            StomachWhole,
            RemainderWhole,
            OesophagusWhole,
            SkinWhole,
        ),
    };

    (out.get(marrow)
        + out.get(colon)
        + out.get(Lungs)
        + out.get(stomach)
        + out.get(Breast)
        + out.get(remainder))
        * W_MARROW_GROUP
        + out.get(Gonads) * W_GONADS
        + (out.get(Bladder) + out.get(Liver) + out.get(oesophagus) + out.get(Thyroid))
            * W_BLADDER_GROUP
        + (out.get(bone_surface) + out.get(Brain) + out.get(SalivaryGlands) + out.get(skin))
            * W_BONE_SURFACE_GROUP
}

/// Spongiosa regions carrying active marrow.
pub const RED_BONE_MARROW_REGIONS: &[SubRegion] = &[
    SubRegion::HumeriUS,
    SubRegion::ClavicleS,
    SubRegion::CraniumS,
    SubRegion::FemoraUS,
    SubRegion::MandibleS,
    SubRegion::PelvisS,
    SubRegion::RibsS,
    SubRegion::ScapulaeS,
    SubRegion::CervicalS,
    SubRegion::ThoracicS,
    SubRegion::LumbarS,
    SubRegion::SacrumS,
    SubRegion::SternumS,
];

/// Bone regions carrying endosteal surface.
pub const BONE_SURFACE_REGIONS: &[SubRegion] = &[
    SubRegion::HumeriUS,
    SubRegion::HumeriLS,
    SubRegion::HumeriM,
    SubRegion::UlnaeS,
    SubRegion::UlnaeM,
    SubRegion::HandsS,
    SubRegion::ClavicleS,
    SubRegion::CraniumS,
    SubRegion::FemoraUS,
    SubRegion::FemoraLS,
    SubRegion::FemoraM,
    SubRegion::TibiaeS,
    SubRegion::TibiaeM,
    SubRegion::FootS,
    SubRegion::MandibleS,
    SubRegion::PelvisS,
    SubRegion::RibsS,
    SubRegion::ScapulaeS,
    SubRegion::CervicalS,
    SubRegion::ThoracicS,
    SubRegion::LumbarS,
    SubRegion::SacrumS,
    SubRegion::SternumS,
];

/// Regions excluded from the whole-body dose: organ contents and the
/// non-tissue mucus/cilia sublayers. Heart content (blood) stays included.
pub const WHOLE_BODY_EXCLUDED: &[SubRegion] = &[
    SubRegion::TongueUpperFood,
    SubRegion::OesophagusC,
    SubRegion::StomachC,
    SubRegion::SmallIntestineContentM500To0,
    SubRegion::SmallIntestineContentCenter,
    SubRegion::AscColonContent,
    SubRegion::TransColonRContent,
    SubRegion::TransColonLContent,
    SubRegion::DscColonContent,
    SubRegion::SigColonContent,
    SubRegion::GallbladderC,
    SubRegion::UrinaryBladderC,
    SubRegion::ET2_M15To0,
    SubRegion::BBGen1M11ToM6,
    SubRegion::BBGen1M6To0,
];

/// Organ → sub-region composition tables.
fn organ_region_tables() -> HashMap<ProtectionQuantity, Vec<SubRegion>> {
    use ProtectionQuantity as Q;
    use SubRegion::*;

    let mut map: HashMap<ProtectionQuantity, Vec<SubRegion>> = HashMap::new();

    map.insert(
        Q::ColonTarget,
        vec![
            AscColonW280To300,
            TransColonWR280To300,
            TransColonWL280To300,
            DscColonW280To300,
            SigColonW280To300,
        ],
    );
    map.insert(
        Q::ColonWhole,
        vec![
            AscColonW0To280,
            AscColonW280To300,
            AscColonW300ToSurf,
            TransColonWR0To280,
            TransColonWR280To300,
            TransColonWR300ToSurf,
            TransColonWL0To280,
            TransColonWL280To300,
            TransColonWL300ToSurf,
            DscColonW0To280,
            DscColonW280To300,
            DscColonW300ToSurf,
            SigColonW0To280,
            SigColonW280To300,
            SigColonW300ToSurf,
            RectumW,
        ],
    );
    map.insert(Q::Lungs, vec![LungR, LungL]);
    map.insert(Q::StomachTarget, vec![Stomach60To100]);
    map.insert(
        Q::StomachWhole,
        vec![Stomach0To60, Stomach60To100, Stomach100To300, Stomach300ToSurf],
    );
    map.insert(
        Q::Breast,
        vec![BreastRAdipose, BreastLAdipose, BreastRGlandular, BreastLGlandular],
    );
    map.insert(Q::Gonads, vec![GonadR, GonadL]);
    map.insert(Q::Bladder, vec![UrinaryBladder]);
    map.insert(Q::OesophagusTarget, vec![Oesophagus190To200]);
    map.insert(
        Q::OesophagusWhole,
        vec![Oesophagus0To190, Oesophagus190To200, Oesophagus200ToSurf],
    );
    map.insert(Q::Liver, vec![SubRegion::Liver]);
    map.insert(Q::Thyroid, vec![SubRegion::Thyroid]);
    map.insert(Q::Brain, vec![SubRegion::Brain]);
    map.insert(Q::SalivaryGlands, vec![SalivaryGlandR, SalivaryGlandL]);
    map.insert(Q::SkinTarget, vec![Skin50To100]);
    map.insert(Q::SkinWhole, vec![SkinOsurfTo50, Skin50To100, Skin100ToIsurf]);
    map.insert(Q::Adrenals, vec![AdrenalR, AdrenalL]);
    map.insert(Q::Et1Target, vec![ET1_40To50]);
    map.insert(Q::Et2Target, vec![ET2_40To50]);
    map.insert(
        Q::Et1Whole,
        vec![ET1_0To8, ET1_8To40, ET1_40To50, ET1_50ToSurf],
    );
    map.insert(
        Q::Et2Whole,
        vec![ET2_0To40, ET2_40To50, ET2_50To55, ET2_55To65, ET2_65ToSurf],
    );
    map.insert(Q::GallBladder, vec![Gallbladder]);
    map.insert(Q::Heart, vec![SubRegion::Heart]);
    map.insert(
        Q::Kidneys,
        vec![
            KidneyRCortex,
            KidneyRMedulla,
            KidneyRPelvis,
            KidneyLCortex,
            KidneyLMedulla,
            KidneyLPelvis,
        ],
    );
    map.insert(
        Q::LymphaticNodes,
        vec![
            LymphET,
            LymphCervical,
            LymphAxillary,
            LymphBreast,
            LymphThoracic,
            LymphCubital,
            LymphMesenteric,
            LymphInguinal,
            LymphPopliteal,
        ],
    );
    map.insert(Q::Muscle, vec![SubRegion::Muscle]);
    map.insert(
        Q::OralMucosa,
        vec![TongueLowerOralM, MouthFloorOralM, MouthLipCheekOralM],
    );
    map.insert(Q::Pancreas, vec![SubRegion::Pancreas]);
    map.insert(Q::ProstateUterus, vec![SubRegion::ProstateUterus]);
    map.insert(Q::SmallIntestineTarget, vec![SmallIntestine130To150]);
    map.insert(
        Q::SmallIntestineWhole,
        vec![
            SmallIntestine0To130,
            SmallIntestine130To150,
            SmallIntestine150To200,
            SmallIntestine200ToSurf,
        ],
    );
    map.insert(Q::Spleen, vec![SubRegion::Spleen]);
    map.insert(Q::Thymus, vec![SubRegion::Thymus]);
    map.insert(Q::EyeLensTarget, vec![SensLensR, SensLensL]);
    map.insert(
        Q::EyeLensWhole,
        vec![SensLensR, SensLensL, InsensLensR, InsensLensL],
    );

    let whole_body = SubRegion::all()
        .filter(|region| !WHOLE_BODY_EXCLUDED.contains(region))
        .collect();
    map.insert(Q::WholeBodyDose, whole_body);

    map
}

/// Quantities computed by the simple mass-average, in evaluation order.
fn simple_quantity_order() -> Vec<ProtectionQuantity> {
    use ProtectionQuantity::*;
    vec![
        ColonTarget,
        Lungs,
        StomachTarget,
        Breast,
        Gonads,
        Bladder,
        OesophagusTarget,
        Liver,
        Thyroid,
        Brain,
        SalivaryGlands,
        SkinTarget,
        Adrenals,
        GallBladder,
        Heart,
        Kidneys,
        LymphaticNodes,
        Muscle,
        OralMucosa,
        Pancreas,
        ProstateUterus,
        SmallIntestineTarget,
        Spleen,
        Thymus,
        Et1Target,
        Et2Target,
        EyeLensTarget,
        ColonWhole,
        StomachWhole,
        OesophagusWhole,
        SkinWhole,
        SmallIntestineWhole,
        Et1Whole,
        Et2Whole,
        EyeLensWhole,
        WholeBodyDose,
    ]
}
