//! Protection quantity names.
//!
//! Output labels use the ICRP convention: `HT_` prefixes an equivalent
//! dose to tissue T; `Target` is the thin-organ radiosensitive layer,
//! `Whole` the full organ wall; `byDRF`/`byMassRatio` name the bone-dose
//! attribution method.

/// Every protection quantity the dose engine produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProtectionQuantity {
    // wT = 0.12 group
    RedBoneMarrowByDrf,
    ColonTarget,
    Lungs,
    StomachTarget,
    Breast,
    RemainderTarget,

    // wT = 0.08
    Gonads,

    // wT = 0.04 group
    Bladder,
    OesophagusTarget,
    Liver,
    Thyroid,

    // wT = 0.01 group
    BoneSurfaceByDrf,
    Brain,
    SalivaryGlands,
    SkinTarget,

    // Remainder organs
    Adrenals,
    ExtrathoracicTarget,
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

    // Extrathoracic sub-regions
    Et1Target,
    Et2Target,

    // Bone doses by mass ratio
    RedBoneMarrowByMassRatio,
    BoneSurfaceByMassRatio,

    // Other organs
    EyeLensTarget,

    // Whole-organ variants of the thin organs
    ColonWhole,
    StomachWhole,
    RemainderWhole,
    OesophagusWhole,
    SkinWhole,
    ExtrathoracicWhole,
    SmallIntestineWhole,
    Et1Whole,
    Et2Whole,
    EyeLensWhole,

    /// DRF bone dose, target-layer thin organs.
    EffectiveDose,
    /// DRF bone dose, whole-organ thin organs.
    EffectiveDoseByDrfWhole,
    /// Mass-ratio bone dose, target-layer thin organs.
    EffectiveDoseByMassRatioTarget,
    /// Mass-ratio bone dose, whole-organ thin organs.
    EffectiveDoseByMassRatioWhole,

    WholeBodyDose,
}

impl ProtectionQuantity {
    /// Report label.
    pub fn as_str(self) -> &'static str {
        use ProtectionQuantity::*;
        match self {
            RedBoneMarrowByDrf => "HT_RedBoneMarrow_byDRF",
            ColonTarget => "HT_ColonTarget",
            Lungs => "HT_Lungs",
            StomachTarget => "HT_StomachTarget",
            Breast => "HT_Breast",
            RemainderTarget => "HT_RemainderTarget",
            Gonads => "HT_Gonads",
            Bladder => "HT_Bladder",
            OesophagusTarget => "HT_OesophagusTarget",
            Liver => "HT_Liver",
            Thyroid => "HT_Thyroid",
            BoneSurfaceByDrf => "HT_BoneSurface_byDRF",
            Brain => "HT_Brain",
            SalivaryGlands => "HT_SalivaryGlands",
            SkinTarget => "HT_SkinTarget",
            Adrenals => "HT_Adrenals",
            ExtrathoracicTarget => "HT_ExtrathoracicTarget",
            GallBladder => "HT_GallBladder",
            Heart => "HT_Heart",
            Kidneys => "HT_Kidneys",
            LymphaticNodes => "HT_LymphaticNodes",
            Muscle => "HT_Muscle",
            OralMucosa => "HT_OralMucosa",
            Pancreas => "HT_Pancreas",
            ProstateUterus => "HT_ProstateUterus",
            SmallIntestineTarget => "HT_SmallIntestineTarget",
            Spleen => "HT_Spleen",
            Thymus => "HT_Thymus",
            Et1Target => "HT_ET1Target",
            Et2Target => "HT_ET2Target",
            RedBoneMarrowByMassRatio => "HT_RedBoneMarrow_byMassRatio",
            BoneSurfaceByMassRatio => "HT_BoneSurface_byMassRatio",
            EyeLensTarget => "HT_EyeLensTarget",
            ColonWhole => "HT_ColonWhole",
            StomachWhole => "HT_StomachWhole",
            RemainderWhole => "HT_RemainderWhole",
            OesophagusWhole => "HT_OesophagusWhole",
            SkinWhole => "HT_SkinWhole",
            ExtrathoracicWhole => "HT_ExtrathoracicWhole",
            SmallIntestineWhole => "HT_SmallIntestineWhole",
            Et1Whole => "HT_ET1Whole",
            Et2Whole => "HT_ET2Whole",
            EyeLensWhole => "HT_EyeLensWhole",
            EffectiveDose => "EffectiveDose",
            EffectiveDoseByDrfWhole => "EffectiveDose_byDRFWhole",
            EffectiveDoseByMassRatioTarget => "EffectiveDose_byMassRatioTarget",
            EffectiveDoseByMassRatioWhole => "EffectiveDose_byMassRatioWhole",
            WholeBodyDose => "WholeBodyDose",
        }
    }
}

impl std::fmt::Display for ProtectionQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
