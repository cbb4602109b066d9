//! Canonical sub-region taxonomy of the adult mesh phantom.
//!
//! One ordered enumeration of the 170 sub-model identifiers, shared by the
//! dose engine, the scorers, and the phantom tables. The numbering is fixed
//! by the phantom material file and must not be reordered.

/// Bone dose compartments with dedicated dosimetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoneCompartment {
    /// Active (red) bone marrow
    RedBoneMarrow,
    /// Endosteal bone surface
    BoneSurface,
}

/// Sub-region (sub-model) identifiers of the mesh phantom.
///
/// Discriminants are the region ids used in the phantom data files.
/// Suffix conventions follow the phantom nomenclature: `C` content/cavity,
/// `S` spongiosa, `M` medullary cavity, depth bands in μm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum SubRegion {
    HumeriC = 1,
    HumeriUS = 2,
    HumeriLS = 3,
    HumeriM = 4,
    UlnaeC = 5,
    UlnaeS = 6,
    UlnaeM = 7,
    HandsC = 8,
    HandsS = 9,
    ClavicleC = 10,
    ClavicleS = 11,
    CraniumC = 12,
    CraniumS = 13,
    FemoraC = 14,
    FemoraUS = 15,
    FemoraLS = 16,
    FemoraM = 17,
    TibiaeC = 18,
    TibiaeS = 19,
    TibiaeM = 20,
    FootC = 21,
    FootS = 22,
    MandibleC = 23,
    MandibleS = 24,
    PelvisC = 25,
    PelvisS = 26,
    RibsC = 27,
    RibsS = 28,
    ScapulaeC = 29,
    ScapulaeS = 30,
    CervicalC = 31,
    CervicalS = 32,
    ThoracicC = 33,
    ThoracicS = 34,
    LumbarC = 35,
    LumbarS = 36,
    SacrumC = 37,
    SacrumS = 38,
    SternumC = 39,
    SternumS = 40,
    Teeth = 41,
    CostalCartilage = 42,
    DiscsCartilage = 43,
    TongueUpperFood = 44,
    TongueLower = 45,
    TongueLowerOralM = 46,
    MouthFloorOralM = 47,
    MouthLipCheekOralM = 48,
    RetentionTeeth = 49,
    Oesophagus0To190 = 50,
    Oesophagus190To200 = 51,
    Oesophagus200ToSurf = 52,
    OesophagusC = 53,
    Stomach0To60 = 54,
    Stomach60To100 = 55,
    Stomach100To300 = 56,
    Stomach300ToSurf = 57,
    StomachC = 58,
    SmallIntestine0To130 = 59,
    SmallIntestine130To150 = 60,
    SmallIntestine150To200 = 61,
    SmallIntestine200ToSurf = 62,
    SmallIntestineContentM500To0 = 63,
    SmallIntestineContentCenter = 64,
    AscColonW0To280 = 65,
    AscColonW280To300 = 66,
    AscColonW300ToSurf = 67,
    AscColonContent = 68,
    TransColonWR0To280 = 69,
    TransColonWR280To300 = 70,
    TransColonWR300ToSurf = 71,
    TransColonRContent = 72,
    TransColonWL0To280 = 73,
    TransColonWL280To300 = 74,
    TransColonWL300ToSurf = 75,
    TransColonLContent = 76,
    DscColonW0To280 = 77,
    DscColonW280To300 = 78,
    DscColonW300ToSurf = 79,
    DscColonContent = 80,
    SigColonW0To280 = 81,
    SigColonW280To300 = 82,
    SigColonW300ToSurf = 83,
    SigColonContent = 84,
    RectumW = 85,
    SalivaryGlandR = 86,
    SalivaryGlandL = 87,
    Tonsils = 88,
    Liver = 89,
    Gallbladder = 90,
    GallbladderC = 91,
    Pancreas = 92,
    Heart = 93,
    HeartC = 94,
    BloodArteries = 95,
    BloodVeins = 96,
    LymphET = 97,
    LymphCervical = 98,
    LymphAxillary = 99,
    LymphBreast = 100,
    LymphThoracic = 101,
    LymphCubital = 102,
    LymphMesenteric = 103,
    LymphInguinal = 104,
    LymphPopliteal = 105,
    KidneyRCortex = 106,
    KidneyRMedulla = 107,
    KidneyRPelvis = 108,
    KidneyLCortex = 109,
    KidneyLMedulla = 110,
    KidneyLPelvis = 111,
    UreterR = 112,
    UreterL = 113,
    UrinaryBladder = 114,
    UrinaryBladderC = 115,
    GonadR = 116,
    GonadL = 117,
    ProstateUterus = 118,
    AdrenalR = 119,
    AdrenalL = 120,
    BreastRAdipose = 121,
    BreastLAdipose = 122,
    BreastRGlandular = 123,
    BreastLGlandular = 124,
    SkinOsurfTo50 = 125,
    Skin50To100 = 126,
    Skin100ToIsurf = 127,
    CorneaR = 128,
    CorneaL = 129,
    AqueousR = 130,
    AqueousL = 131,
    VitreousR = 132,
    VitreousL = 133,
    SensLensR = 134,
    SensLensL = 135,
    InsensLensR = 136,
    InsensLensL = 137,
    Brain = 138,
    Muscle = 139,
    PituitaryGland = 140,
    SpinalCord = 141,
    Spleen = 142,
    Thymus = 143,
    Thyroid = 144,
    ResidualSoftTissue = 145,
    Air = 146,
    ET1_0To8 = 147,
    ET1_8To40 = 148,
    ET1_40To50 = 149,
    ET1_50ToSurf = 150,
    ET2_M15To0 = 151,
    ET2_0To40 = 152,
    ET2_40To50 = 153,
    ET2_50To55 = 154,
    ET2_55To65 = 155,
    ET2_65ToSurf = 156,
    Trachea = 157,
    LungR = 158,
    LungL = 159,
    BBGen1M11ToM6 = 160,
    BBGen1M6To0 = 161,
    BBGen1_0To10 = 162,
    BBGen1_10To35 = 163,
    BBGen1_35To40 = 164,
    BBGen1_40To50 = 165,
    BBGen1_50To60 = 166,
    BBGen1_60To70 = 167,
    BBGen1_70ToSurf = 168,
    UrinaryBladder75 = 169,
    UrinaryBladder118 = 170,
}

impl SubRegion {
    pub const FIRST_ID: i32 = 1;
    pub const LAST_ID: i32 = 170;

    /// Region id as used in the phantom data files and dose tables.
    #[inline]
    pub fn id(self) -> i32 {
        self as i32
    }

    /// Iterate every sub-region in id order.
    pub fn all() -> impl Iterator<Item = SubRegion> {
        ALL_SUB_REGIONS.iter().copied()
    }

    /// Look up a sub-region by its phantom id.
    pub fn from_id(id: i32) -> Option<SubRegion> {
        if !(Self::FIRST_ID..=Self::LAST_ID).contains(&id) {
            return None;
        }
        Some(ALL_SUB_REGIONS[(id - 1) as usize])
    }
}

/// Every sub-region in id order. Index = id − 1; the dose table key
/// namespace relies on ids staying within 1..=999.
const ALL_SUB_REGIONS: [SubRegion; 170] = [
    SubRegion::HumeriC,
    SubRegion::HumeriUS,
    SubRegion::HumeriLS,
    SubRegion::HumeriM,
    SubRegion::UlnaeC,
    SubRegion::UlnaeS,
    SubRegion::UlnaeM,
    SubRegion::HandsC,
    SubRegion::HandsS,
    SubRegion::ClavicleC,
    SubRegion::ClavicleS,
    SubRegion::CraniumC,
    SubRegion::CraniumS,
    SubRegion::FemoraC,
    SubRegion::FemoraUS,
    SubRegion::FemoraLS,
    SubRegion::FemoraM,
    SubRegion::TibiaeC,
    SubRegion::TibiaeS,
    SubRegion::TibiaeM,
    SubRegion::FootC,
    SubRegion::FootS,
    SubRegion::MandibleC,
    SubRegion::MandibleS,
    SubRegion::PelvisC,
    SubRegion::PelvisS,
    SubRegion::RibsC,
    SubRegion::RibsS,
    SubRegion::ScapulaeC,
    SubRegion::ScapulaeS,
    SubRegion::CervicalC,
    SubRegion::CervicalS,
    SubRegion::ThoracicC,
    SubRegion::ThoracicS,
    SubRegion::LumbarC,
    SubRegion::LumbarS,
    SubRegion::SacrumC,
    SubRegion::SacrumS,
    SubRegion::SternumC,
    SubRegion::SternumS,
    SubRegion::Teeth,
    SubRegion::CostalCartilage,
    SubRegion::DiscsCartilage,
    SubRegion::TongueUpperFood,
    SubRegion::TongueLower,
    SubRegion::TongueLowerOralM,
    SubRegion::MouthFloorOralM,
    SubRegion::MouthLipCheekOralM,
    SubRegion::RetentionTeeth,
    SubRegion::Oesophagus0To190,
    SubRegion::Oesophagus190To200,
    SubRegion::Oesophagus200ToSurf,
    SubRegion::OesophagusC,
    SubRegion::Stomach0To60,
    SubRegion::Stomach60To100,
    SubRegion::Stomach100To300,
    SubRegion::Stomach300ToSurf,
    SubRegion::StomachC,
    SubRegion::SmallIntestine0To130,
    SubRegion::SmallIntestine130To150,
    SubRegion::SmallIntestine150To200,
    SubRegion::SmallIntestine200ToSurf,
    SubRegion::SmallIntestineContentM500To0,
    SubRegion::SmallIntestineContentCenter,
    SubRegion::AscColonW0To280,
    SubRegion::AscColonW280To300,
    SubRegion::AscColonW300ToSurf,
    SubRegion::AscColonContent,
    SubRegion::TransColonWR0To280,
    SubRegion::TransColonWR280To300,
    SubRegion::TransColonWR300ToSurf,
    SubRegion::TransColonRContent,
    SubRegion::TransColonWL0To280,
    SubRegion::TransColonWL280To300,
    SubRegion::TransColonWL300ToSurf,
    SubRegion::TransColonLContent,
    SubRegion::DscColonW0To280,
    SubRegion::DscColonW280To300,
    SubRegion::DscColonW300ToSurf,
    SubRegion::DscColonContent,
    SubRegion::SigColonW0To280,
    SubRegion::SigColonW280To300,
    SubRegion::SigColonW300ToSurf,
    SubRegion::SigColonContent,
    SubRegion::RectumW,
    SubRegion::SalivaryGlandR,
    SubRegion::SalivaryGlandL,
    SubRegion::Tonsils,
    SubRegion::Liver,
    SubRegion::Gallbladder,
    SubRegion::GallbladderC,
    SubRegion::Pancreas,
    SubRegion::Heart,
    SubRegion::HeartC,
    SubRegion::BloodArteries,
    SubRegion::BloodVeins,
    SubRegion::LymphET,
    SubRegion::LymphCervical,
    SubRegion::LymphAxillary,
    SubRegion::LymphBreast,
    SubRegion::LymphThoracic,
    SubRegion::LymphCubital,
    SubRegion::LymphMesenteric,
    SubRegion::LymphInguinal,
    SubRegion::LymphPopliteal,
    SubRegion::KidneyRCortex,
    SubRegion::KidneyRMedulla,
    SubRegion::KidneyRPelvis,
    SubRegion::KidneyLCortex,
    SubRegion::KidneyLMedulla,
    SubRegion::KidneyLPelvis,
    SubRegion::UreterR,
    SubRegion::UreterL,
    SubRegion::UrinaryBladder,
    SubRegion::UrinaryBladderC,
    SubRegion::GonadR,
    SubRegion::GonadL,
    SubRegion::ProstateUterus,
    SubRegion::AdrenalR,
    SubRegion::AdrenalL,
    SubRegion::BreastRAdipose,
    SubRegion::BreastLAdipose,
    SubRegion::BreastRGlandular,
    SubRegion::BreastLGlandular,
    SubRegion::SkinOsurfTo50,
    SubRegion::Skin50To100,
    SubRegion::Skin100ToIsurf,
    SubRegion::CorneaR,
    SubRegion::CorneaL,
    SubRegion::AqueousR,
    SubRegion::AqueousL,
    SubRegion::VitreousR,
    SubRegion::VitreousL,
    SubRegion::SensLensR,
    SubRegion::SensLensL,
    SubRegion::InsensLensR,
    SubRegion::InsensLensL,
    SubRegion::Brain,
    SubRegion::Muscle,
    SubRegion::PituitaryGland,
    SubRegion::SpinalCord,
    SubRegion::Spleen,
    SubRegion::Thymus,
    SubRegion::Thyroid,
    SubRegion::ResidualSoftTissue,
    SubRegion::Air,
    SubRegion::ET1_0To8,
    SubRegion::ET1_8To40,
    SubRegion::ET1_40To50,
    SubRegion::ET1_50ToSurf,
    SubRegion::ET2_M15To0,
    SubRegion::ET2_0To40,
    SubRegion::ET2_40To50,
    SubRegion::ET2_50To55,
    SubRegion::ET2_55To65,
    SubRegion::ET2_65ToSurf,
    SubRegion::Trachea,
    SubRegion::LungR,
    SubRegion::LungL,
    SubRegion::BBGen1M11ToM6,
    SubRegion::BBGen1M6To0,
    SubRegion::BBGen1_0To10,
    SubRegion::BBGen1_10To35,
    SubRegion::BBGen1_35To40,
    SubRegion::BBGen1_40To50,
    SubRegion::BBGen1_50To60,
    SubRegion::BBGen1_60To70,
    SubRegion::BBGen1_70ToSurf,
    SubRegion::UrinaryBladder75,
    SubRegion::UrinaryBladder118,
];
