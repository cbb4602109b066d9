//! Run configuration with JSON overrides.
//!
//! Every struct deserializes from a JSON file next to the run and falls
//! back to its defaults when the file is absent or malformed, so a bare
//! checkout runs without any configuration at all.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Phantom data files and identity
    pub phantom: PhantomConfig,
    /// Primary source settings
    pub source: SourceConfig,
}

impl RunConfig {
    /// Load from the default location, or use defaults.
    pub fn load_or_default() -> Self {
        Self::load_from_dir("data/config")
    }

    /// Load from a specific directory.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let phantom = PhantomConfig::load_or_default(dir.join("phantom.json"));
        let source = SourceConfig::load_or_default(dir.join("source.json"));

        Self { phantom, source }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            phantom: PhantomConfig::default(),
            source: SourceConfig::default(),
        }
    }
}

/// Which phantom to build and where its data files live.
///
/// Node/ele/material files are mandatory at load time; the bone-ratio,
/// response-function, and colour files are optional and their absence
/// degrades to defaults with a warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhantomConfig {
    /// Registry name of the phantom
    pub name: String,
    /// TetGen node file (coordinates in cm)
    pub node_file: PathBuf,
    /// TetGen ele file (region ids in the attribute column)
    pub ele_file: PathBuf,
    /// Material card deck
    pub material_file: PathBuf,
    /// Red-bone-marrow / bone-surface mass-ratio table
    pub bone_ratio_file: Option<PathBuf>,
    /// Dose-response-function table (25-bin energy grid)
    pub response_file: Option<PathBuf>,
    /// Per-region display colours
    pub colour_file: Option<PathBuf>,
}

impl PhantomConfig {
    /// Load from JSON file or return defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        load_or_default("phantom", path)
    }
}

impl Default for PhantomConfig {
    fn default() -> Self {
        Self {
            name: "MRCP-AM".to_owned(),
            node_file: PathBuf::from("data/phantoms/MRCP_AM.node"),
            ele_file: PathBuf::from("data/phantoms/MRCP_AM.ele"),
            material_file: PathBuf::from("data/phantoms/MRCP_AM.material"),
            bone_ratio_file: Some(PathBuf::from("data/phantoms/MRCP_AM.RBMnBS")),
            response_file: Some(PathBuf::from("data/phantoms/MRCP_AM.DRF")),
            colour_file: Some(PathBuf::from("data/phantoms/colour.dat")),
        }
    }
}

/// Primary particle source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Nuclide preset ("Co60p", "Cs137p", "Ir192p"), if any
    pub nuclide: Option<String>,
    /// Directory holding the ICRP-107 .RAD exports
    pub nuclide_data_dir: PathBuf,
    /// Source position (cm)
    pub position_cm: [f64; 3],
    /// Phantom to aim the biasing cone at; None emits isotropically
    pub bias_target: Option<String>,
    /// Extra margin around the target bounding box (cm)
    pub bias_margin_cm: f64,
    /// Number of primary trials
    pub num_trials: u64,
}

impl SourceConfig {
    /// Load from JSON file or return defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        load_or_default("source", path)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            nuclide: Some("Cs137p".to_owned()),
            nuclide_data_dir: PathBuf::from("data/nuclides"),
            position_cm: [0.0, 0.0, 100.0],
            bias_target: Some("MRCP-AM".to_owned()),
            bias_margin_cm: 0.0,
            num_trials: 1_000_000,
        }
    }
}

fn load_or_default<T, P>(what: &str, path: P) -> T
where
    T: Default + for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    match std::fs::read_to_string(path.as_ref()) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(config) => {
                log::info!("Loaded {} config from {:?}", what, path.as_ref());
                config
            }
            Err(e) => {
                log::warn!("Failed to parse {} config: {}, using defaults", what, e);
                T::default()
            }
        },
        Err(_) => {
            log::info!("No {} config file, using defaults", what);
            T::default()
        }
    }
}
