use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::layouts::force_directed::{ForceDirectedState, FruchtermanReingoldWithCenterGravityState};
use crate::style::StyleGraph;

/// File the explorer reads when nothing else is configured.
pub const DEFAULT_DATA_PATH: &str = "tnbc_kg_triplets_chemical_biotech_other.csv";

pub const CAP_MIN: usize = 20;
pub const CAP_MAX: usize = 500;
pub const CAP_DEFAULT: usize = 100;

/// Where the triplet table lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsData {
    pub path: PathBuf,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

/// Neighborhood extraction parameters controlled by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsExtraction {
    /// Maximum rows kept for a specific entity, within `CAP_MIN..=CAP_MAX`
    pub cap: usize,

    /// Seed of the sampling rng, random when unset
    pub sample_seed: Option<u64>,
}

impl Default for SettingsExtraction {
    fn default() -> Self {
        Self {
            cap: CAP_DEFAULT,
            sample_seed: None,
        }
    }
}

impl SettingsExtraction {
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = clamp_cap(cap);
        self
    }
}

pub fn clamp_cap(cap: usize) -> usize {
    cap.clamp(CAP_MIN, CAP_MAX)
}

/// Everything the explorer needs to start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplorerSettings {
    pub data: SettingsData,
    pub extraction: SettingsExtraction,
    pub layout: ForceDirectedState<FruchtermanReingoldWithCenterGravityState>,
    pub style: StyleGraph,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_is_clamped() {
        assert_eq!(SettingsExtraction::default().cap, CAP_DEFAULT);
        assert_eq!(SettingsExtraction::default().with_cap(5).cap, CAP_MIN);
        assert_eq!(SettingsExtraction::default().with_cap(10_000).cap, CAP_MAX);
        assert_eq!(SettingsExtraction::default().with_cap(250).cap, 250);
    }

    #[test]
    fn defaults() {
        let s = ExplorerSettings::default();
        assert_eq!(s.data.path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(s.layout.seed, 42);
        assert_eq!(s.layout.iterations, 50);
    }
}
