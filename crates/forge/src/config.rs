//! Forge configuration (crystal parameters, seed, winding). Loaded from crystal.ron at startup.

use anyhow::{Context, Result};
use crystal::{CrystalParams, Winding};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persistent forge settings. Loaded from `crystal.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgeConfig {
    /// Seed for the first crystal. `None` draws one from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Ranges and flags every crystal is sampled from.
    #[serde(default)]
    pub params: CrystalParams,
    /// Front-face convention of the emitted index buffer.
    #[serde(default)]
    pub winding: Winding,
    /// Legacy ring flag: isotropic ring noise. Overrides `params.ring_noise`
    /// when either legacy flag is set.
    #[serde(default)]
    pub noisy_ring_points: bool,
    /// Legacy ring flag: alternating up/down ring noise.
    #[serde(default)]
    pub up_down_ring_points: bool,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            params: CrystalParams::default(),
            winding: Winding::default(),
            noisy_ring_points: false,
            up_down_ring_points: false,
        }
    }
}

impl ForgeConfig {
    /// Parameters the generator runs with, legacy ring flags applied.
    pub fn crystal_params(&self) -> CrystalParams {
        let mut params = self.params.clone();
        if self.noisy_ring_points || self.up_down_ring_points {
            params.ring_noise =
                CrystalParams::ring_noise_from_flags(self.noisy_ring_points, self.up_down_ring_points);
        }
        params
    }

    /// Load config from `crystal.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `crystal.ron`.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let s = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("serializing forge config")?;
        std::fs::write(path, s).with_context(|| format!("writing config to {:?}", path))?;
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("crystal.ron")
}
