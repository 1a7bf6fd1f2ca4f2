// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! BendPrep configuration system

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::geometry::CenterlineOptions;
use crate::wire::{EditorSettings, DEFAULT_CURVE_STEPS, DEFAULT_HIT_TOLERANCE};

/// Default configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "bendprep.toml";

/// BendPrep configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BendPrepConfig {
    /// K-factor used when none is given
    pub default_k_factor: f64,
    /// Chords used to measure a curve
    pub curve_steps: usize,
    /// Manhattan pick distance for editing
    pub snap_tolerance: f64,
    /// Wire diameter of paths created by the editor
    pub default_wire_diameter: f64,
    /// Length of a segment added by the editor
    pub segment_length: f64,
    /// Control point offset of a curve added by the editor
    pub curve_offset: f64,
    /// STL centerline extraction
    pub centerline: CenterlineOptions,
}

impl Default for BendPrepConfig {
    fn default() -> Self {
        Self {
            default_k_factor: 0.44,
            curve_steps: DEFAULT_CURVE_STEPS,
            snap_tolerance: DEFAULT_HIT_TOLERANCE,
            default_wire_diameter: 2.0,
            segment_length: 100.0,
            curve_offset: 50.0,
            centerline: CenterlineOptions::default(),
        }
    }
}

impl BendPrepConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: BendPrepConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// An explicit path must exist; otherwise `bendprep.toml` is used when
    /// present and defaults when not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if PathBuf::from(CONFIG_FILE).exists() => Self::from_file(CONFIG_FILE)?,
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply `BENDPREP_*` overrides; unparsable values are ignored
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(k) = var("BENDPREP_K_FACTOR").and_then(|v| v.parse().ok()) {
            self.default_k_factor = k;
        }

        if let Some(steps) = var("BENDPREP_CURVE_STEPS").and_then(|v| v.parse().ok()) {
            self.curve_steps = steps;
        }

        if let Some(tolerance) = var("BENDPREP_SNAP_TOLERANCE").and_then(|v| v.parse().ok()) {
            self.snap_tolerance = tolerance;
        }

        if let Some(size) = var("BENDPREP_SAMPLE_SIZE").and_then(|v| v.parse().ok()) {
            self.centerline.sample_size = size;
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.default_k_factor > 0.0 && self.default_k_factor < 1.0) {
            bail!(
                "default_k_factor must be in (0, 1), got {}",
                self.default_k_factor
            );
        }
        if self.curve_steps == 0 {
            bail!("curve_steps must be at least 1");
        }
        if !(self.default_wire_diameter.is_finite() && self.default_wire_diameter > 0.0) {
            bail!(
                "default_wire_diameter must be positive, got {}",
                self.default_wire_diameter
            );
        }
        if !(self.snap_tolerance.is_finite() && self.snap_tolerance > 0.0) {
            bail!("snap_tolerance must be positive, got {}", self.snap_tolerance);
        }
        if !(self.segment_length.is_finite() && self.segment_length > 0.0) {
            bail!("segment_length must be positive, got {}", self.segment_length);
        }
        if !self.curve_offset.is_finite() {
            bail!("curve_offset must be finite, got {}", self.curve_offset);
        }
        if self.centerline.sample_size == 0 {
            bail!("centerline.sample_size must be at least 1");
        }
        Ok(())
    }

    pub fn editor_settings(&self) -> EditorSettings {
        EditorSettings {
            tolerance: self.snap_tolerance,
            segment_length: self.segment_length,
            curve_offset: self.curve_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = BendPrepConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.editor_settings(), EditorSettings::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("bendprep.toml");
        std::fs::write(
            &path,
            "default_k_factor = 0.33\n\n[centerline]\nscale = 2.5\n",
        )?;

        let config = BendPrepConfig::load(Some(&path))?;
        assert_eq!(config.default_k_factor, 0.33);
        assert_eq!(config.centerline.scale, 2.5);
        assert_eq!(config.centerline.sample_size, 1000);
        assert_eq!(config.curve_steps, 20);
        Ok(())
    }

    #[test]
    fn test_save_and_reload() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("saved.toml");

        let mut config = BendPrepConfig::default();
        config.segment_length = 40.0;
        config.save(&path)?;

        assert_eq!(BendPrepConfig::from_file(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BENDPREP_K_FACTOR", "0.5"),
            ("BENDPREP_CURVE_STEPS", "many"),
            ("BENDPREP_SAMPLE_SIZE", "250"),
        ]
        .into_iter()
        .collect();

        let mut config = BendPrepConfig::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.default_k_factor, 0.5);
        assert_eq!(config.curve_steps, 20);
        assert_eq!(config.centerline.sample_size, 250);
    }

    #[test]
    fn test_invalid_k_factor_rejected() {
        let config = BendPrepConfig {
            default_k_factor: 1.2,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_editor_geometry_rejected() {
        for config in [
            BendPrepConfig {
                snap_tolerance: f64::NAN,
                ..Default::default()
            },
            BendPrepConfig {
                snap_tolerance: -1.0,
                ..Default::default()
            },
            BendPrepConfig {
                segment_length: 0.0,
                ..Default::default()
            },
            BendPrepConfig {
                curve_offset: f64::INFINITY,
                ..Default::default()
            },
        ] {
            assert!(config.validate().is_err(), "accepted {:?}", config);
        }

        let flipped = BendPrepConfig {
            curve_offset: -50.0,
            ..Default::default()
        };
        assert!(flipped.validate().is_ok());
    }

    #[test]
    fn test_zero_tolerance_in_file_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("bendprep.toml");
        std::fs::write(&path, "snap_tolerance = 0.0\n")?;

        let err = BendPrepConfig::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("snap_tolerance"));
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = BendPrepConfig::load(Some(Path::new("/nonexistent/bendprep.toml"))).unwrap_err();
        assert!(err.to_string().contains("bendprep.toml"));
    }
}
