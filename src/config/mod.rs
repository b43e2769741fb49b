//! Configuration management for Panelnav
//!
//! This module handles loading, parsing, and validating navigator
//! configuration from TOML files: layering-group base depths, how a pop
//! sequences its hide and restore, and navigation diagnostics.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration struct containing all navigator settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavigatorConfig {
    /// On pop, wait for the frame owner's hide animation before
    /// re-showing the windows it replaced
    #[serde(default = "NavigatorConfig::default_wait_for_hide")]
    pub wait_for_hide: bool,

    /// Default of `ShowOptions::check_navigation` for `show_window`
    #[serde(default)]
    pub check_navigation_by_default: bool,

    /// Dump the back-stack after every change
    #[serde(default)]
    pub log_navigation: bool,

    /// Base depth of each layering group
    #[serde(default)]
    pub depth: DepthConfig,
}

/// Base depths of the layering groups
///
/// Bases are not ceilings: a group's depths keep growing with every panel
/// stacked in it and can pass the next base. Keep the gaps wider than the
/// panels a group ever shows at once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DepthConfig {
    /// First depth used by Normal windows
    pub normal_base: i32,

    /// First depth used by Fixed windows
    pub fixed_base: i32,

    /// First depth used by PopUp windows
    pub popup_base: i32,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            wait_for_hide: Self::default_wait_for_hide(),
            check_navigation_by_default: false,
            log_navigation: false,
            depth: DepthConfig::default(),
        }
    }
}

impl Default for DepthConfig {
    fn default() -> Self {
        Self {
            normal_base: 2,
            fixed_base: 100,
            popup_base: 150,
        }
    }
}

impl NavigatorConfig {
    fn default_wait_for_hide() -> bool {
        true
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: NavigatorConfig =
            toml::from_str(contents).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let d = &self.depth;
        if d.normal_base < 0 || d.fixed_base < 0 || d.popup_base < 0 {
            anyhow::bail!("Invalid depth bases: must be non-negative");
        }

        // Groups must not interleave: Normal < Fixed < PopUp
        if !(d.normal_base < d.fixed_base && d.fixed_base < d.popup_base) {
            anyhow::bail!(
                "Invalid depth bases: expected normal ({}) < fixed ({}) < popup ({})",
                d.normal_base,
                d.fixed_base,
                d.popup_base
            );
        }

        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
