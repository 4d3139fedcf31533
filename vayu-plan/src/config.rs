//! Configuration loading for VayuPlan

use crate::error::{Result, VayuError};
use crate::planning::{CollisionConfig, PlannerConfig, SmoothingConfig};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct VayuConfig {
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub collision: CollisionConfig,
    #[serde(default)]
    pub smoothing: SmoothingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    /// Path to save the plan JSON (empty disables)
    #[serde(default = "default_plan_path")]
    pub plan_path: String,

    /// Path to save SVG visualization (empty disables)
    #[serde(default = "default_svg_path")]
    pub svg_path: String,

    /// Include tree edges in plan JSON and SVG
    #[serde(default = "default_include_tree")]
    pub include_tree: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            plan_path: default_plan_path(),
            svg_path: default_svg_path(),
            include_tree: default_include_tree(),
        }
    }
}

// Default value functions
fn default_plan_path() -> String {
    "output/plan.json".to_string()
}
fn default_svg_path() -> String {
    "output/plan.svg".to_string()
}
fn default_include_tree() -> bool {
    true
}

impl VayuConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| VayuError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: VayuConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section for out-of-range values
    pub fn validate(&self) -> Result<()> {
        self.planner.validate()?;
        self.collision.validate()?;
        Ok(())
    }
}
