use mcg_core::{clamp_dimension, RunMode, Size};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PlatformConfig {
    #[serde(default = "default_title")]
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Inclusive `[min, max]` the width is clamped into. Absent means the
    /// requested width is used verbatim.
    #[serde(default)]
    pub width_range: Option<[u32; 2]>,
    #[serde(default)]
    pub height_range: Option<[u32; 2]>,
    #[serde(default)]
    pub mode: RunMode,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: 375,
            height: 667,
            width_range: None,
            height_range: None,
            mode: RunMode::Development,
        }
    }
}

impl PlatformConfig {
    pub fn canvas_size(&self) -> Size {
        Size::new(
            clamp_dimension(self.width, self.width_range.map(|[min, max]| (min, max))),
            clamp_dimension(self.height, self.height_range.map(|[min, max]| (min, max))),
        )
    }
}

pub fn load_platform_config_from_path(path: &Path) -> Result<PlatformConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read platform config {}: {e}", path.display()))?;
    let config: PlatformConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse platform config {}: {e}", path.display()))?;
    validate_platform_config(&config)?;
    Ok(config)
}

fn validate_platform_config(config: &PlatformConfig) -> Result<(), String> {
    if config.width == 0 || config.height == 0 {
        return Err("Platform config validation failed: width/height must be > 0".to_string());
    }
    for (axis, range) in [("width", config.width_range), ("height", config.height_range)] {
        if let Some([min, max]) = range {
            if min > max {
                return Err(format!(
                    "Platform config validation failed: {axis}_range min {min} exceeds max {max}"
                ));
            }
        }
    }
    Ok(())
}

fn default_title() -> String {
    "mcg".to_string()
}
