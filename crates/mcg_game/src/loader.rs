//! Resource lists and the synchronous loader that turns them into atlas
//! entries.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use mcg_core::Size;
use mcg_platform::{Host, ImageRef, Surface, TextAlign};
use serde::Deserialize;

use crate::atlas::SpriteAtlas;
use crate::error::GameError;

pub const PROGRESS_FONT: &str = "14px Arial";
pub const PROGRESS_Y: f32 = 150.0;

/// One entry of a resource list.
///
/// ```json
/// { "type": "image", "name": "sheet", "url": "sheet.png", "map": "sheet.txt" }
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ResourceDescriptor {
    /// Only `"image"` is loaded; other kinds are accepted and skipped.
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub url: String,
    /// Sprite manifest for a sheet. Without it the image is one sprite.
    #[serde(default)]
    pub map: Option<String>,
    /// Destination scale for a whole-image sprite.
    #[serde(default)]
    pub scale: Option<f32>,
}

impl ResourceDescriptor {
    pub fn image(name: &str, url: &str) -> Self {
        Self {
            kind: "image".to_string(),
            name: name.to_string(),
            url: url.to_string(),
            map: None,
            scale: None,
        }
    }

    pub fn with_map(mut self, map: &str) -> Self {
        self.map = Some(map.to_string());
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn is_image(&self) -> bool {
        self.kind == "image"
    }
}

pub fn load_resource_list_from_path(path: &Path) -> Result<Vec<ResourceDescriptor>, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read resource list {}: {e}", path.display()))?;
    let list: Vec<ResourceDescriptor> = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse resource list {}: {e}", path.display()))?;
    validate_resource_list(&list)?;
    Ok(list)
}

fn validate_resource_list(list: &[ResourceDescriptor]) -> Result<(), String> {
    let mut image_names = HashSet::new();
    for (index, entry) in list.iter().enumerate() {
        if entry.name.trim().is_empty() {
            return Err(format!(
                "Resource list validation failed: entry {index} has an empty name"
            ));
        }
        if entry.url.trim().is_empty() {
            return Err(format!(
                "Resource list validation failed: '{}' has an empty url",
                entry.name
            ));
        }
        if let Some(scale) = entry.scale {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(format!(
                    "Resource list validation failed: '{}' scale must be > 0, got {scale}",
                    entry.name
                ));
            }
        }
        if entry.is_image() && !image_names.insert(entry.name.as_str()) {
            return Err(format!(
                "Resource list validation failed: duplicate image name '{}'",
                entry.name
            ));
        }
    }
    Ok(())
}

/// Load every image in `list`, registering its sprites in `atlas` and storing
/// the image itself in `images` under its name. Progress is redrawn on
/// `surface` before the first image and after each one.
///
/// Stops at the first failure; images loaded before it stay registered.
/// Returns the number of images loaded.
pub fn load_resources(
    host: &mut dyn Host,
    list: &[ResourceDescriptor],
    atlas: &mut SpriteAtlas,
    images: &mut HashMap<String, ImageRef>,
    surface: &mut dyn Surface,
) -> Result<usize, GameError> {
    let canvas = atlas.canvas();
    let total = list.iter().filter(|entry| entry.is_image()).count();
    draw_progress(surface, canvas, 0);

    let mut done = 0;
    for entry in list {
        if !entry.is_image() {
            log::debug!("Skipping '{}' resource '{}'", entry.kind, entry.name);
            continue;
        }

        let image = host
            .load_image(&entry.name, &entry.url)
            .map_err(|reason| load_error(entry, &entry.url, reason))?;

        match entry.map.as_deref() {
            Some(map_url) => {
                let manifest = host
                    .fetch_text(map_url)
                    .map_err(|reason| load_error(entry, map_url, reason))?;
                let sprites = atlas.parse_manifest(&image, &manifest)?;
                log::debug!("Sheet '{}' registered {} sprites", entry.name, sprites);
            }
            None => {
                atlas.register_whole_image(&entry.name, &image, entry.scale);
            }
        }
        images.insert(entry.name.clone(), image);

        done += 1;
        draw_progress(surface, canvas, done * 100 / total);
    }

    log::info!("Loaded {} images, {} sprites", done, atlas.len());
    Ok(done)
}

/// Clear the canvas and show `Loading resources {percent} / 100...` centered
/// near the top. Leaves the surface style as it found it.
pub fn draw_progress(surface: &mut dyn Surface, canvas: Size, percent: usize) {
    surface.save();
    surface.clear_rect(canvas.as_rect());
    surface.set_text_align(TextAlign::Center);
    surface.set_font(PROGRESS_FONT);
    surface.fill_text(
        &format!("Loading resources {percent} / 100..."),
        (canvas.w >> 1) as f32,
        PROGRESS_Y,
    );
    surface.restore();
}

fn load_error(entry: &ResourceDescriptor, url: &str, reason: String) -> GameError {
    GameError::ResourceLoad {
        name: entry.name.clone(),
        url: url.to_string(),
        reason,
    }
}
