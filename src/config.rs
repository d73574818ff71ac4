use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ViewConfig
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Tunable constants for layout, projection, painting and interaction.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Perspective focal length
    pub focal_length: f32,
    /// Default camera offset along z
    pub camera_distance: f32,
    /// `K` in `K / (depth + K)`
    pub depth_constant: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    /// Radians per pointer pixel while rotating
    pub rotate_sensitivity: f32,
    /// World units per pointer pixel are `drag_sensitivity / (depth_factor * zoom)`
    pub drag_sensitivity: f32,
    /// Wheel delta that doubles the zoom
    pub wheel_divisor: f32,
    /// Child ring radius around the root; deeper rings shrink by `1 / (level + 1)`
    pub base_radius: f32,
    /// Vertical drop per level, accumulated with depth
    pub level_step: f32,
    /// Box (width, height, depth) for imported nodes
    pub default_box: [f32; 3],
    /// Side faces are skipped below this projected depth (px)
    pub min_side_depth: f32,
    /// Side faces are skipped below this projected width/height (px)
    pub min_face_extent: f32,
    pub min_label_width: f32,
    pub min_label_height: f32,
    /// Lower bound of per-node opacity (0-255)
    pub min_opacity: u8,
    /// Seed for cosmetic randomness. `None` draws from the OS.
    pub seed: Option<u64>,
    /// Where "save positions" writes its JSON
    pub positions_file: PathBuf,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            focal_length: 1000.0,
            camera_distance: 600.0,
            depth_constant: 800.0,
            zoom_min: 0.1,
            zoom_max: 3.0,
            rotate_sensitivity: 0.01,
            drag_sensitivity: 2.0,
            wheel_divisor: 1000.0,
            base_radius: 200.0,
            level_step: 80.0,
            default_box: [40.0, 30.0, 20.0],
            min_side_depth: 2.0,
            min_face_extent: 4.0,
            min_label_width: 20.0,
            min_label_height: 12.0,
            min_opacity: 50,
            seed: None,
            positions_file: PathBuf::from("positions.json"),
        }
    }
}

impl ViewConfig {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Same config with a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Clamp a zoom factor into `[zoom_min, zoom_max]`.
    #[inline]
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.clamp(self.zoom_min, self.zoom_max)
    }
}
