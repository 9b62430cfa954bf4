//! Editor Configuration
//!
//! Window, panel layout, block dimensions and preferences, loadable from an
//! optional JSON file. Every field has a default so a partial file (or no
//! file at all) yields a working editor.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::editor::model::{Coord2, LayerIndex};
use crate::input::Position;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "nanoblock.json";
/// Environment variable overriding [`DEFAULT_CONFIG_FILE`].
pub const CONFIG_ENV_VAR: &str = "NANOBLOCK_CONFIG";

/// Side length of the editing footprint in cells.
pub const MOCK: u32 = 16;

// ============================================================================
// ERROR TYPE
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// SECTIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Nanoblock Editor".to_string(),
            width: 1280,
            height: 800,
        }
    }
}

/// Screen placement of the stacked 2D layer panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Top-left corner of the first (top-most layer) panel, in pixels.
    pub base: [f32; 2],
    /// Pixel pitch of one grid cell.
    pub cell_size: f32,
    /// Vertical gap between consecutive panels, in pixels.
    pub spacing: f32,
    /// Panel side length in cells.
    pub grid_size: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base: [10.0, 50.0],
            cell_size: 12.0,
            spacing: 10.0,
            grid_size: MOCK,
        }
    }
}

/// Screen rectangle of one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PanelRect {
    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

impl LayoutConfig {
    /// Side of a panel in pixels.
    pub fn panel_extent(&self) -> f32 {
        self.grid_size as f32 * self.cell_size
    }

    /// Rectangle of the panel at stacking slot `slot` (0 = top of screen).
    pub fn panel_rect(&self, slot: usize) -> PanelRect {
        let extent = self.panel_extent();
        PanelRect {
            x: self.base[0],
            y: self.base[1] + (extent + self.spacing) * slot as f32,
            width: extent,
            height: extent,
        }
    }

    /// Panels are stacked top-most model layer first.
    pub fn layer_for_slot(&self, slot: usize, last_layer: LayerIndex) -> LayerIndex {
        last_layer - slot as LayerIndex
    }

    pub fn slot_for_layer(&self, layer: LayerIndex, last_layer: LayerIndex) -> usize {
        (last_layer - layer).max(0) as usize
    }

    /// Grid cell under `p` inside `rect`. Callers check containment first.
    pub fn cell_in(&self, rect: PanelRect, p: Position) -> Coord2 {
        Coord2::new(
            ((p.x - rect.x) / self.cell_size).floor() as i32,
            ((p.y - rect.y) / self.cell_size).floor() as i32,
        )
    }
}

/// World-space block dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockDimensions {
    /// Edge of one grid cell.
    pub side: f32,
    /// Height of one layer.
    pub height: f32,
    pub stud_height: f32,
    pub stud_diameter: f32,
    /// Segment count for cylinders and studs.
    pub segments: u32,
}

impl Default for BlockDimensions {
    fn default() -> Self {
        Self {
            side: 3.8,
            height: 3.1,
            stud_height: 1.4,
            stud_diameter: 2.5,
            segments: 32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    /// Normals with a Y component strictly above this count as top faces.
    pub up_threshold: f32,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self { up_threshold: 0.3 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Draw the hover rectangle on every panel, not only the hovered layer.
    pub draw_hover_on_all_layers: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub model: PathBuf,
    /// External color registry; the built-in table is used when absent.
    pub colors: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("model.json"),
            colors: None,
        }
    }
}

// ============================================================================
// EDITOR CONFIG
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub window: WindowConfig,
    pub layout: LayoutConfig,
    pub blocks: BlockDimensions,
    pub shading: ShadingConfig,
    pub prefs: Preferences,
    pub paths: PathsConfig,
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Load `path`, or defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// `$NANOBLOCK_CONFIG`, else `nanoblock.json`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.layout.grid_size, 16);
        assert_eq!(config.blocks.side, 3.8);
        assert_eq!(config.blocks.segments, 32);
        assert_eq!(config.shading.up_threshold, 0.3);
        assert!(!config.prefs.draw_hover_on_all_layers);
        assert!(config.paths.colors.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json_str(
            r#"{ "layout": { "cell_size": 20.0 }, "prefs": { "draw_hover_on_all_layers": true } }"#,
        )
        .unwrap();
        assert_eq!(config.layout.cell_size, 20.0);
        assert_eq!(config.layout.spacing, 10.0);
        assert!(config.prefs.draw_hover_on_all_layers);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            EditorConfig::from_json_str("{ \"layout\": 5 }"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config =
            EditorConfig::load_or_default(Path::new("/definitely/not/here/nanoblock.json")).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_panel_stacking() {
        let layout = LayoutConfig::default();
        let first = layout.panel_rect(0);
        let second = layout.panel_rect(1);
        assert_eq!(first.x, 10.0);
        assert_eq!(first.y, 50.0);
        assert_eq!(first.width, 192.0);
        assert_eq!(second.y, 50.0 + 192.0 + 10.0);

        assert_eq!(layout.layer_for_slot(0, 3), 3);
        assert_eq!(layout.layer_for_slot(3, 3), 0);
        assert_eq!(layout.slot_for_layer(1, 3), 2);
    }

    #[test]
    fn test_cell_in_panel() {
        let layout = LayoutConfig::default();
        let rect = layout.panel_rect(0);
        assert!(rect.contains(Position::new(10.0, 50.0)));
        assert!(!rect.contains(Position::new(202.0, 60.0)));
        assert_eq!(layout.cell_in(rect, Position::new(10.0, 50.0)), Coord2::new(0, 0));
        assert_eq!(layout.cell_in(rect, Position::new(35.0, 75.0)), Coord2::new(2, 2));
    }
}
