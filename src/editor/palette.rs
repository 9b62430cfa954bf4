//! Piece Color Registry
//!
//! Colors are loaded once into a shared table and referenced by pieces
//! through a small [`ColorId`] handle. A color is not a single RGBA value:
//! each entry carries four shades (top, left, right, edge) so faces can be
//! painted by orientation without textures.
//!
//! Registry document (JSON):
//! ```text
//! [
//!   { "ident": "lime", "data": [[164,219,15,255], [147,205,14,255], [112,173,11,255], [107,166,11,255]] },
//!   ...
//! ]
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RGBA with 8 bits per channel.
pub type Rgba = [u8; 4];

/// Identifier that must exist in every registry; default brush color.
pub const LIME: &str = "lime";
/// Identifier that must exist in every registry; fallback for unknown colors.
pub const WHITE: &str = "white";

/// Shade slots inside a [`PieceColor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Top = 0,
    Left = 1,
    Right = 2,
    Edge = 3,
}

/// A named color with its four face shades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceColor {
    pub ident: String,
    #[serde(rename = "data")]
    pub shades: [Rgba; 4],
}

impl PieceColor {
    pub fn new(ident: impl Into<String>, shades: [Rgba; 4]) -> Self {
        Self {
            ident: ident.into(),
            shades,
        }
    }

    pub fn shade(&self, shade: Shade) -> Rgba {
        self.shades[shade as usize]
    }

    pub fn top(&self) -> Rgba {
        self.shade(Shade::Top)
    }

    pub fn left(&self) -> Rgba {
        self.shade(Shade::Left)
    }

    pub fn right(&self) -> Rgba {
        self.shade(Shade::Right)
    }

    pub fn edge(&self) -> Rgba {
        self.shade(Shade::Edge)
    }

    /// All four shades normalized to 0..1, in slot order. This is the
    /// per-instance color payload uploaded to the GPU.
    pub fn shades_f32(&self) -> [[f32; 4]; 4] {
        self.shades.map(rgba_to_f32)
    }
}

/// Convert an 8-bit RGBA color to normalized floats.
#[inline]
pub fn rgba_to_f32(c: Rgba) -> [f32; 4] {
    [
        c[0] as f32 / 255.0,
        c[1] as f32 / 255.0,
        c[2] as f32 / 255.0,
        c[3] as f32 / 255.0,
    ]
}

/// Normalized color with its alpha multiplied by `factor`.
#[inline]
pub fn fade(c: Rgba, factor: f32) -> [f32; 4] {
    let mut f = rgba_to_f32(c);
    f[3] *= factor;
    f
}

/// Handle into a [`ColorRegistry`]. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorId(u16);

impl ColorId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Errors raised while loading a color registry document.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("failed to read color registry: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed color registry: {0}")]
    Json(#[from] serde_json::Error),
    #[error("color registry is missing required color '{0}'")]
    MissingColor(&'static str),
    #[error("color registry has too many entries ({0})")]
    TooManyColors(usize),
}

/// Load-once table of piece colors, kept in document order.
#[derive(Debug, Clone)]
pub struct ColorRegistry {
    colors: Vec<PieceColor>,
    by_ident: HashMap<String, ColorId>,
    lime: ColorId,
    white: ColorId,
}

/// Palette used when no external registry document is configured.
const BUILTIN_COLORS: &[(&str, [Rgba; 4])] = &[
    ("white", [[245, 245, 240, 255], [226, 226, 220, 255], [200, 200, 194, 255], [150, 150, 146, 255]]),
    ("black", [[58, 58, 62, 255], [46, 46, 50, 255], [34, 34, 38, 255], [10, 10, 12, 255]]),
    ("red", [[214, 40, 40, 255], [196, 33, 33, 255], [160, 24, 24, 255], [120, 16, 16, 255]]),
    ("orange", [[245, 140, 30, 255], [228, 124, 24, 255], [196, 100, 16, 255], [150, 74, 10, 255]]),
    ("yellow", [[250, 215, 40, 255], [236, 200, 30, 255], [206, 170, 20, 255], [160, 128, 12, 255]]),
    ("lime", [[164, 219, 15, 255], [147, 205, 14, 255], [112, 173, 11, 255], [107, 166, 11, 255]]),
    ("green", [[40, 150, 70, 255], [34, 134, 60, 255], [26, 108, 48, 255], [16, 80, 34, 255]]),
    ("blue", [[30, 100, 200, 255], [26, 88, 182, 255], [20, 70, 150, 255], [12, 50, 112, 255]]),
    ("brown", [[120, 74, 40, 255], [106, 64, 34, 255], [86, 50, 26, 255], [60, 34, 16, 255]]),
    ("gray", [[160, 160, 164, 255], [144, 144, 148, 255], [120, 120, 124, 255], [86, 86, 90, 255]]),
    ("pink", [[240, 150, 190, 255], [226, 134, 176, 255], [196, 110, 150, 255], [150, 80, 112, 255]]),
];

impl ColorRegistry {
    /// Build a registry from entries in their natural (document) order.
    ///
    /// Duplicate identifiers keep the first occurrence.
    pub fn from_colors(entries: Vec<PieceColor>) -> Result<Self, PaletteError> {
        if entries.len() > u16::MAX as usize {
            return Err(PaletteError::TooManyColors(entries.len()));
        }

        let mut colors = Vec::with_capacity(entries.len());
        let mut by_ident = HashMap::with_capacity(entries.len());
        for entry in entries {
            if by_ident.contains_key(&entry.ident) {
                log::warn!("Palette: duplicate color '{}' ignored", entry.ident);
                continue;
            }
            by_ident.insert(entry.ident.clone(), ColorId(colors.len() as u16));
            colors.push(entry);
        }

        let lime = *by_ident.get(LIME).ok_or(PaletteError::MissingColor(LIME))?;
        let white = *by_ident.get(WHITE).ok_or(PaletteError::MissingColor(WHITE))?;

        Ok(Self {
            colors,
            by_ident,
            lime,
            white,
        })
    }

    /// Parse a registry document.
    pub fn from_json_str(json: &str) -> Result<Self, PaletteError> {
        let entries: Vec<PieceColor> = serde_json::from_str(json)?;
        Self::from_colors(entries)
    }

    /// Read and parse a registry document from disk.
    pub fn load(path: &Path) -> Result<Self, PaletteError> {
        let text = std::fs::read_to_string(path)?;
        let registry = Self::from_json_str(&text)?;
        log::info!(
            "Palette: loaded {} colors from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// The compiled-in palette.
    pub fn builtin() -> Self {
        let mut colors = Vec::with_capacity(BUILTIN_COLORS.len());
        let mut by_ident = HashMap::with_capacity(BUILTIN_COLORS.len());
        for (i, (ident, shades)) in BUILTIN_COLORS.iter().enumerate() {
            by_ident.insert((*ident).to_string(), ColorId(i as u16));
            colors.push(PieceColor::new(*ident, *shades));
        }
        let lime = by_ident[LIME];
        let white = by_ident[WHITE];
        Self {
            colors,
            by_ident,
            lime,
            white,
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Resolve a handle. Handles only come from this registry, so the
    /// lookup falls back to white rather than panicking on a stale id.
    pub fn get(&self, id: ColorId) -> &PieceColor {
        self.colors
            .get(id.index())
            .unwrap_or(&self.colors[self.white.index()])
    }

    pub fn id_of(&self, ident: &str) -> Option<ColorId> {
        self.by_ident.get(ident).copied()
    }

    /// The `n`-th color in natural order.
    pub fn nth(&self, n: usize) -> Option<ColorId> {
        (n < self.colors.len()).then_some(ColorId(n as u16))
    }

    pub fn lime(&self) -> ColorId {
        self.lime
    }

    pub fn white(&self) -> ColorId {
        self.white
    }

    /// Iterate colors in natural order together with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (ColorId, &PieceColor)> {
        self.colors
            .iter()
            .enumerate()
            .map(|(i, c)| (ColorId(i as u16), c))
    }
}

impl Default for ColorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_required_colors() {
        let reg = ColorRegistry::builtin();
        assert_eq!(reg.get(reg.lime()).ident, LIME);
        assert_eq!(reg.get(reg.white()).ident, WHITE);
        assert!(reg.len() >= 10);
    }

    #[test]
    fn test_lime_shades() {
        let reg = ColorRegistry::builtin();
        let lime = reg.get(reg.lime());
        assert_eq!(lime.top(), [164, 219, 15, 255]);
        assert_eq!(lime.edge(), [107, 166, 11, 255]);
        let f = lime.shades_f32();
        assert!((f[0][0] - 164.0 / 255.0).abs() < 1e-6);
        assert_eq!(f[3][3], 1.0);
    }

    #[test]
    fn test_from_json_keeps_document_order() {
        let json = r#"[
            {"ident": "white", "data": [[255,255,255,255],[250,250,250,255],[240,240,240,255],[200,200,200,255]]},
            {"ident": "teal",  "data": [[0,128,128,255],[0,120,120,255],[0,100,100,255],[0,80,80,255]]},
            {"ident": "lime",  "data": [[164,219,15,255],[147,205,14,255],[112,173,11,255],[107,166,11,255]]}
        ]"#;
        let reg = ColorRegistry::from_json_str(json).unwrap();
        let order: Vec<&str> = reg.iter().map(|(_, c)| c.ident.as_str()).collect();
        assert_eq!(order, vec!["white", "teal", "lime"]);
        assert_eq!(reg.nth(1), reg.id_of("teal"));
        assert_eq!(reg.nth(3), None);
    }

    #[test]
    fn test_missing_required_color() {
        let json = r#"[{"ident": "white", "data": [[1,1,1,1],[1,1,1,1],[1,1,1,1],[1,1,1,1]]}]"#;
        match ColorRegistry::from_json_str(json) {
            Err(PaletteError::MissingColor(LIME)) => {}
            other => panic!("expected MissingColor(lime), got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_registry() {
        assert!(matches!(
            ColorRegistry::from_json_str("{ not json"),
            Err(PaletteError::Json(_))
        ));
    }

    #[test]
    fn test_fade_scales_alpha_only() {
        let f = fade([255, 0, 0, 255], 0.5);
        assert_eq!(f, [1.0, 0.0, 0.0, 0.5]);
    }
}
