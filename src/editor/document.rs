//! Model Document Save/Load (.json)
//!
//! Persists a [`Model`] as a small JSON document:
//!
//! ```text
//! {
//!   "info": { "name": "tree", "layers": 3 },
//!   "pieces": [
//!     { "position": [0, 1, 0], "size": [2, 1], "color": "lime" },
//!     { "position": [1, 1, 0], "size": [1, 1], "color": "brown", "type": "round", "studs": "centered" }
//!   ]
//! }
//! ```
//!
//! `position` is `[layer, x, y]`. `size` defaults to `[1, 1]`, `color` to
//! the registry's white entry, `type` to square and `studs` to full.
//! `info.layers` is optional; the layer count is the larger of it and the
//! highest referenced layer plus one.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::editor::model::{Coord2, Model, Piece, ShapeKind, Size2, StudMode};
use crate::editor::palette::ColorRegistry;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Upper bound on layers a document may create.
pub const MAX_LAYERS: usize = 1024;

// ============================================================================
// DOCUMENT SHAPE
// ============================================================================

/// Top-level document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    pub info: DocumentInfo,
    #[serde(default)]
    pub pieces: Vec<PieceEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<usize>,
}

/// One serialized piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceEntry {
    /// `[layer, x, y]`
    pub position: [i32; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<[i32; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PieceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub studs: Option<StudsField>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Square,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudsField {
    None,
    Centered,
    Full,
}

impl From<PieceKind> for ShapeKind {
    fn from(kind: PieceKind) -> Self {
        match kind {
            PieceKind::Square => ShapeKind::Square,
            PieceKind::Round => ShapeKind::Round,
        }
    }
}

impl From<StudsField> for StudMode {
    fn from(studs: StudsField) -> Self {
        match studs {
            StudsField::None => StudMode::None,
            StudsField::Centered => StudMode::Centered,
            StudsField::Full => StudMode::Full,
        }
    }
}

impl From<StudMode> for StudsField {
    fn from(studs: StudMode) -> Self {
        match studs {
            StudMode::None => StudsField::None,
            StudMode::Centered => StudsField::Centered,
            StudMode::Full => StudsField::Full,
        }
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors that can occur during model document save/load.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("piece {index}: negative layer index {layer}")]
    NegativeLayer { index: usize, layer: i32 },
    #[error("piece {index}: invalid size {width}x{height}")]
    InvalidSize {
        index: usize,
        width: i32,
        height: i32,
    },
    #[error("document needs {0} layers (maximum {MAX_LAYERS})")]
    TooManyLayers(usize),
}

// ============================================================================
// CONVERSION
// ============================================================================

/// Describe a model as a document. Pieces are emitted layer by layer in
/// insertion order.
pub fn to_document(model: &Model, registry: &ColorRegistry) -> ModelDocument {
    let pieces = model
        .pieces()
        .map(|(layer, piece)| PieceEntry {
            position: [layer, piece.x(), piece.y()],
            size: Some([piece.width(), piece.height()]),
            color: Some(registry.get(piece.color).ident.clone()),
            kind: (piece.shape == ShapeKind::Round).then_some(PieceKind::Round),
            studs: (piece.studs != StudMode::Full).then(|| piece.studs.into()),
        })
        .collect();

    ModelDocument {
        info: DocumentInfo {
            name: model.name().to_string(),
            layers: Some(model.layer_count()),
        },
        pieces,
    }
}

/// Build a model from a document, resolving colors through `registry`.
pub fn from_document(doc: &ModelDocument, registry: &ColorRegistry) -> Result<Model, DocumentError> {
    let mut needed = doc.info.layers.unwrap_or(0);
    for (index, entry) in doc.pieces.iter().enumerate() {
        let layer = entry.position[0];
        if layer < 0 {
            return Err(DocumentError::NegativeLayer { index, layer });
        }
        needed = needed.max(layer as usize + 1);
    }
    if needed > MAX_LAYERS {
        return Err(DocumentError::TooManyLayers(needed));
    }

    let mut model = Model::new(doc.info.name.clone());
    model.prepare_layers(needed);

    for (index, entry) in doc.pieces.iter().enumerate() {
        let [layer, x, y] = entry.position;
        let [width, height] = entry.size.unwrap_or([1, 1]);
        if width < 1 || height < 1 {
            return Err(DocumentError::InvalidSize {
                index,
                width,
                height,
            });
        }

        let color = match entry.color.as_deref() {
            Some(ident) => registry.id_of(ident).unwrap_or_else(|| {
                log::warn!("Document: unknown color '{}', using white", ident);
                registry.white()
            }),
            None => registry.white(),
        };

        let piece = Piece::new(Coord2::new(x, y), color)
            .with_size(Size2::new(width, height))
            .with_shape(entry.kind.map(Into::into).unwrap_or_default())
            .with_studs(entry.studs.map(Into::into).unwrap_or_default());
        model.add_piece(layer, piece);
    }

    Ok(model)
}

// ============================================================================
// SAVE
// ============================================================================

/// Write `model` to `path` as pretty-printed JSON.
pub fn save_model(path: &Path, model: &Model, registry: &ColorRegistry) -> Result<(), DocumentError> {
    let doc = to_document(model, registry);
    let json = serde_json::to_string_pretty(&doc)?;

    // Ensure parent directories exist.
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;

    log::info!(
        "Document: saved '{}' ({} layers, {} pieces) to {}",
        model.name(),
        model.layer_count(),
        model.piece_count(),
        path.display()
    );
    Ok(())
}

// ============================================================================
// LOAD
// ============================================================================

/// Read a model document. A missing file is an error here; see
/// [`load_or_new`] for the editor's startup behavior.
pub fn load_model(path: &Path, registry: &ColorRegistry) -> Result<Model, DocumentError> {
    let text = std::fs::read_to_string(path)?;
    let doc: ModelDocument = serde_json::from_str(&text)?;
    let model = from_document(&doc, registry)?;
    log::info!(
        "Document: loaded '{}' ({} layers, {} pieces) from {}",
        model.name(),
        model.layer_count(),
        model.piece_count(),
        path.display()
    );
    Ok(model)
}

/// Load `path`, or start a fresh one-layer model named after the file when
/// it does not exist. Any other failure is returned to the caller.
pub fn load_or_new(path: &Path, registry: &ColorRegistry) -> Result<Model, DocumentError> {
    match load_model(path, registry) {
        Err(DocumentError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "untitled".to_string());
            log::info!("Document: {} not found, starting fresh model '{}'", path.display(), name);
            Ok(Model::with_layers(name, 1))
        }
        other => other,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::model::Coord3;

    #[test]
    fn test_defaults_applied_on_load() {
        let reg = ColorRegistry::builtin();
        let json = r#"{ "info": { "name": "t" }, "pieces": [ { "position": [0, 1, 0] } ] }"#;
        let doc: ModelDocument = serde_json::from_str(json).unwrap();
        let model = from_document(&doc, &reg).unwrap();

        let p = model.piece_at(Coord3::new(1, 0, 0)).unwrap();
        assert_eq!(p.size(), Size2::UNIT);
        assert_eq!(p.color, reg.white());
        assert_eq!(p.shape, ShapeKind::Square);
        assert_eq!(p.studs, StudMode::Full);
    }

    #[test]
    fn test_layer_count_from_highest_position() {
        let reg = ColorRegistry::builtin();
        let json = r#"{ "info": { "name": "t" }, "pieces": [
            { "position": [3, 0, 0], "color": "lime" },
            { "position": [1, 0, 0], "color": "lime" }
        ] }"#;
        let doc: ModelDocument = serde_json::from_str(json).unwrap();
        let model = from_document(&doc, &reg).unwrap();
        assert_eq!(model.layer_count(), 4);
    }

    #[test]
    fn test_info_layers_keeps_empty_top_layers() {
        let reg = ColorRegistry::builtin();
        let mut model = Model::with_layers("tall", 5);
        model.add_piece(0, Piece::new(Coord2::default(), reg.lime()));
        let doc = to_document(&model, &reg);
        let back = from_document(&doc, &reg).unwrap();
        assert_eq!(back.layer_count(), 5);
    }

    #[test]
    fn test_non_default_fields_only() {
        let reg = ColorRegistry::builtin();
        let mut model = Model::with_layers("t", 1);
        model.add_piece(0, Piece::new(Coord2::new(0, 0), reg.lime()));
        model.add_piece(
            0,
            Piece::new(Coord2::new(2, 0), reg.lime())
                .with_shape(ShapeKind::Round)
                .with_studs(StudMode::None),
        );

        let json = serde_json::to_value(to_document(&model, &reg)).unwrap();
        let pieces = json["pieces"].as_array().unwrap();
        assert!(pieces[0].get("type").is_none());
        assert!(pieces[0].get("studs").is_none());
        assert_eq!(pieces[1]["type"], "round");
        assert_eq!(pieces[1]["studs"], "none");
        assert_eq!(pieces[0]["color"], "lime");
    }

    #[test]
    fn test_unknown_color_falls_back_to_white() {
        let reg = ColorRegistry::builtin();
        let json = r#"{ "info": { "name": "t" }, "pieces": [ { "position": [0, 0, 0], "color": "no-such-color" } ] }"#;
        let doc: ModelDocument = serde_json::from_str(json).unwrap();
        let model = from_document(&doc, &reg).unwrap();
        assert_eq!(model.piece_at(Coord3::new(0, 0, 0)).unwrap().color, reg.white());
    }

    #[test]
    fn test_negative_layer_rejected() {
        let reg = ColorRegistry::builtin();
        let json = r#"{ "info": { "name": "t" }, "pieces": [ { "position": [-1, 0, 0] } ] }"#;
        let doc: ModelDocument = serde_json::from_str(json).unwrap();
        match from_document(&doc, &reg) {
            Err(DocumentError::NegativeLayer { index: 0, layer: -1 }) => {}
            other => panic!("expected NegativeLayer, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        let reg = ColorRegistry::builtin();
        let json = r#"{ "info": { "name": "t" }, "pieces": [ { "position": [0, 0, 0], "size": [0, 2] } ] }"#;
        let doc: ModelDocument = serde_json::from_str(json).unwrap();
        assert!(matches!(
            from_document(&doc, &reg),
            Err(DocumentError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_too_many_layers_rejected() {
        let reg = ColorRegistry::builtin();
        let json = r#"{ "info": { "name": "t" }, "pieces": [ { "position": [5000, 0, 0] } ] }"#;
        let doc: ModelDocument = serde_json::from_str(json).unwrap();
        assert!(matches!(
            from_document(&doc, &reg),
            Err(DocumentError::TooManyLayers(5001))
        ));
    }
}
