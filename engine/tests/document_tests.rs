//! Document Tests - Save/Load Round Trips
//!
//! Writes models to temporary files and reads them back, checking the
//! per-piece tuple survives and that load failures are classified the way
//! the editor's startup path expects.

use std::collections::BTreeSet;
use std::path::Path;

use nanoblock_engine::editor::{
    ColorRegistry, Coord2, Coord3, DocumentError, Model, Piece, ShapeKind, Size2, StudMode,
    load_model, load_or_new, save_model,
};

type PieceTuple = (i32, i32, i32, i32, i32, String, bool, u8);

fn tuples(model: &Model, registry: &ColorRegistry) -> BTreeSet<PieceTuple> {
    model
        .pieces()
        .map(|(layer, p)| {
            let studs = match p.studs {
                StudMode::None => 0,
                StudMode::Centered => 1,
                StudMode::Full => 2,
            };
            (
                layer,
                p.x(),
                p.y(),
                p.width(),
                p.height(),
                registry.get(p.color).ident.clone(),
                p.shape == ShapeKind::Round,
                studs,
            )
        })
        .collect()
}

fn sample_model(registry: &ColorRegistry) -> Model {
    let mut model = Model::with_layers("house", 4);
    let brown = registry.id_of("brown").unwrap();
    let red = registry.id_of("red").unwrap();
    model.add_piece(0, Piece::new(Coord2::new(0, 0), brown).with_size(Size2::new(4, 2)));
    model.add_piece(0, Piece::new(Coord2::new(0, 2), brown).with_size(Size2::new(1, 3)));
    model.add_piece(
        1,
        Piece::new(Coord2::new(2, 1), red)
            .with_shape(ShapeKind::Round)
            .with_studs(StudMode::Centered),
    );
    model.add_piece(2, Piece::new(Coord2::new(-1, 7), registry.lime()).with_studs(StudMode::None));
    model
}

#[test]
fn test_save_load_round_trip() {
    let registry = ColorRegistry::builtin();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("house.json");

    let model = sample_model(&registry);
    save_model(&path, &model, &registry).unwrap();
    let loaded = load_model(&path, &registry).unwrap();

    assert_eq!(loaded.name(), "house");
    assert_eq!(loaded.layer_count(), model.layer_count());
    assert_eq!(tuples(&loaded, &registry), tuples(&model, &registry));
}

#[test]
fn test_empty_top_layer_survives_round_trip() {
    let registry = ColorRegistry::builtin();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tall.json");

    let mut model = Model::with_layers("tall", 5);
    model.add_piece(0, Piece::new(Coord2::new(0, 0), registry.lime()));
    save_model(&path, &model, &registry).unwrap();

    assert_eq!(load_model(&path, &registry).unwrap().layer_count(), 5);
}

#[test]
fn test_one_layer_scenario_round_trip() {
    let registry = ColorRegistry::builtin();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario.json");

    let mut model = Model::with_layers("scenario", 1);
    model.add_piece(0, Piece::new(Coord2::new(1, 0), registry.lime()));
    save_model(&path, &model, &registry).unwrap();

    let loaded = load_model(&path, &registry).unwrap();
    assert_eq!(loaded.layer_count(), 1);
    assert_eq!(loaded.piece_count(), 1);
    let piece = loaded.piece_at(Coord3::new(1, 0, 0)).unwrap();
    assert_eq!(piece.coord, Coord2::new(1, 0));
    assert_eq!(registry.get(piece.color).ident, "lime");
}

#[test]
fn test_save_creates_parent_directories() {
    let registry = ColorRegistry::builtin();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("m.json");

    save_model(&path, &Model::with_layers("m", 1), &registry).unwrap();
    assert!(path.exists());
}

#[test]
fn test_missing_file_starts_fresh_model() {
    let registry = ColorRegistry::builtin();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("castle.json");

    let model = load_or_new(&path, &registry).unwrap();
    assert_eq!(model.name(), "castle");
    assert_eq!(model.layer_count(), 1);
    assert_eq!(model.piece_count(), 0);

    assert!(matches!(load_model(&path, &registry), Err(DocumentError::Io(_))));
}

#[test]
fn test_malformed_file_is_an_error() {
    let registry = ColorRegistry::builtin();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ \"info\": { \"name\": ").unwrap();

    assert!(matches!(load_or_new(&path, &registry), Err(DocumentError::Json(_))));
}

#[test]
fn test_negative_layer_rejected() {
    let registry = ColorRegistry::builtin();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("neg.json");
    std::fs::write(
        &path,
        r#"{ "info": { "name": "neg" }, "pieces": [ { "position": [-1, 0, 0] } ] }"#,
    )
    .unwrap();

    assert!(matches!(
        load_model(&path, &registry),
        Err(DocumentError::NegativeLayer { index: 0, layer: -1 })
    ));
}

#[test]
fn test_unknown_color_falls_back_to_white() {
    let registry = ColorRegistry::builtin();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("odd.json");
    std::fs::write(
        &path,
        r#"{ "info": { "name": "odd" }, "pieces": [ { "position": [2, 1, 1], "color": "ultraviolet" } ] }"#,
    )
    .unwrap();

    let model = load_model(&path, &registry).unwrap();
    assert_eq!(model.layer_count(), 3);
    let piece = model.piece_at(Coord3::new(1, 1, 2)).unwrap();
    assert_eq!(piece.color, registry.white());
    assert_eq!(piece.size(), Size2::UNIT);
    assert_eq!(piece.studs, StudMode::Full);
}

#[test]
fn test_sample_registry_matches_builtin() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join("colors.json");
    let sample = ColorRegistry::load(&path).unwrap();
    let builtin = ColorRegistry::builtin();

    assert_eq!(sample.len(), builtin.len());
    for ((_, a), (_, b)) in sample.iter().zip(builtin.iter()) {
        assert_eq!(a, b);
    }
}
