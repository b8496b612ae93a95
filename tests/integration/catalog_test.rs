//! Integration tests for scene catalog loading

use tempfile::TempDir;

use vignette::catalog::{SceneCatalog, STORY_TITLE};
use vignette::CatalogError;

use crate::helpers::{fixtures_dir, load_fixture};

#[test]
fn builtin_story_has_five_scenes() {
    let catalog = SceneCatalog::builtin();
    let ids: Vec<&str> = catalog.scenes().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        ["market", "conversation", "invitation", "club-exterior", "club-interior"]
    );
    assert_eq!(catalog.total_duration_ms(), 16_700);
    assert_eq!(catalog.offsets(), &[0, 3500, 6700, 9900, 13100, 16700]);
    assert!(STORY_TITLE.contains("Hoa"));
}

#[test]
fn builtin_matches_recomputed_offsets() {
    let builtin = SceneCatalog::builtin();
    let rebuilt = SceneCatalog::new(builtin.scenes().to_vec()).unwrap();
    assert_eq!(builtin, rebuilt);
}

#[test]
fn load_fixture_catalog() {
    let catalog = SceneCatalog::load(fixtures_dir().join("two_scenes.toml")).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get(1).map(|s| s.subtitle.as_str()), Some("The second one"));
    assert_eq!(catalog.total_duration_ms(), 1500);
}

#[test]
fn written_catalog_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("story.toml");
    let builtin = SceneCatalog::builtin();
    std::fs::write(&path, builtin.to_toml_string().unwrap()).unwrap();

    assert_eq!(SceneCatalog::load(&path).unwrap(), builtin);
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = SceneCatalog::from_toml_str(&load_fixture("duplicate_ids.toml")).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateId { ref id } if id == "a"));
}

#[test]
fn zero_duration_is_rejected() {
    let err = SceneCatalog::from_toml_str(&load_fixture("zero_duration.toml")).unwrap_err();
    assert!(matches!(err, CatalogError::ZeroDuration { .. }));
}

#[test]
fn file_without_scenes_is_rejected() {
    let err = SceneCatalog::from_toml_str(&load_fixture("no_scenes.toml")).unwrap_err();
    assert!(matches!(err, CatalogError::Empty));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = SceneCatalog::load(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, CatalogError::ReadError { .. }));
    assert!(err.to_string().contains("missing.toml"));
}
