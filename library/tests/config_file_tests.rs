//! Export/import of the view layer setup through the JSON sidecar.

use std::fs;

use viewlayer_library::error::LibraryError;
use viewlayer_library::io::config_file::{self, CONFIG_VERSION, ConfigDocument};
use viewlayer_library::model::passes::{PassFlag, PassProfile, RenderEngine};
use viewlayer_library::model::scene::{AovType, SCENE_COLLECTION_NAME, Scene};

fn setup_scene() -> Scene {
    let mut scene = Scene::new("Shot020");
    scene.add_collection_under(SCENE_COLLECTION_NAME, "chars").unwrap();
    scene.add_collection_under("chars", "hero").unwrap();
    scene.add_collection_under(SCENE_COLLECTION_NAME, "env").unwrap();

    let chars = scene.ensure_view_layer("chars");
    chars.apply_passes(PassProfile::Cycles, &[PassFlag::Combined, PassFlag::Normal]);
    chars.add_or_update_aov("mask", AovType::Value);
    let tree = &mut chars.layer_collection;
    let env = tree.find_by_name("env").unwrap();
    tree.get_mut(env).unwrap().exclude = true;
    let hero = tree.find_by_name("hero").unwrap();
    tree.get_mut(hero).unwrap().indirect_only = true;

    scene.ensure_view_layer("env");
    scene
}

fn collection_flags(scene: &Scene, layer: &str, collection: &str) -> (bool, bool, bool) {
    let tree = &scene.view_layer(layer).unwrap().layer_collection;
    let node = tree.get(tree.find_by_name(collection).unwrap()).unwrap();
    (node.exclude, node.indirect_only, node.holdout)
}

#[test]
fn test_export_describes_every_view_layer() {
    let scene = setup_scene();
    let doc = ConfigDocument::from_scene(&scene);
    assert_eq!(doc.version, CONFIG_VERSION);
    assert_eq!(doc.viewlayers.len(), 3);

    let chars = doc.viewlayers.iter().find(|vl| vl.name == "chars").unwrap();
    assert_eq!(chars.passes.len(), PassProfile::Cycles.passes().len());
    assert_eq!(chars.passes.get("use_pass_normal"), Some(&true));
    assert_eq!(chars.passes.get("use_pass_z"), Some(&false));
    assert_eq!(chars.aovs[0].aov_type, "VALUE");
    assert!(chars.collections["env"].exclude);
    assert!(chars.collections["chars"].children["hero"].indirect_only);

    let json = doc.to_json().unwrap();
    assert!(json.contains("\"viewlayers\""));
    assert!(json.contains("\"type\": \"VALUE\""));
}

#[test]
fn test_file_round_trip_restores_layer_setup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layers.json");
    let source = setup_scene();
    config_file::export_to_file(&source, &path).unwrap();

    let mut target = Scene::new("Shot020");
    target.add_collection_under(SCENE_COLLECTION_NAME, "chars").unwrap();
    target.add_collection_under("chars", "hero").unwrap();
    target.add_collection_under(SCENE_COLLECTION_NAME, "env").unwrap();
    target.ensure_view_layer("chars");

    let summary = config_file::import_from_file(&mut target, &path).unwrap();
    assert_eq!(summary.applied, vec!["ViewLayer".to_string(), "chars".to_string()]);
    assert_eq!(summary.skipped, vec!["env".to_string()]);
    assert!(summary.warnings.is_empty());

    let chars = target.view_layer("chars").unwrap();
    assert!(chars.pass_enabled(PassFlag::Normal));
    assert!(!chars.pass_enabled(PassFlag::Z));
    assert_eq!(chars.aov("mask").unwrap().aov_type, AovType::Value);
    assert_eq!(collection_flags(&target, "chars", "env"), (true, false, false));
    assert_eq!(collection_flags(&target, "chars", "hero"), (false, true, false));
    assert!(target.view_layer("env").is_none());
}

#[test]
fn test_malformed_file_leaves_scene_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"version\": \"1.0\", \"viewlayers\": [").unwrap();

    let mut scene = setup_scene();
    let before = scene.clone();
    let err = config_file::import_from_file(&mut scene, &path).unwrap_err();
    assert!(matches!(err, LibraryError::Config(_)));
    assert_eq!(scene, before);
}

#[test]
fn test_unsupported_version_is_rejected() {
    let err = ConfigDocument::parse(r#"{"version": "2.0", "viewlayers": []}"#).unwrap_err();
    assert!(matches!(err, LibraryError::Config(_)));
    assert!(ConfigDocument::parse(r#"{"version": "1.3", "viewlayers": []}"#).is_ok());
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut scene = setup_scene();
    let err = config_file::import_from_file(&mut scene, &dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, LibraryError::Io(_)));
}

#[test]
fn test_bad_layer_entry_is_reported_and_others_applied() {
    let mut scene = setup_scene();
    let doc = ConfigDocument::parse(
        r#"{
            "version": "1.0",
            "viewlayers": [
                {"name": "chars", "passes": {"use_pass_bogus": true}},
                {"name": "env", "aovs": [{"name": "fog", "type": "VECTOR"}]},
                {"name": "ViewLayer", "passes": {"use_pass_mist": true}}
            ]
        }"#,
    )
    .unwrap();

    let summary = doc.apply(&mut scene);
    assert_eq!(summary.applied, vec!["ViewLayer".to_string()]);
    assert_eq!(summary.warnings.len(), 2);
    assert!(scene.view_layer("ViewLayer").unwrap().pass_enabled(PassFlag::Mist));
    assert!(scene.view_layer("env").unwrap().aovs.is_empty());
    assert!(scene.view_layer("chars").unwrap().pass_enabled(PassFlag::Normal));
}

#[test]
fn test_pass_outside_engine_profile_is_ignored() {
    let mut scene = setup_scene();
    scene.render_engine = RenderEngine::Workbench;
    let doc = ConfigDocument::parse(
        r#"{
            "version": "1.0",
            "viewlayers": [
                {"name": "env", "passes": {"use_pass_shadow": true, "use_pass_mist": true}}
            ]
        }"#,
    )
    .unwrap();

    let summary = doc.apply(&mut scene);
    assert_eq!(summary.applied, vec!["env".to_string()]);
    assert_eq!(summary.warnings.len(), 1);
    let env = scene.view_layer("env").unwrap();
    assert!(env.pass_enabled(PassFlag::Mist));
    assert!(!env.pass_enabled(PassFlag::Shadow));
}

#[test]
fn test_unknown_collection_entries_are_skipped() {
    let mut scene = setup_scene();
    let doc = ConfigDocument::parse(
        r#"{
            "version": "1.0",
            "viewlayers": [
                {"name": "env", "collections": {
                    "gone": {"exclude": true},
                    "chars": {"holdout": true, "children": {"ghost": {"exclude": true}}}
                }}
            ]
        }"#,
    )
    .unwrap();

    let summary = doc.apply(&mut scene);
    assert_eq!(summary.applied, vec!["env".to_string()]);
    assert_eq!(collection_flags(&scene, "env", "chars"), (false, false, true));
    assert_eq!(collection_flags(&scene, "env", "hero"), (false, false, false));
}

#[test]
fn test_failed_layer_reports_only_its_failure() {
    let mut scene = setup_scene();
    scene.render_engine = RenderEngine::Workbench;
    let doc = ConfigDocument::parse(
        r#"{
            "version": "1.0",
            "viewlayers": [
                {"name": "env",
                 "passes": {"use_pass_shadow": true},
                 "aovs": [{"name": "fog", "type": "VECTOR"}]}
            ]
        }"#,
    )
    .unwrap();

    let summary = doc.apply(&mut scene);
    assert!(summary.applied.is_empty());
    assert_eq!(summary.warnings.len(), 1);
    assert!(summary.warnings[0].contains("not imported"));
}
