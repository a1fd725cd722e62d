//! Visibility resolution over hand-built layer trees.

use uuid::Uuid;

use viewlayer_library::model::scene::{LayerNodeId, LayerTree};
use viewlayer_library::visibility::{NamingIndex, resolve, resolve_view_layer};

fn add(tree: &mut LayerTree, parent: LayerNodeId, name: &str) -> LayerNodeId {
    tree.add_child(parent, Uuid::new_v4(), name).unwrap()
}

fn flags(tree: &LayerTree, id: LayerNodeId) -> (bool, bool) {
    let node = tree.get(id).unwrap();
    (node.exclude, node.holdout)
}

#[test]
fn test_single_target_node_is_included() {
    let mut tree = LayerTree::new(Uuid::new_v4(), "chars");
    let root = tree.root();
    resolve(&mut tree, root, "chars", &NamingIndex::default(), false);
    assert_eq!(flags(&tree, root), (false, false));
}

#[test]
fn test_always_active_suffix_ignores_target() {
    for target in ["chars", "env", "chars.GP", "missing"] {
        let mut tree = LayerTree::new(Uuid::new_v4(), "Scene Collection");
        let root = tree.root();
        let other = add(&mut tree, root, "other");
        let props = add(&mut tree, other, "props.all");
        resolve(&mut tree, root, target, &NamingIndex::default(), false);
        assert!(!tree.get(props).unwrap().exclude, "target {}", target);
    }
}

#[test]
fn test_unvisited_nodes_are_not_mutated() {
    let mut tree = LayerTree::new(Uuid::new_v4(), "Scene Collection");
    let root = tree.root();
    let a = add(&mut tree, root, "a");
    let b = add(&mut tree, root, "b");
    let b_all = add(&mut tree, b, "b.all");
    tree.get_mut(b_all).unwrap().exclude = true;

    resolve(&mut tree, a, "zzz", &NamingIndex::default(), false);
    assert!(tree.get(a).unwrap().exclude);
    assert!(tree.get(b_all).unwrap().exclude);
}

#[test]
fn test_lighting_scope_follows_target_prefix() {
    let index = NamingIndex::default();
    let mut tree = LayerTree::new(Uuid::new_v4(), "Scene Collection");
    let root = tree.root();
    let rig = add(&mut tree, root, "lgt.kitchen.rig");

    resolve(&mut tree, root, "kitchen.interior", &index, false);
    assert!(!tree.get(rig).unwrap().exclude);

    resolve(&mut tree, root, "bath.interior", &index, false);
    assert!(tree.get(rig).unwrap().exclude);
}

#[test]
fn test_grease_pencil_target_vetoes_lighting() {
    let index = NamingIndex::default();
    let mut tree = LayerTree::new(Uuid::new_v4(), "Scene Collection");
    let root = tree.root();
    let global = add(&mut tree, root, "lgt.key");
    let scoped = add(&mut tree, root, "lgt.kitchen.rig");
    let all = add(&mut tree, root, "lgt.all");

    resolve(&mut tree, root, "kitchen.chars.GP", &index, false);
    assert!(tree.get(global).unwrap().exclude);
    assert!(tree.get(scoped).unwrap().exclude);
    assert!(tree.get(all).unwrap().exclude);

    resolve(&mut tree, root, "kitchen.chars", &index, false);
    assert!(!tree.get(global).unwrap().exclude);
    assert!(!tree.get(scoped).unwrap().exclude);
    assert!(!tree.get(all).unwrap().exclude);
}

#[test]
fn test_holdout_follows_its_parent_collection() {
    let index = NamingIndex::default().with_holdout_parent("crowd.hdt", "chars");
    let mut tree = LayerTree::new(Uuid::new_v4(), "Scene Collection");
    let root = tree.root();
    let chars = add(&mut tree, root, "chars");
    let crowd = add(&mut tree, chars, "crowd.hdt");

    resolve(&mut tree, root, "chars", &index, false);
    assert_eq!(flags(&tree, crowd), (false, true));

    resolve(&mut tree, root, "env", &index, false);
    assert_eq!(flags(&tree, crowd), (true, false));
}

#[test]
fn test_holdout_rule_applies_without_inheritance() {
    let index = NamingIndex::default().with_holdout_parent("crowd.hdt", "chars");
    let mut tree = LayerTree::new(Uuid::new_v4(), "crowd.hdt");
    let root = tree.root();

    resolve(&mut tree, root, "chars", &index, false);
    assert_eq!(flags(&tree, root), (false, true));

    resolve(&mut tree, root, "env", &index, false);
    assert_eq!(flags(&tree, root), (true, false));
}

#[test]
fn test_inherited_activation_marks_nested_holdouts() {
    let index = NamingIndex::default();
    let mut tree = LayerTree::new(Uuid::new_v4(), "Scene Collection");
    let root = tree.root();
    let env = add(&mut tree, root, "env");
    let trees = add(&mut tree, env, "trees.hdt");

    resolve(&mut tree, root, "env", &index, false);
    assert_eq!(flags(&tree, trees), (false, true));
}

#[test]
fn test_children_inherit_active_parent() {
    let mut tree = LayerTree::new(Uuid::new_v4(), "Scene Collection");
    let root = tree.root();
    let chars = add(&mut tree, root, "chars");
    let hero = add(&mut tree, chars, "hero");
    let sidekick = add(&mut tree, hero, "sidekick");
    let env = add(&mut tree, root, "env");

    resolve(&mut tree, root, "chars", &NamingIndex::default(), false);
    assert!(!tree.get(hero).unwrap().exclude);
    assert!(!tree.get(sidekick).unwrap().exclude);
    assert!(tree.get(env).unwrap().exclude);
}

#[test]
fn test_excluded_parent_does_not_block_matching_descendant() {
    let mut tree = LayerTree::new(Uuid::new_v4(), "Scene Collection");
    let root = tree.root();
    let env = add(&mut tree, root, "env");
    let fx = add(&mut tree, env, "fx.all");
    let leaf = add(&mut tree, fx, "sparks");

    resolve(&mut tree, root, "chars", &NamingIndex::default(), false);
    assert!(tree.get(env).unwrap().exclude);
    assert!(!tree.get(fx).unwrap().exclude);
    assert!(!tree.get(leaf).unwrap().exclude);
}

#[test]
fn test_resolve_is_idempotent() {
    let index = NamingIndex::default().with_holdout_parent("crowd.hdt", "chars");
    let mut tree = LayerTree::new(Uuid::new_v4(), "Scene Collection");
    let root = tree.root();
    let chars = add(&mut tree, root, "chars");
    add(&mut tree, chars, "crowd.hdt");
    add(&mut tree, root, "lgt.all");
    add(&mut tree, root, "lgt.env.sun");
    add(&mut tree, root, "props.all");

    resolve(&mut tree, root, "chars", &index, false);
    let first = tree.clone();
    resolve(&mut tree, root, "chars", &index, false);
    assert_eq!(first, tree);
}

#[test]
fn test_unknown_target_keeps_only_always_active_nodes() {
    let mut tree = LayerTree::new(Uuid::new_v4(), "Scene Collection");
    let root = tree.root();
    let chars = add(&mut tree, root, "chars");
    let props = add(&mut tree, root, "props.all");
    let lights = add(&mut tree, root, "lgt.all");

    let summary = resolve_view_layer(&mut tree, "does-not-exist", &NamingIndex::default());
    assert!(tree.get(chars).unwrap().exclude);
    assert!(!tree.get(props).unwrap().exclude);
    assert!(!tree.get(lights).unwrap().exclude);
    assert!(!tree.get(root).unwrap().exclude);
    assert_eq!(summary.included, 2);
    assert_eq!(summary.excluded, 1);
}

#[test]
fn test_end_to_end_scene_level_conventions() {
    let index = NamingIndex::default().with_holdout_parent("B.hdt", "Root");
    let mut tree = LayerTree::new(Uuid::new_v4(), "Scene Collection");
    let scene_root = tree.root();
    let target = add(&mut tree, scene_root, "Root");
    let a_all = add(&mut tree, scene_root, "A.all");
    let lgt_all = add(&mut tree, scene_root, "lgt.all");
    let rig = add(&mut tree, scene_root, "lgt.kitchen.rig");
    let holdout = add(&mut tree, target, "B.hdt");

    let summary = resolve_view_layer(&mut tree, "Root", &index);

    assert_eq!(flags(&tree, target), (false, false));
    assert!(!tree.get(a_all).unwrap().exclude);
    assert!(!tree.get(lgt_all).unwrap().exclude);
    assert!(tree.get(rig).unwrap().exclude);
    assert_eq!(flags(&tree, holdout), (false, true));
    assert_eq!(summary.holdouts, 1);
}

#[test]
fn test_nested_under_target_everything_inherits() {
    // Inside an active target every rule is short-circuited, the scoped rig included.
    let index = NamingIndex::default().with_holdout_parent("B.hdt", "Root");
    let mut tree = LayerTree::new(Uuid::new_v4(), "Root");
    let root = tree.root();
    let a_all = add(&mut tree, root, "A.all");
    let lgt_all = add(&mut tree, root, "lgt.all");
    let rig = add(&mut tree, root, "lgt.kitchen.rig");
    let holdout = add(&mut tree, root, "B.hdt");

    resolve(&mut tree, root, "Root", &index, false);
    assert!(!tree.get(a_all).unwrap().exclude);
    assert!(!tree.get(lgt_all).unwrap().exclude);
    assert!(!tree.get(rig).unwrap().exclude);
    assert_eq!(flags(&tree, holdout), (false, true));
}
