use log::debug;

use super::index::NamingIndex;
use crate::model::naming;
use crate::model::scene::{LayerNodeId, LayerTree};

/// Counts of what a resolver pass did to one view layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    pub included: usize,
    pub excluded: usize,
    pub holdouts: usize,
}

/// Decide whether a node named `name` joins the view layer isolating `target`.
///
/// Rules are checked in order and the first match wins. An active parent short-circuits
/// every rule, including the Grease Pencil veto on lighting collections.
pub fn should_activate(name: &str, target: &str, index: &NamingIndex, parent_active: bool) -> bool {
    if parent_active {
        return true;
    }
    if name == target {
        return true;
    }
    if index.always_active_names.contains(name) || naming::is_always_active(name) {
        return true;
    }

    let grease_pencil = naming::is_grease_pencil(target);
    if naming::is_lighting_all(name) {
        return !grease_pencil;
    }
    if let Some(scope) = naming::lighting_scope(name) {
        return !grease_pencil && scope.admits(target);
    }

    if naming::is_holdout(name) {
        return index
            .holdout_parents
            .get(name)
            .is_some_and(|parent| parent == target);
    }
    false
}

/// Resolve `node` and its subtree for the view layer isolating `target`.
///
/// Children inherit this node's own outcome as their `parent_active`. Active `.hdt`
/// nodes are always holdouts; excluded nodes never are.
pub fn resolve(
    tree: &mut LayerTree,
    node: LayerNodeId,
    target: &str,
    index: &NamingIndex,
    parent_active: bool,
) {
    let Some(layer_node) = tree.get_mut(node) else {
        return;
    };

    let active = should_activate(&layer_node.name, target, index, parent_active);
    layer_node.exclude = !active;
    if !active {
        layer_node.holdout = false;
    } else if naming::is_holdout(&layer_node.name) {
        layer_node.holdout = true;
    }

    let children = layer_node.children.clone();
    for child in children {
        resolve(tree, child, target, index, active);
    }
}

/// Resolve a whole view layer tree from its root.
///
/// The root is the scene collection, which cannot be excluded; it is put back to
/// included once the pass is done.
pub fn resolve_view_layer(tree: &mut LayerTree, target: &str, index: &NamingIndex) -> ResolveSummary {
    let root = tree.root();
    resolve(tree, root, target, index, false);
    if let Some(root_node) = tree.get_mut(root) {
        root_node.exclude = false;
    }

    let mut summary = ResolveSummary::default();
    for id in tree.iter_depth_first().skip(1) {
        let Some(node) = tree.get(id) else {
            continue;
        };
        if node.exclude {
            summary.excluded += 1;
        } else {
            summary.included += 1;
        }
        if node.holdout {
            summary.holdouts += 1;
        }
    }
    debug!(
        "Resolved '{}': {} included, {} excluded, {} holdouts",
        target, summary.included, summary.excluded, summary.holdouts
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_active_wins_over_grease_pencil_veto() {
        let index = NamingIndex::default();
        assert!(should_activate("lgt.key", "chars.GP", &index, true));
        assert!(!should_activate("lgt.key", "chars.GP", &index, false));
    }

    #[test]
    fn lighting_all_respects_grease_pencil() {
        let index = NamingIndex::default();
        assert!(should_activate("lgt.all", "chars", &index, false));
        assert!(!should_activate("lgt.all", "chars.GP.vl", &index, false));
    }

    #[test]
    fn holdout_without_known_parent_stays_inactive() {
        let index = NamingIndex::default();
        assert!(!should_activate("crowd.hdt", "chars", &index, false));
    }
}
