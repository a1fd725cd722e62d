use std::collections::{BTreeSet, HashMap};

use crate::model::naming;
use crate::model::scene::Scene;

/// Names the resolver needs to know about beyond the node it is visiting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamingIndex {
    /// Every `lgt.` collection in the scene. Reporting only; the resolver decides from the node name.
    pub lighting_names: BTreeSet<String>,
    pub always_active_names: BTreeSet<String>,
    /// `.hdt` collection name -> name of its parent collection.
    pub holdout_parents: HashMap<String, String>,
}

impl NamingIndex {
    pub fn from_scene(scene: &Scene) -> Self {
        let mut index = NamingIndex::default();
        for collection in scene.collections.values() {
            if naming::is_lighting(&collection.name) {
                index.lighting_names.insert(collection.name.clone());
            }
            if naming::is_always_active(&collection.name) {
                index.always_active_names.insert(collection.name.clone());
            }
            for child_id in &collection.child_ids {
                if let Some(child) = scene.get_collection(*child_id) {
                    if naming::is_holdout(&child.name) {
                        index
                            .holdout_parents
                            .insert(child.name.clone(), collection.name.clone());
                    }
                }
            }
        }
        index
    }

    pub fn with_holdout_parent(mut self, holdout: &str, parent: &str) -> Self {
        self.holdout_parents
            .insert(holdout.to_string(), parent.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::scene::SCENE_COLLECTION_NAME;

    #[test]
    fn index_collects_special_names() {
        let mut scene = Scene::new("Shot");
        scene.add_collection_under(SCENE_COLLECTION_NAME, "chars").unwrap();
        scene.add_collection_under("chars", "crowd.hdt").unwrap();
        scene.add_collection_under(SCENE_COLLECTION_NAME, "props.all").unwrap();
        scene.add_collection_under(SCENE_COLLECTION_NAME, "lgt.all").unwrap();
        scene.add_collection_under(SCENE_COLLECTION_NAME, "lgt.chars.key").unwrap();

        let index = NamingIndex::from_scene(&scene);
        assert_eq!(index.holdout_parents.get("crowd.hdt").map(String::as_str), Some("chars"));
        assert!(index.always_active_names.contains("props.all"));
        assert!(!index.always_active_names.contains("lgt.all"));
        assert_eq!(index.lighting_names.len(), 2);
    }
}
