use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::collection::Collection;
use super::layer_tree::{LayerNodeId, LayerTree};
use super::material::Material;
use super::view_layer::ViewLayer;
use crate::error::LibraryError;
use crate::model::passes::RenderEngine;

pub const SCENE_COLLECTION_NAME: &str = "Scene Collection";
const DEFAULT_VIEW_LAYER_NAME: &str = "ViewLayer";

/// The scene graph the generator operates on.
///
/// Collections are stored in a flat registry keyed by id; `root_collection_id` is the
/// scene's master collection. Collection names are unique across the registry.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Scene {
    pub name: String,
    #[serde(default)]
    pub render_engine: RenderEngine,
    pub root_collection_id: Uuid,
    pub collections: HashMap<Uuid, Collection>,
    #[serde(default)]
    pub view_layers: Vec<ViewLayer>,
    #[serde(default)]
    pub materials: Vec<Material>,
}

impl Scene {
    pub fn new(name: &str) -> Self {
        let root = Collection::new(SCENE_COLLECTION_NAME);
        let root_id = root.id;
        let mut collections = HashMap::new();
        collections.insert(root_id, root);

        let mut scene = Self {
            name: name.to_string(),
            render_engine: RenderEngine::default(),
            root_collection_id: root_id,
            collections,
            view_layers: Vec::new(),
            materials: Vec::new(),
        };
        let tree = scene.build_layer_tree();
        scene
            .view_layers
            .push(ViewLayer::new(DEFAULT_VIEW_LAYER_NAME, tree));
        scene
    }

    pub fn load(json_str: &str) -> Result<Self, LibraryError> {
        let scene: Scene = serde_json::from_str(json_str)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Check the invariants the resolver walks rely on: the collection graph is a
    /// forest rooted at the scene collection, and every view layer holds a proper tree.
    fn validate(&self) -> Result<(), LibraryError> {
        if !self.collections.contains_key(&self.root_collection_id) {
            return Err(LibraryError::Scene(format!(
                "Root collection {} missing from scene '{}'",
                self.root_collection_id, self.name
            )));
        }

        let mut parents: HashMap<Uuid, &str> = HashMap::new();
        for collection in self.collections.values() {
            for child_id in &collection.child_ids {
                let Some(child) = self.collections.get(child_id) else {
                    return Err(LibraryError::Scene(format!(
                        "Collection '{}' links unknown child {}",
                        collection.name, child_id
                    )));
                };
                if *child_id == self.root_collection_id {
                    return Err(LibraryError::Scene(format!(
                        "Scene collection is linked under '{}'",
                        collection.name
                    )));
                }
                if let Some(other) = parents.insert(*child_id, &collection.name) {
                    return Err(LibraryError::Scene(format!(
                        "Collection '{}' is linked under both '{}' and '{}'",
                        child.name, other, collection.name
                    )));
                }
            }
        }

        for view_layer in &self.view_layers {
            view_layer.layer_collection.validate().map_err(|reason| {
                LibraryError::Scene(format!(
                    "View layer '{}' has a broken collection tree: {}",
                    view_layer.name, reason
                ))
            })?;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<String, LibraryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn root_collection(&self) -> Option<&Collection> {
        self.collections.get(&self.root_collection_id)
    }

    pub fn get_collection(&self, id: Uuid) -> Option<&Collection> {
        self.collections.get(&id)
    }

    pub fn collection_by_name(&self, name: &str) -> Option<&Collection> {
        self.collections.values().find(|c| c.name == name)
    }

    /// Add a collection under `parent_id` and mirror it into every view layer.
    pub fn add_collection(&mut self, parent_id: Uuid, name: &str) -> Result<Uuid, LibraryError> {
        if self.collection_by_name(name).is_some() {
            return Err(LibraryError::Scene(format!(
                "Collection '{}' already exists",
                name
            )));
        }
        if !self.collections.contains_key(&parent_id) {
            return Err(LibraryError::Scene(format!(
                "Parent collection {} not found",
                parent_id
            )));
        }

        let collection = Collection::new(name);
        let id = collection.id;
        self.collections.insert(id, collection);
        if let Some(parent) = self.collections.get_mut(&parent_id) {
            parent.add_child(id);
        }

        for view_layer in &mut self.view_layers {
            let tree = &mut view_layer.layer_collection;
            if let Some(parent_node) = tree.find_by_collection(parent_id) {
                tree.add_child(parent_node, id, name);
            }
        }
        Ok(id)
    }

    /// Convenience for building hierarchies by name.
    pub fn add_collection_under(&mut self, parent_name: &str, name: &str) -> Result<Uuid, LibraryError> {
        let parent_id = self
            .collection_by_name(parent_name)
            .map(|c| c.id)
            .ok_or_else(|| {
                LibraryError::Scene(format!("Parent collection '{}' not found", parent_name))
            })?;
        self.add_collection(parent_id, name)
    }

    /// All collections below the scene collection, depth-first in child order.
    pub fn user_collections(&self) -> Vec<&Collection> {
        let mut out = Vec::new();
        if let Some(root) = self.root_collection() {
            for child_id in &root.child_ids {
                self.collect_depth_first(*child_id, &mut out);
            }
        }
        out
    }

    fn collect_depth_first<'a>(&'a self, id: Uuid, out: &mut Vec<&'a Collection>) {
        let Some(collection) = self.collections.get(&id) else {
            return;
        };
        if out.iter().any(|c| c.id == id) {
            return;
        }
        out.push(collection);
        for child_id in &collection.child_ids {
            self.collect_depth_first(*child_id, out);
        }
    }

    /// Build a fresh layer tree mirroring the collection hierarchy, all nodes included.
    pub fn build_layer_tree(&self) -> LayerTree {
        let root_name = self
            .root_collection()
            .map(|c| c.name.as_str())
            .unwrap_or(SCENE_COLLECTION_NAME);
        let mut tree = LayerTree::new(self.root_collection_id, root_name);
        let root = tree.root();
        self.mirror_children(self.root_collection_id, &mut tree, root, &mut Vec::new());
        tree
    }

    fn mirror_children(
        &self,
        collection_id: Uuid,
        tree: &mut LayerTree,
        node: LayerNodeId,
        ancestors: &mut Vec<Uuid>,
    ) {
        let Some(collection) = self.collections.get(&collection_id) else {
            return;
        };
        ancestors.push(collection_id);
        for child_id in &collection.child_ids {
            if ancestors.contains(child_id) {
                continue;
            }
            let Some(child) = self.collections.get(child_id) else {
                continue;
            };
            if let Some(child_node) = tree.add_child(node, child.id, &child.name) {
                self.mirror_children(child.id, tree, child_node, ancestors);
            }
        }
        ancestors.pop();
    }

    pub fn view_layer(&self, name: &str) -> Option<&ViewLayer> {
        self.view_layers.iter().find(|vl| vl.name == name)
    }

    pub fn view_layer_mut(&mut self, name: &str) -> Option<&mut ViewLayer> {
        self.view_layers.iter_mut().find(|vl| vl.name == name)
    }

    /// Fetch the view layer named `name`, creating it if needed.
    pub fn ensure_view_layer(&mut self, name: &str) -> &mut ViewLayer {
        match self.view_layers.iter().position(|vl| vl.name == name) {
            Some(index) => &mut self.view_layers[index],
            None => {
                debug!("Creating view layer '{}'", name);
                let tree = self.build_layer_tree();
                self.view_layers.push(ViewLayer::new(name, tree));
                let last = self.view_layers.len() - 1;
                &mut self.view_layers[last]
            }
        }
    }

    pub fn remove_view_layer(&mut self, name: &str) -> Result<ViewLayer, LibraryError> {
        let index = self
            .view_layers
            .iter()
            .position(|vl| vl.name == name)
            .ok_or_else(|| LibraryError::Scene(format!("View layer '{}' does not exist", name)))?;
        if self.view_layers.len() == 1 {
            return Err(LibraryError::Scene(
                "A scene needs at least one view layer".to_string(),
            ));
        }
        Ok(self.view_layers.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_collections_are_mirrored_into_existing_view_layers() {
        let mut scene = Scene::new("Shot");
        let chars = scene.add_collection(scene.root_collection_id, "chars").unwrap();
        scene.add_collection(chars, "hero").unwrap();

        let tree = &scene.view_layer("ViewLayer").unwrap().layer_collection;
        let chars_node = tree.child_by_name(tree.root(), "chars").unwrap();
        assert!(tree.child_by_name(chars_node, "hero").is_some());
    }

    #[test]
    fn duplicate_collection_names_are_rejected() {
        let mut scene = Scene::new("Shot");
        scene.add_collection(scene.root_collection_id, "chars").unwrap();
        assert!(scene.add_collection(scene.root_collection_id, "chars").is_err());
    }

    #[test]
    fn ensure_view_layer_is_create_or_fetch() {
        let mut scene = Scene::new("Shot");
        scene.add_collection(scene.root_collection_id, "chars").unwrap();
        scene.ensure_view_layer("chars").set_pass(crate::model::passes::PassFlag::Mist, true);
        scene.ensure_view_layer("chars");
        assert_eq!(scene.view_layers.len(), 2);
        assert!(scene.view_layer("chars").unwrap().pass_enabled(crate::model::passes::PassFlag::Mist));
    }

    #[test]
    fn user_collections_skip_scene_collection() {
        let mut scene = Scene::new("Shot");
        scene.add_collection_under(SCENE_COLLECTION_NAME, "a").unwrap();
        scene.add_collection_under("a", "a.child").unwrap();
        scene.add_collection_under(SCENE_COLLECTION_NAME, "b").unwrap();
        let names: Vec<_> = scene.user_collections().iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["a", "a.child", "b"]);
    }

    #[test]
    fn last_view_layer_cannot_be_removed() {
        let mut scene = Scene::new("Shot");
        assert!(scene.remove_view_layer("ViewLayer").is_err());
        assert!(scene.remove_view_layer("missing").is_err());
    }

    fn scene_json_with_tree(tree: serde_json::Value) -> String {
        let scene = Scene::new("Shot");
        let mut value = serde_json::to_value(&scene).unwrap();
        value["view_layers"][0]["layer_collection"] = tree;
        value.to_string()
    }

    #[test]
    fn load_round_trips_a_valid_scene() {
        let mut scene = Scene::new("Shot");
        scene.add_collection_under(SCENE_COLLECTION_NAME, "chars").unwrap();
        scene.add_collection_under("chars", "crowd.hdt").unwrap();
        let loaded = Scene::load(&scene.save().unwrap()).unwrap();
        assert_eq!(loaded, scene);
    }

    #[test]
    fn load_rejects_broken_layer_trees() {
        let root_id = Uuid::new_v4();
        let node = |children: serde_json::Value| {
            serde_json::json!({"collection_id": root_id, "name": "Scene Collection", "children": children})
        };
        let broken = [
            serde_json::json!({"nodes": [], "root": 0}),
            serde_json::json!({"nodes": [node(serde_json::json!([7]))], "root": 0}),
            serde_json::json!({"nodes": [node(serde_json::json!([0]))], "root": 0}),
        ];
        for tree in broken {
            let err = Scene::load(&scene_json_with_tree(tree)).unwrap_err();
            assert!(matches!(err, LibraryError::Scene(_)));
        }
    }

    #[test]
    fn load_rejects_collection_with_two_parents() {
        let mut scene = Scene::new("Shot");
        scene.add_collection_under(SCENE_COLLECTION_NAME, "a").unwrap();
        let hdt = scene.add_collection_under("a", "crowd.hdt").unwrap();
        scene.add_collection_under(SCENE_COLLECTION_NAME, "b").unwrap();
        let b = scene.collection_by_name("b").unwrap().id;
        scene.collections.get_mut(&b).unwrap().add_child(hdt);
        assert!(matches!(Scene::load(&scene.save().unwrap()), Err(LibraryError::Scene(_))));

        let mut scene = Scene::new("Shot");
        let a = scene.add_collection_under(SCENE_COLLECTION_NAME, "a").unwrap();
        scene.collections.get_mut(&a).unwrap().add_child(scene.root_collection_id);
        assert!(matches!(Scene::load(&scene.save().unwrap()), Err(LibraryError::Scene(_))));
    }

    #[test]
    fn unknown_render_engine_falls_back_to_basic_profile() {
        use crate::model::passes::PassProfile;

        let mut value = serde_json::to_value(Scene::new("Shot")).unwrap();
        value["render_engine"] = serde_json::json!("OCTANE");
        let scene = Scene::load(&value.to_string()).unwrap();
        assert_eq!(scene.render_engine, RenderEngine::Other);
        assert_eq!(scene.render_engine.profile(), PassProfile::Basic);
    }
}
