//! JSON sidecar with the per view layer setup (passes, AOVs, collection states).
//!
//! Import parses and validates the whole document before touching the scene. Each view
//! layer entry is then turned into a typed plan; an entry that fails is reported as a
//! warning and the remaining entries are still applied.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::LibraryError;
use crate::model::passes::{PassFlag, PassProfile};
use crate::model::scene::{AovType, LayerNodeId, LayerTree, Scene, ViewLayer};

pub const CONFIG_VERSION: &str = "1.0";

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct ConfigDocument {
    pub version: String,
    pub viewlayers: Vec<ViewLayerConfig>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct ViewLayerConfig {
    pub name: String,
    #[serde(default)]
    pub passes: BTreeMap<String, bool>,
    #[serde(default)]
    pub aovs: Vec<AovConfig>,
    #[serde(default)]
    pub collections: BTreeMap<String, CollectionConfig>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct AovConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub aov_type: String,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct CollectionConfig {
    #[serde(default)]
    pub exclude: bool,
    #[serde(default)]
    pub hide_viewport: bool,
    #[serde(default)]
    pub indirect_only: bool,
    #[serde(default)]
    pub holdout: bool,
    #[serde(default)]
    pub children: BTreeMap<String, CollectionConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub applied: Vec<String>,
    pub skipped: Vec<String>,
    pub warnings: Vec<String>,
}

struct LayerPlan {
    passes: Vec<(PassFlag, bool)>,
    aovs: Vec<(String, AovType)>,
}

impl ConfigDocument {
    pub fn from_scene(scene: &Scene) -> Self {
        let profile = scene.render_engine.profile();
        let viewlayers = scene
            .view_layers
            .iter()
            .map(|vl| export_view_layer(vl, profile))
            .collect();
        Self {
            version: CONFIG_VERSION.to_string(),
            viewlayers,
        }
    }

    pub fn parse(json_str: &str) -> Result<Self, LibraryError> {
        let doc: ConfigDocument = serde_json::from_str(json_str)
            .map_err(|e| LibraryError::Config(format!("Malformed config file: {}", e)))?;
        let major = doc.version.split('.').next().unwrap_or_default();
        let expected = CONFIG_VERSION.split('.').next().unwrap_or_default();
        if major != expected {
            return Err(LibraryError::Config(format!(
                "Unsupported config version '{}' (expected {})",
                doc.version, CONFIG_VERSION
            )));
        }
        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String, LibraryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Apply every entry onto the matching view layer of `scene`.
    pub fn apply(&self, scene: &mut Scene) -> ImportSummary {
        let profile = scene.render_engine.profile();
        let mut summary = ImportSummary::default();

        for entry in &self.viewlayers {
            let Some(view_layer) = scene.view_layer_mut(&entry.name) else {
                debug!("View layer '{}' not in scene, skipping", entry.name);
                summary.skipped.push(entry.name.clone());
                continue;
            };

            let mut layer_warnings = Vec::new();
            match entry.plan(profile, &mut layer_warnings) {
                Ok(plan) => {
                    summary.warnings.append(&mut layer_warnings);
                    for (flag, enabled) in plan.passes {
                        view_layer.set_pass(flag, enabled);
                    }
                    for (name, aov_type) in plan.aovs {
                        view_layer.add_or_update_aov(&name, aov_type);
                    }
                    let tree = &mut view_layer.layer_collection;
                    let root = tree.root();
                    apply_collections(tree, root, &entry.collections);
                    summary.applied.push(entry.name.clone());
                }
                Err(e) => {
                    let message = format!("View layer '{}' not imported: {}", entry.name, e);
                    warn!("{}", message);
                    summary.warnings.push(message);
                }
            }
        }
        summary
    }
}

impl ViewLayerConfig {
    fn plan(&self, profile: PassProfile, warnings: &mut Vec<String>) -> Result<LayerPlan, LibraryError> {
        let mut passes = Vec::new();
        for (name, enabled) in &self.passes {
            let flag: PassFlag = name.parse()?;
            if !profile.supports(flag) {
                warnings.push(format!(
                    "View layer '{}': pass '{}' is not available in {}, ignored",
                    self.name,
                    name,
                    profile.label()
                ));
                continue;
            }
            passes.push((flag, *enabled));
        }

        let mut aovs = Vec::new();
        for aov in &self.aovs {
            if aov.name.is_empty() {
                return Err(LibraryError::InvalidArgument("AOV without a name".to_string()));
            }
            aovs.push((aov.name.clone(), aov.aov_type.parse()?));
        }
        Ok(LayerPlan { passes, aovs })
    }
}

fn export_view_layer(view_layer: &ViewLayer, profile: PassProfile) -> ViewLayerConfig {
    let passes = profile
        .passes()
        .iter()
        .map(|flag| (flag.as_str().to_string(), view_layer.pass_enabled(*flag)))
        .collect();
    let aovs = view_layer
        .aovs
        .iter()
        .map(|aov| AovConfig {
            name: aov.name.clone(),
            aov_type: aov.aov_type.to_string(),
        })
        .collect();
    let tree = &view_layer.layer_collection;
    ViewLayerConfig {
        name: view_layer.name.clone(),
        passes,
        aovs,
        collections: export_children(tree, tree.root()),
    }
}

fn export_children(tree: &LayerTree, node: LayerNodeId) -> BTreeMap<String, CollectionConfig> {
    tree.children(node)
        .iter()
        .filter_map(|child| {
            let layer_node = tree.get(*child)?;
            Some((
                layer_node.name.clone(),
                CollectionConfig {
                    exclude: layer_node.exclude,
                    hide_viewport: layer_node.hide_viewport,
                    indirect_only: layer_node.indirect_only,
                    holdout: layer_node.holdout,
                    children: export_children(tree, *child),
                },
            ))
        })
        .collect()
}

fn apply_collections(
    tree: &mut LayerTree,
    parent: LayerNodeId,
    states: &BTreeMap<String, CollectionConfig>,
) {
    for (name, state) in states {
        let Some(child) = tree.child_by_name(parent, name) else {
            debug!("Collection '{}' not found under view layer tree, skipping", name);
            continue;
        };
        if let Some(layer_node) = tree.get_mut(child) {
            layer_node.exclude = state.exclude;
            layer_node.hide_viewport = state.hide_viewport;
            layer_node.indirect_only = state.indirect_only;
            layer_node.holdout = state.holdout;
        }
        apply_collections(tree, child, &state.children);
    }
}

pub fn export_to_file(scene: &Scene, path: &Path) -> Result<(), LibraryError> {
    let doc = ConfigDocument::from_scene(scene);
    fs::write(path, doc.to_json()?)?;
    info!(
        "Exported {} view layers to {}",
        doc.viewlayers.len(),
        path.display()
    );
    Ok(())
}

/// Read, validate, then apply. Nothing is mutated unless the whole file parses.
pub fn import_from_file(scene: &mut Scene, path: &Path) -> Result<ImportSummary, LibraryError> {
    let json_str = fs::read_to_string(path)?;
    let doc = ConfigDocument::parse(&json_str)?;
    let summary = doc.apply(scene);
    info!(
        "Imported {} view layers from {} ({} skipped, {} warnings)",
        summary.applied.len(),
        path.display(),
        summary.skipped.len(),
        summary.warnings.len()
    );
    Ok(summary)
}
