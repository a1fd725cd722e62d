use crate::editor::handlers::read_scene;
use crate::editor::report::Report;
use crate::editor::session::{AovItem, AovSource, GeneratorSession};
use crate::error::LibraryError;
use crate::model::scene::{AovType, Scene, ShaderNodeKind, ShaderNodeTree};
use log::{debug, info};
use std::sync::{Arc, RwLock};

pub struct AovHandler;

impl AovHandler {
    /// AOV Output nodes across all materials, first occurrence of each name.
    pub fn scan_materials(scene: &Scene) -> Vec<(String, AovType)> {
        let mut found = Vec::new();
        for material in &scene.materials {
            if let Some(tree) = &material.node_tree {
                debug!("Scanning material '{}' for AOV outputs", material.name);
                collect_aov_outputs(tree, &mut found);
            }
        }
        found
    }

    /// Replace the detected AOV candidates with what the materials currently declare.
    /// Custom entries are kept, and selection survives for names that reappear.
    pub fn detect_aovs(
        scene: &Arc<RwLock<Scene>>,
        session: &mut GeneratorSession,
    ) -> Result<Report, LibraryError> {
        let found = {
            let scene = read_scene(scene)?;
            Self::scan_materials(&scene)
        };

        let previously_selected: Vec<String> = session
            .aovs
            .iter()
            .filter(|item| item.selected)
            .map(|item| item.name.clone())
            .collect();
        session
            .aovs
            .retain(|item| item.source == AovSource::Custom);

        let mut added = 0;
        for (name, aov_type) in found {
            if session.aovs.iter().any(|item| item.name == name) {
                continue;
            }
            session.aovs.push(AovItem {
                selected: previously_selected.contains(&name),
                name,
                aov_type,
                source: AovSource::Detected,
            });
            added += 1;
        }

        if added == 0 {
            Ok(Report::warning("No AOV outputs found in materials"))
        } else {
            info!("Detected {} AOVs in materials", added);
            Ok(Report::info(format!("{} AOVs detected", added)))
        }
    }

    /// Add a user-defined AOV, or retype it if the name is already listed.
    pub fn add_custom_aov(
        session: &mut GeneratorSession,
        name: &str,
        aov_type: AovType,
    ) -> Result<(), LibraryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::InvalidArgument(
                "AOV name must not be empty".to_string(),
            ));
        }
        if let Some(existing) = session.aovs.iter_mut().find(|item| item.name == name) {
            existing.aov_type = aov_type;
            return Ok(());
        }
        session.aovs.push(AovItem {
            name: name.to_string(),
            aov_type,
            selected: true,
            source: AovSource::Custom,
        });
        Ok(())
    }

    pub fn remove_aov(session: &mut GeneratorSession, name: &str) -> bool {
        let before = session.aovs.len();
        session.aovs.retain(|item| item.name != name);
        session.aovs.len() != before
    }
}

fn collect_aov_outputs(tree: &ShaderNodeTree, found: &mut Vec<(String, AovType)>) {
    for node in &tree.nodes {
        match &node.kind {
            ShaderNodeKind::AovOutput { aov_name } => {
                if aov_name.is_empty() || found.iter().any(|(name, _)| name == aov_name) {
                    continue;
                }
                found.push((aov_name.clone(), node.inferred_aov_type()));
            }
            ShaderNodeKind::Group { tree } => collect_aov_outputs(tree, found),
            ShaderNodeKind::Other { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::scene::{Material, ShaderNode, SocketType};

    #[test]
    fn scan_descends_into_groups_and_dedups() {
        let mut scene = Scene::new("Shot");
        let group = ShaderNode {
            name: "Group".to_string(),
            kind: ShaderNodeKind::Group {
                tree: ShaderNodeTree {
                    nodes: vec![ShaderNode::aov_output("rim", Some(SocketType::Float))],
                },
            },
            inputs: Vec::new(),
        };
        scene.materials.push(Material::new(
            "skin",
            Some(ShaderNodeTree {
                nodes: vec![ShaderNode::aov_output("mask", Some(SocketType::Color)), group],
            }),
        ));
        scene.materials.push(Material::new(
            "cloth",
            Some(ShaderNodeTree {
                nodes: vec![
                    ShaderNode::aov_output("mask", Some(SocketType::Float)),
                    ShaderNode::aov_output("", None),
                ],
            }),
        ));
        scene.materials.push(Material::new("empty", None));

        let found = AovHandler::scan_materials(&scene);
        assert_eq!(
            found,
            vec![
                ("mask".to_string(), AovType::Color),
                ("rim".to_string(), AovType::Value),
            ]
        );
    }

    #[test]
    fn custom_aov_requires_name() {
        let mut session = GeneratorSession::new();
        assert!(AovHandler::add_custom_aov(&mut session, "  ", AovType::Value).is_err());
        AovHandler::add_custom_aov(&mut session, "depth_fx", AovType::Value).unwrap();
        assert_eq!(session.selected_aovs(), vec![("depth_fx".to_string(), AovType::Value)]);
    }
}
