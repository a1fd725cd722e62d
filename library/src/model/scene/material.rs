//! Materials and their shader node trees, as far as AOV discovery needs them.

use serde::{Deserialize, Serialize};

use super::view_layer::AovType;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum SocketType {
    Color,
    Float,
    Vector,
    Shader,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct ShaderInput {
    pub name: String,
    pub socket_type: SocketType,
    #[serde(default)]
    pub is_linked: bool,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(tag = "node_type")]
pub enum ShaderNodeKind {
    AovOutput { aov_name: String },
    Group { tree: ShaderNodeTree },
    Other { type_id: String },
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct ShaderNode {
    pub name: String,
    #[serde(flatten)]
    pub kind: ShaderNodeKind,
    #[serde(default)]
    pub inputs: Vec<ShaderInput>,
}

impl ShaderNode {
    /// An AOV Output node with the usual Color and Value inputs.
    pub fn aov_output(aov_name: &str, linked: Option<SocketType>) -> Self {
        Self {
            name: "AOV Output".to_string(),
            kind: ShaderNodeKind::AovOutput {
                aov_name: aov_name.to_string(),
            },
            inputs: vec![
                ShaderInput {
                    name: "Color".to_string(),
                    socket_type: SocketType::Color,
                    is_linked: linked == Some(SocketType::Color),
                },
                ShaderInput {
                    name: "Value".to_string(),
                    socket_type: SocketType::Float,
                    is_linked: linked == Some(SocketType::Float),
                },
            ],
        }
    }

    /// AOV type implied by the first linked input; COLOR when nothing is linked.
    pub fn inferred_aov_type(&self) -> AovType {
        self.inputs
            .iter()
            .filter(|input| input.is_linked)
            .find_map(|input| match input.socket_type {
                SocketType::Color => Some(AovType::Color),
                SocketType::Float => Some(AovType::Value),
                _ => None,
            })
            .unwrap_or(AovType::Color)
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct ShaderNodeTree {
    #[serde(default)]
    pub nodes: Vec<ShaderNode>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Material {
    pub name: String,
    #[serde(default)]
    pub node_tree: Option<ShaderNodeTree>,
}

impl Material {
    pub fn new(name: &str, node_tree: Option<ShaderNodeTree>) -> Self {
        Self {
            name: name.to_string(),
            node_tree,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aov_type_follows_linked_socket() {
        assert_eq!(
            ShaderNode::aov_output("a", Some(SocketType::Float)).inferred_aov_type(),
            AovType::Value
        );
        assert_eq!(
            ShaderNode::aov_output("a", Some(SocketType::Color)).inferred_aov_type(),
            AovType::Color
        );
        assert_eq!(ShaderNode::aov_output("a", None).inferred_aov_type(), AovType::Color);
    }
}
