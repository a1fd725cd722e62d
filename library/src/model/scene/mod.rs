pub mod collection;
pub mod layer_tree;
pub mod material;
pub mod scene;
pub mod view_layer;

pub use collection::Collection;
pub use layer_tree::{LayerNode, LayerNodeId, LayerTree};
pub use material::{Material, ShaderInput, ShaderNode, ShaderNodeKind, ShaderNodeTree, SocketType};
pub use scene::{SCENE_COLLECTION_NAME, Scene};
pub use view_layer::{Aov, AovType, ViewLayer};
