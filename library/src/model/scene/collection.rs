use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named container in the scene's global collection hierarchy.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Collection {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub child_ids: Vec<Uuid>,
}

impl Collection {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            child_ids: Vec::new(),
        }
    }

    /// Add a child collection ID
    pub fn add_child(&mut self, child_id: Uuid) {
        if !self.child_ids.contains(&child_id) {
            self.child_ids.push(child_id);
        }
    }
}

