use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::layer_tree::LayerTree;
use crate::error::LibraryError;
use crate::model::passes::{PassFlag, PassProfile};

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum AovType {
    #[default]
    Color,
    Value,
}

impl fmt::Display for AovType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AovType::Color => "COLOR",
            AovType::Value => "VALUE",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for AovType {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COLOR" => Ok(AovType::Color),
            "VALUE" => Ok(AovType::Value),
            other => Err(LibraryError::InvalidArgument(format!(
                "Unknown AOV type '{}'",
                other
            ))),
        }
    }
}

/// An arbitrary output variable declared on a view layer.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Aov {
    pub name: String,
    #[serde(rename = "type")]
    pub aov_type: AovType,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct ViewLayer {
    pub name: String,
    #[serde(default)]
    pub passes: BTreeMap<PassFlag, bool>,
    #[serde(default)]
    pub aovs: Vec<Aov>,
    pub layer_collection: LayerTree,
}

impl ViewLayer {
    pub fn new(name: &str, layer_collection: LayerTree) -> Self {
        let mut passes = BTreeMap::new();
        passes.insert(PassFlag::Combined, true);
        Self {
            name: name.to_string(),
            passes,
            aovs: Vec::new(),
            layer_collection,
        }
    }

    pub fn pass_enabled(&self, flag: PassFlag) -> bool {
        self.passes.get(&flag).copied().unwrap_or(false)
    }

    pub fn set_pass(&mut self, flag: PassFlag, enabled: bool) {
        self.passes.insert(flag, enabled);
    }

    /// Set every pass of `profile`: enabled when contained in `selected`, disabled otherwise.
    pub fn apply_passes(&mut self, profile: PassProfile, selected: &[PassFlag]) {
        for flag in profile.passes() {
            self.set_pass(*flag, selected.contains(flag));
        }
    }

    /// Grease Pencil layers render the combined pass only.
    pub fn apply_grease_pencil_passes(&mut self) {
        for flag in PassFlag::ALL {
            self.passes.insert(*flag, false);
        }
        self.set_pass(PassFlag::Combined, true);
    }

    pub fn enabled_passes(&self) -> impl Iterator<Item = PassFlag> + '_ {
        self.passes
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(flag, _)| *flag)
    }

    pub fn aov(&self, name: &str) -> Option<&Aov> {
        self.aovs.iter().find(|a| a.name == name)
    }

    /// Add an AOV, or retype the existing one with the same name.
    /// Returns true when a new AOV was created.
    pub fn add_or_update_aov(&mut self, name: &str, aov_type: AovType) -> bool {
        if let Some(existing) = self.aovs.iter_mut().find(|a| a.name == name) {
            existing.aov_type = aov_type;
            false
        } else {
            self.aovs.push(Aov {
                name: name.to_string(),
                aov_type,
            });
            true
        }
    }
}
