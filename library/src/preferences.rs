//! Stored pass presets and generator defaults.
//!
//! Preferences are persisted as TOML. Every preset is checked against its profile's
//! pass set when loaded or saved, so an unsupported flag is rejected up front instead
//! of being silently dropped when the preset is applied.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::LibraryError;
use crate::model::passes::{DEFAULT_PASSES, PassFlag, PassProfile};

pub const DEFAULT_PRESET_NAME: &str = "Default";
const DEFAULT_PRESET_DELAY_MS: u64 = 500;

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct PassPreset {
    pub name: String,
    pub profile: PassProfile,
    #[serde(default)]
    pub passes: BTreeSet<PassFlag>,
}

impl PassPreset {
    pub fn new(name: &str, profile: PassProfile, passes: impl IntoIterator<Item = PassFlag>) -> Self {
        Self {
            name: name.to_string(),
            profile,
            passes: passes.into_iter().collect(),
        }
    }

    pub fn default_for(profile: PassProfile) -> Self {
        Self::new(DEFAULT_PRESET_NAME, profile, DEFAULT_PASSES.iter().copied())
    }

    pub fn validate(&self) -> Result<(), LibraryError> {
        if self.name.trim().is_empty() {
            return Err(LibraryError::InvalidArgument(
                "Preset name must not be empty".to_string(),
            ));
        }
        let unsupported: Vec<&str> = self
            .passes
            .iter()
            .filter(|flag| !self.profile.supports(**flag))
            .map(|flag| flag.as_str())
            .collect();
        if !unsupported.is_empty() {
            return Err(LibraryError::Config(format!(
                "Preset '{}' uses passes not available in {}: {}",
                self.name,
                self.profile.label(),
                unsupported.join(", ")
            )));
        }
        Ok(())
    }
}

fn default_preset_delay_ms() -> u64 {
    DEFAULT_PRESET_DELAY_MS
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Preferences {
    #[serde(default)]
    pub view_layer_prefix: String,
    #[serde(default = "default_preset_delay_ms")]
    pub default_preset_delay_ms: u64,
    #[serde(default)]
    pub presets: Vec<PassPreset>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            view_layer_prefix: String::new(),
            default_preset_delay_ms: DEFAULT_PRESET_DELAY_MS,
            presets: PassProfile::ALL
                .iter()
                .map(|profile| PassPreset::default_for(*profile))
                .collect(),
        }
    }
}

impl Preferences {
    pub fn from_toml(toml_str: &str) -> Result<Self, LibraryError> {
        let mut prefs: Preferences = toml::from_str(toml_str)?;
        for preset in &prefs.presets {
            preset.validate()?;
        }
        prefs.ensure_defaults();
        Ok(prefs)
    }

    pub fn to_toml(&self) -> Result<String, LibraryError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load from `path`, falling back to defaults when the file is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(toml_str) => match Self::from_toml(&toml_str) {
                Ok(prefs) => prefs,
                Err(e) => {
                    warn!("Failed to parse preferences, using defaults: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read preferences, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), LibraryError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.to_toml()?)?;
        info!("Preferences saved to {}", path.display());
        Ok(())
    }

    fn ensure_defaults(&mut self) {
        for profile in PassProfile::ALL {
            if self.preset(*profile, DEFAULT_PRESET_NAME).is_none() {
                self.presets.push(PassPreset::default_for(*profile));
            }
        }
    }

    pub fn preset(&self, profile: PassProfile, name: &str) -> Option<&PassPreset> {
        self.presets
            .iter()
            .find(|p| p.profile == profile && p.name == name)
    }

    pub fn presets_for(&self, profile: PassProfile) -> impl Iterator<Item = &PassPreset> + '_ {
        self.presets.iter().filter(move |p| p.profile == profile)
    }

    /// Insert or replace the preset with the same profile and name.
    pub fn save_preset(&mut self, preset: PassPreset) -> Result<(), LibraryError> {
        preset.validate()?;
        match self
            .presets
            .iter_mut()
            .find(|p| p.profile == preset.profile && p.name == preset.name)
        {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
        Ok(())
    }

    pub fn delete_preset(&mut self, profile: PassProfile, name: &str) -> Result<PassPreset, LibraryError> {
        if name == DEFAULT_PRESET_NAME {
            return Err(LibraryError::InvalidArgument(
                "The Default preset cannot be deleted".to_string(),
            ));
        }
        let index = self
            .presets
            .iter()
            .position(|p| p.profile == profile && p.name == name)
            .ok_or_else(|| {
                LibraryError::InvalidArgument(format!(
                    "No {} preset named '{}'",
                    profile.label(),
                    name
                ))
            })?;
        Ok(self.presets.remove(index))
    }

    /// Put the Default preset of `profile` back to Combined and Depth.
    pub fn reset_profile(&mut self, profile: PassProfile) {
        match self
            .presets
            .iter_mut()
            .find(|p| p.profile == profile && p.name == DEFAULT_PRESET_NAME)
        {
            Some(existing) => *existing = PassPreset::default_for(profile),
            None => self.presets.push(PassPreset::default_for(profile)),
        }
    }
}
