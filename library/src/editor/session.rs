//! Panel state that lives for the whole editing session.

use log::debug;

use crate::model::passes::{PassCategory, PassFlag, PassProfile, RenderEngine};
use crate::model::scene::AovType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionItem {
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassItem {
    pub flag: PassFlag,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AovSource {
    Detected,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AovItem {
    pub name: String,
    pub aov_type: AovType,
    pub selected: bool,
    pub source: AovSource,
}

/// Text filter over collection names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionFilter {
    pub text: String,
    pub case_sensitive: bool,
}

impl CollectionFilter {
    pub fn matches(&self, name: &str) -> bool {
        if self.text.is_empty() {
            return true;
        }
        if self.case_sensitive {
            name.contains(&self.text)
        } else {
            name.to_lowercase().contains(&self.text.to_lowercase())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryFilter {
    pub show_data: bool,
    pub show_light: bool,
    pub show_crypto: bool,
    pub show_other: bool,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            show_data: true,
            show_light: true,
            show_crypto: true,
            show_other: true,
        }
    }
}

impl CategoryFilter {
    pub fn shows(&self, category: PassCategory) -> bool {
        match category {
            PassCategory::Data => self.show_data,
            PassCategory::Light => self.show_light,
            PassCategory::Cryptomatte => self.show_crypto,
            PassCategory::Other => self.show_other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSession {
    pub collections: Vec<CollectionItem>,
    pub filter: CollectionFilter,
    pub passes: Vec<PassItem>,
    pub categories: CategoryFilter,
    pub aovs: Vec<AovItem>,
    pub view_layer_prefix: String,
    last_engine: Option<RenderEngine>,
}

impl Default for GeneratorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorSession {
    pub fn new() -> Self {
        Self {
            collections: Vec::new(),
            filter: CollectionFilter::default(),
            passes: Vec::new(),
            categories: CategoryFilter::default(),
            aovs: Vec::new(),
            view_layer_prefix: String::new(),
            last_engine: None,
        }
    }

    pub fn last_engine(&self) -> Option<RenderEngine> {
        self.last_engine
    }

    /// Rebuild the pass list when the render engine differs from the last one seen.
    /// Selections survive for flags the new profile also has. Returns true on change.
    pub fn sync_engine(&mut self, engine: RenderEngine) -> bool {
        if self.last_engine == Some(engine) {
            return false;
        }
        debug!(
            "Render engine changed from {:?} to {:?}; rebuilding pass list",
            self.last_engine, engine
        );
        let previous: Vec<PassFlag> = self.selected_passes();
        self.passes = engine
            .profile()
            .passes()
            .iter()
            .map(|flag| PassItem {
                flag: *flag,
                selected: previous.contains(flag),
            })
            .collect();
        self.last_engine = Some(engine);
        true
    }

    pub fn profile(&self) -> Option<PassProfile> {
        self.last_engine.map(|engine| engine.profile())
    }

    pub fn view_layer_name(&self, collection_name: &str) -> String {
        format!("{}{}", self.view_layer_prefix, collection_name)
    }

    pub fn selected_collections(&self) -> Vec<String> {
        self.collections
            .iter()
            .filter(|item| item.selected)
            .map(|item| item.name.clone())
            .collect()
    }

    pub fn visible_collections(&self) -> impl Iterator<Item = &CollectionItem> + '_ {
        self.collections
            .iter()
            .filter(|item| self.filter.matches(&item.name))
    }

    pub fn selected_passes(&self) -> Vec<PassFlag> {
        self.passes
            .iter()
            .filter(|item| item.selected)
            .map(|item| item.flag)
            .collect()
    }

    pub fn visible_passes(&self) -> impl Iterator<Item = &PassItem> + '_ {
        self.passes
            .iter()
            .filter(|item| self.categories.shows(item.flag.category()))
    }

    pub fn set_pass_selected(&mut self, flag: PassFlag, selected: bool) -> bool {
        match self.passes.iter_mut().find(|item| item.flag == flag) {
            Some(item) => {
                item.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Select exactly the flags in `flags`. Returns how many ended up selected.
    pub fn select_only_passes(&mut self, flags: &[PassFlag]) -> usize {
        let mut count = 0;
        for item in &mut self.passes {
            item.selected = flags.contains(&item.flag);
            if item.selected {
                count += 1;
            }
        }
        count
    }

    pub fn selected_aovs(&self) -> Vec<(String, AovType)> {
        self.aovs
            .iter()
            .filter(|item| item.selected)
            .map(|item| (item.name.clone(), item.aov_type))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_change_keeps_shared_selection() {
        let mut session = GeneratorSession::new();
        assert!(session.sync_engine(RenderEngine::Cycles));
        session.set_pass_selected(PassFlag::Z, true);
        session.set_pass_selected(PassFlag::DiffuseIndirect, true);

        assert!(!session.sync_engine(RenderEngine::Cycles));
        assert!(session.sync_engine(RenderEngine::Eevee));
        assert_eq!(session.selected_passes(), vec![PassFlag::Z]);
        assert_eq!(session.profile(), Some(PassProfile::Eevee));
    }

    #[test]
    fn filter_case_sensitivity() {
        let mut filter = CollectionFilter {
            text: "Char".to_string(),
            case_sensitive: false,
        };
        assert!(filter.matches("chars"));
        filter.case_sensitive = true;
        assert!(!filter.matches("chars"));
        assert!(filter.matches("Chars"));
    }

    #[test]
    fn category_filter_limits_visible_passes() {
        let mut session = GeneratorSession::new();
        session.sync_engine(RenderEngine::Cycles);
        session.categories.show_light = false;
        assert!(session
            .visible_passes()
            .all(|item| item.flag.category() != PassCategory::Light));
    }
}
