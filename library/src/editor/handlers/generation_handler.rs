use crate::editor::handlers::write_scene;
use crate::editor::report::Report;
use crate::editor::session::GeneratorSession;
use crate::error::LibraryError;
use crate::model::naming;
use crate::model::passes::{PassFlag, PassProfile};
use crate::model::scene::{Scene, ViewLayer};
use crate::visibility::{NamingIndex, resolve_view_layer};
use log::{info, warn};
use std::sync::{Arc, RwLock};

pub struct GenerationHandler;

impl GenerationHandler {
    /// Create or fetch one view layer per selected collection, resolve its visibility
    /// tree and apply the selected passes.
    pub fn generate_view_layers(
        scene: &Arc<RwLock<Scene>>,
        session: &GeneratorSession,
    ) -> Result<Report, LibraryError> {
        let targets = Self::require_collections(session)?;
        let selected_passes = session.selected_passes();

        let mut scene = write_scene(scene)?;
        let index = NamingIndex::from_scene(&scene);
        let profile = scene.render_engine.profile();

        let mut generated = 0;
        for target in &targets {
            if scene.collection_by_name(target).is_none() {
                warn!("Collection '{}' not found, skipping", target);
                continue;
            }
            let view_layer = scene.ensure_view_layer(&session.view_layer_name(target));
            resolve_view_layer(&mut view_layer.layer_collection, target, &index);
            Self::apply_layer_passes(view_layer, target, profile, &selected_passes);
            generated += 1;
        }

        info!("Generated {} view layers", generated);
        Ok(Report::info(format!("{} view layers generated", generated)))
    }

    /// Apply the selected passes to the view layers of the selected collections.
    pub fn apply_passes(
        scene: &Arc<RwLock<Scene>>,
        session: &GeneratorSession,
    ) -> Result<Report, LibraryError> {
        let targets = Self::require_collections(session)?;
        let selected_passes = Self::require_passes(session)?;

        let mut scene = write_scene(scene)?;
        let profile = scene.render_engine.profile();

        let mut updated = 0;
        for target in &targets {
            let Some(view_layer) = scene.view_layer_mut(&session.view_layer_name(target)) else {
                warn!("View layer for '{}' not found, skipping", target);
                continue;
            };
            Self::apply_layer_passes(view_layer, target, profile, &selected_passes);
            updated += 1;
        }

        info!("Applied {} passes to {} view layers", selected_passes.len(), updated);
        Ok(Report::info(format!(
            "{} passes applied to {} view layers",
            selected_passes.len(),
            updated
        )))
    }

    /// Add or update the selected AOVs on the view layers of the selected collections.
    pub fn apply_aovs(
        scene: &Arc<RwLock<Scene>>,
        session: &GeneratorSession,
    ) -> Result<Report, LibraryError> {
        let targets = Self::require_collections(session)?;
        let aovs = session.selected_aovs();
        if aovs.is_empty() {
            return Err(LibraryError::NothingSelected("no AOV selected".to_string()));
        }

        let mut scene = write_scene(scene)?;
        let mut updated = 0;
        for target in &targets {
            let Some(view_layer) = scene.view_layer_mut(&session.view_layer_name(target)) else {
                warn!("View layer for '{}' not found, skipping", target);
                continue;
            };
            for (name, aov_type) in &aovs {
                view_layer.add_or_update_aov(name, *aov_type);
            }
            updated += 1;
        }

        info!("Applied {} AOVs to {} view layers", aovs.len(), updated);
        Ok(Report::info(format!(
            "{} AOVs applied to {} view layers",
            aovs.len(),
            updated
        )))
    }

    /// Generate, apply passes, then apply AOVs when any are selected.
    ///
    /// Collection and pass selection are checked before anything is touched.
    pub fn generate_all(
        scene: &Arc<RwLock<Scene>>,
        session: &GeneratorSession,
    ) -> Result<Report, LibraryError> {
        Self::require_collections(session)?;
        Self::require_passes(session)?;

        let generated = Self::generate_view_layers(scene, session)?;
        Self::apply_passes(scene, session)?;
        if session.selected_aovs().is_empty() {
            return Ok(generated);
        }
        let aovs = Self::apply_aovs(scene, session)?;
        Ok(Report::info(format!("{}; {}", generated.message, aovs.message)))
    }

    fn apply_layer_passes(
        view_layer: &mut ViewLayer,
        target: &str,
        profile: PassProfile,
        selected: &[PassFlag],
    ) {
        if naming::is_grease_pencil(target) {
            view_layer.apply_grease_pencil_passes();
        } else {
            view_layer.apply_passes(profile, selected);
        }
    }

    fn require_collections(session: &GeneratorSession) -> Result<Vec<String>, LibraryError> {
        let targets = session.selected_collections();
        if targets.is_empty() {
            return Err(LibraryError::NothingSelected(
                "no collection selected".to_string(),
            ));
        }
        Ok(targets)
    }

    fn require_passes(session: &GeneratorSession) -> Result<Vec<PassFlag>, LibraryError> {
        let passes = session.selected_passes();
        if passes.is_empty() {
            return Err(LibraryError::NothingSelected("no pass selected".to_string()));
        }
        Ok(passes)
    }
}
