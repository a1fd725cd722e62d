use crate::editor::handlers::aov_handler::AovHandler;
use crate::editor::handlers::collection_handler::CollectionHandler;
use crate::editor::handlers::generation_handler::GenerationHandler;
use crate::editor::handlers::preset_handler::PresetHandler;
use crate::editor::handlers::{read_scene, write_scene};
use crate::editor::report::Report;
use crate::editor::session::GeneratorSession;
use crate::error::LibraryError;
use crate::io::config_file::{self, ImportSummary};
use crate::model::passes::{PassProfile, RenderEngine};
use crate::model::scene::{AovType, Scene};
use crate::preferences::Preferences;
use log::warn;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Entry point for the panels: owns the scene handle, the session state and the
/// preferences, and routes each user command to its handler.
pub struct GeneratorService {
    scene: Arc<RwLock<Scene>>,
    session: GeneratorSession,
    preferences: Preferences,
}

impl GeneratorService {
    pub fn new(scene: Arc<RwLock<Scene>>, preferences: Preferences) -> Self {
        let mut session = GeneratorSession::new();
        session.view_layer_prefix = preferences.view_layer_prefix.clone();
        let mut service = Self {
            scene,
            session,
            preferences,
        };
        if let Err(e) = service.sync_engine() {
            warn!("Initial pass list sync failed: {}", e);
        }
        service
    }

    pub fn get_scene(&self) -> Arc<RwLock<Scene>> {
        Arc::clone(&self.scene)
    }

    pub fn session(&self) -> &GeneratorSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GeneratorSession {
        &mut self.session
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.preferences
    }

    pub fn set_scene(&mut self, new_scene: Scene) -> Result<(), LibraryError> {
        *write_scene(&self.scene)? = new_scene;
        self.sync_engine()?;
        CollectionHandler::refresh(&self.scene, &mut self.session)?;
        Ok(())
    }

    pub fn load_scene(&mut self, json_str: &str) -> Result<(), LibraryError> {
        let scene = Scene::load(json_str)?;
        self.set_scene(scene)
    }

    pub fn save_scene(&self) -> Result<String, LibraryError> {
        read_scene(&self.scene)?.save()
    }

    pub fn render_engine(&self) -> Result<RenderEngine, LibraryError> {
        Ok(read_scene(&self.scene)?.render_engine)
    }

    pub fn set_render_engine(&mut self, engine: RenderEngine) -> Result<bool, LibraryError> {
        write_scene(&self.scene)?.render_engine = engine;
        self.sync_engine()
    }

    /// Rebuild the pass list if the scene's engine changed since the last call.
    pub fn sync_engine(&mut self) -> Result<bool, LibraryError> {
        let engine = self.render_engine()?;
        Ok(self.session.sync_engine(engine))
    }

    pub fn current_profile(&self) -> PassProfile {
        self.session
            .profile()
            .unwrap_or_else(|| RenderEngine::default().profile())
    }

    // --- Collections ---

    pub fn refresh_collections(&mut self) -> Result<Report, LibraryError> {
        CollectionHandler::refresh(&self.scene, &mut self.session)
    }

    pub fn toggle_collection(&mut self, name: &str) -> bool {
        CollectionHandler::toggle(&mut self.session, name)
    }

    pub fn select_all_collections(&mut self) -> usize {
        CollectionHandler::select_all(&mut self.session)
    }

    pub fn deselect_all_collections(&mut self) -> usize {
        CollectionHandler::deselect_all(&mut self.session)
    }

    // --- Generation ---

    pub fn generate_view_layers(&mut self) -> Result<Report, LibraryError> {
        self.sync_engine()?;
        GenerationHandler::generate_view_layers(&self.scene, &self.session)
    }

    pub fn apply_passes(&mut self) -> Result<Report, LibraryError> {
        self.sync_engine()?;
        GenerationHandler::apply_passes(&self.scene, &self.session)
    }

    pub fn apply_aovs(&self) -> Result<Report, LibraryError> {
        GenerationHandler::apply_aovs(&self.scene, &self.session)
    }

    pub fn generate_all(&mut self) -> Result<Report, LibraryError> {
        self.sync_engine()?;
        GenerationHandler::generate_all(&self.scene, &self.session)
    }

    // --- AOVs ---

    pub fn detect_aovs(&mut self) -> Result<Report, LibraryError> {
        AovHandler::detect_aovs(&self.scene, &mut self.session)
    }

    pub fn add_custom_aov(&mut self, name: &str, aov_type: AovType) -> Result<(), LibraryError> {
        AovHandler::add_custom_aov(&mut self.session, name, aov_type)
    }

    pub fn remove_aov(&mut self, name: &str) -> bool {
        AovHandler::remove_aov(&mut self.session, name)
    }

    // --- Presets ---

    pub fn save_preset(&mut self, profile: PassProfile, name: &str) -> Result<Report, LibraryError> {
        PresetHandler::save_preset(&mut self.preferences, &self.session, profile, name)
    }

    pub fn load_preset(&mut self, profile: PassProfile, name: &str) -> Result<Report, LibraryError> {
        PresetHandler::load_preset(&self.preferences, &mut self.session, profile, name)
    }

    pub fn reset_preset(&mut self, profile: PassProfile) -> Report {
        PresetHandler::reset_preset(&mut self.preferences, &mut self.session, profile)
    }

    pub fn delete_preset(&mut self, profile: PassProfile, name: &str) -> Result<Report, LibraryError> {
        PresetHandler::delete_preset(&mut self.preferences, profile, name)
    }

    pub fn apply_default_preset(&mut self) -> Result<Report, LibraryError> {
        self.sync_engine()?;
        PresetHandler::apply_default_preset(&self.preferences, &mut self.session)
    }

    // --- Config file ---

    pub fn export_config(&self, path: &Path) -> Result<Report, LibraryError> {
        let scene = read_scene(&self.scene)?;
        config_file::export_to_file(&scene, path)?;
        Ok(Report::info(format!(
            "{} view layers exported to {}",
            scene.view_layers.len(),
            path.display()
        )))
    }

    pub fn import_config(&self, path: &Path) -> Result<ImportSummary, LibraryError> {
        let mut scene = write_scene(&self.scene)?;
        config_file::import_from_file(&mut scene, path)
    }
}
