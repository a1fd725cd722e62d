use directories::ProjectDirs;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use viewlayer_library::preferences::Preferences;

const PREFERENCES_FILE: &str = "preferences.toml";
const APP_STATE_FILE: &str = "app_state.toml";

/// Window-level state that is not part of the generator preferences.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct AppState {
    #[serde(default)]
    pub last_scene: Option<PathBuf>,
    #[serde(default)]
    pub last_config_dir: Option<PathBuf>,
}

fn get_config_dir() -> Option<PathBuf> {
    let proj_dirs = ProjectDirs::from("me", "liesegang", "viewlayer_generator")?;
    let config_dir = proj_dirs.config_dir();
    if !config_dir.exists() {
        if let Err(e) = fs::create_dir_all(config_dir) {
            error!("Failed to create config directory: {}", e);
            return None;
        }
    }
    Some(config_dir.to_path_buf())
}

pub fn load_preferences() -> Preferences {
    match get_config_dir() {
        Some(dir) => Preferences::load_or_default(&dir.join(PREFERENCES_FILE)),
        None => Preferences::default(),
    }
}

pub fn save_preferences(prefs: &Preferences) {
    if let Some(dir) = get_config_dir() {
        if let Err(e) = prefs.save_to(&dir.join(PREFERENCES_FILE)) {
            error!("Failed to save preferences: {}", e);
        }
    }
}

pub fn load_app_state() -> AppState {
    let Some(path) = get_config_dir().map(|dir| dir.join(APP_STATE_FILE)) else {
        return AppState::default();
    };
    if !path.exists() {
        return AppState::default();
    }
    match fs::read_to_string(&path) {
        Ok(toml_str) => match toml::from_str(&toml_str) {
            Ok(state) => state,
            Err(e) => {
                warn!("Failed to parse app state, using defaults: {}", e);
                AppState::default()
            }
        },
        Err(e) => {
            warn!("Failed to read app state, using defaults: {}", e);
            AppState::default()
        }
    }
}

pub fn save_app_state(state: &AppState) {
    let Some(path) = get_config_dir().map(|dir| dir.join(APP_STATE_FILE)) else {
        return;
    };
    match toml::to_string_pretty(state) {
        Ok(toml_str) => {
            if let Err(e) = fs::write(&path, toml_str) {
                error!("Failed to write app state: {}", e);
            } else {
                info!("App state saved to {}", path.display());
            }
        }
        Err(e) => error!("Failed to serialize app state: {}", e),
    }
}
