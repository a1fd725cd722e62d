pub mod aov_handler;
pub mod collection_handler;
pub mod generation_handler;
pub mod preset_handler;

use crate::error::LibraryError;
use crate::model::scene::Scene;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Acquire a write lock on the scene, converting poison errors to LibraryError.
pub fn write_scene(
    scene: &Arc<RwLock<Scene>>,
) -> Result<RwLockWriteGuard<'_, Scene>, LibraryError> {
    scene
        .write()
        .map_err(|_| LibraryError::Runtime("Lock Poisoned".to_string()))
}

/// Acquire a read lock on the scene, converting poison errors to LibraryError.
pub fn read_scene(
    scene: &Arc<RwLock<Scene>>,
) -> Result<RwLockReadGuard<'_, Scene>, LibraryError> {
    scene
        .read()
        .map_err(|_| LibraryError::Runtime("Lock Poisoned".to_string()))
}
