use crate::editor::handlers::read_scene;
use crate::editor::report::Report;
use crate::editor::session::{CollectionItem, GeneratorSession};
use crate::error::LibraryError;
use crate::model::scene::Scene;
use log::info;
use std::sync::{Arc, RwLock};

pub struct CollectionHandler;

impl CollectionHandler {
    /// Rebuild the collection list from the scene.
    /// Items that still exist keep their selection.
    pub fn refresh(
        scene: &Arc<RwLock<Scene>>,
        session: &mut GeneratorSession,
    ) -> Result<Report, LibraryError> {
        let scene = read_scene(scene)?;
        let previous = session.selected_collections();

        session.collections = scene
            .user_collections()
            .into_iter()
            .map(|collection| CollectionItem {
                name: collection.name.clone(),
                selected: previous.contains(&collection.name),
            })
            .collect();

        if session.collections.is_empty() {
            Ok(Report::warning("No collections found"))
        } else {
            info!("Collection list refreshed: {}", session.collections.len());
            Ok(Report::info(format!(
                "{} collections found",
                session.collections.len()
            )))
        }
    }

    /// Flip the selection of one collection. Returns false if the name is not listed.
    pub fn toggle(session: &mut GeneratorSession, name: &str) -> bool {
        match session.collections.iter_mut().find(|item| item.name == name) {
            Some(item) => {
                item.selected = !item.selected;
                true
            }
            None => false,
        }
    }

    /// Select every collection the current filter shows.
    pub fn select_all(session: &mut GeneratorSession) -> usize {
        Self::set_visible(session, true)
    }

    /// Deselect every collection the current filter shows.
    pub fn deselect_all(session: &mut GeneratorSession) -> usize {
        Self::set_visible(session, false)
    }

    fn set_visible(session: &mut GeneratorSession, selected: bool) -> usize {
        let filter = session.filter.clone();
        let mut count = 0;
        for item in session
            .collections
            .iter_mut()
            .filter(|item| filter.matches(&item.name))
        {
            item.selected = selected;
            count += 1;
        }
        count
    }
}
