//! View layer generation from collection naming conventions.
//!
//! The scene model in [`model::scene`] stands in for the host application's scene graph.
//! [`visibility`] decides, per view layer, which collections are included, excluded or
//! held out. [`editor`] exposes the panel commands, [`io`] the JSON sidecar file and
//! [`preferences`] the stored pass presets.

pub mod editor;
pub mod error;
pub mod io;
pub mod model;
pub mod preferences;
pub mod visibility;

pub use editor::GeneratorService;
pub use error::LibraryError;
pub use model::scene::Scene;
