//! Layer visibility resolution.
//!
//! [`NamingIndex`] is computed once per generation run from the whole scene; the
//! resolver then walks one view layer's tree and sets `exclude`/`holdout` on each node.

pub mod index;
pub mod resolver;

pub use index::NamingIndex;
pub use resolver::{resolve, resolve_view_layer, should_activate};
