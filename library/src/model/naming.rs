//! Collection naming conventions.
//!
//! Layer membership is driven entirely by collection names:
//!
//! - `<name>.all` is active in every view layer.
//! - `lgt.all` is active in every view layer except Grease Pencil ones.
//! - `lgt.<scope>.<rest>` is a lighting group scoped to targets starting with `<scope>.`;
//!   `lgt.<rest>` without a scope segment is active in every non Grease Pencil view layer.
//! - `<name>.hdt` is a holdout, active only under the view layer of its parent collection.
//! - Targets ending in `.GP` or `.GP.vl` are Grease Pencil view layers.

pub const ALWAYS_ACTIVE_SUFFIX: &str = ".all";
pub const HOLDOUT_SUFFIX: &str = ".hdt";
pub const LIGHTING_PREFIX: &str = "lgt.";
pub const LIGHTING_ALL: &str = "lgt.all";

const GREASE_PENCIL_SUFFIXES: [&str; 2] = [".GP", ".GP.vl"];

/// How a lighting collection name decides whether it joins a view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingScope<'a> {
    /// No scope segment; joins every non Grease Pencil view layer.
    Global,
    /// Joins view layers whose target starts with `<scope>.`.
    Prefix(&'a str),
}

pub fn is_always_active(name: &str) -> bool {
    name.ends_with(ALWAYS_ACTIVE_SUFFIX) && !is_lighting(name)
}

pub fn is_lighting(name: &str) -> bool {
    name.starts_with(LIGHTING_PREFIX)
}

pub fn is_lighting_all(name: &str) -> bool {
    name == LIGHTING_ALL
}

pub fn is_holdout(name: &str) -> bool {
    name.ends_with(HOLDOUT_SUFFIX)
}

pub fn is_grease_pencil(target: &str) -> bool {
    GREASE_PENCIL_SUFFIXES
        .iter()
        .any(|suffix| target.ends_with(suffix))
}

/// Scope of a `lgt.` name. Returns `None` for names outside the lighting prefix.
pub fn lighting_scope(name: &str) -> Option<LightingScope<'_>> {
    if !is_lighting(name) {
        return None;
    }
    let segments: Vec<&str> = name.split('.').collect();
    if segments.len() < 3 {
        Some(LightingScope::Global)
    } else {
        Some(LightingScope::Prefix(segments[1]))
    }
}

impl LightingScope<'_> {
    pub fn admits(&self, target: &str) -> bool {
        match self {
            LightingScope::Global => true,
            LightingScope::Prefix(scope) => target
                .strip_prefix(scope)
                .is_some_and(|rest| rest.starts_with('.')),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighting_all_is_not_a_plain_always_active_name() {
        assert!(is_always_active("props.all"));
        assert!(!is_always_active(LIGHTING_ALL));
        assert!(is_lighting_all(LIGHTING_ALL));
    }

    #[test]
    fn lighting_scope_uses_second_segment() {
        assert_eq!(lighting_scope("lgt.kitchen.rig"), Some(LightingScope::Prefix("kitchen")));
        assert_eq!(lighting_scope("lgt.key"), Some(LightingScope::Global));
        assert_eq!(lighting_scope("lgt."), Some(LightingScope::Global));
        assert_eq!(lighting_scope("chars"), None);
    }

    #[test]
    fn scope_requires_dot_after_prefix() {
        let scope = LightingScope::Prefix("kitchen");
        assert!(scope.admits("kitchen.interior"));
        assert!(!scope.admits("kitchenette.interior"));
        assert!(!scope.admits("kitchen"));
    }

    #[test]
    fn grease_pencil_suffixes() {
        assert!(is_grease_pencil("chars.GP"));
        assert!(is_grease_pencil("chars.GP.vl"));
        assert!(!is_grease_pencil("chars.gp"));
        assert!(!is_grease_pencil("GP.chars"));
    }
}
