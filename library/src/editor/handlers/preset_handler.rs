use crate::editor::report::Report;
use crate::editor::session::GeneratorSession;
use crate::error::LibraryError;
use crate::model::passes::{DEFAULT_PASSES, PassFlag, PassProfile};
use crate::preferences::{DEFAULT_PRESET_NAME, PassPreset, Preferences};
use log::info;

pub struct PresetHandler;

impl PresetHandler {
    /// Store the session's current pass selection as a named preset for `profile`.
    pub fn save_preset(
        prefs: &mut Preferences,
        session: &GeneratorSession,
        profile: PassProfile,
        name: &str,
    ) -> Result<Report, LibraryError> {
        let passes: Vec<PassFlag> = session
            .selected_passes()
            .into_iter()
            .filter(|flag| profile.supports(*flag))
            .collect();
        let preset = PassPreset::new(name.trim(), profile, passes);
        let count = preset.passes.len();
        prefs.save_preset(preset)?;
        info!("Saved {} preset '{}' with {} passes", profile.label(), name, count);
        Ok(Report::info(format!(
            "{} preset '{}' saved ({} passes)",
            profile.label(),
            name.trim(),
            count
        )))
    }

    /// Select exactly the passes of a stored preset.
    pub fn load_preset(
        prefs: &Preferences,
        session: &mut GeneratorSession,
        profile: PassProfile,
        name: &str,
    ) -> Result<Report, LibraryError> {
        let preset = prefs.preset(profile, name).ok_or_else(|| {
            LibraryError::InvalidArgument(format!(
                "No {} preset named '{}'. Configure it in the preferences.",
                profile.label(),
                name
            ))
        })?;
        let flags: Vec<PassFlag> = preset.passes.iter().copied().collect();
        let count = session.select_only_passes(&flags);
        info!("Applied {} preset '{}'", profile.label(), name);
        Ok(Report::info(format!(
            "{} preset '{}' applied: {} passes selected",
            profile.label(),
            name,
            count
        )))
    }

    /// Restore the Default preset of `profile` and reset the session selection to match.
    pub fn reset_preset(
        prefs: &mut Preferences,
        session: &mut GeneratorSession,
        profile: PassProfile,
    ) -> Report {
        prefs.reset_profile(profile);
        session.select_only_passes(DEFAULT_PASSES);
        Report::info(format!("{} passes restored to defaults", profile.label()))
    }

    pub fn delete_preset(
        prefs: &mut Preferences,
        profile: PassProfile,
        name: &str,
    ) -> Result<Report, LibraryError> {
        prefs.delete_preset(profile, name)?;
        Ok(Report::info(format!(
            "{} preset '{}' deleted",
            profile.label(),
            name
        )))
    }

    /// Apply the Default preset of the session's current engine profile.
    pub fn apply_default_preset(
        prefs: &Preferences,
        session: &mut GeneratorSession,
    ) -> Result<Report, LibraryError> {
        let profile = session.profile().ok_or_else(|| {
            LibraryError::Runtime("Render engine not synchronised yet".to_string())
        })?;
        Self::load_preset(prefs, session, profile, DEFAULT_PRESET_NAME)
    }
}
