use eframe::egui::{self, DragValue, TextEdit};
use viewlayer_library::model::passes::PassProfile;
use viewlayer_library::preferences::Preferences;

use super::dialog_footer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferencesResult {
    Save,
    Cancel,
    RestoreDefaults,
}

/// Edits a working copy of the preferences; the caller commits it on Save.
pub struct PreferencesDialog {
    pub is_open: bool,
    editing: Preferences,
}

impl PreferencesDialog {
    pub fn new() -> Self {
        Self {
            is_open: false,
            editing: Preferences::default(),
        }
    }

    pub fn open(&mut self, current: &Preferences) {
        self.editing = current.clone();
        self.is_open = true;
    }

    /// Returns the edited preferences once the user saves.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<Preferences> {
        if !self.is_open {
            return None;
        }

        let mut still_open = true;
        let mut result = None;
        egui::Window::new("Preferences")
            .open(&mut still_open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("preferences_grid")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("View layer prefix");
                        ui.add(
                            TextEdit::singleline(&mut self.editing.view_layer_prefix)
                                .hint_text("none"),
                        );
                        ui.end_row();

                        ui.label("Default preset delay");
                        ui.add(
                            DragValue::new(&mut self.editing.default_preset_delay_ms)
                                .range(0..=10_000)
                                .suffix(" ms"),
                        );
                        ui.end_row();
                    });

                ui.add_space(8.0);
                ui.strong("Presets");
                for profile in PassProfile::ALL {
                    let names: Vec<&str> = self
                        .editing
                        .presets_for(*profile)
                        .map(|preset| preset.name.as_str())
                        .collect();
                    ui.label(format!("{}: {}", profile.label(), names.join(", ")));
                }

                dialog_footer(ui, |ui| {
                    if ui.button("Save").clicked() {
                        result = Some(PreferencesResult::Save);
                    }
                    if ui.button("Cancel").clicked() {
                        result = Some(PreferencesResult::Cancel);
                    }
                    if ui.button("Restore Defaults").clicked() {
                        result = Some(PreferencesResult::RestoreDefaults);
                    }
                });
            });

        if !still_open {
            result = Some(PreferencesResult::Cancel);
        }

        match result {
            Some(PreferencesResult::Save) => {
                self.is_open = false;
                Some(self.editing.clone())
            }
            Some(PreferencesResult::Cancel) => {
                self.is_open = false;
                None
            }
            Some(PreferencesResult::RestoreDefaults) => {
                self.editing = Preferences::default();
                None
            }
            None => None,
        }
    }
}
