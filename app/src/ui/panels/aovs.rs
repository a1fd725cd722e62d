use egui::{ComboBox, ScrollArea, TextEdit, Ui};
use egui_phosphor::regular as icons;
use viewlayer_library::GeneratorService;
use viewlayer_library::editor::Report;
use viewlayer_library::editor::session::AovSource;
use viewlayer_library::model::scene::AovType;

use crate::state::context::PanelContext;

pub fn aovs_panel(ui: &mut Ui, service: &mut GeneratorService, context: &mut PanelContext) {
    ui.horizontal(|ui| {
        if ui
            .button(format!("{} Detect from Materials", icons::MAGNIFYING_GLASS))
            .clicked()
        {
            let result = service.detect_aovs();
            context.record(result);
        }
        if ui.button("All").clicked() {
            service
                .session_mut()
                .aovs
                .iter_mut()
                .for_each(|item| item.selected = true);
        }
        if ui.button("None").clicked() {
            service
                .session_mut()
                .aovs
                .iter_mut()
                .for_each(|item| item.selected = false);
        }
    });

    ui.separator();

    let mut removed = None;
    ScrollArea::vertical()
        .id_salt("aov_list")
        .max_height(ui.available_height() - 40.0)
        .show(ui, |ui| {
            let aovs = &mut service.session_mut().aovs;
            if aovs.is_empty() {
                ui.weak("No AOVs. Detect them from materials or add one below.");
            }
            egui::Grid::new("aov_grid").num_columns(4).striped(true).show(ui, |ui| {
                for item in aovs.iter_mut() {
                    ui.checkbox(&mut item.selected, &item.name);
                    ui.label(item.aov_type.to_string());
                    ui.weak(match item.source {
                        AovSource::Detected => "material",
                        AovSource::Custom => "custom",
                    });
                    if ui.small_button(icons::X).on_hover_text("Remove").clicked() {
                        removed = Some(item.name.clone());
                    }
                    ui.end_row();
                }
            });
        });
    if let Some(name) = removed {
        service.remove_aov(&name);
    }

    ui.separator();
    ui.horizontal(|ui| {
        ui.add(
            TextEdit::singleline(&mut context.custom_aov_name)
                .hint_text("AOV name")
                .desired_width(120.0),
        );
        ComboBox::from_id_salt("custom_aov_type")
            .selected_text(context.custom_aov_type.to_string())
            .show_ui(ui, |ui| {
                for aov_type in [AovType::Color, AovType::Value] {
                    ui.selectable_value(
                        &mut context.custom_aov_type,
                        aov_type,
                        aov_type.to_string(),
                    );
                }
            });
        if ui.button(format!("{} Add", icons::PLUS)).clicked() {
            let name = context.custom_aov_name.trim().to_string();
            match service.add_custom_aov(&name, context.custom_aov_type) {
                Ok(()) => {
                    context.push(Report::info(format!("AOV '{}' added", name)));
                    context.custom_aov_name.clear();
                }
                Err(e) => context.push(Report::error(e.to_string())),
            }
        }
    });
}
