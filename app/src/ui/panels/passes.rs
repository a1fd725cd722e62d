use egui::{ComboBox, ScrollArea, TextEdit, Ui};
use egui_phosphor::regular as icons;
use viewlayer_library::GeneratorService;
use viewlayer_library::editor::Report;
use viewlayer_library::model::passes::{PassCategory, PassFlag, RenderEngine};

use crate::config;
use crate::state::context::PanelContext;

const CATEGORIES: [PassCategory; 4] = [
    PassCategory::Data,
    PassCategory::Light,
    PassCategory::Cryptomatte,
    PassCategory::Other,
];

pub fn passes_panel(ui: &mut Ui, service: &mut GeneratorService, context: &mut PanelContext) {
    engine_selector(ui, service, context);
    ui.separator();
    preset_controls(ui, service, context);
    ui.separator();

    ui.horizontal(|ui| {
        let categories = &mut service.session_mut().categories;
        ui.toggle_value(&mut categories.show_data, PassCategory::Data.to_string());
        ui.toggle_value(&mut categories.show_light, PassCategory::Light.to_string());
        ui.toggle_value(&mut categories.show_crypto, PassCategory::Cryptomatte.to_string());
        ui.toggle_value(&mut categories.show_other, PassCategory::Other.to_string());
    });

    let visible: Vec<(PassFlag, bool)> = service
        .session()
        .visible_passes()
        .map(|item| (item.flag, item.selected))
        .collect();

    ScrollArea::vertical().id_salt("pass_list").show(ui, |ui| {
        for category in CATEGORIES {
            let in_category: Vec<&(PassFlag, bool)> = visible
                .iter()
                .filter(|(flag, _)| flag.category() == category)
                .collect();
            if in_category.is_empty() {
                continue;
            }
            ui.strong(category.to_string());
            egui::Grid::new(format!("passes_{}", category))
                .num_columns(2)
                .show(ui, |ui| {
                    for (column, (flag, selected)) in in_category.into_iter().enumerate() {
                        let mut checked = *selected;
                        if ui
                            .checkbox(&mut checked, flag.label())
                            .on_hover_text(flag.as_str())
                            .changed()
                        {
                            service.session_mut().set_pass_selected(*flag, checked);
                        }
                        if column % 2 == 1 {
                            ui.end_row();
                        }
                    }
                });
            ui.add_space(4.0);
        }
    });
}

fn engine_selector(ui: &mut Ui, service: &mut GeneratorService, context: &mut PanelContext) {
    let current = match service.render_engine() {
        Ok(engine) => engine,
        Err(e) => {
            ui.colored_label(egui::Color32::RED, e.to_string());
            return;
        }
    };
    let mut selected = current;
    ui.horizontal(|ui| {
        ui.label("Render Engine");
        ComboBox::from_id_salt("render_engine_combo")
            .selected_text(current.label())
            .show_ui(ui, |ui| {
                for engine in RenderEngine::ALL {
                    ui.selectable_value(&mut selected, *engine, engine.label());
                }
            });
        ui.weak(format!("{} passes", service.current_profile().label()));
    });

    if selected != current {
        match service.set_render_engine(selected) {
            Ok(true) => context.push(Report::info(format!(
                "Pass list rebuilt for {}",
                selected.label()
            ))),
            Ok(false) => {}
            Err(e) => context.push(Report::error(e.to_string())),
        }
    }
}

fn preset_controls(ui: &mut Ui, service: &mut GeneratorService, context: &mut PanelContext) {
    let profile = service.current_profile();
    let names: Vec<String> = service
        .preferences()
        .presets_for(profile)
        .map(|preset| preset.name.clone())
        .collect();
    if context
        .selected_preset
        .as_ref()
        .is_some_and(|name| !names.contains(name))
    {
        context.selected_preset = None;
    }

    ui.horizontal(|ui| {
        ui.label("Preset");
        ComboBox::from_id_salt("preset_combo")
            .selected_text(context.selected_preset.as_deref().unwrap_or("Select..."))
            .show_ui(ui, |ui| {
                for name in &names {
                    ui.selectable_value(&mut context.selected_preset, Some(name.clone()), name);
                }
            });

        let selected = context.selected_preset.clone();
        if ui
            .add_enabled(selected.is_some(), egui::Button::new("Load"))
            .clicked()
        {
            if let Some(name) = &selected {
                let result = service.load_preset(profile, name);
                context.record(result);
            }
        }
        if ui
            .add_enabled(selected.is_some(), egui::Button::new(icons::TRASH))
            .on_hover_text("Delete preset")
            .clicked()
        {
            if let Some(name) = &selected {
                let result = service.delete_preset(profile, name);
                if result.is_ok() {
                    config::save_preferences(service.preferences());
                }
                context.record(result);
            }
        }
        if ui
            .button(icons::ARROW_COUNTER_CLOCKWISE)
            .on_hover_text("Reset to Combined and Depth")
            .clicked()
        {
            let report = service.reset_preset(profile);
            config::save_preferences(service.preferences());
            context.push(report);
        }
    });

    ui.horizontal(|ui| {
        ui.add(
            TextEdit::singleline(&mut context.preset_name)
                .hint_text("New preset name")
                .desired_width(140.0),
        );
        if ui
            .button(format!("{} Save", icons::FLOPPY_DISK))
            .clicked()
        {
            let result = service.save_preset(profile, &context.preset_name);
            if result.is_ok() {
                context.selected_preset = Some(context.preset_name.trim().to_string());
                context.preset_name.clear();
                config::save_preferences(service.preferences());
            }
            context.record(result);
        }
    });
}
