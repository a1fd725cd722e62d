use egui::{ScrollArea, TextEdit, Ui};
use egui_phosphor::regular as icons;
use viewlayer_library::GeneratorService;

use crate::state::context::PanelContext;

pub fn collections_panel(ui: &mut Ui, service: &mut GeneratorService, context: &mut PanelContext) {
    ui.horizontal(|ui| {
        if ui
            .button(format!("{} Refresh", icons::ARROWS_CLOCKWISE))
            .on_hover_text("Re-read the collections of the scene")
            .clicked()
        {
            let result = service.refresh_collections();
            context.record(result);
        }
        ui.separator();
        ui.label("Prefix");
        ui.add(
            TextEdit::singleline(&mut service.session_mut().view_layer_prefix)
                .hint_text("none")
                .desired_width(80.0),
        );
    });

    ui.horizontal(|ui| {
        let session = service.session_mut();
        ui.label(icons::MAGNIFYING_GLASS);
        ui.add(
            TextEdit::singleline(&mut session.filter.text)
                .hint_text("Filter collections")
                .desired_width(160.0),
        );
        ui.toggle_value(&mut session.filter.case_sensitive, "Aa")
            .on_hover_text("Case sensitive");
        if ui.button("All").clicked() {
            service.select_all_collections();
        }
        if ui.button("None").clicked() {
            service.deselect_all_collections();
        }
    });

    ui.separator();

    let visible: Vec<(String, bool)> = service
        .session()
        .visible_collections()
        .map(|item| (item.name.clone(), item.selected))
        .collect();
    let listed = service.session().collections.len();

    ScrollArea::vertical()
        .id_salt("collection_list")
        .max_height(ui.available_height() - 70.0)
        .show(ui, |ui| {
            if visible.is_empty() {
                ui.weak(if listed == 0 {
                    "No collections listed. Press Refresh."
                } else {
                    "No collection matches the filter."
                });
            }
            for (name, selected) in visible {
                let mut checked = selected;
                if ui.checkbox(&mut checked, &name).changed() {
                    service.toggle_collection(&name);
                }
            }
        });

    ui.separator();
    ui.label(format!(
        "{} of {} selected",
        service.session().selected_collections().len(),
        listed
    ));

    ui.horizontal_wrapped(|ui| {
        if ui.button(format!("{} Generate View Layers", icons::PLUS_CIRCLE)).clicked() {
            let result = service.generate_view_layers();
            context.record(result);
        }
        if ui.button("Apply Passes").clicked() {
            let result = service.apply_passes();
            context.record(result);
        }
        if ui.button("Apply AOVs").clicked() {
            let result = service.apply_aovs();
            context.record(result);
        }
        if ui.button(format!("{} Generate All", icons::LIGHTNING)).clicked() {
            let result = service.generate_all();
            context.record(result);
        }
    });
}
