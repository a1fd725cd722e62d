use egui::{Color32, RichText, ScrollArea, Ui};
use viewlayer_library::editor::ReportLevel;

use crate::state::context::PanelContext;

pub fn reports_panel(ui: &mut Ui, context: &mut PanelContext) {
    ui.horizontal(|ui| {
        ui.label(format!("{} messages", context.reports.len()));
        if ui.button("Clear").clicked() {
            context.reports.clear();
        }
    });
    ui.separator();

    ScrollArea::vertical()
        .id_salt("report_log")
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for report in &context.reports {
                let color = match report.level {
                    ReportLevel::Info => ui.visuals().text_color(),
                    ReportLevel::Warning => Color32::from_rgb(230, 180, 60),
                    ReportLevel::Error => Color32::from_rgb(230, 80, 80),
                };
                ui.label(RichText::new(report.to_string()).color(color).monospace());
            }
        });
}
