use eframe::egui::{self, Button};
use egui_dock::DockState;
use egui_phosphor::regular as icons;

use crate::command::{CommandId, CommandRegistry};
use crate::ui::tab_viewer::Tab;

pub fn menu_bar(
    ui: &mut egui::Ui,
    command_registry: &CommandRegistry,
    dock_state: &DockState<Tab>,
    triggered_action: &mut Option<CommandId>,
) {
    egui::MenuBar::new().ui(ui, |ui| {
        file_menu(ui, command_registry, triggered_action);
        edit_menu(ui, command_registry, triggered_action);
        view_menu(ui, dock_state, command_registry, triggered_action);
    });
}

fn command_button(
    ui: &mut egui::Ui,
    command_registry: &CommandRegistry,
    cmd_id: CommandId,
    icon: Option<&str>,
    triggered_action: &mut Option<CommandId>,
) {
    let Some(cmd) = command_registry.find(cmd_id) else {
        return;
    };
    let text = match icon {
        Some(icon) => format!("{} {}", icon, cmd.text),
        None => cmd.text.clone(),
    };
    let button = Button::new(egui::RichText::new(text)).shortcut_text(cmd.shortcut_text.clone());
    if ui.add(button).clicked() {
        *triggered_action = Some(cmd.id);
        ui.close();
    }
}

fn file_menu(
    ui: &mut egui::Ui,
    command_registry: &CommandRegistry,
    triggered_action: &mut Option<CommandId>,
) {
    ui.menu_button("File", |ui| {
        for (cmd_id, icon) in [
            (CommandId::NewScene, icons::FILE_PLUS),
            (CommandId::OpenScene, icons::FOLDER_OPEN),
            (CommandId::SaveScene, icons::FLOPPY_DISK),
        ] {
            command_button(ui, command_registry, cmd_id, Some(icon), triggered_action);
        }
        ui.separator();
        for (cmd_id, icon) in [
            (CommandId::ExportConfig, icons::EXPORT),
            (CommandId::ImportConfig, icons::DOWNLOAD_SIMPLE),
        ] {
            command_button(ui, command_registry, cmd_id, Some(icon), triggered_action);
        }
        ui.separator();
        command_button(
            ui,
            command_registry,
            CommandId::Quit,
            Some(icons::SIGN_OUT),
            triggered_action,
        );
    });
}

fn edit_menu(
    ui: &mut egui::Ui,
    command_registry: &CommandRegistry,
    triggered_action: &mut Option<CommandId>,
) {
    ui.menu_button("Edit", |ui| {
        command_button(ui, command_registry, CommandId::GenerateAll, None, triggered_action);
        ui.separator();
        command_button(ui, command_registry, CommandId::Preferences, None, triggered_action);
    });
}

fn view_menu(
    ui: &mut egui::Ui,
    dock_state: &DockState<Tab>,
    command_registry: &CommandRegistry,
    triggered_action: &mut Option<CommandId>,
) {
    ui.menu_button("View", |ui| {
        for tab in Tab::all() {
            let cmd_id = CommandId::TogglePanel(*tab);
            if let Some(cmd) = command_registry.find(cmd_id) {
                let mut is_open = dock_state.find_tab(tab).is_some();
                if ui.checkbox(&mut is_open, &cmd.text).changed() {
                    *triggered_action = Some(cmd_id);
                }
            }
        }

        ui.separator();

        command_button(ui, command_registry, CommandId::ResetLayout, None, triggered_action);
    });
}
