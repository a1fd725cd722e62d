use std::fs;
use std::path::PathBuf;

use anyhow::Context as _;
use eframe::egui;
use egui_dock::DockState;
use viewlayer_library::editor::Report;
use viewlayer_library::{GeneratorService, Scene};

use crate::command::CommandId;
use crate::config::{self, AppState};
use crate::state::context::PanelContext;
use crate::ui::tab_viewer::{Tab, create_initial_dock_state};

pub struct ActionContext<'a> {
    pub service: &'a mut GeneratorService,
    pub panel_context: &'a mut PanelContext,
    pub dock_state: &'a mut DockState<Tab>,
    pub app_state: &'a mut AppState,
}

pub fn handle_command(
    ctx: &egui::Context,
    action: CommandId,
    context: ActionContext,
    trigger_preferences: &mut bool,
) {
    match action {
        CommandId::NewScene
        | CommandId::OpenScene
        | CommandId::SaveScene
        | CommandId::ExportConfig
        | CommandId::ImportConfig => {
            handle_file_command(action, context);
        }
        CommandId::GenerateAll => {
            let result = context.service.generate_all();
            context.panel_context.record(result);
        }
        CommandId::TogglePanel(tab) => {
            if let Some(index) = context.dock_state.find_tab(&tab) {
                context.dock_state.remove_tab(index);
            } else {
                context.dock_state.push_to_focused_leaf(tab);
            }
        }
        CommandId::ResetLayout => {
            *context.dock_state = create_initial_dock_state();
        }
        CommandId::Preferences => {
            *trigger_preferences = true;
        }
        CommandId::Quit => {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

fn handle_file_command(action: CommandId, context: ActionContext) {
    let outcome = match action {
        CommandId::NewScene => new_scene(context.service),
        CommandId::OpenScene => match pick_json("Scene", None) {
            Some(path) => open_scene(context.service, context.app_state, path),
            None => return,
        },
        CommandId::SaveScene => match save_json("Scene", "scene.json", None) {
            Some(path) => save_scene(context.service, context.app_state, path),
            None => return,
        },
        CommandId::ExportConfig => {
            let dir = context.app_state.last_config_dir.clone();
            match save_json("View Layer Config", "viewlayers.json", dir) {
                Some(path) => {
                    remember_config_dir(context.app_state, &path);
                    context
                        .service
                        .export_config(&path)
                        .context("Export failed")
                }
                None => return,
            }
        }
        CommandId::ImportConfig => {
            let dir = context.app_state.last_config_dir.clone();
            if let Some(path) = pick_json("View Layer Config", dir) {
                remember_config_dir(context.app_state, &path);
                let result = context.service.import_config(&path);
                context.panel_context.record_import(result);
            }
            return;
        }
        _ => return,
    };

    match outcome {
        Ok(report) => context.panel_context.push(report),
        Err(e) => context.panel_context.push(Report::error(format!("{:#}", e))),
    }
}

fn new_scene(service: &mut GeneratorService) -> anyhow::Result<Report> {
    service.set_scene(Scene::new("Scene"))?;
    Ok(Report::info("New scene created"))
}

pub fn open_scene(
    service: &mut GeneratorService,
    app_state: &mut AppState,
    path: PathBuf,
) -> anyhow::Result<Report> {
    let json_str = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read scene file {}", path.display()))?;
    service
        .load_scene(&json_str)
        .with_context(|| format!("Failed to load scene {}", path.display()))?;
    let report = Report::info(format!("Scene loaded from {}", path.display()));
    app_state.last_scene = Some(path);
    config::save_app_state(app_state);
    Ok(report)
}

fn save_scene(
    service: &GeneratorService,
    app_state: &mut AppState,
    path: PathBuf,
) -> anyhow::Result<Report> {
    let json_str = service.save_scene().context("Failed to serialize scene")?;
    fs::write(&path, json_str)
        .with_context(|| format!("Failed to write scene file {}", path.display()))?;
    let report = Report::info(format!("Scene saved to {}", path.display()));
    app_state.last_scene = Some(path);
    config::save_app_state(app_state);
    Ok(report)
}

fn remember_config_dir(app_state: &mut AppState, path: &std::path::Path) {
    app_state.last_config_dir = path.parent().map(|dir| dir.to_path_buf());
    config::save_app_state(app_state);
}

fn pick_json(filter_name: &str, dir: Option<PathBuf>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().add_filter(filter_name, &["json"]);
    if let Some(dir) = dir {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_file()
}

fn save_json(filter_name: &str, file_name: &str, dir: Option<PathBuf>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .add_filter(filter_name, &["json"])
        .set_file_name(file_name);
    if let Some(dir) = dir {
        dialog = dialog.set_directory(dir);
    }
    dialog.save_file()
}
