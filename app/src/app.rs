use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use eframe::egui::{self, Visuals};
use egui_dock::{DockArea, DockState, Style};
use log::warn;
use viewlayer_library::editor::ReportLevel;
use viewlayer_library::{GeneratorService, Scene};

use crate::action::{self, ActionContext};
use crate::command::{CommandId, CommandRegistry};
use crate::config::{self, AppState};
use crate::state::context::PanelContext;
use crate::ui::dialogs::preferences_dialog::PreferencesDialog;
use crate::ui::menu;
use crate::ui::tab_viewer::{AppTabViewer, Tab, create_initial_dock_state};
use crate::utils;

pub struct GeneratorApp {
    service: GeneratorService,
    panel_context: PanelContext,
    dock_state: DockState<Tab>,
    app_state: AppState,
    command_registry: CommandRegistry,
    preferences_dialog: PreferencesDialog,
    // One-shot: the Default preset is applied once this instant has passed.
    default_preset_due: Option<Instant>,
}

impl GeneratorApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(Visuals::dark());
        utils::setup_fonts(&cc.egui_ctx);

        let preferences = config::load_preferences();
        let delay = Duration::from_millis(preferences.default_preset_delay_ms);
        let scene = Arc::new(RwLock::new(Scene::new("Scene")));
        let mut app = Self {
            service: GeneratorService::new(scene, preferences),
            panel_context: PanelContext::new(),
            dock_state: create_initial_dock_state(),
            app_state: config::load_app_state(),
            command_registry: CommandRegistry::new(),
            preferences_dialog: PreferencesDialog::new(),
            default_preset_due: Some(Instant::now() + delay),
        };

        if let Some(path) = app.app_state.last_scene.clone() {
            if path.exists() {
                match action::open_scene(&mut app.service, &mut app.app_state, path) {
                    Ok(report) => app.panel_context.push(report),
                    Err(e) => warn!("Could not reopen last scene: {:#}", e),
                }
            }
        }
        cc.egui_ctx.request_repaint();
        app
    }

    fn poll_default_preset(&mut self, ctx: &egui::Context) {
        let Some(due) = self.default_preset_due else {
            return;
        };
        let now = Instant::now();
        if now < due {
            ctx.request_repaint_after(due - now);
            return;
        }
        self.default_preset_due = None;
        let result = self.service.apply_default_preset();
        self.panel_context.record(result);
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match self.service.render_engine() {
                Ok(engine) => ui.label(engine.label()),
                Err(e) => ui.colored_label(egui::Color32::RED, e.to_string()),
            };
            ui.separator();
            let view_layers = self
                .service
                .get_scene()
                .read()
                .map(|scene| scene.view_layers.len())
                .unwrap_or(0);
            ui.label(format!("{} view layers", view_layers));
            ui.separator();
            match self.panel_context.last_report() {
                Some(report) => {
                    let text = egui::RichText::new(&report.message);
                    match report.level {
                        ReportLevel::Info => ui.label(text),
                        ReportLevel::Warning => ui.label(text.color(egui::Color32::YELLOW)),
                        ReportLevel::Error => ui.label(text.color(egui::Color32::RED)),
                    };
                }
                None => {
                    ui.label("Ready");
                }
            }
        });
    }
}

impl eframe::App for GeneratorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_default_preset(ctx);

        let mut triggered_action: Option<CommandId> = None;
        if !self.preferences_dialog.is_open {
            triggered_action = self.command_registry.triggered(ctx);
        }

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            menu::menu_bar(
                ui,
                &self.command_registry,
                &self.dock_state,
                &mut triggered_action,
            );
        });

        let mut trigger_preferences = false;
        if let Some(action) = triggered_action {
            action::handle_command(
                ctx,
                action,
                ActionContext {
                    service: &mut self.service,
                    panel_context: &mut self.panel_context,
                    dock_state: &mut self.dock_state,
                    app_state: &mut self.app_state,
                },
                &mut trigger_preferences,
            );
            ctx.request_repaint();
        }
        if trigger_preferences {
            self.preferences_dialog.open(self.service.preferences());
        }

        if let Some(preferences) = self.preferences_dialog.show(ctx) {
            self.service.session_mut().view_layer_prefix = preferences.view_layer_prefix.clone();
            config::save_preferences(&preferences);
            *self.service.preferences_mut() = preferences;
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.status_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut tab_viewer = AppTabViewer::new(&mut self.service, &mut self.panel_context);
            DockArea::new(&mut self.dock_state)
                .style(Style::from_egui(ui.style().as_ref()))
                .show_inside(ui, &mut tab_viewer);
        });
    }
}
