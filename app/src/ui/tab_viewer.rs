use egui::Ui;
use egui_dock::{DockState, TabViewer};
use egui_phosphor::regular as icons;
use serde::{Deserialize, Serialize};
use viewlayer_library::GeneratorService;

use crate::state::context::PanelContext;
use crate::ui::panels::{aovs, collections, passes, reports};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tab {
    Collections,
    Passes,
    Aovs,
    Reports,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Collections, Tab::Passes, Tab::Aovs, Tab::Reports]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Collections => "Collections",
            Tab::Passes => "Passes",
            Tab::Aovs => "AOVs",
            Tab::Reports => "Reports",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Tab::Collections => icons::FOLDERS,
            Tab::Passes => icons::STACK,
            Tab::Aovs => icons::PALETTE,
            Tab::Reports => icons::LIST_BULLETS,
        }
    }
}

pub struct AppTabViewer<'a> {
    service: &'a mut GeneratorService,
    context: &'a mut PanelContext,
}

impl<'a> AppTabViewer<'a> {
    pub fn new(service: &'a mut GeneratorService, context: &'a mut PanelContext) -> Self {
        Self { service, context }
    }
}

impl<'a> TabViewer for AppTabViewer<'a> {
    type Tab = Tab;

    fn ui(&mut self, ui: &mut Ui, tab: &mut Self::Tab) {
        match tab {
            Tab::Collections => collections::collections_panel(ui, self.service, self.context),
            Tab::Passes => passes::passes_panel(ui, self.service, self.context),
            Tab::Aovs => aovs::aovs_panel(ui, self.service, self.context),
            Tab::Reports => reports::reports_panel(ui, self.context),
        }
    }

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        format!("{} {}", tab.icon(), tab.label()).into()
    }
}

pub fn create_initial_dock_state() -> DockState<Tab> {
    let mut dock_state = DockState::new(vec![Tab::Collections]);
    let surface = dock_state.main_surface_mut();

    let [main_area, _] = surface.split_below(egui_dock::NodeIndex::root(), 0.75, vec![Tab::Reports]);
    surface.split_right(main_area, 0.45, vec![Tab::Passes, Tab::Aovs]);

    dock_state
}
