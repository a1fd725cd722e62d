pub mod dialogs;
pub mod menu;
pub mod panels;
pub mod tab_viewer;
