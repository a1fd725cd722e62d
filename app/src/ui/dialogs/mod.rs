pub mod preferences_dialog;

/// Renders a standard dialog footer with buttons aligned to the bottom-right.
///
/// Buttons are laid out right to left, so add them in reverse order.
pub fn dialog_footer(ui: &mut eframe::egui::Ui, add_contents: impl FnOnce(&mut eframe::egui::Ui)) {
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(5.0);
    ui.with_layout(
        eframe::egui::Layout::right_to_left(eframe::egui::Align::Center),
        add_contents,
    );
}
