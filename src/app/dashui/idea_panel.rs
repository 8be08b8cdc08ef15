//! "Your Rough Idea" panel: textarea, character counter, optimize button and
//! the inline error panel.

use super::controller::OptimizerController;
use crate::app::status::OptimizationStatus;
use eframe::egui;
use egui::{Color32, RichText, Ui};

pub const OPTIMIZE_LABEL: &str = "Optimize Prompt";
pub const PROCESSING_LABEL: &str = "Processing...";
pub const NEW_IDEA_LABEL: &str = "New Idea";

const PLACEHOLDER: &str = "e.g., I want a python script that scrapes stock data...";

/// Frame margins plus the character counter row around the input.
const INPUT_CHROME_HEIGHT: f32 = 48.0;
const MIN_INPUT_HEIGHT: f32 = 48.0;

/// Command on macOS, Ctrl elsewhere.
pub const OPTIMIZE_SHORTCUT: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Enter);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IdeaPanelAction {
    pub optimize: bool,
    pub reset: bool,
}

pub fn render_idea_panel(ui: &mut Ui, controller: &mut OptimizerController) -> IdeaPanelAction {
    let mut action = IdeaPanelAction::default();

    // Consume before the TextEdit sees the Enter key.
    if ui.ctx().input_mut(|i| i.consume_shortcut(&OPTIMIZE_SHORTCUT)) {
        action.optimize = true;
    }

    let loading = controller.status() == OptimizationStatus::Loading;

    // Laid out from the bottom so the button row and the error panel always
    // stay inside the panel; the input gets whatever height is left.
    ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
        if let Some(error) = controller.session().error_message() {
            let can_reset = controller.status() == OptimizationStatus::Error;
            if render_error(ui, error, can_reset) {
                action.reset = true;
            }
            ui.add_space(8.0);
        }

        if render_submit_row(ui, controller, loading) {
            action.optimize = true;
        }
        ui.add_space(8.0);

        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
            ui.heading("Your Rough Idea");
            ui.add_space(8.0);
            render_input(ui, controller, loading);
        });
    });

    action
}

fn render_input(ui: &mut Ui, controller: &mut OptimizerController, loading: bool) {
    let input_height = (ui.available_height() - INPUT_CHROME_HEIGHT).max(MIN_INPUT_HEIGHT);

    egui::Frame::new()
        .fill(ui.visuals().extreme_bg_color)
        .inner_margin(egui::vec2(8.0, 6.0))
        .corner_radius(4.0)
        .show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("idea_input_scroll")
                .max_height(input_height)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let text_edit = egui::TextEdit::multiline(controller.idea_text_mut())
                        .hint_text(PLACEHOLDER)
                        .desired_width(f32::INFINITY)
                        .min_size(egui::vec2(0.0, input_height));
                    ui.add_enabled(!loading, text_edit);
                });

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("{} chars", controller.session().char_count()))
                            .small()
                            .weak(),
                    );
                });
            });
        });
}

/// Pro tip and the primary button. Returns true when the button was clicked.
fn render_submit_row(ui: &mut Ui, controller: &OptimizerController, loading: bool) -> bool {
    let mut clicked = false;

    ui.horizontal(|ui| {
        let shortcut = ui.ctx().format_shortcut(&OPTIMIZE_SHORTCUT);
        ui.label(
            RichText::new(format!("Pro tip: Press {} to optimize", shortcut))
                .small()
                .weak(),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = if loading { PROCESSING_LABEL } else { OPTIMIZE_LABEL };
            let button = egui::Button::new(RichText::new(label).strong())
                .min_size(egui::vec2(140.0, 36.0))
                .fill(ui.visuals().selection.bg_fill);

            clicked = ui
                .add_enabled(controller.session().can_submit(), button)
                .clicked();
        });
    });

    clicked
}

/// Inline error panel. Returns true when "New Idea" was clicked.
fn render_error(ui: &mut Ui, error: &str, can_reset: bool) -> bool {
    let mut reset = false;

    egui::Frame::new()
        .fill(Color32::from_rgba_unmultiplied(239, 68, 68, 24))
        .stroke(egui::Stroke::new(1.0, Color32::from_rgb(239, 68, 68)))
        .inner_margin(egui::vec2(10.0, 8.0))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical(|ui| {
                ui.colored_label(Color32::from_rgb(248, 113, 113), error);
                if can_reset && ui.small_button(NEW_IDEA_LABEL).clicked() {
                    reset = true;
                }
            });
        });

    reset
}
