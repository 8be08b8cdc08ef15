//! Right-hand panel: loading indicator, then the rendered optimized prompt.

use super::controller::OptimizerController;
use super::idea_panel::NEW_IDEA_LABEL;
use crate::app::markdown::MarkdownRenderer;
use crate::app::status::OptimizationStatus;
use eframe::egui;
use egui::{Color32, RichText, ScrollArea, Ui};
use std::time::Instant;

pub const OUTPUT_HEADING: &str = "Optimized Prompt";
pub const COPY_LABEL: &str = "Copy Prompt";
pub const COPIED_LABEL: &str = "Copied";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OutputPanelAction {
    pub reset: bool,
    pub copy: bool,
}

/// Whether the output panel is shown at all for this status.
pub fn is_visible(status: OptimizationStatus) -> bool {
    matches!(
        status,
        OptimizationStatus::Loading | OptimizationStatus::Success
    )
}

pub fn render_output_panel(
    ui: &mut Ui,
    controller: &OptimizerController,
    renderer: &mut dyn MarkdownRenderer,
    now: Instant,
) -> OutputPanelAction {
    match controller.status() {
        OptimizationStatus::Loading => {
            render_loading(ui);
            OutputPanelAction::default()
        }
        OptimizationStatus::Success => render_result(ui, controller, renderer, now),
        OptimizationStatus::Idle | OptimizationStatus::Error => OutputPanelAction::default(),
    }
}

fn render_loading(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.3);
        ui.add(egui::Spinner::new().size(40.0));
        ui.add_space(12.0);
        ui.label(RichText::new("Structuring your idea...").strong());
        ui.label(
            RichText::new("Applying prompt engineering best practices")
                .small()
                .weak(),
        );
    });
}

fn render_result(
    ui: &mut Ui,
    controller: &OptimizerController,
    renderer: &mut dyn MarkdownRenderer,
    now: Instant,
) -> OutputPanelAction {
    let mut action = OutputPanelAction::default();
    let copied = controller.copy_confirmation().is_visible(now);

    ui.horizontal(|ui| {
        ui.heading(OUTPUT_HEADING);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let copy_button = if copied {
                egui::Button::new(
                    RichText::new(format!("✔ {}", COPIED_LABEL))
                        .color(Color32::from_rgb(52, 211, 153)),
                )
            } else {
                egui::Button::new(RichText::new(COPY_LABEL).strong())
                    .fill(ui.visuals().selection.bg_fill)
            };
            if ui.add(copy_button).clicked() {
                action.copy = true;
            }

            if ui.button(NEW_IDEA_LABEL).clicked() {
                action.reset = true;
            }
        });
    });

    ui.add_space(8.0);

    // Frame margins plus the paste note below the scroll area.
    let note_height = 52.0;
    egui::Frame::new()
        .fill(ui.visuals().extreme_bg_color)
        .inner_margin(egui::vec2(12.0, 10.0))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ScrollArea::vertical()
                .id_salt("optimized_prompt_scroll")
                .auto_shrink([false, false])
                .max_height((ui.available_height() - note_height).max(80.0))
                .show(ui, |ui| {
                    renderer.show(ui, controller.session().optimized_text());
                });
        });

    ui.add_space(6.0);
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new(
                "This output is ready to be pasted into ChatGPT, Gemini, Claude, or your codebase.",
            )
            .small()
            .weak(),
        );
    });

    action
}
