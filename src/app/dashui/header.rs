use super::app::ThemeChoice;
use eframe::egui;
use egui::{RichText, Ui};

pub const APP_TITLE: &str = "Prompt Architect";

/// Title, model badge and theme selector. Returns true when the theme changed.
pub fn render_header(ui: &mut Ui, model_id: &str, theme: &mut ThemeChoice) -> bool {
    let previous = *theme;

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(APP_TITLE).size(20.0).strong());
            ui.label(RichText::new("AI-Powered Prompt Optimizer").small().weak());
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            egui::ComboBox::from_id_salt("theme_choice")
                .selected_text(theme.to_string())
                .show_ui(ui, |ui| {
                    for choice in ThemeChoice::ALL {
                        ui.selectable_value(theme, choice, choice.to_string());
                    }
                });

            ui.label(RichText::new(format!("Powered by {}", model_id)).small())
                .on_hover_text(format!(
                    "{} {} ({}@{})",
                    APP_TITLE,
                    env!("CARGO_PKG_VERSION"),
                    env!("GIT_BRANCH"),
                    env!("GIT_COMMIT")
                ));
        });
    });

    *theme != previous
}
