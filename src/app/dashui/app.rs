use super::controller::OptimizerController;
use super::header::render_header;
use super::idea_panel::render_idea_panel;
use super::output_panel::{self, render_output_panel};
use crate::app::clipboard::{ClipboardWriter, SystemClipboard};
use crate::app::config::AppConfig;
use crate::app::markdown::{CommonMarkRenderer, MarkdownRenderer};
use crate::app::optimizer::{GeminiClient, PromptOptimizer};
use crate::app::status::OptimizationStatus;
use crate::trace_info;
use eframe::egui;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Repaint interval while a request is in flight, so the result is picked up.
const LOADING_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

#[derive(serde::Deserialize, serde::Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ThemeChoice {
    Latte,
    Frappe,
    Macchiato,
    #[default]
    Mocha,
}

impl ThemeChoice {
    pub const ALL: [ThemeChoice; 4] = [
        ThemeChoice::Latte,
        ThemeChoice::Frappe,
        ThemeChoice::Macchiato,
        ThemeChoice::Mocha,
    ];
}

impl std::fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeChoice::Latte => write!(f, "Latte"),
            ThemeChoice::Frappe => write!(f, "Frappe"),
            ThemeChoice::Macchiato => write!(f, "Macchiato"),
            ThemeChoice::Mocha => write!(f, "Mocha"),
        }
    }
}

pub struct PromptApp {
    pub theme: ThemeChoice,
    pub controller: OptimizerController,
    renderer: Box<dyn MarkdownRenderer>,
    clipboard: Box<dyn ClipboardWriter>,
    theme_applied: bool,
}

impl PromptApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            tracing::warn!(
                "No API key found in ${} or ${}; optimization will fail until one is set",
                config.api_key_env,
                crate::app::config::FALLBACK_API_KEY_ENV
            );
        }

        let generator = Arc::new(GeminiClient::new(&config.endpoint, &config.model));
        let optimizer = PromptOptimizer::new(generator, api_key);
        trace_info!("Prompt optimizer ready: {:?}", optimizer);

        Self::with_parts(
            OptimizerController::new(optimizer),
            config.theme,
            Box::new(CommonMarkRenderer::new()),
            Box::new(SystemClipboard::new()),
        )
    }

    /// Assemble the app from already-built parts.
    pub fn with_parts(
        controller: OptimizerController,
        theme: ThemeChoice,
        renderer: Box<dyn MarkdownRenderer>,
        clipboard: Box<dyn ClipboardWriter>,
    ) -> Self {
        Self {
            theme,
            controller,
            renderer,
            clipboard,
            theme_applied: false,
        }
    }

    fn apply_theme(&self, ctx: &egui::Context) {
        match self.theme {
            ThemeChoice::Latte => catppuccin_egui::set_theme(ctx, catppuccin_egui::LATTE),
            ThemeChoice::Frappe => catppuccin_egui::set_theme(ctx, catppuccin_egui::FRAPPE),
            ThemeChoice::Macchiato => catppuccin_egui::set_theme(ctx, catppuccin_egui::MACCHIATO),
            ThemeChoice::Mocha => catppuccin_egui::set_theme(ctx, catppuccin_egui::MOCHA),
        }
    }

    /// Render one frame. `eframe::App::update` delegates here.
    pub fn ui(&mut self, ctx: &egui::Context) {
        if !self.theme_applied {
            self.apply_theme(ctx);
            self.theme_applied = true;
        }

        self.controller.poll();
        let now = Instant::now();

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::vec2(16.0, 12.0)))
            .show(ctx, |ui| {
                let model_id = self.controller.model_id().to_string();
                if render_header(ui, &model_id, &mut self.theme) {
                    trace_info!("Theme changed to {}", self.theme);
                    self.apply_theme(ui.ctx());
                }
            });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new("Build better inputs for better outputs.")
                        .small()
                        .weak(),
                );
                ui.add_space(4.0);
            });
        });

        let mut optimize = false;
        let mut reset = false;
        let mut copy = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            if output_panel::is_visible(self.controller.status()) {
                ui.columns(2, |columns| {
                    let idea = render_idea_panel(&mut columns[0], &mut self.controller);
                    let output = render_output_panel(
                        &mut columns[1],
                        &self.controller,
                        self.renderer.as_mut(),
                        now,
                    );
                    optimize = idea.optimize;
                    reset = idea.reset || output.reset;
                    copy = output.copy;
                });
            } else {
                let width = ui.available_width().min(720.0);
                ui.vertical_centered(|ui| {
                    ui.set_max_width(width);
                    let idea = render_idea_panel(ui, &mut self.controller);
                    optimize = idea.optimize;
                    reset = idea.reset;
                });
            }
        });

        if optimize {
            self.controller.submit();
        }
        if reset {
            self.controller.reset();
        }
        if copy {
            self.controller.copy_output(self.clipboard.as_mut(), now);
        }

        if self.controller.status() == OptimizationStatus::Loading {
            ctx.request_repaint_after(LOADING_REPAINT_INTERVAL);
        }
        if let Some(left) = self.controller.copy_confirmation().remaining(Instant::now()) {
            ctx.request_repaint_after(left);
        }
    }
}

impl eframe::App for PromptApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
