//! Markdown rendering for the optimized prompt.

use egui::Ui;
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};

/// Something that can draw Markdown into a `Ui`.
pub trait MarkdownRenderer {
    fn show(&mut self, ui: &mut Ui, markdown: &str);
}

/// `egui_commonmark` renderer. Headings, lists, bold text and code spans get
/// their own styling from the active theme.
#[derive(Default)]
pub struct CommonMarkRenderer {
    cache: CommonMarkCache,
}

impl CommonMarkRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MarkdownRenderer for CommonMarkRenderer {
    fn show(&mut self, ui: &mut Ui, markdown: &str) {
        CommonMarkViewer::new().show(ui, &mut self.cache, markdown);
    }
}
