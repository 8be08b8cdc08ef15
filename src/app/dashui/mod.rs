//! Desktop user interface for Prompt Architect.
//!
//! The window has three regions: a header (title, model badge, theme
//! selector), the idea panel on the left and, while a request is running or
//! after it succeeded, the output panel on the right. All state lives in
//! [`controller::OptimizerController`]; the panel functions take it by
//! reference and return the actions the user triggered, which
//! [`app::PromptApp`] applies after the frame is laid out.
//!
//! # Theme Support
//! - Latte, Frappe, Macchiato and Mocha color schemes via Catppuccin,
//!   chosen in `config.toml` or from the header for the current run.

pub mod app;
pub mod controller;
pub mod header;
pub mod idea_panel;
pub mod output_panel;

pub use app::{PromptApp, ThemeChoice};
pub use controller::OptimizerController;
