//! Core application modules for Prompt Architect.
//!
//! # Module Organization
//!
//! - [`status`] - session state machine and the copy confirmation flag
//! - [`optimizer`] - the prompt optimization client and the Gemini provider
//! - [`dashui`] - egui user interface and the controller that drives it
//! - [`config`] - `config.toml` and environment configuration
//! - [`error`] - error taxonomy shared by the modules above
//! - [`clipboard`] - fallible clipboard access
//! - [`markdown`] - Markdown rendering for the optimized prompt

pub mod clipboard;
pub mod config;
pub mod dashui;
pub mod error;
pub mod markdown;
pub mod optimizer;
pub mod status;

pub use dashui::app::PromptApp;
