//! Prompt Architect - turns a rough idea into a structured prompt
//!
//! The user types a short, unstructured idea; the application sends it to a
//! hosted Gemini model together with a fixed prompt-engineering instruction
//! and shows the returned Markdown as an optimized prompt ready to paste into
//! another AI tool.
//!
//! # Architecture Overview
//!
//! - **UI Layer** ([`app::dashui`]): egui desktop interface and the
//!   [`app::dashui::OptimizerController`] that owns the session state
//! - **Optimization Client** ([`app::optimizer`]): one request per
//!   submission, behind the [`app::optimizer::TextGenerator`] trait
//! - **Status Model** ([`app::status`]): Idle / Loading / Success / Error
//!
//! The provider call runs on a background thread with its own Tokio runtime;
//! the UI thread polls for the result every frame, so the window keeps
//! rendering while a request is in flight. At most one request is in flight
//! at a time.

#![warn(clippy::all, rust_2018_idioms)]

// Include logging macros first
#[macro_use]
pub mod logging_macros;

pub mod app;
pub use app::PromptApp;
