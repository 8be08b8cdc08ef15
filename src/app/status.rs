//! Session state for the optimizer window.
//!
//! [`SessionState`] is the single state container behind the UI. The
//! controller drives it through [`SessionState::begin`],
//! [`SessionState::complete`], [`SessionState::fail`] and
//! [`SessionState::reset`]; the render functions only read it (apart from the
//! idea text, which the textarea edits in place).

use std::time::{Duration, Instant};

/// Message shown when a failure carries no text of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to optimize prompt. Please try again.";

/// How long the "Copied" confirmation stays visible.
pub const COPY_CONFIRMATION_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimizationStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    idea_text: String,
    optimized_text: String,
    error_message: Option<String>,
    status: OptimizationStatus,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> OptimizationStatus {
        self.status
    }

    pub fn idea_text(&self) -> &str {
        &self.idea_text
    }

    pub fn idea_text_mut(&mut self) -> &mut String {
        &mut self.idea_text
    }

    pub fn set_idea_text(&mut self, text: impl Into<String>) {
        self.idea_text = text.into();
    }

    pub fn optimized_text(&self) -> &str {
        &self.optimized_text
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == OptimizationStatus::Loading
    }

    /// Character count shown under the textarea, in Unicode scalar values.
    ///
    /// Characters outside the Basic Multilingual Plane (most emoji) count
    /// once, not as two UTF-16 units.
    pub fn char_count(&self) -> usize {
        self.idea_text.chars().count()
    }

    /// Whether the primary action is enabled.
    pub fn can_submit(&self) -> bool {
        !self.idea_text.trim().is_empty() && !self.is_loading()
    }

    /// Move to Loading and hand back the text to submit.
    ///
    /// Returns `None` without touching anything when the idea is blank or a
    /// request is already in flight.
    pub fn begin(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.error_message = None;
        self.status = OptimizationStatus::Loading;
        Some(self.idea_text.clone())
    }

    pub fn complete(&mut self, text: String) {
        self.optimized_text = text;
        self.status = OptimizationStatus::Success;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.error_message = Some(if message.is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        });
        self.status = OptimizationStatus::Error;
    }

    /// Back to Idle, dropping output and error but keeping the idea so it can
    /// be revised. Ignored while a request is in flight.
    pub fn reset(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.status = OptimizationStatus::Idle;
        self.optimized_text.clear();
        self.error_message = None;
        true
    }
}

/// Transient "Copied" flag, independent of [`OptimizationStatus`].
#[derive(Debug, Clone)]
pub struct CopyConfirmation {
    copied_at: Option<Instant>,
    duration: Duration,
}

impl Default for CopyConfirmation {
    fn default() -> Self {
        Self::new(COPY_CONFIRMATION_DURATION)
    }
}

impl CopyConfirmation {
    pub fn new(duration: Duration) -> Self {
        Self {
            copied_at: None,
            duration,
        }
    }

    pub fn mark(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.remaining(now).is_some()
    }

    /// Time left before the flag drops back to false.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let copied_at = self.copied_at?;
        let elapsed = now.saturating_duration_since(copied_at);
        self.duration
            .checked_sub(elapsed)
            .filter(|left| !left.is_zero())
    }
}
