//! Optimizer controller.
//!
//! Owns the [`SessionState`] and the single in-flight request. The provider
//! call runs on its own thread with a dedicated Tokio runtime (egui runs on a
//! blocking thread) and reports back over an mpsc channel that is drained by
//! [`OptimizerController::poll`] once per frame.

use crate::app::clipboard::ClipboardWriter;
use crate::app::error::OptimizeError;
use crate::app::optimizer::PromptOptimizer;
use crate::app::status::{CopyConfirmation, OptimizationStatus, SessionState};
use crate::{trace_error, trace_info, trace_warn};
use std::sync::mpsc;
use std::time::Instant;

/// Result delivered by the background request thread.
type OptimizeResult = Result<String, OptimizeError>;

pub struct OptimizerController {
    session: SessionState,
    optimizer: PromptOptimizer,
    copy_confirmation: CopyConfirmation,
    pending: Option<mpsc::Receiver<OptimizeResult>>,
}

impl OptimizerController {
    pub fn new(optimizer: PromptOptimizer) -> Self {
        Self {
            session: SessionState::new(),
            optimizer,
            copy_confirmation: CopyConfirmation::default(),
            pending: None,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn status(&self) -> OptimizationStatus {
        self.session.status()
    }

    pub fn idea_text_mut(&mut self) -> &mut String {
        self.session.idea_text_mut()
    }

    pub fn set_idea_text(&mut self, text: impl Into<String>) {
        self.session.set_idea_text(text);
    }

    pub fn model_id(&self) -> &str {
        self.optimizer.model_id()
    }

    pub fn has_request_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Start an optimization for the current idea.
    ///
    /// Returns false when nothing was started (blank idea or a request
    /// already running). A missing API key is reported straight away
    /// without spawning anything.
    pub fn submit(&mut self) -> bool {
        let Some(idea) = self.session.begin() else {
            return false;
        };

        if !self.optimizer.is_configured() {
            trace_warn!("Optimize requested but no API key is configured");
            self.session.fail(OptimizeError::MissingCredential.to_string());
            return true;
        }

        trace_info!("Submitting idea for optimization");
        let (sender, receiver) = mpsc::channel();
        let optimizer = self.optimizer.clone();

        std::thread::spawn(move || {
            let result = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime.block_on(async move { optimizer.optimize(&idea).await }),
                Err(e) => Err(OptimizeError::from(e)),
            };

            // The controller may be gone by now; nothing to do then.
            let _ = sender.send(result);
        });

        self.pending = Some(receiver);
        true
    }

    /// Pick up the background result, if it has arrived.
    pub fn poll(&mut self) {
        let Some(receiver) = &self.pending else {
            return;
        };

        match receiver.try_recv() {
            Ok(Ok(text)) => {
                trace_info!("Optimization succeeded");
                self.session.complete(text);
                self.pending = None;
            }
            Ok(Err(e)) => {
                if e.is_configuration() {
                    trace_warn!("Optimization not attempted: {}", e);
                } else {
                    trace_error!("Optimization failed: {}", e);
                }
                self.session.fail(e.to_string());
                self.pending = None;
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                trace_warn!("Optimization worker exited without a result");
                self.session.fail(String::new());
                self.pending = None;
            }
        }
    }

    /// Back to the input view, keeping the idea text.
    pub fn reset(&mut self) -> bool {
        self.session.reset()
    }

    /// Copy the optimized prompt. Failures are logged and otherwise ignored.
    pub fn copy_output(&mut self, clipboard: &mut dyn ClipboardWriter, now: Instant) -> bool {
        if self.session.status() != OptimizationStatus::Success {
            return false;
        }

        match clipboard.write_text(self.session.optimized_text()) {
            Ok(()) => {
                self.copy_confirmation.mark(now);
                true
            }
            Err(e) => {
                trace_warn!("Failed to copy: {}", e);
                false
            }
        }
    }

    pub fn copy_confirmation(&self) -> &CopyConfirmation {
        &self.copy_confirmation
    }
}
