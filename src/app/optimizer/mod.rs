//! Prompt optimization client.
//!
//! [`PromptOptimizer::optimize`] wraps a raw idea in an [`OptimizationRequest`]
//! carrying the fixed [`SYSTEM_INSTRUCTION`] and [`TEMPERATURE`], sends it
//! through a [`TextGenerator`] and returns the text unchanged. One call, one
//! request: there are no retries, no local timeout and no streaming.

pub mod gemini;

pub use gemini::GeminiClient;

use crate::app::error::{OptimizeError, ProviderError};
use crate::logging_macros::preview;
use crate::{trace_error, trace_info};
use async_trait::async_trait;
use std::sync::Arc;

/// Ruleset sent with every request.
pub const SYSTEM_INSTRUCTION: &str = r#"
You are a world-class Senior Prompt Engineer and Technical Communicator.
Your goal is to take a rough "Idea" from a user and rewrite it into a clear, polished, professional, and well-structured prompt suitable for advanced AI models (like Gemini, GPT-4, Claude) or for clear developer specifications.

Input Format:
The user will provide a raw string containing a rough concept, question, or task.

Your Task:
1. Analyze the user's intent.
2. Improve clarity, grammar, and flow without altering the core meaning.
3. Expand on missing but logically implied details (e.g., if it's a coding task, specify strict typing or error handling; if it's creative writing, specify tone).
4. Organize the output into a clean structure. Recommended structure:
   - **Role/Persona**: Who is acting?
   - **Context**: Background information.
   - **Task**: The specific action to take.
   - **Constraints/Requirements**: Limitations or specific rules.
   - **Output Format**: How the result should look.

Output Rules:
- Return ONLY the optimized prompt content.
- Do not include conversational filler like "Here is your prompt".
- Use Markdown formatting (bolding keys, bullet points) for readability.
"#;

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f32 = 0.7;

/// Provider credential. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationRequest {
    pub instruction: &'static str,
    pub user_text: String,
    pub temperature: f32,
}

impl OptimizationRequest {
    pub fn new(user_text: impl Into<String>) -> Self {
        Self {
            instruction: SYSTEM_INSTRUCTION,
            user_text: user_text.into(),
            temperature: TEMPERATURE,
        }
    }
}

/// A hosted text-completion provider.
///
/// `Ok(None)` means the call went through but produced no text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        api_key: &ApiKey,
        request: &OptimizationRequest,
    ) -> Result<Option<String>, ProviderError>;

    fn model_id(&self) -> &str;
}

#[derive(Clone)]
pub struct PromptOptimizer {
    generator: Arc<dyn TextGenerator>,
    api_key: Option<ApiKey>,
}

impl std::fmt::Debug for PromptOptimizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptOptimizer")
            .field("model", &self.generator.model_id())
            .field("api_key", &self.api_key)
            .finish()
    }
}

impl PromptOptimizer {
    pub fn new(generator: Arc<dyn TextGenerator>, api_key: Option<ApiKey>) -> Self {
        Self { generator, api_key }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model_id(&self) -> &str {
        self.generator.model_id()
    }

    pub async fn optimize(&self, idea: &str) -> Result<String, OptimizeError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            trace_error!("Optimization requested without an API key");
            OptimizeError::MissingCredential
        })?;

        let request = OptimizationRequest::new(idea);
        trace_info!(
            "Optimizing idea ({} chars) with model {}: \"{}\"",
            idea.chars().count(),
            self.generator.model_id(),
            preview(idea, 20)
        );

        let text = self
            .generator
            .generate(api_key, &request)
            .await
            .map_err(|e| {
                trace_error!("Provider call failed: {}", e);
                OptimizeError::from(e)
            })?;

        match text {
            Some(text) if !text.is_empty() => {
                trace_info!("Received optimized prompt, length: {}", text.len());
                Ok(text)
            }
            _ => {
                trace_error!("Provider returned no text");
                Err(OptimizeError::EmptyResponse)
            }
        }
    }
}
