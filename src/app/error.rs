//! Error types for the optimization flow.
//!
//! Every failure the user can see ends up as an [`OptimizeError`]; its
//! `Display` output is the message shown in the error panel.

use thiserror::Error;

/// Failures raised while talking to the text-generation provider.
///
/// Authentication, quota and network problems are not told apart in the UI;
/// each variant simply carries the provider's own wording.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Malformed response from provider: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("API Key is missing. Please check your environment configuration.")]
    MissingCredential,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("No response generated from the model.")]
    EmptyResponse,

    #[error("Failed to start background runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl OptimizeError {
    /// True for errors raised before any network attempt was made.
    pub fn is_configuration(&self) -> bool {
        matches!(self, OptimizeError::MissingCredential)
    }
}

#[derive(Debug, Error)]
#[error("Clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid provider endpoint '{endpoint}': {source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
}
