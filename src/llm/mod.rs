pub mod openai;

use std::future::Future;

/// A single, self-contained exchange with the model. No history is carried
/// between prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPrompt {
    pub system_prompt: String,
    pub user_message: String,
    pub max_output_tokens: Option<u64>,
}

/// Coarse failure categories a caller can render differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Authentication,
    Quota,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Authentication rejected by model provider: {0}")]
    Authentication(String),
    #[error("Model provider quota exhausted: {0}")]
    QuotaExhausted(String),
    #[error("Model request failed: {0}")]
    Other(String),
}

impl ModelError {
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            ModelError::Authentication(_) => FailureKind::Authentication,
            ModelError::QuotaExhausted(_) => FailureKind::Quota,
            ModelError::Other(_) => FailureKind::Generic,
        }
    }
}

// Each marker is a sequence of whole tokens, matched against the message
// split on anything that is not alphanumeric or `_`.
const AUTH_MARKERS: &[&str] = &[
    "401",
    "invalid_api_key",
    "incorrect api key",
    "invalid api key",
    "unauthorized",
    "authentication",
];

const QUOTA_MARKERS: &[&str] = &[
    "429",
    "insufficient_quota",
    "quota",
    "rate limit",
    "rate_limit_exceeded",
    "too many requests",
];

fn tokenize(message: &str) -> Vec<String> {
    message
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
        .collect()
}

fn contains_marker(tokens: &[String], marker: &str) -> bool {
    let wanted = marker.split(' ').collect::<Vec<_>>();
    tokens
        .windows(wanted.len())
        .any(|window| window.iter().zip(&wanted).all(|(token, want)| token.as_str() == *want))
}

/// Sorts a provider error message into a [`ModelError`] by inspecting its text.
///
/// Status codes only count as standalone tokens, so digits inside token
/// counts or request ids never match. Quota markers are checked before
/// authentication markers.
pub fn classify_failure(message: impl Into<String>) -> ModelError {
    let message = message.into();
    let tokens = tokenize(&message);
    if QUOTA_MARKERS.iter().any(|marker| contains_marker(&tokens, marker)) {
        ModelError::QuotaExhausted(message)
    } else if AUTH_MARKERS.iter().any(|marker| contains_marker(&tokens, marker)) {
        ModelError::Authentication(message)
    } else {
        ModelError::Other(message)
    }
}

/// The language-model collaborator: one prompt in, generated text out.
///
/// The credential is supplied per call so a long-lived handle can follow the
/// operator changing keys mid-session.
pub trait LanguageModel: Send + Sync {
    fn complete(
        &self,
        credential: &str,
        prompt: &ModelPrompt,
    ) -> impl Future<Output = Result<String, ModelError>> + Send;
}
