pub mod prompt;
pub mod request;
pub mod view;

use crate::llm::{FailureKind, LanguageModel, ModelError, ModelPrompt};

use prompt::{build_system_prompt, build_user_message, ToneDirective};
use request::{IntelRequest, RequestKind};
use view::ViewConfiguration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntelError {
    #[error("No API key configured; set PBMINTEL_OPENAI_API_KEY")]
    MissingCredential,
    #[error("Unknown request kind: {0}")]
    UnknownRequestKind(String),
    #[error(transparent)]
    Collaborator(#[from] ModelError),
}

impl IntelError {
    /// `None` for failures that never reached the model.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            IntelError::Collaborator(err) => Some(err.failure_kind()),
            _ => None,
        }
    }
}

pub type IntelResponse = Result<String, IntelError>;

/// Maps a request and the operator's view settings to one model call.
///
/// Holds no state besides the injected model handle, so identical inputs
/// always produce identical prompts.
pub struct Orchestrator<M> {
    model: M,
}

impl<M: LanguageModel> Orchestrator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn build_prompt(&self, request: &IntelRequest, config: &ViewConfiguration) -> ModelPrompt {
        ModelPrompt {
            system_prompt: build_system_prompt(request, config),
            user_message: build_user_message(request),
            max_output_tokens: None,
        }
    }

    pub async fn analyze(
        &self,
        request: &IntelRequest,
        config: &ViewConfiguration,
    ) -> IntelResponse {
        if !config.has_credential() {
            return Err(IntelError::MissingCredential);
        }

        let prompt = self.build_prompt(request, config);
        log::info!(
            "requesting {} analysis ({:?})",
            request.kind,
            ToneDirective::select(request.kind, config)
        );
        log::debug!(
            "system prompt {} chars, user message {} chars",
            prompt.system_prompt.len(),
            prompt.user_message.len()
        );

        match self.model.complete(&config.credential, &prompt).await {
            Ok(text) => Ok(text),
            Err(err) => {
                log::warn!("{} analysis failed: {}", request.kind, err);
                Err(IntelError::Collaborator(err))
            }
        }
    }

    /// Like [`Orchestrator::analyze`], for callers holding a loose string tag.
    /// The credential is still checked before the tag is parsed.
    pub async fn analyze_tag(
        &self,
        tag: &str,
        payload: &str,
        extra_instructions: Option<String>,
        config: &ViewConfiguration,
    ) -> IntelResponse {
        if !config.has_credential() {
            return Err(IntelError::MissingCredential);
        }
        let kind: RequestKind = tag.parse()?;
        let request = IntelRequest::new(kind, payload).with_extra_instructions(extra_instructions);
        self.analyze(&request, config).await
    }
}
