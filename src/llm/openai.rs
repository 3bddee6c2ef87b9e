use std::sync::Mutex;

use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::openai;

use super::{classify_failure, LanguageModel, ModelError, ModelPrompt};

/// [`LanguageModel`] backed by the OpenAI chat API through rig.
///
/// The rig client is built lazily and reused for as long as the credential
/// stays the same.
pub struct OpenAiModel {
    model: String,
    client: Mutex<Option<(String, openai::Client)>>,
}

impl OpenAiModel {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            client: Mutex::new(None),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn client_for(&self, credential: &str) -> Result<openai::Client, ModelError> {
        let mut guard = self
            .client
            .lock()
            .map_err(|_| ModelError::Other("OpenAI client cache poisoned".to_string()))?;
        if let Some((cached_key, client)) = guard.as_ref() {
            if cached_key == credential {
                return Ok(client.clone());
            }
        }

        log::debug!("building OpenAI client for model {}", self.model);
        let client = openai::Client::new(credential).map_err(|err| {
            ModelError::Other(format!("Failed to build OpenAI client: {}", err))
        })?;
        *guard = Some((credential.to_string(), client.clone()));
        Ok(client)
    }
}

impl LanguageModel for OpenAiModel {
    async fn complete(&self, credential: &str, prompt: &ModelPrompt) -> Result<String, ModelError> {
        let client = self.client_for(credential)?;

        let mut builder = client.agent(&self.model).preamble(&prompt.system_prompt);
        if let Some(max_tokens) = prompt.max_output_tokens {
            builder = builder.max_tokens(max_tokens);
        }
        let agent = builder.build();

        agent
            .prompt(prompt.user_message.as_str())
            .await
            .map_err(|err| classify_failure(err.to_string()))
    }
}
