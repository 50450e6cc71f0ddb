use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

#[cfg(test)]
use mockall::automock;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    services::retrieval_service::Retriever,
};

/// One-shot text generation grounded in retrieved documents.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TextGenerationService: Send + Sync {
    async fn respond_with_docs(
        &self,
        description: &str,
        audience: &str,
        extra: &str,
        prompt: &str,
        retriever: &Retriever,
    ) -> AppResult<String>;
}

pub struct OpenAiTextGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAiTextGenerator {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.openai_api_key.expose_secret())
            .with_api_base(&config.openai_api_base);

        Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
            temperature: config.openai_temperature,
        }
    }

    fn build_request(&self, system_message: &str, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [
                { "role": "system", "content": system_message },
                { "role": "user", "content": prompt }
            ]
        })
    }
}

/// Stuffs the retrieved passages into the system message, after the
/// generator's own description and audience.
pub fn build_system_message(
    description: &str,
    audience: &str,
    extra: &str,
    retriever: &Retriever,
) -> String {
    let mut message = description.trim().to_string();

    if !audience.trim().is_empty() {
        message.push_str(&format!("\n\nYou are speaking with a {}.", audience.trim()));
    }
    if !extra.trim().is_empty() {
        message.push_str("\n\n");
        message.push_str(extra.trim());
    }

    message.push_str(
        "\n\nAnswer any user questions based solely on the context below:\n\n<context>\n",
    );
    message.push_str(&retriever.context());
    message.push_str("\n</context>");
    message
}

/// Pulls the first choice's message text out of a chat completion body.
pub fn extract_completion_text(response: &Value) -> AppResult<String> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| {
            AppError::GenerationError("Completion response contained no message content".to_string())
        })
}

#[async_trait]
impl TextGenerationService for OpenAiTextGenerator {
    async fn respond_with_docs(
        &self,
        description: &str,
        audience: &str,
        extra: &str,
        prompt: &str,
        retriever: &Retriever,
    ) -> AppResult<String> {
        let system_message = build_system_message(description, audience, extra, retriever);
        let request = self.build_request(&system_message, prompt);

        log::debug!(
            "Requesting completion from model {} with {} context documents ({} search)",
            self.model,
            retriever.documents().len(),
            retriever.mode()
        );

        let response: Value = self.client.chat().create_byot(request).await?;
        extract_completion_text(&response)
    }
}
