//! LLM completion adapter for an OpenAI-compatible chat API.

use super::{build_client, truncate_body, LlmProvider, SourceFailure, SourceResult};
use crate::config::LlmSettings;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

/// Adapter for a Cerebras-hosted (OpenAI-compatible) chat-completion API.
pub struct LlmSource {
    client: reqwest::Client,
    settings: LlmSettings,
}

impl LlmSource {
    pub fn new(settings: &LlmSettings) -> Self {
        Self {
            client: build_client(settings.timeout_seconds),
            settings: settings.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[async_trait]
impl LlmProvider for LlmSource {
    async fn complete(&self, query: &str) -> SourceResult<String> {
        let Some(api_key) = self.settings.api_key.as_deref() else {
            return Err(SourceFailure::config(
                "LLM API key not configured (set CEREBRAS_API_KEY)",
            ));
        };

        let body = json!({
            "model": self.settings.model,
            "messages": [{ "role": "user", "content": query }],
            "max_tokens": self.settings.max_tokens,
            "temperature": self.settings.temperature,
            "stream": false,
        });

        debug!(model = %self.settings.model, "requesting LLM completion");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.settings.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(SourceFailure::from_request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                body = truncate_body(&body, 200),
                "LLM API error"
            );
            return Err(SourceFailure::upstream(
                Some(status.as_u16()),
                format!("LLM API error: {}", status.as_u16()),
            ));
        }

        let payload: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| SourceFailure::upstream(None, format!("Malformed LLM response: {}", e)))?;

        payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| SourceFailure::upstream(None, "LLM response contained no choices"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::FailureKind;

    fn settings_without_key() -> LlmSettings {
        LlmSettings {
            api_key: None,
            ..LlmSettings::default()
        }
    }

    #[tokio::test]
    async fn missing_key_fails_fast_with_config_error() {
        let source = LlmSource::new(&settings_without_key());
        let err = source.complete("rust ownership").await.unwrap_err();
        assert_eq!(err.kind, FailureKind::Config);
        assert!(err.message.contains("CEREBRAS_API_KEY"));
    }

    #[test]
    fn first_choice_content_is_extracted() {
        let raw = serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "# Ownership\nRust enforces..." } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        });
        let payload: ChatCompletionResponse = serde_json::from_value(raw).unwrap();
        let answer = payload.choices.into_iter().next().unwrap().message.content;
        assert_eq!(answer, "# Ownership\nRust enforces...");
    }

    #[test]
    fn empty_choices_deserializes_to_empty_vec() {
        let payload: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(payload.choices.is_empty());
    }
}
