//! Anthropic Messages API adapter.

use async_trait::async_trait;
use serde_json::json;

use crate::provider::ChatProvider;
use parley_types::{ParleyError, Result};

// ---------------------------------------------------------------------------
// AnthropicProvider
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl AnthropicProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: "https://api.anthropic.com".to_string(),
            model: "claude-sonnet-4-5-20250929".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn from_env() -> Result<Self> {
        let key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| ParleyError::Auth {
            provider: "anthropic".into(),
        })?;
        Ok(Self::new(key))
    }
}

fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "max_tokens": 1024,
            "system": system,
            "messages": [{ "role": "user", "content": user }],
        });

        let resp = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ParleyError::Provider {
                provider: "anthropic".into(),
                status: 0,
                message: e.to_string(),
            })?;

        let status = resp.status();
        let response_body = resp.text().await.map_err(|e| ParleyError::Provider {
            provider: "anthropic".into(),
            status: 0,
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(ParleyError::Provider {
                provider: "anthropic".into(),
                status: status.as_u16(),
                message: extract_error_message(&response_body),
            });
        }

        let parsed: serde_json::Value =
            serde_json::from_str(&response_body).map_err(|e| ParleyError::Provider {
                provider: "anthropic".into(),
                status: status.as_u16(),
                message: format!("Failed to parse response JSON: {e}"),
            })?;

        // Concatenate all text blocks from the reply.
        let text = parsed["content"]
            .as_array()
            .map(|blocks| {
                blocks
                    .iter()
                    .filter_map(|b| b["text"].as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(text)
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_without_key_fails_with_auth_error() {
        std::env::remove_var("ANTHROPIC_API_KEY");
        let result = AnthropicProvider::from_env();
        assert!(matches!(result, Err(ParleyError::Auth { .. })));
    }

    #[test]
    fn builder_overrides_apply() {
        let provider = AnthropicProvider::new("key".into())
            .with_base_url("http://localhost:9999".into())
            .with_model("claude-haiku-4-5-20251001".into());
        assert_eq!(provider.base_url, "http://localhost:9999");
        assert_eq!(provider.model, "claude-haiku-4-5-20251001");
        assert_eq!(provider.name(), "anthropic");
    }

    #[test]
    fn extract_error_message_prefers_api_shape() {
        let body = r#"{"error": {"type": "overloaded_error", "message": "Overloaded"}}"#;
        assert_eq!(extract_error_message(body), "Overloaded");
        assert_eq!(extract_error_message("plain text"), "plain text");
    }
}
