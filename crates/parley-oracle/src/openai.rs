//! OpenAI Chat Completions adapter.

use async_trait::async_trait;
use serde_json::json;

use crate::provider::ChatProvider;
use parley_types::{ParleyError, Result};

// ---------------------------------------------------------------------------
// OpenAiProvider
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o".to_string(),
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
        let key = std::env::var("OPENAI_API_KEY").map_err(|_| ParleyError::Auth {
            provider: "openai".into(),
        })?;
        Ok(Self::new(key))
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        let resp = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ParleyError::Provider {
                provider: "openai".into(),
                status: 0,
                message: e.to_string(),
            })?;

        let status = resp.status();
        let response_body = resp.text().await.map_err(|e| ParleyError::Provider {
            provider: "openai".into(),
            status: 0,
            message: e.to_string(),
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&response_body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(String::from))
                .unwrap_or(response_body);
            return Err(ParleyError::Provider {
                provider: "openai".into(),
                status: status.as_u16(),
                message,
            });
        }

        let parsed: serde_json::Value =
            serde_json::from_str(&response_body).map_err(|e| ParleyError::Provider {
                provider: "openai".into(),
                status: status.as_u16(),
                message: format!("Failed to parse response JSON: {e}"),
            })?;

        let text = parsed["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string();

        Ok(text)
    }

    fn name(&self) -> &str {
        "openai"
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
        std::env::remove_var("OPENAI_API_KEY");
        let result = OpenAiProvider::from_env();
        assert!(matches!(result, Err(ParleyError::Auth { .. })));
    }

    #[test]
    fn builder_overrides_apply() {
        let provider = OpenAiProvider::new("key".into())
            .with_base_url("http://localhost:9999".into())
            .with_model("gpt-4o-mini".into());
        assert_eq!(provider.base_url, "http://localhost:9999");
        assert_eq!(provider.model, "gpt-4o-mini");
        assert_eq!(provider.name(), "openai");
    }
}
