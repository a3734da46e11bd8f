//! Chat provider trait and dynamic dispatch wrapper.
//!
//! The interview oracle only ever needs one completion shape: a system
//! prompt plus a single user message in, raw completion text out. Providers
//! implement that and nothing more.

use async_trait::async_trait;

use parley_types::{ParleyError, Result};

// ---------------------------------------------------------------------------
// ChatProvider
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Run one completion and return the raw text of the reply.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;

    /// Provider name used in error messages and logs.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// DynProvider — object-safe wrapper
// ---------------------------------------------------------------------------

pub struct DynProvider(Box<dyn ChatProvider>);

impl DynProvider {
    pub fn new(provider: impl ChatProvider + 'static) -> Self {
        Self(Box::new(provider))
    }

    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        self.0.complete(system, user).await
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }
}

/// Build a provider from environment variables, preferring Anthropic.
///
/// Checks `ANTHROPIC_API_KEY` first, then `OPENAI_API_KEY`.
pub fn provider_from_env() -> Result<DynProvider> {
    if let Ok(adapter) = crate::AnthropicProvider::from_env() {
        return Ok(DynProvider::new(adapter));
    }
    if let Ok(adapter) = crate::OpenAiProvider::from_env() {
        return Ok(DynProvider::new(adapter));
    }
    Err(ParleyError::Other(
        "No LLM provider API keys found in environment".to_string(),
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoProvider;

    #[async_trait]
    impl ChatProvider for EchoProvider {
        async fn complete(&self, _system: &str, user: &str) -> Result<String> {
            Ok(format!("echo: {user}"))
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn dyn_provider_delegates() {
        let provider = DynProvider::new(EchoProvider);
        assert_eq!(provider.name(), "echo");
        let text = provider.complete("sys", "hello").await.unwrap();
        assert_eq!(text, "echo: hello");
    }

    #[test]
    fn from_env_with_no_keys_returns_error() {
        std::env::remove_var("ANTHROPIC_API_KEY");
        std::env::remove_var("OPENAI_API_KEY");

        let result = provider_from_env();
        assert!(result.is_err());
        assert!(result
            .err()
            .unwrap()
            .to_string()
            .contains("No LLM provider API keys"));
    }
}
