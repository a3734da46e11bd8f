//! The `Oracle` trait and its provider-backed implementation.
//!
//! Five call sites, each a typed request in and a typed result out. The
//! provider-backed implementation renders the prompt pair, runs the chat
//! completion, extracts the first JSON object from the reply, and parses it
//! into the typed output. Any shape mismatch becomes
//! `ParleyError::OracleMalformedOutput` right here — callers never see raw
//! model output.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::contracts::{
    ClosingRequest, EvaluationRequest, GeneratedQuestion, Hint, HintRequest, QuestionRequest,
    SpokenClosing, SpokenTransition, TransitionRequest,
};
use crate::extract::extract_json_object;
use crate::prompts;
use crate::provider::DynProvider;
use parley_types::{Evaluation, ParleyError, Result};

// ---------------------------------------------------------------------------
// Oracle trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Oracle: Send + Sync {
    async fn question(&self, req: &QuestionRequest) -> Result<GeneratedQuestion>;
    async fn evaluation(&self, req: &EvaluationRequest) -> Result<Evaluation>;
    async fn transition(&self, req: &TransitionRequest) -> Result<SpokenTransition>;
    async fn hint(&self, req: &HintRequest) -> Result<Hint>;
    async fn closing(&self, req: &ClosingRequest) -> Result<SpokenClosing>;
}

// ---------------------------------------------------------------------------
// ProviderOracle
// ---------------------------------------------------------------------------

/// Oracle backed by a chat provider.
pub struct ProviderOracle {
    provider: DynProvider,
}

impl ProviderOracle {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }

    async fn call<T: DeserializeOwned>(&self, call_site: &str, system: &str, user: &str) -> Result<T> {
        let raw = self.provider.complete(system, user).await?;
        parse_typed(call_site, &raw)
    }
}

/// Parse a raw completion into the typed output for `call_site`.
fn parse_typed<T: DeserializeOwned>(call_site: &str, raw: &str) -> Result<T> {
    let object = extract_json_object(raw).ok_or_else(|| ParleyError::OracleMalformedOutput {
        call_site: call_site.to_string(),
        detail: "no JSON object in completion".to_string(),
    })?;
    serde_json::from_str(object).map_err(|e| ParleyError::OracleMalformedOutput {
        call_site: call_site.to_string(),
        detail: e.to_string(),
    })
}

#[async_trait]
impl Oracle for ProviderOracle {
    async fn question(&self, req: &QuestionRequest) -> Result<GeneratedQuestion> {
        tracing::debug!(
            difficulty = %req.difficulty,
            question_number = req.question_number,
            "Generating question"
        );
        self.call("question", prompts::QUESTION_SYSTEM, &prompts::question_user(req))
            .await
    }

    async fn evaluation(&self, req: &EvaluationRequest) -> Result<Evaluation> {
        self.call(
            "evaluation",
            prompts::EVALUATION_SYSTEM,
            &prompts::evaluation_user(req),
        )
        .await
    }

    async fn transition(&self, req: &TransitionRequest) -> Result<SpokenTransition> {
        self.call(
            "transition",
            prompts::TRANSITION_SYSTEM,
            &prompts::transition_user(req),
        )
        .await
    }

    async fn hint(&self, req: &HintRequest) -> Result<Hint> {
        self.call("hint", prompts::HINT_SYSTEM, &prompts::hint_user(req))
            .await
    }

    async fn closing(&self, req: &ClosingRequest) -> Result<SpokenClosing> {
        self.call("closing", prompts::CLOSING_SYSTEM, &prompts::closing_user(req))
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
