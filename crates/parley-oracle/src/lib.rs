//! Typed text-generation boundary for the Parley interview engine.
//!
//! Every language-model interaction the engine performs goes through the
//! [`Oracle`] trait: five call sites, each with a typed request and a typed
//! JSON-shaped result. Shape violations surface as
//! `ParleyError::OracleMalformedOutput` at this boundary — nothing
//! loosely-typed leaks into the engine.

pub mod anthropic;
pub mod contracts;
pub mod extract;
pub mod openai;
pub mod oracle;
pub mod prompts;
pub mod provider;
pub mod scripted;

pub use anthropic::AnthropicProvider;
pub use contracts::{
    ClosingRequest, EvaluationRequest, GeneratedQuestion, Hint, HintRequest, QuestionRequest,
    SpokenClosing, SpokenTransition, TransitionRequest,
};
pub use extract::extract_json_object;
pub use openai::OpenAiProvider;
pub use oracle::{Oracle, ProviderOracle};
pub use provider::{provider_from_env, ChatProvider, DynProvider};
pub use scripted::ScriptedOracle;
