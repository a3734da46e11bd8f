//! Shared types, errors, and policy constants for the Parley interview engine.
//!
//! This crate provides the foundational types used across all other Parley crates:
//! - `ParleyError` — unified error taxonomy
//! - `Persona` / `Difficulty` — interview mode and adaptive difficulty
//! - `Evaluation` / `InterviewSummary` — scoring results and the final aggregate
//! - `config` — interview limits and scoring thresholds

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Configuration constants
// ---------------------------------------------------------------------------

/// Interview limits and scoring thresholds.
pub mod config {
    use std::time::Duration;

    /// Total questions per interview.
    pub const MAX_QUESTIONS: u32 = 5;

    /// Scores below this mark the topic as weak and drop difficulty.
    pub const WEAK_ANSWER_THRESHOLD: f64 = 5.0;
    /// Scores at or above this raise difficulty.
    pub const STRONG_ANSWER_THRESHOLD: f64 = 7.0;

    // Verdict ladder boundaries.
    pub const SCORE_EXCELLENT: f64 = 8.0;
    pub const SCORE_GOOD: f64 = 7.0;
    pub const SCORE_SATISFACTORY: f64 = 6.0;
    pub const SCORE_NEEDS_IMPROVEMENT: f64 = 5.0;

    /// Idle sessions are evicted after this long.
    pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60);
    /// Hard ceiling on concurrently checkpointed sessions.
    pub const MAX_SESSIONS: usize = 1000;

    /// Resume value that forces the interview to its closing summary.
    pub const END_INTERVIEW_SENTINEL: &str = "__end_interview__";

    /// Spoken closing used when the narration call fails or returns nothing.
    pub const CLOSING_FALLBACK: &str = "Session ended. Thank you for the interview!";
}

// ---------------------------------------------------------------------------
// ParleyError
// ---------------------------------------------------------------------------

/// Unified error type for all Parley subsystems.
#[derive(Debug, thiserror::Error)]
pub enum ParleyError {
    // === Oracle boundary errors ===
    #[error("Oracle returned malformed output for '{call_site}': {detail}")]
    OracleMalformedOutput { call_site: String, detail: String },

    #[error("Provider {provider} returned HTTP {status}: {message}")]
    Provider {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("Authentication failed for provider {provider}")]
    Auth { provider: String },

    // === Session errors ===
    #[error("Session {session_id} not found or expired")]
    SessionNotFound { session_id: String },

    #[error("Session capacity exceeded ({max} active sessions)")]
    CapacityExceeded { max: usize },

    #[error("Session {session_id} has already finished")]
    SessionFinished { session_id: String },

    #[error("Session {session_id} is not awaiting continuation")]
    NotAwaitingContinue { session_id: String },

    #[error("Session {session_id} has no active question")]
    NoActiveQuestion { session_id: String },

    // === Request errors ===
    #[error("Unknown persona '{requested}'")]
    InvalidPersona { requested: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // === Flow-integrity errors ===
    #[error("Decide step reached without an evaluation")]
    MissingEvaluation,

    // === Generic ===
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl ParleyError {
    /// Returns `true` if the error is transient and the operation may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            ParleyError::CapacityExceeded { .. } => true,
            ParleyError::Provider { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Maps the error to an HTTP status code for transport layers.
    pub fn http_status(&self) -> u16 {
        match self {
            ParleyError::SessionNotFound { .. } => 404,
            ParleyError::CapacityExceeded { .. } => 429,
            ParleyError::SessionFinished { .. } => 410,
            ParleyError::NotAwaitingContinue { .. } | ParleyError::NoActiveQuestion { .. } => 409,
            ParleyError::InvalidPersona { .. } | ParleyError::InvalidRequest(_) => 400,
            ParleyError::Auth { .. } => 401,
            ParleyError::Provider { status, .. } if *status > 0 => *status,
            ParleyError::OracleMalformedOutput { .. } => 502,
            _ => 500,
        }
    }
}

/// A convenience alias for `Result<T, ParleyError>`.
pub type Result<T> = std::result::Result<T, ParleyError>;

// ---------------------------------------------------------------------------
// Persona
// ---------------------------------------------------------------------------

/// Interaction-mode variant of the interview flow.
///
/// `Strict` runs continuously from answer to next question. `Coach` pauses
/// after each evaluation so the candidate can review feedback before
/// explicitly proceeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    Strict,
    Coach,
}

impl Default for Persona {
    fn default() -> Self {
        Persona::Strict
    }
}

impl FromStr for Persona {
    type Err = ParleyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "strict" => Ok(Persona::Strict),
            "coach" => Ok(Persona::Coach),
            other => Err(ParleyError::InvalidPersona {
                requested: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Persona::Strict => write!(f, "strict"),
            Persona::Coach => write!(f, "coach"),
        }
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Adaptive difficulty level for question generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Scoring result for one answer, merged with narrative feedback.
///
/// Produced in a single oracle call. The engine validates shape only
/// (numeric finite score, non-empty topic); band discipline is the oracle
/// prompt's contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: f64,
    pub topic: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub feedback: String,
}

// ---------------------------------------------------------------------------
// InterviewSummary
// ---------------------------------------------------------------------------

/// Final aggregate produced by the End step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSummary {
    /// Mean of all scores, rounded to 2 decimals; 0.0 when no answers were given.
    pub average_score: f64,
    pub weak_topics: Vec<String>,
    pub verdict: String,
    /// Up to 3 deduplicated strengths across the interview, first-seen order.
    pub what_went_well: Vec<String>,
    /// Up to 3 deduplicated weaknesses across the interview, first-seen order.
    pub areas_for_improvement: Vec<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
