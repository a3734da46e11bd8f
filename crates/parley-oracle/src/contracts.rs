//! Per-call-site request and response contracts.
//!
//! Each oracle call site sends a typed context and expects a typed
//! JSON-shaped result back. Responses deliberately use `deny_unknown_fields`
//! nowhere — extra fields from the model are tolerated, missing required
//! fields are not.

use parley_types::Difficulty;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Question generation
// ---------------------------------------------------------------------------

/// Context for generating the next interview question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub role: String,
    pub experience: String,
    pub role_description: String,
    pub difficulty: Difficulty,
    /// Topics to avoid or approach differently.
    pub weak_topics: Vec<String>,
    /// Everything already asked, to prevent repetition.
    pub asked_questions: Vec<String>,
    /// 1-based position of the question being generated.
    pub question_number: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub question: String,
}

// ---------------------------------------------------------------------------
// Answer evaluation
// ---------------------------------------------------------------------------

/// The question/answer pair to score. One call produces the full
/// [`parley_types::Evaluation`] including narrative feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub question: String,
    pub answer: String,
}

// ---------------------------------------------------------------------------
// Spoken transition
// ---------------------------------------------------------------------------

/// Context for the one-sentence bridge between questions. Cosmetic only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub last_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpokenTransition {
    pub transition: String,
}

// ---------------------------------------------------------------------------
// Hint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintRequest {
    pub question: String,
    pub role: String,
    pub experience: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hint {
    pub hint: String,
}

// ---------------------------------------------------------------------------
// Closing narration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosingRequest {
    pub average_score: f64,
    pub verdict: String,
    pub weak_topics: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpokenClosing {
    pub spoken_closing: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
