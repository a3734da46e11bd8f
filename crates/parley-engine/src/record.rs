//! The durable interview state threaded through every step.
//!
//! One [`InterviewRecord`] per session, exclusively owned by that session's
//! flow instance and mutated only by step handlers. Paired with the next
//! step to resume, it forms the [`FlowState`] continuation that the session
//! registry checkpoints at every suspend point.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flow::Step;
use parley_types::{Difficulty, Evaluation, InterviewSummary, Persona};

// ---------------------------------------------------------------------------
// InterviewRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewRecord {
    // Immutable inputs set at creation.
    pub role: String,
    pub experience: String,
    pub role_description: String,
    pub persona: Persona,

    /// Active question text; empty before the first Ask.
    pub current_question: String,
    /// Most recent captured answer, verbatim; empty before the first resume.
    pub last_answer_text: String,

    pub evaluation: Option<Evaluation>,
    pub feedback: Option<String>,

    /// Every evaluation produced, append-only, parallel to `score_history`.
    pub evaluations_history: Vec<Evaluation>,
    pub score_history: Vec<f64>,

    /// Topics flagged weak. Grows only; BTreeSet keeps summaries deterministic.
    pub weak_topics: BTreeSet<String>,

    pub difficulty: Difficulty,
    /// Completed question cycles. Incremented only by the Decide step.
    pub question_count: u32,
    pub end_interview: bool,
    /// Every question issued, append-only, used to prevent repetition.
    pub asked_questions: Vec<String>,

    /// Set exactly once, by the End step. Present iff the flow is complete.
    pub summary: Option<InterviewSummary>,
    pub spoken_transition: Option<String>,
    pub spoken_closing: Option<String>,
}

impl InterviewRecord {
    pub fn new(
        role: impl Into<String>,
        experience: impl Into<String>,
        role_description: impl Into<String>,
        persona: Persona,
    ) -> Self {
        Self {
            role: role.into(),
            experience: experience.into(),
            role_description: role_description.into(),
            persona,
            current_question: String::new(),
            last_answer_text: String::new(),
            evaluation: None,
            feedback: None,
            evaluations_history: Vec::new(),
            score_history: Vec::new(),
            weak_topics: BTreeSet::new(),
            difficulty: Difficulty::Easy,
            question_count: 0,
            end_interview: false,
            asked_questions: Vec::new(),
            summary: None,
            spoken_transition: None,
            spoken_closing: None,
        }
    }

    /// Append an evaluation to both parallel histories and expose it as the
    /// current result. The single mutation path keeps
    /// `score_history.len() == evaluations_history.len()`.
    pub fn record_evaluation(&mut self, evaluation: Evaluation) {
        self.score_history.push(evaluation.score);
        self.feedback = Some(evaluation.feedback.clone());
        self.evaluations_history.push(evaluation.clone());
        self.evaluation = Some(evaluation);
    }

    pub fn is_finished(&self) -> bool {
        self.summary.is_some()
    }
}

// ---------------------------------------------------------------------------
// FlowState — the serialized continuation
// ---------------------------------------------------------------------------

/// Everything needed to re-enter a suspended flow: which step runs next plus
/// the full record. Keyed by session id in the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowState {
    pub session_id: Uuid,
    pub next_step: Step,
    pub record: InterviewRecord,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(score: f64, topic: &str) -> Evaluation {
        Evaluation {
            score,
            topic: topic.into(),
            strengths: vec![],
            weaknesses: vec![],
            feedback: format!("fb {topic}"),
        }
    }

    #[test]
    fn new_record_starts_easy_and_empty() {
        let record = InterviewRecord::new("SRE", "5 years", "", Persona::Strict);
        assert_eq!(record.difficulty, Difficulty::Easy);
        assert_eq!(record.question_count, 0);
        assert!(!record.end_interview);
        assert!(record.current_question.is_empty());
        assert!(record.score_history.is_empty());
        assert!(record.summary.is_none());
        assert!(!record.is_finished());
    }

    #[test]
    fn record_evaluation_keeps_histories_parallel() {
        let mut record = InterviewRecord::new("SRE", "5 years", "", Persona::Strict);
        record.record_evaluation(eval(7.0, "monitoring"));
        record.record_evaluation(eval(3.0, "networking"));

        assert_eq!(record.score_history.len(), record.evaluations_history.len());
        assert_eq!(record.score_history, vec![7.0, 3.0]);
        assert_eq!(record.evaluation.as_ref().unwrap().topic, "networking");
        assert_eq!(record.feedback.as_deref(), Some("fb networking"));
    }

    #[test]
    fn flow_state_round_trips_through_json() {
        let record = InterviewRecord::new("SRE", "5 years", "on-call team", Persona::Coach);
        let state = FlowState {
            session_id: Uuid::new_v4(),
            next_step: Step::AwaitAnswer,
            record,
        };
        let json = serde_json::to_string(&state).unwrap();
        let back: FlowState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.session_id, state.session_id);
        assert_eq!(back.next_step, Step::AwaitAnswer);
        assert_eq!(back.record.role, "SRE");
        assert_eq!(back.record.persona, Persona::Coach);
    }
}
