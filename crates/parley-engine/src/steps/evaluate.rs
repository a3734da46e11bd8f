//! Evaluate step — score the captured answer in one merged oracle call.

use async_trait::async_trait;

use crate::flow::Step;
use crate::record::InterviewRecord;
use crate::step::{ResumeValue, StepHandler, StepOutcome};
use parley_oracle::{EvaluationRequest, Oracle};
use parley_types::{ParleyError, Result};

/// One oracle call produces score, topic, strengths, weaknesses, and
/// narrative feedback together. The engine checks shape only — a finite
/// numeric score and a non-empty topic; band discipline belongs to the
/// oracle's prompt contract.
pub struct EvaluateHandler;

#[async_trait]
impl StepHandler for EvaluateHandler {
    fn step(&self) -> Step {
        Step::Evaluate
    }

    async fn execute(
        &self,
        record: &mut InterviewRecord,
        oracle: &dyn Oracle,
        _resume: Option<ResumeValue>,
    ) -> Result<StepOutcome> {
        let request = EvaluationRequest {
            question: record.current_question.clone(),
            answer: record.last_answer_text.clone(),
        };

        let evaluation = oracle.evaluation(&request).await?;
        if !evaluation.score.is_finite() {
            return Err(ParleyError::OracleMalformedOutput {
                call_site: "evaluation".to_string(),
                detail: format!("non-finite score: {}", evaluation.score),
            });
        }
        if evaluation.topic.trim().is_empty() {
            return Err(ParleyError::OracleMalformedOutput {
                call_site: "evaluation".to_string(),
                detail: "empty topic".to_string(),
            });
        }

        tracing::info!(score = evaluation.score, topic = %evaluation.topic, "Answer evaluated");
        record.record_evaluation(evaluation);
        Ok(StepOutcome::Advance)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use parley_oracle::ScriptedOracle;
    use parley_types::{Evaluation, Persona};

    fn record() -> InterviewRecord {
        let mut r = InterviewRecord::new("Backend Engineer", "3 years", "", Persona::Strict);
        r.current_question = "What is a deadlock?".to_string();
        r.last_answer_text = "Two threads each waiting on the other's lock.".to_string();
        r
    }

    #[tokio::test]
    async fn evaluate_appends_to_both_histories() {
        let oracle = ScriptedOracle::new().with_evaluations(vec![ScriptedOracle::eval(7.0, "locking")]);
        let mut r = record();

        let outcome = EvaluateHandler.execute(&mut r, &oracle, None).await.unwrap();
        assert!(matches!(outcome, StepOutcome::Advance));
        assert_eq!(r.score_history, vec![7.0]);
        assert_eq!(r.evaluations_history.len(), 1);
        assert_eq!(r.evaluation.as_ref().unwrap().topic, "locking");
        assert!(r.feedback.is_some());

        let requests = oracle.evaluation_requests();
        assert_eq!(requests[0].question, "What is a deadlock?");
        assert_eq!(requests[0].answer, "Two threads each waiting on the other's lock.");
    }

    #[tokio::test]
    async fn evaluate_rejects_empty_topic() {
        let oracle = ScriptedOracle::new().with_evaluations(vec![Evaluation {
            score: 5.0,
            topic: "  ".into(),
            strengths: vec![],
            weaknesses: vec![],
            feedback: String::new(),
        }]);
        let mut r = record();

        let err = EvaluateHandler.execute(&mut r, &oracle, None).await.unwrap_err();
        assert!(matches!(err, ParleyError::OracleMalformedOutput { .. }));
        assert!(r.score_history.is_empty(), "histories untouched on failure");
    }

    #[tokio::test]
    async fn evaluate_rejects_non_finite_score() {
        let oracle = ScriptedOracle::new().with_evaluations(vec![Evaluation {
            score: f64::NAN,
            topic: "locking".into(),
            strengths: vec![],
            weaknesses: vec![],
            feedback: String::new(),
        }]);
        let mut r = record();

        let err = EvaluateHandler.execute(&mut r, &oracle, None).await.unwrap_err();
        assert!(matches!(err, ParleyError::OracleMalformedOutput { .. }));
    }
}
