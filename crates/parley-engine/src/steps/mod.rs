//! Built-in step handlers, one per interview phase.
//!
//! The two await handlers live here: they are pure suspension points with no
//! computation of their own. Everything that calls the oracle or mutates
//! policy state gets its own module.

mod ask;
mod decide;
mod end;
mod evaluate;
mod transition;

pub use ask::AskHandler;
pub use decide::DecideHandler;
pub use end::EndHandler;
pub use evaluate::EvaluateHandler;
pub use transition::TransitionHandler;

use async_trait::async_trait;

use crate::flow::Step;
use crate::record::InterviewRecord;
use crate::step::{ResumeValue, StepHandler, StepOutcome, SuspendPrompt};
use parley_oracle::Oracle;
use parley_types::{ParleyError, Result};

// ---------------------------------------------------------------------------
// AwaitAnswerHandler
// ---------------------------------------------------------------------------

/// Suspends until the candidate answers the current question. The resume
/// value is stored verbatim, empty answers included — scoring them is the
/// evaluator's job, not ours.
pub struct AwaitAnswerHandler;

#[async_trait]
impl StepHandler for AwaitAnswerHandler {
    fn step(&self) -> Step {
        Step::AwaitAnswer
    }

    async fn execute(
        &self,
        record: &mut InterviewRecord,
        _oracle: &dyn Oracle,
        resume: Option<ResumeValue>,
    ) -> Result<StepOutcome> {
        match resume {
            None => Ok(StepOutcome::Suspend(SuspendPrompt::Answer {
                question: record.current_question.clone(),
                spoken_transition: record.spoken_transition.clone(),
            })),
            Some(ResumeValue::Answer(text)) => {
                if text.trim().is_empty() {
                    tracing::warn!("Empty answer received; passing through to evaluation");
                }
                record.last_answer_text = text;
                Ok(StepOutcome::Advance)
            }
            Some(ResumeValue::EndEarly) => {
                record.end_interview = true;
                Ok(StepOutcome::Jump(Step::End))
            }
            Some(ResumeValue::Proceed) => Err(ParleyError::InvalidRequest(
                "expected an answer, got a continuation".to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// AwaitContinueHandler
// ---------------------------------------------------------------------------

/// Coach-only pause after feedback. Any resume value unblocks the flow and
/// is otherwise discarded.
pub struct AwaitContinueHandler;

#[async_trait]
impl StepHandler for AwaitContinueHandler {
    fn step(&self) -> Step {
        Step::AwaitContinue
    }

    async fn execute(
        &self,
        record: &mut InterviewRecord,
        _oracle: &dyn Oracle,
        resume: Option<ResumeValue>,
    ) -> Result<StepOutcome> {
        match resume {
            None => {
                let evaluation = record
                    .evaluation
                    .clone()
                    .ok_or(ParleyError::MissingEvaluation)?;
                Ok(StepOutcome::Suspend(SuspendPrompt::Continue {
                    evaluation,
                    feedback: record.feedback.clone(),
                }))
            }
            Some(ResumeValue::EndEarly) => {
                record.end_interview = true;
                Ok(StepOutcome::Jump(Step::End))
            }
            Some(_) => Ok(StepOutcome::Advance),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use parley_oracle::ScriptedOracle;
    use parley_types::Persona;

    fn record() -> InterviewRecord {
        let mut r = InterviewRecord::new("Backend Engineer", "3 years", "", Persona::Coach);
        r.current_question = "What is a deadlock?".to_string();
        r
    }

    #[tokio::test]
    async fn await_answer_suspends_with_question_prompt() {
        let oracle = ScriptedOracle::new();
        let mut r = record();
        r.spoken_transition = Some("Nice.".to_string());

        let outcome = AwaitAnswerHandler
            .execute(&mut r, &oracle, None)
            .await
            .unwrap();
        match outcome {
            StepOutcome::Suspend(SuspendPrompt::Answer {
                question,
                spoken_transition,
            }) => {
                assert_eq!(question, "What is a deadlock?");
                assert_eq!(spoken_transition.as_deref(), Some("Nice."));
            }
            other => panic!("Expected Suspend(Answer), got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn await_answer_stores_resume_value_verbatim() {
        let oracle = ScriptedOracle::new();
        let mut r = record();

        let outcome = AwaitAnswerHandler
            .execute(
                &mut r,
                &oracle,
                Some(ResumeValue::Answer("  two threads, two locks  ".into())),
            )
            .await
            .unwrap();
        assert!(matches!(outcome, StepOutcome::Advance));
        assert_eq!(r.last_answer_text, "  two threads, two locks  ");
    }

    #[tokio::test]
    async fn await_answer_accepts_empty_answer() {
        let oracle = ScriptedOracle::new();
        let mut r = record();

        let outcome = AwaitAnswerHandler
            .execute(&mut r, &oracle, Some(ResumeValue::Answer(String::new())))
            .await
            .unwrap();
        assert!(matches!(outcome, StepOutcome::Advance));
        assert_eq!(r.last_answer_text, "");
    }

    #[tokio::test]
    async fn await_answer_end_early_jumps_to_end() {
        let oracle = ScriptedOracle::new();
        let mut r = record();

        let outcome = AwaitAnswerHandler
            .execute(&mut r, &oracle, Some(ResumeValue::EndEarly))
            .await
            .unwrap();
        assert!(matches!(outcome, StepOutcome::Jump(Step::End)));
        assert!(r.end_interview);
    }

    #[tokio::test]
    async fn await_continue_suspends_with_evaluation() {
        let oracle = ScriptedOracle::new();
        let mut r = record();
        r.record_evaluation(ScriptedOracle::eval(6.0, "locking"));

        let outcome = AwaitContinueHandler
            .execute(&mut r, &oracle, None)
            .await
            .unwrap();
        match outcome {
            StepOutcome::Suspend(SuspendPrompt::Continue { evaluation, feedback }) => {
                assert_eq!(evaluation.topic, "locking");
                assert!(feedback.is_some());
            }
            other => panic!("Expected Suspend(Continue), got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn await_continue_without_evaluation_is_flow_integrity_error() {
        let oracle = ScriptedOracle::new();
        let mut r = record();
        let err = AwaitContinueHandler
            .execute(&mut r, &oracle, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ParleyError::MissingEvaluation));
    }

    #[tokio::test]
    async fn await_continue_discards_resume_value() {
        let oracle = ScriptedOracle::new();
        let mut r = record();
        r.record_evaluation(ScriptedOracle::eval(6.0, "locking"));

        let outcome = AwaitContinueHandler
            .execute(&mut r, &oracle, Some(ResumeValue::Proceed))
            .await
            .unwrap();
        assert!(matches!(outcome, StepOutcome::Advance));

        let outcome = AwaitContinueHandler
            .execute(
                &mut r,
                &oracle,
                Some(ResumeValue::Answer("ignored".into())),
            )
            .await
            .unwrap();
        assert!(matches!(outcome, StepOutcome::Advance));
        assert_ne!(r.last_answer_text, "ignored");
    }
}
