//! Flow driver — the core traversal loop.
//!
//! Executes step handlers in graph order until the flow suspends or
//! finishes. Resumption injects the caller-supplied value into the
//! suspended step; everything downstream runs in the same pass. This is
//! explicit state plus an explicit transition function — resumes may arrive
//! on a different execution context than the one that suspended.

use std::sync::Arc;

use crate::flow::FlowGraph;
use crate::record::FlowState;
use crate::step::{default_registry, ResumeValue, StepOutcome, StepRegistry, SuspendPrompt};
use parley_oracle::Oracle;
use parley_types::{ParleyError, Result};

// ---------------------------------------------------------------------------
// FlowSignal
// ---------------------------------------------------------------------------

/// How a drive pass ended.
#[derive(Debug)]
pub enum FlowSignal {
    /// The flow halted at a suspend point; checkpoint and return the prompt.
    Suspended(SuspendPrompt),
    /// The flow reached its terminal step; the record holds the summary.
    Finished,
}

// ---------------------------------------------------------------------------
// FlowDriver
// ---------------------------------------------------------------------------

pub struct FlowDriver {
    registry: StepRegistry,
    oracle: Arc<dyn Oracle>,
}

impl FlowDriver {
    /// Driver with the built-in step handlers.
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self {
            registry: default_registry(),
            oracle,
        }
    }

    /// Driver with a custom registry.
    pub fn with_registry(oracle: Arc<dyn Oracle>, registry: StepRegistry) -> Self {
        Self { registry, oracle }
    }

    /// Advance the flow from its checkpointed step until the next suspend
    /// point or the terminal step.
    ///
    /// `resume` is consumed by the first handler executed — the suspended
    /// step being re-entered. A pass that starts from the entry step takes
    /// `None`.
    pub async fn drive(
        &self,
        state: &mut FlowState,
        mut resume: Option<ResumeValue>,
    ) -> Result<FlowSignal> {
        if state.record.is_finished() {
            return Err(ParleyError::SessionFinished {
                session_id: state.session_id.to_string(),
            });
        }

        let graph = FlowGraph::for_persona(state.record.persona);
        loop {
            let step = state.next_step;
            let handler = self.registry.get(step).ok_or_else(|| {
                ParleyError::Other(format!("No handler registered for step '{step}'"))
            })?;

            tracing::debug!(session_id = %state.session_id, %step, "Executing step");
            let outcome = handler
                .execute(&mut state.record, self.oracle.as_ref(), resume.take())
                .await?;

            match outcome {
                StepOutcome::Advance => {
                    state.next_step = graph.next(step, &state.record).ok_or_else(|| {
                        ParleyError::Other(format!("Step '{step}' has no successor"))
                    })?;
                }
                StepOutcome::Jump(next) => {
                    state.next_step = next;
                }
                StepOutcome::Suspend(prompt) => {
                    // next_step stays put: resume re-enters this same step.
                    return Ok(FlowSignal::Suspended(prompt));
                }
                StepOutcome::Finished => {
                    return Ok(FlowSignal::Finished);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::Step;
    use crate::record::InterviewRecord;
    use parley_oracle::ScriptedOracle;
    use parley_types::Persona;
    use uuid::Uuid;

    fn state(persona: Persona) -> FlowState {
        FlowState {
            session_id: Uuid::new_v4(),
            next_step: Step::Ask,
            record: InterviewRecord::new("Backend Engineer", "3 years", "", persona),
        }
    }

    fn driver(oracle: ScriptedOracle) -> FlowDriver {
        FlowDriver::new(Arc::new(oracle))
    }

    #[tokio::test]
    async fn first_pass_suspends_at_await_answer() {
        let driver = driver(ScriptedOracle::new().with_questions(vec!["Q1?"]));
        let mut s = state(Persona::Strict);

        let signal = driver.drive(&mut s, None).await.unwrap();
        match signal {
            FlowSignal::Suspended(SuspendPrompt::Answer { question, spoken_transition }) => {
                assert_eq!(question, "Q1?");
                assert!(spoken_transition.is_none());
            }
            other => panic!("Expected Suspended(Answer), got: {other:?}"),
        }
        assert_eq!(s.next_step, Step::AwaitAnswer);
        assert_eq!(s.record.asked_questions.len(), 1);
    }

    #[tokio::test]
    async fn strict_resume_runs_through_to_next_question() {
        let oracle = ScriptedOracle::new()
            .with_evaluations(vec![ScriptedOracle::eval(8.0, "sql")]);
        let driver = driver(oracle);
        let mut s = state(Persona::Strict);

        driver.drive(&mut s, None).await.unwrap();
        let signal = driver
            .drive(&mut s, Some(ResumeValue::Answer("an answer".into())))
            .await
            .unwrap();

        // Evaluate, Decide, and Transition all ran in one pass.
        match signal {
            FlowSignal::Suspended(SuspendPrompt::Answer { spoken_transition, .. }) => {
                assert!(spoken_transition.is_some());
            }
            other => panic!("Expected Suspended(Answer), got: {other:?}"),
        }
        assert_eq!(s.record.question_count, 1);
        assert_eq!(s.record.score_history, vec![8.0]);
        assert_eq!(s.record.asked_questions.len(), 2);
    }

    #[tokio::test]
    async fn coach_resume_pauses_at_feedback() {
        let oracle = ScriptedOracle::new()
            .with_evaluations(vec![ScriptedOracle::eval(6.0, "sql")]);
        let driver = driver(oracle);
        let mut s = state(Persona::Coach);

        driver.drive(&mut s, None).await.unwrap();
        let signal = driver
            .drive(&mut s, Some(ResumeValue::Answer("an answer".into())))
            .await
            .unwrap();

        match signal {
            FlowSignal::Suspended(SuspendPrompt::Continue { evaluation, .. }) => {
                assert_eq!(evaluation.score, 6.0);
            }
            other => panic!("Expected Suspended(Continue), got: {other:?}"),
        }
        assert_eq!(s.next_step, Step::AwaitContinue);
        // Decide has not run yet: counter still zero.
        assert_eq!(s.record.question_count, 0);
    }

    #[tokio::test]
    async fn coach_proceed_advances_to_next_question() {
        let oracle = ScriptedOracle::new()
            .with_evaluations(vec![ScriptedOracle::eval(6.0, "sql")]);
        let driver = driver(oracle);
        let mut s = state(Persona::Coach);

        driver.drive(&mut s, None).await.unwrap();
        driver
            .drive(&mut s, Some(ResumeValue::Answer("an answer".into())))
            .await
            .unwrap();
        let signal = driver
            .drive(&mut s, Some(ResumeValue::Proceed))
            .await
            .unwrap();

        assert!(matches!(
            signal,
            FlowSignal::Suspended(SuspendPrompt::Answer { .. })
        ));
        assert_eq!(s.record.question_count, 1);
    }

    #[tokio::test]
    async fn end_early_finishes_from_await_answer() {
        let driver = driver(ScriptedOracle::new());
        let mut s = state(Persona::Strict);

        driver.drive(&mut s, None).await.unwrap();
        let signal = driver
            .drive(&mut s, Some(ResumeValue::EndEarly))
            .await
            .unwrap();

        assert!(matches!(signal, FlowSignal::Finished));
        assert!(s.record.is_finished());
        assert_eq!(s.record.summary.as_ref().unwrap().average_score, 0.0);
    }

    #[tokio::test]
    async fn driving_a_finished_flow_is_rejected() {
        let driver = driver(ScriptedOracle::new());
        let mut s = state(Persona::Strict);

        driver.drive(&mut s, None).await.unwrap();
        driver.drive(&mut s, Some(ResumeValue::EndEarly)).await.unwrap();

        let err = driver
            .drive(&mut s, Some(ResumeValue::Answer("late".into())))
            .await
            .unwrap_err();
        assert!(matches!(err, ParleyError::SessionFinished { .. }));
    }

    #[tokio::test]
    async fn full_interview_finishes_after_max_questions() {
        let oracle = ScriptedOracle::new().with_evaluations(vec![
            ScriptedOracle::eval(8.0, "t1"),
            ScriptedOracle::eval(3.0, "t2"),
            ScriptedOracle::eval(6.0, "t3"),
            ScriptedOracle::eval(7.0, "t4"),
            ScriptedOracle::eval(5.0, "t5"),
        ]);
        let driver = driver(oracle);
        let mut s = state(Persona::Strict);

        driver.drive(&mut s, None).await.unwrap();
        for i in 0..4 {
            let signal = driver
                .drive(&mut s, Some(ResumeValue::Answer(format!("answer {i}"))))
                .await
                .unwrap();
            assert!(matches!(signal, FlowSignal::Suspended(_)));
        }
        let signal = driver
            .drive(&mut s, Some(ResumeValue::Answer("answer 4".into())))
            .await
            .unwrap();

        assert!(matches!(signal, FlowSignal::Finished));
        assert_eq!(s.record.question_count, 5);
        assert_eq!(s.record.asked_questions.len(), 5);
        assert_eq!(s.record.score_history.len(), 5);
        let summary = s.record.summary.as_ref().unwrap();
        assert_eq!(summary.average_score, 5.8);
        assert_eq!(summary.weak_topics, vec!["t2".to_string()]);
    }
}
