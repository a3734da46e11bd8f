//! Transition step — one cosmetic narration sentence between questions.

use async_trait::async_trait;

use crate::flow::Step;
use crate::record::InterviewRecord;
use crate::step::{ResumeValue, StepHandler, StepOutcome};
use parley_oracle::{Oracle, TransitionRequest};
use parley_types::Result;

/// Never blocks progression: an oracle failure or empty reply degrades to no
/// transition at all, unlike Ask and Evaluate which fail hard.
pub struct TransitionHandler;

#[async_trait]
impl StepHandler for TransitionHandler {
    fn step(&self) -> Step {
        Step::Transition
    }

    async fn execute(
        &self,
        record: &mut InterviewRecord,
        oracle: &dyn Oracle,
        _resume: Option<ResumeValue>,
    ) -> Result<StepOutcome> {
        let request = TransitionRequest {
            last_score: record.score_history.last().copied(),
        };

        record.spoken_transition = match oracle.transition(&request).await {
            Ok(t) if !t.transition.trim().is_empty() => Some(t.transition),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(error = %e, "Transition narration failed; continuing without it");
                None
            }
        };
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
    use parley_types::Persona;

    #[tokio::test]
    async fn transition_stores_narration() {
        let oracle = ScriptedOracle::new();
        let mut r = InterviewRecord::new("Backend Engineer", "3 years", "", Persona::Strict);
        r.score_history.push(8.0);

        let outcome = TransitionHandler.execute(&mut r, &oracle, None).await.unwrap();
        assert!(matches!(outcome, StepOutcome::Advance));
        assert_eq!(r.spoken_transition.as_deref(), Some("Alright, let's keep going."));
    }

    #[tokio::test]
    async fn transition_failure_degrades_to_none() {
        let oracle = ScriptedOracle::new().failing_transitions();
        let mut r = InterviewRecord::new("Backend Engineer", "3 years", "", Persona::Strict);
        r.spoken_transition = Some("stale".to_string());

        let outcome = TransitionHandler.execute(&mut r, &oracle, None).await.unwrap();
        assert!(matches!(outcome, StepOutcome::Advance));
        assert!(r.spoken_transition.is_none());
    }
}
