//! Decide step — pure policy application, no oracle calls.

use async_trait::async_trait;

use crate::flow::Step;
use crate::policy;
use crate::record::InterviewRecord;
use crate::step::{ResumeValue, StepHandler, StepOutcome};
use parley_oracle::Oracle;
use parley_types::{ParleyError, Result};

/// The only step permitted to mutate `difficulty`, `weak_topics`,
/// `question_count`, and `end_interview`. Termination is evaluated against
/// the pre-increment counter so the interview asks exactly the configured
/// number of questions.
pub struct DecideHandler;

#[async_trait]
impl StepHandler for DecideHandler {
    fn step(&self) -> Step {
        Step::Decide
    }

    async fn execute(
        &self,
        record: &mut InterviewRecord,
        _oracle: &dyn Oracle,
        _resume: Option<ResumeValue>,
    ) -> Result<StepOutcome> {
        let (score, topic) = match record.evaluation.as_ref() {
            Some(ev) => (ev.score, ev.topic.clone()),
            None => return Err(ParleyError::MissingEvaluation),
        };

        let decision = policy::adjust_difficulty(score, record.difficulty);
        record.difficulty = decision.difficulty;
        if decision.flag_weak_topic {
            record.weak_topics.insert(topic);
        }

        record.end_interview = policy::should_end(record.question_count);
        record.question_count += 1;

        tracing::info!(
            score,
            difficulty = %record.difficulty,
            question_count = record.question_count,
            end_interview = record.end_interview,
            "Progression decided"
        );
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
    use parley_types::{Difficulty, Persona};

    fn record_with_score(score: f64, topic: &str) -> InterviewRecord {
        let mut r = InterviewRecord::new("Backend Engineer", "3 years", "", Persona::Strict);
        r.record_evaluation(ScriptedOracle::eval(score, topic));
        r
    }

    #[tokio::test]
    async fn weak_answer_drops_difficulty_and_flags_topic() {
        let oracle = ScriptedOracle::new();
        let mut r = record_with_score(3.0, "indexing");
        r.difficulty = Difficulty::Hard;

        DecideHandler.execute(&mut r, &oracle, None).await.unwrap();
        assert_eq!(r.difficulty, Difficulty::Easy);
        assert!(r.weak_topics.contains("indexing"));
        assert_eq!(r.question_count, 1);
    }

    #[tokio::test]
    async fn strong_answer_raises_difficulty_without_flagging() {
        let oracle = ScriptedOracle::new();
        let mut r = record_with_score(8.0, "indexing");

        DecideHandler.execute(&mut r, &oracle, None).await.unwrap();
        assert_eq!(r.difficulty, Difficulty::Hard);
        assert!(r.weak_topics.is_empty());
    }

    #[tokio::test]
    async fn mid_band_score_holds_difficulty() {
        let oracle = ScriptedOracle::new();
        let mut r = record_with_score(6.0, "indexing");
        r.difficulty = Difficulty::Hard;

        DecideHandler.execute(&mut r, &oracle, None).await.unwrap();
        assert_eq!(r.difficulty, Difficulty::Hard);
        assert!(r.weak_topics.is_empty());
    }

    #[tokio::test]
    async fn duplicate_weak_topic_insert_is_a_noop() {
        let oracle = ScriptedOracle::new();
        let mut r = record_with_score(2.0, "indexing");
        r.weak_topics.insert("indexing".to_string());

        DecideHandler.execute(&mut r, &oracle, None).await.unwrap();
        assert_eq!(r.weak_topics.len(), 1);
    }

    #[tokio::test]
    async fn end_flag_set_on_final_cycle_only() {
        let oracle = ScriptedOracle::new();

        let mut r = record_with_score(6.0, "t");
        r.question_count = 3;
        DecideHandler.execute(&mut r, &oracle, None).await.unwrap();
        assert!(!r.end_interview);
        assert_eq!(r.question_count, 4);

        DecideHandler.execute(&mut r, &oracle, None).await.unwrap();
        assert!(r.end_interview);
        assert_eq!(r.question_count, 5);
    }

    #[tokio::test]
    async fn decide_without_evaluation_is_fatal() {
        let oracle = ScriptedOracle::new();
        let mut r = InterviewRecord::new("Backend Engineer", "3 years", "", Persona::Strict);

        let err = DecideHandler.execute(&mut r, &oracle, None).await.unwrap_err();
        assert!(matches!(err, ParleyError::MissingEvaluation));
        assert_eq!(r.question_count, 0, "counter untouched on failure");
    }
}
