//! Ask step — generate the next interview question.

use async_trait::async_trait;

use crate::flow::Step;
use crate::record::InterviewRecord;
use crate::step::{ResumeValue, StepHandler, StepOutcome};
use parley_oracle::{Oracle, QuestionRequest};
use parley_types::{ParleyError, Result};

/// Calls the oracle with the full question context: role, experience,
/// difficulty, topics to avoid, and everything already asked. A malformed or
/// empty reply is fatal — there is no fallback question.
pub struct AskHandler;

#[async_trait]
impl StepHandler for AskHandler {
    fn step(&self) -> Step {
        Step::Ask
    }

    async fn execute(
        &self,
        record: &mut InterviewRecord,
        oracle: &dyn Oracle,
        _resume: Option<ResumeValue>,
    ) -> Result<StepOutcome> {
        let request = QuestionRequest {
            role: record.role.clone(),
            experience: record.experience.clone(),
            role_description: record.role_description.clone(),
            difficulty: record.difficulty,
            weak_topics: record.weak_topics.iter().cloned().collect(),
            asked_questions: record.asked_questions.clone(),
            question_number: record.question_count + 1,
        };

        let generated = oracle.question(&request).await?;
        let question = generated.question.trim().to_string();
        if question.is_empty() {
            return Err(ParleyError::OracleMalformedOutput {
                call_site: "question".to_string(),
                detail: "empty question text".to_string(),
            });
        }

        tracing::info!(
            question_number = request.question_number,
            difficulty = %record.difficulty,
            "Question generated"
        );

        record.asked_questions.push(question.clone());
        record.current_question = question;
        Ok(StepOutcome::Advance)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
