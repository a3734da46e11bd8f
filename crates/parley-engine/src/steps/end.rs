//! End step — aggregate the interview into its final summary.

use async_trait::async_trait;

use crate::flow::Step;
use crate::policy;
use crate::record::InterviewRecord;
use crate::step::{ResumeValue, StepHandler, StepOutcome};
use parley_oracle::{ClosingRequest, Oracle};
use parley_types::{config, InterviewSummary, Result};

/// Pure aggregation plus one optional narration call. Works from any partial
/// state: with an empty score history the summary degrades to average 0.0,
/// the worst verdict, and contextual default highlights — but it is always
/// well-formed.
pub struct EndHandler;

#[async_trait]
impl StepHandler for EndHandler {
    fn step(&self) -> Step {
        Step::End
    }

    async fn execute(
        &self,
        record: &mut InterviewRecord,
        oracle: &dyn Oracle,
        _resume: Option<ResumeValue>,
    ) -> Result<StepOutcome> {
        let avg = policy::average(&record.score_history);
        let verdict = policy::verdict(avg).to_string();

        let mut what_went_well =
            policy::collect_highlights(record.evaluations_history.iter().flat_map(|e| e.strengths.iter()));
        if what_went_well.is_empty() {
            what_went_well = policy::default_strengths(avg);
        }
        let mut areas_for_improvement =
            policy::collect_highlights(record.evaluations_history.iter().flat_map(|e| e.weaknesses.iter()));
        if areas_for_improvement.is_empty() {
            areas_for_improvement = policy::default_weaknesses(avg);
        }

        let summary = InterviewSummary {
            average_score: policy::round2(avg),
            weak_topics: record.weak_topics.iter().cloned().collect(),
            verdict: verdict.clone(),
            what_went_well,
            areas_for_improvement,
        };

        let closing_request = ClosingRequest {
            average_score: summary.average_score,
            verdict,
            weak_topics: summary.weak_topics.clone(),
        };

        tracing::info!(
            average = summary.average_score,
            verdict = %summary.verdict,
            questions = record.question_count,
            "Interview summarized"
        );
        record.summary = Some(summary);

        record.spoken_closing = Some(match oracle.closing(&closing_request).await {
            Ok(c) if !c.spoken_closing.trim().is_empty() => c.spoken_closing,
            Ok(_) => config::CLOSING_FALLBACK.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Closing narration failed; using fallback");
                config::CLOSING_FALLBACK.to_string()
            }
        });

        Ok(StepOutcome::Finished)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
