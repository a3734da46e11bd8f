//! Transport-agnostic session-facing operations.
//!
//! Start, submit an answer, proceed (coach), end early, and request a hint —
//! each keyed by session id, each validating session state before driving
//! the flow. The transport layer on top of this (HTTP, CLI, tests) only
//! shuttles these typed payloads around.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::engine::{FlowDriver, FlowSignal};
use crate::flow::Step;
use crate::record::{FlowState, InterviewRecord};
use crate::registry::{SessionEntry, SessionRegistry};
use crate::step::{ResumeValue, SuspendPrompt};
use parley_oracle::{Hint, HintRequest, Oracle};
use parley_types::{config, Evaluation, InterviewSummary, ParleyError, Persona, Result};

// ---------------------------------------------------------------------------
// Request / response payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct StartRequest {
    pub role: String,
    pub experience: String,
    pub role_description: Option<String>,
    pub persona: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartedInterview {
    pub session_id: Uuid,
    pub question: String,
}

/// Which prompt a non-final answer response carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    /// The next question is ready (strict flow, or coach after proceed).
    Question,
    /// Feedback is ready; the flow awaits explicit continuation (coach).
    Feedback,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// The interview is over; the session has been destroyed.
    Final {
        summary: InterviewSummary,
        spoken_closing: String,
        evaluation: Option<Evaluation>,
    },
    /// The interview continues from a fresh checkpoint.
    Next {
        step: NextStep,
        question: String,
        spoken_transition: Option<String>,
        feedback: Option<String>,
        evaluation: Option<Evaluation>,
    },
}

impl AnswerOutcome {
    pub fn is_final(&self) -> bool {
        matches!(self, AnswerOutcome::Final { .. })
    }
}

// ---------------------------------------------------------------------------
// InterviewService
// ---------------------------------------------------------------------------

pub struct InterviewService {
    registry: SessionRegistry,
    driver: FlowDriver,
    oracle: Arc<dyn Oracle>,
}

impl InterviewService {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self::with_registry(oracle, SessionRegistry::with_defaults())
    }

    pub fn with_registry(oracle: Arc<dyn Oracle>, registry: SessionRegistry) -> Self {
        Self {
            registry,
            driver: FlowDriver::new(oracle.clone()),
            oracle,
        }
    }

    /// Create a session, generate the first question, and checkpoint at the
    /// first suspend point.
    pub async fn start(&self, req: StartRequest) -> Result<StartedInterview> {
        let role = req.role.trim();
        if role.is_empty() {
            return Err(ParleyError::InvalidRequest("role must not be empty".into()));
        }
        let experience = req.experience.trim();
        if experience.is_empty() {
            return Err(ParleyError::InvalidRequest(
                "experience must not be empty".into(),
            ));
        }
        // Persona is validated before anything is allocated.
        let persona = match req.persona.as_deref() {
            Some(p) => p.parse()?,
            None => Persona::default(),
        };
        self.registry.ensure_capacity().await?;

        let session_id = Uuid::new_v4();
        let record = InterviewRecord::new(
            role,
            experience,
            req.role_description.unwrap_or_default(),
            persona,
        );
        let mut state = FlowState {
            session_id,
            next_step: Step::Ask,
            record,
        };

        let signal = self.driver.drive(&mut state, None).await?;
        let question = match signal {
            FlowSignal::Suspended(SuspendPrompt::Answer { question, .. }) => question,
            _ => {
                return Err(ParleyError::Other(
                    "interview did not reach its first question".into(),
                ))
            }
        };

        self.registry
            .insert(session_id, SessionEntry::new(persona, question.clone(), state))
            .await?;
        tracing::info!(%session_id, %persona, %role, "Interview started");

        Ok(StartedInterview { session_id, question })
    }

    /// Resume the session with the candidate's answer. The sentinel answer
    /// diverts to the early-end escape path.
    pub async fn submit_answer(&self, session_id: Uuid, answer: &str) -> Result<AnswerOutcome> {
        let entry = self.registry.take(session_id).await?;
        if entry.state.next_step != Step::AwaitAnswer {
            self.registry.restore(session_id, entry).await;
            return Err(ParleyError::InvalidRequest(
                "session is awaiting continuation, not an answer".into(),
            ));
        }

        let resume = if answer.trim() == config::END_INTERVIEW_SENTINEL {
            ResumeValue::EndEarly
        } else {
            ResumeValue::Answer(answer.to_string())
        };
        self.advance(session_id, entry, resume).await
    }

    /// Coach-mode confirmation: unblock the flow past the feedback pause.
    pub async fn proceed(&self, session_id: Uuid) -> Result<AnswerOutcome> {
        let entry = self.registry.take(session_id).await?;
        if entry.state.next_step != Step::AwaitContinue {
            self.registry.restore(session_id, entry).await;
            return Err(ParleyError::NotAwaitingContinue {
                session_id: session_id.to_string(),
            });
        }
        self.advance(session_id, entry, ResumeValue::Proceed).await
    }

    /// Force termination from whichever suspend point the session is at.
    /// Always yields a summary, degenerate if no answers were ever given.
    pub async fn end_early(&self, session_id: Uuid) -> Result<AnswerOutcome> {
        let entry = self.registry.take(session_id).await?;
        self.advance(session_id, entry, ResumeValue::EndEarly).await
    }

    /// Generate a hint for the session's active question. Does not advance
    /// the flow; does refresh the session's TTL.
    pub async fn hint(&self, session_id: Uuid) -> Result<Hint> {
        let entry = self.registry.peek(session_id).await?;
        let record = &entry.state.record;
        if record.current_question.trim().is_empty() {
            return Err(ParleyError::NoActiveQuestion {
                session_id: session_id.to_string(),
            });
        }
        self.oracle
            .hint(&HintRequest {
                question: record.current_question.clone(),
                role: record.role.clone(),
                experience: record.experience.clone(),
            })
            .await
    }

    /// Number of live sessions (post-sweep callers see a stale count at worst).
    pub async fn active_sessions(&self) -> usize {
        self.registry.len().await
    }

    async fn advance(
        &self,
        session_id: Uuid,
        mut entry: SessionEntry,
        resume: ResumeValue,
    ) -> Result<AnswerOutcome> {
        let checkpoint = entry.state.clone();
        match self.driver.drive(&mut entry.state, Some(resume)).await {
            Err(e) => {
                // Roll back to the suspend-point checkpoint so the caller can
                // retry the resume; partial mutations from the failed pass are
                // discarded.
                entry.state = checkpoint;
                self.registry.restore(session_id, entry).await;
                Err(e)
            }
            Ok(FlowSignal::Finished) => {
                // Terminal: the record is dropped with the entry. Any later
                // resume for this id gets SessionNotFound.
                let record = entry.state.record;
                let summary = record
                    .summary
                    .ok_or_else(|| ParleyError::Other("flow finished without a summary".into()))?;
                let spoken_closing = record
                    .spoken_closing
                    .unwrap_or_else(|| config::CLOSING_FALLBACK.to_string());
                tracing::info!(%session_id, average = summary.average_score, "Interview finished");
                Ok(AnswerOutcome::Final {
                    summary,
                    spoken_closing,
                    evaluation: record.evaluation,
                })
            }
            Ok(FlowSignal::Suspended(prompt)) => {
                let outcome = match prompt {
                    SuspendPrompt::Answer {
                        question,
                        spoken_transition,
                    } => AnswerOutcome::Next {
                        step: NextStep::Question,
                        question,
                        spoken_transition,
                        feedback: entry.state.record.feedback.clone(),
                        evaluation: entry.state.record.evaluation.clone(),
                    },
                    SuspendPrompt::Continue { evaluation, feedback } => AnswerOutcome::Next {
                        step: NextStep::Feedback,
                        question: entry.state.record.current_question.clone(),
                        spoken_transition: None,
                        feedback,
                        evaluation: Some(evaluation),
                    },
                };
                if let AnswerOutcome::Next { question, .. } = &outcome {
                    entry.last_prompt = question.clone();
                }
                self.registry.restore(session_id, entry).await;
                Ok(outcome)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
