//! Step handler trait, resume values, suspend payloads, and the registry.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::flow::Step;
use crate::record::InterviewRecord;
use parley_oracle::Oracle;
use parley_types::{Evaluation, Result};

// ---------------------------------------------------------------------------
// ResumeValue
// ---------------------------------------------------------------------------

/// Value injected into a suspended step by the caller's resume call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeValue {
    /// The candidate's answer text, stored verbatim.
    Answer(String),
    /// Coach-mode confirmation; content is discarded.
    Proceed,
    /// Early-end escape: route straight to the closing summary.
    EndEarly,
}

// ---------------------------------------------------------------------------
// SuspendPrompt
// ---------------------------------------------------------------------------

/// Structured payload returned to the caller when the flow suspends.
#[derive(Debug, Clone)]
pub enum SuspendPrompt {
    /// Awaiting the candidate's answer to `question`.
    Answer {
        question: String,
        spoken_transition: Option<String>,
    },
    /// Awaiting explicit confirmation after feedback (coach only).
    Continue {
        evaluation: Evaluation,
        feedback: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// StepOutcome
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum StepOutcome {
    /// Continue to the graph successor.
    Advance,
    /// Continue at a specific step, bypassing the normal wiring.
    Jump(Step),
    /// Halt and checkpoint; re-enter this same step on resume.
    Suspend(SuspendPrompt),
    /// The flow is complete.
    Finished,
}

// ---------------------------------------------------------------------------
// StepHandler trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait StepHandler: Send + Sync {
    /// The step this handler implements.
    fn step(&self) -> Step;

    /// Execute this step. `resume` carries the caller-supplied value when
    /// this step was the suspend point being resumed; otherwise `None`.
    async fn execute(
        &self,
        record: &mut InterviewRecord,
        oracle: &dyn Oracle,
        resume: Option<ResumeValue>,
    ) -> Result<StepOutcome>;
}

// ---------------------------------------------------------------------------
// StepRegistry
// ---------------------------------------------------------------------------

pub struct StepRegistry {
    handlers: HashMap<Step, Box<dyn StepHandler>>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, handler: impl StepHandler + 'static) {
        self.handlers.insert(handler.step(), Box::new(handler));
    }

    pub fn get(&self, step: Step) -> Option<&dyn StepHandler> {
        self.handlers.get(&step).map(|h| h.as_ref())
    }

    pub fn has(&self, step: Step) -> bool {
        self.handlers.contains_key(&step)
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry with every built-in step handler registered.
pub fn default_registry() -> StepRegistry {
    let mut reg = StepRegistry::new();
    reg.register(crate::steps::AskHandler);
    reg.register(crate::steps::AwaitAnswerHandler);
    reg.register(crate::steps::EvaluateHandler);
    reg.register(crate::steps::AwaitContinueHandler);
    reg.register(crate::steps::DecideHandler);
    reg.register(crate::steps::TransitionHandler);
    reg.register(crate::steps::EndHandler);
    reg
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
