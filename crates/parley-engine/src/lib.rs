//! Interview progression engine.
//!
//! A resumable state machine that coordinates question generation, answer
//! capture (which may pause for an arbitrarily long real-world delay),
//! scoring-driven adaptive difficulty, weak-topic tracking, and termination
//! policy. Two personas share one graph definition: "strict" flows
//! continuously, "coach" gates each next question on explicit confirmation.

pub mod engine;
pub mod flow;
pub mod policy;
pub mod record;
pub mod registry;
pub mod service;
pub mod step;
pub mod steps;

pub use engine::{FlowDriver, FlowSignal};
pub use flow::{FlowGraph, Step};
pub use record::{FlowState, InterviewRecord};
pub use registry::{SessionEntry, SessionRegistry};
pub use service::{AnswerOutcome, InterviewService, NextStep, StartRequest, StartedInterview};
pub use step::{ResumeValue, StepHandler, StepOutcome, StepRegistry, SuspendPrompt};
