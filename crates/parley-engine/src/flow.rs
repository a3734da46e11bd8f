//! Flow graph: one state-machine definition parameterized by persona.
//!
//! Strict wiring: Ask → AwaitAnswer → Evaluate → Decide → {Transition → Ask | End}.
//! Coach wiring inserts AwaitContinue between Evaluate and Decide. The
//! Decide branch is the only conditional edge; its predicate is
//! `record.end_interview`.

use serde::{Deserialize, Serialize};

use crate::record::InterviewRecord;
use parley_types::Persona;

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Ask,
    AwaitAnswer,
    Evaluate,
    AwaitContinue,
    Decide,
    Transition,
    End,
}

impl Step {
    /// Suspend points halt the flow and checkpoint it for an external resume.
    pub fn is_suspend_point(self) -> bool {
        matches!(self, Step::AwaitAnswer | Step::AwaitContinue)
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Step::Ask => "ask",
            Step::AwaitAnswer => "await_answer",
            Step::Evaluate => "evaluate",
            Step::AwaitContinue => "await_continue",
            Step::Decide => "decide",
            Step::Transition => "transition",
            Step::End => "end",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// FlowGraph
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct FlowGraph {
    persona: Persona,
}

impl FlowGraph {
    pub fn for_persona(persona: Persona) -> Self {
        Self { persona }
    }

    /// Initial step of every interview.
    pub fn entry(&self) -> Step {
        Step::Ask
    }

    /// Successor of `step`. `None` only for the terminal step.
    pub fn next(&self, step: Step, record: &InterviewRecord) -> Option<Step> {
        match step {
            Step::Ask => Some(Step::AwaitAnswer),
            Step::AwaitAnswer => Some(Step::Evaluate),
            Step::Evaluate => Some(match self.persona {
                Persona::Coach => Step::AwaitContinue,
                Persona::Strict => Step::Decide,
            }),
            Step::AwaitContinue => Some(Step::Decide),
            Step::Decide => Some(if record.end_interview {
                Step::End
            } else {
                Step::Transition
            }),
            Step::Transition => Some(Step::Ask),
            Step::End => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(persona: Persona) -> InterviewRecord {
        InterviewRecord::new("Backend Engineer", "3 years", "", persona)
    }

    #[test]
    fn strict_wiring_skips_await_continue() {
        let graph = FlowGraph::for_persona(Persona::Strict);
        let r = record(Persona::Strict);

        assert_eq!(graph.entry(), Step::Ask);
        assert_eq!(graph.next(Step::Ask, &r), Some(Step::AwaitAnswer));
        assert_eq!(graph.next(Step::AwaitAnswer, &r), Some(Step::Evaluate));
        assert_eq!(graph.next(Step::Evaluate, &r), Some(Step::Decide));
        assert_eq!(graph.next(Step::Transition, &r), Some(Step::Ask));
    }

    #[test]
    fn coach_wiring_inserts_await_continue() {
        let graph = FlowGraph::for_persona(Persona::Coach);
        let r = record(Persona::Coach);

        assert_eq!(graph.next(Step::Evaluate, &r), Some(Step::AwaitContinue));
        assert_eq!(graph.next(Step::AwaitContinue, &r), Some(Step::Decide));
    }

    #[test]
    fn decide_branches_on_end_interview() {
        let graph = FlowGraph::for_persona(Persona::Strict);
        let mut r = record(Persona::Strict);

        assert_eq!(graph.next(Step::Decide, &r), Some(Step::Transition));
        r.end_interview = true;
        assert_eq!(graph.next(Step::Decide, &r), Some(Step::End));
    }

    #[test]
    fn end_is_terminal() {
        let graph = FlowGraph::for_persona(Persona::Coach);
        assert_eq!(graph.next(Step::End, &record(Persona::Coach)), None);
    }

    #[test]
    fn suspend_points() {
        assert!(Step::AwaitAnswer.is_suspend_point());
        assert!(Step::AwaitContinue.is_suspend_point());
        assert!(!Step::Ask.is_suspend_point());
        assert!(!Step::Decide.is_suspend_point());
        assert!(!Step::End.is_suspend_point());
    }

    #[test]
    fn step_serializes_to_snake_case() {
        assert_eq!(serde_json::to_string(&Step::AwaitAnswer).unwrap(), "\"await_answer\"");
        assert_eq!(serde_json::to_string(&Step::End).unwrap(), "\"end\"");
    }
}
