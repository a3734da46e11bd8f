//! Scripted oracle for tests: plays back preset questions and evaluations
//! in order and records every request it receives.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::contracts::{
    ClosingRequest, EvaluationRequest, GeneratedQuestion, Hint, HintRequest, QuestionRequest,
    SpokenClosing, SpokenTransition, TransitionRequest,
};
use crate::oracle::Oracle;
use parley_types::{Evaluation, ParleyError, Result};

pub struct ScriptedOracle {
    questions: Mutex<Vec<String>>,
    evaluations: Mutex<Vec<Evaluation>>,
    question_counter: AtomicU32,
    fail_questions: bool,
    fail_transitions: bool,
    fail_closing: bool,
    question_requests: Mutex<Vec<QuestionRequest>>,
    evaluation_requests: Mutex<Vec<EvaluationRequest>>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self {
            questions: Mutex::new(Vec::new()),
            evaluations: Mutex::new(Vec::new()),
            question_counter: AtomicU32::new(0),
            fail_questions: false,
            fail_transitions: false,
            fail_closing: false,
            question_requests: Mutex::new(Vec::new()),
            evaluation_requests: Mutex::new(Vec::new()),
        }
    }

    /// Questions returned in order; once exhausted, numbered filler questions
    /// are generated so long interviews keep running.
    pub fn with_questions(self, questions: Vec<&str>) -> Self {
        *self.questions.lock().unwrap() = questions.iter().rev().map(|q| q.to_string()).collect();
        self
    }

    /// Evaluations returned in order; once exhausted, a neutral 5.0 evaluation
    /// is returned.
    pub fn with_evaluations(self, evaluations: Vec<Evaluation>) -> Self {
        let mut reversed = evaluations;
        reversed.reverse();
        *self.evaluations.lock().unwrap() = reversed;
        self
    }

    /// Make every question call fail with malformed output.
    pub fn failing_questions(mut self) -> Self {
        self.fail_questions = true;
        self
    }

    /// Make every transition call fail.
    pub fn failing_transitions(mut self) -> Self {
        self.fail_transitions = true;
        self
    }

    /// Make the closing narration call fail.
    pub fn failing_closing(mut self) -> Self {
        self.fail_closing = true;
        self
    }

    /// Shorthand for a playback evaluation with the given score and topic.
    pub fn eval(score: f64, topic: &str) -> Evaluation {
        Evaluation {
            score,
            topic: topic.to_string(),
            strengths: vec![format!("Strength on {topic}")],
            weaknesses: vec![format!("Weakness on {topic}")],
            feedback: format!("Feedback about {topic}."),
        }
    }

    pub fn question_requests(&self) -> Vec<QuestionRequest> {
        self.question_requests.lock().unwrap().clone()
    }

    pub fn evaluation_requests(&self) -> Vec<EvaluationRequest> {
        self.evaluation_requests.lock().unwrap().clone()
    }
}

impl Default for ScriptedOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn question(&self, req: &QuestionRequest) -> Result<GeneratedQuestion> {
        self.question_requests.lock().unwrap().push(req.clone());
        if self.fail_questions {
            return Err(ParleyError::OracleMalformedOutput {
                call_site: "question".into(),
                detail: "scripted failure".into(),
            });
        }
        let n = self.question_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let question = self
            .questions
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| format!("Scripted question {n}?"));
        Ok(GeneratedQuestion { question })
    }

    async fn evaluation(&self, req: &EvaluationRequest) -> Result<Evaluation> {
        self.evaluation_requests.lock().unwrap().push(req.clone());
        Ok(self
            .evaluations
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Self::eval(5.0, "general")))
    }

    async fn transition(&self, _req: &TransitionRequest) -> Result<SpokenTransition> {
        if self.fail_transitions {
            return Err(ParleyError::Other("scripted transition failure".into()));
        }
        Ok(SpokenTransition {
            transition: "Alright, let's keep going.".into(),
        })
    }

    async fn hint(&self, req: &HintRequest) -> Result<Hint> {
        Ok(Hint {
            hint: format!("Think about the fundamentals behind: {}", req.question),
        })
    }

    async fn closing(&self, _req: &ClosingRequest) -> Result<SpokenClosing> {
        if self.fail_closing {
            return Err(ParleyError::Other("scripted closing failure".into()));
        }
        Ok(SpokenClosing {
            spoken_closing: "Thanks for your time today; keep practicing.".into(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
