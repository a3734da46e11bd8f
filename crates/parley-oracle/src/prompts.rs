//! Prompt construction for each oracle call site.
//!
//! The system prompts carry the behavioral contract (one question at a time,
//! scoring bands, no answer spoilers in hints); the user prompts carry the
//! per-session context. Both halves are plain strings so the provider layer
//! stays a dumb pipe.

use crate::contracts::{ClosingRequest, EvaluationRequest, HintRequest, QuestionRequest, TransitionRequest};

pub const QUESTION_SYSTEM: &str = "\
Generate exactly ONE professional interview question.

Context:
You are an experienced technical interviewer.
Ask questions that are relevant to the role and experience level.
Sound natural, not scripted. Questions should assess real-world competency.

Rules:
- Ask only ONE thing.
- Use at most ONE interrogative word (what OR why OR how OR explain).
- Do NOT combine multiple sub-questions or use conjunctions like 'and', 'also', 'as well as'.
- Do NOT ask for definitions and examples in the same question.
- Make questions conversational and engaging.

Variation:
- Rotate the question style across the interview: behavioral, technical,
  problem-solving, scenario, deep-dive, best-practices, experience-focused.
- Do not use the same style twice in a row.

Adaptation:
- If difficulty is 'easy': use beginner-friendly language, focus on fundamentals.
- If difficulty is 'hard': increase complexity; ask about edge cases, optimization, or system design.
- Avoid the listed weak topics or address them from a different angle.
- Build on previously asked questions without repeating any of them.

Return JSON only using the schema: {\"question\": \"string\"}";

pub const EVALUATION_SYSTEM: &str = "\
Evaluate the candidate's answer holistically.

Assessment dimensions:
1. CORRECTNESS: is the core concept right?
2. CLARITY: is it well-explained and easy to follow?
3. DEPTH: does it show genuine understanding beyond basics?

Scoring bands (0-10):
0-2: Incorrect or irrelevant. Fundamental misunderstandings.
3-4: Very weak. Vague, shallow, or mostly incorrect.
5-6: Basic. Core idea correct but shallow or incomplete.
7-8: Strong. Correct, clear, structured, with relevant examples.
9-10: Excellent. Fully correct, nuanced, insightful.

Scoring rules:
- Do NOT average; choose the closest single band.
- Do NOT give 7+ without at least one concrete example or applied reasoning.
- Do NOT give 9-10 unless the explanation is complete and demonstrates deep understanding.

Also produce:
- the primary topic of the question (short phrase),
- 2-3 concrete strengths and 2-3 concrete weaknesses (observations, not advice),
- concise interviewer-style feedback: start with what went well, address
  improvements constructively, never give the full model answer, never repeat
  the numeric score.

Return JSON only using the schema: \
{\"score\": number, \"topic\": \"string\", \"strengths\": [\"string\"], \
\"weaknesses\": [\"string\"], \"feedback\": \"string\"}";

pub const TRANSITION_SYSTEM: &str = "\
Generate a very short spoken transition between interview questions.
One sentence only. Do not give feedback or advice. Do not ask a question.
Sound professional and natural.
Return JSON only: {\"transition\": \"string\"}";

pub const HINT_SYSTEM: &str = "\
Give the candidate a nudge toward the current question.
1-2 sentences. Point at the area to think about; do NOT reveal the answer
or name the specific mechanism the question is after.
Return JSON only: {\"hint\": \"string\"}";

pub const CLOSING_SYSTEM: &str = "\
Generate a professional, honest interview closing statement.

You are concluding the interview as a senior technical interviewer.
Acknowledge the overall performance honestly: praise genuine strength,
name gaps directly when performance was weak, and point at the weak topics
as priorities for focused learning. Synthesize into narrative; do not read
scores or lists aloud. End on a constructive note.
Return JSON only: {\"spoken_closing\": \"string\"}";

// ---------------------------------------------------------------------------
// User-message builders
// ---------------------------------------------------------------------------

pub fn question_user(req: &QuestionRequest) -> String {
    let weak_topics = if req.weak_topics.is_empty() {
        "None".to_string()
    } else {
        req.weak_topics.join(", ")
    };
    let asked = if req.asked_questions.is_empty() {
        "None".to_string()
    } else {
        req.asked_questions
            .iter()
            .map(|q| format!("- {q}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let role_description = if req.role_description.trim().is_empty() {
        "Not provided".to_string()
    } else {
        req.role_description.clone()
    };

    format!(
        "Role: {role}\n\
         Experience: {experience}\n\
         Role description: {role_description}\n\
         Difficulty: {difficulty}\n\
         Question number: {number}\n\
         Weak topics: {weak_topics}\n\n\
         Previously asked questions:\n{asked}",
        role = req.role,
        experience = req.experience,
        difficulty = req.difficulty,
        number = req.question_number,
    )
}

pub fn evaluation_user(req: &EvaluationRequest) -> String {
    format!(
        "Question:\n{}\n\nCandidate answer:\n{}",
        req.question, req.answer
    )
}

pub fn transition_user(req: &TransitionRequest) -> String {
    match req.last_score {
        Some(score) => format!("Last answer score: {score}"),
        None => "Last answer score: none".to_string(),
    }
}

pub fn hint_user(req: &HintRequest) -> String {
    format!(
        "Question:\n{}\n\nRole: {}\nExperience: {}",
        req.question, req.role, req.experience
    )
}

pub fn closing_user(req: &ClosingRequest) -> String {
    let weak_topics = if req.weak_topics.is_empty() {
        "None".to_string()
    } else {
        req.weak_topics.join(", ")
    };
    format!(
        "Interview summary:\n\
         Average score: {avg}/10\n\
         Verdict: {verdict}\n\
         Weak topics: {weak_topics}",
        avg = req.average_score,
        verdict = req.verdict,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
