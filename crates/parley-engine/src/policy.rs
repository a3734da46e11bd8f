//! Pure scoring and progression policy.
//!
//! Everything here is a plain function of its inputs: difficulty
//! adjustment, termination, the verdict ladder, and summary aggregation.
//! No oracle calls, no registry access.

use parley_types::config::{
    MAX_QUESTIONS, SCORE_EXCELLENT, SCORE_GOOD, SCORE_NEEDS_IMPROVEMENT, SCORE_SATISFACTORY,
    STRONG_ANSWER_THRESHOLD, WEAK_ANSWER_THRESHOLD,
};
use parley_types::Difficulty;

// ---------------------------------------------------------------------------
// Difficulty adjustment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyDecision {
    pub difficulty: Difficulty,
    pub flag_weak_topic: bool,
}

/// Adapt difficulty from the latest score.
///
/// Below the weak threshold: drop to easy and flag the topic. At or above
/// the strong threshold: raise to hard. In between: hold the current level.
pub fn adjust_difficulty(score: f64, current: Difficulty) -> DifficultyDecision {
    if score < WEAK_ANSWER_THRESHOLD {
        DifficultyDecision {
            difficulty: Difficulty::Easy,
            flag_weak_topic: true,
        }
    } else if score >= STRONG_ANSWER_THRESHOLD {
        DifficultyDecision {
            difficulty: Difficulty::Hard,
            flag_weak_topic: false,
        }
    } else {
        DifficultyDecision {
            difficulty: current,
            flag_weak_topic: false,
        }
    }
}

/// Termination check, evaluated during Decide before the counter increments.
/// True exactly on the final cycle, so the interview asks `MAX_QUESTIONS`
/// questions and then ends.
pub fn should_end(question_count: u32) -> bool {
    question_count >= MAX_QUESTIONS - 1
}

// ---------------------------------------------------------------------------
// Summary aggregation
// ---------------------------------------------------------------------------

/// Mean score, or 0.0 for an empty history.
pub fn average(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Verdict ladder over the average score.
pub fn verdict(average: f64) -> &'static str {
    if average >= SCORE_EXCELLENT {
        "Excellent performance"
    } else if average >= SCORE_GOOD {
        "Good performance"
    } else if average >= SCORE_SATISFACTORY {
        "Satisfactory performance"
    } else if average >= SCORE_NEEDS_IMPROVEMENT {
        "Needs improvement"
    } else {
        "Significant gaps identified"
    }
}

fn is_placeholder(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return true;
    }
    matches!(trimmed.to_lowercase().as_str(), "n/a" | "na" | "none" | "-")
}

/// Collect up to 3 highlights: drop empty/placeholder entries, dedup
/// case-insensitively keeping the first occurrence.
pub fn collect_highlights<'a>(items: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if out.len() == 3 {
            break;
        }
        if is_placeholder(item) {
            continue;
        }
        let key = item.trim().to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(item.trim().to_string());
    }
    out
}

/// Fallback strengths when no usable ones survived filtering.
pub fn default_strengths(average: f64) -> Vec<String> {
    if average >= SCORE_GOOD {
        vec![
            "Strong overall command of the subject matter".to_string(),
            "Clear and confident delivery".to_string(),
        ]
    } else if average >= SCORE_SATISFACTORY {
        vec![
            "Maintained composure across questions".to_string(),
            "Showed willingness to reason through problems".to_string(),
        ]
    } else {
        vec!["Engaged with every question asked".to_string()]
    }
}

/// Fallback weaknesses when no usable ones survived filtering.
pub fn default_weaknesses(average: f64) -> Vec<String> {
    if average >= SCORE_GOOD {
        vec!["Add more concrete examples from past work".to_string()]
    } else if average >= SCORE_SATISFACTORY {
        vec![
            "Deepen answers with implementation detail".to_string(),
            "Support claims with concrete examples".to_string(),
        ]
    } else {
        vec![
            "Revisit the fundamentals of the role's core topics".to_string(),
            "Practice structuring answers around concrete examples".to_string(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
