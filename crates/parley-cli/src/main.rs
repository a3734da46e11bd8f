//! Console runner for Parley mock interviews.
//!
//! Drives a full interview over stdin/stdout: questions in, typed answers
//! out, with `/hint` and `/end` escape commands. Coach mode pauses after
//! each evaluation until the candidate presses Enter.

use std::io::Write;
use std::sync::Arc;

use clap::Parser;

use parley_engine::{AnswerOutcome, InterviewService, NextStep, StartRequest};
use parley_oracle::{provider_from_env, ProviderOracle};
use parley_types::config::END_INTERVIEW_SENTINEL;

#[derive(Parser)]
#[command(name = "parley", version, about = "Adaptive mock technical interview in your terminal")]
struct Cli {
    /// Role being interviewed for (e.g. "Backend Engineer")
    #[arg(short, long)]
    role: String,

    /// Experience level (e.g. "3 years")
    #[arg(short, long)]
    experience: String,

    /// Free-form description of the role
    #[arg(long)]
    role_description: Option<String>,

    /// Interviewer persona: strict or coach
    #[arg(short, long, default_value = "strict")]
    persona: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn read_line(prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn print_summary(summary: &parley_types::InterviewSummary, spoken_closing: &str) {
    println!("\n=== Interview summary ===");
    println!("Average score: {}/10", summary.average_score);
    println!("Verdict: {}", summary.verdict);
    if !summary.weak_topics.is_empty() {
        println!("Weak topics: {}", summary.weak_topics.join(", "));
    }
    println!("\nWhat went well:");
    for item in &summary.what_went_well {
        println!("  - {item}");
    }
    println!("Areas for improvement:");
    for item in &summary.areas_for_improvement {
        println!("  - {item}");
    }
    println!("\n{spoken_closing}");
}

/// Print a non-final outcome. Returns `true` when the flow is paused at
/// coach-mode feedback.
fn print_next(outcome: &AnswerOutcome, question_number: &mut u32) -> bool {
    let AnswerOutcome::Next {
        step,
        question,
        spoken_transition,
        feedback,
        ..
    } = outcome
    else {
        return false;
    };
    match step {
        NextStep::Feedback => {
            if let Some(feedback) = feedback {
                println!("\nFeedback: {feedback}");
            }
            true
        }
        NextStep::Question => {
            *question_number += 1;
            if let Some(transition) = spoken_transition {
                println!("\n{transition}");
            }
            println!("\nQuestion {question_number}: {question}");
            false
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let provider = provider_from_env()?;
    let service = InterviewService::new(Arc::new(ProviderOracle::new(provider)));

    let started = service
        .start(StartRequest {
            role: cli.role,
            experience: cli.experience,
            role_description: cli.role_description,
            persona: Some(cli.persona),
        })
        .await?;

    println!("Interview started. Answer each question; /hint for a nudge, /end to stop.");
    let mut question_number = 1u32;
    println!("\nQuestion 1: {}", started.question);

    let mut awaiting_continue = false;
    loop {
        if awaiting_continue {
            read_line("\n[Enter to continue] ")?;
            let outcome = service.proceed(started.session_id).await?;
            if let AnswerOutcome::Final { summary, spoken_closing, .. } = &outcome {
                print_summary(summary, spoken_closing);
                break;
            }
            awaiting_continue = print_next(&outcome, &mut question_number);
            continue;
        }

        let input = read_line("> ")?;
        let outcome = match input.as_str() {
            "/hint" => {
                let hint = service.hint(started.session_id).await?;
                println!("Hint: {}", hint.hint);
                continue;
            }
            "/end" => service.submit_answer(started.session_id, END_INTERVIEW_SENTINEL).await?,
            answer => service.submit_answer(started.session_id, answer).await?,
        };

        if let AnswerOutcome::Final { summary, spoken_closing, .. } = &outcome {
            print_summary(summary, spoken_closing);
            break;
        }
        awaiting_continue = print_next(&outcome, &mut question_number);
    }

    Ok(())
}
