//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::config::validate_output_path;
use std::io::{BufRead, Write};
use std::path::Path;
use sxm_core::{
    AcknowledgingNotifier, Advance, AnswerValue, AssessmentResult, AssessmentSession, Content,
    ResultNotifier, ShareLinks, SxmError,
};

fn io_error(e: std::io::Error) -> SxmError {
    SxmError::IoError(e.to_string())
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// ANSWER PARSING
// =============================================================================

/// Parse a comma-separated answer list into `(question index, value)` pairs.
///
/// Position in the list is the question index. Values are range-checked
/// later, when they are recorded.
pub fn parse_answers(raw: &str) -> Result<Vec<(usize, u8)>, SxmError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    raw.split(',')
        .enumerate()
        .map(|(index, token)| {
            let token = token.trim();
            token.parse::<u8>().map(|value| (index, value)).map_err(|_| {
                SxmError::InvalidInput(format!(
                    "Invalid answer '{}' for question {}",
                    token,
                    index.saturating_add(1)
                ))
            })
        })
        .collect()
}

fn session_from_list<'c>(content: &'c Content, raw: &str) -> Result<AssessmentSession<'c>, SxmError> {
    AssessmentSession::from_answers(content, parse_answers(raw)?)
}

// =============================================================================
// RESULT RENDERING
// =============================================================================

/// Write the human-readable result summary.
pub fn write_result<W: Write>(
    out: &mut W,
    session: &AssessmentSession<'_>,
    result: &AssessmentResult,
    verbose: bool,
) -> Result<(), SxmError> {
    let profile = &result.profile;

    writeln!(out, "SXM Maturity Assessment").map_err(io_error)?;
    writeln!(out, "=======================").map_err(io_error)?;
    writeln!(out, "Stage:    {} ({})", profile.label, result.stage).map_err(io_error)?;
    writeln!(out, "Urgency:  {}", profile.urgency).map_err(io_error)?;
    writeln!(out, "Score:    {}/5.0", result.display_score()).map_err(io_error)?;
    writeln!(
        out,
        "Answered: {} / {}",
        result.answered, result.total_questions
    )
    .map_err(io_error)?;
    writeln!(out).map_err(io_error)?;
    writeln!(out, "{}", profile.message).map_err(io_error)?;

    if verbose {
        writeln!(out).map_err(io_error)?;
        writeln!(out, "Your Answers:").map_err(io_error)?;
        for (index, question) in session.content().questions().iter().enumerate() {
            let chosen = session
                .answer(index)
                .and_then(|value| question.option_for(value))
                .map_or("(unanswered)", |option| option.text.as_str());
            writeln!(out, "  {}. {}", index.saturating_add(1), chosen).map_err(io_error)?;
        }
    }

    writeln!(out).map_err(io_error)?;
    writeln!(out, "Capability Breakdown:").map_err(io_error)?;
    for entry in result.breakdown.entries() {
        writeln!(out, "  {:<24} {}/5", entry.category, entry.score).map_err(io_error)?;
    }

    writeln!(out).map_err(io_error)?;
    writeln!(out, "Next Stage: {}", profile.next_stage).map_err(io_error)?;
    for (i, area) in profile.focus_areas.iter().enumerate() {
        writeln!(out, "  {}. {}", i.saturating_add(1), area).map_err(io_error)?;
    }

    writeln!(out).map_err(io_error)?;
    writeln!(out, "Recommendations:").map_err(io_error)?;
    for (i, rec) in result.recommendations.iter().enumerate() {
        writeln!(
            out,
            "  {}. {} [{}]",
            i.saturating_add(1),
            rec.category,
            rec.priority
        )
        .map_err(io_error)?;
        writeln!(out, "     {}", rec.description).map_err(io_error)?;
        writeln!(out, "     Key capabilities: {}", rec.tools.join(", ")).map_err(io_error)?;
    }

    Ok(())
}

fn result_json(result: &AssessmentResult) -> serde_json::Value {
    serde_json::json!({
        "score": result.display_score(),
        "complete": result.is_complete(),
        "result": result,
    })
}

// =============================================================================
// QUESTIONS COMMAND
// =============================================================================

/// List the question set.
pub fn cmd_questions(content: &Content, json_mode: bool) -> Result<(), SxmError> {
    if json_mode {
        print_json(&serde_json::json!({
            "count": content.question_count(),
            "questions": content.questions(),
        }));
        return Ok(());
    }

    println!("SXM Maturity Assessment Questions");
    println!("=================================");
    for (index, question) in content.questions().iter().enumerate() {
        println!();
        println!(
            "{}. [{}] {}",
            index.saturating_add(1),
            question.category,
            question.text
        );
        for option in &question.options {
            println!("   {}) {}", option.value, option.text);
        }
    }

    Ok(())
}

// =============================================================================
// TAKE COMMAND
// =============================================================================

/// Walk the questionnaire over `input`, prompting on `out`.
///
/// Typing `r` restarts from the first question. Returns once the last
/// question is answered; running out of input before that is an error.
pub fn run_interactive<'c, R: BufRead, W: Write>(
    content: &'c Content,
    mut input: R,
    out: &mut W,
) -> Result<AssessmentSession<'c>, SxmError> {
    let mut session = AssessmentSession::new(content);
    let mut line = String::new();

    while let Some(question) = session.current_question() {
        writeln!(out).map_err(io_error)?;
        writeln!(
            out,
            "{} ({}% complete)",
            session.question_counter(),
            session.progress_percent()
        )
        .map_err(io_error)?;
        writeln!(out, "[{}] {}", question.category, question.text).map_err(io_error)?;
        for option in &question.options {
            writeln!(out, "  {}) {}", option.value, option.text).map_err(io_error)?;
        }
        write!(out, "Your answer (r to restart): ").map_err(io_error)?;
        out.flush().map_err(io_error)?;

        line.clear();
        if input.read_line(&mut line).map_err(io_error)? == 0 {
            return Err(SxmError::IoError(
                "Input ended before the assessment was complete".to_string(),
            ));
        }

        let choice = line.trim();
        if choice.eq_ignore_ascii_case("r") {
            session.reset();
            writeln!(out, "Assessment restarted.").map_err(io_error)?;
            continue;
        }

        let value = choice
            .parse::<u8>()
            .ok()
            .and_then(|raw| AnswerValue::new(raw).ok())
            .filter(|value| question.option_for(*value).is_some());
        let Some(value) = value else {
            writeln!(out, "Please choose one of the listed options.").map_err(io_error)?;
            continue;
        };

        if session.answer_current(value)? == Advance::Finished {
            break;
        }
    }

    Ok(session)
}

/// Run the interactive walk and write the outcome to `out`.
///
/// In JSON mode the prompts go to `prompts` so `out` carries only the JSON
/// document; otherwise prompts and summary share `out`.
pub fn take_assessment<R: BufRead, W: Write, P: Write>(
    content: &Content,
    input: R,
    out: &mut W,
    prompts: &mut P,
    json_mode: bool,
    verbose: bool,
) -> Result<AssessmentResult, SxmError> {
    if json_mode {
        let session = run_interactive(content, input, prompts)?;
        let result = session.result()?;
        let json = serde_json::to_string_pretty(&result_json(&result))
            .map_err(|e| SxmError::SerializationError(e.to_string()))?;
        writeln!(out, "{}", json).map_err(io_error)?;
        return Ok(result);
    }

    let session = run_interactive(content, input, out)?;
    let result = session.result()?;
    writeln!(out).map_err(io_error)?;
    write_result(out, &session, &result, verbose)?;
    Ok(result)
}

/// Take the assessment on stdin/stdout.
pub fn cmd_take(
    content: &Content,
    json_mode: bool,
    verbose: bool,
    report: Option<&Path>,
) -> Result<(), SxmError> {
    let stdin = std::io::stdin();
    let result = take_assessment(
        content,
        stdin.lock(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
        json_mode,
        verbose,
    )?;

    if let Some(path) = report {
        write_report(content, &result, path, json_mode)?;
    }

    Ok(())
}

// =============================================================================
// SCORE COMMAND
// =============================================================================

/// Score a comma-separated answer list.
pub fn cmd_score(
    content: &Content,
    json_mode: bool,
    verbose: bool,
    answers: &str,
) -> Result<(), SxmError> {
    let session = session_from_list(content, answers)?;
    let result = session.result()?;

    if json_mode {
        print_json(&result_json(&result));
        return Ok(());
    }

    write_result(&mut std::io::stdout(), &session, &result, verbose)
}

// =============================================================================
// REPORT COMMAND
// =============================================================================

fn write_report(
    content: &Content,
    result: &AssessmentResult,
    path: &Path,
    json_mode: bool,
) -> Result<(), SxmError> {
    let validated = validate_output_path(path)?;
    let report = result.report(content);

    std::fs::write(&validated, report.body.as_bytes())
        .map_err(|e| SxmError::IoError(format!("Write report: {}", e)))?;

    tracing::info!(path = %validated.display(), "Report written");
    if json_mode {
        eprintln!("Report written to {}", validated.display());
    } else {
        println!("Report written to {}", validated.display());
    }
    Ok(())
}

/// Write the text report for a set of answers.
pub fn cmd_report(content: &Content, answers: &str, output: Option<&Path>) -> Result<(), SxmError> {
    let result = session_from_list(content, answers)?.result()?;
    let path = output.unwrap_or_else(|| Path::new(content.download_filename()));
    write_report(content, &result, path, false)
}

// =============================================================================
// SHARE COMMAND
// =============================================================================

/// Print the share links for a page.
pub fn cmd_share(content: &Content, json_mode: bool, url: &str) -> Result<(), SxmError> {
    let request = api::ShareRequest {
        url: url.to_string(),
    };
    let links: ShareLinks = request.to_links(content)?;

    if json_mode {
        print_json(&serde_json::json!({
            "linkedin": links.linkedin,
            "twitter": links.twitter,
        }));
        return Ok(());
    }

    println!("LinkedIn: {}", links.linkedin);
    println!("Twitter:  {}", links.twitter);
    Ok(())
}

// =============================================================================
// NOTIFY COMMAND
// =============================================================================

/// Request the result by email.
pub fn cmd_notify(
    content: &Content,
    json_mode: bool,
    email: &str,
    answers: &str,
) -> Result<(), SxmError> {
    let result = session_from_list(content, answers)?.result()?;
    let confirmation = AcknowledgingNotifier.notify(email, &result)?;

    tracing::info!(
        email = %confirmation.email,
        stage = result.stage.number(),
        "Result notification requested"
    );

    if json_mode {
        print_json(&serde_json::json!({
            "email": confirmation.email,
            "message": confirmation.message,
        }));
        return Ok(());
    }

    println!("{}", confirmation.message);
    Ok(())
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(content: Content, host: &str, port: u16) -> Result<(), SxmError> {
    println!("SXM Assessment Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:      {}", host);
    println!("  Port:      {}", port);
    println!("  Questions: {}", content.question_count());
    println!();
    println!("Endpoints:");
    println!("  GET  /health    - Health check");
    println!("  GET  /questions - Question set");
    println!("  POST /assess    - Score answers");
    println!("  POST /report    - Download text report");
    println!("  POST /share     - Share links");
    println!("  POST /notify    - Email results");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, content).await
}

// =============================================================================
// TESTS
// =============================================================================
