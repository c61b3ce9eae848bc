//! # SXM CLI Module
//!
//! This module implements the CLI interface for SXM.
//!
//! ## Available Commands
//!
//! - `questions` - List the question set
//! - `take` - Take the assessment interactively
//! - `score` - Score a comma-separated answer list
//! - `report` - Write the text report to a file
//! - `share` - Print share links for a page
//! - `notify` - Request the result by email
//! - `server` - Start the HTTP server

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sxm_core::SxmError;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// SXM - Software Experience Maturity Assessment
///
/// Five questions, one maturity stage, and the two capability gaps worth
/// closing first.
#[derive(Parser, Debug)]
#[command(name = "sxm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show the chosen option text for every answer
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// TOML content bundle replacing the built-in questionnaire
    #[arg(short = 'C', long, global = true)]
    pub content: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the assessment questions
    Questions,

    /// Take the assessment interactively
    Take {
        /// Also write the text report to this path
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Score answers given as a comma-separated list (e.g. 1,2,1,2,1)
    Score {
        /// Answer values in question order
        #[arg(short, long)]
        answers: String,
    },

    /// Write the text report for a set of answers
    Report {
        /// Answer values in question order
        #[arg(short, long)]
        answers: String,

        /// Output file path (defaults to the content's download filename)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print LinkedIn and Twitter share links for a page
    Share {
        /// Page URL to share
        #[arg(short, long)]
        url: String,
    },

    /// Request the result by email
    Notify {
        /// Recipient address
        #[arg(short, long)]
        email: String,

        /// Answer values in question order
        #[arg(short, long)]
        answers: String,
    },

    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), SxmError> {
    let content = crate::config::load_content(cli.content.as_deref())?;
    let json_mode = cli.json_mode;
    let verbose = cli.verbose;

    match cli.command {
        Some(Commands::Questions) | None => cmd_questions(&content, json_mode),
        Some(Commands::Take { report }) => cmd_take(&content, json_mode, verbose, report.as_deref()),
        Some(Commands::Score { answers }) => cmd_score(&content, json_mode, verbose, &answers),
        Some(Commands::Report { answers, output }) => {
            cmd_report(&content, &answers, output.as_deref())
        }
        Some(Commands::Share { url }) => cmd_share(&content, json_mode, &url),
        Some(Commands::Notify { email, answers }) => {
            cmd_notify(&content, json_mode, &email, &answers)
        }
        Some(Commands::Server { host, port }) => cmd_server(content, &host, port).await,
    }
}
