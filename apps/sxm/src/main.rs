//! # SXM - Software Experience Maturity Assessment
//!
//! The main binary around the `sxm-core` scoring engine.
//!
//! This application provides:
//! - Interactive terminal assessment
//! - One-shot scoring, report, share and notify commands
//! - Stateless HTTP REST API server (axum-based)
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                  apps/sxm (THE BINARY)                │
//! │                                                       │
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐  │
//! │  │    CLI      │   │  HTTP API   │   │   Content   │  │
//! │  │   (clap)    │   │   (axum)    │   │   (TOML)    │  │
//! │  └──────┬──────┘   └──────┬──────┘   └──────┬──────┘  │
//! │         └─────────────────┼─────────────────┘         │
//! │                           ▼                           │
//! │                   ┌──────────────┐                    │
//! │                   │   sxm-core   │                    │
//! │                   │ (THE LOGIC)  │                    │
//! │                   └──────────────┘                    │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Take the assessment in the terminal
//! sxm take --report results.txt
//!
//! # Score answers directly
//! sxm score --answers 1,2,1,2,1
//!
//! # Start the HTTP server
//! sxm server --host 0.0.0.0 --port 8080
//! ```

use clap::Parser;
use sxm::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // SXM_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("SXM_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sxm=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  ███████╗██╗  ██╗███╗   ███╗
  ██╔════╝╚██╗██╔╝████╗ ████║
  ███████╗ ╚███╔╝ ██╔████╔██║
  ╚════██║ ██╔██╗ ██║╚██╔╝██║
  ███████║██╔╝ ██╗██║ ╚═╝ ██║
  ╚══════╝╚═╝  ╚═╝╚═╝     ╚═╝

  Software Experience Maturity Assessment v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
