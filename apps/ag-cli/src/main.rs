//! # ag-cli
//!
//! Workflow comparison demo for the agent authorization gate.
//!
//! Runs one high-risk finance action (a wire-transfer reversal) through
//! four workflow modes — manual checklist, framework-agentic, ungated
//! agent, gated agent — and prints the side-by-side results as JSON.
//!
//! ```text
//! ag compare            # sample input, pretty JSON on stdout
//! ag compare --approval-token approved-123
//! ```

mod workflow;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use workflow::{run_workflow_comparison, sample_input};

/// Agent authorization gate demo.
#[derive(Parser)]
#[command(name = "ag", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the finance workflow comparison over a sample input.
    Compare {
        /// Attach an explicit human approval token to the request.
        #[arg(long)]
        approval_token: Option<String>,
        /// Mark the beneficiary as validated in the evidence block.
        #[arg(long)]
        beneficiary_validated: bool,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so the JSON result stays clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Compare {
            approval_token,
            beneficiary_validated,
        } => {
            let mut input = sample_input();
            input.approval_token = approval_token;
            if beneficiary_validated {
                input.evidence.beneficiary_validated = true;
            }

            tracing::info!(request_id = %input.request_id, "running workflow comparison");
            let result = run_workflow_comparison(&input);

            let report = serde_json::json!({ "input": input, "result": result });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}
