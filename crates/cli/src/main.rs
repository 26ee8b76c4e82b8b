//! `workflow-engine` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`    — start the HTTP API server.
//! - `validate` — structurally validate a workflow definition JSON file.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use engine::WorkflowService;

#[derive(Parser)]
#[command(
    name = "workflow-engine",
    about = "Configurable workflow (state-machine) definition and execution engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
    },
    /// Validate a workflow definition JSON file.
    Validate {
        /// Path to the workflow definition JSON file.
        path: std::path::PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind } => {
            info!("Starting API server on {bind}");
            let service = Arc::new(WorkflowService::new());
            api::serve(&bind, service).await.expect("server failed");
        }
        Command::Validate { path } => {
            let content = std::fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("cannot read file {}: {e}", path.display()));

            let def: engine::WorkflowDefinition = serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("invalid JSON: {e}"));

            match engine::validate_structure(&def) {
                Ok(()) => {
                    println!(
                        "✅ Workflow '{}' is well-formed ({} states, {} actions)",
                        def.id,
                        def.states.len(),
                        def.actions.len()
                    );
                }
                Err(e) => {
                    eprintln!("❌ Validation failed: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
