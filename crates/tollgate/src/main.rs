// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tollgate - pay-per-request gateway for model responses.
//!
//! This is the binary entry point: it loads configuration, wires the
//! adapters, runs one query through the paid workflow, and prints the
//! monitoring report.

mod agent;
mod app;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::App;

/// Tollgate - pay-per-request gateway for model responses.
#[derive(Parser, Debug)]
#[command(name = "tollgate", version, about, long_about = None)]
struct Cli {
    /// Query to process.
    #[arg(long)]
    query: Option<String>,

    /// Path to a file containing the query.
    #[arg(long, conflicts_with = "query")]
    file: Option<PathBuf>,

    /// Export the report to JSON after the run.
    #[arg(long)]
    export_report: bool,

    /// Path to a TOML config file (defaults to the XDG hierarchy).
    #[arg(long)]
    config: Option<PathBuf>,

    /// LLM provider to use, overriding the config.
    #[arg(long)]
    provider: Option<String>,

    /// Model to use with the selected provider, overriding the config.
    #[arg(long)]
    model: Option<String>,

    /// List available models for the selected provider and exit.
    #[arg(long)]
    list_models: bool,

    /// Agent to pre-process the query with.
    #[arg(long)]
    agent: Option<String>,

    /// List configured agents and exit.
    #[arg(long)]
    list_agents: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match cli.config.as_deref() {
        Some(path) => tollgate_config::load_and_validate_path(path),
        None => tollgate_config::load_and_validate(),
    }
    .unwrap_or_else(|errors| {
        tollgate_config::render_errors(&errors);
        std::process::exit(1);
    });

    // CLI overrides beat file and environment configuration.
    if let Some(provider) = &cli.provider {
        config.llm.provider = provider.clone();
    }
    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }

    init_tracing(&config.agent.log_level);

    if cli.list_models {
        return match app::list_models(&config.llm.provider) {
            Ok(models) => {
                println!("Available models for {}:", config.llm.provider);
                for model in models {
                    println!("  - {model}");
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                output::print_error(&e.to_string());
                ExitCode::FAILURE
            }
        };
    }

    if cli.list_agents {
        println!("Available agents:");
        for (name, definition) in &config.agents.definitions {
            println!("  - {name}: {}", definition.description);
        }
        if let Some(default) = &config.agents.default {
            println!("\nDefault agent: {default}");
        }
        return ExitCode::SUCCESS;
    }

    let query = match resolve_query(&cli) {
        Ok(query) => query,
        Err(message) => {
            output::print_error(&message);
            return ExitCode::FAILURE;
        }
    };

    let agent_name = cli.agent.as_deref();

    let app = match App::initialize(config) {
        Ok(app) => app,
        Err(e) => {
            output::print_error(&format!("Initialization failed: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let run_failed = match app.process_query(&query, agent_name).await {
        Ok(_) => false,
        Err(e) => {
            output::print_error(&e.to_string());
            true
        }
    };

    if let Err(e) = app.show_report(cli.export_report) {
        output::print_error(&format!("Report export failed: {e}"));
        return ExitCode::FAILURE;
    }

    if run_failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Resolve the query text from `--query` or `--file`.
fn resolve_query(cli: &Cli) -> Result<String, String> {
    if let Some(query) = &cli.query {
        return Ok(query.clone());
    }
    if let Some(path) = &cli.file {
        return std::fs::read_to_string(path)
            .map_err(|e| format!("Could not read query file {}: {e}", path.display()));
    }
    Err("Either --query or --file must be provided".to_string())
}

/// Install the tracing subscriber, honoring `RUST_LOG` over the config level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_flag_wins() {
        let cli = Cli::parse_from(["tollgate", "--query", "hello"]);
        assert_eq!(resolve_query(&cli).unwrap(), "hello");
    }

    #[test]
    fn file_flag_reads_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("query.txt");
        std::fs::write(&path, "from a file").unwrap();

        let cli = Cli::parse_from(["tollgate", "--file", path.to_str().unwrap()]);
        assert_eq!(resolve_query(&cli).unwrap(), "from a file");
    }

    #[test]
    fn missing_query_and_file_is_an_error() {
        let cli = Cli::parse_from(["tollgate"]);
        let err = resolve_query(&cli).unwrap_err();
        assert!(err.contains("--query or --file"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let cli = Cli::parse_from(["tollgate", "--file", "/nonexistent/query.txt"]);
        assert!(resolve_query(&cli).is_err());
    }

    #[test]
    fn query_and_file_conflict() {
        let result = Cli::try_parse_from(["tollgate", "--query", "q", "--file", "f.txt"]);
        assert!(result.is_err());
    }
}
