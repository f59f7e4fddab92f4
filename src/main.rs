// ABOUTME: Entry point for the deployctl CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::Workspace;
use deployctl::config;
use deployctl::error::Result;
use deployctl::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut output = Output::new(output_mode(&cli, OutputMode::Normal));

    if let Err(e) = run(cli, &mut output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

/// Pick the output mode: flags win over the config file.
fn output_mode(cli: &Cli, configured: OutputMode) -> OutputMode {
    if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        configured
    }
}

async fn run(cli: Cli, output: &mut Output) -> Result<()> {
    let cwd = env::current_dir()?;

    if let Commands::Init { force } = cli.command {
        config::init_config(&cwd, cli.namespace.as_deref(), force)?;
        output.success(&format!("Created {}", config::CONFIG_FILENAME));
        return Ok(());
    }

    let workspace = Workspace::open(&cwd, cli.namespace.as_deref(), cli.state.as_deref())?;
    *output = Output::new(output_mode(&cli, workspace.config().output));
    output.start_timer();

    match cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Latest { name } => commands::latest(workspace, &name, output).await,
        Commands::Retry { name } => commands::retry(workspace, &name, output).await,
        Commands::Cancel { name } => commands::cancel(workspace, &name, output).await,
        Commands::Status { name } => commands::status(&workspace, &name, output).await,
        Commands::History { name } => commands::history(&workspace, &name, output).await,
    }
}
