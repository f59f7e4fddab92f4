// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deployctl")]
#[command(about = "Start, retry, and cancel versioned deployments")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print final results
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Namespace of the deployment config (overrides deployctl.yml)
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,

    /// State file path (overrides deployctl.yml)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new deployctl.yml configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Start a new deployment from the latest config version
    Latest {
        /// Deployment config name
        name: String,
    },

    /// Retry the latest deployment if it failed
    Retry {
        /// Deployment config name
        name: String,
    },

    /// Cancel every in-progress deployment of a config
    Cancel {
        /// Deployment config name
        name: String,
    },

    /// Show the latest version and the status of its deployment
    Status {
        /// Deployment config name
        name: String,
    },

    /// List every deployment of a config
    History {
        /// Deployment config name
        name: String,
    },
}
