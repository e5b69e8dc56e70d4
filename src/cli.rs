//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use stagesync::output::OutputConfig;

/// Stagesync - Reconcile generated staging trees into a hand-maintained repository
#[derive(Parser, Debug)]
#[command(name = "stagesync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full reconciliation pipeline against the staging directory
    Run(commands::run::RunArgs),

    /// Validate the .stagesync.yaml configuration and show the effective policy
    Validate(commands::validate::ValidateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let env = env_logger::Env::default().default_filter_or(&self.log_level);
        // Ignore double-init so tests can call execute() repeatedly
        let _ = env_logger::Builder::from_env(env).try_init();

        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Run(args) => commands::run::execute(args, &output),
            Commands::Validate(args) => commands::validate::execute(args, &output),
        }
    }
}
