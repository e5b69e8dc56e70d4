//! Validate command implementation
//!
//! Parses the configuration (explicit file, default path, or built-in
//! policy) and prints the effective reconciliation policy, so a
//! configuration change can be checked before the next regeneration run.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use stagesync::output::{emoji, OutputConfig};

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to config file
    #[arg(short, long, value_name = "PATH", env = "STAGESYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the validate command
pub fn execute(args: ValidateArgs, out: &OutputConfig) -> Result<()> {
    use stagesync::config::{self, Config};
    use stagesync::defaults::default_config_path;

    let (config, source) = match &args.config {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            (config::from_file(path)?, path.display().to_string())
        }
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                (
                    config::from_file(&default_path)?,
                    default_path.display().to_string(),
                )
            } else {
                (Config::default(), "built-in defaults".to_string())
            }
        }
    };

    if args.quiet {
        return Ok(());
    }

    println!(
        "{} Configuration loaded successfully ({})",
        emoji(out, "✅", "[OK]"),
        source
    );
    println!("   staging root: {}", config.staging_root.display());
    println!("   versions: {}", config.versions.join(", "));
    println!("   admin subtree: {}/<version>", config.admin_subdir);
    println!("   exclusions: {}", config.excludes.len());
    println!("   rewrite rules: {}", config.rewrites.len());
    let fixture_files: usize = config.fixture_patches.iter().map(|p| p.files.len()).sum();
    println!("   fixture patches: {} files", fixture_files);

    Ok(())
}
