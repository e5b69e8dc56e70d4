//! Run command implementation
//!
//! The run command executes the full 7-phase reconciliation pipeline:
//! 1. Discovery of the primary and administrative staging trees
//! 2. Selective merge of the primary tree (exclusion set honored)
//! 3. Administrative relocation one level deeper
//! 4. Literal reference rewriting
//! 5. Writing the overlay to the destination
//! 6. Destination fixture patches
//! 7. Staging cleanup

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use stagesync::output::{emoji, OutputConfig};

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to config file
    #[arg(short, long, value_name = "PATH", env = "STAGESYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Staging directory (overrides the configured staging_root)
    #[arg(long, value_name = "PATH")]
    pub staging_root: Option<PathBuf>,

    /// Destination repository root (defaults to current directory)
    #[arg(short, long, value_name = "PATH")]
    pub dest: Option<PathBuf>,

    /// Show what would be done without writing, patching, or deleting staging
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Show detailed progress information
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the run command
pub fn execute(args: RunArgs, out: &OutputConfig) -> Result<()> {
    use stagesync::config::{self, Config};
    use stagesync::defaults::default_config_path;
    use stagesync::phases::orchestrator;
    use std::time::Instant;

    let start_time = Instant::now();

    // An explicitly named config file must exist; the default path falls
    // back to the built-in policy when absent
    let mut config = match &args.config {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            config::from_file(path)?
        }
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                config::from_file(&default_path)?
            } else {
                Config::default()
            }
        }
    };

    if let Some(staging_root) = args.staging_root {
        config.staging_root = staging_root;
    }

    let dest = match args.dest {
        Some(dest) => dest,
        None => std::env::current_dir()?,
    };

    if !args.quiet {
        println!("{} Stagesync Run", emoji(out, "🦉", "[SYNC]"));
        println!();

        if args.dry_run {
            println!("{} DRY RUN MODE - No changes will be made", emoji(out, "🔎", "[DRY]"));
            println!();
        }
        if args.verbose {
            println!("   staging: {}", config.staging_root.display());
            println!("   dest:    {}", dest.display());
        }
    }

    let report = orchestrator::execute_reconcile(&config, &dest, args.dry_run)?;
    let duration = start_time.elapsed();

    if args.quiet {
        return Ok(());
    }

    if !report.staging_found {
        println!(
            "{} No staging directory at {}, nothing to reconcile",
            emoji(out, "💤", "[SKIP]"),
            config.staging_root.display()
        );
        return Ok(());
    }

    println!(
        "{} Reconciled successfully in {:.2}s",
        emoji(out, "✅", "[OK]"),
        duration.as_secs_f64()
    );
    println!("   {} files staged", report.copied);
    println!(
        "   {} excluded, {} deferred to admin",
        report.excluded.len(),
        report.deferred
    );
    println!(
        "   {} files rewritten ({} replacements), {} fixtures patched",
        report.rewritten, report.replacements, report.patched
    );
    if report.staging_removed {
        println!("   staging directory removed");
    }

    // The tracked set is what the surrounding template step consumes
    println!("   tracked paths:");
    for path in &report.tracked_paths {
        println!("     {}", path.display());
    }

    if args.verbose && !report.excluded.is_empty() {
        println!("   preserved hand-maintained files:");
        for path in &report.excluded {
            println!("     {}", path.display());
        }
    }

    Ok(())
}
