//! Orchestrator for the complete reconciliation run
//!
//! This module coordinates all phases to provide a clean API for a full
//! reconciliation. Control flow is strictly linear: discovery, primary
//! merge, admin relocation, rewriting, then (unless dry-run) disk write,
//! fixture patches, and staging cleanup.

use std::path::Path;

use super::{cleanup, discovery, merge, patch, relocate, rewrite, write, ReconcileReport};
use crate::config::Config;
use crate::error::Result;
use crate::filesystem::Overlay;

/// Execute the complete reconciliation (Phases 1-7).
///
/// An absent staging root short-circuits successfully: the returned report
/// has `staging_found == false` and the destination is untouched.
///
/// With `dry_run` set, the merge and rewrite phases run fully in memory and
/// the report describes what *would* happen, but nothing is written,
/// patched, or deleted.
pub fn execute_reconcile(config: &Config, dest_root: &Path, dry_run: bool) -> Result<ReconcileReport> {
    // Phase 1: Discovery
    let Some(trees) = discovery::execute(config)? else {
        return Ok(ReconcileReport::default());
    };

    let mut overlay = Overlay::new();

    // Phase 2: Selective merge of the primary tree
    let merge_stats = merge::execute(&trees.primary, config, &mut overlay)?;

    // Phase 3: Administrative relocation
    let placements = relocate::execute(&trees.admin, config, &mut overlay)?;

    // Phase 4: Reference rewriting
    let rewrite_stats = rewrite::execute(&placements, config, &mut overlay)?;

    let mut report = ReconcileReport {
        staging_found: true,
        tracked_paths: trees.tracked_paths(),
        copied: overlay.len(),
        excluded: merge_stats.excluded,
        deferred: merge_stats.deferred,
        rewritten: rewrite_stats.rewritten,
        replacements: rewrite_stats.replacements,
        patched: 0,
        staging_removed: false,
    };

    if dry_run {
        return Ok(report);
    }

    // Phase 5: Write to disk
    write::execute(&overlay, dest_root)?;

    // Phase 6: Fixture patches
    let patch_stats = patch::execute(config, dest_root)?;
    report.patched = patch_stats.patched;

    // Phase 7: Staging cleanup
    report.staging_removed = cleanup::execute(&config.staging_root)?;

    Ok(report)
}
