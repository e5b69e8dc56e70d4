//! Implementation of the 7 phases of the stagesync reconciliation run.
//!
//! ## Overview
//!
//! A reconciliation run follows 7 strictly sequential phases:
//! 1. Discovery - Enumerate the primary and administrative staging trees
//! 2. Selective Merge - Stage the primary tree, honoring the exclusion set
//! 3. Relocation - Stage the administrative sub-areas one level deeper
//! 4. Rewriting - Fix relative references broken by the relocation
//! 5. Writing to Disk - Flush the overlay to the destination repository
//! 6. Fixture Patches - Apply fixed literal patches to destination fixtures
//! 7. Cleanup - Remove the staging tree so it can never be committed
//!
//! Phases 1-4 operate on an in-memory [`Overlay`](crate::filesystem::Overlay)
//! and touch nothing on disk; phases 5-7 are the only ones with side
//! effects, and all three are skipped in dry-run mode (cleanup included, so
//! a dry run leaves staging in place for the real run).
//!
//! There is no state between runs. Every invocation starts from a freshly
//! generated staging tree and ends by deleting it.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::config::AdminArea;

// Phase modules
pub mod cleanup;
pub mod discovery;
pub mod merge;
pub mod orchestrator;
pub mod patch;
pub mod relocate;
pub mod rewrite;
pub mod write;

/// One file discovered under a staging tree.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Absolute path on disk (inside staging).
    pub absolute: PathBuf,
    /// Path relative to the tree root.
    pub relative: PathBuf,
}

/// A generated source tree for one API surface (primary or administrative).
#[derive(Debug, Clone)]
pub struct StagingTree {
    /// API version identifier (e.g. `v2`). For administrative trees this is
    /// still the bare version; the `admin` flag carries the distinction.
    pub version: String,
    /// Absolute tree root under staging.
    pub root: PathBuf,
    /// Whether this is the administrative counterpart.
    pub admin: bool,
    /// All files discovered under the root.
    pub files: Vec<FileRecord>,
}

/// Result of Phase 1: the enumerated staging trees, paired per version.
#[derive(Debug, Clone)]
pub struct DiscoveredTrees {
    /// Primary API client trees, one per configured version.
    pub primary: Vec<StagingTree>,
    /// Administrative counterpart trees, one per configured version.
    pub admin: Vec<StagingTree>,
}

impl DiscoveredTrees {
    /// Staging roots consumed by this run, for the tracked-paths report.
    pub fn tracked_paths(&self) -> BTreeSet<PathBuf> {
        self.primary
            .iter()
            .chain(self.admin.iter())
            .map(|t| t.root.clone())
            .collect()
    }

    /// Total number of discovered files across all trees.
    pub fn file_count(&self) -> usize {
        self.primary
            .iter()
            .chain(self.admin.iter())
            .map(|t| t.files.len())
            .sum()
    }
}

/// A relocated administrative overlay entry, tagged with the sub-area that
/// determines which rewrite rules apply to it.
#[derive(Debug, Clone)]
pub struct AdminPlacement {
    /// Destination-relative path of the staged file.
    pub dest: PathBuf,
    /// Sub-area the file was relocated from.
    pub area: AdminArea,
    /// Version the file belongs to (drives `{version}` expansion in rules).
    pub version: String,
}

/// Summary of a completed (or dry-run) reconciliation.
///
/// `tracked_paths` records which staging roots sourced generated content.
/// The surrounding template-application step consumes it to distinguish
/// generated files from manual ones; it is collected and returned here
/// rather than accumulated in shared mutable state.
#[derive(Debug, Clone, Default)]
pub struct ReconcileReport {
    /// Whether a staging root existed. When false every other field is
    /// zero and the run was a no-op.
    pub staging_found: bool,
    /// Staging roots that sourced generated content this run.
    pub tracked_paths: BTreeSet<PathBuf>,
    /// Files staged into the destination overlay.
    pub copied: usize,
    /// Primary-tree paths skipped because they matched the exclusion set.
    pub excluded: Vec<PathBuf>,
    /// Primary-tree paths deferred to the administrative merge.
    pub deferred: usize,
    /// Relocated files that received at least one rewrite.
    pub rewritten: usize,
    /// Total literal replacements performed during rewriting.
    pub replacements: usize,
    /// Destination fixture files patched.
    pub patched: usize,
    /// Whether the staging tree was removed (false in dry-run mode).
    pub staging_removed: bool,
}
