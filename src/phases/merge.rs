//! Phase 2: Selective Merge of the primary tree
//!
//! This phase stages every file from the primary staging trees into the
//! destination overlay at its staging-relative path, with two classes of
//! exception:
//!
//! 1.  **The exclusion set**: destination paths holding hand-maintained
//!     content (entry points wiring the admin clients into the public
//!     surface, package metadata, compiler and CI configuration). The
//!     generator would happily regenerate and erase the manual edits, so
//!     these paths are never staged and whatever is on disk survives the
//!     run untouched.
//!
//! 2.  **Administrative content**: any path containing the administrative
//!     marker substring. These files belong to the control-plane surface
//!     and are handled by the relocation phase instead.
//!
//! Everything else overwrites the destination copy; generated output wins
//! for generated files.

use log::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::filesystem::Overlay;
use crate::path::{contains_marker, glob_match};
use crate::phases::StagingTree;
use std::path::PathBuf;

/// Per-run statistics for the primary merge.
#[derive(Debug, Default)]
pub struct MergeStats {
    /// Files staged into the overlay.
    pub copied: usize,
    /// Paths skipped because they matched the exclusion set.
    pub excluded: Vec<PathBuf>,
    /// Paths deferred to the administrative merge.
    pub deferred: usize,
}

/// Executes Phase 2 of the pipeline.
pub fn execute(trees: &[StagingTree], config: &Config, overlay: &mut Overlay) -> Result<MergeStats> {
    let mut stats = MergeStats::default();

    for tree in trees {
        let excludes = config.expanded_excludes(&tree.version);
        debug!(
            "excluding files for non-admin {}: {:?}",
            tree.version, excludes
        );

        for record in &tree.files {
            if contains_marker(&record.relative, &config.admin_marker) {
                stats.deferred += 1;
                continue;
            }
            if is_excluded(&record.relative, &excludes)? {
                debug!("preserving hand-maintained {}", record.relative.display());
                stats.excluded.push(record.relative.clone());
                continue;
            }
            overlay.stage_from_disk(&record.absolute, &record.relative)?;
            stats.copied += 1;
        }
    }

    info!(
        "primary merge: {} copied, {} excluded, {} deferred to admin",
        stats.copied,
        stats.excluded.len(),
        stats.deferred
    );
    Ok(stats)
}

fn is_excluded(relative: &std::path::Path, excludes: &[String]) -> Result<bool> {
    let rel = relative.to_string_lossy();
    for pattern in excludes {
        if glob_match(pattern, &rel)? {
            return Ok(true);
        }
    }
    Ok(false)
}
