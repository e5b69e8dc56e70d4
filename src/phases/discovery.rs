//! Phase 1: Discovery
//!
//! This is the first phase of the stagesync pipeline. Its responsibility is
//! to enumerate the staging trees the external generator produced: for each
//! configured version, all files under `staging/<version>` and under the
//! administrative counterpart `staging/<admin>/<version>`.
//!
//! ## Process
//!
//! 1.  **Root check**: If the staging root does not exist, the entire
//!     reconciliation is a successful no-op. "No staging directory" means
//!     "nothing to reconcile", not an error; this function returns `None`
//!     and the orchestrator short-circuits.
//!
//! 2.  **Enumeration**: Every file (any extension, recursively) under each
//!     version subtree is recorded with its tree-relative path. A missing
//!     individual subtree yields an empty tree rather than a failure; the
//!     generator does not always emit every surface.
//!
//! Enumeration order is not semantically relevant; it is used only for
//! logging. Later phases decide what to do with each file.

use std::path::Path;

use log::{debug, info};
use walkdir::WalkDir;

use super::{DiscoveredTrees, FileRecord, StagingTree};
use crate::config::Config;
use crate::error::{Error, Result};

/// Executes Phase 1 of the pipeline.
///
/// Returns `None` when the staging root is absent, `Some` with the
/// enumerated primary and administrative trees otherwise.
pub fn execute(config: &Config) -> Result<Option<DiscoveredTrees>> {
    let staging = &config.staging_root;
    if !staging.is_dir() {
        info!(
            "staging directory {} not found, nothing to reconcile",
            staging.display()
        );
        return Ok(None);
    }

    info!("copying files from staging directory {}", staging.display());

    let mut primary = Vec::new();
    let mut admin = Vec::new();
    for version in &config.versions {
        primary.push(enumerate_tree(&staging.join(version), version, false)?);
        admin.push(enumerate_tree(
            &staging.join(config.admin_prefix(version)),
            version,
            true,
        )?);
    }

    Ok(Some(DiscoveredTrees { primary, admin }))
}

/// Enumerate all files under one staging tree root.
///
/// An absent root yields an empty tree.
fn enumerate_tree(root: &Path, version: &str, admin: bool) -> Result<StagingTree> {
    let mut files = Vec::new();

    if root.is_dir() {
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|e| Error::Filesystem {
                message: format!("Failed to walk '{}': {}", root.display(), e),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let absolute = entry.path().to_path_buf();
            let relative = absolute
                .strip_prefix(root)
                .map_err(|_| Error::Path {
                    message: format!("Failed to make path relative: {}", absolute.display()),
                })?
                .to_path_buf();
            files.push(FileRecord { absolute, relative });
        }
    }

    debug!(
        "discovered {} files under {} ({}{})",
        files.len(),
        root.display(),
        if admin { "admin " } else { "" },
        version
    );

    Ok(StagingTree {
        version: version.to_string(),
        root: root.to_path_buf(),
        admin,
        files,
    })
}
