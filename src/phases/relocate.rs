//! Phase 3: Administrative tree relocation
//!
//! The destination repository nests the administrative API under an extra
//! `admin/<version>` path segment that the generator knows nothing about.
//! This phase stages four sub-areas of each administrative staging tree at
//! their relocated destinations:
//!
//! - protocol definitions: `protos/google/bigtable/admin/<v>/**` keeps its
//!   relative path (the generator already nests protos correctly);
//! - class sources and proto-list manifests: `src/<v>/**` moves to
//!   `src/admin/<v>/`;
//! - samples matching the sample name filter: `samples/generated/<v>/` to
//!   `samples/generated/admin/<v>/`;
//! - tests directly under `test/` matching the test name filter, to
//!   `test/admin/<v>/`.
//!
//! Nothing else in the administrative tree is copied. In particular its
//! `system-test` fixtures are dropped so the primary tree's copies (staged
//! in Phase 2 and patched in Phase 6) are retained.
//!
//! Each staged file is returned as an [`AdminPlacement`] tagged with its
//! sub-area; the rewrite phase uses the tag to decide which rules apply.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::{AdminArea, Config};
use crate::error::Result;
use crate::filesystem::Overlay;
use crate::path::name_matches;
use crate::phases::{AdminPlacement, StagingTree};

/// Executes Phase 3 of the pipeline.
pub fn execute(
    trees: &[StagingTree],
    config: &Config,
    overlay: &mut Overlay,
) -> Result<Vec<AdminPlacement>> {
    let mut placements = Vec::new();

    for tree in trees {
        let version = &tree.version;
        let admin_segment = config.admin_prefix(version);
        let proto_prefix = Path::new(&config.proto_root).join(&admin_segment);
        let class_prefix = Path::new("src").join(version);
        let sample_prefix = Path::new("samples/generated").join(version);
        let test_prefix = PathBuf::from("test");

        for record in &tree.files {
            let rel = &record.relative;

            let placement = if rel.starts_with(&proto_prefix) {
                // Protos are already nested at their final depth
                Some((rel.clone(), AdminArea::Protos))
            } else if let Ok(rest) = rel.strip_prefix(&class_prefix) {
                Some((
                    Path::new("src").join(&admin_segment).join(rest),
                    AdminArea::Classes,
                ))
            } else if let Ok(rest) = rel.strip_prefix(&sample_prefix) {
                if name_matches(&config.sample_filter, rel)? {
                    Some((
                        Path::new("samples/generated")
                            .join(&admin_segment)
                            .join(rest),
                        AdminArea::Samples,
                    ))
                } else {
                    None
                }
            } else if rel.parent() == Some(test_prefix.as_path())
                && name_matches(&config.test_filter, rel)?
            {
                // Only direct children of test/ are generated test entry
                // points; deeper paths are fixtures the primary tree owns
                Some((
                    test_prefix
                        .join(&admin_segment)
                        .join(rel.file_name().expect("test file has a name")),
                    AdminArea::Tests,
                ))
            } else {
                None
            };

            match placement {
                Some((dest, area)) => {
                    debug!("relocating {} -> {}", rel.display(), dest.display());
                    overlay.stage_from_disk(&record.absolute, &dest)?;
                    placements.push(AdminPlacement {
                        dest,
                        area,
                        version: version.clone(),
                    });
                }
                None => {
                    debug!("dropping admin file {}", rel.display());
                }
            }
        }
    }

    info!("admin relocation: {} files staged", placements.len());
    Ok(placements)
}
