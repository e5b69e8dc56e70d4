//! Phase 4: Path and reference rewriting
//!
//! Relocated administrative files embed relative references computed for
//! their original staging depth. After relocation they sit one path segment
//! deeper, so those references no longer resolve. This phase applies the
//! configured literal rewrite rules, selected by sub-area, to every
//! relocated overlay entry:
//!
//! - class-area files (including the generator-produced proto-list
//!   manifests) gain one `..` segment on quoted `../..` prefixes;
//! - test-area files gain three levels of ascent on `'../` imports,
//!   reflecting both the depth change and test/source nesting;
//! - sample-area files switch their `).v2` qualified client reference to
//!   the administrative namespace, `).admin.v2`.
//!
//! Every rule is a single literal substring replacement over the file text:
//! no regex, no anchoring, every occurrence replaced. A file that matches
//! no rule at all is left unchanged; that is functionally a no-op but it is
//! logged at warn level, because the usual cause is a generator format
//! change that would otherwise surface only as broken relative references
//! in a downstream build.
//!
//! Rules only ever run against freshly staged content, never against files
//! already rewritten by an earlier run; the class-area replacement text
//! would re-match its own pattern otherwise.

use log::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::filesystem::Overlay;
use crate::phases::AdminPlacement;

/// Per-run statistics for the rewrite phase.
#[derive(Debug, Default)]
pub struct RewriteStats {
    /// Files that received at least one replacement.
    pub rewritten: usize,
    /// Total replacements across all files and rules.
    pub replacements: usize,
    /// Files with applicable rules where no pattern matched.
    pub unmatched: usize,
}

/// Executes Phase 4 of the pipeline.
pub fn execute(
    placements: &[AdminPlacement],
    config: &Config,
    overlay: &mut Overlay,
) -> Result<RewriteStats> {
    let mut stats = RewriteStats::default();

    for placement in placements {
        let rules = config.rules_for(placement.area, &placement.version);
        if rules.is_empty() {
            continue;
        }

        let file = overlay
            .get_mut(&placement.dest)
            .expect("relocated placement is staged in the overlay");

        let mut file_total = 0;
        for rule in &rules {
            let count = file.replace_literal(&rule.pattern, &rule.replacement)?;
            if count > 0 {
                debug!(
                    "rewrote {} occurrence(s) of {:?} in {}",
                    count,
                    rule.pattern,
                    placement.dest.display()
                );
            }
            file_total += count;
        }

        if file_total > 0 {
            stats.rewritten += 1;
            stats.replacements += file_total;
        } else {
            warn!(
                "no rewrite pattern matched {}; generated layout may have drifted",
                placement.dest.display()
            );
            stats.unmatched += 1;
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdminArea;
    use std::path::PathBuf;

    fn placement(dest: &str, area: AdminArea) -> AdminPlacement {
        AdminPlacement {
            dest: PathBuf::from(dest),
            area,
            version: "v2".to_string(),
        }
    }

    #[test]
    fn test_manifest_gains_one_ascent_level() {
        let mut overlay = Overlay::new();
        overlay.insert_string(
            "src/admin/v2/proto_list.json",
            "[\"../../google/bigtable/admin/v2/some.proto\"]",
        );

        let placements = vec![placement("src/admin/v2/proto_list.json", AdminArea::Classes)];
        let stats = execute(&placements, &Config::default(), &mut overlay).unwrap();

        assert_eq!(stats.rewritten, 1);
        assert_eq!(
            overlay.get("src/admin/v2/proto_list.json").unwrap().content,
            b"[\"../../../google/bigtable/admin/v2/some.proto\"]"
        );
    }

    #[test]
    fn test_manifest_handles_both_quote_styles() {
        let mut overlay = Overlay::new();
        overlay.insert_string(
            "src/admin/v2/client.ts",
            "import '../../protos'; const p = \"../../protos.json\";",
        );

        let placements = vec![placement("src/admin/v2/client.ts", AdminArea::Classes)];
        let stats = execute(&placements, &Config::default(), &mut overlay).unwrap();

        assert_eq!(stats.replacements, 2);
        assert_eq!(
            std::str::from_utf8(&overlay.get("src/admin/v2/client.ts").unwrap().content).unwrap(),
            "import '../../../protos'; const p = \"../../../protos.json\";"
        );
    }

    #[test]
    fn test_test_imports_gain_three_levels() {
        let mut overlay = Overlay::new();
        overlay.insert_string(
            "test/admin/v2/gapic_admin_v2.ts",
            "import {AdminClient} from '../src';",
        );

        let placements = vec![placement("test/admin/v2/gapic_admin_v2.ts", AdminArea::Tests)];
        execute(&placements, &Config::default(), &mut overlay).unwrap();

        assert_eq!(
            std::str::from_utf8(
                &overlay.get("test/admin/v2/gapic_admin_v2.ts").unwrap().content
            )
            .unwrap(),
            "import {AdminClient} from '../../../src';"
        );
    }

    #[test]
    fn test_samples_move_to_admin_namespace() {
        let mut overlay = Overlay::new();
        overlay.insert_string(
            "samples/generated/admin/v2/create.js",
            "const client = new (require('@google-cloud/bigtable')).v2.BigtableInstanceAdminClient();",
        );

        let placements = vec![placement(
            "samples/generated/admin/v2/create.js",
            AdminArea::Samples,
        )];
        execute(&placements, &Config::default(), &mut overlay).unwrap();

        let content = overlay
            .get("samples/generated/admin/v2/create.js")
            .unwrap();
        assert!(std::str::from_utf8(&content.content)
            .unwrap()
            .contains(").admin.v2.BigtableInstanceAdminClient"));
    }

    #[test]
    fn test_protos_are_never_rewritten() {
        let mut overlay = Overlay::new();
        overlay.insert_string(
            "protos/google/bigtable/admin/v2/x.proto",
            "import '../../other.proto';",
        );

        let placements = vec![placement(
            "protos/google/bigtable/admin/v2/x.proto",
            AdminArea::Protos,
        )];
        let stats = execute(&placements, &Config::default(), &mut overlay).unwrap();

        assert_eq!(stats.rewritten, 0);
        assert_eq!(stats.unmatched, 0);
        assert_eq!(
            overlay
                .get("protos/google/bigtable/admin/v2/x.proto")
                .unwrap()
                .content,
            b"import '../../other.proto';"
        );
    }

    #[test]
    fn test_zero_match_is_counted_not_failed() {
        let mut overlay = Overlay::new();
        overlay.insert_string("src/admin/v2/absolute.ts", "import 'fully/qualified';");

        let placements = vec![placement("src/admin/v2/absolute.ts", AdminArea::Classes)];
        let stats = execute(&placements, &Config::default(), &mut overlay).unwrap();

        assert_eq!(stats.rewritten, 0);
        assert_eq!(stats.unmatched, 1);
        assert_eq!(
            overlay.get("src/admin/v2/absolute.ts").unwrap().content,
            b"import 'fully/qualified';"
        );
    }

    #[test]
    fn test_only_listed_placements_are_touched() {
        let mut overlay = Overlay::new();
        // A primary-tree file that happens to contain a rewrite pattern
        overlay.insert_string("src/v2/client.ts", "import '../../protos';");
        overlay.insert_string("src/admin/v2/client.ts", "import '../../protos';");

        let placements = vec![placement("src/admin/v2/client.ts", AdminArea::Classes)];
        execute(&placements, &Config::default(), &mut overlay).unwrap();

        assert_eq!(
            overlay.get("src/v2/client.ts").unwrap().content,
            b"import '../../protos';"
        );
        assert_eq!(
            overlay.get("src/admin/v2/client.ts").unwrap().content,
            b"import '../../../protos';"
        );
    }
}
