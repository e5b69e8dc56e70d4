//! # Configuration Schema and Parsing
//!
//! This module defines the data structures that represent the
//! `.stagesync.yaml` configuration file, as well as the logic for parsing
//! it. The schema turns what used to live in copy-pasted per-repository
//! regeneration scripts into declarative data: version identifiers,
//! exclusion patterns, rewrite rules, and fixture patches.
//!
//! ## Key Components
//!
//! - **`Config`**: The full reconciliation policy for one repository. Every
//!   field carries a serde default, so an absent file (or any absent field)
//!   falls back to the built-in policy.
//!
//! - **`RewriteRule`**: A (area selector, literal pattern, literal
//!   replacement) triple applied to relocated administrative files.
//!
//! - **`FixturePatch`**: Unconditional literal replacements applied to a
//!   fixed set of destination files after the write phase.
//!
//! ## Placeholders
//!
//! Patterns may contain a `{version}` placeholder that is expanded per
//! configured version before matching, e.g. `src/{version}/index.ts` or
//! `).{version}`. This is what lets one rule list serve every API version.
//!
//! ## Parsing
//!
//! The `parse` function is the main entry point for parsing a YAML string
//! into a `Config`; `from_file` reads and parses a file. Both attach a hint
//! to parse failures so the CLI can point at the offending construct.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Relocated administrative sub-area a rewrite rule applies to.
///
/// Primary-tree files never carry an area, which is what guarantees they
/// are never rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminArea {
    /// Protocol-definition files (copied verbatim, never rewritten)
    Protos,
    /// Generated class sources and proto-list manifests
    Classes,
    /// Generated sample files
    Samples,
    /// Generated test files
    Tests,
}

/// A literal substring rewrite applied to relocated administrative files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteRule {
    /// Which relocated sub-area this rule selects.
    pub area: AdminArea,
    /// Literal search pattern (not a regex, not anchored). May contain
    /// `{version}`.
    pub pattern: String,
    /// Literal replacement text. May contain `{version}`.
    pub replacement: String,
}

/// One literal replacement inside a fixture patch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replacement {
    /// Literal search pattern.
    pub pattern: String,
    /// Literal replacement text.
    pub replacement: String,
}

/// Unconditional patches for fixed destination files.
///
/// These reconcile generated fixtures with the hand-written composition
/// layer: the generated single-client lifecycle does not match the manual
/// wrapper, so the fixtures get a simplified client alias, a disabled
/// teardown call, and a lint suppression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixturePatch {
    /// Destination-relative files to patch. Missing files are skipped with
    /// a warning.
    pub files: Vec<PathBuf>,
    /// Replacements applied to each file, in declaration order.
    pub replacements: Vec<Replacement>,
}

/// The complete reconciliation policy for one repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Staging directory produced by the external generator.
    #[serde(default = "default_staging_root")]
    pub staging_root: PathBuf,

    /// API version identifiers to reconcile (e.g. `v2`).
    #[serde(default = "default_versions")]
    pub versions: Vec<String>,

    /// Subdirectory of staging holding the administrative counterpart of
    /// each version (`<admin_subdir>/<version>`).
    #[serde(default = "default_admin_subdir")]
    pub admin_subdir: String,

    /// Marker substring identifying administrative content inside the
    /// primary tree; matching paths are deferred to the administrative
    /// merge.
    #[serde(default = "default_admin_marker")]
    pub admin_marker: String,

    /// Destination-relative paths never overwritten by generated content.
    /// May contain `{version}`.
    #[serde(default = "default_excludes")]
    pub excludes: Vec<String>,

    /// Root of the protocol-definition tree, relative to both the
    /// administrative staging tree and the destination.
    #[serde(default = "default_proto_root")]
    pub proto_root: String,

    /// File-name filter for administrative samples.
    #[serde(default = "default_sample_filter")]
    pub sample_filter: String,

    /// File-name filter for administrative tests.
    #[serde(default = "default_test_filter")]
    pub test_filter: String,

    /// Literal rewrites applied to relocated administrative files.
    #[serde(default = "default_rewrites")]
    pub rewrites: Vec<RewriteRule>,

    /// Unconditional destination fixture patches.
    #[serde(default = "default_fixture_patches")]
    pub fixture_patches: Vec<FixturePatch>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            staging_root: default_staging_root(),
            versions: default_versions(),
            admin_subdir: default_admin_subdir(),
            admin_marker: default_admin_marker(),
            excludes: default_excludes(),
            proto_root: default_proto_root(),
            sample_filter: default_sample_filter(),
            test_filter: default_test_filter(),
            rewrites: default_rewrites(),
            fixture_patches: default_fixture_patches(),
        }
    }
}

impl Config {
    /// Staging-relative prefix of the administrative tree for a version,
    /// e.g. `admin/v2`.
    pub fn admin_prefix(&self, version: &str) -> PathBuf {
        Path::new(&self.admin_subdir).join(version)
    }

    /// Exclusion patterns with `{version}` expanded for one version.
    pub fn expanded_excludes(&self, version: &str) -> Vec<String> {
        self.excludes
            .iter()
            .map(|p| crate::path::expand_version(p, version))
            .collect()
    }

    /// Rewrite rules for one area with `{version}` expanded.
    pub fn rules_for(&self, area: AdminArea, version: &str) -> Vec<RewriteRule> {
        self.rewrites
            .iter()
            .filter(|r| r.area == area)
            .map(|r| RewriteRule {
                area: r.area,
                pattern: crate::path::expand_version(&r.pattern, version),
                replacement: crate::path::expand_version(&r.replacement, version),
            })
            .collect()
    }
}

fn default_staging_root() -> PathBuf {
    PathBuf::from("owl-bot-staging")
}

fn default_versions() -> Vec<String> {
    vec!["v2".to_string()]
}

fn default_admin_subdir() -> String {
    "admin".to_string()
}

fn default_admin_marker() -> String {
    "_admin".to_string()
}

fn default_excludes() -> Vec<String> {
    // Entry points hold hand-written composition logic (wiring admin
    // clients into the public surface); the rest are repo-local settings
    // the generator must not clobber.
    [
        "package.json",
        "README.md",
        "src/index.ts",
        "src/{version}/index.ts",
        "tsconfig.json",
        "tslint.json",
        ".github/sync-repo-settings.yaml",
        ".OwlBot.yaml",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_proto_root() -> String {
    "protos/google/bigtable".to_string()
}

fn default_sample_filter() -> String {
    "*admin*".to_string()
}

fn default_test_filter() -> String {
    "*admin*.ts".to_string()
}

fn default_rewrites() -> Vec<RewriteRule> {
    // Relocated files sit one path segment deeper than the generator
    // assumed; the class manifests gain one `..`, tests three levels, and
    // samples move to the admin namespace.
    vec![
        RewriteRule {
            area: AdminArea::Classes,
            pattern: "'../..".to_string(),
            replacement: "'../../..".to_string(),
        },
        RewriteRule {
            area: AdminArea::Classes,
            pattern: "\"../..".to_string(),
            replacement: "\"../../..".to_string(),
        },
        RewriteRule {
            area: AdminArea::Tests,
            pattern: "'../".to_string(),
            replacement: "'../../../".to_string(),
        },
        RewriteRule {
            area: AdminArea::Samples,
            pattern: ").{version}".to_string(),
            replacement: ").admin.{version}".to_string(),
        },
    ]
}

fn default_fixture_patches() -> Vec<FixturePatch> {
    vec![FixturePatch {
        files: vec![
            PathBuf::from("system-test/fixtures/sample/src/index.ts"),
            PathBuf::from("system-test/fixtures/sample/src/index.js"),
        ],
        replacements: vec![
            Replacement {
                pattern: "BigtableClient".to_string(),
                replacement: "Bigtable".to_string(),
            },
            Replacement {
                pattern: "client.close".to_string(),
                replacement: "// client.close".to_string(),
            },
            Replacement {
                pattern: "function doStuffWith".to_string(),
                replacement:
                    "// eslint-disable-next-line @typescript-eslint/no-unused-vars\nfunction doStuffWith"
                        .to_string(),
            },
        ],
    }]
}

/// Parse a YAML string into a `Config`.
pub fn parse(yaml: &str) -> Result<Config> {
    serde_yaml::from_str(yaml).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some(
            "check field names against the .stagesync.yaml schema; all fields are optional"
                .to_string(),
        ),
    })
}

/// Read and parse a `.stagesync.yaml` file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigParse {
        message: format!("Failed to read '{}': {}", path.display(), e),
        hint: None,
    })?;
    parse(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_builtin_policy() {
        let config = Config::default();
        assert_eq!(config.staging_root, PathBuf::from("owl-bot-staging"));
        assert_eq!(config.versions, vec!["v2"]);
        assert_eq!(config.admin_marker, "_admin");
        assert_eq!(config.excludes.len(), 8);
        assert_eq!(config.rewrites.len(), 4);
        assert_eq!(config.fixture_patches.len(), 1);
        assert_eq!(config.fixture_patches[0].files.len(), 2);
        assert_eq!(config.fixture_patches[0].replacements.len(), 3);
    }

    #[test]
    fn test_parse_empty_mapping_uses_defaults() {
        let config = parse("{}").unwrap();
        assert_eq!(config.versions, vec!["v2"]);
        assert_eq!(config.test_filter, "*admin*.ts");
    }

    #[test]
    fn test_parse_overrides() {
        let yaml = r#"
staging_root: custom-staging
versions: [v1, v2]
excludes:
  - package.json
"#;
        let config = parse(yaml).unwrap();
        assert_eq!(config.staging_root, PathBuf::from("custom-staging"));
        assert_eq!(config.versions, vec!["v1", "v2"]);
        assert_eq!(config.excludes, vec!["package.json"]);
        // Unspecified fields keep their defaults
        assert_eq!(config.rewrites.len(), 4);
    }

    #[test]
    fn test_parse_rewrite_rules() {
        let yaml = r#"
rewrites:
  - area: samples
    pattern: ").{version}"
    replacement: ").admin.{version}"
"#;
        let config = parse(yaml).unwrap();
        assert_eq!(config.rewrites.len(), 1);
        assert_eq!(config.rewrites[0].area, AdminArea::Samples);
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let result = parse("staging_directory: foo");
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("Configuration parsing error"));
        assert!(msg.contains("hint:"));
    }

    #[test]
    fn test_admin_prefix() {
        let config = Config::default();
        assert_eq!(config.admin_prefix("v2"), PathBuf::from("admin/v2"));
    }

    #[test]
    fn test_expanded_excludes() {
        let config = Config::default();
        let expanded = config.expanded_excludes("v2");
        assert!(expanded.contains(&"src/v2/index.ts".to_string()));
        assert!(expanded.contains(&"package.json".to_string()));
    }

    #[test]
    fn test_rules_for_expands_version() {
        let config = Config::default();
        let rules = config.rules_for(AdminArea::Samples, "v2");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].pattern, ").v2");
        assert_eq!(rules[0].replacement, ").admin.v2");

        let class_rules = config.rules_for(AdminArea::Classes, "v2");
        assert_eq!(class_rules.len(), 2);
    }

    #[test]
    fn test_from_file_missing() {
        let result = from_file("/nonexistent/.stagesync.yaml");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read"));
    }

    #[test]
    fn test_config_round_trips_through_yaml() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let reparsed = parse(&yaml).unwrap();
        assert_eq!(reparsed.excludes, config.excludes);
        assert_eq!(reparsed.versions, config.versions);
    }
}
