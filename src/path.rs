//! Path matching utilities for stagesync

use crate::error::{Error, Result};
use glob::Pattern;
use std::path::Path;

/// Match a path against a glob pattern
pub fn glob_match(pattern: &str, path: &str) -> Result<bool> {
    let pattern = Pattern::new(pattern).map_err(Error::Glob)?;
    Ok(pattern.matches(path))
}

/// Match a file name (final path component) against a glob pattern.
///
/// Used for the sample and test name filters, which select by file name
/// rather than by full relative path.
pub fn name_matches(pattern: &str, path: &Path) -> Result<bool> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::Path {
            message: format!("Path has no valid file name: {}", path.display()),
        })?;
    glob_match(pattern, name)
}

/// Expand the `{version}` placeholder in a configured pattern.
///
/// Exclusion patterns and rewrite rules are written once and applied per
/// version; `src/{version}/index.ts` becomes `src/v2/index.ts` for v2.
pub fn expand_version(pattern: &str, version: &str) -> String {
    pattern.replace("{version}", version)
}

/// Check whether a relative path contains the administrative marker
/// substring anywhere in its textual form.
pub fn contains_marker(path: &Path, marker: &str) -> bool {
    path.to_string_lossy().contains(marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_glob_match() {
        assert!(glob_match("*.ts", "index.ts").unwrap());
        assert!(glob_match("src/*.ts", "src/index.ts").unwrap());
        assert!(!glob_match("*.ts", "index.js").unwrap());
        assert!(glob_match("**/*.ts", "src/v2/client.ts").unwrap());
    }

    #[test]
    fn test_glob_match_invalid_pattern() {
        assert!(glob_match("[", "anything").is_err());
    }

    #[test]
    fn test_name_matches() {
        let path = PathBuf::from("test/gapic_bigtable_instance_admin_v2.ts");
        assert!(name_matches("*admin*.ts", &path).unwrap());
        assert!(!name_matches("*admin*.ts", &PathBuf::from("test/gapic_bigtable_v2.ts")).unwrap());
        // Filter matches on the file name only, not the directory part
        assert!(!name_matches("*admin*.ts", &PathBuf::from("admin/gapic_v2.ts")).unwrap());
    }

    #[test]
    fn test_expand_version() {
        assert_eq!(expand_version("src/{version}/index.ts", "v2"), "src/v2/index.ts");
        assert_eq!(expand_version("package.json", "v2"), "package.json");
        assert_eq!(expand_version(").{version}", "v2"), ").v2");
    }

    #[test]
    fn test_contains_marker() {
        assert!(contains_marker(
            &PathBuf::from("src/v2/bigtable_instance_admin_client.ts"),
            "_admin"
        ));
        assert!(!contains_marker(&PathBuf::from("src/v2/bigtable_client.ts"), "_admin"));
    }
}
