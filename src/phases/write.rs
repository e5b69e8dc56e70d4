//! Phase 5: Writing to Disk
//!
//! The first phase with side effects. Flushes the destination overlay to
//! the host filesystem:
//!
//! 1.  **Create Directories**: For each staged file, creates any necessary
//!     parent directories recursively, so a copy never fails for a missing
//!     destination directory.
//!
//! 2.  **Write Content**: Writes the file content, overwriting whatever is
//!     already there. Excluded paths were never staged, so hand-maintained
//!     files are untouched by construction.
//!
//! 3.  **Set Permissions**: On Unix-like systems, applies the permission
//!     bits carried through the overlay.
//!
//! Skipped entirely in dry-run mode.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::filesystem::Overlay;

/// Execute Phase 5: write the overlay under the destination root.
pub fn execute(overlay: &Overlay, dest_root: &Path) -> Result<()> {
    for (relative_path, file) in overlay.files() {
        let full_path = dest_root.join(relative_path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
                message: format!("Failed to create directory '{}': {}", parent.display(), e),
            })?;
        }

        fs::write(&full_path, &file.content).map_err(|e| Error::Filesystem {
            message: format!("Failed to write file '{}': {}", full_path.display(), e),
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(file.permissions);
            fs::set_permissions(&full_path, perms).map_err(|e| Error::Filesystem {
                message: format!(
                    "Failed to set permissions on '{}': {}",
                    full_path.display(),
                    e
                ),
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::execute;
    use crate::filesystem::{File, Overlay};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path();

        let mut overlay = Overlay::new();
        overlay.insert_string("README.generated.md", "# Generated");

        execute(&overlay, dest).unwrap();

        let content = fs::read_to_string(dest.join("README.generated.md")).unwrap();
        assert_eq!(content, "# Generated");
    }

    #[test]
    fn test_write_creates_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path();

        let mut overlay = Overlay::new();
        overlay.insert_string("src/admin/v2/client.ts", "export class AdminClient {}");
        overlay.insert_string("protos/google/bigtable/admin/v2/x.proto", "syntax;");

        execute(&overlay, dest).unwrap();

        assert!(dest.join("src/admin/v2/client.ts").exists());
        assert!(dest.join("protos/google/bigtable/admin/v2/x.proto").exists());
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path();
        fs::write(dest.join("existing.ts"), "old content").unwrap();

        let mut overlay = Overlay::new();
        overlay.insert_string("existing.ts", "new content");

        execute(&overlay, dest).unwrap();

        assert_eq!(
            fs::read_to_string(dest.join("existing.ts")).unwrap(),
            "new content"
        );
    }

    #[test]
    fn test_write_empty_overlay_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path();

        execute(&Overlay::new(), dest).unwrap();

        assert!(fs::read_dir(dest).unwrap().next().is_none());
    }

    #[test]
    #[cfg(unix)]
    fn test_write_preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path();

        let mut overlay = Overlay::new();
        let mut file = File::from_string("#!/bin/sh\n");
        file.permissions = 0o755;
        overlay.insert("scripts/gen.sh", file);

        execute(&overlay, dest).unwrap();

        let mode = fs::metadata(dest.join("scripts/gen.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
