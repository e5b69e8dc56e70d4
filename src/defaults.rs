//! Default values for stagesync configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Returns the default configuration file path.
///
/// `stagesync` looks for `.stagesync.yaml` in the current directory unless
/// the `--config` flag or the `STAGESYNC_CONFIG` environment variable says
/// otherwise. A missing file is not an error; the built-in policy applies.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(".stagesync.yaml")
}
