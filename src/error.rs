//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `stagesync` application. It uses the `thiserror` library to create a
//! comprehensive `Error` enum that covers all anticipated failure modes,
//! providing clear and descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur within the application. Each variant corresponds to a specific
//!   type of error and includes contextual information to aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the application to simplify function signatures.
//!
//! The taxonomy is deliberately small. Reconciliation runs in a disposable
//! build environment: an I/O failure aborts the run and the whole run is
//! re-executed from a clean checkout, so there is no retry or partial-result
//! recovery to model. The one condition that is *not* an error, a missing
//! staging root, never reaches this module; the pipeline short-circuits it
//! as a successful no-op.

use thiserror::Error;

/// Main error type for stagesync operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while parsing the `.stagesync.yaml` configuration
    /// file.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An error occurred during a filesystem operation (copy, write, delete).
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// An error occurred with a path-related operation.
    #[error("Path operation error: {message}")]
    Path { message: String },

    /// An error occurred while applying a literal patch to a file.
    #[error("Patch error for {path}: {message}")]
    Patch { path: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
