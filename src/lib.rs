//! # Stagesync Library
//!
//! This library provides the core functionality for reconciling generated
//! client-library staging trees into a hand-maintained repository. It is
//! designed to be used by the `stagesync` command-line tool but can also be
//! driven directly by build automation that needs the reconciliation report
//! (most importantly the tracked-paths set) in process.
//!
//! ## Quick Example
//!
//! ```
//! use stagesync::config;
//! use stagesync::filesystem::Overlay;
//!
//! // Parse a reconciliation policy (all fields optional)
//! let config = config::parse("versions: [v2]").unwrap();
//! assert_eq!(config.versions, vec!["v2"]);
//!
//! // Stage files in the destination overlay
//! let mut overlay = Overlay::new();
//! overlay.insert_string("src/foo.ts", "export {};");
//! assert!(overlay.contains("src/foo.ts"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: The declarative `.stagesync.yaml` schema:
//!   version identifiers, exclusion patterns, rewrite rules, and fixture
//!   patches as data, replacing per-repository procedural scripts.
//! - **Destination Overlay (`filesystem`)**: An in-memory staging area for
//!   the merge, enabling dry runs and keeping all decisions testable
//!   without disk I/O.
//! - **Phases (`phases`)**: The sequential pipeline that performs the
//!   reconciliation, from staging-tree discovery through selective merge,
//!   relocation, rewriting, disk output, fixture patching, and cleanup.
//!
//! ## Execution Flow
//!
//! The main entry point is `phases::orchestrator::execute_reconcile`, which
//! executes the following steps:
//!
//! 1.  **Discovery**: Enumerate the primary and administrative staging
//!     trees (a missing staging root is a successful no-op).
//! 2.  **Selective Merge**: Stage the primary tree, skipping the exclusion
//!     set and deferring administrative content.
//! 3.  **Relocation**: Stage the administrative sub-areas one directory
//!     level deeper, where the destination nests them.
//! 4.  **Rewriting**: Fix the relative references the relocation broke.
//! 5.  **Disk Output**: Flush the overlay to the destination repository.
//! 6.  **Fixture Patches**: Apply the fixed literal patches that reconcile
//!     generated fixtures with the hand-written composition layer.
//! 7.  **Cleanup**: Delete the staging tree so it is never committed.
//!
//! Execution is single-threaded and strictly sequential; the tool assumes
//! exclusive invocation in a disposable build environment.

pub mod config;
pub mod defaults;
pub mod error;
pub mod filesystem;
pub mod output;
pub mod path;
pub mod phases;
