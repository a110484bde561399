//! planroll - Project work-breakdown planning with parent rollups and
//! personnel record validation
//!
//! This library provides the core functionality for maintaining a project
//! task tree (WBS position codes, parent rollups recomputed from children)
//! and for validating date-period data on employee records (residence and
//! sponsorship transfer periods).

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod output;
#[cfg(feature = "ui")]
pub mod server;
pub mod storage;
