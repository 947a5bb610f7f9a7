//! Core building blocks for shipline
//!
//! - **config**: shipline.toml parsing and validation
//! - **error**: error taxonomy with exit codes and contextual help
//! - **vcs**: git operations abstraction (SystemGit)

pub mod config;
pub mod error;
pub mod vcs;
