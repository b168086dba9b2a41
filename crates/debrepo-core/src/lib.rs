//! Core data types for debrepo.
//!
//! This crate defines the dependency identity the rule engine works on, the
//! substitution rule language and ordered rule sets, the data exchanged with a
//! host module repository, and the helper configuration.
//!
//! This crate is intentionally free of any repository I/O beyond reading rule
//! and configuration files.

/// Default root of the system Maven repository.
pub const DEFAULT_REPOSITORY_ROOT: &str = "/usr/share/maven-repo";

pub mod artifact;
pub mod config;
pub mod dependency;
pub mod module;
pub mod rule;
pub mod ruleset;
