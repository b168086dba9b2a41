//! Dependency rewriting engine: decides whether a dependency is ignored,
//! passed through or rewritten, adapts a host module repository to serve the
//! rewritten coordinates, and maps downloaded artifacts back to the names the
//! caller asked for.

pub mod adapter;
pub mod policy;
pub mod reconcile;
