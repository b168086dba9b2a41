use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all debrepo operations.
#[derive(Debug, Error, Diagnostic)]
pub enum DebrepoError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed rule, rule file or configuration file.
    #[error("Configuration error: {message}")]
    #[diagnostic(help(
        "Rules take up to six slots `group artifact type version scope classifier`, \
         each `*`, a literal, or `s/regex/replacement/`"
    ))]
    Configuration { message: String },

    /// A download report could not be mapped back to the artifact that was requested.
    #[error("Artifact reconciliation failed: {message}")]
    #[diagnostic(help("This is a bug in debrepo, please report it"))]
    Reconciliation { message: String },

    /// The host repository failed while resolving a module.
    #[error("Dependency resolution failed: {message}")]
    Resolution { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type DebrepoResult<T> = miette::Result<T>;
