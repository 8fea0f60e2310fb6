use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all vsolve operations.
#[derive(Debug, Error, Diagnostic)]
pub enum VsolveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed project manifest (`Vsolve.toml`).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Vsolve.toml for syntax errors"))]
    Manifest { message: String },

    /// Invalid or malformed repository index.
    #[error("Index error: {message}")]
    #[diagnostic(help("Every package entry needs a name, an x.y.z version and a compiler range"))]
    Index { message: String },

    /// No version assignment satisfies every constraint.
    #[error("Dependency resolution failed: {message}")]
    #[diagnostic(help("Loosen a version range or use a different compiler version"))]
    Resolution { message: String },

    /// Global configuration could not be loaded.
    #[error("Config error: {message}")]
    Config { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type VsolveResult<T> = miette::Result<T>;
