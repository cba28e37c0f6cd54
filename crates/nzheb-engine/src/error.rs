//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode during startup so `main` can
//! propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: nzheb_core::config::ConfigError,
    },

    /// The template catalog is unusable.
    #[error("catalog error: {source}")]
    Catalog {
        /// The underlying catalog error.
        #[from]
        source: nzheb_core::catalog::CatalogError,
    },

    /// The audit trail could not be opened.
    #[error("audit error: {source}")]
    Audit {
        /// The underlying audit error.
        #[from]
        source: nzheb_core::audit::AuditError,
    },

    /// The live feed failed to mount.
    #[error("feed error: {source}")]
    Feed {
        /// The underlying feed error.
        #[from]
        source: nzheb_core::feed::FeedError,
    },

    /// The logging subscriber could not be installed.
    #[error("logging setup failed: {message}")]
    Logging {
        /// Description of the failure.
        message: String,
    },
}
