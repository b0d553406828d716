//! Error types for the server binary.

/// Top-level startup error.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: petclinic_core::ConfigError,
    },

    /// Connecting to or migrating the database failed.
    #[error("database error: {source}")]
    Database {
        /// The underlying database error.
        #[from]
        source: petclinic_db::DbError,
    },

    /// Seeding the default vets failed.
    #[error("bootstrap error: {source}")]
    Bootstrap {
        /// The underlying store error.
        #[from]
        source: petclinic_core::ServiceError,
    },

    /// Templates failed to load.
    #[error("template error: {source}")]
    Views {
        /// The underlying web error.
        #[from]
        source: petclinic_web::WebError,
    },

    /// The HTTP server failed to start or crashed.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: petclinic_web::ServerError,
    },
}
