use thiserror::Error;

/// Errors reported by corpus collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The collaborator could not be reached or queried.
    #[error("{collaborator} is unavailable: {message}")]
    Unavailable {
        /// Human-readable collaborator name.
        collaborator: &'static str,
        /// Underlying failure description.
        message: String,
    },
    /// The collaborator answered with data the loader cannot use.
    #[error("{collaborator} returned malformed data: {message}")]
    Malformed {
        /// Human-readable collaborator name.
        collaborator: &'static str,
        /// What was wrong with the payload.
        message: String,
    },
    /// A remote request did not finish in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// A remote service answered with a non-success status code.
    #[error("request to {url} failed with status {status}: {message}")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
}
