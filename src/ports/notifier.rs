use async_trait::async_trait;
use http::Method;
use thiserror::Error;
use url::Url;

/// Custom error type for outbound notification calls
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NotifyError {
    /// Error when the target cannot be reached
    #[error("Connection error: {0}")]
    Connection(String),

    /// Error when the call exceeds its execution timeout
    #[error("Timeout error after {0} seconds")]
    Timeout(u64),

    /// Error when the request itself cannot be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type alias for notification operations
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Notifier defines the port (interface) for the deferred outbound call a
/// matched rule may schedule.
///
/// Callers never await the outcome on the request path; the scheduler fires
/// the call from a detached task and logs failures at debug level only.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Perform one outbound HTTP call to `url` with the given verb.
    async fn notify(&self, method: Method, url: Url) -> NotifyResult<()>;
}
