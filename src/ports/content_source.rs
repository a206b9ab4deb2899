use async_trait::async_trait;
use thiserror::Error;

/// Coordinates of the repository holding a user's mock definition and data.
///
/// Taken from the first three segments of every inbound request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.branch)
    }
}

/// Custom error type for content retrieval operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FetchError {
    /// Error when a candidate source cannot be reached
    #[error("Connection error: {0}")]
    Connection(String),

    /// Error when the file exists nowhere the source looks
    #[error("File '{file}' not found in {repo}")]
    NotFound { repo: String, file: String },

    /// Error when every candidate location in the fallback chain failed
    #[error("All {attempts} candidate source(s) failed for '{file}' in {repo}")]
    Exhausted {
        repo: String,
        file: String,
        attempts: usize,
    },
}

/// Result type alias for content retrieval operations
pub type FetchResult<T> = Result<T, FetchError>;

/// ContentSource defines the port (interface) for retrieving raw file text
/// from a user repository.
///
/// Implementations own their fallback chain: an ordered list of candidate
/// locations is tried in declared order and the first success wins. The
/// chain is atomic to callers — either text comes back or one error does.
#[async_trait]
pub trait ContentSource: Send + Sync + 'static {
    /// Retrieve the raw text of `file_name` from the given repository.
    async fn fetch(&self, repo: &RepoRef, file_name: &str) -> FetchResult<String>;
}
