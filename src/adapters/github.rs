//! Content source backed by GitHub-hosted repositories.
use std::time::Duration;

use async_trait::async_trait;
use eyre::Result;
use reqwest::Client;

use crate::ports::content_source::{ContentSource, FetchError, FetchResult, RepoRef};

const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Accept header selecting the raw file body on the REST contents endpoint.
const RAW_ACCEPT: &str = "application/vnd.github.raw";

/// One location to try for a file, with its per-request options.
struct Candidate {
    url: String,
    accept: Option<&'static str>,
}

/// Content source that tries the raw-content mirror first and falls back to
/// the REST contents API.
///
/// The two-candidate chain is atomic to callers: the first successful body
/// wins, and only when every candidate fails does one error come back. No
/// retries beyond the chain itself.
pub struct GithubContentSource {
    client: Client,
    raw_base: String,
    api_base: String,
}

impl GithubContentSource {
    /// Create a source pointing at the public GitHub endpoints.
    pub fn new() -> Result<Self> {
        Self::with_base_urls(DEFAULT_RAW_BASE.to_string(), DEFAULT_API_BASE.to_string())
    }

    /// Create a source with custom endpoint bases. Used by tests to point at
    /// in-process stand-ins.
    pub fn with_base_urls(raw_base: String, api_base: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("mockgate/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            raw_base,
            api_base,
        })
    }

    fn candidates(&self, repo: &RepoRef, file_name: &str) -> Vec<Candidate> {
        vec![
            Candidate {
                url: format!(
                    "{}/{}/{}/{}/{}",
                    self.raw_base, repo.owner, repo.repo, repo.branch, file_name
                ),
                accept: None,
            },
            Candidate {
                url: format!(
                    "{}/repos/{}/{}/contents/{}?ref={}",
                    self.api_base, repo.owner, repo.repo, file_name, repo.branch
                ),
                accept: Some(RAW_ACCEPT),
            },
        ]
    }
}

#[async_trait]
impl ContentSource for GithubContentSource {
    async fn fetch(&self, repo: &RepoRef, file_name: &str) -> FetchResult<String> {
        let candidates = self.candidates(repo, file_name);
        let attempts = candidates.len();

        for candidate in candidates {
            let mut request = self.client.get(&candidate.url);
            if let Some(accept) = candidate.accept {
                request = request.header(reqwest::header::ACCEPT, accept);
            }

            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!("Fetched '{}' from {}", file_name, candidate.url);
                    return response
                        .text()
                        .await
                        .map_err(|e| FetchError::Connection(e.to_string()));
                }
                Ok(response) => {
                    tracing::debug!(
                        "Candidate {} answered {} for '{}'",
                        candidate.url,
                        response.status(),
                        file_name
                    );
                }
                Err(err) => {
                    tracing::debug!("Candidate {} failed for '{}': {}", candidate.url, file_name, err);
                }
            }
        }

        Err(FetchError::Exhausted {
            repo: repo.to_string(),
            file: file_name.to_string(),
            attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::get,
    };
    use tokio::net::TcpListener;

    use super::*;

    async fn spawn(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn repo() -> RepoRef {
        RepoRef {
            owner: "acme".into(),
            repo: "mocks".into(),
            branch: "main".into(),
        }
    }

    #[tokio::test]
    async fn serves_from_the_raw_mirror_first() {
        let raw = Router::new().route(
            "/acme/mocks/main/mockgate.yml",
            get(|| async { "dbFile: db.json" }),
        );
        let raw_base = spawn(raw).await;
        // The API base is unreachable on purpose; the first candidate wins.
        let source =
            GithubContentSource::with_base_urls(raw_base, "http://127.0.0.1:1".to_string())
                .unwrap();

        let text = source.fetch(&repo(), "mockgate.yml").await.unwrap();
        assert_eq!(text, "dbFile: db.json");
    }

    #[tokio::test]
    async fn falls_back_to_the_contents_api() {
        let raw = Router::new().fallback(|| async { StatusCode::NOT_FOUND });
        let api = Router::new().route(
            "/repos/acme/mocks/contents/{file}",
            get(|Path(file): Path<String>, headers: HeaderMap| async move {
                assert_eq!(
                    headers.get(reqwest::header::ACCEPT).unwrap(),
                    RAW_ACCEPT
                );
                format!("content of {file}")
            }),
        );
        let source =
            GithubContentSource::with_base_urls(spawn(raw).await, spawn(api).await).unwrap();

        let text = source.fetch(&repo(), "db.json").await.unwrap();
        assert_eq!(text, "content of db.json");
    }

    #[tokio::test]
    async fn exhausted_chain_yields_one_error() {
        let miss = Router::new().fallback(|| async { StatusCode::NOT_FOUND });
        let source = GithubContentSource::with_base_urls(spawn(miss.clone()).await, spawn(miss).await)
            .unwrap();

        let err = source.fetch(&repo(), "db.json").await.unwrap_err();
        assert!(matches!(err, FetchError::Exhausted { attempts: 2, .. }));
    }
}
