//! Content source backed by a local directory tree.
//!
//! Lays files out as `{root}/{owner}/{repo}/{branch}/{file}`, mirroring the
//! remote layout so definitions can be exercised offline during development
//! and in tests.
use std::path::PathBuf;

use async_trait::async_trait;

use crate::ports::content_source::{ContentSource, FetchError, FetchResult, RepoRef};

pub struct DirContentSource {
    root: PathBuf,
}

impl DirContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ContentSource for DirContentSource {
    async fn fetch(&self, repo: &RepoRef, file_name: &str) -> FetchResult<String> {
        // Reject traversal out of the tree; file names come from user documents.
        if file_name.contains("..") || file_name.starts_with('/') {
            return Err(FetchError::NotFound {
                repo: repo.to_string(),
                file: file_name.to_string(),
            });
        }

        let path = self
            .root
            .join(&repo.owner)
            .join(&repo.repo)
            .join(&repo.branch)
            .join(file_name);

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => FetchError::NotFound {
                    repo: repo.to_string(),
                    file: file_name.to_string(),
                },
                _ => FetchError::Connection(err.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> RepoRef {
        RepoRef {
            owner: "acme".into(),
            repo: "mocks".into(),
            branch: "main".into(),
        }
    }

    #[tokio::test]
    async fn reads_files_from_the_repo_layout() {
        let dir = tempfile::tempdir().unwrap();
        let branch_dir = dir.path().join("acme/mocks/main");
        std::fs::create_dir_all(&branch_dir).unwrap();
        std::fs::write(branch_dir.join("db.json"), r#"{"ok": true}"#).unwrap();

        let source = DirContentSource::new(dir.path());
        let text = source.fetch(&repo(), "db.json").await.unwrap();
        assert_eq!(text, r#"{"ok": true}"#);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirContentSource::new(dir.path());
        let err = source.fetch(&repo(), "absent.yml").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
    }

    #[tokio::test]
    async fn rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirContentSource::new(dir.path());
        let err = source.fetch(&repo(), "../../secret").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
    }
}
