//! Mockgate - a mock API server driven entirely by remote configuration.
//!
//! Mockgate serves mock API responses whose routes, body contracts, response
//! data and side effects are described by a YAML (or JSON) definition document
//! the user keeps in a Git repository. Nothing is compiled in: every inbound
//! request is resolved at runtime against the route table fetched from
//! `/{owner}/{repo}/{branch}` named by the request path itself.
//!
//! # Quick Example
//! ```no_run
//! use std::sync::Arc;
//!
//! use mockgate::{
//!     adapters::{AppState, GithubContentSource, ReqwestNotifier, router},
//!     core::Resolver,
//! };
//!
//! # #[tokio::main] async fn main() -> eyre::Result<()> {
//! let source = Arc::new(GithubContentSource::new()?);
//! let notifier = Arc::new(ReqwestNotifier::new()?);
//! let resolver = Arc::new(Resolver::new(source.clone(), notifier));
//! let app = router(AppState { source, resolver });
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(()) }
//! ```
//!
//! # Architecture
//! The crate separates **ports** (traits) from **adapters** (implementations)
//! while keeping the resolution logic inside `core`:
//! * `core::matcher` compiles route templates (literals, `:param` segments,
//!   trailing `*`) into loose, case-insensitive matchers.
//! * `core::resolver` scans a method's rule list in declared order; the first
//!   path match commits.
//! * `core::body_rules` applies a guarded rule's body contract.
//! * `core::locator` finds the response value, in the definition document or
//!   an external data file, via a dot/slash deep path.
//! * `core::notify` arms the deferred, fire-and-forget outbound call.
//!
//! Resolution is stateless: definitions are fetched and parsed fresh per
//! request and nothing is shared across invocations. The only work that
//! outlives a request is an armed notification, which runs as a detached
//! task with its own execution timeout.
//!
//! # Error Handling
//! Fallible APIs return `eyre::Result<T>` or a domain-specific error type;
//! client-input problems travel as typed [`core::Outcome`] values carrying
//! the exact field names involved.
pub mod config;
pub mod ports;
pub mod tracing_setup;

pub mod adapters;
pub mod core;

// Re-export the specific types needed by the binary crate
pub use crate::{
    adapters::{AppState, DirContentSource, GithubContentSource, ReqwestNotifier, router},
    core::{Outcome, Resolver},
    ports::content_source::{ContentSource, RepoRef},
};
