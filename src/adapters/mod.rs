//! Adapters wiring the core resolution engine to the outside world.
pub mod dir_source;
pub mod github;
pub mod http_handler;
pub mod notifier;

pub use dir_source::DirContentSource;
pub use github::GithubContentSource;
pub use http_handler::{AppState, router};
pub use notifier::ReqwestNotifier;
