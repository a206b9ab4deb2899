//! Outbound notification adapter using reqwest.
use std::time::Duration;

use async_trait::async_trait;
use eyre::Result;
use http::Method;
use reqwest::Client;
use url::Url;

use crate::{
    core::notify::DISPATCH_TIMEOUT_SECS,
    ports::notifier::{Notifier, NotifyError, NotifyResult},
};

/// Performs the deferred call with the fixed execution timeout. The response
/// body is discarded; scheduled notifications are fire-and-forget.
pub struct ReqwestNotifier {
    client: Client,
}

impl ReqwestNotifier {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DISPATCH_TIMEOUT_SECS))
            .user_agent(concat!("mockgate/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Notifier for ReqwestNotifier {
    async fn notify(&self, method: Method, url: Url) -> NotifyResult<()> {
        let response = self
            .client
            .request(method, url.clone())
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    NotifyError::Timeout(DISPATCH_TIMEOUT_SECS)
                } else {
                    NotifyError::Connection(err.to_string())
                }
            })?;

        tracing::debug!("Notification to {} answered {}", url, response.status());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, routing::post};
    use tokio::net::TcpListener;

    use super::*;

    #[tokio::test]
    async fn delivers_with_the_configured_verb() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let app = Router::new().route(
            "/hook",
            post(move || {
                let tx = tx.clone();
                async move {
                    let _ = tx.send(());
                    "ok"
                }
            }),
        );
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let notifier = ReqwestNotifier::new().unwrap();
        let url = Url::parse(&format!("http://{addr}/hook")).unwrap();
        notifier.notify(Method::POST, url).await.unwrap();
        rx.recv().await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_target_is_a_connection_error() {
        let notifier = ReqwestNotifier::new().unwrap();
        let url = Url::parse("http://127.0.0.1:1/hook").unwrap();
        let err = notifier.notify(Method::GET, url).await.unwrap_err();
        assert!(matches!(err, NotifyError::Connection(_)));
    }
}
