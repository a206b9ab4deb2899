//! Deferred outbound notification scheduling.
//!
//! A guarded rule may carry a notification policy; when the request body
//! supplies the trigger field, a one-shot call is armed on a detached task.
//! The request path never waits on it and cannot cancel it. Failures of the
//! call itself are logged at debug level and otherwise dropped.
use std::{sync::Arc, time::Duration};

use http::Method;
use serde_json::{Map, Value};
use url::Url;

use crate::{
    config::models::NotificationPolicy,
    core::body_rules::RequestViolation,
    ports::notifier::Notifier,
};

/// Execution timeout applied to the outbound call itself, separate from the
/// scheduling delay.
pub const DISPATCH_TIMEOUT_SECS: u64 = 5;

/// Arm the deferred call if the request body supplies the trigger field.
///
/// Returns whether a call was scheduled. A present but malformed target URL
/// is a client-input error, surfaced rather than ignored; an absent, null or
/// empty trigger value simply leaves the policy unarmed.
pub fn maybe_schedule(
    policy: &NotificationPolicy,
    body: &Map<String, Value>,
    notifier: Arc<dyn Notifier>,
) -> Result<bool, RequestViolation> {
    let target = match body.get(&policy.follow_prop) {
        None | Some(Value::Null) => return Ok(false),
        Some(Value::String(s)) if s.is_empty() => return Ok(false),
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(RequestViolation::BadCallbackUrl {
                field: policy.follow_prop.clone(),
                value: other.to_string(),
            });
        }
    };

    let url = Url::parse(&target).map_err(|_| RequestViolation::BadCallbackUrl {
        field: policy.follow_prop.clone(),
        value: target.clone(),
    })?;

    // Unknown verbs are caught by document validation; fall back to GET here
    // rather than dropping an already-armed call.
    let method = Method::from_bytes(policy.notification_method.to_uppercase().as_bytes())
        .unwrap_or(Method::GET);

    let delay = Duration::from_secs(policy.timeout_in_second);
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        tracing::debug!("Firing deferred {} notification to {}", method, url);
        if let Err(err) = notifier.notify(method, url.clone()).await {
            tracing::debug!("Deferred notification to {} failed: {}", url, err);
        }
    });

    Ok(true)
}
