//! HTTP surface for the mock server.
//!
//! Every request path reads `/{owner}/{repo}/{branch}/<mock path...>`: the
//! first three segments name the repository carrying the definition document,
//! the remainder is resolved against its route table. Definitions are fetched
//! fresh per request; nothing is cached.
use std::sync::Arc;

use axum::{
    Json, Router,
    body::to_bytes,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Map, Value, json};
use tracing::Instrument;

use crate::{
    config::{DEFINITION_FILE, loader, validation::MockConfigValidator},
    core::{Outcome, RequestViolation, Resolver},
    ports::content_source::{ContentSource, RepoRef},
    tracing_setup,
};

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared per-process state for the HTTP surface.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ContentSource>,
    pub resolver: Arc<Resolver>,
}

/// Build the axum router: a health probe plus a catch-all mock handler.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .fallback(handle_mock)
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "mockgate",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn handle_mock(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = tracing_setup::request_span(method.as_str(), &path, &request_id);

    async move {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < 3 {
            return error_response(
                StatusCode::NOT_FOUND,
                "Request paths must read /{owner}/{repo}/{branch}/...",
            );
        }
        let repo = RepoRef {
            owner: segments[0].to_string(),
            repo: segments[1].to_string(),
            branch: segments[2].to_string(),
        };
        let mock_path = format!("/{}", segments[3..].join("/"));

        let body = match read_json_body(request).await {
            Ok(body) => body,
            Err(response) => return response,
        };

        let text = match state.source.fetch(&repo, DEFINITION_FILE).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("Definition fetch failed for {}: {}", repo, err);
                return error_response(
                    StatusCode::BAD_GATEWAY,
                    &format!("Could not retrieve '{DEFINITION_FILE}' from {repo}"),
                );
            }
        };

        let definition = match loader::parse_definition(DEFINITION_FILE, &text)
            .and_then(|parsed| {
                MockConfigValidator::validate(&parsed.config)?;
                Ok(parsed)
            }) {
            Ok(definition) => definition,
            Err(err) => {
                tracing::error!("Invalid definition in {}: {:#}", repo, err);
                return error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &format!("Definition document in {repo} is invalid"),
                );
            }
        };

        let outcome = match state
            .resolver
            .resolve(&repo, &definition, method.as_str(), &mock_path, body.as_ref())
            .await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!("Resolution failed for {} {}: {:#}", method, mock_path, err);
                return error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Definition document could not be applied",
                );
            }
        };

        tracing::info!("Resolved {} {} in {}", method, mock_path, repo);
        outcome_response(outcome)
    }
    .instrument(span)
    .await
}

/// Read an optional JSON object body. Non-object and empty bodies resolve to
/// no body at all; guarded rules then see an empty key set.
async fn read_json_body(request: Request) -> Result<Option<Map<String, Value>>, Response> {
    let bytes = to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|_| error_response(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large"))?;
    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(serde_json::from_slice::<Value>(&bytes)
        .ok()
        .and_then(|value| value.as_object().cloned()))
}

/// Map a resolution outcome onto the external status contract.
fn outcome_response(outcome: Outcome) -> Response {
    match outcome {
        Outcome::Data(value) => (StatusCode::OK, Json(value)).into_response(),
        Outcome::MethodNotMatched => {
            error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
        }
        Outcome::NoRuleMatched { path } => {
            error_response(StatusCode::NOT_FOUND, &format!("No route matched '{path}'"))
        }
        Outcome::Invalid(violation) => violation_response(violation),
        Outcome::LookupFailed => error_response(StatusCode::NOT_FOUND, "Response data not found"),
    }
}

fn violation_response(violation: RequestViolation) -> Response {
    let body = match &violation {
        RequestViolation::MissingFields(fields) => json!({
            "error": "Missing mandatory body field(s)",
            "fields": fields,
        }),
        RequestViolation::DisallowedFields(fields) => json!({
            "error": "Body field(s) not permitted by this route",
            "fields": fields,
        }),
        RequestViolation::BadCallbackUrl { field, value } => json!({
            "error": "Notification target is not a valid URL",
            "field": field,
            "value": value,
        }),
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_outcome_is_ok() {
        let response = outcome_response(Outcome::Data(json!({"a": 1})));
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn method_miss_is_method_not_allowed() {
        let response = outcome_response(Outcome::MethodNotMatched);
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn rule_miss_and_lookup_miss_are_not_found() {
        let response = outcome_response(Outcome::NoRuleMatched {
            path: "/nope".into(),
        });
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = outcome_response(Outcome::LookupFailed);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn violations_are_bad_request() {
        for violation in [
            RequestViolation::MissingFields(vec!["a".into()]),
            RequestViolation::DisallowedFields(vec!["z".into()]),
            RequestViolation::BadCallbackUrl {
                field: "cb".into(),
                value: "nope".into(),
            },
        ] {
            let response = outcome_response(Outcome::Invalid(violation));
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }
}
