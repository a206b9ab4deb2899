//! Request-to-rule resolution.
//!
//! The resolver drives one request through the method table, the path
//! matchers, the body contract, the response locator and, when a matched rule
//! asks for it, the notification scheduler. Resolution is stateless: every
//! call is fully determined by the parsed definition and the request, and
//! nothing is shared across invocations.
use std::sync::Arc;

use eyre::Result;
use serde_json::{Map, Value};

use crate::{
    config::{loader::ParsedDefinition, models::Rule},
    core::{body_rules, body_rules::RequestViolation, locator, matcher, matcher::PathMatcher, notify},
    ports::{content_source::{ContentSource, RepoRef}, notifier::Notifier},
};

/// The result of resolving one request against a definition document.
///
/// Transient by design: produced, mapped to a response, and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A rule matched and its response value was located.
    Data(Value),
    /// The definition declares no rule list for the request's method.
    MethodNotMatched,
    /// A rule list exists for the method but no path template matched.
    NoRuleMatched { path: String },
    /// The first matching rule rejected the request body.
    Invalid(RequestViolation),
    /// The response data file or the configured data path was absent.
    LookupFailed,
}

/// Resolves inbound requests against parsed definition documents.
pub struct Resolver {
    source: Arc<dyn ContentSource>,
    notifier: Arc<dyn Notifier>,
}

impl Resolver {
    pub fn new(source: Arc<dyn ContentSource>, notifier: Arc<dyn Notifier>) -> Self {
        Self { source, notifier }
    }

    /// Resolve a single request to an [`Outcome`].
    ///
    /// Rules are scanned in declared order and the first path match commits:
    /// a body-contract failure on that rule aborts resolution rather than
    /// falling through to later rules. Errors returned here are
    /// configuration defects (an uncompilable template, an unparseable data
    /// file), never client input problems.
    pub async fn resolve(
        &self,
        repo: &RepoRef,
        definition: &ParsedDefinition,
        method: &str,
        path: &str,
        body: Option<&Map<String, Value>>,
    ) -> Result<Outcome> {
        let config = &definition.config;

        let Some(rules) = config.rules_for(method) else {
            tracing::debug!("No rule list for method {} in {}", method, repo);
            return Ok(Outcome::MethodNotMatched);
        };

        let empty = Map::new();
        let body = body.unwrap_or(&empty);

        for rule in rules {
            let template = matcher::join_template(&config.api_route_prefix, rule.path());
            if !PathMatcher::compile(&template)?.is_match(path) {
                continue;
            }
            tracing::debug!("Path {} matched rule template {}", path, template);

            if let Rule::Guarded(guarded) = rule {
                if let Err(violation) =
                    body_rules::validate(&guarded.body_fields, guarded.restricted_body, body)
                {
                    return Ok(Outcome::Invalid(violation));
                }
            }

            let Some(value) = locator::locate(self.source.as_ref(), repo, definition).await?
            else {
                return Ok(Outcome::LookupFailed);
            };

            if let Rule::Guarded(guarded) = rule {
                if let Some(policy) = &guarded.schedule_notification {
                    match notify::maybe_schedule(policy, body, self.notifier.clone()) {
                        Ok(true) => tracing::debug!(
                            "Armed deferred notification ({}s) for {}",
                            policy.timeout_in_second,
                            path
                        ),
                        Ok(false) => {}
                        Err(violation) => return Ok(Outcome::Invalid(violation)),
                    }
                }
            }

            return Ok(Outcome::Data(value));
        }

        Ok(Outcome::NoRuleMatched {
            path: path.to_string(),
        })
    }
}
