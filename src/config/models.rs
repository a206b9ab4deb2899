//! Mock definition data structures.
//!
//! These types map directly to the YAML (or JSON) document a user keeps in
//! their repository. Field names are camelCase on the wire so the document
//! reads naturally, and defaults keep minimal documents concise.
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

fn default_notification_method() -> String {
    "GET".to_string()
}

/// Root of a mock definition document.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MockConfig {
    /// Prefix prepended to every rule path before matching (e.g. `/api/v1`).
    #[serde(default)]
    pub api_route_prefix: String,
    /// Name of the file holding response data. Naming the definition file
    /// itself ([`crate::config::DEFINITION_FILE`]) makes the definition
    /// document the data source.
    pub db_file: String,
    /// Dot/slash path into the data document locating the value to return.
    #[serde(default)]
    pub db_data_path: String,
    /// HTTP method (case-insensitive) to ordered rule list. Order is part of
    /// the contract: the first rule whose path matches wins.
    #[serde(default)]
    pub routes: HashMap<String, Vec<Rule>>,
}

impl MockConfig {
    /// Look up the rule list for a method, comparing keys case-insensitively.
    pub fn rules_for(&self, method: &str) -> Option<&[Rule]> {
        self.routes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(method))
            .map(|(_, rules)| rules.as_slice())
    }
}

/// A single route rule.
///
/// Documents write either a bare path string or a mapping carrying a body
/// contract, so the two shapes deserialize untagged.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum Rule {
    /// Bare path template: match the path and serve data, nothing else.
    Simple(String),
    /// Path template plus a body contract and optional notification policy.
    Guarded(GuardedRule),
}

impl Rule {
    /// The rule's own path template, before the route prefix is applied.
    pub fn path(&self) -> &str {
        match self {
            Rule::Simple(path) => path,
            Rule::Guarded(rule) => &rule.path,
        }
    }
}

/// Rule variant carrying a request-body contract.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GuardedRule {
    pub path: String,
    /// Declared body fields; `true` marks a field mandatory.
    #[serde(default)]
    pub body_fields: BTreeMap<String, bool>,
    /// When set, request bodies may only carry declared fields.
    #[serde(default)]
    pub restricted_body: bool,
    #[serde(default)]
    pub schedule_notification: Option<NotificationPolicy>,
}

/// Deferred outbound-call policy attached to a guarded rule.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPolicy {
    /// Request-body field expected to hold the target URL.
    pub follow_prop: String,
    /// Verb for the outbound call.
    #[serde(default = "default_notification_method")]
    pub notification_method: String,
    /// Seconds to wait before firing the call.
    #[serde(default)]
    pub timeout_in_second: u64,
}
