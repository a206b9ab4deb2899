//! Request-body contract checks for guarded rules.
use std::collections::BTreeMap;

use serde_json::{Map, Value};
use thiserror::Error;

/// A client-input problem found while applying a matched rule.
///
/// Carries the exact field names involved so the HTTP layer can report them
/// back verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestViolation {
    #[error("Missing mandatory body field(s): {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Body field(s) not permitted by this route: {}", .0.join(", "))]
    DisallowedFields(Vec<String>),

    #[error("Body field '{field}' does not hold a valid URL: '{value}'")]
    BadCallbackUrl { field: String, value: String },
}

/// Check a request body against a rule's declared field contract.
///
/// When restriction is enabled, undeclared fields are reported first; the
/// mandatory-field check runs otherwise. Either failure alone fails the
/// request. Pure, no side effects.
pub fn validate(
    body_fields: &BTreeMap<String, bool>,
    restricted: bool,
    body: &Map<String, Value>,
) -> Result<(), RequestViolation> {
    if restricted {
        let disallowed: Vec<String> = body
            .keys()
            .filter(|key| !body_fields.contains_key(*key))
            .cloned()
            .collect();
        if !disallowed.is_empty() {
            return Err(RequestViolation::DisallowedFields(disallowed));
        }
    }

    let missing: Vec<String> = body_fields
        .iter()
        .filter(|(name, mandatory)| **mandatory && !body.contains_key(*name))
        .map(|(name, _)| name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(RequestViolation::MissingFields(missing));
    }

    Ok(())
}
