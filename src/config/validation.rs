//! Structural validation for mock definition documents.
//!
//! Run by the `validate` CLI command and after every remote parse. Collects
//! every problem it finds instead of stopping at the first, so a document
//! author gets the full picture in one pass.
use eyre::Result;

use crate::config::models::{MockConfig, NotificationPolicy, Rule};

/// Validation result type alias
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error types
#[derive(Debug, thiserror::Error, Clone)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },
}

const KNOWN_METHODS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"];

/// Mock definition validator
pub struct MockConfigValidator;

impl MockConfigValidator {
    /// Validate the entire definition document.
    pub fn validate(config: &MockConfig) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if !config.api_route_prefix.is_empty() && !config.api_route_prefix.starts_with('/') {
            errors.push(ValidationError::InvalidField {
                field: "apiRoutePrefix".to_string(),
                message: "Route prefix must start with '/'".to_string(),
            });
        }

        if config.db_file.is_empty() {
            errors.push(ValidationError::MissingField {
                field: "dbFile".to_string(),
            });
        }

        if config.routes.is_empty() {
            errors.push(ValidationError::MissingField {
                field: "routes".to_string(),
            });
        }

        for (method, rules) in &config.routes {
            if !KNOWN_METHODS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(method))
            {
                errors.push(ValidationError::InvalidField {
                    field: format!("routes.{method}"),
                    message: "Unknown HTTP method".to_string(),
                });
            }

            for rule in rules {
                Self::validate_rule(method, rule, &mut errors);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::ValidationFailed {
                message: Self::format_multiple_errors(errors),
            })
        }
    }

    fn validate_rule(method: &str, rule: &Rule, errors: &mut Vec<ValidationError>) {
        let path = rule.path();
        if !path.starts_with('/') {
            errors.push(ValidationError::InvalidField {
                field: format!("routes.{method} rule '{path}'"),
                message: "Rule paths must start with '/'".to_string(),
            });
        }

        if let Rule::Guarded(guarded) = rule {
            if let Some(policy) = &guarded.schedule_notification {
                Self::validate_notification(method, path, policy, errors);
            }
        }
    }

    fn validate_notification(
        method: &str,
        path: &str,
        policy: &NotificationPolicy,
        errors: &mut Vec<ValidationError>,
    ) {
        if policy.follow_prop.is_empty() {
            errors.push(ValidationError::MissingField {
                field: format!("routes.{method} rule '{path}' followProp"),
            });
        }
        if !KNOWN_METHODS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(&policy.notification_method))
        {
            errors.push(ValidationError::InvalidField {
                field: format!("routes.{method} rule '{path}' notificationMethod"),
                message: format!("Unknown HTTP method '{}'", policy.notification_method),
            });
        }
    }

    /// Format multiple validation errors into a single message
    fn format_multiple_errors(errors: Vec<ValidationError>) -> String {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        format!(
            "Found {} validation error(s):\n  - {}",
            messages.len(),
            messages.join("\n  - ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_definition;

    fn parse(yaml: &str) -> MockConfig {
        parse_definition("mockgate.yml", yaml).unwrap().config
    }

    #[test]
    fn accepts_well_formed_definition() {
        let config = parse(
            r#"
apiRoutePrefix: /api
dbFile: mockgate.yml
dbDataPath: data
routes:
  get:
    - /items
  post:
    - path: /items
      bodyFields:
        name: true
      scheduleNotification:
        followProp: callback
        notificationMethod: POST
        timeoutInSecond: 2
"#,
        );
        assert!(MockConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn rejects_prefix_without_leading_slash() {
        let config = parse(
            r#"
apiRoutePrefix: api
dbFile: db.json
routes:
  get:
    - /items
"#,
        );
        let err = MockConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("apiRoutePrefix"));
    }

    #[test]
    fn rejects_unknown_methods_and_bad_rule_paths() {
        let config = parse(
            r#"
dbFile: db.json
routes:
  fetch:
    - items
"#,
        );
        let err = MockConfigValidator::validate(&config).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Unknown HTTP method"));
        assert!(message.contains("must start with '/'"));
    }

    #[test]
    fn rejects_empty_routes() {
        let config = parse("dbFile: db.json\n");
        assert!(MockConfigValidator::validate(&config).is_err());
    }
}
