//! Parsing of fetched document text into structured data.
//!
//! Documents arrive as raw text from a content source; the file-name extension
//! decides the format (YAML unless the name says `.json`). The definition file
//! is parsed twice over the same tree: once into a generic value, kept around
//! for data extraction when the definition doubles as the data source, and
//! once into the typed [`MockConfig`].
use std::path::Path;

use eyre::{Context, Result};
use serde_json::Value;

use crate::config::models::MockConfig;

/// A mock definition together with the raw document it was parsed from.
#[derive(Debug, Clone)]
pub struct ParsedDefinition {
    pub config: MockConfig,
    pub document: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocFormat {
    Yaml,
    Json,
}

fn format_for(file_name: &str) -> DocFormat {
    match Path::new(file_name).extension().and_then(|ext| ext.to_str()) {
        Some("json") => DocFormat::Json,
        _ => DocFormat::Yaml,
    }
}

/// Parse document text into a generic JSON value, format chosen by file name.
pub fn parse_document(file_name: &str, text: &str) -> Result<Value> {
    let value = match format_for(file_name) {
        DocFormat::Yaml => serde_yaml::from_str(text)
            .with_context(|| format!("Failed to parse '{file_name}' as YAML"))?,
        DocFormat::Json => serde_json::from_str(text)
            .with_context(|| format!("Failed to parse '{file_name}' as JSON"))?,
    };
    Ok(value)
}

/// Parse definition-file text into a typed config plus its raw document.
///
/// A route entry that is not a sequence of rules fails here; that is a
/// configuration-authoring defect, not a resolution miss.
pub fn parse_definition(file_name: &str, text: &str) -> Result<ParsedDefinition> {
    let document = parse_document(file_name, text)?;
    let config: MockConfig = serde_json::from_value(document.clone())
        .with_context(|| format!("Definition '{file_name}' failed structural validation"))?;
    Ok(ParsedDefinition { config, document })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::Rule;

    const DEFINITION: &str = r#"
apiRoutePrefix: /api
dbFile: db.json
dbDataPath: data.items
routes:
  get:
    - /items
    - path: /orders
      bodyFields:
        customer: true
"#;

    #[test]
    fn parses_yaml_definition() {
        let parsed = parse_definition("mockgate.yml", DEFINITION).unwrap();
        assert_eq!(parsed.config.api_route_prefix, "/api");
        assert_eq!(parsed.config.db_file, "db.json");
        let rules = parsed.config.rules_for("get").unwrap();
        assert_eq!(rules.len(), 2);
        assert!(matches!(rules[0], Rule::Simple(_)));
        assert!(matches!(rules[1], Rule::Guarded(_)));
        // The raw document survives alongside the typed view.
        assert_eq!(parsed.document["apiRoutePrefix"], "/api");
    }

    #[test]
    fn parses_json_data_file() {
        let value = parse_document("db.json", r#"{"data": {"items": [1, 2]}}"#).unwrap();
        assert_eq!(value["data"]["items"][0], 1);
    }

    #[test]
    fn rejects_rule_list_that_is_not_a_sequence() {
        let yaml = r#"
dbFile: db.json
routes:
  get: /items
"#;
        assert!(parse_definition("mockgate.yml", yaml).is_err());
    }

    #[test]
    fn rejects_unparseable_text() {
        assert!(parse_document("db.json", "not json at all").is_err());
    }
}
