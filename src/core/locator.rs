//! Response data location and deep-path extraction.
//!
//! A matched rule's response value lives either inside the definition
//! document itself or in a separate data file fetched through the content
//! source. Both "file not found" and "path not found inside the document"
//! collapse into one lookup failure; callers treat it as not-found, never as
//! a crash.
use eyre::Result;
use serde_json::Value;

use crate::{
    config::{DEFINITION_FILE, loader, loader::ParsedDefinition},
    ports::content_source::{ContentSource, RepoRef},
};

/// Walk a dot/slash deep path into a parsed document.
///
/// Mapping nodes are indexed by key, sequence nodes by numeric segment.
/// An empty path addresses the whole document. Any absent node yields
/// `None` instead of an error.
pub fn extract<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let mut node = document;
    for segment in path.split(['.', '/']).filter(|s| !s.is_empty()) {
        node = match node {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(node)
}

/// Locate the response value for a resolved rule.
///
/// Returns `Ok(None)` when the data file cannot be retrieved or the data
/// path has no corresponding node. An unparseable data file is a
/// configuration defect and propagates as an error.
pub async fn locate(
    source: &dyn ContentSource,
    repo: &RepoRef,
    definition: &ParsedDefinition,
) -> Result<Option<Value>> {
    let config = &definition.config;

    let fetched;
    let data_document = if config.db_file == DEFINITION_FILE {
        &definition.document
    } else {
        match source.fetch(repo, &config.db_file).await {
            Ok(text) => {
                fetched = loader::parse_document(&config.db_file, &text)?;
                &fetched
            }
            Err(err) => {
                tracing::warn!("Data file '{}' unavailable in {}: {}", config.db_file, repo, err);
                return Ok(None);
            }
        }
    };

    Ok(extract(data_document, &config.db_data_path).cloned())
}
