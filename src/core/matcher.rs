//! Path pattern matching for route templates.
//!
//! A template is the document's route prefix joined with a rule's own path.
//! Matching is loose: case-insensitive, trailing slash insignificant, anchored
//! at both ends. `:name` segments match exactly one path segment; a trailing
//! `*` matches any remaining depth.
use regex::Regex;
use thiserror::Error;

/// Error produced when a route template cannot be compiled. This is a
/// configuration-authoring defect and is propagated, never swallowed.
#[derive(Error, Debug)]
#[error("Invalid route template '{template}': {source}")]
pub struct PatternError {
    pub template: String,
    #[source]
    source: regex::Error,
}

/// A compiled route template.
pub struct PathMatcher {
    regex: Regex,
}

impl PathMatcher {
    /// Compile a route template into a matcher.
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        let normalized = normalize(template);
        let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();

        let mut pattern = String::from("(?i)^");
        for (index, segment) in segments.iter().enumerate() {
            let last = index == segments.len() - 1;
            if *segment == "*" && last {
                // Trailing wildcard swallows any remaining depth, including none.
                pattern.push_str("(?:/[^/].*?)?");
            } else if *segment == "*" {
                pattern.push_str("/[^/]+");
            } else if segment.starts_with(':') {
                pattern.push_str("/[^/]+");
            } else {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }
        pattern.push_str("/?$");

        let regex = Regex::new(&pattern).map_err(|source| PatternError {
            template: template.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// Test a concrete request path against the template.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(&normalize(path))
    }
}

/// Join the document-wide route prefix with a rule's own path template.
pub fn join_template(prefix: &str, rule_path: &str) -> String {
    normalize(&format!("{prefix}/{rule_path}"))
}

/// Collapse repeated slashes and guarantee a single leading one.
fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    out.push('/');
    let mut prev_slash = true;
    for ch in path.chars() {
        if ch == '/' {
            if !prev_slash {
                out.push('/');
            }
            prev_slash = true;
        } else {
            out.push(ch);
            prev_slash = false;
        }
    }
    out
}
