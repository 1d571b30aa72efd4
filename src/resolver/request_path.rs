//! Request path parsing
//!
//! Bundle URIs look like `/jam/1700000500/app+v2.0,util+v1.0.js`. The parser
//! pulls out the dependency segment right before the extension and the
//! optional timestamp segment before it.

use regex::{Captures, Regex};

use crate::domain::ContentType;
use crate::error::{JamError, Result};

#[derive(Debug, Clone)]
pub struct RequestPathParser {
    expr: Regex,
}

impl RequestPathParser {
    pub fn new(content_type: ContentType) -> Result<Self> {
        let pattern = format!(
            r"(?:(?P<last_modified>[0-9]+)/?)?(?P<dependencies>[^/]*){}",
            regex::escape(content_type.file_extension())
        );
        let expr = Regex::new(&pattern).map_err(|e| JamError::InvalidPattern {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { expr })
    }

    /// First match carrying a non-empty dependency segment
    fn first_match<'p>(&self, path: &'p str) -> Option<Captures<'p>> {
        self.expr.captures_iter(path).find(|captures| {
            captures
                .name("dependencies")
                .is_some_and(|m| !m.as_str().is_empty())
        })
    }

    /// Dependency token string of a request path, empty if there is none
    pub fn dependencies<'p>(&self, path: &'p str) -> &'p str {
        self.first_match(path)
            .and_then(|captures| captures.name("dependencies"))
            .map_or("", |m| m.as_str())
    }

    /// Timestamp segment of a request path, if present
    pub fn last_modified(&self, path: &str) -> Option<i64> {
        self.first_match(path)
            .and_then(|captures| captures.name("last_modified"))
            .and_then(|m| m.as_str().parse().ok())
    }
}
