//! Wildcard module groups
//!
//! A request token ending in `.*` stands for a module and all of its
//! dot-delimited descendants (`x.*` covers `x`, `x.foo`, `x.foo.bar`). The
//! token is replaced in place by the matching manifest names in canonical
//! order.

use crate::manifest::SortedDependency;

pub const WILDCARD_SUFFIX: &str = ".*";

/// Expand wildcard tokens against the canonical dependency list
///
/// Non-wildcard tokens pass through trimmed; empty tokens are dropped. A
/// wildcard matching nothing contributes no names.
pub fn expand_wildcards<'t, I>(tokens: I, sorted: &[SortedDependency<'_>]) -> Vec<String>
where
    I: IntoIterator<Item = &'t str>,
{
    let mut expanded = Vec::new();
    for token in tokens.into_iter().map(str::trim).filter(|t| !t.is_empty()) {
        match token.strip_suffix(WILDCARD_SUFFIX) {
            Some(prefix) => expanded.extend(
                sorted
                    .iter()
                    .filter(|dep| in_group(dep.name, prefix))
                    .map(|dep| dep.name.to_string()),
            ),
            None => expanded.push(token.to_string()),
        }
    }
    expanded
}

fn in_group(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}
