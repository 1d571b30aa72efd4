//! Graph building and validation for manifest dependencies
//!
//! The dependency graph is represented as a map from module names to their
//! list of direct dependencies:
//!
//! ```text
//! HashMap<String, Vec<String>>
//!    ↓              ↓
//!  module_name   [dep1, dep2, dep3]
//! ```
//!
//! It is only built when a manifest section asks for dependencies-first
//! ordering; declared order never needs it.

use std::collections::{HashMap, HashSet};

use crate::error::{Result, manifest_invalid};
use crate::manifest::ManifestEntry;

/// Build a dependency list (adjacency list) from manifest entries
///
/// # Example
///
/// ```text
/// Input modules:
///   - app    (depends on: util, dom)
///   - util   (no deps)
///   - dom    (no deps)
///
/// Output:
///   "app"  → ["util", "dom"]
///   "util" → []
///   "dom"  → []
/// ```
pub fn build_dependency_list(entries: &[ManifestEntry]) -> HashMap<String, Vec<String>> {
    entries
        .iter()
        .map(|entry| (entry.name.clone(), entry.dependencies.clone()))
        .collect()
}

/// Validate that every dependency in the graph names a module in the manifest
///
/// # Errors
///
/// Returns error if any dependency is not a known module.
pub fn validate_dependencies(deps: &HashMap<String, Vec<String>>) -> Result<()> {
    let known: HashSet<&str> = deps.keys().map(String::as_str).collect();

    let mut names: Vec<&String> = deps.keys().collect();
    names.sort();

    for name in names {
        for dep_name in &deps[name] {
            if known.contains(dep_name.as_str()) {
                continue;
            }
            let mut available: Vec<&str> = known.iter().copied().collect();
            available.sort_unstable();
            return Err(manifest_invalid(format!(
                "Dependency '{}' (from module '{}') not found in manifest. \
                 Available modules: {}",
                dep_name,
                name,
                available.join(", ")
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JamError;
    use crate::test_fixtures::v;

    fn entry(name: &str, deps: &[&str]) -> ManifestEntry {
        ManifestEntry::new(name, v(1.0), 1_700_000_000, format!("js/{name}.js"))
            .with_dependencies(deps.iter().copied())
    }

    #[test]
    fn test_build_dependency_list_simple() {
        let entries = vec![entry("app", &["util"]), entry("util", &[])];

        let deps = build_dependency_list(&entries);

        assert_eq!(deps.len(), 2);
        assert_eq!(deps.get("app"), Some(&vec!["util".to_string()]));
        assert_eq!(deps.get("util"), Some(&vec![]));
    }

    #[test]
    fn test_build_dependency_list_multiple_deps() {
        let entries = vec![
            entry("app", &["util", "dom"]),
            entry("util", &[]),
            entry("dom", &[]),
        ];

        let deps = build_dependency_list(&entries);

        assert_eq!(
            deps.get("app"),
            Some(&vec!["util".to_string(), "dom".to_string()])
        );
    }

    #[test]
    fn test_validate_dependencies_valid() {
        let deps = build_dependency_list(&[entry("app", &["util"]), entry("util", &[])]);
        assert!(validate_dependencies(&deps).is_ok());
    }

    #[test]
    fn test_validate_dependencies_missing() {
        let deps = build_dependency_list(&[entry("app", &["missing-module"])]);

        let result = validate_dependencies(&deps);

        match result {
            Err(JamError::ManifestInvalid { message }) => {
                assert!(message.contains("missing-module"));
                assert!(message.contains("app"));
            }
            other => panic!("Expected ManifestInvalid error, got {other:?}"),
        }
    }
}
