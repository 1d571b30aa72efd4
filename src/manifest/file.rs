//! In-memory manifest, loadable from a YAML file

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::ContentType;
use crate::error::{Result, manifest_invalid, manifest_not_found, manifest_parse_failed};
use crate::manifest::{Manifest, ManifestEntry, SortedDependency, graph, sort};

/// How a manifest section's canonical order is derived
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManifestOrder {
    /// The order modules are listed in
    #[default]
    Declared,
    /// Declared order, with each module moved after its dependencies
    DependenciesFirst,
}

/// On-disk shape of a manifest file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    #[serde(default, alias = "js")]
    script: Option<SectionFile>,
    #[serde(default, alias = "css")]
    stylesheet: Option<SectionFile>,
    #[serde(default, alias = "html")]
    markup: Option<SectionFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SectionFile {
    #[serde(default)]
    order: ManifestOrder,
    #[serde(default)]
    modules: Vec<ManifestEntry>,
}

#[derive(Debug, Default)]
struct Section {
    entries: Vec<ManifestEntry>,
    index: HashMap<String, usize>,
    /// Indices into `entries`, canonical order, removed modules excluded
    sorted: Vec<usize>,
}

/// A manifest held entirely in memory
#[derive(Debug, Default)]
pub struct StaticManifest {
    sections: HashMap<ContentType, Section>,
}

impl StaticManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a manifest from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(manifest_not_found(path.display().to_string()));
        }
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| manifest_parse_failed(path.display().to_string(), e.to_string()))?;
        let file: ManifestFile = serde_yaml::from_str(&yaml)
            .map_err(|e| manifest_parse_failed(path.display().to_string(), e.to_string()))?;
        Self::from_file(file)
    }

    /// Parse a manifest from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: ManifestFile = serde_yaml::from_str(yaml)?;
        Self::from_file(file)
    }

    fn from_file(file: ManifestFile) -> Result<Self> {
        let mut manifest = Self::new();
        let sections = [
            (ContentType::Script, file.script),
            (ContentType::Stylesheet, file.stylesheet),
            (ContentType::Markup, file.markup),
        ];
        for (content_type, section) in sections {
            if let Some(section) = section {
                manifest.insert_section(content_type, section.modules, section.order)?;
            }
        }
        Ok(manifest)
    }

    /// Builder form of [`StaticManifest::insert_section`]
    pub fn with_section(
        mut self,
        content_type: ContentType,
        entries: Vec<ManifestEntry>,
        order: ManifestOrder,
    ) -> Result<Self> {
        self.insert_section(content_type, entries, order)?;
        Ok(self)
    }

    /// Replace the modules of one content type
    ///
    /// # Errors
    ///
    /// Returns error on duplicate module names, and for dependencies-first
    /// order on unknown dependencies or cycles.
    pub fn insert_section(
        &mut self,
        content_type: ContentType,
        entries: Vec<ManifestEntry>,
        order: ManifestOrder,
    ) -> Result<()> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if index.insert(entry.name.clone(), i).is_some() {
                return Err(manifest_invalid(format!(
                    "Duplicate {} module '{}'",
                    content_type, entry.name
                )));
            }
        }

        let ordered: Vec<usize> = match order {
            ManifestOrder::Declared => (0..entries.len()).collect(),
            ManifestOrder::DependenciesFirst => {
                let deps = graph::build_dependency_list(&entries);
                let declared: Vec<String> = entries.iter().map(|e| e.name.clone()).collect();
                sort::topological_sort(&deps, &declared)?
                    .iter()
                    .filter_map(|name| index.get(name).copied())
                    .collect()
            }
        };
        let sorted = ordered
            .into_iter()
            .filter(|&i| !entries[i].removed)
            .collect();

        self.sections.insert(
            content_type,
            Section {
                entries,
                index,
                sorted,
            },
        );
        Ok(())
    }
}

impl Manifest for StaticManifest {
    fn sorted_dependencies(&self, content_type: ContentType) -> Vec<SortedDependency<'_>> {
        self.sections
            .get(&content_type)
            .map(|section| {
                section
                    .sorted
                    .iter()
                    .map(|&i| section.entries[i].as_sorted())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn module(&self, content_type: ContentType, name: &str) -> Option<&ManifestEntry> {
        let section = self.sections.get(&content_type)?;
        section.index.get(name).map(|&i| &section.entries[i])
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::JamError;
    use crate::test_fixtures::v;

    const MANIFEST_YAML: &str = r"
script:
  modules:
    - name: app
      version: 2.0
      last_modified: 1700000500
      path: js/app.js
      byte_size: 512
      dependencies: [util]
      serialized_versions:
        - version: 1.0
          last_modified: 1700000000
    - name: util
      version: 1
      last_modified: 1690000000
      path: js/util.js
    - name: legacy
      version: 1.0
      last_modified: 1600000000
      path: js/legacy.js
      removed: true
css:
  modules:
    - name: site
      version: 3.5
      last_modified: 1700000100
      path: css/site.css
";

    fn names(manifest: &StaticManifest, content_type: ContentType) -> Vec<&str> {
        manifest
            .sorted_dependencies(content_type)
            .iter()
            .map(|d| d.name)
            .collect()
    }

    #[test]
    fn test_from_yaml_declared_order() {
        let manifest = StaticManifest::from_yaml(MANIFEST_YAML).expect("manifest should parse");

        assert_eq!(names(&manifest, ContentType::Script), vec!["app", "util"]);
        assert_eq!(names(&manifest, ContentType::Stylesheet), vec!["site"]);
        assert!(names(&manifest, ContentType::Markup).is_empty());
    }

    #[test]
    fn test_removed_module_still_looked_up() {
        let manifest = StaticManifest::from_yaml(MANIFEST_YAML).expect("manifest should parse");

        let legacy = manifest
            .module(ContentType::Script, "legacy")
            .expect("removed module should be present");
        assert!(legacy.removed);
        assert!(manifest.module(ContentType::Stylesheet, "legacy").is_none());
    }

    #[test]
    fn test_serialized_versions_parsed() {
        let manifest = StaticManifest::from_yaml(MANIFEST_YAML).expect("manifest should parse");

        let app = manifest
            .module(ContentType::Script, "app")
            .expect("app should be present");
        let old = app.serialized_version(v(1.0)).expect("1.0 should be recorded");
        assert_eq!(old.last_modified, 1_700_000_000);
        assert!(app.serialized_version(v(3.0)).is_none());
    }

    #[test]
    fn test_dependencies_first_order() {
        let yaml = r"
script:
  order: dependencies-first
  modules:
    - { name: app, version: 1, last_modified: 1, path: app.js, dependencies: [util] }
    - { name: dom, version: 1, last_modified: 1, path: dom.js }
    - { name: util, version: 1, last_modified: 1, path: util.js }
";
        let manifest = StaticManifest::from_yaml(yaml).expect("manifest should parse");

        assert_eq!(names(&manifest, ContentType::Script), vec!["util", "app", "dom"]);
    }

    #[test]
    fn test_dependencies_first_cycle_rejected() {
        let yaml = r"
script:
  order: dependencies-first
  modules:
    - { name: a, version: 1, last_modified: 1, path: a.js, dependencies: [b] }
    - { name: b, version: 1, last_modified: 1, path: b.js, dependencies: [a] }
";
        assert!(matches!(
            StaticManifest::from_yaml(yaml),
            Err(JamError::CircularDependency { .. })
        ));
    }

    #[test]
    fn test_duplicate_module_rejected() {
        let yaml = r"
script:
  modules:
    - { name: a, version: 1, last_modified: 1, path: a.js }
    - { name: a, version: 2, last_modified: 2, path: a.js }
";
        assert!(matches!(
            StaticManifest::from_yaml(yaml),
            Err(JamError::ManifestInvalid { .. })
        ));
    }

    #[test]
    fn test_non_positive_version_rejected() {
        let yaml = r"
script:
  modules:
    - { name: a, version: 0, last_modified: 1, path: a.js }
";
        assert!(StaticManifest::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        let result = StaticManifest::load(&temp.path().join("manifest.yaml"));
        assert!(matches!(result, Err(JamError::ManifestNotFound { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        let path = temp.path().join("manifest.yaml");
        std::fs::write(&path, MANIFEST_YAML).expect("write manifest");

        let manifest = StaticManifest::load(&path).expect("manifest should load");

        assert_eq!(names(&manifest, ContentType::Script), vec!["app", "util"]);
        assert!(manifest.module(ContentType::Script, "legacy").is_some());
    }
}
