//! The module manifest
//!
//! The manifest is the authority on which modules exist for a content type,
//! their canonical order, current versions and historical versions. Jammer
//! only ever reads it: the [`Manifest`] trait is the seam the resolver
//! consumes, and [`StaticManifest`] is an in-memory implementation that can
//! be loaded from YAML.
//!
//! ## Manifest file
//!
//! ```yaml
//! script:
//!   order: dependencies-first   # or `declared` (default)
//!   modules:
//!     - name: app
//!       version: 2.0
//!       last_modified: 1700000500
//!       path: js/app.js
//!       byte_size: 512
//!       dependencies: [util]
//!       serialized_versions:
//!         - version: 1.0
//!           last_modified: 1700000000
//!     - name: util
//!       version: 1.0
//!       last_modified: 1690000000
//!       path: js/util.js
//! ```

pub mod file;
pub mod graph;
pub mod sort;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{ContentType, Version};

pub use file::{ManifestOrder, StaticManifest};

/// Read access to the module manifest
pub trait Manifest {
    /// Live modules of a content type in canonical order
    ///
    /// Removed modules are not part of the canonical order.
    fn sorted_dependencies(&self, content_type: ContentType) -> Vec<SortedDependency<'_>>;

    /// Look up a module by name, including removed modules
    fn module(&self, content_type: ContentType, name: &str) -> Option<&ManifestEntry>;
}

/// One row of the canonical dependency list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortedDependency<'a> {
    pub name: &'a str,
    pub path: &'a Path,
    pub version: Version,
}

/// A historical version of a module, as recorded when it was superseded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedVersion {
    pub version: Version,
    pub last_modified: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Manifest metadata for a single module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub name: String,
    pub version: Version,
    /// Unix timestamp (seconds) of the current version
    pub last_modified: i64,
    pub path: PathBuf,
    #[serde(default)]
    pub removed: bool,
    /// Direct dependencies, by name
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub byte_size: u64,
    #[serde(default)]
    pub serialized_versions: Vec<SerializedVersion>,
}

impl ManifestEntry {
    pub fn new(
        name: impl Into<String>,
        version: Version,
        last_modified: i64,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            version,
            last_modified,
            path: path.into(),
            removed: false,
            dependencies: Vec::new(),
            byte_size: 0,
            serialized_versions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_byte_size(mut self, byte_size: u64) -> Self {
        self.byte_size = byte_size;
        self
    }

    #[must_use]
    pub fn with_serialized_version(mut self, version: Version, last_modified: i64) -> Self {
        self.serialized_versions.push(SerializedVersion {
            version,
            last_modified,
            path: None,
        });
        self
    }

    #[must_use]
    pub fn removed(mut self) -> Self {
        self.removed = true;
        self
    }

    /// The recorded historical version matching `version`, if any
    pub fn serialized_version(&self, version: Version) -> Option<&SerializedVersion> {
        self.serialized_versions
            .iter()
            .find(|serialized| serialized.version == version)
    }

    pub fn as_sorted(&self) -> SortedDependency<'_> {
        SortedDependency {
            name: &self.name,
            path: &self.path,
            version: self.version,
        }
    }
}
