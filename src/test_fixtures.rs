//! Shared fixtures for unit tests
//!
//! Small manifests and on-disk source trees used across the resolver and
//! bundle tests.

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};

use tempfile::TempDir;

use crate::domain::{ContentType, Version};
use crate::manifest::{ManifestEntry, ManifestOrder, SortedDependency, StaticManifest};

/// Shorthand for a known-valid version
pub fn v(value: f64) -> Version {
    Version::new(value).expect("test versions are positive")
}

/// Canonical rows with the given names, all at version 1.0
pub fn sorted_names(names: &[&'static str]) -> Vec<SortedDependency<'static>> {
    names
        .iter()
        .map(|&name| SortedDependency {
            name,
            path: Path::new(name),
            version: v(1.0),
        })
        .collect()
}

/// Script manifest: canonical `[a, b, c]`, `a` depends on `b`, `c` depends on `a`
///
/// `b` has a 1.0 release recorded before its current 2.0.
pub fn abc_entries() -> Vec<ManifestEntry> {
    vec![
        ManifestEntry::new("a", v(1.0), 1_700_000_100, "js/a.js")
            .with_dependencies(["b"])
            .with_byte_size(10),
        ManifestEntry::new("b", v(2.0), 1_700_000_300, "js/b.js")
            .with_byte_size(20)
            .with_serialized_version(v(1.0), 1_600_000_000),
        ManifestEntry::new("c", v(1.5), 1_700_000_200, "js/c.js")
            .with_dependencies(["a"])
            .with_byte_size(30),
    ]
}

pub fn abc_manifest() -> StaticManifest {
    StaticManifest::new()
        .with_section(ContentType::Script, abc_entries(), ManifestOrder::Declared)
        .expect("fixture manifest is valid")
}

/// Script manifest holding the `x` group plus an unrelated `y`
pub fn group_manifest() -> StaticManifest {
    let entries = vec![
        ManifestEntry::new("x", v(1.0), 100, "js/x.js"),
        ManifestEntry::new("x.foo", v(1.0), 200, "js/x/foo.js"),
        ManifestEntry::new("x.bar", v(3.0), 300, "js/x/bar.js"),
        ManifestEntry::new("y", v(1.0), 400, "js/y.js"),
    ];
    StaticManifest::new()
        .with_section(ContentType::Script, entries, ManifestOrder::Declared)
        .expect("fixture manifest is valid")
}

/// A temp directory of module sources
pub struct SourceTree {
    pub dir: TempDir,
}

impl SourceTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Sources for [`abc_manifest`]
    pub fn abc() -> Self {
        Self::new()
            .with_file("js/a.js", "var a;\n")
            .with_file("js/b.js", "var b;\n")
            .with_file("js/c.js", "var c;\n")
    }

    pub fn with_file(self, relative: &str, content: &str) -> Self {
        self.write(relative, content);
        self
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create source directory");
        }
        std::fs::write(&path, content).expect("Failed to write source");
        path
    }

    /// Set the modification time of a source, in unix seconds
    pub fn touch(&self, relative: &str, modified: u64) {
        let mtime = UNIX_EPOCH + Duration::from_secs(modified);
        std::fs::File::options()
            .write(true)
            .open(self.dir.path().join(relative))
            .and_then(|file| file.set_modified(mtime))
            .expect("Failed to set modification time");
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}
