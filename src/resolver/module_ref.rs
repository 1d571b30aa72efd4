//! Module references
//!
//! A [`ModuleRef`] is one requested module: a name and an optional pinned
//! version. It resolves itself lazily against its manifest entry the first
//! time any manifest-derived property is asked for, and never again.

use std::path::{Path, PathBuf};

use once_cell::unsync::OnceCell;
use tracing::warn;

use crate::domain::{VERSION_PREFIX, Version};
use crate::manifest::ManifestEntry;

/// Manifest-derived state of a module reference
#[derive(Debug, Clone, PartialEq)]
struct Resolution {
    last_modified: i64,
    version_mismatch: bool,
    source_path: PathBuf,
}

impl Resolution {
    /// Resolve against `entry`, honoring a pinned historical version
    fn from_entry(entry: &ManifestEntry, version: Option<Version>) -> Self {
        let pinned = version.and_then(|v| entry.serialized_version(v));
        let last_modified = pinned.map_or(entry.last_modified, |s| s.last_modified);
        let source_path = pinned
            .and_then(|s| s.path.clone())
            .unwrap_or_else(|| entry.path.clone());

        Self {
            last_modified,
            version_mismatch: entry.removed || entry.last_modified != last_modified,
            source_path,
        }
    }
}

/// A requested module
#[derive(Debug, Clone)]
pub struct ModuleRef {
    name: String,
    version: Option<Version>,
    resolution: OnceCell<Resolution>,
}

impl ModuleRef {
    pub fn new(name: &str, version: Option<Version>) -> Self {
        Self {
            name: name.trim().to_string(),
            version,
            resolution: OnceCell::new(),
        }
    }

    /// Parse a request token such as `app` or `app+v2.0`
    ///
    /// An empty version suffix leaves the token untouched; an unparsable one
    /// is dropped with a warning so the module resolves at its current
    /// version.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        match token.split_once(VERSION_PREFIX) {
            Some((name, version)) if !version.is_empty() => match version.parse::<Version>() {
                Ok(version) => Self::new(name, Some(version)),
                Err(_) => {
                    warn!(token, "ignoring unparsable module version");
                    Self::new(name, None)
                }
            },
            _ => Self::new(token, None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pinned version, if any
    pub fn version(&self) -> Option<Version> {
        self.version
    }

    pub(crate) fn set_version(&mut self, version: Version) {
        self.version = Some(version);
    }

    fn resolve(&self, entry: Option<&ManifestEntry>) -> Option<&Resolution> {
        if let Some(resolution) = self.resolution.get() {
            return Some(resolution);
        }
        let entry = entry?;
        Some(
            self.resolution
                .get_or_init(|| Resolution::from_entry(entry, self.version)),
        )
    }

    /// Whether the module was removed or its pinned version is stale
    ///
    /// A module without a manifest entry never mismatches.
    pub fn has_version_mismatch(&self, entry: Option<&ManifestEntry>) -> bool {
        self.resolve(entry).is_some_and(|r| r.version_mismatch)
    }

    /// Last-modified time of the pinned (or current) version
    pub fn last_modified(&self, entry: Option<&ManifestEntry>) -> Option<i64> {
        self.resolve(entry).map(|r| r.last_modified)
    }

    /// Source path of the pinned (or current) version
    pub fn source_path(&self, entry: Option<&ManifestEntry>) -> Option<&Path> {
        self.resolve(entry).map(|r| r.source_path.as_path())
    }
}
