//! Resolved bundles and their identity
//!
//! A [`Bundle`] is the ordered, name-unique module list a request resolved
//! to. Everything else about it (checksum, URIs, timestamp, size and the
//! concatenated contents) is derived on first access and kept for the life
//! of the instance. Debug mode is the exception for timestamp and size:
//! those come from live file metadata and are re-read on every access.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use once_cell::unsync::OnceCell;
use serde::Serialize;
use tracing::debug;

use crate::domain::{ContentType, VERSION_PREFIX};
use crate::error::{JamError, Result, module_not_found};
use crate::manifest::ManifestEntry;
use crate::resolver::ordering::canonical_order;
use crate::resolver::{Jammer, ModuleRef};

/// Live timestamp and size of a bundle's sources, from one stat pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceStats {
    pub last_modified: Option<i64>,
    pub byte_size: u64,
}

#[derive(Debug, Default)]
struct Identity {
    checksum: OnceCell<String>,
    last_modified: OnceCell<Option<i64>>,
    uri: OnceCell<String>,
    unbundled_uris: OnceCell<Vec<String>>,
    byte_size: OnceCell<u64>,
    contents: OnceCell<String>,
}

/// A resolved bundle
pub struct Bundle<'m> {
    jammer: Jammer<'m>,
    content_type: Option<ContentType>,
    dependencies: Vec<ModuleRef>,
    identity: Identity,
}

impl fmt::Debug for Bundle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bundle")
            .field("content_type", &self.content_type)
            .field("dependencies", &self.dependency_names())
            .finish_non_exhaustive()
    }
}

/// Serializable snapshot of a bundle's identity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleSummary {
    pub content_type: Option<ContentType>,
    pub modules: Vec<String>,
    pub checksum: Option<String>,
    pub uri: Option<String>,
    pub unbundled_uris: Vec<String>,
    pub last_modified: Option<i64>,
    pub byte_size: u64,
}

impl<'m> Bundle<'m> {
    pub(crate) fn new(
        jammer: Jammer<'m>,
        content_type: Option<ContentType>,
        dependencies: Vec<ModuleRef>,
    ) -> Self {
        Self {
            jammer,
            content_type,
            dependencies,
            identity: Identity::default(),
        }
    }

    pub fn content_type(&self) -> Option<ContentType> {
        self.content_type
    }

    pub fn dependencies(&self) -> &[ModuleRef] {
        &self.dependencies
    }

    pub fn dependency_names(&self) -> Vec<&str> {
        self.dependencies.iter().map(ModuleRef::name).collect()
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    pub fn is_debug(&self) -> bool {
        self.jammer.environment().debug
    }

    fn entry(&self, name: &str) -> Option<&'m ManifestEntry> {
        let manifest = self.jammer.manifest();
        self.content_type
            .and_then(|content_type| manifest.module(content_type, name))
    }

    /// Checksum token of one module: `name` in debug mode, else `name+v{version}`
    ///
    /// An unpinned module takes the manifest's current version; a module
    /// with no version at all renders as its bare name.
    fn module_token(&self, module: &ModuleRef) -> String {
        if self.is_debug() {
            return module.name().to_string();
        }
        let version = module
            .version()
            .or_else(|| self.entry(module.name()).map(|entry| entry.version));
        match version {
            Some(version) => format!("{}{}{}", module.name(), VERSION_PREFIX, version),
            None => module.name().to_string(),
        }
    }

    /// Comma-joined module tokens in dependency order; `None` when empty
    pub fn checksum(&self) -> Option<&str> {
        if self.is_empty() {
            return None;
        }
        let checksum = self.identity.checksum.get_or_init(|| {
            let checksum = self
                .dependencies
                .iter()
                .map(|module| self.module_token(module))
                .collect::<Vec<_>>()
                .join(",");
            debug!(%checksum, "generated checksum");
            checksum
        });
        Some(checksum)
    }

    /// Newest manifest timestamp across the bundle's modules
    fn manifest_last_modified(&self) -> Option<i64> {
        *self.identity.last_modified.get_or_init(|| {
            let last_modified = self
                .dependencies
                .iter()
                .filter_map(|module| module.last_modified(self.entry(module.name())))
                .max();
            debug!(?last_modified, "generated last_modified");
            last_modified
        })
    }

    /// Cache-busting timestamp of the bundle
    ///
    /// Outside debug mode this is the newest manifest timestamp of the
    /// bundle's modules. In debug mode it is the newest live modification
    /// time of their sources, read afresh on every call.
    ///
    /// # Errors
    ///
    /// In debug mode, returns error if a source cannot be located or stat'ed.
    pub fn last_modified(&self) -> Result<Option<i64>> {
        if self.is_empty() {
            return Ok(None);
        }
        if self.is_debug() {
            return Ok(self.source_stats()?.last_modified);
        }
        Ok(self.manifest_last_modified())
    }

    /// Total size of the bundle's sources
    ///
    /// Manifest-recorded sizes outside debug mode, live file sizes (re-read
    /// on every call) in debug mode.
    ///
    /// # Errors
    ///
    /// In debug mode, returns error if a source cannot be located or stat'ed.
    pub fn byte_size(&self) -> Result<u64> {
        if self.is_empty() {
            return Ok(0);
        }
        if self.is_debug() {
            return Ok(self.source_stats()?.byte_size);
        }
        Ok(*self.identity.byte_size.get_or_init(|| {
            let byte_size: u64 = self
                .dependencies
                .iter()
                .filter_map(|module| self.entry(module.name()))
                .map(|entry| entry.byte_size)
                .sum();
            debug!(byte_size, "generated byte_size");
            byte_size
        }))
    }

    /// Stat every source once, yielding timestamp and size together
    ///
    /// # Errors
    ///
    /// Returns error if a module has no source path or its source cannot be
    /// stat'ed.
    pub fn source_stats(&self) -> Result<SourceStats> {
        let primer = self.jammer.primer();
        let mut stats = SourceStats::default();
        for module in &self.dependencies {
            let stat = primer.metadata(self.source_path(module)?)?;
            stats.last_modified = stats.last_modified.max(Some(stat.modified));
            stats.byte_size += stat.len;
        }
        Ok(stats)
    }

    fn source_path<'a>(&self, module: &'a ModuleRef) -> Result<&'a Path> {
        module
            .source_path(self.entry(module.name()))
            .ok_or_else(|| module_not_found(module.name()))
    }

    fn uri_for(&self, checksum: &str, last_modified: Option<i64>) -> Option<String> {
        let extension = self.content_type?.file_extension();
        let root = self.jammer.environment().root_uri.trim_end_matches('/');
        Some(match last_modified {
            Some(last_modified) if !self.is_debug() => {
                format!("{root}/{last_modified}/{checksum}{extension}")
            }
            _ => format!("{root}/{checksum}{extension}"),
        })
    }

    /// Canonical URI of the whole bundle; `None` when empty
    ///
    /// `{root}/{last_modified}/{checksum}{ext}`, without the timestamp
    /// segment in debug mode.
    pub fn uri(&self) -> Option<&str> {
        let checksum = self.checksum()?;
        if let Some(uri) = self.identity.uri.get() {
            return Some(uri);
        }
        let uri = self.uri_for(checksum, self.manifest_last_modified())?;
        debug!(%uri, "generated uri");
        Some(self.identity.uri.get_or_init(|| uri))
    }

    /// One URI per module, each carrying the bundle's timestamp
    pub fn unbundled_uris(&self) -> &[String] {
        self.identity.unbundled_uris.get_or_init(|| {
            let last_modified = self.manifest_last_modified();
            self.dependencies
                .iter()
                .filter_map(|module| self.uri_for(&self.module_token(module), last_modified))
                .collect()
        })
    }

    /// Primed sources of all modules, concatenated in dependency order
    ///
    /// # Errors
    ///
    /// Returns error if a module has no source path or its source cannot be
    /// read.
    pub fn contents(&self) -> Result<&str> {
        let contents = self.identity.contents.get_or_try_init(|| {
            let primer = self.jammer.primer();
            let mut contents = String::new();
            for module in &self.dependencies {
                contents.push_str(&primer.read_primed(self.source_path(module)?)?);
            }
            debug!(bytes = contents.len(), "generated contents");
            Ok::<_, JamError>(contents)
        })?;
        Ok(contents.as_str())
    }

    /// Drop modules already delivered to the client
    ///
    /// The remaining modules are put back into canonical order and all
    /// derived identity is recomputed on next access. Returns `loaded` plus
    /// the names this bundle still delivers.
    pub fn filter_loaded(&mut self, loaded: &HashSet<String>) -> HashSet<String> {
        let remaining: Vec<ModuleRef> = std::mem::take(&mut self.dependencies)
            .into_iter()
            .filter(|module| !loaded.contains(module.name()))
            .collect();
        self.dependencies = match self.content_type {
            Some(content_type) => {
                let sorted = self.jammer.manifest().sorted_dependencies(content_type);
                canonical_order(&sorted, remaining).0
            }
            None => Vec::new(),
        };
        self.identity = Identity::default();

        let mut delivered = loaded.clone();
        delivered.extend(self.dependencies.iter().map(|module| module.name().to_string()));
        delivered
    }

    /// Snapshot of every identity property
    ///
    /// # Errors
    ///
    /// In debug mode, returns error if a source cannot be stat'ed.
    pub fn summary(&self) -> Result<BundleSummary> {
        let (last_modified, byte_size) = if self.is_debug() && !self.is_empty() {
            let stats = self.source_stats()?;
            (stats.last_modified, stats.byte_size)
        } else {
            (self.last_modified()?, self.byte_size()?)
        };
        Ok(BundleSummary {
            content_type: self.content_type,
            modules: self
                .dependency_names()
                .into_iter()
                .map(ToString::to_string)
                .collect(),
            checksum: self.checksum().map(ToString::to_string),
            uri: self.uri().map(ToString::to_string),
            unbundled_uris: self.unbundled_uris().to_vec(),
            last_modified,
            byte_size,
        })
    }
}
