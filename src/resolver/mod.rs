//! Bundle resolution
//!
//! This module handles:
//! - Parsing dependency tokens out of bundle request paths
//! - Expanding `.*` wildcard groups against the manifest
//! - Exact, backward-compatible resolution of bundle URIs
//! - One-hop transitive resolution of explicit load requests
//! - Filtering modules a page has already loaded

pub mod module_ref;
pub mod ordering;
pub mod request_path;
pub mod wildcard;

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::bundle::Bundle;
use crate::config::Environment;
use crate::domain::{ContentType, ensure_file_extension};
use crate::error::Result;
use crate::manifest::{Manifest, SortedDependency};
use crate::primer::Primer;

pub use module_ref::ModuleRef;
pub use request_path::RequestPathParser;

use ordering::{canonical_order, unique_by_name};
use wildcard::expand_wildcards;

/// A request for a bundle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleRequest {
    /// Content type; derived from the request path when absent
    pub content_type: Option<ContentType>,
    /// Comma-separated module tokens; takes precedence over the request path
    pub dependencies: Option<String>,
    /// Bundle URI path the request came in on
    pub request_path: Option<String>,
    /// Pull in direct manifest dependencies of every requested module
    pub require_transitive: bool,
}

impl BundleRequest {
    pub fn for_dependencies(content_type: ContentType, dependencies: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type),
            dependencies: Some(dependencies.into()),
            ..Self::default()
        }
    }

    pub fn for_path(request_path: impl Into<String>) -> Self {
        Self {
            request_path: Some(request_path.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn transitive(mut self) -> Self {
        self.require_transitive = true;
        self
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }
}

/// Dependency payload handed to [`Jammer::resolve_unloaded`]
///
/// Callers decoding loosely typed input (JSON request bodies, template
/// arguments) may end up with something other than a comma list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DependencyInput {
    List(String),
    Other(serde_json::Value),
}

impl From<&str> for DependencyInput {
    fn from(list: &str) -> Self {
        DependencyInput::List(list.to_string())
    }
}

impl From<String> for DependencyInput {
    fn from(list: String) -> Self {
        DependencyInput::List(list)
    }
}

/// The bundle resolver
///
/// Holds the collaborators every resolved [`Bundle`] reads from. Cheap to
/// copy; one resolver can serve any number of requests.
#[derive(Clone, Copy)]
pub struct Jammer<'m> {
    manifest: &'m dyn Manifest,
    primer: &'m dyn Primer,
    env: &'m Environment,
}

impl fmt::Debug for Jammer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Jammer").field("env", self.env).finish_non_exhaustive()
    }
}

impl<'m> Jammer<'m> {
    pub fn new(manifest: &'m dyn Manifest, primer: &'m dyn Primer, env: &'m Environment) -> Self {
        Self {
            manifest,
            primer,
            env,
        }
    }

    pub fn manifest(&self) -> &'m dyn Manifest {
        self.manifest
    }

    pub fn primer(&self) -> &'m dyn Primer {
        self.primer
    }

    pub fn environment(&self) -> &'m Environment {
        self.env
    }

    /// Resolve a request into a bundle
    ///
    /// A request without a recognizable content type, or without any
    /// dependency tokens, yields an empty bundle rather than an error.
    ///
    /// # Errors
    ///
    /// Returns error only if the request path pattern cannot be built.
    pub fn resolve(&self, request: &BundleRequest) -> Result<Bundle<'m>> {
        let request_path = request.request_path.as_deref();
        let Some(content_type) = request
            .content_type
            .or_else(|| request_path.and_then(ContentType::from_path))
        else {
            warn!(
                request_path = request_path.unwrap_or_default(),
                "no content type for bundle request"
            );
            return Ok(Bundle::new(*self, None, Vec::new()));
        };

        let dependencies = match request.dependencies.as_deref() {
            Some(list) if !list.trim().is_empty() => list,
            _ => match request_path {
                Some(path) => RequestPathParser::new(content_type)?.dependencies(path),
                None => "",
            },
        };
        if dependencies.trim().is_empty() {
            debug!(%content_type, "no dependencies requested");
            return Ok(Bundle::new(*self, Some(content_type), Vec::new()));
        }

        let sorted = self.manifest.sorted_dependencies(content_type);
        let names = expand_wildcards(dependencies.split(','), &sorted);
        let modules = if request.require_transitive {
            self.resolve_transitive(content_type, &sorted, &names)
        } else {
            self.resolve_exact(content_type, &sorted, &names, request_path.is_some())
        };

        debug!(
            %content_type,
            requested = names.len(),
            resolved = modules.len(),
            transitive = request.require_transitive,
            "resolved bundle"
        );
        Ok(Bundle::new(*self, Some(content_type), modules))
    }

    /// Exact resolution of the requested names
    ///
    /// A URI naming a removed or superseded module version is served in the
    /// order it was requested, so links handed out before a manifest change
    /// keep resolving to the bundle they named.
    fn resolve_exact(
        &self,
        content_type: ContentType,
        sorted: &[SortedDependency<'_>],
        names: &[String],
        from_uri: bool,
    ) -> Vec<ModuleRef> {
        let requested = unique_by_name(names.iter().map(|name| ModuleRef::parse(name)));

        if from_uri && content_type.keeps_requested_order_on_mismatch() {
            let mismatch = requested
                .iter()
                .find(|module| {
                    module.has_version_mismatch(self.manifest.module(content_type, module.name()))
                })
                .map(|module| module.name().to_string());
            if let Some(name) = mismatch {
                debug!(module = %name, "version mismatch, keeping requested order");
                return requested;
            }
        }

        let (mut ordered, leftovers) = canonical_order(sorted, requested);
        if !leftovers.is_empty() {
            debug!(count = leftovers.len(), "back-filling modules missing from manifest");
            ordered.extend(leftovers);
        }
        ordered
    }

    /// Requested names plus their direct dependencies, in canonical order
    ///
    /// Names unknown to the manifest are dropped. Dependencies of pulled-in
    /// modules are not followed.
    fn resolve_transitive(
        &self,
        content_type: ContentType,
        sorted: &[SortedDependency<'_>],
        names: &[String],
    ) -> Vec<ModuleRef> {
        let (requested, unknown): (Vec<ModuleRef>, Vec<ModuleRef>) =
            unique_by_name(names.iter().map(|name| ModuleRef::parse(name)))
                .into_iter()
                .partition(|module| self.manifest.module(content_type, module.name()).is_some());
        if !unknown.is_empty() {
            debug!(count = unknown.len(), "dropping modules unknown to manifest");
        }

        let pulled: Vec<ModuleRef> = requested
            .iter()
            .filter_map(|module| self.manifest.module(content_type, module.name()))
            .flat_map(|entry| entry.dependencies.iter())
            .map(|name| ModuleRef::parse(name))
            .collect();

        let (ordered, _) = canonical_order(sorted, unique_by_name(requested.into_iter().chain(pulled)));
        ordered
    }

    /// Resolve the modules of a load request a page does not have yet
    ///
    /// Tokens already in `loaded` are skipped before resolution, the bundle
    /// is resolved transitively and then filtered against `loaded`, which is
    /// updated with everything the returned bundle delivers.
    ///
    /// # Errors
    ///
    /// Returns error only if bundle resolution fails.
    pub fn resolve_unloaded(
        &self,
        extension: &str,
        dependencies: &DependencyInput,
        loaded: &mut HashSet<String>,
    ) -> Result<Bundle<'m>> {
        let extension = ensure_file_extension(extension);
        let dependencies = match dependencies {
            DependencyInput::List(list) => list.as_str(),
            DependencyInput::Other(value) => {
                warn!(
                    %extension,
                    dependencies = %value,
                    loaded = loaded.len(),
                    "ignoring non-string dependencies"
                );
                ""
            }
        };

        let remaining = dependencies
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty() && !loaded.contains(*token))
            .collect::<Vec<_>>()
            .join(",");
        let request = BundleRequest {
            content_type: ContentType::from_extension(&extension),
            dependencies: Some(remaining),
            request_path: None,
            require_transitive: true,
        };

        let mut bundle = self.resolve(&request)?;
        *loaded = bundle.filter_loaded(loaded);
        Ok(bundle)
    }
}
