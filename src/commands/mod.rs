//! Command implementations for Jammer CLI

pub mod completions;
pub mod contents;
pub mod headers;
pub mod resolve;
pub mod session;
pub mod version;

use std::path::Path;

use tracing::debug;

use crate::cli::TargetArgs;
use crate::config::{ConfigOverrides, Environment, JamConfig};
use crate::domain::ContentType;
use crate::error::{Result, io_error};
use crate::manifest::StaticManifest;
use crate::primer::FsPrimer;
use crate::resolver::{BundleRequest, Jammer};

/// Everything a command needs to resolve bundles
#[derive(Debug)]
pub struct Context {
    pub config: JamConfig,
    pub manifest: StaticManifest,
    pub primer: FsPrimer,
    pub env: Environment,
}

impl Context {
    /// Load config, manifest and sources for the current directory
    pub fn from_current_dir(config_path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let current_dir = std::env::current_dir()
            .map_err(|e| io_error(format!("Failed to get current directory: {e}")))?;
        Self::load(config_path, &current_dir, overrides)
    }

    pub fn load(
        config_path: Option<&Path>,
        current_dir: &Path,
        overrides: ConfigOverrides,
    ) -> Result<Self> {
        let config = JamConfig::load(config_path, current_dir)?.with_overrides(overrides);
        debug!(
            manifest = %config.manifest.display(),
            source_root = %config.source_root.display(),
            debug = config.debug,
            "loaded configuration"
        );

        let manifest = StaticManifest::load(&config.manifest)?;
        let primer = FsPrimer::new(&config.source_root);
        let env = config.environment();
        Ok(Self {
            config,
            manifest,
            primer,
            env,
        })
    }

    pub fn jammer(&self) -> Jammer<'_> {
        Jammer::new(&self.manifest, &self.primer, &self.env)
    }
}

impl TargetArgs {
    /// Translate command-line target arguments into a bundle request
    ///
    /// An explicit `--type` that does not name a content type is an error.
    pub fn to_request(&self) -> Result<BundleRequest> {
        let content_type = self
            .content_type
            .as_deref()
            .map(str::parse::<ContentType>)
            .transpose()?;
        Ok(BundleRequest {
            content_type,
            dependencies: self.deps.clone(),
            request_path: self.path.clone(),
            require_transitive: self.transitive,
        })
    }
}
