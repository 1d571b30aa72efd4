//! Configuration file handling for Jammer
//!
//! `jammer.yaml` names the manifest and the source directory, and carries the
//! runtime [`Environment`] that bundle identity depends on:
//!
//! ```yaml
//! manifest: manifest.yaml
//! source_root: static
//! root_uri: /jam
//! debug: false
//! network_request_threshold: 1024
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, config_not_found, config_parse_failed, config_read_failed};

/// Config filename
pub const CONFIG_FILE: &str = "jammer.yaml";

const DEFAULT_ROOT_URI: &str = "/jam";
const DEFAULT_NETWORK_REQUEST_THRESHOLD: usize = 1024;

/// Runtime settings bundle identity and delivery depend on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Serve live, per-module, uncached output
    pub debug: bool,
    /// Prefix of every bundle URI
    pub root_uri: String,
    /// Responses at or below this many bytes are not compressed
    pub network_request_threshold: usize,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            debug: false,
            root_uri: DEFAULT_ROOT_URI.to_string(),
            network_request_threshold: DEFAULT_NETWORK_REQUEST_THRESHOLD,
        }
    }
}

/// Contents of `jammer.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JamConfig {
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,

    #[serde(default = "default_root_uri")]
    pub root_uri: String,

    #[serde(default)]
    pub debug: bool,

    #[serde(default = "default_network_request_threshold")]
    pub network_request_threshold: usize,
}

fn default_manifest() -> PathBuf {
    PathBuf::from("manifest.yaml")
}

fn default_source_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_root_uri() -> String {
    DEFAULT_ROOT_URI.to_string()
}

fn default_network_request_threshold() -> usize {
    DEFAULT_NETWORK_REQUEST_THRESHOLD
}

impl Default for JamConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            source_root: default_source_root(),
            root_uri: default_root_uri(),
            debug: false,
            network_request_threshold: default_network_request_threshold(),
        }
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub manifest: Option<PathBuf>,
    pub source_root: Option<PathBuf>,
    pub root_uri: Option<String>,
    pub debug: bool,
}

impl JamConfig {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| config_parse_failed("<inline>", e.to_string()))
    }

    /// Load configuration
    ///
    /// An explicit path must exist. Otherwise `./jammer.yaml` is tried, then
    /// the user config directory, and finally built-in defaults rooted at the
    /// current directory.
    pub fn load(explicit: Option<&Path>, current_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                current_dir.join(path)
            };
            if !path.is_file() {
                return Err(config_not_found(path.display().to_string()));
            }
            return Self::load_file(&path);
        }

        let candidates = [
            Some(current_dir.join(CONFIG_FILE)),
            dirs::config_dir().map(|dir| dir.join("jammer").join(CONFIG_FILE)),
        ];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                return Self::load_file(&path);
            }
        }

        Ok(Self::default().rooted_at(current_dir))
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_read_failed(path.display().to_string(), e.to_string()))?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| config_parse_failed(path.display().to_string(), e.to_string()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(config.rooted_at(base))
    }

    /// Resolve relative paths against `base`
    #[must_use]
    pub fn rooted_at(mut self, base: &Path) -> Self {
        if self.manifest.is_relative() {
            self.manifest = base.join(&self.manifest);
        }
        if self.source_root.is_relative() {
            self.source_root = base.join(&self.source_root);
        }
        self
    }

    /// Apply command-line overrides
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(manifest) = overrides.manifest {
            self.manifest = manifest;
        }
        if let Some(source_root) = overrides.source_root {
            self.source_root = source_root;
        }
        if let Some(root_uri) = overrides.root_uri {
            self.root_uri = root_uri;
        }
        self.debug |= overrides.debug;
        self
    }

    pub fn environment(&self) -> Environment {
        Environment {
            debug: self.debug,
            root_uri: self.root_uri.clone(),
            network_request_threshold: self.network_request_threshold,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::JamError;

    #[test]
    fn test_defaults() {
        let config = JamConfig::from_yaml("{}").expect("empty config should parse");
        assert_eq!(config, JamConfig::default());
        assert_eq!(config.environment(), Environment::default());
        assert_eq!(config.root_uri, "/jam");
        assert_eq!(config.network_request_threshold, 1024);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = JamConfig::from_yaml("compile_mode: true");
        assert!(matches!(result, Err(JamError::ConfigParseFailed { .. })));
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        std::fs::write(
            temp.path().join(CONFIG_FILE),
            "manifest: build/manifest.yaml\nsource_root: static\ndebug: true\n",
        )
        .expect("write config");

        let config = JamConfig::load(None, temp.path()).expect("config should load");

        assert_eq!(config.manifest, temp.path().join("build/manifest.yaml"));
        assert_eq!(config.source_root, temp.path().join("static"));
        assert!(config.environment().debug);
    }

    #[test]
    fn test_load_explicit_missing() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        let result = JamConfig::load(Some(Path::new("nope.yaml")), temp.path());
        assert!(matches!(result, Err(JamError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_explicit_invalid_yaml() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        let path = temp.path().join("custom.yaml");
        std::fs::write(&path, "debug: [unclosed").expect("write config");

        let result = JamConfig::load(Some(&path), temp.path());

        assert!(matches!(result, Err(JamError::ConfigParseFailed { .. })));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = JamConfig::default().with_overrides(ConfigOverrides {
            manifest: Some(PathBuf::from("/srv/manifest.yaml")),
            source_root: None,
            root_uri: Some("https://cdn.example.com/jam".to_string()),
            debug: true,
        });

        assert_eq!(config.manifest, PathBuf::from("/srv/manifest.yaml"));
        assert_eq!(config.source_root, PathBuf::from("."));
        let env = config.environment();
        assert_eq!(env.root_uri, "https://cdn.example.com/jam");
        assert!(env.debug);
    }
}
