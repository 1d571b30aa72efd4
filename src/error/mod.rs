//! Error types and handling for Jammer
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`bundle`]: Bundle resolution errors
//! - [`manifest`]: Manifest loading errors
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors

pub mod bundle;
pub mod config;
pub mod fs;
pub mod manifest;

mod macros;


pub use bundle::{compression_failed, invalid_version, module_not_found, unknown_content_type};
pub use config::{
    not_found as config_not_found, parse_failed as config_parse_failed,
    read_failed as config_read_failed,
};
pub use fs::{io_error, not_found as file_not_found, read_failed as file_read_failed};
pub use manifest::{
    circular as circular_dependency, invalid as manifest_invalid,
    not_found as manifest_not_found, parse_failed as manifest_parse_failed,
};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Jammer operations
#[derive(Error, Diagnostic, Debug)]
pub enum JamError {
    // Bundle errors
    #[error("Unknown content type: {input}")]
    #[diagnostic(
        code(jammer::bundle::unknown_content_type),
        help("Supported types: script (js), stylesheet (css), markup (html)")
    )]
    UnknownContentType { input: String },

    #[error("Module '{name}' not found in manifest")]
    #[diagnostic(
        code(jammer::bundle::module_not_found),
        help("The module was requested but has no manifest entry to read its source from")
    )]
    ModuleNotFound { name: String },

    #[error("Invalid module version: {input}")]
    #[diagnostic(
        code(jammer::bundle::invalid_version),
        help("Versions are positive numbers, e.g. name+v1.0")
    )]
    InvalidVersion { input: String },

    #[error("Invalid request pattern '{pattern}': {reason}")]
    #[diagnostic(code(jammer::bundle::invalid_pattern))]
    InvalidPattern { pattern: String, reason: String },

    #[error("Failed to compress response body: {reason}")]
    #[diagnostic(code(jammer::delivery::compression_failed))]
    CompressionFailed { reason: String },

    // Manifest errors
    #[error("Manifest not found: {path}")]
    #[diagnostic(
        code(jammer::manifest::not_found),
        help("Point `manifest` in jammer.yaml (or --manifest) at an existing manifest file")
    )]
    ManifestNotFound { path: String },

    #[error("Failed to parse manifest: {path}: {reason}")]
    #[diagnostic(code(jammer::manifest::parse_failed))]
    ManifestParseFailed { path: String, reason: String },

    #[error("Invalid manifest: {message}")]
    #[diagnostic(code(jammer::manifest::invalid))]
    ManifestInvalid { message: String },

    #[error("Circular dependency detected: {chain}")]
    #[diagnostic(
        code(jammer::manifest::circular),
        help("Remove the circular dependency from the manifest or use declared order")
    )]
    CircularDependency { chain: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(jammer::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(jammer::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(jammer::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(jammer::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}")]
    #[diagnostic(code(jammer::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(jammer::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for JamError {
    fn from(err: std::io::Error) -> Self {
        JamError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for JamError {
    fn from(err: serde_yaml::Error) -> Self {
        JamError::ManifestParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for JamError {
    fn from(err: serde_json::Error) -> Self {
        JamError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<regex::Error> for JamError {
    fn from(err: regex::Error) -> Self {
        JamError::InvalidPattern {
            pattern: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, JamError>;
