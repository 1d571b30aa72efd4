//! Manifest errors

use super::JamError;

/// Creates a manifest not found error
pub fn not_found(path: impl Into<String>) -> JamError {
    JamError::ManifestNotFound { path: path.into() }
}

/// Creates a manifest parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> JamError {
    JamError::ManifestParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid manifest error
pub fn invalid(message: impl Into<String>) -> JamError {
    JamError::ManifestInvalid {
        message: message.into(),
    }
}

/// Creates a circular dependency error
pub fn circular(chain: impl Into<String>) -> JamError {
    JamError::CircularDependency {
        chain: chain.into(),
    }
}
