//! Bundle-related errors

use super::JamError;

/// Creates an unknown content type error
pub fn unknown_content_type(input: impl Into<String>) -> JamError {
    JamError::UnknownContentType {
        input: input.into(),
    }
}

/// Creates a module not found error
pub fn module_not_found(name: impl Into<String>) -> JamError {
    JamError::ModuleNotFound { name: name.into() }
}

/// Creates an invalid version error
pub fn invalid_version(input: impl Into<String>) -> JamError {
    JamError::InvalidVersion {
        input: input.into(),
    }
}

/// Creates a compression failed error
pub fn compression_failed(reason: impl Into<String>) -> JamError {
    JamError::CompressionFailed {
        reason: reason.into(),
    }
}
