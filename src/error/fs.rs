//! File system errors

use super::JamError;

/// Creates a file not found error
pub fn not_found(path: impl Into<String>) -> JamError {
    JamError::FileNotFound { path: path.into() }
}

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> JamError {
    JamError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> JamError {
    JamError::IoError {
        message: message.into(),
    }
}
