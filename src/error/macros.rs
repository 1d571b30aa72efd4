//! Error context macros for consistent error messages
//!
//! This module provides macros to help construct error messages
//! with consistent formatting and context across the codebase.

/// Macro for adding path context to source file operations
///
/// A missing file maps to `FileNotFound`; any other failure keeps the
/// underlying reason.
///
/// # Example
/// ```rust,ignore
/// let text = std::fs::read_to_string(&path)
///     .map_err(|e| file_error_context!(path.display(), e))?;
/// ```
#[macro_export]
macro_rules! file_error_context {
    ($path:expr, $err:expr) => {{
        let err: &std::io::Error = &$err;
        if err.kind() == std::io::ErrorKind::NotFound {
            $crate::error::JamError::FileNotFound {
                path: $path.to_string(),
            }
        } else {
            $crate::error::JamError::FileReadFailed {
                path: $path.to_string(),
                reason: err.to_string(),
            }
        }
    }};
}
