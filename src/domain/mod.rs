//! Domain models for Jammer
//!
//! This module contains pure domain objects shared by the manifest, the
//! resolver and the delivery helpers. They carry no I/O.

pub mod content_type;
pub mod version;

pub use content_type::{Classification, ContentType, classify, ensure_file_extension};
pub use version::{VERSION_PREFIX, Version};
