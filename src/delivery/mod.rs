//! HTTP delivery helpers
//!
//! Caching headers and response compression for served bundles. Headers are
//! returned as name/value pairs for whatever HTTP layer sits on top.

pub mod compress;
pub mod headers;

use crate::config::Environment;

pub use compress::{CompressedBody, Encoding, compress_body};
pub use headers::{CachePolicy, cache_headers};

/// A response header
pub type Header = (&'static str, String);

/// Whether a response is too small to be worth compressing
pub fn skip_network(env: &Environment, byte_count: usize) -> bool {
    byte_count <= env.network_request_threshold
}
