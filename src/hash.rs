//! BLAKE3 hashing utilities for bundle validators

use blake3::Hasher;

/// Hash prefix for BLAKE3 content digests
pub const HASH_PREFIX: &str = "blake3:";

/// Entity tag of a bundle at a point in time
///
/// The tag is the hex BLAKE3 digest of `{checksum}-{last_modified}`, so it
/// changes whenever the bundle identity or its timestamp does.
pub fn etag(checksum: &str, last_modified: i64) -> String {
    let mut hasher = Hasher::new();
    hasher.update(checksum.as_bytes());
    hasher.update(b"-");
    hasher.update(last_modified.to_string().as_bytes());
    hasher.finalize().to_hex().to_string()
}

/// Prefixed digest of bundle contents
pub fn hash_contents(contents: &[u8]) -> String {
    format!("{}{}", HASH_PREFIX, blake3::hash(contents).to_hex())
}
