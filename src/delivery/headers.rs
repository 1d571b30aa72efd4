//! Caching headers
//!
//! Bundle URIs embed their identity, so responses are cacheable for ten
//! years. Browser headers carry validators and an absolute expiry, proxy
//! headers a relative max-age.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::Header;
use crate::config::Environment;
use crate::domain::classify;
use crate::hash;

const GMT_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";
const EXPIRES_AFTER_WEEKS: i64 = 52 * 10;
const EXPIRES_DEFAULT: &str = "access plus 10 years";

/// Which caches the headers address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicy {
    Browser,
    Proxy,
    #[default]
    Both,
}

impl CachePolicy {
    fn browser(self) -> bool {
        matches!(self, CachePolicy::Browser | CachePolicy::Both)
    }

    fn proxy(self) -> bool {
        matches!(self, CachePolicy::Proxy | CachePolicy::Both)
    }
}

fn http_date(time: DateTime<Utc>) -> String {
    time.format(GMT_FORMAT).to_string()
}

/// Caching headers for a response served at `path`
///
/// Nothing is emitted in debug mode, nor for a path that does not classify
/// unless `force` is set. `checksum` defaults to the path and
/// `last_modified` to `now`.
pub fn cache_headers(
    env: &Environment,
    path: &str,
    last_modified: Option<i64>,
    checksum: Option<&str>,
    policy: CachePolicy,
    force: bool,
    now: DateTime<Utc>,
) -> Vec<Header> {
    if env.debug || (!force && classify(path).is_none()) {
        return Vec::new();
    }

    let expires = now + Duration::weeks(EXPIRES_AFTER_WEEKS);
    let mut headers = Vec::new();

    if policy.browser() {
        let last_modified = last_modified
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .unwrap_or(now);
        let checksum = checksum.unwrap_or(path);

        headers.push(("Date", http_date(now)));
        headers.push(("ETag", hash::etag(checksum, last_modified.timestamp())));
        headers.push(("Expires", http_date(expires)));
        headers.push(("ExpiresDefault", EXPIRES_DEFAULT.to_string()));
        headers.push(("Last-Modified", http_date(last_modified)));
    }

    if policy.proxy() {
        let max_age = (expires - now).num_seconds();
        headers.push(("Cache-Control", format!("public, max-age={max_age}")));
        headers.push(("Vary", "Accept-Encoding".to_string()));
    }

    headers
}
