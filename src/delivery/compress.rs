//! Response compression

use std::io::Write;

use flate2::Compression;
use flate2::write::{DeflateEncoder, GzEncoder};

use super::{Header, skip_network};
use crate::config::Environment;
use crate::domain::classify;
use crate::error::{Result, compression_failed};

/// Supported content codings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Raw DEFLATE stream, no zlib framing
    Deflate,
    Gzip,
}

impl Encoding {
    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Deflate => "deflate",
            Encoding::Gzip => "gzip",
        }
    }

    /// Parse one `Accept-Encoding` entry, ignoring quality parameters
    pub fn parse(token: &str) -> Option<Self> {
        let coding = token.split(';').next().unwrap_or_default().trim();
        if coding.eq_ignore_ascii_case("deflate") {
            Some(Encoding::Deflate)
        } else if coding.eq_ignore_ascii_case("gzip") {
            Some(Encoding::Gzip)
        } else {
            None
        }
    }

    fn encode(self, body: &[u8]) -> Result<Vec<u8>> {
        let encoded = match self {
            Encoding::Deflate => {
                let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(body).and_then(|()| encoder.finish())
            }
            Encoding::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(body).and_then(|()| encoder.finish())
            }
        };
        encoded.map_err(|e| compression_failed(format!("{}: {}", self.as_str(), e)))
    }
}

/// A response body and the headers describing its encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedBody {
    pub body: Vec<u8>,
    pub encoding: Option<Encoding>,
    pub headers: Vec<Header>,
}

impl CompressedBody {
    fn unchanged(body: &[u8]) -> Self {
        Self {
            body: body.to_vec(),
            encoding: None,
            headers: Vec::new(),
        }
    }
}

/// Compress a response body for the client's `Accept-Encoding`
///
/// Empty bodies, bodies at or under the network threshold, and clients
/// accepting neither gzip nor deflate get the body back unchanged. Images
/// and fonts are never compressed unless `skip_content_check` is set.
///
/// # Errors
///
/// Returns error if the encoder fails.
pub fn compress_body(
    env: &Environment,
    body: &[u8],
    path: Option<&str>,
    skip_content_check: bool,
    accept_encoding: &str,
) -> Result<CompressedBody> {
    let accepted = accept_encoding.contains("gzip") || accept_encoding.contains("deflate");
    if body.is_empty() || !accepted || skip_network(env, body.len()) {
        return Ok(CompressedBody::unchanged(body));
    }

    let compressible = skip_content_check
        || path
            .and_then(classify)
            .is_some_and(|class| !class.is_image && !class.is_font);
    if !compressible {
        return Ok(CompressedBody::unchanged(body));
    }

    let mut compressed = CompressedBody::unchanged(body);
    if let Some(encoding) = accept_encoding.split(',').find_map(Encoding::parse) {
        compressed.body = encoding.encode(body)?;
        compressed.encoding = Some(encoding);
        compressed
            .headers
            .push(("Content-Encoding", encoding.as_str().to_string()));
    }
    compressed.headers.push(("Vary", "Accept-Encoding".to_string()));
    Ok(compressed)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use std::io::Read;

    use flate2::read::{DeflateDecoder, GzDecoder};

    use super::*;

    fn large_body() -> Vec<u8> {
        "var a = 1;\n".repeat(200).into_bytes()
    }

    #[test]
    fn test_parse_encoding() {
        assert_eq!(Encoding::parse(" GZIP "), Some(Encoding::Gzip));
        assert_eq!(Encoding::parse("deflate;q=0.5"), Some(Encoding::Deflate));
        assert_eq!(Encoding::parse("br"), None);
    }

    #[test]
    fn test_first_accepted_encoding_wins() {
        let env = Environment::default();
        let body = large_body();

        let result = compress_body(&env, &body, Some("/jam/a.js"), false, "br, deflate, gzip")
            .expect("compression should succeed");

        assert_eq!(result.encoding, Some(Encoding::Deflate));
        assert_eq!(
            result.headers,
            vec![
                ("Content-Encoding", "deflate".to_string()),
                ("Vary", "Accept-Encoding".to_string()),
            ]
        );
        let mut decoded = Vec::new();
        DeflateDecoder::new(result.body.as_slice())
            .read_to_end(&mut decoded)
            .expect("raw deflate stream");
        assert_eq!(decoded, body);
    }

    #[test]
    fn test_gzip_member() {
        let env = Environment::default();
        let body = large_body();

        let result = compress_body(&env, &body, Some("/jam/site.css"), false, "gzip")
            .expect("compression should succeed");

        assert_eq!(result.encoding, Some(Encoding::Gzip));
        let mut decoded = Vec::new();
        GzDecoder::new(result.body.as_slice())
            .read_to_end(&mut decoded)
            .expect("gzip member");
        assert_eq!(decoded, body);
    }

    #[test]
    fn test_small_body_unchanged() {
        let env = Environment::default();
        let body = b"var a;\n".to_vec();

        let result = compress_body(&env, &body, Some("/jam/a.js"), false, "gzip")
            .expect("compression should succeed");

        assert_eq!(result, CompressedBody::unchanged(&body));
    }

    #[test]
    fn test_unaccepted_encoding_unchanged() {
        let env = Environment::default();
        let body = large_body();

        let result = compress_body(&env, &body, Some("/jam/a.js"), false, "br")
            .expect("compression should succeed");

        assert!(result.encoding.is_none());
        assert!(result.headers.is_empty());
    }

    #[test]
    fn test_images_and_fonts_not_compressed() {
        let env = Environment::default();
        let body = large_body();

        for path in ["/img/logo.png", "/fonts/body.woff2", "/jam/unknown.bin"] {
            let result = compress_body(&env, &body, Some(path), false, "gzip")
                .expect("compression should succeed");
            assert!(result.encoding.is_none(), "{path} should not be compressed");
        }
    }

    #[test]
    fn test_skip_content_check() {
        let env = Environment::default();
        let body = large_body();

        let result = compress_body(&env, &body, None, true, "gzip")
            .expect("compression should succeed");

        assert_eq!(result.encoding, Some(Encoding::Gzip));
    }

    #[test]
    fn test_substring_match_only_adds_vary() {
        let env = Environment::default();
        let body = large_body();

        let result = compress_body(&env, &body, Some("/jam/a.js"), false, "x-gzip")
            .expect("compression should succeed");

        assert!(result.encoding.is_none());
        assert_eq!(result.headers, vec![("Vary", "Accept-Encoding".to_string())]);
    }
}
