//! Content types jammer can bundle, and classification of arbitrary paths
//!
//! [`ContentType`] is the closed set of bundleable module kinds. Each variant
//! carries a small behavior table (extension, MIME type, mismatch policy) so
//! resolution never branches on raw extension strings.
//!
//! [`classify`] is the wider table used by the delivery helpers: it also knows
//! images and web fonts, which are never bundled but do receive caching
//! headers and must not be recompressed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{JamError, Result};

/// A bundleable module kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[serde(alias = "js")]
    Script,
    #[serde(alias = "css")]
    Stylesheet,
    #[serde(alias = "html")]
    Markup,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [
        ContentType::Script,
        ContentType::Stylesheet,
        ContentType::Markup,
    ];

    /// File extension including the leading dot
    pub fn file_extension(self) -> &'static str {
        match self {
            ContentType::Script => ".js",
            ContentType::Stylesheet => ".css",
            ContentType::Markup => ".html",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ContentType::Script => "application/javascript",
            ContentType::Stylesheet => "text/css",
            ContentType::Markup => "text/html",
        }
    }

    /// Whether a URI request with a version mismatch keeps its requested order
    pub fn keeps_requested_order_on_mismatch(self) -> bool {
        match self {
            ContentType::Script | ContentType::Stylesheet | ContentType::Markup => true,
        }
    }

    /// Look up a content type by extension, with or without the leading dot
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        match extension.as_str() {
            "js" => Some(ContentType::Script),
            "css" => Some(ContentType::Stylesheet),
            "html" => Some(ContentType::Markup),
            _ => None,
        }
    }

    /// Determine the content type of a request path from its final extension
    pub fn from_path(path: &str) -> Option<Self> {
        path_extension(path).and_then(Self::from_extension)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentType::Script => "script",
            ContentType::Stylesheet => "stylesheet",
            ContentType::Markup => "markup",
        };
        f.write_str(name)
    }
}

impl FromStr for ContentType {
    type Err = JamError;

    /// Accepts a type name (`script`) or an extension (`js`, `.js`)
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "script" => Ok(ContentType::Script),
            "stylesheet" => Ok(ContentType::Stylesheet),
            "markup" => Ok(ContentType::Markup),
            other => {
                Self::from_extension(other).ok_or_else(|| crate::error::unknown_content_type(s))
            }
        }
    }
}

/// Prefix an extension with a dot if it does not already have one
pub fn ensure_file_extension(extension: &str) -> String {
    if extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{extension}")
    }
}

/// Classification of an arbitrary request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub extension: &'static str,
    pub mime_type: &'static str,
    pub is_image: bool,
    pub is_font: bool,
}

impl Classification {
    /// The bundleable content type behind this classification, if any
    pub fn content_type(&self) -> Option<ContentType> {
        ContentType::from_extension(self.extension)
    }
}

const fn text(extension: &'static str, mime_type: &'static str) -> Classification {
    Classification {
        extension,
        mime_type,
        is_image: false,
        is_font: false,
    }
}

const fn image(extension: &'static str, mime_type: &'static str) -> Classification {
    Classification {
        extension,
        mime_type,
        is_image: true,
        is_font: false,
    }
}

const fn font(extension: &'static str, mime_type: &'static str) -> Classification {
    Classification {
        extension,
        mime_type,
        is_image: false,
        is_font: true,
    }
}

const CLASSIFICATIONS: &[Classification] = &[
    text(".js", "application/javascript"),
    text(".css", "text/css"),
    text(".html", "text/html"),
    text(".htm", "text/html"),
    text(".json", "application/json"),
    text(".txt", "text/plain"),
    text(".xml", "application/xml"),
    image(".png", "image/png"),
    image(".jpg", "image/jpeg"),
    image(".jpeg", "image/jpeg"),
    image(".gif", "image/gif"),
    image(".ico", "image/x-icon"),
    image(".svg", "image/svg+xml"),
    image(".webp", "image/webp"),
    font(".woff", "font/woff"),
    font(".woff2", "font/woff2"),
    font(".ttf", "font/ttf"),
    font(".otf", "font/otf"),
    font(".eot", "application/vnd.ms-fontobject"),
];

/// Classify a path or bare extension; `None` if unrecognized
pub fn classify(path_or_extension: &str) -> Option<Classification> {
    let extension = path_extension(path_or_extension)
        .or_else(|| Some(path_or_extension.trim()).filter(|s| !s.is_empty()))?;
    let extension = ensure_file_extension(&extension.to_ascii_lowercase());
    CLASSIFICATIONS
        .iter()
        .find(|c| c.extension == extension)
        .copied()
}

/// Extension of the last path segment, ignoring any query string or fragment
fn path_extension(path: &str) -> Option<&str> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let segment = path.rsplit('/').next().unwrap_or(path);
    let (stem, extension) = segment.rsplit_once('.')?;
    if extension.is_empty() || (stem.is_empty() && !segment.starts_with('.')) {
        return None;
    }
    Some(extension)
}
