//! Character encoding detection and decoding
//!
//! HTML files are read as raw bytes and decoded to text before they reach the
//! tokenizer. The charset comes from the first of:
//!
//! 1. a UTF-8 or UTF-16 byte order mark, which is stripped
//! 2. a `charset=` declaration in a `<meta>` tag within the first 1024 bytes,
//!    either `<meta charset>` or the `content` of `<meta http-equiv>`
//! 3. UTF-8
//!
//! # Examples
//!
//! ```rust
//! use static_site_tools::charset::{CharsetSource, decode_html, detect_charset};
//!
//! let detected = detect_charset(b"<meta charset=\"ISO-8859-1\">").unwrap();
//! assert_eq!(detected.encoding, encoding_rs::WINDOWS_1252);
//! assert_eq!(detected.source, CharsetSource::MetaTag);
//!
//! let text = decode_html(b"<p>caf\xE9</p><meta charset=latin1>").unwrap();
//! assert_eq!(text, "<p>caf\u{e9}</p><meta charset=latin1>");
//! ```

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use regex::bytes::Regex;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Only the head of a document is searched for a declaration
const META_SCAN_LIMIT: usize = 1024;

/// Where a document's charset was determined from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharsetSource {
    ByteOrderMark,
    MetaTag,
    Default,
}

/// Result of charset detection
#[derive(Debug, Clone, Copy)]
pub struct DetectedCharset {
    pub encoding: &'static Encoding,
    pub source: CharsetSource,
    /// Length of the byte order mark to skip, zero without one
    pub bom_len: usize,
}

/// Read a file and decode it to a `String`
///
/// # Errors
///
/// Returns `Error::Read` if the file can't be read, or the errors of
/// [`decode_html`] if its bytes don't decode.
pub fn read_html(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::read(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read html file");
    decode_html(&bytes)
}

/// Decode HTML bytes to text
///
/// UTF-8 input is validated strictly; other charsets are transcoded without
/// replacement characters, so any invalid byte is an error.
///
/// # Errors
///
/// - `Error::Encoding` if the bytes are invalid for the detected charset
/// - `Error::UnsupportedCharset` if a meta tag names an unknown charset
pub fn decode_html(html: &[u8]) -> Result<String> {
    let detected = detect_charset(html)?;
    let body = &html[detected.bom_len..];

    if detected.encoding == UTF_8 {
        return std::str::from_utf8(body)
            .map(str::to_owned)
            .map_err(|e| Error::Encoding {
                charset: UTF_8.name().to_string(),
                detail: format!("invalid byte sequence at position {}", e.valid_up_to()),
            });
    }

    detected
        .encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
        .ok_or_else(|| Error::Encoding {
            charset: detected.encoding.name().to_string(),
            detail: "invalid byte sequence".to_string(),
        })
}

/// Determine the encoding of an HTML document
///
/// ```rust
/// use static_site_tools::charset::{CharsetSource, detect_charset};
///
/// let detected = detect_charset(b"<p>no declaration</p>").unwrap();
/// assert_eq!(detected.encoding, encoding_rs::UTF_8);
/// assert_eq!(detected.source, CharsetSource::Default);
/// ```
///
/// # Errors
///
/// Returns `Error::UnsupportedCharset` when a meta tag names a charset
/// `encoding_rs` has no label for.
pub fn detect_charset(html: &[u8]) -> Result<DetectedCharset> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(html) {
        debug!(charset = encoding.name(), "byte order mark found");
        return Ok(DetectedCharset {
            encoding,
            source: CharsetSource::ByteOrderMark,
            bom_len,
        });
    }

    let Some(label) = declared_charset(html) else {
        return Ok(DetectedCharset {
            encoding: UTF_8,
            source: CharsetSource::Default,
            bom_len: 0,
        });
    };

    let encoding = Encoding::for_label(label).ok_or_else(|| {
        Error::UnsupportedCharset(String::from_utf8_lossy(label).to_ascii_uppercase())
    })?;

    // A meta tag is only readable in an ASCII-compatible document, so a
    // UTF-16 declaration there means UTF-8.
    let encoding = if encoding == UTF_16LE || encoding == UTF_16BE {
        warn!(
            declared = encoding.name(),
            "meta tag declares UTF-16, decoding as UTF-8"
        );
        UTF_8
    } else {
        encoding
    };

    Ok(DetectedCharset {
        encoding,
        source: CharsetSource::MetaTag,
        bom_len: 0,
    })
}

/// Charset label declared by the first matching `<meta>` tag
fn declared_charset(html: &[u8]) -> Option<&[u8]> {
    static META_CHARSET: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = META_CHARSET
        .get_or_init(|| {
            Regex::new(r#"(?i-u)<meta\b[^>]*?\bcharset\s*=\s*["']?([^"'\s;/>]+)"#).ok()
        })
        .as_ref()?;

    let head = &html[..html.len().min(META_SCAN_LIMIT)];
    regex
        .captures(head)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_bytes())
}
