//! Static Site Tools
//!
//! Two small utilities for maintaining a static site:
//!
//! - an HTML to Markdown transcoder, exposed as the `html-to-md` binary
//! - a post indexer that writes `posts.json`, exposed as `generate-posts-json`
//!
//! # Architecture
//!
//! The library is structured into several modules:
//! - `transcoder`: single-pass tag-to-Markdown conversion over html5ever's tokenizer
//! - `indexer`: post directory scanning and JSON index output
//! - `charset`: character encoding detection and decoding of HTML files
//! - `error`: error type for the file-facing operations
//! - `logging`: tracing subscriber setup shared by the binaries

use std::path::Path;

// Module declarations
pub mod charset;
pub mod error;
pub mod indexer;
pub mod logging;
pub mod transcoder;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use indexer::{IndexerConfig, PostIndexer, PostRecord, extract_title};
pub use transcoder::{Transcoder, html_to_markdown};

/// Read an HTML file and convert it to Markdown
///
/// # Errors
///
/// Returns an error if the file can't be read or its bytes can't be decoded.
/// Conversion itself never fails.
pub fn convert_file(path: &Path) -> Result<String> {
    let html = charset::read_html(path)?;
    Ok(html_to_markdown(&html))
}
