//! Post index generation
//!
//! Each subdirectory of the posts directory is one post, with its page in
//! `index.html`. The indexer reads every page, pulls out the `<title>` and
//! writes the list to a JSON file the site's front end loads.
//!
//! # Output Format
//!
//! ```json
//! [
//!   {
//!     "title": "Hello World",
//!     "path": "posts/hello-world/index.html"
//!   }
//! ]
//! ```
//!
//! Posts are listed in directory-name order. A page without a title tag is
//! listed under its directory name.

use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::charset::read_html;
use crate::error::{Error, Result};

/// Where posts are read from and where the index goes
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// Directory whose subdirectories are posts
    pub posts_dir: PathBuf,
    /// JSON file to write
    pub output: PathBuf,
    /// Page file name inside each post directory
    pub index_file: String,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("posts"),
            output: PathBuf::from("posts.json"),
            index_file: "index.html".to_string(),
        }
    }
}

/// One entry of the post index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub title: String,
    pub path: String,
}

/// Builds the post index described by an [`IndexerConfig`]
///
/// ```rust,no_run
/// use static_site_tools::indexer::{IndexerConfig, PostIndexer};
///
/// let indexer = PostIndexer::new(IndexerConfig::default());
/// let posts = indexer.run()?;
/// println!("indexed {} posts", posts.len());
/// # Ok::<(), static_site_tools::Error>(())
/// ```
pub struct PostIndexer {
    config: IndexerConfig,
}

impl PostIndexer {
    pub fn new(config: IndexerConfig) -> Self {
        Self { config }
    }

    /// Scan the posts directory and write the index
    ///
    /// Returns the records that were written.
    pub fn run(&self) -> Result<Vec<PostRecord>> {
        let records = self.scan()?;
        self.write_index(&records)?;
        info!(
            posts = records.len(),
            output = %self.config.output.display(),
            "wrote post index"
        );
        Ok(records)
    }

    /// Read every post page, sorted by directory name
    ///
    /// # Errors
    ///
    /// Fails if the posts directory can't be listed or any post page can't
    /// be read or decoded. Entries that aren't directories are skipped.
    pub fn scan(&self) -> Result<Vec<PostRecord>> {
        let posts_dir = &self.config.posts_dir;
        let entries = fs::read_dir(posts_dir).map_err(|e| Error::read(posts_dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::read(posts_dir, e))?;
            if entry.path().is_dir() {
                names.push(entry.file_name());
            }
        }
        names.sort();

        names
            .iter()
            .map(|name| self.read_post(name))
            .collect()
    }

    /// Paths are built from the raw directory name; lossy conversion only
    /// happens for the record's strings.
    fn read_post(&self, dir_name: &OsStr) -> Result<PostRecord> {
        let path = self
            .config
            .posts_dir
            .join(dir_name)
            .join(&self.config.index_file);
        let html = read_html(&path)?;
        let lossy_name = dir_name.to_string_lossy();
        let name: &str = &lossy_name;

        let title = match find_title(&html) {
            Some(title) => title,
            None => {
                warn!(post = name, "no <title> found, using directory name");
                name
            }
        };
        debug!(post = name, title, "indexed post");

        Ok(PostRecord {
            title: title.to_string(),
            path: path.to_string_lossy().into_owned(),
        })
    }

    /// Serialize `records` as two-space indented JSON to the output file
    pub fn write_index(&self, records: &[PostRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.config.output, json).map_err(|e| Error::write(&self.config.output, e))
    }
}

/// Title of a page, or `fallback` when it has no `<title>` tag
///
/// The first `<title>...</title>` on a single line wins and its contents are
/// returned as written, without entity decoding or trimming.
///
/// ```rust
/// use static_site_tools::indexer::extract_title;
///
/// assert_eq!(extract_title("<title>Hi</title>", "dir"), "Hi");
/// assert_eq!(extract_title("<h1>Hi</h1>", "dir"), "dir");
/// ```
pub fn extract_title<'a>(html: &'a str, fallback: &'a str) -> &'a str {
    find_title(html).unwrap_or(fallback)
}

fn find_title(html: &str) -> Option<&str> {
    static TITLE_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = TITLE_REGEX.get_or_init(|| Regex::new(r"<title>(.*?)</title>").ok());

    regex
        .as_ref()?
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title_first_match() {
        let html = "<title>One</title><title>Two</title>";
        assert_eq!(extract_title(html, "dir"), "One");
    }

    #[test]
    fn test_extract_title_verbatim() {
        let html = "<title> Tips &amp; Tricks </title>";
        assert_eq!(extract_title(html, "dir"), " Tips &amp; Tricks ");
    }

    #[test]
    fn test_extract_title_empty() {
        assert_eq!(extract_title("<title></title>", "dir"), "");
    }

    #[test]
    fn test_extract_title_does_not_span_lines() {
        let html = "<title>Broken\nacross lines</title>";
        assert_eq!(extract_title(html, "dir"), "dir");
    }

    #[test]
    fn test_extract_title_is_case_sensitive() {
        assert_eq!(extract_title("<TITLE>Loud</TITLE>", "dir"), "dir");
    }

    #[test]
    fn test_extract_title_ignores_attributes_form() {
        assert_eq!(extract_title("<title lang=\"en\">x</title>", "dir"), "dir");
    }

    #[test]
    fn test_default_config() {
        let config = IndexerConfig::default();
        assert_eq!(config.posts_dir, PathBuf::from("posts"));
        assert_eq!(config.output, PathBuf::from("posts.json"));
        assert_eq!(config.index_file, "index.html");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_directory_name_is_read_from_its_real_path() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let root = tempfile::tempdir().expect("tempdir failed");
        let posts_dir = root.path().join("posts");
        let dir_name = OsString::from_vec(b"caf\xE9".to_vec());
        let post_dir = posts_dir.join(&dir_name);
        if fs::create_dir_all(&post_dir).is_err() {
            // Some filesystems reject non-UTF-8 names outright
            return;
        }
        fs::write(post_dir.join("index.html"), "<p>untitled</p>").expect("write failed");

        let indexer = PostIndexer::new(IndexerConfig {
            posts_dir,
            output: root.path().join("posts.json"),
            ..IndexerConfig::default()
        });
        let records = indexer.scan().expect("scan failed");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "caf\u{fffd}");
        assert!(records[0].path.ends_with("caf\u{fffd}/index.html"));
    }

    #[test]
    fn test_record_serializes_title_then_path() {
        let record = PostRecord {
            title: "T".to_string(),
            path: "posts/t/index.html".to_string(),
        };
        let json = serde_json::to_string(&record).expect("serialize failed");
        assert_eq!(json, r#"{"title":"T","path":"posts/t/index.html"}"#);
    }
}
