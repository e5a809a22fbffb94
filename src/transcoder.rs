//! Tag-to-Markdown transcoder
//!
//! This module turns an HTML document into Markdown in a single pass over the
//! html5ever tokenizer's token stream. There is no DOM and no tree builder:
//! every start tag, end tag and run of text is mapped straight to an output
//! fragment.
//!
//! # Element Mapping
//!
//! | Element            | Start                 | End               |
//! |--------------------|-----------------------|-------------------|
//! | `h0`-`h9`          | `\n` + N `#` + space  | `\n`              |
//! | `p`                | `\n`                  | `\n`              |
//! | `li`               | `- `                  | `\n`              |
//! | `pre`              | `\n```\n`             | `\n```\n`         |
//! | `code`             | `` ` `` outside `pre` | `` ` `` outside `pre` |
//! | `strong`, `b`      | `**`                  | `**`              |
//! | `em`, `i`          | `*`                   | `*`               |
//! | `br`               | two spaces + `\n`     |                   |
//! | `a`                | `[`                   | `](href)`         |
//! | `img`              | `![alt](src)`         |                   |
//!
//! Every other tag is ignored. Text is copied verbatim, NUL and a leading
//! U+FEFF included; the tokenizer decodes character references and
//! normalizes line endings.
//!
//! # Limitations
//!
//! - A single pending link slot: an anchor opened inside another anchor
//!   replaces the outer target.
//! - Inline `code` markers are suppressed anywhere inside `pre`.
//! - Only two-character heading names are recognized.
//! - `script` and `style` contents are copied as raw text, `<` included.
//!
//! # Examples
//!
//! ```rust
//! use static_site_tools::transcoder::html_to_markdown;
//!
//! let markdown = html_to_markdown(r#"<p>See <a href="/docs">the docs</a>.</p>"#);
//! assert_eq!(markdown, "\nSee [the docs](/docs).\n");
//! ```

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use tracing::{debug, trace};

/// Opening and closing fence of a preformatted block
const CODE_FENCE: &str = "\n```\n";

/// Recognized element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    /// `h` followed by a single digit, carrying the level
    Heading(u8),
    Paragraph,
    ListItem,
    Preformatted,
    Code,
    Bold,
    Italic,
    LineBreak,
    Anchor,
    Image,
    /// Anything else; produces no output
    Other,
}

impl Element {
    fn from_tag_name(name: &str) -> Self {
        match name {
            "p" => Element::Paragraph,
            "li" => Element::ListItem,
            "pre" => Element::Preformatted,
            "code" => Element::Code,
            "strong" | "b" => Element::Bold,
            "em" | "i" => Element::Italic,
            "br" => Element::LineBreak,
            "a" => Element::Anchor,
            "img" => Element::Image,
            _ => match name.as_bytes() {
                [b'h', level] if level.is_ascii_digit() => Element::Heading(level - b'0'),
                _ => Element::Other,
            },
        }
    }
}

/// Converts one HTML document to Markdown
///
/// A `Transcoder` holds the output buffer and the two pieces of parser state
/// for exactly one conversion. [`Transcoder::convert`] consumes it, so state
/// can never leak from one document into the next.
///
/// ```rust
/// use static_site_tools::transcoder::Transcoder;
///
/// let markdown = Transcoder::new().convert("<h2>Install</h2><pre>make</pre>");
/// assert_eq!(markdown, "\n## Install\n\n```\nmake\n```\n");
/// ```
#[derive(Debug, Default)]
pub struct Transcoder {
    /// Markdown emitted so far
    output: String,
    /// Inside a `pre` element
    in_code_block: bool,
    /// `href` of the most recently opened anchor
    pending_href: Option<String>,
}

impl Transcoder {
    /// Create a transcoder with empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize `html` and return the complete Markdown output
    pub fn convert(self, html: &str) -> String {
        let input_len = html.len();
        let sink = TranscoderSink {
            transcoder: RefCell::new(self),
        };
        let opts = TokenizerOpts {
            discard_bom: false,
            ..TokenizerOpts::default()
        };
        let tokenizer = Tokenizer::new(sink, opts);

        let input = BufferQueue::default();
        input.push_back(StrTendril::from_slice(html));
        // The sink never hands back a script handle, so one feed drains the queue
        let _ = tokenizer.feed(&input);
        tokenizer.end();

        let markdown = tokenizer.sink.transcoder.take().finish();
        debug!(
            input_bytes = input_len,
            output_bytes = markdown.len(),
            "converted html to markdown"
        );
        markdown
    }

    /// Return the accumulated output
    pub fn finish(self) -> String {
        self.output
    }

    fn handle_tag(&mut self, tag: &Tag) {
        let element = Element::from_tag_name(&tag.name);
        match tag.kind {
            TagKind::StartTag => {
                self.start_element(element, tag);
                // `<x/>` behaves as `<x></x>`
                if tag.self_closing {
                    self.end_element(element);
                }
            }
            TagKind::EndTag => self.end_element(element),
        }
    }

    fn handle_null(&mut self) {
        self.output.push('\0');
    }

    fn start_element(&mut self, element: Element, tag: &Tag) {
        match element {
            Element::Heading(level) => {
                self.output.push('\n');
                self.output.push_str(&"#".repeat(usize::from(level)));
                self.output.push(' ');
            }
            Element::Paragraph => self.output.push('\n'),
            Element::ListItem => self.output.push_str("- "),
            Element::Preformatted => {
                self.in_code_block = true;
                self.output.push_str(CODE_FENCE);
            }
            Element::Code => {
                if !self.in_code_block {
                    self.output.push('`');
                }
            }
            Element::Bold => self.output.push_str("**"),
            Element::Italic => self.output.push('*'),
            Element::LineBreak => self.output.push_str("  \n"),
            Element::Anchor => {
                self.output.push('[');
                self.pending_href = Some(attribute(tag, "href").to_string());
            }
            Element::Image => {
                let alt = attribute(tag, "alt");
                let src = attribute(tag, "src");
                self.output.push_str(&format!("![{alt}]({src})"));
            }
            Element::Other => {}
        }
    }

    fn end_element(&mut self, element: Element) {
        match element {
            Element::Heading(_) | Element::Paragraph | Element::ListItem => {
                self.output.push('\n');
            }
            Element::Preformatted => {
                self.in_code_block = false;
                self.output.push_str(CODE_FENCE);
            }
            Element::Code => {
                if !self.in_code_block {
                    self.output.push('`');
                }
            }
            Element::Bold => self.output.push_str("**"),
            Element::Italic => self.output.push('*'),
            Element::Anchor => {
                let href = self.pending_href.take().unwrap_or_default();
                self.output.push_str("](");
                self.output.push_str(&href);
                self.output.push(')');
            }
            Element::LineBreak | Element::Image | Element::Other => {}
        }
    }

    fn handle_text(&mut self, text: &str) {
        self.output.push_str(text);
    }
}

/// Value of the named attribute, or `""` when absent
fn attribute<'a>(tag: &'a Tag, name: &str) -> &'a str {
    tag.attrs
        .iter()
        .find(|attr| &*attr.name.local == name)
        .map(|attr| &*attr.value)
        .unwrap_or("")
}

/// Adapter between the tokenizer's shared-reference sink and the transcoder
struct TranscoderSink {
    transcoder: RefCell<Transcoder>,
}

impl TokenSink for TranscoderSink {
    type Handle = ();

    fn process_token(&self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        let mut transcoder = self.transcoder.borrow_mut();
        match token {
            Token::TagToken(tag) => {
                transcoder.handle_tag(&tag);
                if let Some(kind) = raw_text_kind(&tag) {
                    return TokenSinkResult::RawData(kind);
                }
            }
            Token::CharacterTokens(text) => transcoder.handle_text(&text),
            Token::NullCharacterToken => transcoder.handle_null(),
            Token::ParseError(error) => trace!(line = line_number, %error, "html parse error"),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// Tokenizer state for elements whose contents are not markup
///
/// Only an opening `script` or `style` tag switches state; `<script/>` has
/// no contents.
fn raw_text_kind(tag: &Tag) -> Option<RawKind> {
    if !matches!(tag.kind, TagKind::StartTag) || tag.self_closing {
        return None;
    }
    match &*tag.name {
        "script" => Some(RawKind::ScriptData),
        "style" => Some(RawKind::Rawtext),
        _ => None,
    }
}

/// Convert an HTML document to Markdown with fresh transcoder state
///
/// # Examples
///
/// ```rust
/// use static_site_tools::transcoder::html_to_markdown;
///
/// assert_eq!(html_to_markdown("<img src=\"a.png\" alt=\"A\">"), "![A](a.png)");
/// assert_eq!(html_to_markdown("<a>text</a>"), "[text]()");
/// ```
pub fn html_to_markdown(html: &str) -> String {
    Transcoder::new().convert(html)
}
