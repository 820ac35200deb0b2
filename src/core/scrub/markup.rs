//! Markup-to-text conversion
//!
//! Rich-text fields arrive as HTML-like markup sprinkled with bracketed
//! reference links. [`MarkupConverter`] flattens them into readable text:
//!
//! 1. A [`StructuralParser`] parses the markup with html5ever and emits text
//!    nodes depth-first, separating block-level elements with a single space.
//! 2. If structural parsing fails, the [`RegexFallbackParser`] works on the raw
//!    string instead (tag stripping, entity unescaping).
//! 3. Both paths remove reference links (`@UUID[...]{label}` and friends),
//!    collapse `[[...]]` to `[...]` and normalize whitespace.
//!
//! Block elements become spaces rather than newlines. The output is meant for
//! reading and searching, not for reproducing layout.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Default nesting limit for the structural parser
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Elements that start a new visual block
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "br",
    "caption",
    "dd",
    "details",
    "dialog",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "tr",
    "ul",
];

/// Elements whose text content is never readable prose
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "template", "noscript"];

static REFERENCE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:@(?:UUID|Embed|Compendium)|&Reference)\[.*?\](?:\{[^}]*\})?")
        .expect("valid regex")
});

static DOUBLED_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(.*?)\]\]").expect("valid regex"));

static BREAK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));

static BLOCK_CLOSE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(?:p|div|li|tr|h[1-6]|blockquote|section|article|table|ul|ol)\s*>")
        .expect("valid regex")
});

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[^>]+(?:>|$)").expect("valid regex"));

static HORIZONTAL_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("valid regex"));

static WHITESPACE_ONLY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^ +$").expect("valid regex"));

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Errors raised by a markup parser
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkupError {
    /// The element tree nests deeper than the parser allows
    #[error("markup nesting exceeds {0} levels")]
    TooDeep(usize),

    /// The parser could not make sense of the input
    #[error("malformed markup: {0}")]
    Malformed(String),
}

/// A strategy for turning markup into raw text
///
/// Implementations extract text and apply reference-link removal; whitespace
/// normalization is left to [`MarkupConverter`].
pub trait MarkupParser: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Extract text from markup
    fn extract(&self, markup: &str) -> Result<String, MarkupError>;
}

/// html5ever-backed parser that walks the element tree
#[derive(Debug, Clone)]
pub struct StructuralParser {
    max_depth: usize,
}

impl StructuralParser {
    /// Create a parser with the default nesting limit
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Create a parser with a custom nesting limit
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    fn walk(&self, handle: &Handle, depth: usize, out: &mut String) -> Result<(), MarkupError> {
        if depth > self.max_depth {
            return Err(MarkupError::TooDeep(self.max_depth));
        }

        match &handle.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Document => self.walk_children(handle, depth, out)?,
            NodeData::Element { name, .. } => {
                let tag: &str = &name.local;
                if SKIPPED_ELEMENTS.contains(&tag) {
                    return Ok(());
                }

                let is_block = BLOCK_ELEMENTS.contains(&tag);
                if is_block {
                    push_separator(out);
                }
                self.walk_children(handle, depth, out)?;
                if is_block {
                    push_separator(out);
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn walk_children(
        &self,
        handle: &Handle,
        depth: usize,
        out: &mut String,
    ) -> Result<(), MarkupError> {
        for child in handle.children.borrow().iter() {
            self.walk(child, depth + 1, out)?;
        }
        Ok(())
    }
}

impl Default for StructuralParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupParser for StructuralParser {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn extract(&self, markup: &str) -> Result<String, MarkupError> {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(markup);

        let mut text = String::with_capacity(markup.len());
        self.walk(&dom.document, 0, &mut text)?;

        let text = text.replace('\u{a0}', " ");
        Ok(strip_reference_syntax(&text))
    }
}

/// Regex-only parser used when structural parsing fails
#[derive(Debug, Clone, Default)]
pub struct RegexFallbackParser;

impl MarkupParser for RegexFallbackParser {
    fn name(&self) -> &'static str {
        "regex-fallback"
    }

    fn extract(&self, markup: &str) -> Result<String, MarkupError> {
        let text = BREAK_TAG.replace_all(markup, "\n");
        let text = BLOCK_CLOSE_TAG.replace_all(&text, "\n");
        let text = ANY_TAG.replace_all(&text, "");
        let text = strip_reference_syntax(&text);
        let text = unescape_entities(&text);
        Ok(text.replace('\u{a0}', " "))
    }
}

/// Converts markup to flat readable text
///
/// Tries the primary parser first and falls back to the secondary one when it
/// reports an error. Conversion itself never fails.
///
/// # Examples
///
/// ```
/// use quire::core::scrub::MarkupConverter;
///
/// let converter = MarkupConverter::new();
/// assert_eq!(
///     converter.convert("@UUID[Actor.abc123]{My Actor} did a thing"),
///     "did a thing"
/// );
/// assert_eq!(converter.convert("<p>Roll</p><p>[[/r 1d20]] to hit</p>"), "Roll [/r 1d20] to hit");
/// ```
pub struct MarkupConverter {
    primary: Box<dyn MarkupParser>,
    fallback: Box<dyn MarkupParser>,
}

impl MarkupConverter {
    /// Structural parser with the regex fallback
    pub fn new() -> Self {
        Self::with_parsers(
            Box::new(StructuralParser::new()),
            Box::new(RegexFallbackParser),
        )
    }

    /// Use custom primary and fallback parsers
    pub fn with_parsers(primary: Box<dyn MarkupParser>, fallback: Box<dyn MarkupParser>) -> Self {
        Self { primary, fallback }
    }

    /// Convert markup into normalized text; empty input yields an empty string
    pub fn convert(&self, markup: &str) -> String {
        if markup.trim().is_empty() {
            return String::new();
        }

        let text = match self.primary.extract(markup) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(
                    parser = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %e,
                    "Markup parse failed, using fallback"
                );
                match self.fallback.extract(markup) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::warn!(
                            parser = self.fallback.name(),
                            error = %e,
                            "Fallback markup parse failed, dropping text"
                        );
                        return String::new();
                    }
                }
            }
        };

        normalize_whitespace(&text)
    }
}

impl Default for MarkupConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MarkupConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkupConverter")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

/// Remove reference links and collapse doubled brackets
pub fn strip_reference_syntax(text: &str) -> String {
    let text = REFERENCE_LINK.replace_all(text, "");
    DOUBLED_BRACKETS.replace_all(&text, "[${1}]").into_owned()
}

/// Collapse horizontal whitespace, squeeze blank lines and trim
pub fn normalize_whitespace(text: &str) -> String {
    let text = HORIZONTAL_WHITESPACE.replace_all(text, " ");
    let text = WHITESPACE_ONLY_LINE.replace_all(&text, "");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Unescape the handful of entities markup fields actually use
fn unescape_entities(text: &str) -> String {
    // &amp; goes last so "&amp;lt;" stays "&lt;"
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn push_separator(out: &mut String) {
    if !out.is_empty() && !out.ends_with(char::is_whitespace) {
        out.push(' ');
    }
}
