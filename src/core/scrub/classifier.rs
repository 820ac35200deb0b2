//! Readability classifier
//!
//! Two independent checks decide whether a value survives into the
//! human-readable output:
//!
//! - **Readability bounds**: converted text must be non-empty and at most
//!   [`MAX_TEXT_CHARS`] characters; numbers must be finite, nonzero and within
//!   ±[`MAX_NUMBER_MAGNITUDE`]. Booleans and null never qualify.
//! - **Natural language**: a denoising heuristic that rejects formula
//!   references, code-like identifiers and markup remnants. False positives are
//!   tuned through the configured excluded substrings, not the patterns here.

use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

/// Longest converted text kept, in characters
pub const MAX_TEXT_CHARS: usize = 100_000;

/// Largest absolute number kept
pub const MAX_NUMBER_MAGNITUDE: f64 = 1_000_000_000_000.0;

/// Texts shorter than this must not contain brackets, braces or angles
const BRACKET_CHECK_MAX_CHARS: usize = 100;

/// Unspaced texts shorter than this must not look like `a.b`
const DOTTED_CHECK_MAX_CHARS: usize = 50;

/// Named pattern that marks text as machine-oriented
struct NoisePattern {
    name: &'static str,
    regex: Regex,
}

impl NoisePattern {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("valid regex"),
        }
    }
}

static NOISE_PATTERNS: LazyLock<Vec<NoisePattern>> = LazyLock::new(|| {
    vec![
        NoisePattern::new(
            "reference_link",
            r"@(?:UUID|Embed|Compendium|Check|Damage|Template)\[|&Reference\[",
        ),
        NoisePattern::new(
            "compendium_path",
            r"Compendium\.[A-Za-z0-9_-]{3,}\.[A-Za-z0-9_-]{3,}",
        ),
        NoisePattern::new(
            "identifier_call",
            r"[a-z]+(?:-[a-z]+)*\.[A-Z][A-Za-z]*\.[A-Za-z0-9]{10,}",
        ),
        NoisePattern::new("symbol_run", r#"[^a-zA-Z0-9\s.,!?;:'"\-]{4,}"#),
        NoisePattern::new("separator_rule", r"-{3,}"),
        NoisePattern::new("long_token", r"[A-Za-z0-9_]{25,}"),
        NoisePattern::new(
            "html_entity",
            r"&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);",
        ),
    ]
});

static BRACKET_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\[\]{}<>]").expect("valid regex"));

static DOTTED_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*\.[A-Za-z_][A-Za-z0-9_-]*$").expect("valid regex")
});

/// Why a text was judged not to be natural language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoiseReason {
    /// The text is empty
    Empty,
    /// The text contains a configured excluded substring
    ExcludedSubstring(String),
    /// A built-in heuristic matched
    Pattern(&'static str),
}

impl fmt::Display for NoiseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoiseReason::Empty => write!(f, "empty"),
            NoiseReason::ExcludedSubstring(s) => write!(f, "excluded substring '{s}'"),
            NoiseReason::Pattern(name) => write!(f, "pattern {name}"),
        }
    }
}

/// Whether converted text is within the readable length bounds
pub fn is_readable_text(text: &str) -> bool {
    let chars = text.chars().count();
    chars > 0 && chars <= MAX_TEXT_CHARS
}

/// Whether a number is worth keeping
pub fn is_readable_number(value: f64) -> bool {
    value.is_finite() && value != 0.0 && value.abs() <= MAX_NUMBER_MAGNITUDE
}

/// Readability check for non-string scalars
///
/// Strings are not handled here; they must be converted first.
pub fn is_readable_scalar(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64().is_some_and(is_readable_number),
        _ => false,
    }
}

/// Whether text reads like prose rather than a machine-oriented token
pub fn is_natural_language(text: &str, excluded_substrings: &[String]) -> bool {
    noise_reason(text, excluded_substrings).is_none()
}

/// The first reason `text` is not natural language, if any
pub fn noise_reason(text: &str, excluded_substrings: &[String]) -> Option<NoiseReason> {
    if text.is_empty() {
        return Some(NoiseReason::Empty);
    }

    if let Some(hit) = excluded_substrings
        .iter()
        .find(|s| !s.is_empty() && text.contains(s.as_str()))
    {
        return Some(NoiseReason::ExcludedSubstring(hit.clone()));
    }

    if let Some(pattern) = NOISE_PATTERNS.iter().find(|p| p.regex.is_match(text)) {
        return Some(NoiseReason::Pattern(pattern.name));
    }

    let chars = text.chars().count();
    if chars < BRACKET_CHECK_MAX_CHARS && BRACKET_CHARS.is_match(text) {
        return Some(NoiseReason::Pattern("short_bracketed"));
    }

    if chars < DOTTED_CHECK_MAX_CHARS && DOTTED_IDENTIFIER.is_match(text) {
        return Some(NoiseReason::Pattern("dotted_identifier"));
    }

    None
}
