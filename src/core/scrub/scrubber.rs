//! Content scrubbing
//!
//! [`ContentScrubber`] walks a record's field tree and keeps only what a
//! person would want to read: excluded keys are dropped at every depth,
//! strings go through the markup converter and both classifier checks,
//! numbers through the numeric bounds, and booleans/null are discarded.
//!
//! Scrubbing prunes one level at a time as it unwinds. [`prune_empty`] is the
//! final post-order sweep that removes any empty container or blank string
//! left behind, so the resulting [`ScrubbedTree`] never holds an empty object
//! or array.
//!
//! Input must be a tree; serde_json values cannot be cyclic.

use super::classifier::{is_readable_scalar, is_readable_text, noise_reason};
use super::exclusion::ExclusionConfig;
use super::markup::MarkupConverter;
use super::text::render_txt;
use crate::domain::Document;
use serde_json::{Map, Value};

/// Field whose nested `value` string carries the record's rich-text body
const DESCRIPTION_KEY: &str = "description";

/// Nested field holding the description markup
const DESCRIPTION_VALUE_KEY: &str = "value";

/// The scrubbed, pruned projection of a record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrubbedTree(Map<String, Value>);

impl ScrubbedTree {
    /// Wrap a field map, pruning it
    pub fn new(fields: Map<String, Value>) -> Self {
        match prune_empty(Value::Object(fields)) {
            Some(Value::Object(map)) => Self(map),
            _ => Self::default(),
        }
    }

    /// Whether nothing survived scrubbing
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indented `key: value` text rendering; empty trees render as ""
    pub fn to_txt(&self) -> String {
        render_txt(&self.0)
    }
}

/// Recursively remove empty arrays, empty objects and blank strings
///
/// Returns `None` when the value itself is pruned away. Applying it twice gives
/// the same result as applying it once.
pub fn prune_empty(value: Value) -> Option<Value> {
    match value {
        Value::Object(map) => {
            let pruned: Map<String, Value> = map
                .into_iter()
                .filter_map(|(key, value)| prune_empty(value).map(|value| (key, value)))
                .collect();
            (!pruned.is_empty()).then_some(Value::Object(pruned))
        }
        Value::Array(items) => {
            let pruned: Vec<Value> = items.into_iter().filter_map(prune_empty).collect();
            (!pruned.is_empty()).then_some(Value::Array(pruned))
        }
        Value::String(text) => (!text.trim().is_empty()).then_some(Value::String(text)),
        other => Some(other),
    }
}

/// Produces human-readable projections of records
#[derive(Debug)]
pub struct ContentScrubber {
    converter: MarkupConverter,
    exclusions: ExclusionConfig,
}

impl ContentScrubber {
    /// Scrubber with the default converter
    pub fn new(exclusions: ExclusionConfig) -> Self {
        Self::with_converter(MarkupConverter::new(), exclusions)
    }

    /// Scrubber with a custom converter
    pub fn with_converter(converter: MarkupConverter, exclusions: ExclusionConfig) -> Self {
        Self {
            converter,
            exclusions,
        }
    }

    /// Scrub a field map without the final prune pass
    pub fn scrub(&self, record: &Map<String, Value>) -> Map<String, Value> {
        let mut scrubbed = Map::new();

        for (key, value) in record {
            if self.exclusions.is_excluded_key(key) {
                continue;
            }

            let kept = match description_markup(key, value) {
                Some(markup) => self.scrub_text(markup),
                None => self.scrub_value(value),
            };

            if let Some(kept) = kept {
                scrubbed.insert(key.clone(), kept);
            }
        }

        scrubbed
    }

    /// Scrub and prune a document's fields
    pub fn scrub_document(&self, document: &Document) -> ScrubbedTree {
        ScrubbedTree::new(self.scrub(&document.fields))
    }

    fn scrub_value(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Object(inner) => {
                let nested = self.scrub(inner);
                (!nested.is_empty()).then_some(Value::Object(nested))
            }
            Value::Array(items) => {
                let kept: Vec<Value> = items
                    .iter()
                    .filter_map(|item| self.scrub_value(item))
                    .collect();
                (!kept.is_empty()).then_some(Value::Array(kept))
            }
            Value::String(markup) => self.scrub_text(markup),
            scalar => is_readable_scalar(scalar).then(|| scalar.clone()),
        }
    }

    fn scrub_text(&self, markup: &str) -> Option<Value> {
        let text = self.converter.convert(markup);

        if !is_readable_text(&text) {
            return None;
        }

        if let Some(reason) = noise_reason(&text, self.exclusions.excluded_substrings()) {
            tracing::trace!(reason = %reason, "Dropping non-prose text");
            return None;
        }

        Some(Value::String(text))
    }
}

fn description_markup<'a>(key: &str, value: &'a Value) -> Option<&'a str> {
    if key != DESCRIPTION_KEY {
        return None;
    }
    value.as_object()?.get(DESCRIPTION_VALUE_KEY)?.as_str()
}
