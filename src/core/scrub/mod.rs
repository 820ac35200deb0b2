//! Human-readable projection of documents
//!
//! The pipeline for TXT output is: convert markup to text, classify what is
//! readable prose, drop excluded keys, prune what is left empty, then render
//! indented `key: value` lines.
//!
//! ```
//! use quire::core::scrub::MarkupConverter;
//!
//! let converter = MarkupConverter::new();
//! assert_eq!(
//!     converter.convert("<p>Roll</p><p>[[/r 1d20]] to hit</p>"),
//!     "Roll [/r 1d20] to hit"
//! );
//! ```

pub mod classifier;
pub mod exclusion;
pub mod markup;
pub mod scrubber;
pub mod text;

pub use classifier::{
    is_natural_language, is_readable_number, is_readable_scalar, is_readable_text, noise_reason,
    NoiseReason,
};
pub use exclusion::{
    join_list, parse_list, ExclusionConfig, DEFAULT_EXCLUDED_KEYS, DEFAULT_EXCLUDED_SUBSTRINGS,
};
pub use markup::{
    MarkupConverter, MarkupError, MarkupParser, RegexFallbackParser, StructuralParser,
};
pub use scrubber::{prune_empty, ContentScrubber, ScrubbedTree};
pub use text::render_txt;
