//! Archive and entry file names

use crate::domain::{CollectionKey, Document};

/// Replacement for a name that sanitizes to nothing
pub const PLACEHOLDER_NAME: &str = "Unnamed";

/// Longest sanitized name part, in characters
pub const MAX_NAME_PART_CHARS: usize = 255;

/// Make a string safe to embed in a file name
///
/// Every character outside `[A-Za-z0-9_-]` becomes `_`, the result is cut to
/// [`MAX_NAME_PART_CHARS`] characters, and an empty result becomes
/// [`PLACEHOLDER_NAME`].
///
/// # Examples
///
/// ```
/// use quire::core::export::sanitize_filename_part;
///
/// assert_eq!(sanitize_filename_part("Potion of Healing (Greater)"), "Potion_of_Healing__Greater_");
/// assert_eq!(sanitize_filename_part(""), "Unnamed");
/// ```
pub fn sanitize_filename_part(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_PART_CHARS)
        .collect();

    if sanitized.is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        sanitized
    }
}

/// `{name}_{kind}_{id}` stem shared by all of a document's entries
///
/// The id is used verbatim; it is what keeps entry names unique.
pub fn entry_stem(document: &Document) -> String {
    format!(
        "{}_{}_{}",
        sanitize_filename_part(document.display_name()),
        sanitize_filename_part(document.display_kind()),
        document.id
    )
}

/// `{collection}_batch_{n}.{extension}`
pub fn archive_file_name(collection: &CollectionKey, batch_number: u32, extension: &str) -> String {
    format!(
        "{}_batch_{batch_number}.{extension}",
        sanitize_filename_part(collection.as_str())
    )
}
