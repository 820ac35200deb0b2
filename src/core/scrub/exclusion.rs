//! Key and substring exclusion lists
//!
//! Both lists are user-editable as comma-separated strings and frozen into an
//! [`ExclusionConfig`] once per export run.

/// Keys dropped from the human-readable output by default
pub const DEFAULT_EXCLUDED_KEYS: &[&str] = &[
    "_id",
    "uuid",
    "key",
    "group",
    "img",
    "startingEquipment",
    "tint",
    "chris-premades",
    "betterRolls5e",
    "midi-qol",
    "magicitems",
    "prototypeToken",
    "ActiveAuras",
    "scene-packer",
    "ddbimporter",
    "dae",
    "ownership",
    "_stats",
    "sort",
    "midiProperties",
    "folder",
    "tagger",
    "flags",
    "compendiumSource",
    "duplicateSource",
    "exportSource",
    "coreVersion",
    "systemId",
    "systemVersion",
    "createdTime",
    "modifiedTime",
];

/// Substrings that disqualify converted text by default
pub const DEFAULT_EXCLUDED_SUBSTRINGS: &[&str] = &[
    "@UUID[",
    "@Embed[",
    "@Compendium[",
    "&Reference[",
    "@Check[",
    "@Damage[",
    "@Template[",
    "{{",
    "}}",
    "-----",
];

/// Split a comma-separated list, trimming entries and dropping blanks
///
/// # Examples
///
/// ```
/// use quire::core::scrub::parse_list;
///
/// assert_eq!(parse_list(" _id, flags ,,img "), vec!["_id", "flags", "img"]);
/// ```
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joined form of a default list, as written into configuration files
pub fn join_list(entries: &[&str]) -> String {
    entries.join(", ")
}

/// Excluded keys and substrings for one export run
///
/// Keys match field names exactly at any depth. Substrings are checked against
/// converted text with case-sensitive containment. Both lists keep their
/// first-seen order and ignore duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionConfig {
    excluded_keys: Vec<String>,
    excluded_substrings: Vec<String>,
}

impl ExclusionConfig {
    /// Build from explicit entries
    pub fn new<K, S>(keys: K, substrings: S) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            excluded_keys: dedupe(keys),
            excluded_substrings: dedupe(substrings),
        }
    }

    /// Build from the comma-separated configuration strings
    pub fn from_lists(keys: &str, substrings: &str) -> Self {
        Self::new(parse_list(keys), parse_list(substrings))
    }

    /// An exclusion config that keeps everything
    pub fn empty() -> Self {
        Self::new(Vec::<String>::new(), Vec::<String>::new())
    }

    /// Whether a field name is excluded
    pub fn is_excluded_key(&self, key: &str) -> bool {
        self.excluded_keys.iter().any(|k| k == key)
    }

    /// Excluded keys in configured order
    pub fn excluded_keys(&self) -> &[String] {
        &self.excluded_keys
    }

    /// Excluded substrings in configured order
    pub fn excluded_substrings(&self) -> &[String] {
        &self.excluded_substrings
    }
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXCLUDED_KEYS.iter().copied(),
            DEFAULT_EXCLUDED_SUBSTRINGS.iter().copied(),
        )
    }
}

fn dedupe<I>(entries: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.into();
        if !entry.is_empty() && !out.contains(&entry) {
            out.push(entry);
        }
    }
    out
}
