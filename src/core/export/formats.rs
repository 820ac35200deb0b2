//! Output formats and per-document entry rendering

use crate::config::schema::FormatsConfig;
use crate::core::export::naming::entry_stem;
use crate::core::scrub::ContentScrubber;
use crate::domain::{Document, Result};
use std::fmt;

/// One output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Raw YAML dump of the document fields
    Yaml,
    /// Raw pretty-printed JSON of the document fields
    Json,
    /// Scrubbed human-readable text
    Txt,
}

impl OutputFormat {
    /// Entry file extension
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Yaml => "yaml",
            OutputFormat::Json => "json",
            OutputFormat::Txt => "txt",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Which formats an export run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportFormats {
    pub yaml: bool,
    pub json: bool,
    pub txt: bool,
}

impl ExportFormats {
    /// Whether at least one format is enabled
    pub fn any(&self) -> bool {
        self.yaml || self.json || self.txt
    }

    /// Enabled formats in entry order
    pub fn enabled(&self) -> Vec<OutputFormat> {
        [
            (self.yaml, OutputFormat::Yaml),
            (self.json, OutputFormat::Json),
            (self.txt, OutputFormat::Txt),
        ]
        .into_iter()
        .filter_map(|(on, format)| on.then_some(format))
        .collect()
    }
}

impl fmt::Display for ExportFormats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.enabled().into_iter().map(OutputFormat::extension).collect();
        f.write_str(&names.join(", "))
    }
}

impl Default for ExportFormats {
    fn default() -> Self {
        Self {
            yaml: true,
            json: false,
            txt: false,
        }
    }
}

impl From<&FormatsConfig> for ExportFormats {
    fn from(config: &FormatsConfig) -> Self {
        Self {
            yaml: config.yaml,
            json: config.json,
            txt: config.txt,
        }
    }
}

/// A named archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub content: Vec<u8>,
}

/// Renders a document into one entry per enabled format
#[derive(Debug)]
pub struct EntryRenderer {
    formats: ExportFormats,
    scrubber: ContentScrubber,
}

impl EntryRenderer {
    pub fn new(formats: ExportFormats, scrubber: ContentScrubber) -> Self {
        Self { formats, scrubber }
    }

    /// Render every enabled format for `document`
    ///
    /// # Errors
    ///
    /// Returns a serialization error if YAML or JSON encoding fails.
    pub fn render(&self, document: &Document) -> Result<Vec<Entry>> {
        let stem = entry_stem(document);

        self.formats
            .enabled()
            .into_iter()
            .map(|format| {
                Ok(Entry {
                    name: format!("{stem}.{}", format.extension()),
                    content: self.render_format(document, format)?,
                })
            })
            .collect()
    }

    fn render_format(&self, document: &Document, format: OutputFormat) -> Result<Vec<u8>> {
        let text = match format {
            OutputFormat::Yaml => serde_yaml::to_string(&document.fields)?,
            OutputFormat::Json => serde_json::to_string_pretty(&document.fields)?,
            OutputFormat::Txt => self.scrubber.scrub_document(document).to_txt(),
        };
        Ok(text.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scrub::ExclusionConfig;
    use crate::domain::DocumentId;
    use serde_json::json;

    fn document() -> Document {
        Document::builder()
            .id(DocumentId::new("abc").unwrap())
            .name("Rope, Hempen")
            .kind("Item")
            .fields(json!({
                "_id": "abc",
                "name": "Rope, Hempen",
                "system": {"description": {"value": "<p>50 feet of rope.</p>"}, "weight": 10}
            }))
            .build()
            .unwrap()
    }

    fn renderer(formats: ExportFormats) -> EntryRenderer {
        EntryRenderer::new(formats, ContentScrubber::new(ExclusionConfig::default()))
    }

    #[test]
    fn test_enabled_order() {
        let formats = ExportFormats {
            yaml: true,
            json: true,
            txt: true,
        };
        assert_eq!(
            formats.enabled(),
            vec![OutputFormat::Yaml, OutputFormat::Json, OutputFormat::Txt]
        );
        assert!(formats.any());
        assert_eq!(formats.to_string(), "yaml, json, txt");

        let none = ExportFormats {
            yaml: false,
            json: false,
            txt: false,
        };
        assert!(!none.any());
        assert!(none.enabled().is_empty());
    }

    #[test]
    fn test_default_is_yaml_only() {
        assert_eq!(ExportFormats::default().enabled(), vec![OutputFormat::Yaml]);
    }

    #[test]
    fn test_render_all_formats() {
        let entries = renderer(ExportFormats {
            yaml: true,
            json: true,
            txt: true,
        })
        .render(&document())
        .unwrap();

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Rope__Hempen_Item_abc.yaml",
                "Rope__Hempen_Item_abc.json",
                "Rope__Hempen_Item_abc.txt"
            ]
        );

        let yaml = String::from_utf8(entries[0].content.clone()).unwrap();
        assert!(yaml.contains("_id: abc"));

        let json: serde_json::Value = serde_json::from_slice(&entries[1].content).unwrap();
        assert_eq!(json["system"]["weight"], 10);

        let txt = String::from_utf8(entries[2].content.clone()).unwrap();
        assert_eq!(
            txt,
            "name: Rope, Hempen\nsystem:\n  description: 50 feet of rope.\n  weight: 10"
        );
    }

    #[test]
    fn test_txt_of_fully_excluded_document_is_empty() {
        let document = Document::builder()
            .id(DocumentId::new("x").unwrap())
            .fields(json!({"_id": "x", "flags": {}, "system": {"a": {}}}))
            .build()
            .unwrap();

        let entries = renderer(ExportFormats {
            yaml: false,
            json: false,
            txt: true,
        })
        .render(&document)
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].content.is_empty());
    }
}
