//! Document domain model
//!
//! A document is one exportable record: an id, an optional display name, an
//! optional kind tag and an arbitrary tree of fields.

use super::ids::DocumentId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder used when a document carries no display name
pub const DEFAULT_DOCUMENT_NAME: &str = "Unnamed";

/// Placeholder used when a document carries no kind tag
pub const DEFAULT_DOCUMENT_KIND: &str = "UnknownType";

/// One exportable record from a collection
///
/// `fields` is the plain data form of the record. It is what the YAML and JSON
/// outputs serialize verbatim and what the scrubber walks for TXT output.
///
/// # Examples
///
/// ```
/// use quire::domain::document::DocumentBuilder;
/// use quire::domain::ids::DocumentId;
/// use serde_json::json;
///
/// let document = DocumentBuilder::new()
///     .id(DocumentId::new("abc123").unwrap())
///     .name("Longsword")
///     .kind("Item")
///     .fields(json!({"name": "Longsword", "system": {"weight": 3}}))
///     .build()
///     .unwrap();
///
/// assert_eq!(document.display_name(), "Longsword");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier, unique within its collection
    pub id: DocumentId,

    /// Display name, if the record has one
    pub name: Option<String>,

    /// Document type tag (e.g. `Item`, `Actor`)
    pub kind: Option<String>,

    /// The record's field tree
    pub fields: Map<String, Value>,
}

impl Document {
    /// Creates a new builder for constructing a Document
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// Display name, or the placeholder when absent or blank
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_DOCUMENT_NAME,
        }
    }

    /// Kind tag, or the placeholder when absent or blank
    pub fn display_kind(&self) -> &str {
        match self.kind.as_deref() {
            Some(kind) if !kind.is_empty() => kind,
            _ => DEFAULT_DOCUMENT_KIND,
        }
    }
}

/// Builder for constructing Document instances
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    id: Option<DocumentId>,
    name: Option<String>,
    kind: Option<String>,
    fields: Option<Value>,
}

impl DocumentBuilder {
    /// Creates a new DocumentBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document id
    pub fn id(mut self, id: DocumentId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the display name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the kind tag
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Sets the field tree; must be a JSON object
    pub fn fields(mut self, fields: Value) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Builds the Document
    ///
    /// # Errors
    ///
    /// Returns an error if the id is missing or the fields are not an object.
    /// Missing fields default to an empty object.
    pub fn build(self) -> Result<Document, String> {
        let fields = match self.fields {
            None => Map::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(format!(
                    "document fields must be an object, got {}",
                    value_kind(&other)
                ))
            }
        };

        Ok(Document {
            id: self.id.ok_or("id is required")?,
            name: self.name,
            kind: self.kind,
            fields,
        })
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(value: &str) -> DocumentId {
        DocumentId::new(value).unwrap()
    }

    #[test]
    fn test_builder_complete() {
        let doc = DocumentBuilder::new()
            .id(id("d1"))
            .name("Fireball")
            .kind("Item")
            .fields(json!({"name": "Fireball"}))
            .build()
            .unwrap();

        assert_eq!(doc.id.as_str(), "d1");
        assert_eq!(doc.display_name(), "Fireball");
        assert_eq!(doc.display_kind(), "Item");
        assert_eq!(Value::Object(doc.fields), json!({"name": "Fireball"}));
    }

    #[test]
    fn test_builder_missing_id() {
        let result = DocumentBuilder::new().name("x").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_non_object_fields() {
        let result = DocumentBuilder::new().id(id("d1")).fields(json!([1, 2])).build();
        assert_eq!(
            result.unwrap_err(),
            "document fields must be an object, got array"
        );
    }

    #[test]
    fn test_display_placeholders() {
        let doc = Document::builder().id(id("d1")).name("").build().unwrap();
        assert_eq!(doc.display_name(), DEFAULT_DOCUMENT_NAME);
        assert_eq!(doc.display_kind(), DEFAULT_DOCUMENT_KIND);
        assert!(doc.fields.is_empty());
    }
}
