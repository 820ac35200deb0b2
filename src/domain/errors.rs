//! Domain error types
//!
//! This module defines the error hierarchy for Quire.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Quire error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum QuireError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Document source errors (listing, opening the store)
    #[error("Source error: {0}")]
    Source(String),

    /// A collection exists but its index could not be built
    #[error("Failed to resolve collection: {0}")]
    Resolution(String),

    /// A single document could not be fetched
    #[error("Failed to fetch document {document_id} from {collection}: {message}")]
    Fetch {
        collection: String,
        document_id: String,
        message: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Archive assembly errors
    #[error("Archive error: {0}")]
    Archive(String),

    /// Delivering a finished archive failed
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl QuireError {
    /// Build a fetch error for a document in a collection
    pub fn fetch(
        collection: impl Into<String>,
        document_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Fetch {
            collection: collection.into(),
            document_id: document_id.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for QuireError {
    fn from(err: std::io::Error) -> Self {
        QuireError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for QuireError {
    fn from(err: serde_json::Error) -> Self {
        QuireError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for QuireError {
    fn from(err: serde_yaml::Error) -> Self {
        QuireError::Serialization(format!("YAML: {err}"))
    }
}

impl From<zip::result::ZipError> for QuireError {
    fn from(err: zip::result::ZipError) -> Self {
        QuireError::Archive(err.to_string())
    }
}

impl From<toml::de::Error> for QuireError {
    fn from(err: toml::de::Error) -> Self {
        QuireError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quire_error_display() {
        let err = QuireError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_fetch_error_display() {
        let err = QuireError::fetch("dnd5e.items", "abc123", "not found");
        assert_eq!(
            err.to_string(),
            "Failed to fetch document abc123 from dnd5e.items: not found"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: QuireError = io_err.into();
        assert!(matches!(err, QuireError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: QuireError = json_err.into();
        assert!(matches!(err, QuireError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: QuireError = toml_err.into();
        assert!(matches!(err, QuireError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_quire_error_implements_std_error() {
        let err = QuireError::Archive("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
