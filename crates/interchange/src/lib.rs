//! Form Interchange Format
//!
//! JSON interchange format for builder documents: the element forest plus
//! the document settings. Pure data - what you see is what's there.
//!
//! # Document Format
//!
//! ```json
//! {
//!   "version": "1",
//!   "elements": [
//!     {
//!       "id": "0b7e4f5c-...",
//!       "type": "container",
//!       "padding": { "top": 16, "right": 16, "bottom": 16, "left": 16 },
//!       "children": [
//!         { "id": "5d1c...", "type": "email", "name": "email", "required": true }
//!       ]
//!     }
//!   ],
//!   "settings": { "title": "Newsletter", "submitText": "Sign up" }
//! }
//! ```

use element::{validate_elements, Element, Settings, ValidationIssue};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use store::{ElementTree, Store, TreeError};
use thiserror::Error;

pub const FORMAT_VERSION: &str = "1";

/// Error type for interchange operations.
#[derive(Debug, Error)]
pub enum InterchangeError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported format version `{0}` (expected `1`)")]
    UnsupportedVersion(String),

    #[error("invalid element tree: {0}")]
    InvalidTree(#[from] TreeError),
}

/// A builder document that can be serialized to/from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    pub version: String,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub settings: Settings,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new(), Settings::default())
    }
}

impl Document {
    pub fn new(elements: Vec<Element>, settings: Settings) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            elements,
            settings,
        }
    }

    /// Capture a store's current document.
    pub fn from_store(store: &Store) -> Self {
        let (elements, settings) = store.snapshot();
        Self::new(elements, settings)
    }

    /// Build a store holding this document.
    pub fn into_store(self) -> Result<Store, InterchangeError> {
        Ok(Store::from_document(self.elements, self.settings)?)
    }

    /// Build just the element tree.
    pub fn tree(&self) -> Result<ElementTree, InterchangeError> {
        Ok(ElementTree::from_elements(self.elements.clone())?)
    }

    /// Document-level problems such as invalid or duplicate input names.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate_elements(&self.elements)
    }

    /// Serialize the document to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String, InterchangeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document from a JSON string.
    ///
    /// Rejects unknown format versions and documents whose element ids collide.
    pub fn from_json(input: &str) -> Result<Self, InterchangeError> {
        let doc: Document = serde_json::from_str(input)?;
        if doc.version != FORMAT_VERSION {
            return Err(InterchangeError::UnsupportedVersion(doc.version));
        }
        // Checks id uniqueness; the tree itself is rebuilt by whoever loads it.
        doc.tree()?;
        Ok(doc)
    }

    /// Load a document from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InterchangeError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| InterchangeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = Self::from_json(&input)?;
        tracing::debug!("Loaded {} root elements from {}", doc.elements.len(), path.display());
        Ok(doc)
    }

    /// Save the document to a file, replacing any existing content.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), InterchangeError> {
        let path = path.as_ref();
        let mut json = self.to_json()?;
        json.push('\n');
        std::fs::write(path, json).map_err(|source| InterchangeError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Saved document to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use element::{ElementKind, ElementPatch, SubmissionAction};
    use serde_json::json;

    fn sample_store() -> Store {
        let mut store = Store::new();
        let grid = store.add(ElementKind::Grid, None).created_id().unwrap();
        let select = store.add(ElementKind::Select, Some(grid)).created_id().unwrap();
        store.add(ElementKind::Image, Some(grid));
        store.add(ElementKind::Button, None);
        store.update(
            select,
            &ElementPatch::new()
                .set("required", true)
                .set("margin", json!({ "top": 8, "bottom": 8 })),
        );
        store.update(grid, &ElementPatch::new().set("columnBackgrounds", json!(["#fafafa", null])));
        let serde_json::Value::Object(settings) = json!({
            "title": "Order",
            "actions": [{ "type": "webhook", "url": "https://example.com/hook" }]
        }) else {
            unreachable!()
        };
        store.update_settings(&settings);
        store
    }

    #[test]
    fn test_roundtrip() {
        let store = sample_store();
        let doc = Document::from_store(&store);
        let json = doc.to_json().unwrap();

        let parsed = Document::from_json(&json).expect("Failed to parse");
        assert_eq!(parsed, doc);

        let reloaded = parsed.into_store().unwrap();
        assert_eq!(reloaded.tree(), store.tree());
        assert_eq!(reloaded.settings(), store.settings());
        assert_eq!(
            reloaded.settings().actions,
            vec![SubmissionAction::webhook("https://example.com/hook")]
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Document::from_json(r#"{ "version": "1", "elemnts": [] }"#).unwrap_err();
        assert!(matches!(err, InterchangeError::Parse(_)));
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let err = Document::from_json(r#"{ "version": "2" }"#).unwrap_err();
        assert!(matches!(err, InterchangeError::UnsupportedVersion(v) if v == "2"));
    }

    #[test]
    fn colliding_ids_are_rejected() {
        let text = Element::new(ElementKind::Text);
        let doc = Document::new(
            vec![Element::new(ElementKind::Container).with_children(vec![text.clone()]), text.clone()],
            Settings::default(),
        );
        let err = Document::from_json(&doc.to_json().unwrap()).unwrap_err();
        assert!(matches!(err, InterchangeError::InvalidTree(TreeError::DuplicateId(id)) if id == text.id));
    }

    #[test]
    fn minimal_document_takes_defaults() {
        let doc = Document::from_json(r#"{ "version": "1" }"#).unwrap();
        assert!(doc.elements.is_empty());
        assert_eq!(doc.settings, Settings::default());
    }

    #[test]
    fn save_and_load() {
        let path = std::env::temp_dir().join(format!("form-doc-{}.json", std::process::id()));
        let doc = Document::from_store(&sample_store());
        doc.save(&path).unwrap();
        let loaded = Document::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, doc);

        let missing = Document::load(path.with_extension("missing")).unwrap_err();
        assert!(matches!(missing, InterchangeError::Read { .. }));
    }
}
