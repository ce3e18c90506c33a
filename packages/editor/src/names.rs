//! Name properties: which attribute names an element, per document type.

use crate::path_config::PathConfig;
use serde::{Deserialize, Serialize};

/// `document type → element type → attribute` lookup table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameProperties {
    config: PathConfig<String>,
}

impl NameProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: PathConfig<String>) -> Self {
        Self { config }
    }

    /// Attribute holding the display name of `element_type` elements
    pub fn attribute_for(&self, doc_type: &str, element_type: &str) -> Option<&str> {
        self.config
            .get(&[doc_type, element_type])
            .map(String::as_str)
    }

    pub fn set_attribute(
        &mut self,
        doc_type: &str,
        element_type: &str,
        attribute: impl Into<String>,
    ) {
        self.config
            .insert(&[doc_type, element_type], attribute.into());
    }

    /// Element-type mapping for one document type
    pub fn for_document_type(&self, doc_type: &str) -> Option<&PathConfig<String>> {
        self.config.subtree(&[doc_type])
    }

    pub fn config(&self) -> &PathConfig<String> {
        &self.config
    }

    pub fn is_empty(&self) -> bool {
        self.config.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_look_up_attribute() {
        let mut names = NameProperties::new();
        names.set_attribute("glossary", "entry", "term");
        names.set_attribute("glossary", "section", "id");
        names.set_attribute("book", "chapter", "label");

        assert_eq!(names.attribute_for("glossary", "entry"), Some("term"));
        assert_eq!(names.attribute_for("glossary", "section"), Some("id"));
        assert_eq!(names.attribute_for("book", "chapter"), Some("label"));
        assert_eq!(names.attribute_for("book", "entry"), None);
        assert_eq!(names.attribute_for("html", "li"), None);
    }

    #[test]
    fn test_for_document_type() {
        let mut names = NameProperties::new();
        names.set_attribute("glossary", "entry", "term");

        let naming = names.for_document_type("glossary").unwrap();
        assert_eq!(naming.get(&["entry"]).map(String::as_str), Some("term"));
        assert!(names.for_document_type("book").is_none());
    }

    #[test]
    fn test_serializes_as_nested_objects() {
        let mut names = NameProperties::new();
        names.set_attribute("glossary", "entry", "term");

        let json = serde_json::to_string(&names).unwrap();
        assert_eq!(json, r#"{"glossary":{"entry":"term"}}"#);

        let parsed: NameProperties = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, names);
    }
}
