//! Reading documents from JSON and TOML.

use std::io::Read;
use std::path::Path;
use tracing::debug;

use super::DialogueDocument;
use crate::error::DocumentError;

/// Supported document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(DocumentFormat::Json),
            "toml" => Some(DocumentFormat::Toml),
            _ => None,
        }
    }
}

impl DialogueDocument {
    /// Parse a document from a JSON string.
    pub fn from_json_str(input: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parse a document from a TOML string.
    pub fn from_toml_str(input: &str) -> Result<Self, DocumentError> {
        Ok(toml::from_str(input)?)
    }

    /// Parse a document from a JSON reader.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, DocumentError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse a document in the given format.
    pub fn parse(input: &str, format: DocumentFormat) -> Result<Self, DocumentError> {
        match format {
            DocumentFormat::Json => Self::from_json_str(input),
            DocumentFormat::Toml => Self::from_toml_str(input),
        }
    }

    /// Load a document from disk, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)
            .ok_or_else(|| DocumentError::UnsupportedFormat(path.to_path_buf()))?;

        let input = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let document = Self::parse(&input, format)?;
        debug!(
            path = %path.display(),
            prompts = document.prompts.len(),
            defaults = document.defaults.len(),
            "loaded dialogue document"
        );
        Ok(document)
    }

    /// Serialize the document as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PromptText;
    use crate::graph::PromptId;
    use std::io::Write;

    const JSON: &str = r#"{
        "defaults": {"trust": 2},
        "prompts": [
            {
                "id": 0,
                "text": [["Guard", "Halt!"], ["Guard", "State your business."]],
                "responses": [
                    {
                        "text": "Just passing through.",
                        "effects": [{"variable": "trust", "operation": "+", "value": 1}],
                        "transitions": [{"target": 1, "conditions": []}]
                    }
                ]
            },
            {"id": 1, "text": "The gate opens."}
        ]
    }"#;

    const TOML: &str = r#"
        [defaults]
        trust = 2

        [[prompts]]
        id = 0
        text = [["Guard", "Halt!"], ["Guard", "State your business."]]

        [[prompts.responses]]
        text = "Just passing through."
        effects = [{ variable = "trust", operation = "+", value = 1 }]
        transitions = [{ target = 1 }]

        [[prompts]]
        id = 1
        text = "The gate opens."
    "#;

    #[test]
    fn test_from_json() {
        let doc = DialogueDocument::from_json_str(JSON).unwrap();
        assert_eq!(doc.defaults.get("trust"), Some(&2));
        assert_eq!(doc.prompts.len(), 2);
        assert!(matches!(&doc.prompts[0].text, PromptText::Lines(lines) if lines.len() == 2));
        assert_eq!(doc.prompts[1].text, PromptText::Plain("The gate opens.".to_string()));
        assert!(doc.prompts[1].responses.is_empty());
    }

    #[test]
    fn test_json_and_toml_agree() {
        let json = DialogueDocument::from_json_str(JSON).unwrap();
        let toml = DialogueDocument::from_toml_str(TOML).unwrap();

        assert_eq!(json.defaults, toml.defaults);
        assert_eq!(json.prompts.len(), toml.prompts.len());
        assert_eq!(json.prompts[0].text, toml.prompts[0].text);
        assert_eq!(
            json.prompts[0].responses[0].transitions[0].target,
            toml.prompts[0].responses[0].transitions[0].target
        );
    }

    #[test]
    fn test_missing_required_field() {
        let result = DialogueDocument::from_json_str(
            r#"{"prompts": [{"id": 0, "text": "Hi", "responses": [{"text": "Bye"}]}]}"#,
        );
        assert!(matches!(result, Err(DocumentError::Json(_))));
    }

    #[test]
    fn test_unknown_operator() {
        let result = DialogueDocument::from_json_str(
            r#"{"prompts": [{"id": 0, "text": "Hi", "responses": [{
                "text": "Bye",
                "preconditions": [{"variable": "x", "operation": "!=", "value": 1}],
                "transitions": [{"target": -1}]
            }]}]}"#,
        );
        let err = result.unwrap_err();
        assert!(matches!(err, DocumentError::Json(_)));
        assert!(err.to_string().contains("unknown operator `!=`"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(JSON.as_bytes()).unwrap();

        let doc = DialogueDocument::load(file.path()).unwrap();
        assert_eq!(doc.prompts[0].id, PromptId::ENTRY);
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(TOML.as_bytes()).unwrap();

        let doc = DialogueDocument::load(file.path()).unwrap();
        assert_eq!(doc.prompts.len(), 2);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            DialogueDocument::load(file.path()),
            Err(DocumentError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            DialogueDocument::load("/nonexistent/dialogue.json"),
            Err(DocumentError::Io { .. })
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_shape() {
        let doc = DialogueDocument::from_json_str(JSON).unwrap();
        let again = DialogueDocument::from_json_str(&doc.to_json_string().unwrap()).unwrap();
        assert_eq!(again.prompts[0].text, doc.prompts[0].text);
    }
}
