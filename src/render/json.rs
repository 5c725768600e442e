//! JSON rendering for documents.
//!
//! The output is the node-tree shape browser rich-text editors load
//! directly: `{"type": ..., "children": [...]}` for elements and
//! `{"text": ..., "bold": true}` for text runs.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Parse a document from its JSON form.
pub fn from_json(json: &str) -> Result<Document> {
    serde_json::from_str(json).map_err(|e| Error::Render(format!("JSON parse error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, Node, TextRun};

    fn sample() -> Document {
        Document::from_nodes(vec![Node::Element(Element::new(
            crate::model::ElementKind::Paragraph,
            vec![Node::text("Hello "), Node::Text(TextRun::bold("world"))],
        ))])
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"type\": \"paragraph\""));
        assert!(json.contains("\"bold\": true"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"[{"type":"paragraph","children":[{"text":"Hello "},{"text":"world","bold":true}]}]"#
        );
    }

    #[test]
    fn test_from_json() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert_eq!(from_json(&json).unwrap(), sample());
        assert!(matches!(from_json("{"), Err(Error::Render(_))));
    }

    #[test]
    fn test_from_json_pads_childless_element() {
        let doc = from_json(r#"[{"type":"paragraph","children":[]}]"#).unwrap();
        assert_eq!(doc, Document::from_nodes(vec![Node::Element(Element::paragraph(""))]));

        let doc = from_json(r#"[{"type":"quote","children":[{"type":"link","url":"x","children":[]}]}]"#)
            .unwrap();
        let link = doc.children[0].children()[0].as_element().unwrap();
        assert_eq!(link.children, vec![Node::text("")]);

        let mut editor = crate::editor::Editor::new(doc);
        assert!(editor.select_end().is_ok());
    }
}
