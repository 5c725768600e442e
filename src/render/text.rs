//! Plain text rendering for documents.

use crate::error::Result;
use crate::model::Document;

/// Convert a document to plain text: one line per top-level block, marks
/// and element attributes dropped.
pub fn to_text(doc: &Document) -> Result<String> {
    Ok(doc.plain_text().trim_end().to_string())
}
