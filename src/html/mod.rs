//! HTML import.
//!
//! Converts pasted or loaded HTML into document nodes: block tags become
//! elements, inline style tags become marks on text runs, and anything
//! unrecognized is unwrapped so its text survives.

mod deserialize;
mod dom;
mod options;
mod parse;
mod tags;

pub use deserialize::{deserialize, deserialize_with_options, resolve, Child, Deserialized};
pub use dom::{HtmlElement, HtmlNode};
pub use options::ImportOptions;
pub use parse::{parse_document, parse_document_with_options};
pub use tags::{element_kind, text_mark};

use std::path::Path;

use crate::error::Result;
use crate::model::{Document, Node};

/// Import an already-parsed HTML node as a list of document nodes.
pub fn import_fragment(node: &HtmlNode, options: &ImportOptions) -> Vec<Node> {
    deserialize_with_options(node, options).into_nodes()
}

/// Parse an HTML string and import its body as a document.
pub fn import_html(html: &str) -> Document {
    import_html_with_options(html, &ImportOptions::default())
}

/// Parse an HTML string and import its body with custom options.
pub fn import_html_with_options(html: &str, options: &ImportOptions) -> Document {
    let body = parse_document_with_options(html, options);
    let nodes = import_fragment(&body, options);
    log::debug!("imported {} top-level nodes", nodes.len());
    Document::from_nodes(nodes)
}

/// Read an HTML file and import it as a document.
pub fn import_html_file<P: AsRef<Path>>(path: P, options: &ImportOptions) -> Result<Document> {
    let html = std::fs::read_to_string(path.as_ref())?;
    Ok(import_html_with_options(&html, options))
}
