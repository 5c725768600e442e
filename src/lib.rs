//! # markleaf
//!
//! Rich-text document model with HTML paste import and Markdown decoration
//! ranges.
//!
//! This library turns pasted HTML into an editor's node tree, tokenizes
//! text leaves against a Markdown grammar to produce highlight ranges, and
//! provides a cursor-based editor whose behaviour is extended by plugins.
//!
//! ## Quick Start
//!
//! ```
//! use markleaf::{decorate_text, import_html, render};
//!
//! fn main() -> markleaf::Result<()> {
//!     // Import pasted HTML
//!     let doc = import_html("<h1>Hello</h1><p>Some <strong>bold</strong> text</p>");
//!     assert_eq!(doc.children.len(), 2);
//!
//!     // Convert to Markdown
//!     let markdown = render::to_markdown(&doc, &render::RenderOptions::default())?;
//!     assert_eq!(markdown, "# Hello\n\nSome **bold** text");
//!
//!     // Highlight Markdown syntax inside a text leaf
//!     let ranges = decorate_text("Some **bold** text");
//!     assert_eq!(ranges[0].mark_type, "bold");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **HTML import**: block tags become elements, style tags become marks
//! - **Decorations**: Markdown syntax ranges per text leaf, in characters
//! - **Editor plugins**: paste handling, images, mentions, tables, check lists
//! - **Multiple output formats**: Markdown, HTML, plain text, JSON
//! - **Parallel processing**: Uses Rayon to decorate whole documents

pub mod decorate;
pub mod detect;
pub mod editor;
pub mod error;
pub mod html;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use decorate::{decorate, decorate_text, DecorationRange, Decorator, Grammar, LeafDecorations};
pub use detect::{is_image_url, is_url};
pub use editor::{
    BlockFormat, DataTransfer, DroppedFile, Editor, EditorBuilder, EditorPlugin, PluginAction,
    Point,
};
pub use error::{Error, Result};
pub use html::{import_html, import_html_file, import_html_with_options, ImportOptions};
pub use model::{
    Alignment, Document, DocumentStats, Element, ElementKind, Mark, Marks, Node, Path, TextRun,
};
pub use render::{JsonFormat, RenderOptions};

use std::path::Path as FsPath;

/// Convert HTML to Markdown.
///
/// # Example
///
/// ```
/// use markleaf::html_to_markdown;
///
/// let markdown = html_to_markdown("<ul><li>one</li><li>two</li></ul>").unwrap();
/// assert_eq!(markdown, "- one\n- two");
/// ```
pub fn html_to_markdown(html: &str) -> Result<String> {
    let doc = import_html(html);
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Convert HTML to the editor's JSON node tree.
///
/// # Example
///
/// ```
/// use markleaf::{html_to_json, JsonFormat};
///
/// let json = html_to_json("<p>hi</p>", JsonFormat::Compact).unwrap();
/// assert_eq!(json, r#"[{"type":"paragraph","children":[{"text":"hi"}]}]"#);
/// ```
pub fn html_to_json(html: &str, format: JsonFormat) -> Result<String> {
    let doc = import_html(html);
    render::to_json(&doc, format)
}

/// Read an HTML file and convert it to Markdown.
///
/// ```no_run
/// let markdown = markleaf::html_file_to_markdown("pasted.html").unwrap();
/// std::fs::write("output.md", markdown).unwrap();
/// ```
pub fn html_file_to_markdown<P: AsRef<FsPath>>(path: P) -> Result<String> {
    let doc = import_html_file(path, &ImportOptions::default())?;
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Builder for importing and converting HTML documents.
///
/// # Example
///
/// ```
/// use markleaf::Markleaf;
///
/// let result = Markleaf::new()
///     .drop_whitespace()
///     .with_list_marker('*')
///     .import("<ul>\n<li>a</li>\n</ul>");
/// assert_eq!(result.to_markdown()?, "* a");
/// # Ok::<(), markleaf::Error>(())
/// ```
pub struct Markleaf {
    import_options: ImportOptions,
    render_options: RenderOptions,
}

impl Markleaf {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            import_options: ImportOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Drop whitespace-only text between top-level blocks.
    pub fn drop_whitespace(mut self) -> Self {
        self.import_options = self.import_options.with_drop_whitespace_text(true);
        self
    }

    /// Set the nesting depth past which HTML is imported as text only.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.import_options = self.import_options.with_max_depth(depth);
        self
    }

    /// Set the Markdown list marker.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.render_options = self.render_options.with_list_marker(marker);
        self
    }

    /// Escape special characters in Markdown output.
    pub fn with_escape(mut self) -> Self {
        self.render_options = self.render_options.with_escape(true);
        self
    }

    /// Import an HTML string.
    pub fn import(self, html: &str) -> MarkleafResult {
        MarkleafResult {
            document: import_html_with_options(html, &self.import_options),
            render_options: self.render_options,
        }
    }

    /// Import an HTML file.
    pub fn import_file<P: AsRef<FsPath>>(self, path: P) -> Result<MarkleafResult> {
        let document = import_html_file(path, &self.import_options)?;
        Ok(MarkleafResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Markleaf {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of importing an HTML document.
pub struct MarkleafResult {
    /// The imported document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl MarkleafResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to HTML.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Decoration ranges for every text leaf that has any.
    pub fn decorations(&self) -> Vec<LeafDecorations> {
        Decorator::new().decorate_document(&self.document)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
