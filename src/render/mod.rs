//! Rendering module for converting documents to various output formats.

mod html;
mod json;
mod markdown;
mod options;
mod text;

pub use html::to_html;
pub use json::{from_json, to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::RenderOptions;
pub use text::to_text;
