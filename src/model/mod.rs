//! Document model types for rich-text content.
//!
//! The model is a tree: elements (paragraphs, headings, lists, links, ...)
//! hold ordered children, and text runs are leaves carrying a string plus
//! flat formatting marks. It serializes to the JSON shape used by browser
//! rich-text editors, so imported fragments can be handed to a host editor
//! as-is.

mod document;
mod node;
mod text;

pub use document::{Document, DocumentStats, Path};
pub use node::{Alignment, Element, ElementKind, Node};
pub use text::{Mark, Marks, TextRun};
