//! Rich-text editor core.
//!
//! [`Editor`] owns a [`Document`], a collapsed cursor and the marks queued
//! for the next insertion. Behaviour that differs between setups (which
//! elements are inline or void, what a paste does, how deletion treats
//! tables or check lists) comes from [`EditorPlugin`]s chosen once, when the
//! editor is built.
//!
//! # Example
//!
//! ```
//! use markleaf::editor::{BlockFormat, Editor, Tables};
//! use markleaf::model::{Document, Element, ElementKind, Node};
//!
//! let doc = Document::from_nodes(vec![Node::Element(Element::paragraph("Hello"))]);
//! let mut editor = Editor::builder().document(doc).plugin(Tables).build();
//!
//! editor.select_end().unwrap();
//! editor.insert_text(" world").unwrap();
//! editor.toggle_block(BlockFormat::Kind(ElementKind::HeadingOne)).unwrap();
//!
//! let heading = editor.document().children[0].as_element().unwrap();
//! assert_eq!(heading.kind, ElementKind::HeadingOne);
//! assert_eq!(heading.plain_text(), "Hello world");
//! ```

mod format;
mod plugin;
mod plugins;
mod transforms;

pub use format::{hotkey_mark, BlockFormat, HOTKEYS};
pub use plugin::{DataTransfer, DroppedFile, EditorPlugin, PluginAction};
pub use plugins::{
    insert_image, insert_mention, standard_plugins, Checklists, HtmlPaste, Images, Mentions,
    Tables,
};

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Document, Element, Marks, Node, Path, TextRun};

/// A cursor position: a text leaf and a character offset into it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Path of the text leaf
    pub path: Path,

    /// Offset in characters
    pub offset: usize,
}

impl Point {
    /// Create a new point.
    pub fn new(path: Path, offset: usize) -> Self {
        Self { path, offset }
    }
}

/// An editable document with a cursor and a fixed plugin chain.
pub struct Editor {
    document: Document,
    selection: Option<Point>,
    marks: Option<Marks>,
    plugins: Arc<[Box<dyn EditorPlugin>]>,
}

impl Editor {
    /// Create an editor without plugins.
    pub fn new(document: Document) -> Self {
        Self::builder().document(document).build()
    }

    /// Start building an editor.
    pub fn builder() -> EditorBuilder {
        EditorBuilder::new()
    }

    /// The document being edited.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consume the editor and return its document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Current cursor.
    pub fn selection(&self) -> Option<&Point> {
        self.selection.as_ref()
    }

    /// Names of the registered plugins, in dispatch order.
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    /// Move the cursor. Queued marks are dropped.
    pub fn select(&mut self, point: Point) -> Result<()> {
        let run = self.leaf(&point.path)?;
        let len = run.char_len();
        if point.offset > len {
            return Err(Error::OffsetOutOfRange {
                offset: point.offset,
                len,
            });
        }
        self.move_cursor(point);
        Ok(())
    }

    /// Move the cursor to the end of the document.
    pub fn select_end(&mut self) -> Result<()> {
        let last = self
            .document
            .children
            .len()
            .checked_sub(1)
            .ok_or_else(|| Error::InvalidPath("document is empty".to_string()))?;
        let point = self.end_of(&[last])?;
        self.select(point)
    }

    /// Remove the cursor.
    pub fn deselect(&mut self) {
        self.selection = None;
        self.marks = None;
    }

    /// First position inside the node at `path`.
    pub fn start_of(&self, path: &[usize]) -> Result<Point> {
        let mut path = path.to_vec();
        loop {
            match self.document.node(&path) {
                Some(Node::Text(_)) => return Ok(Point::new(path, 0)),
                Some(Node::Element(_)) => path.push(0),
                None => return Err(invalid_path(&path)),
            }
        }
    }

    /// Last position inside the node at `path`.
    pub fn end_of(&self, path: &[usize]) -> Result<Point> {
        let mut path = path.to_vec();
        loop {
            match self.document.node(&path) {
                Some(Node::Text(run)) => return Ok(Point::new(path, run.char_len())),
                Some(Node::Element(element)) => path.push(element.children.len().saturating_sub(1)),
                None => return Err(invalid_path(&path)),
            }
        }
    }

    /// Whether an element flows inline with text. Defaults to false.
    pub fn is_inline(&self, element: &Element) -> bool {
        self.opinion(|plugin| plugin.is_inline(element))
            .unwrap_or(false)
    }

    /// Whether an element is void. Defaults to false.
    pub fn is_void(&self, element: &Element) -> bool {
        self.opinion(|plugin| plugin.is_void(element))
            .unwrap_or(false)
    }

    /// Whether a void element carries marks. Defaults to false.
    pub fn is_markable_void(&self, element: &Element) -> bool {
        self.opinion(|plugin| plugin.is_markable_void(element))
            .unwrap_or(false)
    }

    /// Path of the lowest block containing the cursor.
    pub fn block_path(&self) -> Option<Path> {
        let point = self.selection.as_ref()?;
        self.block_of(&point.path)
    }

    /// Path of the nearest element above the cursor matching `predicate`.
    pub fn above(&self, predicate: impl Fn(&Element) -> bool) -> Option<Path> {
        let point = self.selection.as_ref()?;
        self.ancestor_where(&point.path, predicate)
    }

    /// Check if the cursor sits at the first position inside `path`.
    pub fn is_at_start_of(&self, path: &[usize]) -> bool {
        match (&self.selection, self.start_of(path)) {
            (Some(point), Ok(start)) => *point == start,
            _ => false,
        }
    }

    /// Check if the cursor sits at the last position inside `path`.
    pub fn is_at_end_of(&self, path: &[usize]) -> bool {
        match (&self.selection, self.end_of(path)) {
            (Some(point), Ok(end)) => *point == end,
            _ => false,
        }
    }

    /// Split the current block at the cursor (enter key).
    pub fn insert_break(&mut self) -> Result<()> {
        if self.dispatch("insert_break", |plugin, editor| plugin.insert_break(editor))? {
            return Ok(());
        }
        self.split_at_cursor()
    }

    /// Delete one character before the cursor (backspace).
    pub fn delete_backward(&mut self) -> Result<()> {
        if self.dispatch("delete_backward", |plugin, editor| {
            plugin.delete_backward(editor)
        })? {
            return Ok(());
        }
        self.delete_char_backward()
    }

    /// Delete one character after the cursor.
    pub fn delete_forward(&mut self) -> Result<()> {
        if self.dispatch("delete_forward", |plugin, editor| {
            plugin.delete_forward(editor)
        })? {
            return Ok(());
        }
        self.delete_char_forward()
    }

    /// Insert pasted or dropped data. Without a plugin taking it, the plain
    /// text is inserted line by line.
    pub fn insert_data(&mut self, data: &DataTransfer) -> Result<()> {
        if self.dispatch("insert_data", |plugin, editor| {
            plugin.insert_data(editor, data)
        })? {
            return Ok(());
        }
        self.insert_text_data(data)
    }

    fn opinion(&self, ask: impl Fn(&dyn EditorPlugin) -> Option<bool>) -> Option<bool> {
        self.plugins.iter().find_map(|plugin| ask(plugin.as_ref()))
    }

    /// Run a hook through the plugin chain. Returns true once a plugin
    /// handled it.
    fn dispatch(
        &mut self,
        operation: &str,
        hook: impl Fn(&dyn EditorPlugin, &mut Editor) -> Result<PluginAction>,
    ) -> Result<bool> {
        let plugins = Arc::clone(&self.plugins);
        for plugin in plugins.iter() {
            if hook(plugin.as_ref(), self)?.is_handled() {
                log::debug!("{} handled by {}", operation, plugin.name());
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn cursor(&self) -> Result<Point> {
        self.selection.clone().ok_or(Error::NoSelection)
    }

    fn move_cursor(&mut self, point: Point) {
        self.selection = Some(point);
        self.marks = None;
    }

    fn leaf(&self, path: &[usize]) -> Result<&TextRun> {
        self.document.text(path).ok_or_else(|| invalid_path(path))
    }

    fn element_mut(&mut self, path: &[usize]) -> Result<&mut Element> {
        self.document
            .node_mut(path)
            .and_then(Node::as_element_mut)
            .ok_or_else(|| invalid_path(path))
    }

    fn siblings_mut(&mut self, path: &[usize]) -> Result<&mut Vec<Node>> {
        self.document
            .siblings_mut(path)
            .ok_or_else(|| invalid_path(path))
    }

    fn node_is_inline(&self, node: &Node) -> bool {
        match node {
            Node::Text(_) => true,
            Node::Element(element) => self.is_inline(element),
        }
    }

    /// Nearest strict ancestor of `path` that is an element matching
    /// `predicate`.
    fn ancestor_where(&self, path: &[usize], predicate: impl Fn(&Element) -> bool) -> Option<Path> {
        (1..path.len()).rev().find_map(|len| {
            let element = self.document.node(&path[..len])?.as_element()?;
            predicate(element).then(|| path[..len].to_vec())
        })
    }

    fn block_of(&self, path: &[usize]) -> Option<Path> {
        self.ancestor_where(path, |element| !self.is_inline(element))
    }

    /// Highest void element containing `path`.
    fn void_ancestor(&self, path: &[usize]) -> Option<Path> {
        (1..path.len()).find_map(|len| {
            let element = self.document.node(&path[..len])?.as_element()?;
            self.is_void(element).then(|| path[..len].to_vec())
        })
    }

    fn leaf_paths(&self) -> Vec<Path> {
        self.document
            .text_leaves()
            .into_iter()
            .map(|(path, _)| path)
            .collect()
    }

    /// Insert a node, shifting the cursor if it sits after the insertion.
    fn insert_node_at(&mut self, path: &[usize], node: Node) -> Result<()> {
        let index = *path.last().ok_or_else(|| invalid_path(path))?;
        let siblings = self.siblings_mut(path)?;
        if index > siblings.len() {
            return Err(invalid_path(path));
        }
        siblings.insert(index, node);

        if let Some(point) = &mut self.selection {
            let depth = path.len() - 1;
            if point.path.len() > depth
                && point.path[..depth] == path[..depth]
                && point.path[depth] >= index
            {
                point.path[depth] += 1;
            }
        }
        Ok(())
    }

    /// Remove a node, shifting the cursor if it sits after it. A cursor
    /// inside the removed node is cleared.
    fn remove_node(&mut self, path: &[usize]) -> Result<Node> {
        let index = *path.last().ok_or_else(|| invalid_path(path))?;
        let siblings = self.siblings_mut(path)?;
        if index >= siblings.len() {
            return Err(invalid_path(path));
        }
        let node = siblings.remove(index);

        let depth = path.len() - 1;
        let inside = match &mut self.selection {
            Some(point) if point.path.len() > depth && point.path[..depth] == path[..depth] => {
                if point.path[depth] > index {
                    point.path[depth] -= 1;
                    false
                } else {
                    point.path[depth] == index
                }
            }
            _ => false,
        };
        if inside {
            self.selection = None;
        }
        Ok(node)
    }

    /// Remove elements left without children, walking up from the parent
    /// of a removed node.
    fn remove_empty_ancestors(&mut self, removed: &[usize]) -> Result<()> {
        let mut parent = removed[..removed.len().saturating_sub(1)].to_vec();
        while !parent.is_empty() {
            let empty = matches!(
                self.document.node(&parent),
                Some(Node::Element(element)) if element.children.is_empty()
            );
            if !empty {
                break;
            }
            self.remove_node(&parent)?;
            parent.pop();
        }
        Ok(())
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("document", &self.document)
            .field("selection", &self.selection)
            .field("marks", &self.marks)
            .field("plugins", &self.plugin_names())
            .finish()
    }
}

/// Builder composing an [`Editor`] from a document and plugins.
#[derive(Default)]
pub struct EditorBuilder {
    document: Document,
    plugins: Vec<Box<dyn EditorPlugin>>,
}

impl EditorBuilder {
    /// Create a builder with an empty document and no plugins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial document.
    pub fn document(mut self, document: Document) -> Self {
        self.document = document;
        self
    }

    /// Register a plugin. Earlier plugins are asked first.
    pub fn plugin(mut self, plugin: impl EditorPlugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Register already-boxed plugins.
    pub fn plugins(mut self, plugins: impl IntoIterator<Item = Box<dyn EditorPlugin>>) -> Self {
        self.plugins.extend(plugins);
        self
    }

    /// Register every built-in plugin.
    pub fn standard_plugins(self) -> Self {
        self.plugins(standard_plugins())
    }

    /// Build the editor.
    pub fn build(self) -> Editor {
        log::debug!("building editor with {} plugins", self.plugins.len());
        Editor {
            document: self.document,
            selection: None,
            marks: None,
            plugins: self.plugins.into(),
        }
    }
}

fn invalid_path(path: &[usize]) -> Error {
    Error::InvalidPath(format!("{:?}", path))
}
