//! Document-level types.

use serde::{Deserialize, Serialize};

use super::{ElementKind, Node, TextRun};

/// Position of a node in the document tree: child indices from the root.
pub type Path = Vec<usize>;

/// An editable rich-text document: an ordered list of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    /// Top-level nodes
    pub children: Vec<Node>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// Create a document from top-level nodes.
    pub fn from_nodes(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Check if the document has no nodes.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Get the node at a path.
    pub fn node(&self, path: &[usize]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.children.get(*first)?;
        for index in rest {
            node = node.as_element()?.children.get(*index)?;
        }
        Some(node)
    }

    /// Get the node at a path mutably.
    pub fn node_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.children.get_mut(*first)?;
        for index in rest {
            node = node.as_element_mut()?.children.get_mut(*index)?;
        }
        Some(node)
    }

    /// Get the text leaf at a path.
    pub fn text(&self, path: &[usize]) -> Option<&TextRun> {
        self.node(path)?.as_text()
    }

    /// Child list that contains the node at `path` (the document's own list
    /// for top-level paths).
    pub fn siblings_mut(&mut self, path: &[usize]) -> Option<&mut Vec<Node>> {
        match path.split_last() {
            None => None,
            Some((_, [])) => Some(&mut self.children),
            Some((_, parent)) => Some(&mut self.node_mut(parent)?.as_element_mut()?.children),
        }
    }

    /// All text leaves in depth-first document order, with their paths.
    pub fn text_leaves(&self) -> Vec<(Path, &TextRun)> {
        fn walk<'a>(nodes: &'a [Node], prefix: &mut Path, out: &mut Vec<(Path, &'a TextRun)>) {
            for (index, node) in nodes.iter().enumerate() {
                prefix.push(index);
                match node {
                    Node::Text(run) => out.push((prefix.clone(), run)),
                    Node::Element(element) => walk(&element.children, prefix, out),
                }
                prefix.pop();
            }
        }

        let mut out = Vec::new();
        walk(&self.children, &mut Vec::new(), &mut out);
        out
    }

    /// Get plain text content, one line per top-level node.
    pub fn plain_text(&self) -> String {
        self.children
            .iter()
            .map(Node::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Count blocks, headings, links, images and text.
    pub fn stats(&self) -> DocumentStats {
        fn walk(nodes: &[Node], stats: &mut DocumentStats) {
            for node in nodes {
                match node {
                    Node::Text(run) => {
                        stats.text_leaves += 1;
                        stats.characters += run.char_len();
                    }
                    Node::Element(element) => {
                        match &element.kind {
                            ElementKind::Link { .. } => stats.links += 1,
                            ElementKind::Image { .. } => stats.images += 1,
                            kind if kind.heading_level().is_some() => stats.headings += 1,
                            _ => {}
                        }
                        walk(&element.children, stats);
                    }
                }
            }
        }

        let mut stats = DocumentStats {
            blocks: self.children.len(),
            ..Default::default()
        };
        walk(&self.children, &mut stats);
        stats.words = self.plain_text().split_whitespace().count();
        stats
    }
}

impl From<Vec<Node>> for Document {
    fn from(children: Vec<Node>) -> Self {
        Self::from_nodes(children)
    }
}

/// Summary counts for a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Top-level nodes
    pub blocks: usize,
    /// Heading elements
    pub headings: usize,
    /// Link elements
    pub links: usize,
    /// Image elements
    pub images: usize,
    /// Text leaves
    pub text_leaves: usize,
    /// Whitespace-separated words
    pub words: usize,
    /// Characters across all text leaves
    pub characters: usize,
}
