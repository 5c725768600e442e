//! HTML node tree to document nodes.
//!
//! Each HTML node deserializes to one of a few shapes (nothing, a raw
//! string, an element, a sequence, or a top-level fragment). Callers
//! flatten child results one level and resolve raw strings into text runs
//! when building an element.

use super::{tags, HtmlElement, HtmlNode, ImportOptions};
use crate::model::{Element, Mark, Marks, Node, TextRun};

/// One item of a flattened child list.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    /// Unformatted text; adjacent raw strings merge into one text run
    Raw(String),

    /// A finished node
    Node(Node),
}

/// Result of deserializing a single HTML node.
#[derive(Debug, Clone, PartialEq)]
pub enum Deserialized {
    /// Node is dropped (comments and other non-element, non-text nodes)
    Skip,

    /// Raw text (text nodes, and `"\n"` for `<br>`)
    Text(String),

    /// A single element
    Element(Element),

    /// A sequence of children to splice into the parent
    Sequence(Vec<Child>),

    /// Top-level fragment produced for `body`
    Fragment(Vec<Node>),
}

impl Deserialized {
    /// Append this result to a child list, flattening sequences one level.
    pub fn flatten_into(self, out: &mut Vec<Child>) {
        match self {
            Deserialized::Skip => {}
            Deserialized::Text(text) => out.push(Child::Raw(text)),
            Deserialized::Element(element) => out.push(Child::Node(Node::Element(element))),
            Deserialized::Sequence(children) => out.extend(children),
            Deserialized::Fragment(nodes) => out.extend(nodes.into_iter().map(Child::Node)),
        }
    }

    /// Resolve into a list of document nodes.
    pub fn into_nodes(self) -> Vec<Node> {
        let mut children = Vec::new();
        self.flatten_into(&mut children);
        resolve(children)
    }
}

/// Turn a flattened child list into nodes, merging adjacent raw strings.
pub fn resolve(children: Vec<Child>) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(children.len());
    let mut pending: Option<String> = None;

    for child in children {
        match child {
            Child::Raw(text) => pending.get_or_insert_with(String::new).push_str(&text),
            Child::Node(node) => {
                if let Some(text) = pending.take() {
                    nodes.push(Node::text(text));
                }
                nodes.push(node);
            }
        }
    }
    if let Some(text) = pending {
        nodes.push(Node::text(text));
    }

    nodes
}

/// Deserialize an HTML node with default options.
pub fn deserialize(node: &HtmlNode) -> Deserialized {
    deserialize_with_options(node, &ImportOptions::default())
}

/// Deserialize an HTML node.
pub fn deserialize_with_options(node: &HtmlNode, options: &ImportOptions) -> Deserialized {
    Importer { options }.visit(node, 0)
}

struct Importer<'a> {
    options: &'a ImportOptions,
}

impl Importer<'_> {
    fn visit(&self, node: &HtmlNode, depth: usize) -> Deserialized {
        let element = match node {
            HtmlNode::Text(text) => return Deserialized::Text(text.clone()),
            HtmlNode::Comment(_) | HtmlNode::Other => return Deserialized::Skip,
            HtmlNode::Element(element) => element,
        };

        if element.is("br") {
            return Deserialized::Text("\n".to_string());
        }

        if depth >= self.options.max_depth {
            log::warn!(
                "<{}> nested deeper than {} levels, importing text only",
                element.name,
                self.options.max_depth
            );
            return Deserialized::Text(node.text_content());
        }

        let is_body = element.is("body");
        let mut children = Vec::new();
        for child in &content_parent(element).children {
            if is_body && self.options.drop_whitespace_text && is_blank_text(child) {
                continue;
            }
            self.visit(child, depth + 1).flatten_into(&mut children);
        }

        if children.is_empty() {
            children.push(Child::Node(Node::Text(TextRun::empty())));
        }

        if is_body {
            return Deserialized::Fragment(resolve(children));
        }

        if let Some(kind) = tags::element_kind(element) {
            return Deserialized::Element(Element::new(kind, resolve(children)));
        }

        if let Some(mark) = tags::text_mark(&element.name) {
            let marked = children
                .into_iter()
                .map(|child| Child::Node(apply_mark(child, mark)))
                .collect();
            return Deserialized::Sequence(marked);
        }

        log::debug!("unrecognized <{}>, keeping its children", element.name);
        Deserialized::Sequence(children)
    }
}

/// `<pre><code>...</code></pre>` takes its content from the inner `code`
/// so the code body is not wrapped twice.
fn content_parent(element: &HtmlElement) -> &HtmlElement {
    if element.is("pre") {
        if let Some(HtmlNode::Element(first)) = element.children.first() {
            if first.is("code") {
                return first;
            }
        }
    }
    element
}

fn is_blank_text(node: &HtmlNode) -> bool {
    matches!(node, HtmlNode::Text(text) if text.trim().is_empty())
}

/// Wrap a child as a text run carrying `mark`, merged onto marks it
/// already has. Elements get the mark on every text leaf inside them.
fn apply_mark(child: Child, mark: Mark) -> Node {
    match child {
        Child::Raw(text) => Node::Text(TextRun::with_marks(text, Marks::from(mark))),
        Child::Node(Node::Text(run)) => Node::Text(run.mark(mark)),
        Child::Node(Node::Element(mut element)) => {
            mark_leaves(&mut element.children, mark);
            Node::Element(element)
        }
    }
}

fn mark_leaves(nodes: &mut [Node], mark: Mark) {
    for node in nodes {
        match node {
            Node::Text(run) => run.marks.set(mark, true),
            Node::Element(element) => mark_leaves(&mut element.children, mark),
        }
    }
}
