//! Document tree nodes: elements and text leaves.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::TextRun;
use crate::error::Error;

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// A structural node with children
    Element(Element),

    /// A text leaf
    Text(TextRun),
}

impl Node {
    /// Create an unformatted text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextRun::new(text))
    }

    /// Check if this node is a text leaf.
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Get the text leaf, if this is one.
    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Node::Text(run) => Some(run),
            Node::Element(_) => None,
        }
    }

    /// Get the text leaf mutably, if this is one.
    pub fn as_text_mut(&mut self) -> Option<&mut TextRun> {
        match self {
            Node::Text(run) => Some(run),
            Node::Element(_) => None,
        }
    }

    /// Get the element, if this is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Get the element mutably, if this is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Children of this node (always empty for text leaves).
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        }
    }

    /// Concatenated text of every leaf below this node.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text(run) => run.text.clone(),
            Node::Element(element) => element.plain_text(),
        }
    }
}

impl From<TextRun> for Node {
    fn from(run: TextRun) -> Self {
        Node::Text(run)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// A structural node (paragraph, heading, list, link, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Element kind and kind-specific attributes
    #[serde(flatten)]
    pub kind: ElementKind,

    /// Block alignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Alignment>,

    /// Child nodes; never empty
    #[serde(deserialize_with = "deserialize_children")]
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element. An empty child list is replaced by a single empty
    /// text leaf so elements are never childless.
    pub fn new(kind: ElementKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            align: None,
            children: padded(children),
        }
    }

    /// Create a paragraph holding plain text.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(ElementKind::Paragraph, vec![Node::text(text)])
    }

    /// Create a heading (level clamped to 1-6) holding plain text.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        let kind = ElementKind::heading(level.clamp(1, 6)).unwrap_or(ElementKind::HeadingOne);
        Self::new(kind, vec![Node::text(text)])
    }

    /// Create a link wrapping the given children.
    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(ElementKind::Link { url: url.into() }, children)
    }

    /// Create an image element.
    pub fn image(url: impl Into<String>) -> Self {
        Self::new(ElementKind::Image { url: url.into() }, Vec::new())
    }

    /// Set the alignment.
    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    /// Concatenated text of every leaf below this element.
    pub fn plain_text(&self) -> String {
        self.children.iter().map(Node::plain_text).collect()
    }

    /// Heading level (1-6) or None.
    pub fn heading_level(&self) -> Option<u8> {
        self.kind.heading_level()
    }
}

fn padded(children: Vec<Node>) -> Vec<Node> {
    if children.is_empty() {
        vec![Node::Text(TextRun::empty())]
    } else {
        children
    }
}

/// Deserialized child lists get the same empty-leaf padding as
/// [`Element::new`].
fn deserialize_children<'de, D>(deserializer: D) -> std::result::Result<Vec<Node>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<Node>::deserialize(deserializer).map(padded)
}

/// The kind of an element, with kind-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ElementKind {
    /// Paragraph
    Paragraph,
    /// Level 1 heading
    HeadingOne,
    /// Level 2 heading
    HeadingTwo,
    /// Level 3 heading
    HeadingThree,
    /// Level 4 heading
    HeadingFour,
    /// Level 5 heading
    HeadingFive,
    /// Level 6 heading
    HeadingSix,
    /// Block quote
    #[serde(alias = "quote")]
    BlockQuote,
    /// Preformatted code block
    Code,
    /// Unordered list
    BulletedList,
    /// Ordered list
    NumberedList,
    /// Item of an ordered or unordered list
    ListItem,
    /// Item with a checkbox
    CheckListItem {
        /// Whether the box is ticked
        #[serde(default)]
        checked: bool,
    },
    /// Hyperlink (inline)
    Link {
        /// Link target
        url: String,
    },
    /// Image (void)
    Image {
        /// Image source
        url: String,
    },
    /// Mention of a person or character (inline, void)
    Mention {
        /// Mentioned name
        character: String,
    },
    /// Table
    Table,
    /// Table row
    TableRow,
    /// Table cell
    TableCell,
}

impl ElementKind {
    /// Heading kind for a level in 1-6.
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(ElementKind::HeadingOne),
            2 => Some(ElementKind::HeadingTwo),
            3 => Some(ElementKind::HeadingThree),
            4 => Some(ElementKind::HeadingFour),
            5 => Some(ElementKind::HeadingFive),
            6 => Some(ElementKind::HeadingSix),
            _ => None,
        }
    }

    /// Heading level (1-6) or None for non-headings.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            ElementKind::HeadingOne => Some(1),
            ElementKind::HeadingTwo => Some(2),
            ElementKind::HeadingThree => Some(3),
            ElementKind::HeadingFour => Some(4),
            ElementKind::HeadingFive => Some(5),
            ElementKind::HeadingSix => Some(6),
            _ => None,
        }
    }

    /// Check if this is a list container.
    pub fn is_list(&self) -> bool {
        matches!(self, ElementKind::BulletedList | ElementKind::NumberedList)
    }

    /// The kind's `type` name in serialized documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Paragraph => "paragraph",
            ElementKind::HeadingOne => "heading-one",
            ElementKind::HeadingTwo => "heading-two",
            ElementKind::HeadingThree => "heading-three",
            ElementKind::HeadingFour => "heading-four",
            ElementKind::HeadingFive => "heading-five",
            ElementKind::HeadingSix => "heading-six",
            ElementKind::BlockQuote => "block-quote",
            ElementKind::Code => "code",
            ElementKind::BulletedList => "bulleted-list",
            ElementKind::NumberedList => "numbered-list",
            ElementKind::ListItem => "list-item",
            ElementKind::CheckListItem { .. } => "check-list-item",
            ElementKind::Link { .. } => "link",
            ElementKind::Image { .. } => "image",
            ElementKind::Mention { .. } => "mention",
            ElementKind::Table => "table",
            ElementKind::TableRow => "table-row",
            ElementKind::TableCell => "table-cell",
        }
    }

    /// Check if two kinds have the same `type`, ignoring attributes.
    pub fn same_type(&self, other: &ElementKind) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = Error;

    /// Parse a kind that carries no attributes (links, images and mentions
    /// need a payload and cannot be parsed from a bare name).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim() {
            "paragraph" => ElementKind::Paragraph,
            "heading-one" => ElementKind::HeadingOne,
            "heading-two" => ElementKind::HeadingTwo,
            "heading-three" => ElementKind::HeadingThree,
            "heading-four" => ElementKind::HeadingFour,
            "heading-five" => ElementKind::HeadingFive,
            "heading-six" => ElementKind::HeadingSix,
            "block-quote" | "quote" => ElementKind::BlockQuote,
            "code" => ElementKind::Code,
            "bulleted-list" => ElementKind::BulletedList,
            "numbered-list" => ElementKind::NumberedList,
            "list-item" => ElementKind::ListItem,
            "check-list-item" => ElementKind::CheckListItem { checked: false },
            "table" => ElementKind::Table,
            "table-row" => ElementKind::TableRow,
            "table-cell" => ElementKind::TableCell,
            other => return Err(Error::UnknownBlockFormat(other.to_string())),
        };
        Ok(kind)
    }
}

/// Text alignment of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

impl Alignment {
    /// The alignment's name in serialized documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }
}

impl FromStr for Alignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            "justify" => Ok(Alignment::Justify),
            other => Err(Error::UnknownBlockFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_never_childless() {
        let image = Element::image("pic.png");
        assert_eq!(image.children, vec![Node::text("")]);
    }

    #[test]
    fn test_heading_levels() {
        let h3 = Element::heading(3, "Title");
        assert_eq!(h3.heading_level(), Some(3));
        assert_eq!(Element::heading(9, "x").heading_level(), Some(6));
        assert_eq!(ElementKind::heading(0), None);
    }

    #[test]
    fn test_element_serialization_shape() {
        let link = Element::link("https://example.com", vec![Node::text("here")]);
        let json = serde_json::to_value(Node::Element(link)).unwrap();
        assert_eq!(json["type"], "link");
        assert_eq!(json["url"], "https://example.com");
        assert_eq!(json["children"][0]["text"], "here");
        assert!(json.get("align").is_none());
    }

    #[test]
    fn test_node_deserialization() {
        let json = r#"{"type":"quote","children":[{"text":"a","bold":true}]}"#;
        let node: Node = serde_json::from_str(json).unwrap();
        let element = node.as_element().unwrap();
        assert_eq!(element.kind, ElementKind::BlockQuote);
        assert_eq!(element.children[0], Node::Text(TextRun::bold("a")));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(
            "numbered-list".parse::<ElementKind>().unwrap(),
            ElementKind::NumberedList
        );
        assert!("link".parse::<ElementKind>().is_err());
        assert_eq!("center".parse::<Alignment>().unwrap(), Alignment::Center);
    }
}
